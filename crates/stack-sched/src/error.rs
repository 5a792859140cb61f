use stack_core::ActionId;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum SchedError {
    /// A pending id has no action in the store (the caller removed it).
    /// The stale id has already been dropped from the scheduler.
    #[error("{0} is pending but missing from the action store")]
    ActionNotFound(ActionId),
}

pub type SchedResult<T> = Result<T, SchedError>;
