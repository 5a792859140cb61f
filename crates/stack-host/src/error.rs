use stack_core::CoreError;
use stack_sched::SchedError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum StageError {
    #[error("stage configuration error: {0}")]
    Config(#[from] CoreError),

    #[error("duplicate host label {0:?}")]
    DuplicateHost(String),

    #[error("host {host:?}: {source}")]
    Sched {
        host:   String,
        #[source]
        source: SchedError,
    },
}

pub type StageResult<T> = Result<T, StageError>;
