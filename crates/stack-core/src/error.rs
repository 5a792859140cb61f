//! Workspace base error type.
//!
//! Sub-crates define their own error enums and wrap `CoreError` where a
//! configuration problem can surface.

use thiserror::Error;

/// The error type for `stack-core` configuration.
#[derive(Debug, Error)]
pub enum CoreError {
    #[error("configuration error: {0}")]
    Config(String),
}

/// Shorthand result type for `stack-core`.
pub type CoreResult<T> = Result<T, CoreError>;
