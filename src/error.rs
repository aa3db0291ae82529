//! Error types for benchrun
//!
//! Hook failures are recoverable (captured as error records); checkpoint
//! write failures are not, and always propagate.

use thiserror::Error;

/// Result type alias
pub type Result<T> = std::result::Result<T, Error>;

/// Benchrun error types
#[derive(Error, Debug)]
pub enum Error {
    /// Input or output rejected by a validation hook
    #[error("validation failed: {0}")]
    Validation(String),

    /// Subclass transformation step failed
    #[error("processing failed: {0}")]
    Processing(String),

    /// Checkpoint encode/decode failure
    #[error("persistence error: {0}")]
    Persistence(String),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl Error {
    /// Build a `Processing` error from any displayable cause.
    ///
    /// Convenience for experiment hooks wrapping external failures
    /// (solver exit codes, parse errors, missing files).
    #[must_use]
    pub fn processing(cause: impl std::fmt::Display) -> Self {
        Self::Processing(cause.to_string())
    }
}
