//! Result Record - outcome of a single unit of work

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Outcome status of a single iteration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RecordStatus {
    /// All hooks ran and both validators accepted.
    Success,
    /// A hook failed or a validator rejected; the message is preserved.
    Error,
}

/// Result Record captures one unit-of-work outcome, success or error.
///
/// Records are append-only: once a record lands in the experiment state it
/// is never mutated. The iteration index is the value of the attempt
/// counter at the time the input was handed to the harness.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ResultRecord<I, P, O> {
    iteration: u64,
    input: I,
    processed: Option<P>,
    output: Option<O>,
    error: Option<String>,
    timestamp: DateTime<Utc>,
    status: RecordStatus,
}

impl<I, P, O> ResultRecord<I, P, O> {
    /// Create a success record with all intermediate values.
    #[must_use]
    pub fn success(iteration: u64, input: I, processed: P, output: O) -> Self {
        Self {
            iteration,
            input,
            processed: Some(processed),
            output: Some(output),
            error: None,
            timestamp: Utc::now(),
            status: RecordStatus::Success,
        }
    }

    /// Create an error record carrying the failure message.
    #[must_use]
    pub fn failure(iteration: u64, input: I, error: impl Into<String>) -> Self {
        Self {
            iteration,
            input,
            processed: None,
            output: None,
            error: Some(error.into()),
            timestamp: Utc::now(),
            status: RecordStatus::Error,
        }
    }

    /// Get the iteration index at which this record was produced.
    #[must_use]
    pub const fn iteration(&self) -> u64 {
        self.iteration
    }

    /// Get the raw input.
    #[must_use]
    pub const fn input(&self) -> &I {
        &self.input
    }

    /// Get the derived intermediate value, if the processing step ran.
    #[must_use]
    pub const fn processed(&self) -> Option<&P> {
        self.processed.as_ref()
    }

    /// Get the derived output, if the iteration succeeded.
    #[must_use]
    pub const fn output(&self) -> Option<&O> {
        self.output.as_ref()
    }

    /// Get the error message, if the iteration failed.
    #[must_use]
    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    /// Get the timestamp at which the record was created.
    #[must_use]
    pub const fn timestamp(&self) -> DateTime<Utc> {
        self.timestamp
    }

    /// Get the outcome status.
    #[must_use]
    pub const fn status(&self) -> RecordStatus {
        self.status
    }

    /// True when the record carries a success outcome.
    #[must_use]
    pub fn is_success(&self) -> bool {
        self.status == RecordStatus::Success
    }
}
