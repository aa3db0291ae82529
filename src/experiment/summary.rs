//! Experiment Summary - derived read-only progress snapshot

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::state::ExperimentStatus;

/// Read-only snapshot of experiment progress.
///
/// Derived from `ExperimentState` on demand; never stored.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExperimentSummary {
    experiment_name: String,
    current_iteration: u64,
    total_results: usize,
    successful_results: usize,
    error_results: usize,
    success_rate: f64,
    start_time: DateTime<Utc>,
    #[serde(skip_serializing_if = "Option::is_none")]
    last_save: Option<DateTime<Utc>>,
    status: ExperimentStatus,
}

impl ExperimentSummary {
    #[allow(clippy::too_many_arguments)]
    pub(crate) fn new(
        experiment_name: String,
        current_iteration: u64,
        total_results: usize,
        successful_results: usize,
        error_results: usize,
        start_time: DateTime<Utc>,
        last_save: Option<DateTime<Utc>>,
        status: ExperimentStatus,
    ) -> Self {
        // Defined as 0 for an empty result sequence.
        let success_rate = if total_results == 0 {
            0.0
        } else {
            successful_results as f64 / total_results as f64
        };
        Self {
            experiment_name,
            current_iteration,
            total_results,
            successful_results,
            error_results,
            success_rate,
            start_time,
            last_save,
            status,
        }
    }

    /// Get the experiment name.
    #[must_use]
    pub fn experiment_name(&self) -> &str {
        &self.experiment_name
    }

    /// Get the attempt counter at snapshot time.
    #[must_use]
    pub const fn current_iteration(&self) -> u64 {
        self.current_iteration
    }

    /// Get the total number of recorded results.
    #[must_use]
    pub const fn total_results(&self) -> usize {
        self.total_results
    }

    /// Get the number of success records.
    #[must_use]
    pub const fn successful_results(&self) -> usize {
        self.successful_results
    }

    /// Get the number of error records.
    #[must_use]
    pub const fn error_results(&self) -> usize {
        self.error_results
    }

    /// Get the success rate, always within `[0, 1]`.
    #[must_use]
    pub const fn success_rate(&self) -> f64 {
        self.success_rate
    }

    /// Get the start timestamp.
    #[must_use]
    pub const fn start_time(&self) -> DateTime<Utc> {
        self.start_time
    }

    /// Get the last-save timestamp, if any.
    #[must_use]
    pub const fn last_save(&self) -> Option<DateTime<Utc>> {
        self.last_save
    }

    /// Get the lifecycle status at snapshot time.
    #[must_use]
    pub const fn status(&self) -> ExperimentStatus {
        self.status
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_summary_has_zero_rate() {
        let summary = ExperimentSummary::new(
            "demo".to_string(),
            0,
            0,
            0,
            0,
            Utc::now(),
            None,
            ExperimentStatus::Initialized,
        );
        assert!((summary.success_rate() - 0.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_success_rate_computation() {
        let summary = ExperimentSummary::new(
            "demo".to_string(),
            4,
            4,
            3,
            1,
            Utc::now(),
            None,
            ExperimentStatus::Running,
        );
        assert!((summary.success_rate() - 0.75).abs() < f64::EPSILON);
    }
}
