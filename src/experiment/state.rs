//! Experiment State - the checkpointable snapshot of a running experiment

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::record::{RecordStatus, ResultRecord};
use super::summary::ExperimentSummary;

/// Lifecycle status of an experiment.
///
/// Transitions: `Initialized` → `Running` (on first save), `Running` ↔
/// `Reset` cyclically, and any non-terminal status → `Finished`. There is
/// no transition out of `Finished`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExperimentStatus {
    /// Fresh state, nothing persisted yet.
    Initialized,
    /// At least one checkpoint has been written.
    Running,
    /// State was cleared in place; next save returns to `Running`.
    Reset,
    /// Terminal; set by `finish`.
    Finished,
}

impl std::fmt::Display for ExperimentStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Self::Initialized => "initialized",
            Self::Running => "running",
            Self::Reset => "reset",
            Self::Finished => "finished",
        };
        write!(f, "{s}")
    }
}

/// Experiment metadata persisted alongside the result sequence.
///
/// Absent optional fields serialize as explicit `None`. The checkpoint
/// codec is not self-describing, so skipping them would shift every
/// following field on decode.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExperimentMetadata {
    experiment_name: String,
    start_time: DateTime<Utc>,
    last_save: Option<DateTime<Utc>>,
    end_time: Option<DateTime<Utc>>,
    total_iterations: Option<u64>,
    status: ExperimentStatus,
}

impl ExperimentMetadata {
    fn new(experiment_name: impl Into<String>) -> Self {
        Self {
            experiment_name: experiment_name.into(),
            start_time: Utc::now(),
            last_save: None,
            end_time: None,
            total_iterations: None,
            status: ExperimentStatus::Initialized,
        }
    }

    /// Get the experiment name.
    #[must_use]
    pub fn experiment_name(&self) -> &str {
        &self.experiment_name
    }

    /// Get the start timestamp (re-stamped on reset).
    #[must_use]
    pub const fn start_time(&self) -> DateTime<Utc> {
        self.start_time
    }

    /// Get the last-save timestamp, if any checkpoint has been written.
    #[must_use]
    pub const fn last_save(&self) -> Option<DateTime<Utc>> {
        self.last_save
    }

    /// Get the end timestamp, if the experiment has finished.
    #[must_use]
    pub const fn end_time(&self) -> Option<DateTime<Utc>> {
        self.end_time
    }

    /// Get the current lifecycle status.
    #[must_use]
    pub const fn status(&self) -> ExperimentStatus {
        self.status
    }
}

/// Full checkpointable state: metadata, attempt counter, result sequence.
///
/// Owned exclusively by one `CheckpointedExperiment`; the serialized
/// checkpoint file is the only way state crosses a process boundary.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExperimentState<I, P, O> {
    metadata: ExperimentMetadata,
    results: Vec<ResultRecord<I, P, O>>,
    current_iteration: u64,
}

impl<I, P, O> ExperimentState<I, P, O> {
    /// Create an empty state for the named experiment.
    #[must_use]
    pub fn new(experiment_name: impl Into<String>) -> Self {
        Self {
            metadata: ExperimentMetadata::new(experiment_name),
            results: Vec::new(),
            current_iteration: 0,
        }
    }

    /// Get the metadata block.
    #[must_use]
    pub const fn metadata(&self) -> &ExperimentMetadata {
        &self.metadata
    }

    /// Get the ordered result sequence.
    #[must_use]
    pub fn results(&self) -> &[ResultRecord<I, P, O>] {
        &self.results
    }

    /// Get the attempt counter. Counts attempts, not successes.
    #[must_use]
    pub const fn current_iteration(&self) -> u64 {
        self.current_iteration
    }

    /// Append a record and advance the attempt counter.
    ///
    /// The counter advances exactly once per call regardless of the
    /// record's outcome.
    pub fn append(&mut self, record: ResultRecord<I, P, O>) {
        self.results.push(record);
        self.current_iteration += 1;
    }

    /// Stamp save-time metadata before a checkpoint write.
    ///
    /// Moves a non-terminal status to `Running`. `Finished` is terminal
    /// and is left untouched, so the final checkpoint keeps its status.
    pub fn mark_saved(&mut self) {
        self.metadata.last_save = Some(Utc::now());
        if self.metadata.status != ExperimentStatus::Finished {
            self.metadata.status = ExperimentStatus::Running;
        }
    }

    /// Clear counter and results in place, stamping a new start time.
    ///
    /// The experiment name is preserved; on-disk checkpoints are not
    /// touched.
    pub fn reset(&mut self) {
        self.current_iteration = 0;
        self.results.clear();
        self.metadata.start_time = Utc::now();
        self.metadata.status = ExperimentStatus::Reset;
    }

    /// Stamp end time and move to the terminal `Finished` status.
    pub fn finish(&mut self) {
        self.metadata.end_time = Some(Utc::now());
        self.metadata.total_iterations = Some(self.current_iteration);
        self.metadata.status = ExperimentStatus::Finished;
    }

    /// Count records with the given status.
    #[must_use]
    pub fn count_by_status(&self, status: RecordStatus) -> usize {
        self.results.iter().filter(|r| r.status() == status).count()
    }

    /// Derive a read-only summary snapshot.
    #[must_use]
    pub fn summary(&self) -> ExperimentSummary {
        let successful = self.count_by_status(RecordStatus::Success);
        let errors = self.count_by_status(RecordStatus::Error);
        ExperimentSummary::new(
            self.metadata.experiment_name.clone(),
            self.current_iteration,
            self.results.len(),
            successful,
            errors,
            self.metadata.start_time,
            self.metadata.last_save,
            self.metadata.status,
        )
    }
}
