//! Checkpointed experiment runner
//!
//! Owns the experiment state, drives single iterations through the hook
//! pipeline, and persists/restores checkpoints under the output layout.

use std::fs;
use std::path::PathBuf;

use chrono::Utc;

use super::record::ResultRecord;
use super::state::{ExperimentState, ExperimentStatus};
use super::summary::ExperimentSummary;
use super::Experiment;
use crate::error::{Error, Result};
use crate::layout::OutputLayout;

/// Configuration for a checkpointed experiment run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExperimentConfig {
    /// Root directory for checkpoints, benchmarks and logs
    pub output_dir: PathBuf,
    /// Checkpoint every N completed iterations
    pub save_interval: u64,
    /// Whether `run_single` checkpoints automatically
    pub auto_save: bool,
}

impl Default for ExperimentConfig {
    fn default() -> Self {
        Self {
            output_dir: PathBuf::from("ExperimentResults"),
            save_interval: 1,
            auto_save: true,
        }
    }
}

impl ExperimentConfig {
    /// Create a config with the given output directory.
    pub fn new(output_dir: impl Into<PathBuf>) -> Self {
        Self {
            output_dir: output_dir.into(),
            ..Default::default()
        }
    }

    /// Set the auto-save interval in iterations.
    #[must_use]
    pub const fn save_interval(mut self, iterations: u64) -> Self {
        self.save_interval = iterations;
        self
    }

    /// Enable or disable automatic checkpointing.
    #[must_use]
    pub const fn auto_save(mut self, enabled: bool) -> Self {
        self.auto_save = enabled;
        self
    }
}

/// Runner that executes one labelled unit of work at a time, accumulates
/// results in memory, and periodically persists full state to disk.
///
/// A crashed or restarted process resumes from the most recent checkpoint:
/// construction scans the output directory and, if a usable checkpoint
/// exists, replaces the fresh state wholesale.
///
/// Single-threaded and single-writer. Callers must ensure one live
/// instance per (output dir, experiment name) pair; concurrent instances
/// race on checkpoint files.
///
/// # Example
///
/// ```rust,no_run
/// use benchrun::{CheckpointedExperiment, Experiment, ExperimentConfig, Result};
///
/// struct Doubler;
///
/// impl Experiment for Doubler {
///     type Input = u32;
///     type Processed = u32;
///     type Output = u32;
///
///     fn configure(&mut self, _options: &serde_json::Value) -> Result<()> {
///         Ok(())
///     }
///
///     fn process_input(&mut self, input: &u32) -> Result<u32> {
///         Ok(input * 2)
///     }
///
///     fn generate_output(&mut self, processed: &u32) -> Result<u32> {
///         Ok(processed + 1)
///     }
///
///     fn run(runner: &mut CheckpointedExperiment<Self>) -> Result<()> {
///         for input in 0..10 {
///             runner.run_single(input)?;
///         }
///         runner.finish()?;
///         Ok(())
///     }
/// }
///
/// let mut runner = CheckpointedExperiment::new(
///     "doubling",
///     Doubler,
///     ExperimentConfig::new("ExperimentResults").save_interval(5),
/// )?;
/// runner.run()?;
/// # Ok::<(), benchrun::Error>(())
/// ```
pub struct CheckpointedExperiment<E: Experiment> {
    experiment_name: String,
    config: ExperimentConfig,
    layout: OutputLayout,
    state: ExperimentState<E::Input, E::Processed, E::Output>,
    experiment: E,
}

impl<E: Experiment> CheckpointedExperiment<E> {
    /// Create a runner, building the output layout and resuming from the
    /// most recent checkpoint if one exists.
    ///
    /// A missing or unreadable checkpoint is not fatal: the failure is
    /// logged and the runner starts from empty state.
    ///
    /// # Errors
    ///
    /// Returns an error if the output directories cannot be created.
    pub fn new(
        experiment_name: impl Into<String>,
        experiment: E,
        config: ExperimentConfig,
    ) -> Result<Self> {
        let experiment_name = experiment_name.into();
        let layout = OutputLayout::create(&config.output_dir)?;

        let mut runner = Self {
            state: ExperimentState::new(experiment_name.clone()),
            experiment_name,
            config,
            layout,
            experiment,
        };
        runner.load_latest();
        Ok(runner)
    }

    /// Get the experiment name.
    #[must_use]
    pub fn experiment_name(&self) -> &str {
        &self.experiment_name
    }

    /// Get the runner configuration.
    #[must_use]
    pub const fn config(&self) -> &ExperimentConfig {
        &self.config
    }

    /// Get the output directory layout.
    #[must_use]
    pub const fn layout(&self) -> &OutputLayout {
        &self.layout
    }

    /// Get the concrete experiment.
    #[must_use]
    pub const fn experiment(&self) -> &E {
        &self.experiment
    }

    /// Get mutable access to the concrete experiment.
    pub fn experiment_mut(&mut self) -> &mut E {
        &mut self.experiment
    }

    /// Get the attempt counter.
    #[must_use]
    pub const fn current_iteration(&self) -> u64 {
        self.state.current_iteration()
    }

    /// Get the ordered result sequence.
    #[must_use]
    pub fn results(&self) -> &[ResultRecord<E::Input, E::Processed, E::Output>] {
        self.state.results()
    }

    /// Get the current lifecycle status.
    #[must_use]
    pub const fn status(&self) -> ExperimentStatus {
        self.state.metadata().status()
    }

    /// Forward configuration options to the experiment hook.
    ///
    /// # Errors
    ///
    /// Returns whatever the hook returns.
    pub fn configure(&mut self, options: &serde_json::Value) -> Result<()> {
        self.experiment.configure(options)
    }

    /// Hand control to the experiment's drive loop.
    ///
    /// # Errors
    ///
    /// Returns whatever the drive loop returns.
    pub fn run(&mut self) -> Result<()> {
        E::run(self)
    }

    /// Execute one unit of work and record the outcome.
    ///
    /// The hook pipeline is validate input → process → generate output →
    /// validate output. Any hook failure is captured as an error-status
    /// record; it never propagates. The attempt counter advances exactly
    /// once per call regardless of outcome.
    ///
    /// # Errors
    ///
    /// Only a checkpoint write failure during auto-save surfaces as `Err`;
    /// the iteration itself is already recorded at that point.
    pub fn run_single(
        &mut self,
        input: E::Input,
    ) -> Result<ResultRecord<E::Input, E::Processed, E::Output>> {
        let iteration = self.state.current_iteration();

        let record = match self.attempt(&input) {
            Ok((processed, output)) => ResultRecord::success(iteration, input, processed, output),
            Err(e) => {
                tracing::warn!(
                    experiment = %self.experiment_name,
                    iteration,
                    error = %e,
                    "iteration failed"
                );
                ResultRecord::failure(iteration, input, e.to_string())
            }
        };
        self.state.append(record.clone());

        if self.config.auto_save
            && self.config.save_interval > 0
            && self.state.current_iteration() % self.config.save_interval == 0
        {
            self.save(None)?;
        }

        Ok(record)
    }

    fn attempt(&mut self, input: &E::Input) -> Result<(E::Processed, E::Output)> {
        if !self.experiment.validate_input(input) {
            return Err(Error::Validation("input validation failed".to_string()));
        }
        let processed = self.experiment.process_input(input)?;
        let output = self.experiment.generate_output(&processed)?;
        if !self.experiment.validate_output(&output) {
            return Err(Error::Validation("output validation failed".to_string()));
        }
        Ok((processed, output))
    }

    /// Persist the full state to a binary checkpoint file.
    ///
    /// Also writes a human-readable JSON digest (metadata and counts only,
    /// no result payloads) next to the checkpoint with the same stem. The
    /// default filename embeds a second-resolution timestamp; two saves
    /// within the same second overwrite each other (last write wins).
    ///
    /// # Errors
    ///
    /// Returns an error if encoding or either file write fails. A lost
    /// checkpoint is not a recoverable condition, so nothing is swallowed
    /// here.
    pub fn save(&mut self, filename: Option<&str>) -> Result<PathBuf> {
        let filename = filename.map_or_else(
            || {
                format!(
                    "{}_progress_{}.bin",
                    self.experiment_name,
                    Utc::now().format("%Y%m%d_%H%M%S")
                )
            },
            ToString::to_string,
        );

        self.state.mark_saved();

        let path = self.layout.root().join(filename);
        let bytes = bincode::serialize(&self.state)
            .map_err(|e| Error::Persistence(format!("checkpoint encode failed: {e}")))?;
        fs::write(&path, bytes)?;

        let digest = serde_json::json!({
            "metadata": self.state.metadata(),
            "current_iteration": self.state.current_iteration(),
            "experiment_name": self.experiment_name,
            "results_count": self.state.results().len(),
        });
        let text = serde_json::to_string_pretty(&digest)
            .map_err(|e| Error::Persistence(format!("digest encode failed: {e}")))?;
        fs::write(path.with_extension("json"), text)?;

        tracing::info!(
            path = %path.display(),
            iteration = self.state.current_iteration(),
            "progress saved"
        );
        Ok(path)
    }

    /// Derive a read-only summary of experiment progress.
    #[must_use]
    pub fn get_summary(&self) -> ExperimentSummary {
        self.state.summary()
    }

    /// Clear the iteration counter and result sequence in place.
    ///
    /// Stamps a new start time and moves the status to `Reset`. On-disk
    /// checkpoints are not deleted.
    pub fn reset(&mut self) {
        self.state.reset();
        tracing::info!(experiment = %self.experiment_name, "experiment state reset");
    }

    /// Mark the experiment finished and force a final checkpoint.
    ///
    /// The final checkpoint is always written under
    /// `{experiment_name}_final.bin`, independent of the save interval.
    /// `Finished` is terminal: later saves never change the status back.
    ///
    /// # Errors
    ///
    /// Returns an error if the final checkpoint cannot be written.
    pub fn finish(&mut self) -> Result<PathBuf> {
        self.state.finish();
        let filename = format!("{}_final.bin", self.experiment_name);
        let path = self.save(Some(&filename))?;
        tracing::info!(experiment = %self.experiment_name, "experiment finished");
        Ok(path)
    }

    /// Replace in-memory state from the latest checkpoint, if any.
    ///
    /// Runs once, at construction. Load failures are logged and the fresh
    /// state is kept.
    fn load_latest(&mut self) {
        let Some(path) = self.find_latest_checkpoint() else {
            return;
        };
        match Self::read_state(&path) {
            Ok(state) => {
                tracing::info!(
                    path = %path.display(),
                    iteration = state.current_iteration(),
                    "resuming from checkpoint"
                );
                self.state = state;
            }
            Err(e) => {
                tracing::warn!(
                    path = %path.display(),
                    error = %e,
                    "failed to load checkpoint, starting fresh"
                );
            }
        }
    }

    /// Find the `{experiment_name}_progress_*.bin` file with the latest
    /// filesystem modification time. Selection is by mtime, not by name.
    fn find_latest_checkpoint(&self) -> Option<PathBuf> {
        let prefix = format!("{}_progress_", self.experiment_name);
        let entries = fs::read_dir(self.layout.root()).ok()?;

        entries
            .filter_map(std::result::Result::ok)
            .map(|e| e.path())
            .filter(|p| {
                p.file_name()
                    .and_then(|n| n.to_str())
                    .is_some_and(|n| n.starts_with(&prefix) && n.ends_with(".bin"))
            })
            .max_by_key(|p| fs::metadata(p).and_then(|m| m.modified()).ok())
    }

    fn read_state(
        path: &std::path::Path,
    ) -> Result<ExperimentState<E::Input, E::Processed, E::Output>> {
        let bytes = fs::read(path)?;
        bincode::deserialize(&bytes)
            .map_err(|e| Error::Persistence(format!("checkpoint decode failed: {e}")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::experiment::RecordStatus;
    use tempfile::tempdir;

    /// Doubles the input, then adds one. Rejects inputs above a cap.
    struct Doubler {
        cap: u32,
        fail_processing: bool,
    }

    impl Doubler {
        fn new() -> Self {
            Self {
                cap: u32::MAX,
                fail_processing: false,
            }
        }
    }

    impl Experiment for Doubler {
        type Input = u32;
        type Processed = u32;
        type Output = u32;

        fn configure(&mut self, options: &serde_json::Value) -> Result<()> {
            if let Some(cap) = options.get("cap").and_then(serde_json::Value::as_u64) {
                self.cap = u32::try_from(cap).map_err(Error::processing)?;
            }
            Ok(())
        }

        fn process_input(&mut self, input: &u32) -> Result<u32> {
            if self.fail_processing {
                return Err(Error::Processing("injected failure".to_string()));
            }
            Ok(input * 2)
        }

        fn generate_output(&mut self, processed: &u32) -> Result<u32> {
            Ok(processed + 1)
        }

        fn validate_input(&self, input: &u32) -> bool {
            *input <= self.cap
        }

        fn run(runner: &mut CheckpointedExperiment<Self>) -> Result<()> {
            for input in 0..3 {
                runner.run_single(input)?;
            }
            Ok(())
        }
    }

    fn runner_in(dir: &std::path::Path) -> CheckpointedExperiment<Doubler> {
        CheckpointedExperiment::new("demo", Doubler::new(), ExperimentConfig::new(dir)).unwrap()
    }

    #[test]
    fn test_fresh_runner_state() {
        let dir = tempdir().unwrap();
        let runner = runner_in(dir.path());

        assert_eq!(runner.current_iteration(), 0);
        assert!(runner.results().is_empty());
        assert_eq!(runner.status(), ExperimentStatus::Initialized);
    }

    #[test]
    fn test_run_single_success() {
        let dir = tempdir().unwrap();
        let mut runner = runner_in(dir.path());

        let record = runner.run_single(5).unwrap();
        assert_eq!(record.status(), RecordStatus::Success);
        assert_eq!(record.processed(), Some(&10));
        assert_eq!(record.output(), Some(&11));
        assert_eq!(runner.current_iteration(), 1);
    }

    #[test]
    fn test_processing_failure_becomes_error_record() {
        let dir = tempdir().unwrap();
        let mut runner = runner_in(dir.path());
        runner.experiment_mut().fail_processing = true;

        let record = runner.run_single(5).unwrap();
        assert_eq!(record.status(), RecordStatus::Error);
        assert_eq!(record.error(), Some("processing failed: injected failure"));
        assert_eq!(runner.current_iteration(), 1);
    }

    #[test]
    fn test_input_validation_failure() {
        let dir = tempdir().unwrap();
        let mut runner = runner_in(dir.path());
        runner
            .configure(&serde_json::json!({ "cap": 10 }))
            .unwrap();

        let record = runner.run_single(11).unwrap();
        assert_eq!(record.status(), RecordStatus::Error);
        assert_eq!(
            record.error(),
            Some("validation failed: input validation failed")
        );
    }

    #[test]
    fn test_auto_save_respects_interval() {
        let dir = tempdir().unwrap();
        let config = ExperimentConfig::new(dir.path()).save_interval(2);
        let mut runner = CheckpointedExperiment::new("demo", Doubler::new(), config).unwrap();

        for input in 0..3 {
            runner.run_single(input).unwrap();
        }

        let checkpoints: Vec<_> = std::fs::read_dir(dir.path())
            .unwrap()
            .filter_map(|e| e.ok())
            .filter(|e| {
                let name = e.file_name().to_string_lossy().to_string();
                name.starts_with("demo_progress_") && name.ends_with(".bin")
            })
            .collect();
        // Only the second iteration hits the interval.
        assert_eq!(checkpoints.len(), 1);
    }

    #[test]
    fn test_run_delegates_to_drive_loop() {
        let dir = tempdir().unwrap();
        let config = ExperimentConfig::new(dir.path()).auto_save(false);
        let mut runner = CheckpointedExperiment::new("demo", Doubler::new(), config).unwrap();

        runner.run().unwrap();
        assert_eq!(runner.current_iteration(), 3);
    }
}
