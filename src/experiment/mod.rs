//! Checkpointed experiment lifecycle
//!
//! This module provides the abstract experiment run-loop: configure →
//! process input → generate output → validate → checkpoint.
//!
//! ## Schema Overview
//!
//! ```text
//! CheckpointedExperiment<E> ──owns── ExperimentState
//!                                        │
//!                                        ├── ExperimentMetadata
//!                                        └──< ResultRecord (append-only)
//! ```
//!
//! ## Usage
//!
//! Implement [`Experiment`] for your experiment type, then hand it to
//! [`CheckpointedExperiment::new`]. The runner resumes from the most
//! recent checkpoint automatically; `run_single` records every outcome,
//! success or error, and checkpoints on the configured interval.

use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::error::Result;

mod record;
mod runner;
mod state;
mod summary;

pub use record::{RecordStatus, ResultRecord};
pub use runner::{CheckpointedExperiment, ExperimentConfig};
pub use state::{ExperimentMetadata, ExperimentState, ExperimentStatus};
pub use summary::ExperimentSummary;

/// Capability set a concrete experiment must implement.
///
/// The three payload types must be serde-round-trippable because they are
/// embedded in the binary checkpoint, and `Clone` because each recorded
/// outcome is handed back to the caller.
///
/// `process_input` and `generate_output` are fallible transformations;
/// failures raised inside `run_single` are captured as error records, not
/// propagated. The validation hooks default to always-true; override them
/// to reject inputs or outputs.
pub trait Experiment: Sized {
    /// Raw input handed to `run_single`.
    type Input: Serialize + DeserializeOwned + Clone;
    /// Intermediate value derived from the input.
    type Processed: Serialize + DeserializeOwned + Clone;
    /// Final output derived from the intermediate value.
    type Output: Serialize + DeserializeOwned + Clone;

    /// Set up experiment-specific state from untyped options.
    ///
    /// Call before `run` whenever behavior depends on configuration.
    ///
    /// # Errors
    ///
    /// Implementation-defined.
    fn configure(&mut self, options: &serde_json::Value) -> Result<()>;

    /// Transform raw input into the intermediate value.
    ///
    /// # Errors
    ///
    /// Implementation-defined; captured as an error record by the runner.
    fn process_input(&mut self, input: &Self::Input) -> Result<Self::Processed>;

    /// Derive the final output from the intermediate value.
    ///
    /// # Errors
    ///
    /// Implementation-defined; captured as an error record by the runner.
    fn generate_output(&mut self, processed: &Self::Processed) -> Result<Self::Output>;

    /// Accept or reject a raw input. Defaults to accepting everything.
    fn validate_input(&self, _input: &Self::Input) -> bool {
        true
    }

    /// Accept or reject a generated output. Defaults to accepting
    /// everything.
    fn validate_output(&self, _output: &Self::Output) -> bool {
        true
    }

    /// Drive the experiment: supply the iteration source and call
    /// [`CheckpointedExperiment::run_single`] per item, or run a custom
    /// external workflow (e.g. job submission).
    ///
    /// # Errors
    ///
    /// Implementation-defined.
    fn run(runner: &mut CheckpointedExperiment<Self>) -> Result<()>;
}
