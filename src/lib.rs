//! # Benchrun: Checkpointed Research-Experiment Harness
//!
//! Benchrun is a lightweight harness for running research experiments
//! (e.g. SAT-solver benchmarking): an abstract experiment lifecycle
//! (configure → process input → generate output → validate → checkpoint)
//! plus output-directory management and a tagged logger facade.
//!
//! Execution is strictly sequential, single-process and single-threaded.
//! The one mechanism that earns its keep is checkpoint/resume: full state
//! is persisted on an interval, and a crashed or restarted process picks
//! up from the most recent checkpoint at construction.
//!
//! ## Example
//!
//! ```rust,no_run
//! use benchrun::{CheckpointedExperiment, Experiment, ExperimentConfig, Result};
//!
//! struct WordCount;
//!
//! impl Experiment for WordCount {
//!     type Input = String;
//!     type Processed = Vec<String>;
//!     type Output = usize;
//!
//!     fn configure(&mut self, _options: &serde_json::Value) -> Result<()> {
//!         Ok(())
//!     }
//!
//!     fn process_input(&mut self, input: &String) -> Result<Vec<String>> {
//!         Ok(input.split_whitespace().map(str::to_string).collect())
//!     }
//!
//!     fn generate_output(&mut self, words: &Vec<String>) -> Result<usize> {
//!         Ok(words.len())
//!     }
//!
//!     fn run(runner: &mut CheckpointedExperiment<Self>) -> Result<()> {
//!         for line in ["a b c", "d e"] {
//!             runner.run_single(line.to_string())?;
//!         }
//!         runner.finish()?;
//!         Ok(())
//!     }
//! }
//!
//! let mut runner = CheckpointedExperiment::new(
//!     "word_count",
//!     WordCount,
//!     ExperimentConfig::default(),
//! )?;
//! runner.run()?;
//! println!("success rate: {}", runner.get_summary().success_rate());
//! # Ok::<(), benchrun::Error>(())
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]

pub mod error;
pub mod experiment;
pub mod layout;
pub mod log;

pub use error::{Error, Result};
pub use experiment::{
    CheckpointedExperiment, Experiment, ExperimentConfig, ExperimentMetadata, ExperimentState,
    ExperimentStatus, ExperimentSummary, RecordStatus, ResultRecord,
};
pub use layout::OutputLayout;
pub use log::{LogConfig, TagLogger};
