//! Property-based tests for the experiment harness
//!
//! - Test lifecycle invariants (counter vs. result sequence)
//! - Test data integrity across checkpoint round-trips
//! - Run with ProptestConfig::with_cases(64) to stay filesystem-friendly

use benchrun::{
    CheckpointedExperiment, Error, Experiment, ExperimentConfig, RecordStatus, Result,
};
use proptest::prelude::*;
use tempfile::tempdir;

/// Fails processing for negative inputs, rejects inputs above 1000.
struct RangeCheck;

impl Experiment for RangeCheck {
    type Input = i64;
    type Processed = i64;
    type Output = i64;

    fn configure(&mut self, _options: &serde_json::Value) -> Result<()> {
        Ok(())
    }

    fn process_input(&mut self, input: &i64) -> Result<i64> {
        if *input < 0 {
            return Err(Error::Processing(format!("negative input: {input}")));
        }
        Ok(input * 3)
    }

    fn generate_output(&mut self, processed: &i64) -> Result<i64> {
        Ok(processed + 7)
    }

    fn validate_input(&self, input: &i64) -> bool {
        *input <= 1000
    }

    fn run(_runner: &mut CheckpointedExperiment<Self>) -> Result<()> {
        Ok(())
    }
}

fn quiet_runner(dir: &std::path::Path) -> CheckpointedExperiment<RangeCheck> {
    let config = ExperimentConfig::new(dir).auto_save(false);
    CheckpointedExperiment::new("prop", RangeCheck, config).unwrap()
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    /// Property: results.len() == current_iteration for every input mix.
    #[test]
    fn prop_counter_matches_result_count(inputs in proptest::collection::vec(-2000i64..2000, 0..40)) {
        let dir = tempdir().unwrap();
        let mut runner = quiet_runner(dir.path());

        for input in &inputs {
            runner.run_single(*input).unwrap();
        }

        prop_assert_eq!(runner.current_iteration(), inputs.len() as u64);
        prop_assert_eq!(runner.results().len(), inputs.len());
    }

    /// Property: success_rate stays in [0, 1] and is 0 when empty.
    #[test]
    fn prop_success_rate_is_bounded(inputs in proptest::collection::vec(-2000i64..2000, 0..40)) {
        let dir = tempdir().unwrap();
        let mut runner = quiet_runner(dir.path());

        for input in &inputs {
            runner.run_single(*input).unwrap();
        }

        let summary = runner.get_summary();
        prop_assert!(summary.success_rate() >= 0.0);
        prop_assert!(summary.success_rate() <= 1.0);
        if inputs.is_empty() {
            prop_assert!(summary.success_rate().abs() < f64::EPSILON);
        }
        prop_assert_eq!(
            summary.successful_results() + summary.error_results(),
            summary.total_results()
        );
    }

    /// Property: each record's outcome matches its input's eligibility.
    #[test]
    fn prop_outcomes_follow_input_class(inputs in proptest::collection::vec(-2000i64..2000, 1..40)) {
        let dir = tempdir().unwrap();
        let mut runner = quiet_runner(dir.path());

        for input in &inputs {
            runner.run_single(*input).unwrap();
        }

        for (input, record) in inputs.iter().zip(runner.results()) {
            let expected = if (0..=1000).contains(input) {
                RecordStatus::Success
            } else {
                RecordStatus::Error
            };
            prop_assert_eq!(record.status(), expected);
            if record.is_success() {
                prop_assert_eq!(record.output(), Some(&(input * 3 + 7)));
            }
        }
    }

    /// Property: checkpoint round-trip preserves counter and results.
    #[test]
    fn prop_checkpoint_round_trip(inputs in proptest::collection::vec(-2000i64..2000, 0..20)) {
        let dir = tempdir().unwrap();
        let mut runner = quiet_runner(dir.path());

        for input in &inputs {
            runner.run_single(*input).unwrap();
        }
        runner.save(None).unwrap();
        let saved = runner.results().to_vec();
        drop(runner);

        let resumed = quiet_runner(dir.path());
        prop_assert_eq!(resumed.current_iteration(), inputs.len() as u64);
        prop_assert_eq!(resumed.results(), saved.as_slice());
    }
}
