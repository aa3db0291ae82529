//! SAT-solver benchmarking demo.
//!
//! Runs a toy unit-propagation check over a handful of DIMACS formulas,
//! recording one result per (solver, formula) pair. Interrupt it and run
//! again: the harness resumes from the last checkpoint.
//!
//! ```bash
//! cargo run --example solver_benchmark
//! ```

use std::collections::HashMap;
use std::fs;

use benchrun::{
    CheckpointedExperiment, Error, Experiment, ExperimentConfig, LogConfig, Result, TagLogger,
};
use serde::{Deserialize, Serialize};

/// One benchmark instance: a named formula handed to a named solver.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct Instance {
    solver: String,
    formula_name: String,
    dimacs: String,
}

/// Parsed CNF: variable count plus clauses as literal lists.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct Cnf {
    num_vars: u32,
    clauses: Vec<Vec<i32>>,
}

/// Verdict for one instance.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct Verdict {
    satisfiable: bool,
    num_clauses: usize,
}

/// Benchmarks registered solvers over the formulas staged in
/// `benchmarks/`. The "solvers" here are all the same trivial
/// unit-propagation check; a real experiment would shell out instead.
struct SolverBenchmark {
    solvers: HashMap<String, String>,
    logger: TagLogger,
}

impl SolverBenchmark {
    fn new(logger: TagLogger) -> Self {
        Self {
            solvers: HashMap::new(),
            logger,
        }
    }

    fn add_solver(&mut self, name: impl Into<String>, path: impl Into<String>) {
        self.solvers.insert(name.into(), path.into());
    }
}

impl Experiment for SolverBenchmark {
    type Input = Instance;
    type Processed = Cnf;
    type Output = Verdict;

    fn configure(&mut self, options: &serde_json::Value) -> Result<()> {
        if let Some(solvers) = options.get("solvers").and_then(serde_json::Value::as_object) {
            for (name, path) in solvers {
                let path = path
                    .as_str()
                    .ok_or_else(|| Error::Validation(format!("solver path for {name} not a string")))?;
                self.add_solver(name.clone(), path);
            }
        }
        Ok(())
    }

    fn process_input(&mut self, input: &Instance) -> Result<Cnf> {
        parse_dimacs(&input.dimacs)
            .map_err(|e| Error::Processing(format!("{}: {e}", input.formula_name)))
    }

    fn generate_output(&mut self, cnf: &Cnf) -> Result<Verdict> {
        // Satisfiable unless a clause is empty or a unit pair conflicts.
        let mut units: HashMap<i32, bool> = HashMap::new();
        let mut satisfiable = true;
        for clause in &cnf.clauses {
            match clause.as_slice() {
                [] => satisfiable = false,
                [lit] => {
                    if units.insert(lit.abs(), *lit > 0) == Some(*lit < 0) {
                        satisfiable = false;
                    }
                }
                _ => {}
            }
        }
        Ok(Verdict {
            satisfiable,
            num_clauses: cnf.clauses.len(),
        })
    }

    fn validate_input(&self, input: &Instance) -> bool {
        self.solvers.contains_key(&input.solver)
    }

    fn run(runner: &mut CheckpointedExperiment<Self>) -> Result<()> {
        let instances = stage_formulas(runner)?;
        let already_done = runner.current_iteration() as usize;

        for instance in instances.into_iter().skip(already_done) {
            let tag = instance.solver.clone();
            let record = runner.run_single(instance)?;
            runner.experiment().logger.log_tagged(
                "solver_benchmark",
                &tag,
                &format!("iteration {} -> {:?}", record.iteration(), record.status()),
            );
        }

        runner.finish()?;
        Ok(())
    }
}

/// Write the bundled formulas into `benchmarks/` and build the
/// (solver, formula) cross product, ordered deterministically so resume
/// can skip completed prefixes.
fn stage_formulas(runner: &CheckpointedExperiment<SolverBenchmark>) -> Result<Vec<Instance>> {
    let formulas = [
        ("unit_sat.cnf", "p cnf 2 2\n1 0\n-1 2 0\n"),
        ("unit_conflict.cnf", "p cnf 1 2\n1 0\n-1 0\n"),
        ("wide_sat.cnf", "p cnf 3 2\n1 2 3 0\n-1 -2 0\n"),
        ("broken_header.cnf", "p dnf 1 1\n1 0\n"),
    ];

    for (name, dimacs) in formulas {
        fs::write(runner.layout().benchmark_dir().join(name), dimacs)?;
    }

    let mut solvers: Vec<_> = runner.experiment().solvers.keys().cloned().collect();
    solvers.sort();

    let mut instances = Vec::new();
    for solver in solvers {
        for (name, dimacs) in formulas {
            instances.push(Instance {
                solver: solver.clone(),
                formula_name: name.to_string(),
                dimacs: dimacs.to_string(),
            });
        }
    }
    Ok(instances)
}

fn parse_dimacs(text: &str) -> std::result::Result<Cnf, String> {
    let mut num_vars = None;
    let mut clauses = Vec::new();

    for line in text.lines() {
        let line = line.trim();
        if line.is_empty() || line.starts_with('c') {
            continue;
        }
        if let Some(rest) = line.strip_prefix("p ") {
            let fields: Vec<_> = rest.split_whitespace().collect();
            match fields.as_slice() {
                ["cnf", vars, _clauses] => {
                    num_vars = Some(vars.parse::<u32>().map_err(|e| e.to_string())?);
                }
                _ => return Err(format!("bad problem line: {line}")),
            }
            continue;
        }
        let mut clause = Vec::new();
        for token in line.split_whitespace() {
            let lit = token.parse::<i32>().map_err(|e| e.to_string())?;
            if lit == 0 {
                break;
            }
            clause.push(lit);
        }
        clauses.push(clause);
    }

    Ok(Cnf {
        num_vars: num_vars.ok_or("missing problem line")?,
        clauses,
    })
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .init();

    let logger = TagLogger::new(LogConfig::new().enabled(true).tag("minisat").tag("kissat"));
    let experiment = SolverBenchmark::new(logger);
    let config = ExperimentConfig::new("ExperimentResults").save_interval(2);

    let mut runner = CheckpointedExperiment::new("sat2024_performance", experiment, config)?;
    runner.configure(&serde_json::json!({
        "solvers": {
            "minisat": "/usr/bin/minisat",
            "kissat": "/usr/bin/kissat"
        }
    }))?;
    runner.run()?;

    let summary = runner.get_summary();
    println!(
        "{}: {}/{} succeeded (rate {:.2})",
        summary.experiment_name(),
        summary.successful_results(),
        summary.total_results(),
        summary.success_rate()
    );
    Ok(())
}
