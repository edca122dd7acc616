use std::convert::TryFrom;
use std::error::Error;
use std::fs;
use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, ValueEnum};
use env_logger::Env;
use itertools::Itertools;

use relip::algorithm::{branch_and_bound, cutting_plane, knapsack, OptimizationStatus, SolveRelaxation};
use relip::algorithm::branch_and_bound::branching::BranchingRule;
use relip::algorithm::knapsack::depth_first::solve_depth_first;
use relip::algorithm::knapsack::KnapsackProblem;
use relip::data::linear_program::model::Model;
use relip::io::import;
use relip::settings::{PivotRuleKind, SolverSettings};
use relip::trace::{LogTrace, TextTrace, Trace};

/// A linear and integer program solver written in rust.
#[derive(Parser)]
#[command(version, about)]
struct Opts {
    /// File containing the model description
    #[arg(value_name = "MODEL_FILE")]
    model_file: PathBuf,
    /// Algorithm to solve the model with
    #[arg(short, long, value_enum, default_value = "simplex")]
    algorithm: Algorithm,
    /// Print the trace log after solving
    #[arg(short, long)]
    trace: bool,
    /// Write the trace log to a file
    #[arg(long, value_name = "PATH")]
    trace_file: Option<PathBuf>,
    /// Maximum number of Gomory cuts
    #[arg(long)]
    max_cuts: Option<usize>,
    /// Branching variable selection for branch-and-bound
    #[arg(short, long, value_enum, default_value = "closest-to-half")]
    branching: Branching,
    /// Entering variable selection for the simplex method
    #[arg(long, value_enum, default_value = "steepest")]
    pivot_rule: PivotRule,
    /// Log at debug level unless `RUST_LOG` says otherwise
    #[arg(short, long)]
    verbose: bool,
}

#[derive(ValueEnum, Clone, Copy, Debug)]
enum Algorithm {
    Simplex,
    BranchAndBound,
    CuttingPlane,
    Knapsack,
    KnapsackDepthFirst,
}

#[derive(ValueEnum, Clone, Copy, Debug)]
enum Branching {
    ClosestToHalf,
    LargestFraction,
    First,
}

#[derive(ValueEnum, Clone, Copy, Debug)]
enum PivotRule {
    Steepest,
    FirstProfitable,
}

fn main() -> ExitCode {
    let opts = Opts::parse();

    let default_filter = if opts.verbose { "debug" } else { "warn" };
    env_logger::Builder::from_env(Env::default().default_filter_or(default_filter)).init();

    match run(&opts) {
        Ok(()) => ExitCode::SUCCESS,
        Err(error) => {
            eprintln!("{}", error);
            ExitCode::FAILURE
        },
    }
}

fn run(opts: &Opts) -> Result<(), Box<dyn Error>> {
    println!("Reading model file: \"{}\"...", opts.model_file.to_string_lossy());
    let model = import(&opts.model_file)?;

    let mut settings = SolverSettings::default()
        .with_branching_rule(match opts.branching {
            Branching::ClosestToHalf => BranchingRule::ClosestToHalf,
            Branching::LargestFraction => BranchingRule::LargestFractionalPart,
            Branching::First => BranchingRule::FirstFractional,
        })
        .with_pivot_rule(match opts.pivot_rule {
            PivotRule::Steepest => PivotRuleKind::SteepestDescentAlongVariable,
            PivotRule::FirstProfitable => PivotRuleKind::FirstProfitable,
        });
    if let Some(max_cuts) = opts.max_cuts {
        settings = settings.with_max_cuts(max_cuts);
    }

    if opts.trace || opts.trace_file.is_some() {
        let mut trace = TextTrace::new();
        solve(&model, opts.algorithm, &settings, &mut trace)?;

        let text = trace.into_string();
        if let Some(path) = &opts.trace_file {
            fs::write(path, &text)?;
        }
        if opts.trace {
            println!("{}", text);
        }
    } else {
        solve(&model, opts.algorithm, &settings, &mut LogTrace)?;
    }

    Ok(())
}

fn solve(
    model: &Model,
    algorithm: Algorithm,
    settings: &SolverSettings,
    trace: &mut dyn Trace,
) -> Result<(), Box<dyn Error>> {
    match algorithm {
        Algorithm::Simplex => {
            println!("Solving relaxation...");
            let result = model.solve_relaxation(settings, trace)?;
            match result.status() {
                OptimizationStatus::Optimal => {
                    println!("Optimal objective value: {}", result.objective_value().unwrap_or_default());
                    println!("Solution: {}", format_solution(result.solution()));
                },
                OptimizationStatus::Infeasible => println!("Model is not feasible."),
                OptimizationStatus::Unbounded => println!("Model is unbounded."),
            }
        },
        Algorithm::BranchAndBound => {
            println!("Solving by branch and bound...");
            let outcome = branch_and_bound::solve(model, settings, trace)?;
            match &outcome.incumbent {
                Some(incumbent) => {
                    println!("Best integral objective value: {}", incumbent.objective_value);
                    println!("Solution: {}", format_solution(&incumbent.solution));
                },
                None if outcome.root_relaxation.status() == OptimizationStatus::Unbounded => {
                    println!("Relaxation is unbounded, no integral solution found.");
                },
                None => println!("No integral solution exists."),
            }
            println!("Nodes explored: {}", outcome.nodes_explored);
            println!("Relaxations solved: {}", outcome.relaxations_solved);
        },
        Algorithm::CuttingPlane => {
            println!("Solving by Gomory cuts...");
            let outcome = cutting_plane::solve(model, settings, trace)?;
            println!("Status after {} cuts: {:?}", outcome.cuts.len(), outcome.status);
            if let Some(value) = outcome.relaxation.objective_value() {
                println!("Objective value: {}", value);
                println!("Solution: {}", format_solution(outcome.relaxation.solution()));
            }
            for cut in &outcome.cuts {
                println!("Cut: {}", cut);
            }
        },
        Algorithm::Knapsack | Algorithm::KnapsackDepthFirst => {
            println!("Solving as a 0/1 knapsack problem...");
            let problem = KnapsackProblem::try_from(model)?;
            let outcome = match algorithm {
                Algorithm::KnapsackDepthFirst => solve_depth_first(&problem, trace),
                _ => knapsack::solve(&problem, settings, trace),
            };
            match &outcome.best {
                Some(best) => {
                    println!("Best candidate {} with profit {}", best.label, best.profit);
                    println!("Take: {}", format_solution(&best.take));
                },
                None => println!("No feasible integral solution."),
            }
            println!("Sub-problems visited: {}", outcome.sub_problems);
        },
    }

    Ok(())
}

fn format_solution(values: &[f64]) -> String {
    values.iter()
        .enumerate()
        .map(|(j, value)| format!("{} = {}", Model::variable_name(j), value))
        .join(", ")
}

#[cfg(test)]
mod test {
    use clap::Parser;

    use relip::io::text::parse;
    use relip::settings::SolverSettings;
    use relip::trace::TextTrace;

    use crate::{solve, Algorithm, Opts};

    #[test]
    fn knapsack_engines() {
        let opts = Opts::try_parse_from(["relip", "items.lp", "-a", "knapsack-depth-first"]).unwrap();
        assert!(matches!(opts.algorithm, Algorithm::KnapsackDepthFirst));

        let model = parse("max 10 40 30 50\n5 4 6 3 <= 10\nbin bin bin bin\n").unwrap();
        for (algorithm, title) in [
            (Algorithm::Knapsack, "=== Knapsack ==="),
            (Algorithm::KnapsackDepthFirst, "=== Knapsack, depth first ==="),
        ] {
            let mut trace = TextTrace::new();
            solve(&model, algorithm, &SolverSettings::default(), &mut trace).unwrap();
            assert!(trace.as_str().contains(title));
        }
    }
}
