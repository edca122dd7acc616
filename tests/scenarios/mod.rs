//! # Small models with known answers
//!
//! Every model is read from a file in the `models` folder, and solved the way a user of the
//! binary would.
use std::convert::TryFrom;

use approx::assert_abs_diff_eq;

use relip::algorithm::{branch_and_bound, cutting_plane, knapsack, OptimizationStatus, SolveRelaxation};
use relip::algorithm::branch_and_bound::SearchStatus;
use relip::algorithm::cutting_plane::CutStatus;
use relip::algorithm::knapsack::depth_first::solve_depth_first;
use relip::algorithm::knapsack::KnapsackProblem;
use relip::data::linear_program::model::Model;
use relip::io::import;
use relip::settings::{PivotRuleKind, SolverSettings};
use relip::trace::{Silent, TextTrace};

use super::get_test_file_path;

fn read(name: &str) -> Model {
    let _ = env_logger::builder().is_test(true).try_init();

    import(&get_test_file_path(name)).unwrap()
}

#[test]
fn two_constraints() {
    let model = read("two_constraints");

    for pivot_rule in [PivotRuleKind::SteepestDescentAlongVariable, PivotRuleKind::FirstProfitable] {
        let settings = SolverSettings::default().with_pivot_rule(pivot_rule);
        let result = model.solve_relaxation(&settings, &mut Silent).unwrap();

        assert_eq!(result.status(), OptimizationStatus::Optimal);
        assert_abs_diff_eq!(result.objective_value().unwrap(), 12f64, epsilon = 1e-9);
        assert_abs_diff_eq!(result.solution()[0], 4f64, epsilon = 1e-9);
        assert_abs_diff_eq!(result.solution()[1], 0f64, epsilon = 1e-9);
    }
}

#[test]
fn two_constraints_trace() {
    let model = read("two_constraints");

    let mut trace = TextTrace::new();
    model.solve_relaxation(&SolverSettings::default(), &mut trace).unwrap();
    let text = trace.into_string();
    assert!(text.contains("x1"));
    assert!(text.contains("s1"));
}

#[test]
fn unbounded() {
    let model = read("unbounded");

    let result = model.solve_relaxation(&SolverSettings::default(), &mut Silent).unwrap();
    assert_eq!(result.status(), OptimizationStatus::Unbounded);
    assert_eq!(result.objective_value(), None);

    let outcome = branch_and_bound::solve(&model, &SolverSettings::default(), &mut Silent).unwrap();
    assert_eq!(outcome.root_relaxation.status(), OptimizationStatus::Unbounded);
    assert!(outcome.incumbent.is_none());
}

#[test]
fn infeasible() {
    for name in ["contradicting_bounds", "negative_bound"] {
        let model = read(name);

        let result = model.solve_relaxation(&SolverSettings::default(), &mut Silent).unwrap();
        assert_eq!(result.status(), OptimizationStatus::Infeasible, "{}", name);

        let outcome = branch_and_bound::solve(&model, &SolverSettings::default(), &mut Silent).unwrap();
        assert_eq!(outcome.status, SearchStatus::Infeasible, "{}", name);

        let outcome = cutting_plane::solve(&model, &SolverSettings::default(), &mut Silent).unwrap();
        assert_eq!(outcome.status, CutStatus::Infeasible, "{}", name);
    }
}

#[test]
fn knapsack() {
    let model = read("knapsack");
    let problem = KnapsackProblem::try_from(&model).unwrap();

    let outcome = knapsack::solve(&problem, &SolverSettings::default(), &mut Silent);
    let best = outcome.best.unwrap();
    assert_eq!(best.profit, 90f64);
    assert_eq!(best.take, vec![0f64, 1f64, 0f64, 1f64]);

    let best = solve_depth_first(&problem, &mut Silent).best.unwrap();
    assert_eq!(best.profit, 90f64);
    assert_eq!(best.take, vec![0f64, 1f64, 0f64, 1f64]);
}

#[test]
fn knapsack_by_branch_and_bound() {
    let model = read("knapsack");

    let outcome = branch_and_bound::solve(&model, &SolverSettings::default(), &mut Silent).unwrap();
    assert_eq!(outcome.status, SearchStatus::Optimal);
    let incumbent = outcome.incumbent.unwrap();
    assert_abs_diff_eq!(incumbent.objective_value, 90f64, epsilon = 1e-6);
    assert_eq!(incumbent.solution, vec![0f64, 1f64, 0f64, 1f64]);
}

#[test]
fn integer_models_agree() {
    for (name, optimum) in [("integer", 23f64), ("gomory", 1f64)] {
        let model = read(name);

        let outcome = branch_and_bound::solve(&model, &SolverSettings::default(), &mut Silent).unwrap();
        assert_eq!(outcome.status, SearchStatus::Optimal, "{}", name);
        assert_abs_diff_eq!(outcome.incumbent.unwrap().objective_value, optimum, epsilon = 1e-6);

        let outcome = cutting_plane::solve(&model, &SolverSettings::default(), &mut Silent).unwrap();
        assert_eq!(outcome.status, CutStatus::Integral, "{}", name);
        assert_abs_diff_eq!(outcome.relaxation.objective_value().unwrap(), optimum, epsilon = 1e-6);
    }
}

#[test]
fn integer_solution() {
    let model = read("integer");

    let outcome = branch_and_bound::solve(&model, &SolverSettings::default(), &mut Silent).unwrap();
    assert_abs_diff_eq!(outcome.root_relaxation.objective_value().unwrap(), 23.75, epsilon = 1e-9);
    assert_eq!(outcome.incumbent.unwrap().solution, vec![3f64, 2f64]);
}
