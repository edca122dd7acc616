//! # Properties of random models
//!
//! Linear programs are generated with positive constraint coefficients and right hand sides, so
//! that they are feasible and bounded. Integer programs are small enough to enumerate.
use approx::assert_abs_diff_eq;
use itertools::Itertools;
use proptest::prelude::*;

use relip::algorithm::{branch_and_bound, cutting_plane, knapsack, OptimizationStatus, SolveRelaxation};
use relip::algorithm::branch_and_bound::SearchStatus;
use relip::algorithm::cutting_plane::CutStatus;
use relip::algorithm::knapsack::depth_first::solve_depth_first;
use relip::algorithm::knapsack::KnapsackProblem;
use relip::data::linear_program::elements::{ConstraintType, Objective, SignRestriction};
use relip::data::linear_program::model::{Constraint, Model};
use relip::settings::SolverSettings;
use relip::trace::Silent;

/// Largest value an integer variable can take in the models of `integer_model`.
const BOX: i32 = 30;

/// `max <c, x>` subject to `Ax <= b`, `x >= 0`.
fn linear_model() -> impl Strategy<Value = Model> {
    (1usize..=4, 1usize..=4)
        .prop_flat_map(|(n, m)| (
            prop::collection::vec(0f64..10f64, n),
            prop::collection::vec((prop::collection::vec(0.1f64..10f64, n), 1f64..20f64), m),
        ))
        .prop_map(|(cost, rows)| {
            Model::new(Objective::Maximize, cost).with_constraints(
                rows.into_iter().map(|(row, rhs)| Constraint::new(row, ConstraintType::Less, rhs))
            )
        })
}

/// Like `linear_model` with integer data and integer variables, every variable at most `BOX`.
fn integer_model() -> impl Strategy<Value = Model> {
    (2usize..=3, 1usize..=3)
        .prop_flat_map(|(n, m)| (
            prop::collection::vec(1u32..=10, n),
            prop::collection::vec((prop::collection::vec(1u32..=10, n), 5u32..=30), m),
        ))
        .prop_map(|(cost, rows)| {
            let nr_variables = cost.len();
            Model::new(Objective::Maximize, cost.into_iter().map(f64::from).collect())
                .with_sign_restrictions(vec![SignRestriction::Integer; nr_variables])
                .with_constraints(rows.into_iter().map(|(row, rhs)| Constraint::new(
                    row.into_iter().map(f64::from).collect(),
                    ConstraintType::Less,
                    f64::from(rhs),
                )))
        })
}

/// Multiples of one half in `low / 2..=high / 2`.
fn halves(low: u32, high: u32) -> impl Strategy<Value = f64> {
    (low..=high).prop_map(|k| f64::from(k) / 2f64)
}

/// Like `integer_model` with coefficients and right hand sides that are multiples of one half.
fn half_integral_model() -> impl Strategy<Value = Model> {
    (2usize..=3, 1usize..=3)
        .prop_flat_map(|(n, m)| (
            prop::collection::vec(1u32..=10, n),
            prop::collection::vec((prop::collection::vec(halves(1, 20), n), halves(10, 30)), m),
        ))
        .prop_map(|(cost, rows)| {
            let nr_variables = cost.len();
            Model::new(Objective::Maximize, cost.into_iter().map(f64::from).collect())
                .with_sign_restrictions(vec![SignRestriction::Integer; nr_variables])
                .with_constraints(rows.into_iter().map(|(row, rhs)| Constraint::new(row, ConstraintType::Less, rhs)))
        })
}

/// Integer and continuous variables, the first one integer, with `<=` and `=` constraints.
fn mixed_model() -> impl Strategy<Value = Model> {
    let sign_restriction = prop_oneof![Just(SignRestriction::Integer), Just(SignRestriction::NonNegative)];
    let constraint_type = prop_oneof![2 => Just(ConstraintType::Less), 1 => Just(ConstraintType::Equal)];

    (2usize..=3, 1usize..=3)
        .prop_flat_map(move |(n, m)| (
            prop::collection::vec(1u32..=10, n),
            prop::collection::vec(sign_restriction.clone(), n),
            prop::collection::vec(
                (prop::collection::vec(halves(1, 20), n), constraint_type.clone(), halves(10, 30)),
                m,
            ),
        ))
        .prop_map(|(cost, mut sign_restrictions, rows)| {
            sign_restrictions[0] = SignRestriction::Integer;
            Model::new(Objective::Maximize, cost.into_iter().map(f64::from).collect())
                .with_sign_restrictions(sign_restrictions)
                .with_constraints(rows.into_iter().map(|(row, constraint_type, rhs)| {
                    Constraint::new(row, constraint_type, rhs)
                }))
        })
}

/// All integer points of the model.
fn integer_points(model: &Model) -> Vec<Vec<f64>> {
    (0..model.nr_variables())
        .map(|_| 0..=BOX)
        .multi_cartesian_product()
        .map(|point| point.into_iter().map(f64::from).collect::<Vec<_>>())
        .filter(|point| model.is_feasible(point, 1e-9))
        .collect()
}

fn integer_optimum(model: &Model) -> f64 {
    integer_points(model).iter()
        .map(|point| model.evaluate(point))
        .fold(f64::NEG_INFINITY, f64::max)
}

/// Items as `(value, weight)`, the same items in a different order and a capacity.
fn knapsack_instance() -> impl Strategy<Value = (Vec<(u32, u32)>, Vec<(u32, u32)>, u32)> {
    (prop::collection::vec((0u32..50, 0u32..20), 1..8), 0u32..50)
        .prop_flat_map(|(items, capacity)| (Just(items.clone()), Just(items).prop_shuffle(), Just(capacity)))
}

fn knapsack_problem(items: &[(u32, u32)], capacity: u32) -> KnapsackProblem {
    KnapsackProblem::new(
        items.iter().map(|&(value, _)| f64::from(value)).collect(),
        items.iter().map(|&(_, weight)| f64::from(weight)).collect(),
        f64::from(capacity),
    ).unwrap()
}

fn knapsack_optimum(problem: &KnapsackProblem) -> f64 {
    (0..problem.nr_items())
        .map(|_| [0f64, 1f64])
        .multi_cartesian_product()
        .filter(|take| problem.weight(take) <= problem.capacity())
        .map(|take| problem.profit(&take))
        .fold(0f64, f64::max)
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    /// The reported objective value is that of the reported point, which is feasible.
    #[test]
    fn optimum_is_consistent(model in linear_model()) {
        let result = model.solve_relaxation(&SolverSettings::default(), &mut Silent).unwrap();

        prop_assert_eq!(result.status(), OptimizationStatus::Optimal);
        let value = result.objective_value().unwrap();
        prop_assert!((value - model.evaluate(result.solution())).abs() < 1e-6);
        prop_assert!(model.is_feasible(result.solution(), 1e-6));
    }

    /// A constraint that the optimum satisfies with slack to spare doesn't change the optimum.
    #[test]
    fn redundant_constraint(
        model in linear_model(),
        weights in prop::collection::vec(0f64..5f64, 4),
        spare in 0f64..5f64,
    ) {
        let settings = SolverSettings::default();
        let result = model.solve_relaxation(&settings, &mut Silent).unwrap();
        let value = result.objective_value().unwrap();

        let weights = weights[..model.nr_variables()].to_vec();
        let constraint = Constraint::new(weights, ConstraintType::Less, 0f64);
        let rhs = constraint.lhs(result.solution()) + spare;
        let constraint = Constraint::new(constraint.coefficients().to_vec(), ConstraintType::Less, rhs);

        let extended = model.with_constraint(constraint).solve_relaxation(&settings, &mut Silent).unwrap();
        prop_assert_eq!(extended.status(), OptimizationStatus::Optimal);
        prop_assert!((extended.objective_value().unwrap() - value).abs() < 1e-6 * (1f64 + value.abs()));
    }

    /// The incumbent is the best integer point, and bounded by the root relaxation.
    #[test]
    fn branch_and_bound_is_optimal(model in integer_model()) {
        let outcome = branch_and_bound::solve(&model, &SolverSettings::default(), &mut Silent).unwrap();

        prop_assert_eq!(outcome.status, SearchStatus::Optimal);
        let incumbent = outcome.incumbent.unwrap();
        let root = outcome.root_relaxation.objective_value().unwrap();
        prop_assert!(incumbent.objective_value <= root + 1e-6);
        prop_assert!((incumbent.objective_value - integer_optimum(&model)).abs() < 1e-6);
        prop_assert!(model.is_feasible(&incumbent.solution, 1e-6));
    }

    /// No cut removes an integer point of the model.
    #[test]
    fn cuts_are_valid(model in integer_model()) {
        let settings = SolverSettings::default().with_max_cuts(20);
        let outcome = cutting_plane::solve(&model, &settings, &mut Silent).unwrap();

        let points = integer_points(&model);
        for cut in &outcome.cuts {
            for point in &points {
                prop_assert!(cut.is_satisfied_by(point, 1e-6), "{} cuts off {:?}", cut, point);
            }
        }
        if outcome.status == CutStatus::Integral {
            let value = outcome.relaxation.objective_value().unwrap();
            prop_assert!((value - integer_optimum(&model)).abs() < 1e-6);
        }
    }

    /// With fractional data, the slack columns are continuous and no cut removes an integer point.
    #[test]
    fn cuts_are_valid_for_fractional_data(model in half_integral_model()) {
        let settings = SolverSettings::default().with_max_cuts(20);
        let outcome = cutting_plane::solve(&model, &settings, &mut Silent).unwrap();

        let points = integer_points(&model);
        for cut in &outcome.cuts {
            for point in &points {
                prop_assert!(cut.is_satisfied_by(point, 1e-6), "{} cuts off {:?}", cut, point);
            }
        }
        let optimum = integer_optimum(&model);
        if outcome.status == CutStatus::Integral {
            let value = outcome.relaxation.objective_value().unwrap();
            prop_assert!((value - optimum).abs() < 1e-4);
        }
    }

    /// Cuts on models with continuous variables keep the optimum found by branch and bound.
    #[test]
    fn cuts_are_valid_for_mixed_models(model in mixed_model()) {
        let settings = SolverSettings::default().with_max_cuts(20);
        let outcome = cutting_plane::solve(&model, &settings, &mut Silent).unwrap();
        let search = branch_and_bound::solve(&model, &SolverSettings::default(), &mut Silent).unwrap();

        if let Some(incumbent) = search.incumbent {
            for cut in &outcome.cuts {
                prop_assert!(
                    cut.is_satisfied_by(&incumbent.solution, 1e-4),
                    "{} cuts off {:?}", cut, incumbent.solution,
                );
            }
            prop_assert_ne!(outcome.status, CutStatus::Infeasible);
            let value = outcome.relaxation.objective_value().unwrap();
            prop_assert!(value >= incumbent.objective_value - 1e-4);
            if outcome.status == CutStatus::Integral {
                prop_assert!((value - incumbent.objective_value).abs() < 1e-4);
            }
        }
    }

    /// Both searches find the best plan, regardless of the order of the items.
    #[test]
    fn knapsack_is_optimal((items, shuffled, capacity) in knapsack_instance()) {
        let problem = knapsack_problem(&items, capacity);
        let optimum = knapsack_optimum(&problem);

        let best = knapsack::solve(&problem, &SolverSettings::default(), &mut Silent).best.unwrap();
        assert_abs_diff_eq!(best.profit, optimum, epsilon = 1e-9);
        prop_assert!(problem.weight(&best.take) <= problem.capacity());
        prop_assert_eq!(problem.profit(&best.take), best.profit);

        let best = solve_depth_first(&problem, &mut Silent).best.unwrap();
        assert_abs_diff_eq!(best.profit, optimum, epsilon = 1e-9);

        let shuffled = knapsack_problem(&shuffled, capacity);
        let best = knapsack::solve(&shuffled, &SolverSettings::default(), &mut Silent).best.unwrap();
        assert_abs_diff_eq!(best.profit, optimum, epsilon = 1e-9);
    }
}
