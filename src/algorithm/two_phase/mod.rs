//! # The Simplex algorithm
//!
//! This module contains all data structures and logic specific to the two-phase primal simplex
//! method on a dense tableau. If the canonical form has artificial columns, the first phase drives
//! them to zero, after which the second phase optimizes the actual objective.
use log::{debug, trace};

use crate::algorithm::{FinalTableau, LpResult, OptimizationStatus, SolveRelaxation};
use crate::algorithm::two_phase::phase_one::{Rank, RankedFeasibilityResult};
use crate::algorithm::two_phase::strategy::pivot_rule::{FirstProfitable, PivotRule, SteepestDescentAlongVariable};
use crate::algorithm::two_phase::tableau::{is_in_basic_feasible_solution_state, Tableau};
use crate::algorithm::two_phase::tableau::kind::artificial::Artificial;
use crate::algorithm::two_phase::tableau::kind::Kind;
use crate::algorithm::two_phase::tableau::kind::non_artificial::NonArtificial;
use crate::data::linear_program::canonical_form::CanonicalForm;
use crate::data::linear_program::model::Model;
use crate::data::number_types::{clean, is_zero, EPSILON};
use crate::error::ModelStructureError;
use crate::settings::{PivotRuleKind, SolverSettings};
use crate::trace::Trace;

pub mod phase_one;
pub mod phase_two;
pub mod strategy;
pub mod tableau;

impl SolveRelaxation for Model {
    fn solve_relaxation(
        &self,
        settings: &SolverSettings,
        trace: &mut dyn Trace,
    ) -> Result<LpResult, ModelStructureError> {
        let canonical = CanonicalForm::from_model(self)?;
        Ok(solve_canonical(canonical, settings, trace))
    }
}

/// Solve a linear program in canonical form.
///
/// # Arguments
///
/// * `canonical`: Problem to solve, is moved into the result.
/// * `settings`: Pivot rule and anti cycling configuration.
/// * `trace`: Receives the initial tableau of each phase, every pivot and the solution.
pub fn solve_canonical(
    canonical: CanonicalForm,
    settings: &SolverSettings,
    trace: &mut dyn Trace,
) -> LpResult {
    match settings.pivot_rule {
        PivotRuleKind::SteepestDescentAlongVariable => {
            solve_with::<SteepestDescentAlongVariable>(canonical, settings, trace)
        },
        PivotRuleKind::FirstProfitable => solve_with::<FirstProfitable>(canonical, settings, trace),
    }
}

fn solve_with<PR: PivotRule>(
    canonical: CanonicalForm,
    settings: &SolverSettings,
    trace: &mut dyn Trace,
) -> LpResult {
    let (status, tableau) = if canonical.has_artificial_variables() {
        let artificial = Tableau::<Artificial>::new(&canonical);
        match phase_one::primal::<PR>(artificial, settings, trace) {
            RankedFeasibilityResult::Feasible { rank, tableau } => {
                let rows_to_remove = match rank {
                    Rank::Full => Vec::new(),
                    Rank::Deficient(rows) => rows,
                };
                let mut tableau = Tableau::<NonArtificial>::from_artificial(
                    tableau, &rows_to_remove, &canonical,
                );
                let status = phase_two::primal::<PR>(&mut tableau, settings, trace);
                (status, tableau.into_final())
            },
            RankedFeasibilityResult::Infeasible(tableau) => {
                (OptimizationStatus::Infeasible, tableau.into_final())
            },
        }
    } else {
        let mut tableau = Tableau::<NonArtificial>::new(&canonical);
        let status = phase_two::primal::<PR>(&mut tableau, settings, trace);
        (status, tableau.into_final())
    };

    into_result(status, tableau, canonical, trace)
}

/// Read the solution from the terminal tableau.
///
/// The value of every basic column is its right hand side, all other columns are zero.
fn into_result(
    status: OptimizationStatus,
    tableau: FinalTableau,
    canonical: CanonicalForm,
    trace: &mut dyn Trace,
) -> LpResult {
    let mut column_values = vec![0f64; canonical.nr_columns()];
    for (i, &j) in tableau.basis().iter().enumerate() {
        column_values[j] = tableau.rhs(i);
    }

    let solution = canonical.solution_from_column_values(&column_values)
        .into_iter()
        .map(|value| clean(value, EPSILON))
        .collect::<Vec<_>>();
    let internal_value = canonical.cost().iter()
        .zip(&column_values)
        .map(|(c, x)| c * x)
        .sum::<f64>();
    let objective_value = clean(canonical.objective().internal(internal_value), EPSILON);

    debug!("{:?} with objective value {}", status, objective_value);
    let names = (0..canonical.nr_variables()).map(Model::variable_name).collect::<Vec<_>>();
    match status {
        OptimizationStatus::Optimal => {
            trace.note(&format!("Optimal objective value: {}", objective_value));
            trace.print_vector("Solution", &names, &solution);
        },
        OptimizationStatus::Unbounded => trace.note("Unbounded"),
        OptimizationStatus::Infeasible => trace.note("Infeasible"),
    }

    LpResult::new(status, objective_value, solution, tableau, canonical)
}

/// How a run of the primal simplex loop ended.
#[derive(Debug, Eq, PartialEq)]
pub(crate) enum Iteration {
    /// No column improves the objective.
    Optimal,
    /// The column with this index improves the objective and has no positive coefficient.
    Unbounded(usize),
}

/// Pivot until the tableau is optimal or unboundedness is detected.
///
/// After `settings.anti_cycling_after` consecutive degenerate pivots, the remainder of the run
/// uses Bland's rule.
pub(crate) fn iterate<K: Kind, PR: PivotRule>(
    tableau: &mut Tableau<K>,
    settings: &SolverSettings,
    trace: &mut dyn Trace,
) -> Iteration {
    let mut rule = PR::new();
    let mut bland = FirstProfitable;
    let mut anti_cycling = false;
    let mut degenerate_pivots = 0;

    loop {
        debug_assert!(is_in_basic_feasible_solution_state(tableau));

        let selected = if anti_cycling {
            bland.select_primal_pivot_column(tableau)
        } else {
            rule.select_primal_pivot_column(tableau)
        };
        let Some((column, cost)) = selected else {
            break Iteration::Optimal;
        };
        let Some(row) = tableau.select_primal_pivot_row(column, anti_cycling) else {
            break Iteration::Unbounded(column);
        };

        if is_zero(tableau.rhs(row), EPSILON) {
            degenerate_pivots += 1;
        } else {
            degenerate_pivots = 0;
        }
        if !anti_cycling && settings.anti_cycling_after.is_some_and(|limit| degenerate_pivots >= limit) {
            debug!("{} consecutive degenerate pivots, switching to Bland's rule", degenerate_pivots);
            trace.note("Switching to Bland's rule to prevent cycling");
            anti_cycling = true;
        }

        let annotation = format!("{} entered, {} left", tableau.column_name(column), tableau.row_name(row));
        trace!("{} pivot {}: {} (reduced cost {})", K::PHASE, tableau.step() + 1, annotation, cost);
        tableau.bring_into_basis(column, row);
        tableau.trace(trace, &annotation);
    }
}
