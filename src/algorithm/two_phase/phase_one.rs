//! # Phase one
//!
//! Find a basic feasible solution without artificial variables, or prove that there is none.
use log::{debug, warn};

use crate::algorithm::two_phase::{iterate, Iteration};
use crate::algorithm::two_phase::strategy::pivot_rule::PivotRule;
use crate::algorithm::two_phase::tableau::kind::artificial::Artificial;
use crate::algorithm::two_phase::tableau::kind::Kind;
use crate::algorithm::two_phase::tableau::Tableau;
use crate::data::number_types::{is_zero, FEASIBILITY_TOLERANCE};
use crate::settings::SolverSettings;
use crate::trace::Trace;

/// Reduces the artificial cost of the basic feasible solution to zero, if possible. In doing so, a
/// basic feasible solution to the canonical form linear program is found.
///
/// # Arguments
///
/// * `tableau`: Artificial tableau with a valid basis. This basis will typically consist of slack
/// and artificial variables.
///
/// # Return value
///
/// Whether the tableau allows a basic feasible solution without artificial variables.
pub(crate) fn primal<PR: PivotRule>(
    mut tableau: Tableau<Artificial>,
    settings: &SolverSettings,
    trace: &mut dyn Trace,
) -> RankedFeasibilityResult {
    trace.title(Artificial::PHASE);
    tableau.trace(trace, "");

    if let Iteration::Unbounded(column) = iterate::<_, PR>(&mut tableau, settings, trace) {
        // The artificial objective is bounded by zero, this can only be caused by rounding
        warn!(
            "artificial cost unbounded along {}, treating the problem as infeasible",
            tableau.column_name(column),
        );
        return RankedFeasibilityResult::Infeasible(tableau);
    }

    let artificial_sum = -tableau.objective_function_value();
    if !is_zero(artificial_sum, FEASIBILITY_TOLERANCE) {
        debug!("phase one ended with artificial sum {}, infeasible", artificial_sum);
        trace.note(&format!("Sum of the artificial variables is {}, the problem is infeasible", artificial_sum));
        return RankedFeasibilityResult::Infeasible(tableau);
    }

    let rank = if tableau.has_artificial_in_basis() {
        let rows_to_remove = tableau.remove_artificial_basis_variables();
        if rows_to_remove.is_empty() {
            Rank::Full
        } else {
            debug!("{} redundant rows", rows_to_remove.len());
            Rank::Deficient(rows_to_remove)
        }
    } else {
        Rank::Full
    };

    RankedFeasibilityResult::Feasible { rank, tableau }
}

/// LP's can be either feasible (allowing at least one solution) or infeasible (allowing no
/// solutions).
///
/// If the problem is feasible, it can either have full rank, or be rank deficient.
#[derive(Debug, PartialEq)]
pub(crate) enum RankedFeasibilityResult {
    /// The problem is feasible and the tableau has a basis without artificial variables, apart
    /// from those in the rows to remove.
    Feasible {
        /// Whether the problem needs rows to be removed.
        rank: Rank,
        /// Tableau at a basic feasible solution.
        tableau: Tableau<Artificial>,
    },
    /// The problem is not feasible, the tableau is the terminal phase one tableau.
    Infeasible(Tableau<Artificial>),
}

/// A matrix or linear program either has full rank, or be rank deficient.
///
/// In case it is rank deficient, a sorted, deduplicated list of (row)indices should be provided,
/// that when removed, makes the matrix or linear program full rank.
#[derive(Debug, Eq, PartialEq)]
pub enum Rank {
    /// The matrix is full rank, no rows need to be removed.
    Full,
    /// The `Vec<usize>` is sorted and contains no duplicate values.
    Deficient(Vec<usize>),
}
