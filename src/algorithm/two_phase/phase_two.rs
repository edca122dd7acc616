//! # Phase two
use log::debug;

use crate::algorithm::OptimizationStatus;
use crate::algorithm::two_phase::{iterate, Iteration};
use crate::algorithm::two_phase::strategy::pivot_rule::PivotRule;
use crate::algorithm::two_phase::tableau::kind::non_artificial::NonArtificial;
use crate::algorithm::two_phase::tableau::kind::Kind;
use crate::algorithm::two_phase::tableau::Tableau;
use crate::settings::SolverSettings;
use crate::trace::Trace;

/// Reduces the cost of the basic feasible solution to the minimum.
///
/// While calling this method, a number of requirements should be satisfied:
/// - There should be a valid basis (not necessarily optimal <=> dual feasible <=> c >= 0)
/// - All constraint values need to be positive (primary feasibility)
///
/// # Return value
///
/// An `OptimizationStatus` indicating whether or not the problem has a finite optimum. It cannot be
/// infeasible, as a feasible solution is needed to start using this method.
pub(crate) fn primal<PR: PivotRule>(
    tableau: &mut Tableau<NonArtificial>,
    settings: &SolverSettings,
    trace: &mut dyn Trace,
) -> OptimizationStatus {
    trace.title(NonArtificial::PHASE);
    tableau.trace(trace, "");

    match iterate::<_, PR>(tableau, settings, trace) {
        Iteration::Optimal => OptimizationStatus::Optimal,
        Iteration::Unbounded(column) => {
            debug!("unbounded along {}", tableau.column_name(column));
            trace.note(&format!(
                "No row limits {}, the problem is unbounded",
                tableau.column_name(column),
            ));
            OptimizationStatus::Unbounded
        },
    }
}
