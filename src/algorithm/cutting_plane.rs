//! # Gomory cuts
//!
//! Solve the relaxation, derive a cut from a row of the final tableau in which an integer variable
//! is basic at a fractional value, append the cut to a copy of the model and repeat.
//!
//! A row of the final tableau reads `x_B + sum_j a_j w_j = b`, with `w` the non basic columns and
//! `f_0 = frac(b)`. If all columns in the row take integer values, `sum_j frac(a_j) w_j >= f_0`
//! holds for every integer solution but not for the current one, at which all `w` are zero. If
//! some take continuous values, the mixed integer cut is used instead: integer columns get
//! `min(f_j / f_0, (1 - f_j) / (1 - f_0))`, continuous columns `a_j / f_0` or `-a_j / (1 - f_0)`
//! depending on the sign of `a_j`, and the right hand side is `1`.
//!
//! A slack or surplus column takes integer values when its row has integer coefficients on
//! integer variables only and an integer right hand side, and for the rows bounding binary
//! variables. The surplus of a fractional cut is integral as well. Slack and surplus columns are
//! replaced by their definition in terms of the model variables, so that the cut can be appended
//! to the model.
use log::{debug, info};

use crate::algorithm::{LpResult, OptimizationStatus, SolveRelaxation};
use crate::data::linear_program::canonical_form::RowOrigin;
use crate::data::linear_program::elements::{ColumnKind, ConstraintType, SignRestriction};
use crate::data::linear_program::model::{Constraint, Model};
use crate::data::number_types::{
    clean, fractional_part, is_fractional, is_integral, is_zero, EPSILON, INTEGRALITY_TOLERANCE,
};
use crate::error::ModelStructureError;
use crate::settings::SolverSettings;
use crate::trace::Trace;

/// How the cut loop ended.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum CutStatus {
    /// All integer variables are integral in the last relaxation.
    Integral,
    /// The cut budget is exhausted, or no valid cut could be derived.
    NonIntegral,
    /// A relaxation is infeasible.
    Infeasible,
    /// A relaxation is unbounded.
    Unbounded,
}

/// Result of the cutting plane loop.
#[derive(Debug, Clone, PartialEq)]
pub struct CuttingPlaneOutcome {
    /// Why the loop stopped.
    pub status: CutStatus,
    /// The last relaxation solved, the best bound found.
    pub relaxation: LpResult,
    /// Cuts in the order they were appended.
    pub cuts: Vec<Constraint>,
    /// The model with all cuts appended.
    pub model: Model,
}

/// Which of the two cuts was derived.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum CutKind {
    /// All columns in the row take integer values; the surplus of the cut does too.
    Fractional,
    /// Some column in the row takes continuous values.
    MixedInteger,
}

/// A cut in the model variables.
#[derive(Debug, Clone, PartialEq)]
pub struct GomoryCut {
    /// A `>=` constraint.
    pub constraint: Constraint,
    /// How it was derived.
    pub kind: CutKind,
}

impl GomoryCut {
    /// Whether its surplus column takes integer values at every integer solution.
    pub fn has_integral_surplus(&self) -> bool {
        self.kind == CutKind::Fractional
    }
}

/// Run the cutting plane loop.
///
/// # Arguments
///
/// * `model`: Model to solve, only read.
/// * `settings`: The number of cuts is limited by `max_cuts`.
/// * `trace`: Receives every relaxation and cut.
pub fn solve(
    model: &Model,
    settings: &SolverSettings,
    trace: &mut dyn Trace,
) -> Result<CuttingPlaneOutcome, ModelStructureError> {
    let mut current = model.clone();
    let mut integral_slacks = integral_slacks(model);
    let mut cuts = Vec::new();

    loop {
        trace.title(&format!("Cutting plane iteration {}", cuts.len() + 1));
        let relaxation = current.solve_relaxation(settings, trace)?;

        let status = match relaxation.status() {
            OptimizationStatus::Optimal => next_cut(&relaxation, &current, &integral_slacks, cuts.len(), settings.max_cuts),
            OptimizationStatus::Infeasible => Err(CutStatus::Infeasible),
            OptimizationStatus::Unbounded => Err(CutStatus::Unbounded),
        };

        match status {
            Ok(cut) => {
                trace.note(&format!("Cut {} ({:?}): {}", cuts.len() + 1, cut.kind, cut.constraint));
                debug!("cut {} ({:?}): {}", cuts.len() + 1, cut.kind, cut.constraint);
                integral_slacks.push(cut.has_integral_surplus());
                current.add_constraint(cut.constraint.clone());
                cuts.push(cut.constraint);
            },
            Err(status) => {
                info!("cutting plane: {:?} after {} cuts", status, cuts.len());
                trace.note(&format!("Stopped after {} cuts: {:?}", cuts.len(), status));
                return Ok(CuttingPlaneOutcome { status, relaxation, cuts, model: current });
            },
        }
    }
}

/// The next cut, or the reason to stop.
fn next_cut(
    relaxation: &LpResult,
    model: &Model,
    integral_slacks: &[bool],
    nr_cuts: usize,
    max_cuts: usize,
) -> Result<GomoryCut, CutStatus> {
    let rows = fractional_rows(relaxation, model);
    if rows.is_empty() {
        return Err(CutStatus::Integral);
    }
    if nr_cuts >= max_cuts {
        return Err(CutStatus::NonIntegral);
    }

    rows.into_iter()
        .find_map(|row| gomory_cut(relaxation, model, integral_slacks, row))
        .ok_or_else(|| {
            debug!("no fractional row yields a cut in the model variables");
            CutStatus::NonIntegral
        })
}

/// Whether the slack or surplus of each constraint takes integer values at every integer
/// solution.
///
/// That is the case when the right hand side is integral and every nonzero coefficient is
/// integral and belongs to an integer variable.
pub fn integral_slacks(model: &Model) -> Vec<bool> {
    model.constraints().iter()
        .map(|constraint| {
            is_integral(constraint.rhs(), INTEGRALITY_TOLERANCE)
                && constraint.coefficients().iter().enumerate().all(|(j, &a)| {
                    is_zero(a, EPSILON)
                        || (is_integral(a, INTEGRALITY_TOLERANCE) && model.sign_restriction(j).is_integral())
                })
        })
        .collect()
}

/// Rows of the final tableau in which an integer variable is basic at a fractional value.
///
/// # Return value
///
/// Row indices in increasing order.
pub fn fractional_rows(relaxation: &LpResult, model: &Model) -> Vec<usize> {
    let tableau = relaxation.tableau();
    let canonical = relaxation.canonical();

    (0..tableau.nr_rows())
        .filter(|&i| {
            let column = canonical.column(tableau.basic_column(i));
            column.kind() == ColumnKind::Decision
                && model.sign_restriction(column.owner()).is_integral()
        })
        .filter(|&i| is_fractional(tableau.rhs(i), INTEGRALITY_TOLERANCE))
        .collect()
}

/// Derive the cut of a row of the final tableau, in the model variables.
///
/// # Arguments
///
/// * `relaxation`: Optimal result of solving `model`.
/// * `model`: The model that was solved.
/// * `integral_slacks`: For every constraint of `model`, whether its slack or surplus takes
/// integer values, see `integral_slacks`.
/// * `row`: Tableau row with a fractional right hand side.
///
/// # Return value
///
/// A `>=` constraint, or `None` if a column with a nonzero cut coefficient belongs to an
/// unrestricted variable, which can't be expressed in the model variables.
pub fn gomory_cut(
    relaxation: &LpResult,
    model: &Model,
    integral_slacks: &[bool],
    row: usize,
) -> Option<GomoryCut> {
    let tableau = relaxation.tableau();
    let canonical = relaxation.canonical();
    debug_assert!(row < tableau.nr_rows());
    debug_assert_eq!(integral_slacks.len(), model.nr_constraints());

    let is_integer_column = |j: usize| {
        let column = canonical.column(j);
        match column.kind() {
            ColumnKind::Decision => model.sign_restriction(column.owner()).is_integral(),
            ColumnKind::Slack | ColumnKind::Surplus => match canonical.row_origin(column.owner()) {
                RowOrigin::Constraint(index) => integral_slacks[index],
                RowOrigin::BinaryBound(_) => true,
            },
            ColumnKind::Artificial => false,
        }
    };

    let entries = (0..tableau.nr_columns())
        .filter(|j| !tableau.basis().contains(j))
        .map(|j| (j, tableau.entry(row, j)))
        .filter(|&(_, a)| !is_zero(a, EPSILON))
        .collect::<Vec<_>>();
    let kind = if entries.iter().all(|&(j, _)| is_integer_column(j)) {
        CutKind::Fractional
    } else {
        CutKind::MixedInteger
    };

    let f_0 = fractional_part(tableau.rhs(row), INTEGRALITY_TOLERANCE);
    let mut coefficients = vec![0f64; canonical.nr_variables()];
    let mut rhs = match kind {
        CutKind::Fractional => f_0,
        CutKind::MixedInteger => 1f64,
    };

    for (j, a) in entries {
        let weight = match kind {
            CutKind::Fractional => fractional_part(a, INTEGRALITY_TOLERANCE),
            CutKind::MixedInteger if is_integer_column(j) => {
                let f = fractional_part(a, INTEGRALITY_TOLERANCE);
                if f <= f_0 { f / f_0 } else { (1f64 - f) / (1f64 - f_0) }
            },
            CutKind::MixedInteger => if a > 0f64 { a / f_0 } else { -a / (1f64 - f_0) },
        };
        if weight == 0f64 {
            continue;
        }

        let column = canonical.column(j);
        match column.kind() {
            ColumnKind::Decision => {
                if model.sign_restriction(column.owner()) == SignRestriction::Unrestricted {
                    return None;
                }
                coefficients[column.owner()] += weight * column.sign();
            },
            ColumnKind::Slack | ColumnKind::Surplus => {
                // sign * w = b_k - a_k x, with sign 1 for slack and -1 for surplus columns
                let k = column.owner();
                let sign = column.sign();
                for (v, a) in row_in_variables(relaxation, k).into_iter().enumerate() {
                    coefficients[v] -= weight * sign * a;
                }
                rhs -= weight * sign * canonical.b()[k];
            },
            ColumnKind::Artificial => debug_assert!(false, "artificial column in a final optimal tableau"),
        }
    }

    let coefficients = coefficients.into_iter().map(|a| clean(a, EPSILON)).collect();
    let constraint = Constraint::new(coefficients, ConstraintType::Greater, clean(rhs, EPSILON));
    Some(GomoryCut { constraint, kind })
}

/// Row `k` of the canonical form, with the decision columns mapped back to the model variables.
fn row_in_variables(relaxation: &LpResult, k: usize) -> Vec<f64> {
    let canonical = relaxation.canonical();

    let mut coefficients = vec![0f64; canonical.nr_variables()];
    for d in canonical.column_range(ColumnKind::Decision) {
        let column = canonical.column(d);
        // Both columns of an unrestricted variable give the same coefficient
        coefficients[column.owner()] = canonical.data()[k][d] * column.sign();
    }
    coefficients
}
