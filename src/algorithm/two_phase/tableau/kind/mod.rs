//! # Tableau types: artificial or not
//!
//! A tableau can contain artificial variables. They can be used to find a feasible solution in a
//! two-phase algorithm: the first phase finds a basic feasible solution, the second improves it.
//!
//! The `Tableau` type and algorithm logic in the parent modules is independent of whether a
//! tableau contains artificial variables, or not. This module enables those abstractions.
use crate::data::linear_program::canonical_form::CanonicalForm;
use crate::data::linear_program::elements::ColumnKind;

pub mod artificial;
pub mod non_artificial;

/// The tableau type provides two different ways for the `Tableau` to function, depending on whether
/// the artificial columns of the canonical form should be included in the problem.
pub trait Kind {
    /// Name of the phase, used when tracing.
    const PHASE: &'static str;

    /// Number of canonical form columns that are part of the tableau.
    ///
    /// The artificial columns are the trailing columns, so these are always the first columns.
    fn nr_columns(canonical: &CanonicalForm) -> usize;

    /// Coefficients of the objective function that is maximized, one per tableau column.
    fn cost(canonical: &CanonicalForm) -> Vec<f64>;

    /// Whether a column of this kind may be selected to enter the basis.
    fn may_enter(column_kind: ColumnKind) -> bool;
}
