//! # Pivot rules
//!
//! Strategies for moving from basis to basis.
use crate::algorithm::two_phase::tableau::kind::Kind;
use crate::algorithm::two_phase::tableau::Tableau;
use crate::data::number_types::EPSILON;

/// Deciding how to pivot.
///
/// During the Simplex method, one needs to decide how to move from basic solution to basic
/// solution. The pivot rule describes that behavior.
///
/// Once the column has been selected for a primal pivot, a row needs to be found. This decision is
/// made independent of the strategy.
pub trait PivotRule {
    /// Create a new instance.
    fn new() -> Self;

    /// Column selection rule for the primal Simplex method.
    ///
    /// # Return value
    ///
    /// The index of the entering column and its (negative) reduced cost, or `None` when no column
    /// has a reduced cost below `-EPSILON` (the tableau is optimal).
    fn select_primal_pivot_column<K: Kind>(&mut self, tableau: &Tableau<K>) -> Option<(usize, f64)>;
}

/// Simply pivot on the first column, which has a negative relative cost.
///
/// Together with lowest index tie breaking in the ratio test, this is Bland's rule, which does
/// not cycle.
pub struct FirstProfitable;

impl PivotRule for FirstProfitable {
    fn new() -> Self {
        Self
    }

    fn select_primal_pivot_column<K: Kind>(&mut self, tableau: &Tableau<K>) -> Option<(usize, f64)> {
        (0..tableau.nr_columns())
            .filter(|&column| tableau.may_enter(column))
            .map(|column| (column, tableau.relative_cost(column)))
            .find(|&(_, cost)| cost < -EPSILON)
    }
}

/// Pivot on the column with the most negative relative cost, the lowest index on ties.
pub struct SteepestDescentAlongVariable;

impl PivotRule for SteepestDescentAlongVariable {
    fn new() -> Self {
        Self
    }

    fn select_primal_pivot_column<K: Kind>(&mut self, tableau: &Tableau<K>) -> Option<(usize, f64)> {
        (0..tableau.nr_columns())
            .filter(|&column| tableau.may_enter(column))
            .map(|column| (column, tableau.relative_cost(column)))
            .filter(|&(_, cost)| cost < -EPSILON)
            .fold(None, |best, (column, cost)| match best {
                Some((_, best_cost)) if best_cost <= cost => best,
                _ => Some((column, cost)),
            })
    }
}
