//! # Artificial variables in the tableau
//!
//! The first phase maximizes minus the sum of the artificial variables. Once that sum is zero,
//! the artificial variables that are still basic (at zero level) are driven out of the basis.
use log::trace;

use crate::algorithm::two_phase::tableau::kind::Kind;
use crate::algorithm::two_phase::tableau::Tableau;
use crate::data::linear_program::canonical_form::CanonicalForm;
use crate::data::linear_program::elements::ColumnKind;
use crate::data::number_types::{is_zero, EPSILON};

/// Tableaus with artificial variables.
///
/// All columns of the canonical form are present. Artificial columns that left the basis are not
/// selected to enter again.
#[derive(Eq, PartialEq, Debug, Clone, Copy)]
pub struct Artificial;

impl Kind for Artificial {
    const PHASE: &'static str = "Phase I";

    fn nr_columns(canonical: &CanonicalForm) -> usize {
        canonical.nr_columns()
    }

    fn cost(canonical: &CanonicalForm) -> Vec<f64> {
        canonical.artificial_cost()
    }

    fn may_enter(column_kind: ColumnKind) -> bool {
        column_kind != ColumnKind::Artificial
    }
}

impl Tableau<Artificial> {
    /// Whether any artificial column is still basic.
    pub fn has_artificial_in_basis(&self) -> bool {
        self.basis_indices.iter().any(|&j| self.column_kinds[j] == ColumnKind::Artificial)
    }

    /// Removes all artificial variables from the basis by making a basis change "at zero level", or
    /// without change of cost of the current solution.
    ///
    /// Should only be called when the artificial cost is zero. For each row with an artificial
    /// basic variable, a non basic, non artificial unit column for that row is preferred. Otherwise
    /// any non basic, non artificial column with a nonzero coefficient in that row enters.
    ///
    /// # Return value
    ///
    /// A `Vec` with indices of rows that are redundant: no such column exists for them. Is sorted.
    pub(crate) fn remove_artificial_basis_variables(&mut self) -> Vec<usize> {
        let artificial_rows = (0..self.nr_rows())
            .filter(|&i| self.column_kinds[self.basis_indices[i]] == ColumnKind::Artificial)
            .collect::<Vec<_>>();
        let mut rows_to_remove = Vec::new();

        for row in artificial_rows {
            // The value is zero up to the feasibility tolerance
            let rhs = self.nr_columns();
            self.rows[row][rhs] = 0f64;

            let candidates = (0..self.nr_columns())
                .filter(|&j| !self.is_in_basis(j))
                .filter(|&j| self.column_kinds[j] != ColumnKind::Artificial)
                .collect::<Vec<_>>();
            let pivot_column = candidates.iter()
                .copied()
                .find(|&j| self.is_unit_column(j, row))
                .or_else(|| candidates.iter().copied().find(|&j| !is_zero(self.rows[row][j], EPSILON)));

            match pivot_column {
                Some(column) => {
                    trace!(
                        "artificial {} leaves the basis at zero level, {} enters",
                        self.column_names[self.basis_indices[row]], self.column_names[column],
                    );
                    self.bring_into_basis(column, row);
                },
                None => {
                    trace!("row {} is redundant", row);
                    rows_to_remove.push(row);
                },
            }
        }

        debug_assert!(rows_to_remove.is_sorted());
        rows_to_remove
    }

    /// Whether column `j` has a one in `row` and zeros in all other constraint rows.
    fn is_unit_column(&self, j: usize, row: usize) -> bool {
        (0..self.nr_rows()).all(|i| {
            let expected = if i == row { 1f64 } else { 0f64 };
            is_zero(self.rows[i][j] - expected, EPSILON)
        })
    }
}

#[cfg(test)]
mod test {
    use crate::algorithm::two_phase::tableau::kind::artificial::Artificial;
    use crate::algorithm::two_phase::tableau::Tableau;
    use crate::data::linear_program::canonical_form::CanonicalForm;
    use crate::data::linear_program::elements::{ConstraintType, Objective};
    use crate::data::linear_program::model::{Constraint, Model};

    #[test]
    fn artificial_cost() {
        let mut model = Model::new(Objective::Maximize, vec![1f64]);
        model.add_constraint(Constraint::new(vec![1f64], ConstraintType::Greater, 2f64));
        let canonical = CanonicalForm::from_model(&model).unwrap();

        // x1 e1 a1
        let tableau = Tableau::<Artificial>::new(&canonical);
        assert!(tableau.has_artificial_in_basis());
        assert_eq!(tableau.relative_cost(0), -1f64);
        assert_eq!(tableau.relative_cost(1), 1f64);
        assert_eq!(tableau.relative_cost(2), 0f64);
        assert_eq!(tableau.objective_function_value(), -2f64);
    }

    #[test]
    fn zero_level_pivot() {
        // x1 - x2 = 0 with x1 = x2 = 0 as the only solution of the phase one problem
        let mut model = Model::new(Objective::Maximize, vec![1f64, 1f64]);
        model.add_constraint(Constraint::new(vec![1f64, -1f64], ConstraintType::Equal, 0f64));
        model.add_constraint(Constraint::new(vec![1f64, 1f64], ConstraintType::Less, 2f64));
        let canonical = CanonicalForm::from_model(&model).unwrap();

        let mut tableau = Tableau::<Artificial>::new(&canonical);
        assert_eq!(tableau.remove_artificial_basis_variables(), Vec::<usize>::new());
        assert!(!tableau.has_artificial_in_basis());
        // x1 has a one in row 0 but is not a unit column; it has the lowest index of all nonzeros
        assert!(tableau.is_in_basis(0));
    }
}
