//! # Data structures for Simplex
//!
//! Contains the simplex tableau and logic for elementary operations which can be performed upon it.
use std::collections::HashSet;
use std::iter::once;
use std::marker::PhantomData;

use crate::algorithm::FinalTableau;
use crate::algorithm::two_phase::tableau::kind::Kind;
use crate::data::linear_program::canonical_form::CanonicalForm;
use crate::data::linear_program::elements::ColumnKind;
use crate::data::number_types::{is_zero, EPSILON, FEASIBILITY_TOLERANCE};
use crate::trace::Trace;

pub mod kind;

/// Name of the objective row in traces.
const OBJECTIVE_ROW_NAME: &str = "z";

/// The most high-level data structure that is used by the Simplex algorithm: the Simplex tableau.
///
/// It owns a dense copy of the canonical form rows and the data structures that describe the
/// current solution basis.
#[derive(PartialEq, Debug, Clone)]
pub struct Tableau<K> {
    /// Represents a matrix of size (m + 1) x (n + 1).
    ///
    /// The first `m` rows are the constraint rows, the last row holds the reduced costs and the
    /// objective function value. The right hand side is the last column.
    rows: Vec<Vec<f64>>,

    /// Basic column of every row.
    basis_indices: Vec<usize>,
    /// All columns currently in the basis.
    ///
    /// Could also be derived from `basis_indices`, but is here for faster reading and writing.
    basis_columns: HashSet<usize>,

    column_names: Vec<String>,
    column_kinds: Vec<ColumnKind>,
    /// Canonical form row of every tableau row.
    canonical_rows: Vec<usize>,

    /// Number of pivots performed.
    step: usize,

    /// Whether this tableau has artificial variables (and is in the first phase of the two-phase
    /// algorithm) or not. See the `Kind` trait for more information.
    kind: PhantomData<K>,
}

impl<K: Kind> Tableau<K> {
    /// Create a tableau with the initial basis of the canonical form.
    ///
    /// The objective row is initialized such that it contains the reduced costs relative to that
    /// basis.
    pub(crate) fn new(canonical: &CanonicalForm) -> Self {
        let nr_columns = K::nr_columns(canonical);
        let basis_indices = canonical.basis().to_vec();
        debug_assert!(basis_indices.iter().all(|&j| j < nr_columns));

        let mut rows = canonical.data().iter()
            .zip(canonical.b())
            .map(|(row, &b)| row[..nr_columns].iter().copied().chain(once(b)).collect::<Vec<_>>())
            .collect::<Vec<_>>();
        let cost = K::cost(canonical);
        let objective = objective_row(&rows, &basis_indices, &cost);
        rows.push(objective);

        let basis_columns = basis_indices.iter().copied().collect();
        let column_names = canonical.column_names()[..nr_columns].to_vec();
        let column_kinds = canonical.columns()[..nr_columns].iter()
            .map(|column| column.kind())
            .collect();

        Self {
            rows,
            basis_indices,
            basis_columns,
            column_names,
            column_kinds,
            canonical_rows: (0..canonical.nr_rows()).collect(),
            step: 0,
            kind: PhantomData,
        }
    }

    /// Brings a column into the basis by pivoting on the element in `pivot_row_index` and updating
    /// the data structures holding the collection of basis columns.
    ///
    /// The pivot row is divided by the pivot element, after which multiples of it are subtracted
    /// from all other rows (the objective row included) to zero out the entering column there.
    ///
    /// # Arguments
    ///
    /// * `pivot_column_index`: Column entering the basis.
    /// * `pivot_row_index`: Row of the variable leaving the basis.
    pub fn bring_into_basis(&mut self, pivot_column_index: usize, pivot_row_index: usize) {
        debug_assert!(pivot_column_index < self.nr_columns());
        debug_assert!(pivot_row_index < self.nr_rows());
        debug_assert!(!is_zero(self.rows[pivot_row_index][pivot_column_index], EPSILON));

        let pivot_value = self.rows[pivot_row_index][pivot_column_index];
        for value in &mut self.rows[pivot_row_index] {
            *value /= pivot_value;
        }
        self.rows[pivot_row_index][pivot_column_index] = 1f64;

        let pivot_row = self.rows[pivot_row_index].clone();
        for (i, row) in self.rows.iter_mut().enumerate() {
            if i == pivot_row_index {
                continue;
            }
            let factor = row[pivot_column_index];
            if factor != 0f64 {
                for (value, pivot) in row.iter_mut().zip(&pivot_row) {
                    *value -= factor * pivot;
                }
                row[pivot_column_index] = 0f64;
            }
        }

        self.update_basis_indices(pivot_column_index, pivot_row_index);
        self.step += 1;
    }

    /// Update the basis index.
    ///
    /// Removes the index of the variable leaving the basis from the `basis_columns` attribute,
    /// while inserting the entering variable index.
    fn update_basis_indices(&mut self, pivot_column_index: usize, pivot_row_index: usize) {
        let leaving_column = self.basis_indices[pivot_row_index];
        self.basis_columns.remove(&leaving_column);
        self.basis_columns.insert(pivot_column_index);
        self.basis_indices[pivot_row_index] = pivot_column_index;
    }

    /// Determine the row to pivot on, given the entering column, using the ratio test.
    ///
    /// # Arguments
    ///
    /// * `column`: Index of the entering column.
    /// * `lowest_basic_index`: Break ties between equal ratios by the lowest index of the leaving
    /// basic column instead of the first row (Bland's rule).
    ///
    /// # Return value
    ///
    /// The row with the minimum ratio of right hand side to a positive coefficient, or `None` if
    /// there is no positive coefficient (the problem is unbounded in this direction).
    pub fn select_primal_pivot_row(&self, column: usize, lowest_basic_index: bool) -> Option<usize> {
        let rhs = self.nr_columns();

        let mut best: Option<(usize, f64)> = None;
        for i in 0..self.nr_rows() {
            let coefficient = self.rows[i][column];
            if coefficient <= EPSILON {
                continue;
            }

            let ratio = self.rows[i][rhs] / coefficient;
            best = match best {
                None => Some((i, ratio)),
                Some((_, best_ratio)) if ratio < best_ratio => Some((i, ratio)),
                Some((best_row, best_ratio)) if lowest_basic_index
                    && is_zero(ratio - best_ratio, EPSILON)
                    && self.basis_indices[i] < self.basis_indices[best_row] => Some((i, ratio)),
                other => other,
            };
        }

        best.map(|(i, _)| i)
    }

    /// Reduced cost of column `j`.
    ///
    /// A negative value means that the objective improves when `j` enters the basis.
    pub fn relative_cost(&self, j: usize) -> f64 {
        debug_assert!(j < self.nr_columns());

        self.rows[self.nr_rows()][j]
    }

    /// Right hand side of row `i`, the value of its basic variable.
    pub fn rhs(&self, i: usize) -> f64 {
        self.rows[i][self.nr_columns()]
    }

    /// Whether a column may be selected to enter the basis.
    pub fn may_enter(&self, j: usize) -> bool {
        !self.is_in_basis(j) && K::may_enter(self.column_kinds[j])
    }

    /// Whether a column is in the basis.
    pub fn is_in_basis(&self, column: usize) -> bool {
        self.basis_columns.contains(&column)
    }

    /// Get the current basic feasible solution.
    ///
    /// # Return value
    ///
    /// The value of every tableau column: the right hand side for basic columns, zero otherwise.
    pub fn current_bfs(&self) -> Vec<f64> {
        let mut values = vec![0f64; self.nr_columns()];
        for (i, &j) in self.basis_indices.iter().enumerate() {
            values[j] = self.rhs(i);
        }
        values
    }

    /// Value of the (maximized) objective function at the current basic feasible solution.
    pub fn objective_function_value(&self) -> f64 {
        self.rows[self.nr_rows()][self.nr_columns()]
    }

    /// Number of constraint rows.
    pub fn nr_rows(&self) -> usize {
        self.basis_indices.len()
    }

    /// Number of columns, excluding the right hand side.
    pub fn nr_columns(&self) -> usize {
        self.column_names.len()
    }

    /// Number of pivots performed.
    pub fn step(&self) -> usize {
        self.step
    }

    /// Name of column `j`.
    pub fn column_name(&self, j: usize) -> &str {
        &self.column_names[j]
    }

    /// Name of the basic variable of row `i`.
    pub fn row_name(&self, i: usize) -> &str {
        &self.column_names[self.basis_indices[i]]
    }

    fn row_names(&self) -> Vec<String> {
        self.basis_indices.iter()
            .map(|&j| self.column_names[j].clone())
            .chain(once(OBJECTIVE_ROW_NAME.to_string()))
            .collect()
    }

    /// Report the current state.
    pub fn trace(&self, trace: &mut dyn Trace, annotation: &str) {
        trace.print_tableau(&self.column_names, &self.row_names(), &self.rows, self.step, annotation);
    }

    /// Give up ownership of the matrix, keeping the terminal state for the caller.
    pub(crate) fn into_final(self) -> FinalTableau {
        let mut row_names = self.row_names();
        row_names.pop();

        FinalTableau::new(
            self.rows,
            self.column_names,
            self.column_kinds,
            row_names,
            self.basis_indices,
            self.canonical_rows,
        )
    }
}

/// The objective row relative to a basis.
///
/// Seeded with the negated cost, then `c_B[i]` times row `i` is added for every basic column with
/// nonzero cost. The rows should hold unit vectors in the basic columns.
pub(crate) fn objective_row(rows: &[Vec<f64>], basis: &[usize], cost: &[f64]) -> Vec<f64> {
    let mut objective = cost.iter().map(|&c| -c).chain(once(0f64)).collect::<Vec<_>>();
    for (row, &basic) in rows.iter().zip(basis) {
        let basic_cost = cost[basic];
        if basic_cost != 0f64 {
            for (value, &coefficient) in objective.iter_mut().zip(row) {
                *value += basic_cost * coefficient;
            }
        }
    }
    for &basic in basis {
        objective[basic] = 0f64;
    }

    objective
}

/// Check whether the tableau currently has a valid basic feasible solution.
///
/// Only used for debug purposes.
pub fn is_in_basic_feasible_solution_state<K: Kind>(tableau: &Tableau<K>) -> bool {
    // Correct number of basis columns (uniqueness is implied because it's a set)
    let nr_basis_columns = tableau.basis_columns.len() == tableau.nr_rows();

    // Basic columns are unit vectors, also in the objective row
    let unit_columns = tableau.basis_indices.iter().enumerate().all(|(row, &j)| {
        (0..=tableau.nr_rows()).all(|i| {
            let expected = if i == row { 1f64 } else { 0f64 };
            (tableau.rows[i][j] - expected).abs() <= FEASIBILITY_TOLERANCE
        })
    });

    // Primal feasibility
    let feasible = (0..tableau.nr_rows()).all(|i| tableau.rhs(i) >= -FEASIBILITY_TOLERANCE);

    nr_basis_columns && unit_columns && feasible
}

#[cfg(test)]
mod test {
    use crate::algorithm::two_phase::tableau::{is_in_basic_feasible_solution_state, objective_row, Tableau};
    use crate::algorithm::two_phase::tableau::kind::non_artificial::NonArtificial;
    use crate::data::linear_program::canonical_form::CanonicalForm;
    use crate::data::linear_program::elements::{ConstraintType, Objective};
    use crate::data::linear_program::model::{Constraint, Model};
    use crate::trace::TextTrace;

    fn tableau() -> Tableau<NonArtificial> {
        let mut model = Model::new(Objective::Maximize, vec![3f64, 2f64]);
        model.add_constraint(Constraint::new(vec![1f64, 1f64], ConstraintType::Less, 4f64));
        model.add_constraint(Constraint::new(vec![1f64, 3f64], ConstraintType::Less, 6f64));
        let canonical = CanonicalForm::from_model(&model).unwrap();
        Tableau::new(&canonical)
    }

    #[test]
    fn create_tableau() {
        let tableau = tableau();
        assert_eq!(tableau.nr_rows(), 2);
        assert_eq!(tableau.nr_columns(), 4);
        assert_eq!(tableau.relative_cost(0), -3f64);
        assert_eq!(tableau.relative_cost(1), -2f64);
        assert_eq!(tableau.objective_function_value(), 0f64);
        assert_eq!(tableau.current_bfs(), vec![0f64, 0f64, 4f64, 6f64]);
        assert!(is_in_basic_feasible_solution_state(&tableau));
    }

    #[test]
    fn ratio_test() {
        let tableau = tableau();
        // 4 / 1 < 6 / 1
        assert_eq!(tableau.select_primal_pivot_row(0, false), Some(0));
        // 4 / 1 > 6 / 3
        assert_eq!(tableau.select_primal_pivot_row(1, false), Some(1));
    }

    #[test]
    fn bring_into_basis() {
        let mut tableau = tableau();
        tableau.bring_into_basis(0, 0);
        assert!(tableau.is_in_basis(0));
        assert!(!tableau.is_in_basis(2));
        assert_eq!(tableau.row_name(0), "x1");
        assert_eq!(tableau.objective_function_value(), 12f64);
        assert_eq!(tableau.current_bfs(), vec![4f64, 0f64, 0f64, 2f64]);
        assert_eq!(tableau.relative_cost(1), 1f64);
        assert_eq!(tableau.relative_cost(2), 3f64);
        assert_eq!(tableau.step(), 1);
        assert!(is_in_basic_feasible_solution_state(&tableau));
    }

    #[test]
    fn objective_row_initialization() {
        let rows = vec![vec![1f64, 2f64, 0f64, 3f64], vec![0f64, 1f64, 1f64, 1f64]];
        let objective = objective_row(&rows, &[0, 2], &[2f64, 1f64, 5f64]);
        // -c + 2 * row 0 + 5 * row 1
        assert_eq!(objective, vec![0f64, 8f64, 0f64, 11f64]);
    }

    #[test]
    fn trace() {
        let mut trace = TextTrace::new();
        tableau().trace(&mut trace, "");
        let text = trace.into_string();
        assert!(text.starts_with("Step 0\n"));
        assert!(text.contains(" z |"));
    }
}
