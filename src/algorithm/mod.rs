//! # Algorithms
use crate::data::linear_program::canonical_form::CanonicalForm;
use crate::data::linear_program::elements::ColumnKind;
use crate::error::ModelStructureError;
use crate::settings::SolverSettings;
use crate::trace::Trace;

pub mod branch_and_bound;
pub mod cutting_plane;
pub mod knapsack;
pub mod two_phase;

/// A problem formulation of which a relaxation can be solved.
pub trait SolveRelaxation {
    /// Solve the relaxed version of this problem.
    ///
    /// In the case of linear programming, that means that integer constraints are ignored.
    ///
    /// # Arguments
    ///
    /// * `settings`: Pivot rule and anti cycling behavior.
    /// * `trace`: Receives every tableau.
    ///
    /// # Return value
    ///
    /// Whether the problem is feasible and bounded, with the final tableau. An error only if the
    /// problem has no variables or constraints.
    fn solve_relaxation(
        &self,
        settings: &SolverSettings,
        trace: &mut dyn Trace,
    ) -> Result<LpResult, ModelStructureError>;
}

/// A linear program is either infeasible, unbounded or has a finite optimum.
///
/// This is determined as the result of an algorithm.
#[allow(missing_docs)]
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum OptimizationStatus {
    Optimal,
    Unbounded,
    Infeasible,
}

/// Terminal state of a simplex run.
///
/// For optimal results this is the phase two tableau at optimality. An infeasible result holds
/// the phase one tableau, an unbounded result the tableau in which no leaving row was found.
///
/// Artificial columns are the trailing columns of the canonical form, so column `j` of this
/// tableau is column `j` of the canonical form, also after they were dropped.
#[derive(Debug, Clone, PartialEq)]
pub struct FinalTableau {
    /// `(m + 1) x (n + 1)`, objective row last, right hand side in the last column.
    matrix: Vec<Vec<f64>>,
    column_names: Vec<String>,
    column_kinds: Vec<ColumnKind>,
    /// Name of the basic variable of every row.
    row_names: Vec<String>,
    /// Basic column of every row, as a tableau column index.
    basis: Vec<usize>,
    /// Canonical form row index of every tableau row, rows found redundant are absent.
    canonical_rows: Vec<usize>,
}

impl FinalTableau {
    pub(crate) fn new(
        matrix: Vec<Vec<f64>>,
        column_names: Vec<String>,
        column_kinds: Vec<ColumnKind>,
        row_names: Vec<String>,
        basis: Vec<usize>,
        canonical_rows: Vec<usize>,
    ) -> Self {
        debug_assert_eq!(matrix.len(), basis.len() + 1);
        debug_assert_eq!(column_names.len(), column_kinds.len());
        debug_assert!(matrix.iter().all(|row| row.len() == column_names.len() + 1));

        Self { matrix, column_names, column_kinds, row_names, basis, canonical_rows }
    }

    /// The full matrix, including the objective row and right hand side column.
    pub fn matrix(&self) -> &[Vec<f64>] {
        &self.matrix
    }

    /// Number of constraint rows `m`.
    pub fn nr_rows(&self) -> usize {
        self.basis.len()
    }

    /// Number of columns `n`, excluding the right hand side.
    pub fn nr_columns(&self) -> usize {
        self.column_names.len()
    }

    /// Coefficient in row `i` and column `j`.
    pub fn entry(&self, i: usize, j: usize) -> f64 {
        self.matrix[i][j]
    }

    /// Right hand side of row `i`.
    pub fn rhs(&self, i: usize) -> f64 {
        self.matrix[i][self.nr_columns()]
    }

    /// Reduced cost of column `j`.
    pub fn relative_cost(&self, j: usize) -> f64 {
        self.matrix[self.nr_rows()][j]
    }

    /// Basic column of row `i`.
    pub fn basic_column(&self, i: usize) -> usize {
        self.basis[i]
    }

    /// Basic columns of all rows.
    pub fn basis(&self) -> &[usize] {
        &self.basis
    }

    /// Kind of column `j`.
    pub fn column_kind(&self, j: usize) -> ColumnKind {
        self.column_kinds[j]
    }

    /// Index of tableau row `i` in the canonical form.
    pub fn canonical_row(&self, i: usize) -> usize {
        self.canonical_rows[i]
    }

    /// Names of all columns.
    pub fn column_names(&self) -> &[String] {
        &self.column_names
    }

    /// Names of the basic variables.
    pub fn row_names(&self) -> &[String] {
        &self.row_names
    }
}

/// Outcome of solving a linear program with the simplex method.
#[derive(Debug, Clone, PartialEq)]
pub struct LpResult {
    status: OptimizationStatus,
    /// In the sense of the model, at `solution`.
    objective_value: f64,
    /// Values of the model variables at the last basic solution.
    solution: Vec<f64>,
    tableau: FinalTableau,
    canonical: CanonicalForm,
}

impl LpResult {
    pub(crate) fn new(
        status: OptimizationStatus,
        objective_value: f64,
        solution: Vec<f64>,
        tableau: FinalTableau,
        canonical: CanonicalForm,
    ) -> Self {
        Self { status, objective_value, solution, tableau, canonical }
    }

    /// Whether the problem was solved to optimality, is unbounded or infeasible.
    pub fn status(&self) -> OptimizationStatus {
        self.status
    }

    /// Shorthand for comparing the status.
    pub fn is_optimal(&self) -> bool {
        self.status == OptimizationStatus::Optimal
    }

    /// Optimal objective value in the sense of the model, only for optimal results.
    pub fn objective_value(&self) -> Option<f64> {
        match self.status {
            OptimizationStatus::Optimal => Some(self.objective_value),
            OptimizationStatus::Unbounded | OptimizationStatus::Infeasible => None,
        }
    }

    /// Variable values in model order.
    ///
    /// Only an optimal solution for optimal results. For unbounded results this is the last basic
    /// feasible solution, for infeasible results the phase one solution (possibly not feasible).
    pub fn solution(&self) -> &[f64] {
        &self.solution
    }

    /// The terminal tableau.
    pub fn tableau(&self) -> &FinalTableau {
        &self.tableau
    }

    /// The canonical form that was solved.
    pub fn canonical(&self) -> &CanonicalForm {
        &self.canonical
    }

    /// Names of all tableau columns.
    pub fn column_names(&self) -> &[String] {
        self.tableau.column_names()
    }

    /// Names of the basic variables, one per tableau row.
    pub fn row_names(&self) -> &[String] {
        self.tableau.row_names()
    }
}
