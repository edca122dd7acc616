//! # Error types
//!
//! Only structural problems with the input are errors. Infeasibility, unboundedness and exhausted
//! cut budgets are regular outcomes and are reported through the result types of the algorithms.
use thiserror::Error;

/// A model can't be brought into canonical form.
///
/// This is checked before any solving begins; the engine doesn't guess around it.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModelStructureError {
    /// The objective function has no coefficients.
    #[error("model has no variables")]
    NoVariables,
    /// The constraint list is empty.
    #[error("model has no constraints")]
    NoConstraints,
}

/// A model can't be read as a 0/1 knapsack problem.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum KnapsackStructureError {
    /// Knapsack problems maximize total value.
    #[error("knapsack models must maximize")]
    NotMaximization,
    /// There should be exactly one capacity constraint.
    #[error("expected exactly one capacity constraint, found {0}")]
    ConstraintCount(usize),
    /// The capacity constraint must be of the `<=` type.
    #[error("the capacity constraint must be a `<=` constraint")]
    NotUpperBounded,
    /// Every variable must be binary.
    #[error("variable x{0} is not binary")]
    NotBinary(usize),
    /// Values, weights and the capacity can't be negative.
    #[error("negative {what} for item {item}")]
    Negative {
        /// Which quantity was negative.
        what: &'static str,
        /// Zero-based item index; the capacity is reported with the item count.
        item: usize,
    },
    /// Values and weights are given per item.
    #[error("{values} values but {weights} weights")]
    LengthMismatch {
        /// Number of values.
        values: usize,
        /// Number of weights.
        weights: usize,
    },
}
