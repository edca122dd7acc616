//! # Trace log
//!
//! The algorithms report what they do to a `Trace` sink: tableaux after every pivot, branching
//! decisions, cuts and knapsack sub-problems. The sink is write only. Nothing is ever read back,
//! and a sink that fails to record is not a reason to stop solving, so none of the methods return
//! a `Result`.
pub use crate::trace::logger::LogTrace;
pub use crate::trace::text::TextTrace;

mod logger;
mod text;

/// Receiver of trace events.
pub trait Trace {
    /// Start a new section, e.g. a phase of the simplex method or a branch-and-bound node.
    fn title(&mut self, text: &str);

    /// A single line of free text.
    fn note(&mut self, text: &str);

    /// Record the state of a tableau.
    ///
    /// # Arguments
    ///
    /// * `column_names`: Name of every column, excluding the right hand side.
    /// * `row_names`: Name of the basic variable of every row, followed by the objective row name.
    /// * `matrix`: Rows of length `column_names.len() + 1`, right hand side last.
    /// * `step`: Number of pivots performed so far.
    /// * `annotation`: Describes the last pivot, e.g. which variable entered and which left.
    fn print_tableau(
        &mut self,
        column_names: &[String],
        row_names: &[String],
        matrix: &[Vec<f64>],
        step: usize,
        annotation: &str,
    );

    /// Record a named vector of values, e.g. a solution.
    fn print_vector(&mut self, title: &str, names: &[String], values: &[f64]);
}

/// Discards all events.
#[derive(Debug, Default, Clone, Copy)]
pub struct Silent;

impl Trace for Silent {
    fn title(&mut self, _text: &str) {}

    fn note(&mut self, _text: &str) {}

    fn print_tableau(
        &mut self,
        _column_names: &[String],
        _row_names: &[String],
        _matrix: &[Vec<f64>],
        _step: usize,
        _annotation: &str,
    ) {}

    fn print_vector(&mut self, _title: &str, _names: &[String], _values: &[f64]) {}
}
