//! # Trace through the `log` facade
use log::{debug, log_enabled, trace, Level};

use crate::trace::text::{TableauView, VectorView};
use crate::trace::Trace;

/// Forwards trace events to the `log` crate.
///
/// Titles and notes are logged at debug level, tableaux and vectors at trace level.
#[derive(Debug, Default, Clone, Copy)]
pub struct LogTrace;

impl Trace for LogTrace {
    fn title(&mut self, text: &str) {
        debug!("=== {} ===", text);
    }

    fn note(&mut self, text: &str) {
        debug!("{}", text);
    }

    fn print_tableau(
        &mut self,
        column_names: &[String],
        row_names: &[String],
        matrix: &[Vec<f64>],
        step: usize,
        annotation: &str,
    ) {
        if log_enabled!(Level::Trace) {
            trace!("{}", TableauView { column_names, row_names, matrix, step, annotation });
        }
    }

    fn print_vector(&mut self, title: &str, names: &[String], values: &[f64]) {
        trace!("{}", VectorView { title, names, values });
    }
}
