//! # Plain text trace
use std::cmp::max;
use std::fmt::{self, Display, Formatter};

use itertools::Itertools;

use crate::data::number_types::is_integral;
use crate::trace::Trace;

/// Collects the trace as human readable text.
#[derive(Debug, Default, Clone)]
pub struct TextTrace {
    buffer: String,
}

impl TextTrace {
    /// Create an empty trace.
    pub fn new() -> Self {
        Self::default()
    }

    /// Everything recorded so far.
    pub fn as_str(&self) -> &str {
        &self.buffer
    }

    /// Consume the trace, returning the text.
    pub fn into_string(self) -> String {
        self.buffer
    }

    fn push_line(&mut self, line: &str) {
        self.buffer.push_str(line);
        self.buffer.push('\n');
    }
}

impl Trace for TextTrace {
    fn title(&mut self, text: &str) {
        if !self.buffer.is_empty() {
            self.buffer.push('\n');
        }
        self.push_line(&format!("=== {} ===", text));
    }

    fn note(&mut self, text: &str) {
        self.push_line(text);
    }

    fn print_tableau(
        &mut self,
        column_names: &[String],
        row_names: &[String],
        matrix: &[Vec<f64>],
        step: usize,
        annotation: &str,
    ) {
        let view = TableauView { column_names, row_names, matrix, step, annotation };
        self.buffer.push_str(&view.to_string());
    }

    fn print_vector(&mut self, title: &str, names: &[String], values: &[f64]) {
        let view = VectorView { title, names, values };
        self.buffer.push_str(&view.to_string());
    }
}

/// Format a tableau entry: integral values without decimals, others with four.
pub(crate) fn format_value(value: f64) -> String {
    if is_integral(value, 1e-9) {
        // Adding zero turns a negative zero into a positive one
        format!("{}", value.round() + 0f64)
    } else {
        format!("{:.4}", value)
    }
}

/// Renders a tableau as an aligned table.
pub(crate) struct TableauView<'a> {
    pub column_names: &'a [String],
    pub row_names: &'a [String],
    pub matrix: &'a [Vec<f64>],
    pub step: usize,
    pub annotation: &'a str,
}

impl Display for TableauView<'_> {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        if self.annotation.is_empty() {
            writeln!(f, "Step {}", self.step)?;
        } else {
            writeln!(f, "Step {}: {}", self.step, self.annotation)?;
        }

        let header = self.column_names.iter()
            .map(String::as_str)
            .chain(std::iter::once("b"))
            .collect::<Vec<_>>();
        let cells = self.matrix.iter()
            .map(|row| row.iter().copied().map(format_value).collect::<Vec<_>>())
            .collect::<Vec<_>>();

        let row_name_width = self.row_names.iter().map(String::len).max().unwrap_or(0);
        let column_width = header.iter().enumerate()
            .map(|(j, name)| {
                let widest_cell = cells.iter()
                    .filter_map(|row| row.get(j))
                    .map(String::len)
                    .max()
                    .unwrap_or(0);
                max(name.len(), widest_cell)
            })
            .collect::<Vec<_>>();
        let last = header.len().saturating_sub(1);

        // Column names
        write!(f, "{0:>width$} |", "", width = row_name_width)?;
        for (j, width) in column_width.iter().enumerate() {
            let separator = if j == last { " |" } else { "" };
            write!(f, "{} {:>width$}", separator, header[j], width = *width)?;
        }
        writeln!(f)?;

        let total_width = row_name_width + 2 + 2
            + column_width.iter().map(|width| 1 + width).sum::<usize>();
        // Separator
        writeln!(f, "{}", "-".repeat(total_width))?;

        for (i, row) in cells.iter().enumerate() {
            // The objective row is last
            if i + 1 == cells.len() && i > 0 {
                writeln!(f, "{}", "-".repeat(total_width))?;
            }
            let name = self.row_names.get(i).map_or("", String::as_str);
            write!(f, "{0:>width$} |", name, width = row_name_width)?;
            for (j, width) in column_width.iter().enumerate() {
                let separator = if j == last { " |" } else { "" };
                let cell = row.get(j).map_or("", String::as_str);
                write!(f, "{} {:>width$}", separator, cell, width = *width)?;
            }
            writeln!(f)?;
        }

        Ok(())
    }
}

/// Renders a named vector on a single line.
pub(crate) struct VectorView<'a> {
    pub title: &'a str,
    pub names: &'a [String],
    pub values: &'a [f64],
}

impl Display for VectorView<'_> {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        let entries = self.names.iter()
            .zip(self.values)
            .map(|(name, &value)| format!("{} = {}", name, format_value(value)))
            .join(", ");
        writeln!(f, "{}: {}", self.title, entries)
    }
}

#[cfg(test)]
mod test {
    use crate::trace::{TextTrace, Trace};
    use crate::trace::text::format_value;

    #[test]
    fn values() {
        assert_eq!(format_value(3f64), "3");
        assert_eq!(format_value(-0f64), "0");
        assert_eq!(format_value(2.9999999999), "3");
        assert_eq!(format_value(0.5), "0.5000");
        assert_eq!(format_value(-1f64 / 3f64), "-0.3333");
    }

    #[test]
    fn tableau() {
        let mut trace = TextTrace::new();
        trace.title("Phase II");
        trace.print_tableau(
            &["x1".to_string(), "s1".to_string()],
            &["s1".to_string(), "z".to_string()],
            &[vec![1f64, 1f64, 4f64], vec![-3f64, 0f64, 0f64]],
            0,
            "",
        );
        let text = trace.into_string();
        let lines = text.lines().collect::<Vec<_>>();
        assert_eq!(lines[0], "=== Phase II ===");
        assert_eq!(lines[1], "Step 0");
        assert_eq!(lines[2], "   | x1 s1 | b");
        assert_eq!(lines[4], "s1 |  1  1 | 4");
        assert_eq!(lines[6], " z | -3  0 | 0");
    }

    #[test]
    fn vector() {
        let mut trace = TextTrace::new();
        trace.print_vector("Solution", &["x1".to_string(), "x2".to_string()], &[4f64, 0.25]);
        assert_eq!(trace.as_str(), "Solution: x1 = 4, x2 = 0.2500\n");
    }
}
