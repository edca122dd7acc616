//! # Error reporting for reading of model files
//!
//! Problems are either related to reading the file or to its contents.
use std::fmt::{self, Display};
use std::error::Error;
use std::io;

use thiserror::Error;

/// An `ImportError` is created when an error was encountered during IO or parsing.
#[derive(Error, Debug)]
pub enum ImportError {
    /// The file couldn't be found or read.
    #[error("could not read the model file: {0}")]
    Io(#[from] io::Error),
    /// Contents of the file could not be parsed into a model.
    #[error(transparent)]
    Parse(#[from] ParseError),
}

/// A syntax problem in a model file.
///
/// May reference the line at which it was found.
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct ParseError {
    description: String,
    file_location: Option<(usize, String)>,
}

impl ParseError {
    /// Create a new `ParseError` with only a description.
    pub fn new(description: impl Into<String>) -> Self {
        Self { description: description.into(), file_location: None }
    }

    /// Create a new `ParseError` referencing a line.
    ///
    /// # Arguments
    ///
    /// * `description`: What's wrong.
    /// * `file_location`: Line number, counting from one, and the line as it was read.
    pub fn with_file_location(description: impl Into<String>, file_location: FileLocation) -> Self {
        let (line_number, line) = file_location;
        Self { description: description.into(), file_location: Some((line_number, line.to_string())) }
    }

    /// What's wrong.
    pub fn description(&self) -> &str {
        &self.description
    }

    /// Line number and contents of the line at which the error was found, if known.
    pub fn file_location(&self) -> Option<(usize, &str)> {
        self.file_location.as_ref().map(|(line_number, line)| (*line_number, line.as_str()))
    }
}

impl Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "ParseError: {}", self.description)?;
        if let Some((line_number, line)) = &self.file_location {
            write!(f, "\n\tCaused at line\t{}:\t{}", line_number, line)?;
        }
        Ok(())
    }
}

impl Error for ParseError {}

/// A line number and the line itself.
pub(super) type FileLocation<'a> = (usize, &'a str);
