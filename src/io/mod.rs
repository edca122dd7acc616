//! # Reading and writing of models
//!
//! This module provides read and write functionality for the line based text format described in
//! `text`.
use std::fs;
use std::path::Path;

use crate::data::linear_program::model::Model;
use crate::io::error::ImportError;

pub mod error;
pub mod text;

/// Import a model from a file.
///
/// # Errors
///
/// When a file cannot be found or read, or when its contents are not a valid model.
pub fn import(file_path: &Path) -> Result<Model, ImportError> {
    let program = fs::read_to_string(file_path)?;
    Ok(text::parse(&program)?)
}
