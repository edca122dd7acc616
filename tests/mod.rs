//! # Integration tests
//!
//! Integration tests completely external from the crate. All code written in this module could be
//! written by an external user of the crate.
use std::path::{Path, PathBuf};

mod properties;
mod scenarios;

/// Relative path of the folder where the model files are stored.
///
/// The path is relative to the project root folder.
fn model_file_directory() -> PathBuf {
    Path::new(file!()).parent().unwrap().join("models")
}

/// Compute the path of a model file, based on its name.
///
/// # Arguments
///
/// * `name`: Model name without extension.
fn get_test_file_path(name: &str) -> PathBuf {
    model_file_directory().join(name).with_extension("lp")
}
