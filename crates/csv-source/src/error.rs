//! Errors that abort a whole batch.

use std::path::PathBuf;
use thiserror::Error;

/// Failures that invalidate every row, as opposed to a single bad value.
#[derive(Error, Debug)]
pub enum BatchError {
    /// The input file does not exist.
    #[error("CSV file not found: {}", .0.display())]
    NotFound(PathBuf),

    /// The header row lacks a required column.
    #[error("CSV must contain columns: {required:?}. Found: {found:?}")]
    Schema {
        required: Vec<&'static str>,
        found: Vec<String>,
    },

    /// IO error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// CSV error.
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
}
