//! Output handler trait and errors
//!
//! An output handler receives the finished dataset once, after every product
//! page has been assembled, and persists it in its own format.

use crate::record::Dataset;
use std::path::Path;
use thiserror::Error;

/// Errors that can occur during output operations
#[derive(Debug, Error)]
pub enum OutputError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Result type for output operations
pub type OutputResult<T> = Result<T, OutputError>;

/// Trait for dataset sinks
pub trait OutputHandler {
    /// Writes every record of `dataset`, in dataset order
    ///
    /// An existing file at the destination is replaced.
    fn write_dataset(&self, dataset: &Dataset) -> OutputResult<()>;

    /// Where the dataset ends up
    fn destination(&self) -> &Path;
}
