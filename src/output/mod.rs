//! Output module for persisting the dataset and reporting on a run
//!
//! This module handles:
//! - Writing the dataset as CSV or JSON
//! - Collecting and printing run statistics
//! - Generating the optional markdown summary

mod csv_output;
mod json_output;
mod markdown;
pub mod stats;
mod traits;

pub use csv_output::{csv_header, write_csv, CsvOutput};
pub use json_output::JsonOutput;
pub use markdown::{format_markdown_summary, generate_markdown_summary};
pub use stats::{print_statistics, RunStats};
pub use traits::{OutputError, OutputHandler, OutputResult};

use crate::config::{OutputConfig, OutputFormat};

/// Picks the dataset writer for the configured format
pub fn handler_for(config: &OutputConfig) -> Box<dyn OutputHandler> {
    match config.format {
        OutputFormat::Csv => Box::new(CsvOutput::new(&config.dataset_path)),
        OutputFormat::Json => Box::new(JsonOutput::new(&config.dataset_path)),
    }
}
