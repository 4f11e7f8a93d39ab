//! CSV dataset output
//!
//! One header row, then one row per record. String fields are written as
//! extracted (sentinels included); the specifications mapping is written as
//! a JSON object in a single column.

use crate::extract::Field;
use crate::output::traits::{OutputHandler, OutputResult};
use crate::record::{Dataset, ProductRecord};
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

/// Writes datasets as CSV files
#[derive(Debug, Clone)]
pub struct CsvOutput {
    path: PathBuf,
}

impl CsvOutput {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl OutputHandler for CsvOutput {
    fn write_dataset(&self, dataset: &Dataset) -> OutputResult<()> {
        let file = File::create(&self.path)?;
        write_csv(BufWriter::new(file), dataset)
    }

    fn destination(&self) -> &Path {
        &self.path
    }
}

/// Header row: `url` followed by every field name in column order
pub fn csv_header() -> Vec<&'static str> {
    std::iter::once("url")
        .chain(Field::ALL.iter().map(Field::as_str))
        .collect()
}

/// Writes `dataset` as CSV to any writer
pub fn write_csv<W: Write>(writer: W, dataset: &Dataset) -> OutputResult<()> {
    let mut csv = csv::Writer::from_writer(writer);
    csv.write_record(csv_header())?;

    for record in dataset {
        csv.write_record(csv_row(record)?)?;
    }

    csv.flush()?;
    Ok(())
}

fn csv_row(record: &ProductRecord) -> OutputResult<Vec<String>> {
    let mut row = Vec::with_capacity(Field::ALL.len() + 1);
    row.push(record.url.to_string());
    row.extend(record.values().map(|(_, value)| value.to_string()));
    row.push(serde_json::to_string(&record.specifications)?);
    Ok(row)
}
