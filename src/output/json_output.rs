//! JSON dataset output

use crate::output::traits::{OutputHandler, OutputResult};
use crate::record::Dataset;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

/// Writes datasets as a pretty-printed JSON array of records
#[derive(Debug, Clone)]
pub struct JsonOutput {
    path: PathBuf,
}

impl JsonOutput {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl OutputHandler for JsonOutput {
    fn write_dataset(&self, dataset: &Dataset) -> OutputResult<()> {
        let mut writer = BufWriter::new(File::create(&self.path)?);
        serde_json::to_writer_pretty(&mut writer, dataset)?;
        writer.write_all(b"\n")?;
        writer.flush()?;
        Ok(())
    }

    fn destination(&self) -> &Path {
        &self.path
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::sample_record;
    use tempfile::TempDir;

    #[test]
    fn test_writes_array_in_order() {
        let dir = TempDir::new().unwrap();
        let output = JsonOutput::new(dir.path().join("product_data.json"));
        let dataset: Dataset = vec![
            sample_record("https://www.bol.com/p/1/"),
            sample_record("https://www.bol.com/p/2/"),
        ]
        .into_iter()
        .collect();

        output.write_dataset(&dataset).unwrap();

        let text = std::fs::read_to_string(output.destination()).unwrap();
        let value: serde_json::Value = serde_json::from_str(&text).unwrap();
        let records = value.as_array().unwrap();

        assert_eq!(records.len(), 2);
        assert_eq!(records[0]["url"], "https://www.bol.com/p/1/");
        assert_eq!(records[1]["url"], "https://www.bol.com/p/2/");
        assert_eq!(records[0]["review_count"], "12");
        assert_eq!(records[0]["specifications"]["Weight"], "1kg");
    }

    #[test]
    fn test_empty_dataset() {
        let dir = TempDir::new().unwrap();
        let output = JsonOutput::new(dir.path().join("empty.json"));

        output.write_dataset(&Dataset::new()).unwrap();

        let text = std::fs::read_to_string(output.destination()).unwrap();
        assert_eq!(text.trim(), "[]");
    }
}
