//! Append-only conversion log stored as CSV

use std::fs::{self, OpenOptions};
use std::path::{Path, PathBuf};

use crate::error::HistoryError;
use crate::models::ConversionRecord;

pub const HISTORY_HEADER: [&str; 4] = ["Base Currency", "Target Currency", "Amount", "Result"];

#[derive(Debug, Clone)]
pub struct ConversionHistory {
    path: PathBuf,
}

impl ConversionHistory {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Append one record, writing the header first if the file is new or empty.
    pub fn append(&self, record: &ConversionRecord) -> Result<(), HistoryError> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }

        let needs_header = match fs::metadata(&self.path) {
            Ok(meta) => meta.len() == 0,
            Err(_) => true,
        };

        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)?;

        let mut writer = csv::WriterBuilder::new()
            .has_headers(needs_header)
            .from_writer(file);
        writer.serialize(record)?;
        writer.flush()?;

        tracing::debug!(
            "Saved {} -> {} to {}",
            record.base_currency,
            record.target_currency,
            self.path.display()
        );
        Ok(())
    }

    /// All recorded conversions, oldest first. A missing file means no history.
    pub fn load(&self) -> Result<Vec<ConversionRecord>, HistoryError> {
        if !self.path.exists() {
            return Ok(Vec::new());
        }

        let mut reader = csv::ReaderBuilder::new()
            .has_headers(true)
            .from_path(&self.path)?;

        let mut records = Vec::new();
        for row in reader.deserialize() {
            records.push(row?);
        }
        Ok(records)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn temp_history() -> ConversionHistory {
        let dir = std::env::temp_dir().join(format!("currency-vault-{}", uuid::Uuid::new_v4()));
        ConversionHistory::new(dir.join("conversion_history.csv"))
    }

    fn record(base: &str, target: &str, amount: f64, result: f64) -> ConversionRecord {
        ConversionRecord {
            base_currency: base.to_string(),
            target_currency: target.to_string(),
            amount,
            result,
        }
    }

    #[test]
    fn test_missing_file_is_empty_history() {
        let history = temp_history();
        assert!(history.load().unwrap().is_empty());
    }

    #[test]
    fn test_header_written_once() {
        let history = temp_history();
        let records = vec![
            record("USD", "EUR", 100.0, 90.0),
            record("GBP", "INR", 2.5, 263.125),
            record("JPY", "USD", 1000.0, 6.7),
        ];
        for r in &records {
            history.append(r).unwrap();
        }

        let contents = fs::read_to_string(history.path()).unwrap();
        let lines: Vec<&str> = contents.lines().collect();
        assert_eq!(lines.len(), 1 + records.len());
        assert_eq!(lines[0], HISTORY_HEADER.join(","));
        assert_eq!(
            lines.iter().filter(|l| l.starts_with("Base Currency")).count(),
            1
        );
        assert_eq!(lines[1], "USD,EUR,100.0,90.0");

        assert_eq!(history.load().unwrap(), records);

        fs::remove_dir_all(history.path().parent().unwrap()).ok();
    }

    #[test]
    fn test_existing_file_keeps_its_header() {
        let history = temp_history();
        fs::create_dir_all(history.path().parent().unwrap()).unwrap();
        fs::write(history.path(), "Base Currency,Target Currency,Amount,Result\n").unwrap();

        history.append(&record("CAD", "CHF", 10.0, 6.4)).unwrap();

        let contents = fs::read_to_string(history.path()).unwrap();
        assert_eq!(contents.lines().count(), 2);
        assert_eq!(history.load().unwrap().len(), 1);

        fs::remove_dir_all(history.path().parent().unwrap()).ok();
    }
}
