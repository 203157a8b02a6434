//! CSV file series adapter.
//!
//! One file per series: `<base_path>/<name>.csv` with a header row,
//! column 0 a `YYYY-MM-DD` date and column 1 the value.

use crate::domain::error::AcfTraderError;
use crate::domain::observation::Observation;
use crate::ports::data_port::DataPort;
use chrono::NaiveDate;
use std::fs;
use std::path::PathBuf;

pub struct CsvAdapter {
    base_path: PathBuf,
}

impl CsvAdapter {
    pub fn new(base_path: PathBuf) -> Self {
        Self { base_path }
    }

    fn csv_path(&self, name: &str) -> PathBuf {
        self.base_path.join(format!("{}.csv", name))
    }
}

impl DataPort for CsvAdapter {
    fn fetch_series(&self, name: &str) -> Result<Vec<Observation>, AcfTraderError> {
        let path = self.csv_path(name);
        tracing::debug!(path = %path.display(), "reading series");
        let content = fs::read_to_string(&path).map_err(|e| AcfTraderError::DataSource {
            reason: format!("failed to read {}: {}", path.display(), e),
        })?;

        let mut rdr = csv::Reader::from_reader(content.as_bytes());
        let mut observations = Vec::new();

        for (row, result) in rdr.records().enumerate() {
            let record = result.map_err(|e| AcfTraderError::DataSource {
                reason: format!("CSV parse error: {}", e),
            })?;
            let line = row + 2;

            let date_str = record.get(0).ok_or_else(|| AcfTraderError::DataSource {
                reason: format!("line {line}: missing date column"),
            })?;
            let date = NaiveDate::parse_from_str(date_str.trim(), "%Y-%m-%d").map_err(|e| {
                AcfTraderError::DataSource {
                    reason: format!("line {line}: invalid date '{date_str}': {e}"),
                }
            })?;

            let value: f64 = record
                .get(1)
                .ok_or_else(|| AcfTraderError::DataSource {
                    reason: format!("line {line}: missing value column"),
                })?
                .trim()
                .parse()
                .map_err(|e| AcfTraderError::DataSource {
                    reason: format!("line {line}: invalid value: {e}"),
                })?;

            observations.push(Observation { date, value });
        }

        if observations.is_empty() {
            return Err(AcfTraderError::NoData {
                series: name.to_string(),
            });
        }

        tracing::debug!(series = name, rows = observations.len(), "series loaded");
        Ok(observations)
    }

    fn list_series(&self) -> Result<Vec<String>, AcfTraderError> {
        let entries = fs::read_dir(&self.base_path).map_err(|e| AcfTraderError::DataSource {
            reason: format!(
                "failed to read directory {}: {}",
                self.base_path.display(),
                e
            ),
        })?;

        let mut names = Vec::new();

        for entry in entries {
            let entry = entry.map_err(|e| AcfTraderError::DataSource {
                reason: format!("directory entry error: {}", e),
            })?;

            let name = entry.file_name();
            let name_str = name.to_string_lossy();

            if let Some(stem) = name_str.strip_suffix(".csv") {
                if !stem.is_empty() {
                    names.push(stem.to_string());
                }
            }
        }

        names.sort();
        Ok(names)
    }
}
