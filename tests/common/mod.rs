#![allow(dead_code)]

use acftrader::domain::analysis::AnalysisReport;
use acftrader::domain::error::AcfTraderError;
pub use acftrader::domain::observation::Observation;
use acftrader::ports::data_port::DataPort;
use acftrader::ports::report_port::ReportPort;
use chrono::NaiveDate;
use std::cell::RefCell;
use std::collections::HashMap;
use std::io::Write;

pub const STEP: [f64; 8] = [0.01, 0.01, 0.01, 0.01, -0.01, -0.01, -0.01, -0.01];

pub struct MockDataPort {
    pub data: HashMap<String, Vec<Observation>>,
    pub errors: HashMap<String, String>,
}

impl MockDataPort {
    pub fn new() -> Self {
        Self {
            data: HashMap::new(),
            errors: HashMap::new(),
        }
    }

    pub fn with_series(mut self, name: &str, observations: Vec<Observation>) -> Self {
        self.data.insert(name.to_string(), observations);
        self
    }

    pub fn with_error(mut self, name: &str, reason: &str) -> Self {
        self.errors.insert(name.to_string(), reason.to_string());
        self
    }
}

impl DataPort for MockDataPort {
    fn fetch_series(&self, name: &str) -> Result<Vec<Observation>, AcfTraderError> {
        if let Some(reason) = self.errors.get(name) {
            return Err(AcfTraderError::DataSource {
                reason: reason.clone(),
            });
        }
        match self.data.get(name) {
            Some(rows) if !rows.is_empty() => Ok(rows.clone()),
            _ => Err(AcfTraderError::NoData {
                series: name.to_string(),
            }),
        }
    }

    fn list_series(&self) -> Result<Vec<String>, AcfTraderError> {
        let mut names: Vec<String> = self.data.keys().cloned().collect();
        names.sort();
        Ok(names)
    }
}

/// Keeps every report it is handed.
#[derive(Default)]
pub struct RecordingReportPort {
    pub reports: RefCell<Vec<AnalysisReport>>,
}

impl ReportPort for RecordingReportPort {
    fn write(&self, report: &AnalysisReport) -> Result<(), AcfTraderError> {
        self.reports.borrow_mut().push(report.clone());
        Ok(())
    }
}

pub fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

/// Consecutive daily observations starting 2024-01-01.
pub fn make_observations(values: &[f64]) -> Vec<Observation> {
    let start = date(2024, 1, 1);
    values
        .iter()
        .enumerate()
        .map(|(i, &value)| Observation {
            date: start + chrono::Duration::days(i as i64),
            value,
        })
        .collect()
}

pub fn alternating(n: usize, up: f64, down: f64) -> Vec<f64> {
    (0..n).map(|i| if i % 2 == 0 { up } else { down }).collect()
}

pub fn write_temp_ini(content: &str) -> tempfile::NamedTempFile {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    file.write_all(content.as_bytes()).unwrap();
    file.flush().unwrap();
    file
}

/// Write `values` as `<dir>/<name>.csv` with one row per day.
pub fn write_series_csv(dir: &std::path::Path, name: &str, values: &[f64]) {
    let mut content = String::from("date,value\n");
    for obs in make_observations(values) {
        content.push_str(&format!("{},{}\n", obs.date.format("%Y-%m-%d"), obs.value));
    }
    std::fs::write(dir.join(format!("{name}.csv")), content).unwrap();
}
