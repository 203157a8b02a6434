//! Plain-text report adapter implementing ReportPort.
//!
//! Writes to a file when an output path is set, otherwise to stdout.

use std::fs;
use std::io::{self, Write};
use std::path::PathBuf;

use crate::domain::analysis::AnalysisReport;
use crate::domain::error::AcfTraderError;
use crate::ports::report_port::ReportPort;

pub struct TextReportAdapter {
    output: Option<PathBuf>,
}

impl TextReportAdapter {
    pub fn stdout() -> Self {
        Self { output: None }
    }

    pub fn to_file(path: PathBuf) -> Self {
        Self { output: Some(path) }
    }
}

/// Fraction as a two-decimal percentage: 0.0123 -> "1.23%".
pub fn format_pct(value: f64) -> String {
    format!("{:.2}%", value * 100.0)
}

pub fn render(report: &AnalysisReport) -> String {
    let test = &report.test;
    let bt = &report.backtest;

    let mut out = String::new();
    out.push_str(&format!(
        "Series: {} ({} observations)\n",
        report.series_name, report.observations
    ));
    out.push_str(&format!("Lag-1 autocorrelation: {:.4}\n", test.acf1));
    out.push_str(&format!(
        "Ljung-Box Q: {:.4} (p-value {:.4}, alpha {})\n",
        test.statistic, test.p_value, report.significance_level
    ));
    out.push_str(&format!("Recommendation: {}\n", test.recommendation));
    out.push_str(test.recommendation.message());
    out.push('\n');
    if let Some(kind) = test.recommendation.suggested_strategy() {
        out.push_str(&format!("Suggested strategy: {}\n", kind));
    }
    out.push_str(&format!("Rule: {}\n", bt.rule));
    out.push_str(&format!(
        "Exposure: {} ({} of {} periods)\n",
        format_pct(bt.exposure()),
        bt.periods_invested(),
        bt.position.len()
    ));
    out.push_str(&format!("Strategy return: {}\n", format_pct(bt.strategy_return)));
    out.push_str(&format!(
        "Buy-and-hold return: {}\n",
        format_pct(bt.buy_and_hold_return)
    ));
    out
}

impl ReportPort for TextReportAdapter {
    fn write(&self, report: &AnalysisReport) -> Result<(), AcfTraderError> {
        let text = render(report);
        match &self.output {
            Some(path) => {
                fs::write(path, text)?;
                tracing::info!(path = %path.display(), "report written");
            }
            None => {
                let mut stdout = io::stdout().lock();
                stdout.write_all(text.as_bytes())?;
                stdout.flush()?;
            }
        }
        Ok(())
    }
}
