//! Runs the classifier and the window-rule backtest over one series.

use crate::domain::backtest::{run_backtest, BacktestResult};
use crate::domain::classifier::{classify_at, TestResult};
use crate::domain::error::AcfTraderError;
use crate::domain::strategy::WindowRule;

#[derive(Debug, Clone, PartialEq)]
pub struct AnalysisReport {
    pub series_name: String,
    pub observations: usize,
    pub significance_level: f64,
    pub test: TestResult,
    pub backtest: BacktestResult,
}

pub fn run_analysis(
    series_name: &str,
    returns: &[f64],
    rule: &WindowRule,
    significance_level: f64,
) -> Result<AnalysisReport, AcfTraderError> {
    let test = classify_at(returns, significance_level)?;
    let backtest = run_backtest(returns, rule)?;

    Ok(AnalysisReport {
        series_name: series_name.to_string(),
        observations: returns.len(),
        significance_level,
        test,
        backtest,
    })
}
