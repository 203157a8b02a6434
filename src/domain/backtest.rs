//! Window-rule backtest: position schedule plus strategy and buy-and-hold totals.

use crate::domain::error::AcfTraderError;
use crate::domain::metrics::{buy_and_hold, compound, exposure};
use crate::domain::position::build_position_for;
use crate::domain::strategy::WindowRule;

#[derive(Debug, Clone, PartialEq)]
pub struct BacktestResult {
    pub rule: WindowRule,
    pub position: Vec<f64>,
    pub strategy_return: f64,
    pub buy_and_hold_return: f64,
}

impl BacktestResult {
    pub fn exposure(&self) -> f64 {
        exposure(&self.position)
    }

    pub fn excess_return(&self) -> f64 {
        self.strategy_return - self.buy_and_hold_return
    }

    /// Number of periods with an open position.
    pub fn periods_invested(&self) -> usize {
        self.position.iter().filter(|&&p| p != 0.0).count()
    }
}

pub fn run_backtest(returns: &[f64], rule: &WindowRule) -> Result<BacktestResult, AcfTraderError> {
    let position = build_position_for(returns, rule)?;
    let strategy_return = compound(returns, &position)?;
    let buy_and_hold_return = buy_and_hold(returns)?;

    Ok(BacktestResult {
        rule: *rule,
        position,
        strategy_return,
        buy_and_hold_return,
    })
}
