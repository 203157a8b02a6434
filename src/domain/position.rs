//! Position schedule construction from trailing cumulative returns.
//!
//! For t in L..=T-H:
//!   cum = prod(1 + r[i] for i in t-L..t) - 1
//!   if the strategy activates on cum: position[t..t+H] = 1
//! If L + H > T no window fits and the schedule is all zero.

use crate::domain::error::AcfTraderError;
use crate::domain::returns::validate_finite;
use crate::domain::strategy::{validate_windows, StrategyKind, WindowRule};

/// Compounded return of a window: prod(1 + r) - 1.
pub fn cumulative_return(window: &[f64]) -> f64 {
    window.iter().fold(1.0, |acc, r| acc * (1.0 + r)) - 1.0
}

pub fn build_position(
    returns: &[f64],
    strategy: StrategyKind,
    lookback: usize,
    holding: usize,
) -> Result<Vec<f64>, AcfTraderError> {
    validate_windows(lookback, holding)?;
    validate_finite(returns)?;

    let n = returns.len();
    let mut position = vec![0.0; n];
    if lookback + holding > n {
        return Ok(position);
    }

    for t in lookback..=n - holding {
        let cum = cumulative_return(&returns[t - lookback..t]);
        if strategy.activates(cum) {
            position[t..t + holding].fill(1.0);
        }
    }

    Ok(position)
}

pub fn build_position_for(returns: &[f64], rule: &WindowRule) -> Result<Vec<f64>, AcfTraderError> {
    build_position(returns, rule.kind, rule.lookback, rule.holding)
}
