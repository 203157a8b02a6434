//! Compounded return figures for a position schedule.
//!
//! compound(r, p)   = prod(1 + r[i] * p[i]) - 1
//! buy_and_hold(r)  = prod(1 + r[i]) - 1

use crate::domain::error::AcfTraderError;
use crate::domain::returns::validate_finite;

pub fn compound(returns: &[f64], position: &[f64]) -> Result<f64, AcfTraderError> {
    if returns.len() != position.len() {
        return Err(AcfTraderError::invalid_input(format!(
            "position length {} does not match returns length {}",
            position.len(),
            returns.len()
        )));
    }
    validate_finite(returns)?;
    validate_finite(position)?;

    let growth = returns
        .iter()
        .zip(position)
        .fold(1.0, |acc, (r, p)| acc * (1.0 + r * p));
    Ok(growth - 1.0)
}

pub fn buy_and_hold(returns: &[f64]) -> Result<f64, AcfTraderError> {
    validate_finite(returns)?;
    Ok(returns.iter().fold(1.0, |acc, r| acc * (1.0 + r)) - 1.0)
}

/// Fraction of periods with non-zero exposure.
pub fn exposure(position: &[f64]) -> f64 {
    if position.is_empty() {
        return 0.0;
    }
    let invested = position.iter().filter(|&&p| p != 0.0).count();
    invested as f64 / position.len() as f64
}
