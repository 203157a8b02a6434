//! Return series validation and conversion.
//!
//! A return series is a plain `&[f64]` of periodic fractional returns
//! (0.01 = 1%). Price series are converted to simple returns
//! r[i] = p[i+1] / p[i] - 1, yielding one fewer value than prices.

use std::fmt;
use std::str::FromStr;

use crate::domain::error::AcfTraderError;

/// How the values of a loaded series are interpreted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SeriesKind {
    #[default]
    Returns,
    Prices,
}

impl fmt::Display for SeriesKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SeriesKind::Returns => write!(f, "returns"),
            SeriesKind::Prices => write!(f, "prices"),
        }
    }
}

impl FromStr for SeriesKind {
    type Err = AcfTraderError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "returns" | "return" => Ok(SeriesKind::Returns),
            "prices" | "price" | "close" => Ok(SeriesKind::Prices),
            other => Err(AcfTraderError::invalid_input(format!(
                "unknown series kind '{other}' (expected returns or prices)"
            ))),
        }
    }
}

/// Reject NaN and infinite values, naming the first offending index.
pub fn validate_finite(values: &[f64]) -> Result<(), AcfTraderError> {
    match values.iter().position(|v| !v.is_finite()) {
        Some(i) => Err(AcfTraderError::invalid_input(format!(
            "non-finite value {} at index {}",
            values[i], i
        ))),
        None => Ok(()),
    }
}

/// Simple returns from a price path.
pub fn from_prices(prices: &[f64]) -> Result<Vec<f64>, AcfTraderError> {
    if prices.len() < 2 {
        return Err(AcfTraderError::InsufficientData {
            observations: prices.len(),
            minimum: 2,
        });
    }
    validate_finite(prices)?;
    if let Some(i) = prices.iter().position(|&p| p <= 0.0) {
        return Err(AcfTraderError::invalid_input(format!(
            "price must be positive, got {} at index {}",
            prices[i], i
        )));
    }

    Ok(prices.windows(2).map(|w| w[1] / w[0] - 1.0).collect())
}

/// Interpret raw values according to `kind`, always yielding returns.
pub fn to_returns(kind: SeriesKind, values: &[f64]) -> Result<Vec<f64>, AcfTraderError> {
    match kind {
        SeriesKind::Returns => {
            validate_finite(values)?;
            Ok(values.to_vec())
        }
        SeriesKind::Prices => from_prices(values),
    }
}
