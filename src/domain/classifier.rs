//! Lag-1 autocorrelation classifier.
//!
//! Computes ACF(1) and the lag-1 Ljung-Box p-value, then maps them to a
//! recommendation:
//!   p >= alpha   -> NotSignificant
//!   ACF(1) > 0   -> MomentumSuggested
//!   ACF(1) < 0   -> MeanReversionSuggested
//!   otherwise    -> AmbiguousNoDirection

use std::fmt;

use crate::domain::autocorrelation::{acf, ljung_box_from_acf};
use crate::domain::error::AcfTraderError;
use crate::domain::returns::validate_finite;
use crate::domain::strategy::StrategyKind;

/// Smallest series the lag-1 test accepts.
pub const MIN_OBSERVATIONS: usize = 3;

pub const DEFAULT_SIGNIFICANCE_LEVEL: f64 = 0.05;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Recommendation {
    MomentumSuggested,
    MeanReversionSuggested,
    AmbiguousNoDirection,
    NotSignificant,
}

impl Recommendation {
    pub fn message(self) -> &'static str {
        match self {
            Recommendation::MomentumSuggested => {
                "Significant positive autocorrelation detected. Suggest momentum strategy."
            }
            Recommendation::MeanReversionSuggested => {
                "Significant negative autocorrelation detected. Suggest mean-reversion strategy."
            }
            Recommendation::AmbiguousNoDirection => {
                "Significant autocorrelation detected, but ACF is zero. No clear strategy."
            }
            Recommendation::NotSignificant => "No significant autocorrelation detected.",
        }
    }

    pub fn suggested_strategy(self) -> Option<StrategyKind> {
        match self {
            Recommendation::MomentumSuggested => Some(StrategyKind::Momentum),
            Recommendation::MeanReversionSuggested => Some(StrategyKind::MeanReversion),
            Recommendation::AmbiguousNoDirection | Recommendation::NotSignificant => None,
        }
    }
}

impl fmt::Display for Recommendation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Recommendation::MomentumSuggested => "momentum-suggested",
            Recommendation::MeanReversionSuggested => "mean-reversion-suggested",
            Recommendation::AmbiguousNoDirection => "ambiguous-no-direction",
            Recommendation::NotSignificant => "not-significant",
        };
        f.write_str(label)
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TestResult {
    pub acf1: f64,
    /// Ljung-Box Q at lag 1.
    pub statistic: f64,
    pub p_value: f64,
    pub recommendation: Recommendation,
}

/// Decision rule over an already computed ACF(1) and p-value.
pub fn decide(acf1: f64, p_value: f64, significance_level: f64) -> Recommendation {
    if p_value >= significance_level {
        Recommendation::NotSignificant
    } else if acf1 > 0.0 {
        Recommendation::MomentumSuggested
    } else if acf1 < 0.0 {
        Recommendation::MeanReversionSuggested
    } else {
        Recommendation::AmbiguousNoDirection
    }
}

pub fn classify(returns: &[f64]) -> Result<TestResult, AcfTraderError> {
    classify_at(returns, DEFAULT_SIGNIFICANCE_LEVEL)
}

pub fn classify_at(returns: &[f64], significance_level: f64) -> Result<TestResult, AcfTraderError> {
    if !(significance_level > 0.0 && significance_level < 1.0) {
        return Err(AcfTraderError::invalid_input(format!(
            "significance level must be in (0, 1), got {significance_level}"
        )));
    }
    if returns.len() < MIN_OBSERVATIONS {
        return Err(AcfTraderError::InsufficientData {
            observations: returns.len(),
            minimum: MIN_OBSERVATIONS,
        });
    }
    validate_finite(returns)?;

    let rho = acf(returns, 1)?;
    let lb = ljung_box_from_acf(&rho, returns.len())?;
    let acf1 = rho[1];

    Ok(TestResult {
        acf1,
        statistic: lb.statistic,
        p_value: lb.p_value,
        recommendation: decide(acf1, lb.p_value, significance_level),
    })
}
