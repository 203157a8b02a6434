//! Window-rule strategy selection.

use std::fmt;
use std::str::FromStr;

use crate::domain::error::AcfTraderError;

pub const DEFAULT_LOOKBACK: usize = 12;
pub const DEFAULT_HOLDING: usize = 12;

/// Which sign of trailing cumulative return opens a holding window.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum StrategyKind {
    /// Invest after a positive trailing return.
    #[default]
    Momentum,
    /// Invest after a negative trailing return.
    MeanReversion,
}

impl StrategyKind {
    pub fn activates(self, cumulative_return: f64) -> bool {
        match self {
            StrategyKind::Momentum => cumulative_return > 0.0,
            StrategyKind::MeanReversion => cumulative_return < 0.0,
        }
    }
}

impl fmt::Display for StrategyKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StrategyKind::Momentum => write!(f, "momentum"),
            StrategyKind::MeanReversion => write!(f, "mean_reversion"),
        }
    }
}

impl FromStr for StrategyKind {
    type Err = AcfTraderError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().replace('-', "_").as_str() {
            "momentum" => Ok(StrategyKind::Momentum),
            "mean_reversion" => Ok(StrategyKind::MeanReversion),
            other => Err(AcfTraderError::invalid_input(format!(
                "unknown strategy '{other}' (expected momentum or mean_reversion)"
            ))),
        }
    }
}

/// A strategy kind with its lookback and holding window lengths.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WindowRule {
    pub kind: StrategyKind,
    pub lookback: usize,
    pub holding: usize,
}

impl WindowRule {
    pub fn new(kind: StrategyKind, lookback: usize, holding: usize) -> Result<Self, AcfTraderError> {
        validate_windows(lookback, holding)?;
        Ok(Self {
            kind,
            lookback,
            holding,
        })
    }
}

impl Default for WindowRule {
    fn default() -> Self {
        Self {
            kind: StrategyKind::Momentum,
            lookback: DEFAULT_LOOKBACK,
            holding: DEFAULT_HOLDING,
        }
    }
}

impl fmt::Display for WindowRule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} (lookback {}, holding {})",
            self.kind, self.lookback, self.holding
        )
    }
}

pub(crate) fn validate_windows(lookback: usize, holding: usize) -> Result<(), AcfTraderError> {
    if lookback == 0 {
        return Err(AcfTraderError::invalid_input("lookback must be at least 1"));
    }
    if holding == 0 {
        return Err(AcfTraderError::invalid_input("holding must be at least 1"));
    }
    Ok(())
}
