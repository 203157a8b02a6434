//! Configuration validation.
//!
//! Every key is optional; a key that is present must hold a usable value.

use crate::domain::error::AcfTraderError;
use crate::domain::returns::SeriesKind;
use crate::domain::strategy::StrategyKind;
use crate::ports::config_port::ConfigPort;

pub fn validate_config(config: &dyn ConfigPort) -> Result<(), AcfTraderError> {
    validate_analysis_config(config)?;
    validate_demo_config(config)?;
    Ok(())
}

/// Sections used by `analyze`: [data], [analysis], [backtest].
pub fn validate_analysis_config(config: &dyn ConfigPort) -> Result<(), AcfTraderError> {
    validate_series_kind(config)?;
    validate_series_name(config)?;
    validate_significance_level(config)?;
    validate_strategy(config)?;
    validate_window(config, "lookback")?;
    validate_window(config, "holding")?;
    Ok(())
}

/// Sections used by `demo`: [analysis], [backtest], [demo].
pub fn validate_demo_config(config: &dyn ConfigPort) -> Result<(), AcfTraderError> {
    validate_significance_level(config)?;
    validate_strategy(config)?;
    validate_window(config, "lookback")?;
    validate_window(config, "holding")?;
    validate_seed(config)?;
    validate_length(config)?;
    validate_mean(config)?;
    validate_std_dev(config)?;
    Ok(())
}

fn invalid(section: &str, key: &str, reason: impl Into<String>) -> AcfTraderError {
    AcfTraderError::ConfigInvalid {
        section: section.to_string(),
        key: key.to_string(),
        reason: reason.into(),
    }
}

fn raw(config: &dyn ConfigPort, section: &str, key: &str) -> Option<String> {
    config
        .get_string(section, key)
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
}

fn parse_int(config: &dyn ConfigPort, section: &str, key: &str) -> Result<Option<i64>, AcfTraderError> {
    match raw(config, section, key) {
        None => Ok(None),
        Some(s) => s
            .parse::<i64>()
            .map(Some)
            .map_err(|_| invalid(section, key, format!("{key} must be an integer"))),
    }
}

fn parse_float(config: &dyn ConfigPort, section: &str, key: &str) -> Result<Option<f64>, AcfTraderError> {
    match raw(config, section, key) {
        None => Ok(None),
        Some(s) => s
            .parse::<f64>()
            .map(Some)
            .map_err(|_| invalid(section, key, format!("{key} must be a number"))),
    }
}

fn validate_series_kind(config: &dyn ConfigPort) -> Result<(), AcfTraderError> {
    if let Some(kind) = raw(config, "data", "kind") {
        kind.parse::<SeriesKind>()
            .map_err(|e| invalid("data", "kind", e.to_string()))?;
    }
    Ok(())
}

fn validate_series_name(config: &dyn ConfigPort) -> Result<(), AcfTraderError> {
    if let Some(name) = raw(config, "data", "series") {
        if name.contains(['/', '\\']) {
            return Err(invalid(
                "data",
                "series",
                "series must be a file stem, not a path",
            ));
        }
    }
    Ok(())
}

fn validate_significance_level(config: &dyn ConfigPort) -> Result<(), AcfTraderError> {
    if let Some(value) = parse_float(config, "analysis", "significance_level")? {
        if !(value > 0.0 && value < 1.0) {
            return Err(invalid(
                "analysis",
                "significance_level",
                "significance_level must be between 0 and 1 (exclusive)",
            ));
        }
    }
    Ok(())
}

fn validate_strategy(config: &dyn ConfigPort) -> Result<(), AcfTraderError> {
    if let Some(name) = raw(config, "backtest", "strategy") {
        name.parse::<StrategyKind>()
            .map_err(|e| invalid("backtest", "strategy", e.to_string()))?;
    }
    Ok(())
}

fn validate_window(config: &dyn ConfigPort, key: &str) -> Result<(), AcfTraderError> {
    if let Some(value) = parse_int(config, "backtest", key)? {
        if value < 1 {
            return Err(invalid(
                "backtest",
                key,
                format!("{key} must be at least 1"),
            ));
        }
    }
    Ok(())
}

fn validate_seed(config: &dyn ConfigPort) -> Result<(), AcfTraderError> {
    if let Some(value) = parse_int(config, "demo", "seed")? {
        if value < 0 {
            return Err(invalid("demo", "seed", "seed must be non-negative"));
        }
    }
    Ok(())
}

fn validate_length(config: &dyn ConfigPort) -> Result<(), AcfTraderError> {
    if let Some(value) = parse_int(config, "demo", "length")? {
        if value < 1 {
            return Err(invalid("demo", "length", "length must be at least 1"));
        }
    }
    Ok(())
}

fn validate_mean(config: &dyn ConfigPort) -> Result<(), AcfTraderError> {
    if let Some(value) = parse_float(config, "demo", "mean")? {
        if !value.is_finite() {
            return Err(invalid("demo", "mean", "mean must be finite"));
        }
    }
    Ok(())
}

fn validate_std_dev(config: &dyn ConfigPort) -> Result<(), AcfTraderError> {
    if let Some(value) = parse_float(config, "demo", "std_dev")? {
        if !(value.is_finite() && value > 0.0) {
            return Err(invalid("demo", "std_dev", "std_dev must be positive"));
        }
    }
    Ok(())
}
