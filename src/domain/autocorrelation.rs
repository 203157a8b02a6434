//! Sample autocorrelation and the Ljung-Box portmanteau test.
//!
//! ACF(k) = sum((x[t] - m) * (x[t-k] - m) for t in k..n) / sum((x[t] - m)^2)
//! Denominator-by-n (biased) estimator, so |ACF(k)| <= 1.
//!
//! Q(h) = n(n+2) * sum(ACF(k)^2 / (n-k) for k in 1..=h), compared against
//! a chi-squared distribution with h degrees of freedom.

use statrs::distribution::{ChiSquared, ContinuousCDF};

use crate::domain::error::AcfTraderError;
use crate::domain::returns::validate_finite;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LjungBoxResult {
    pub statistic: f64,
    pub p_value: f64,
    pub lags: usize,
}

/// Autocorrelations for lags `0..=max_lag`. Lag 0 is always 1.
pub fn acf(data: &[f64], max_lag: usize) -> Result<Vec<f64>, AcfTraderError> {
    let n = data.len();
    if n <= max_lag {
        return Err(AcfTraderError::InsufficientData {
            observations: n,
            minimum: max_lag + 1,
        });
    }
    validate_finite(data)?;

    // Exact comparison; the rounded mean of a constant series can differ from its value.
    if data.iter().all(|&x| x == data[0]) {
        return Err(AcfTraderError::invalid_input(
            "series has zero variance, autocorrelation is undefined",
        ));
    }

    let mean = data.iter().sum::<f64>() / n as f64;
    let denom: f64 = data.iter().map(|x| (x - mean).powi(2)).sum();
    if !denom.is_finite() || denom == 0.0 {
        return Err(AcfTraderError::invalid_input(format!(
            "series variance is not representable ({denom})"
        )));
    }

    let values = (0..=max_lag)
        .map(|lag| {
            if lag == 0 {
                return 1.0;
            }
            let num: f64 = data[lag..]
                .iter()
                .zip(&data[..n - lag])
                .map(|(a, b)| (a - mean) * (b - mean))
                .sum();
            num / denom
        })
        .collect::<Vec<f64>>();

    if let Some(lag) = values.iter().position(|v| !v.is_finite()) {
        return Err(AcfTraderError::invalid_input(format!(
            "autocorrelation at lag {lag} is not finite"
        )));
    }
    Ok(values)
}

/// Ljung-Box test over lags `1..=lags`.
///
/// Needs at least `lags + 2` observations.
pub fn ljung_box(data: &[f64], lags: usize) -> Result<LjungBoxResult, AcfTraderError> {
    if lags == 0 {
        return Err(AcfTraderError::invalid_input(
            "Ljung-Box needs at least one lag",
        ));
    }
    let n = data.len();
    let minimum = lags + 2;
    if n < minimum {
        return Err(AcfTraderError::InsufficientData {
            observations: n,
            minimum,
        });
    }

    let rho = acf(data, lags)?;
    ljung_box_from_acf(&rho, n)
}

/// Ljung-Box from precomputed autocorrelations `rho[0..=h]` of a series of
/// length `n`.
pub fn ljung_box_from_acf(rho: &[f64], n: usize) -> Result<LjungBoxResult, AcfTraderError> {
    let lags = rho.len().saturating_sub(1);
    if lags == 0 || n < lags + 2 {
        return Err(AcfTraderError::InsufficientData {
            observations: n,
            minimum: lags.max(1) + 2,
        });
    }

    let nf = n as f64;
    let statistic = nf
        * (nf + 2.0)
        * rho[1..]
            .iter()
            .enumerate()
            .map(|(i, r)| r * r / (n - (i + 1)) as f64)
            .sum::<f64>();

    if !statistic.is_finite() {
        return Err(AcfTraderError::invalid_input(format!(
            "Ljung-Box statistic is not finite ({statistic})"
        )));
    }

    Ok(LjungBoxResult {
        statistic,
        p_value: chi2_survival(statistic, lags)?,
        lags,
    })
}

fn chi2_survival(x: f64, df: usize) -> Result<f64, AcfTraderError> {
    let dist = ChiSquared::new(df as f64).map_err(|e| {
        AcfTraderError::invalid_input(format!("chi-squared with {df} degrees of freedom: {e}"))
    })?;
    Ok(dist.sf(x).clamp(0.0, 1.0))
}
