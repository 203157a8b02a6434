//! Seeded Gaussian return series for demonstrations.
//!
//! The generator is always passed in by the caller; nothing here touches a
//! process-wide RNG.

use rand::distributions::Distribution;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use statrs::distribution::Normal;

use crate::domain::error::AcfTraderError;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SyntheticConfig {
    pub seed: u64,
    pub length: usize,
    pub mean: f64,
    pub std_dev: f64,
}

impl Default for SyntheticConfig {
    fn default() -> Self {
        Self {
            seed: 42,
            length: 100,
            mean: 0.0,
            std_dev: 0.01,
        }
    }
}

pub fn seeded_rng(seed: u64) -> StdRng {
    StdRng::seed_from_u64(seed)
}

pub fn generate_returns<R: Rng + ?Sized>(
    rng: &mut R,
    config: &SyntheticConfig,
) -> Result<Vec<f64>, AcfTraderError> {
    if config.length == 0 {
        return Err(AcfTraderError::invalid_input(
            "synthetic series length must be at least 1",
        ));
    }
    if !config.mean.is_finite() {
        return Err(AcfTraderError::invalid_input(format!(
            "synthetic mean must be finite, got {}",
            config.mean
        )));
    }
    if !(config.std_dev.is_finite() && config.std_dev > 0.0) {
        return Err(AcfTraderError::invalid_input(format!(
            "synthetic std_dev must be positive, got {}",
            config.std_dev
        )));
    }

    let normal = Normal::new(config.mean, config.std_dev)
        .map_err(|e| AcfTraderError::invalid_input(format!("normal distribution: {e}")))?;

    Ok((0..config.length).map(|_| normal.sample(rng)).collect())
}

/// Convenience: seed a fresh generator from `config.seed` and draw.
pub fn generate_seeded(config: &SyntheticConfig) -> Result<Vec<f64>, AcfTraderError> {
    let mut rng = seeded_rng(config.seed);
    generate_returns(&mut rng, config)
}
