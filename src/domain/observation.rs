//! Dated series observation, one row of a loaded series.

use chrono::NaiveDate;

use crate::domain::error::AcfTraderError;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Observation {
    pub date: NaiveDate,
    pub value: f64,
}

/// Values in date order. Fails on a repeated date.
pub fn ordered_values(observations: &[Observation]) -> Result<Vec<f64>, AcfTraderError> {
    let mut sorted = observations.to_vec();
    sorted.sort_by_key(|o| o.date);

    if let Some(pair) = sorted.windows(2).find(|w| w[0].date == w[1].date) {
        return Err(AcfTraderError::DataSource {
            reason: format!("duplicate observation for {}", pair[0].date),
        });
    }

    Ok(sorted.into_iter().map(|o| o.value).collect())
}
