//! Series source port trait.

use crate::domain::error::AcfTraderError;
use crate::domain::observation::Observation;

pub trait DataPort {
    /// All observations of a named series, in source order.
    fn fetch_series(&self, name: &str) -> Result<Vec<Observation>, AcfTraderError>;

    /// Names of the series this source can provide, sorted.
    fn list_series(&self) -> Result<Vec<String>, AcfTraderError>;
}
