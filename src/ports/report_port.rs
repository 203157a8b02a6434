//! Report output port trait.

use crate::domain::analysis::AnalysisReport;
use crate::domain::error::AcfTraderError;

/// Port for publishing a finished analysis.
pub trait ReportPort {
    fn write(&self, report: &AnalysisReport) -> Result<(), AcfTraderError>;
}
