//! Report output port trait.

use std::path::Path;

use crate::domain::error::PricelabError;
use crate::domain::pipeline::AnalysisReport;

/// Port for serializing an analysis report's tables.
pub trait ReportPort {
    fn write(&self, report: &AnalysisReport, output_dir: &Path) -> Result<(), PricelabError>;
}
