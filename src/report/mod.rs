pub mod json;
pub mod md;

use crate::error::TrendError;
use crate::types::report::BatchReport;

#[derive(Debug, Clone, Copy)]
pub enum OutputFormat {
    Json,
    Md,
}

pub fn render(report: &BatchReport, format: OutputFormat) -> Result<String, TrendError> {
    match format {
        OutputFormat::Json => json::to_json(report).map_err(TrendError::Json),
        OutputFormat::Md => Ok(md::to_markdown(report)),
    }
}
