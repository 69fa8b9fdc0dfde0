pub mod browser;
pub mod json;
pub mod md;

use crate::error::CompatError;
use crate::types::report::FilmReport;

#[derive(Debug, Clone, Copy)]
pub enum OutputFormat {
    Json,
    Md,
}

pub fn render(report: &FilmReport, format: OutputFormat) -> Result<String, CompatError> {
    match format {
        OutputFormat::Json => json::to_json(report).map_err(CompatError::Json),
        OutputFormat::Md => Ok(md::to_markdown(report)),
    }
}
