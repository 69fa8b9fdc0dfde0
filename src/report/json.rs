use crate::types::report::FilmReport;

pub fn to_json(report: &FilmReport) -> Result<String, serde_json::Error> {
    serde_json::to_string_pretty(report)
}
