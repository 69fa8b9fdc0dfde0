use crate::error::DataLoadError;
use serde_json::Value;
use std::path::Path;

pub fn file_exists(path: &Path) -> bool {
    path.is_file()
}

pub fn read_json(path: &Path) -> Result<Value, DataLoadError> {
    if !file_exists(path) {
        return Err(DataLoadError::MissingFile(path.display().to_string()));
    }
    let content = std::fs::read_to_string(path)?;
    serde_json::from_str(&content).map_err(|e| malformed(path, e.to_string()))
}

/// Like [`read_json`], but a missing file yields `None` instead of an error.
pub fn read_json_if_exists(path: &Path) -> Result<Option<Value>, DataLoadError> {
    if !file_exists(path) {
        return Ok(None);
    }
    read_json(path).map(Some)
}

pub fn malformed(path: &Path, reason: impl Into<String>) -> DataLoadError {
    DataLoadError::Malformed {
        path: path.display().to_string(),
        reason: reason.into(),
    }
}

/// Reads a JSON number or numeric string as a finite `f64`.
pub fn as_number(value: &Value) -> Option<f64> {
    match value {
        Value::Number(number) => number.as_f64(),
        Value::String(text) => text.trim().parse::<f64>().ok(),
        _ => None,
    }
    .filter(|number| number.is_finite())
}
