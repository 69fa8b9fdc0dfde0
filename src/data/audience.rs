use super::filesystem::{as_number, malformed};
use crate::error::DataLoadError;
use serde::Serialize;
use serde_json::Value;
use std::path::Path;

/// Weights that turn art/commercial appeal into a raw audience size.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct AudienceGroup {
    pub id: String,
    pub label: Option<String>,
    pub base_weight: f64,
    pub art_weight: f64,
    pub commercial_weight: f64,
    pub base_default: f64,
    pub art_default: f64,
    pub commercial_default: f64,
    pub default_share: Option<f64>,
}

impl AudienceGroup {
    pub fn raw_appeal(&self, art: f64, commercial: f64) -> f64 {
        let raw = self.base_weight
            + self.art_weight * art
            + self.commercial_weight * commercial
            + self.base_default
            + self.art_default * art
            + self.commercial_default * commercial;
        raw.max(0.0)
    }
}

pub fn parse_audience_groups(path: &Path, root: &Value) -> Result<Vec<AudienceGroup>, DataLoadError> {
    let groups = root
        .as_object()
        .ok_or_else(|| malformed(path, "expected an object of audience groups"))?;

    groups
        .iter()
        .map(|(id, meta)| -> Result<AudienceGroup, DataLoadError> {
            let fields = meta
                .as_object()
                .ok_or_else(|| malformed(path, format!("audience group {id} is not an object")))?;
            let number = |key: &str| fields.get(key).and_then(as_number).unwrap_or(0.0);
            Ok(AudienceGroup {
                id: id.clone(),
                label: fields
                    .get("label")
                    .and_then(Value::as_str)
                    .map(str::to_string),
                base_weight: number("baseWeight"),
                art_weight: number("artWeight"),
                commercial_weight: number("commercialWeight"),
                base_default: number("baseDefaultAudience"),
                art_default: number("artDefaultAudience"),
                commercial_default: number("comDefaultAudience"),
                default_share: fields
                    .get("defaultShare")
                    .and_then(as_number)
                    .filter(|share| *share >= 0.0),
            })
        })
        .collect()
}
