use super::filesystem::{as_number, malformed};
use crate::error::DataLoadError;
use crate::types::tag::{category_from_code, category_from_prefix, GENRE_CATEGORY};
use serde::Deserialize;
use serde_json::Value;
use std::collections::{BTreeMap, HashSet};
use std::path::Path;

/// One `TagData.json` entry, as loosely typed as the game files are.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct TagMeta {
    #[serde(rename = "CategoryID")]
    pub category_id: Option<String>,
    pub category: Option<Value>,
    #[serde(rename = "artValue")]
    pub art_value: Option<Value>,
    #[serde(rename = "commercialValue")]
    pub commercial_value: Option<Value>,
    pub parameters: Option<TagParameters>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct TagParameters {
    #[serde(rename = "Condition")]
    pub condition: Option<String>,
}

impl TagMeta {
    pub fn art(&self) -> f64 {
        self.art_value.as_ref().and_then(as_number).unwrap_or(0.0)
    }

    pub fn commercial(&self) -> f64 {
        self.commercial_value
            .as_ref()
            .and_then(as_number)
            .unwrap_or(0.0)
    }

    pub fn condition(&self) -> Option<&str> {
        self.parameters
            .as_ref()
            .and_then(|parameters| parameters.condition.as_deref())
    }

    /// True when the unlock condition matches one of the start-of-game markers.
    pub fn is_start_unlocked(&self, start_conditions: &[String]) -> bool {
        self.condition().is_some_and(|condition| {
            start_conditions
                .iter()
                .any(|marker| condition.contains(marker.as_str()))
        })
    }
}

pub fn parse_tag_meta(path: &Path, root: Value) -> Result<BTreeMap<String, TagMeta>, DataLoadError> {
    serde_json::from_value(root).map_err(|e| malformed(path, e.to_string()))
}

/// Resolves the category of a tag id. Genre overrides come first, then a
/// known id prefix, then the `CategoryID` string and the numeric code.
pub fn resolve_category(
    id: &str,
    meta: Option<&TagMeta>,
    genre_tags: &HashSet<String>,
) -> Option<String> {
    if genre_tags.contains(id) {
        return Some(GENRE_CATEGORY.to_string());
    }
    if let Some(category) = category_from_prefix(id) {
        return Some(category.to_string());
    }
    let meta = meta?;
    if let Some(name) = meta.category_id.as_deref().map(str::trim) {
        if !name.is_empty() {
            return Some(name.to_string());
        }
    }
    meta.category
        .as_ref()
        .and_then(Value::as_i64)
        .and_then(category_from_code)
        .map(str::to_string)
}
