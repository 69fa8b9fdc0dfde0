use super::filesystem::malformed;
use crate::error::DataLoadError;
use serde_json::Value;
use std::collections::BTreeSet;
use std::path::Path;

/// Parses the manually unlocked tag list (`["TAG", ...]`).
pub fn parse_manual_unlocked(path: &Path, root: &Value) -> Result<BTreeSet<String>, DataLoadError> {
    let items = root
        .as_array()
        .ok_or_else(|| malformed(path, "expected an array of tag ids"))?;
    Ok(items
        .iter()
        .map(|item| match item {
            Value::String(text) => text.clone(),
            other => other.to_string(),
        })
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn parses_string_list() {
        let set = parse_manual_unlocked(Path::new("m.json"), &json!(["B", "A", "B"]))
            .expect("list should parse");
        assert_eq!(set.into_iter().collect::<Vec<_>>(), vec!["A", "B"]);
    }

    #[test]
    fn rejects_objects() {
        assert!(parse_manual_unlocked(Path::new("m.json"), &json!({ "A": true })).is_err());
    }
}
