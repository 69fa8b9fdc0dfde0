use super::filesystem::{as_number, malformed};
use crate::error::DataLoadError;
use serde_json::Value;
use std::collections::{BTreeSet, HashMap};
use std::path::Path;

/// Symmetric pairwise value table. Every entry is stored under both
/// directions, so `get(a, b) == get(b, a)` for all inputs.
#[derive(Debug, Clone, Default)]
pub struct PairTable {
    values: HashMap<String, HashMap<String, f64>>,
}

impl PairTable {
    pub fn get(&self, a: &str, b: &str) -> Option<f64> {
        self.values.get(a).and_then(|row| row.get(b)).copied()
    }

    pub fn partners(&self, id: &str) -> impl Iterator<Item = (&str, f64)> {
        self.values
            .get(id)
            .into_iter()
            .flat_map(|row| row.iter().map(|(other, value)| (other.as_str(), *value)))
    }

    /// Every tag id that appears on either side of an entry.
    pub fn ids(&self) -> BTreeSet<&str> {
        self.values.keys().map(String::as_str).collect()
    }

    pub fn len(&self) -> usize {
        self.values.values().map(HashMap::len).sum::<usize>() / 2
    }

    pub fn insert(&mut self, a: &str, b: &str, value: f64) {
        let stored = match self.get(a, b) {
            Some(existing) if (existing - value).abs() > f64::EPSILON => {
                let mean = (existing + value) / 2.0;
                tracing::warn!(
                    a,
                    b,
                    existing,
                    value,
                    mean,
                    "asymmetric pair values; storing their mean"
                );
                mean
            }
            _ => value,
        };
        self.values
            .entry(a.to_string())
            .or_default()
            .insert(b.to_string(), stored);
        self.values
            .entry(b.to_string())
            .or_default()
            .insert(a.to_string(), stored);
    }
}

/// Parses `{ a: { b: value } }` into a [`PairTable`]. Values that are not
/// numbers (or numeric strings) and self-pairs are skipped.
pub fn parse_pairs(path: &Path, root: &Value) -> Result<PairTable, DataLoadError> {
    let outer = root
        .as_object()
        .ok_or_else(|| malformed(path, "expected an object of tag objects"))?;

    let mut table = PairTable::default();
    for (a, mapping) in outer {
        let inner = mapping
            .as_object()
            .ok_or_else(|| malformed(path, format!("entry {a} is not an object")))?;
        for (b, raw) in inner {
            if a == b {
                tracing::debug!(tag = %a, "skipping self pair");
                continue;
            }
            match as_number(raw) {
                Some(value) => table.insert(a, b, value),
                None => tracing::warn!(a = %a, b = %b, raw = %raw, "skipping non-numeric pair value"),
            }
        }
    }
    Ok(table)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn path() -> &'static Path {
        Path::new("pairs.json")
    }

    #[test]
    fn parse_skips_non_finite_values() {
        let table = parse_pairs(
            path(),
            &json!({ "ACTION": { "WILD_WEST": "NaN", "COMEDY": "inf", "DRAMA": 2.0 } }),
        )
        .expect("pairs should parse");
        assert_eq!(table.get("ACTION", "WILD_WEST"), None);
        assert_eq!(table.get("COMEDY", "ACTION"), None);
        assert_eq!(table.get("ACTION", "DRAMA"), Some(2.0));
        assert_eq!(table.len(), 1);
    }

    #[test]
    fn parse_normalizes_both_directions() {
        let table = parse_pairs(
            path(),
            &json!({ "ACTION": { "COMEDY": 0.8, "PROTAGONIST_COWBOY": "3.000" } }),
        )
        .expect("pairs should parse");
        assert_eq!(table.get("ACTION", "COMEDY"), Some(0.8));
        assert_eq!(table.get("COMEDY", "ACTION"), Some(0.8));
        assert_eq!(table.get("PROTAGONIST_COWBOY", "ACTION"), Some(3.0));
        assert_eq!(table.len(), 2);
    }

    #[test]
    fn asymmetric_entries_store_mean() {
        let table = parse_pairs(
            path(),
            &json!({ "A": { "B": 2.0 }, "B": { "A": 4.0 } }),
        )
        .expect("pairs should parse");
        assert_eq!(table.get("A", "B"), Some(3.0));
        assert_eq!(table.get("B", "A"), Some(3.0));
    }

    #[test]
    fn unparseable_values_and_self_pairs_are_skipped() {
        let table = parse_pairs(
            path(),
            &json!({ "A": { "A": 5.0, "B": "high", "C": null, "D": 1.5 } }),
        )
        .expect("pairs should parse");
        assert_eq!(table.get("A", "A"), None);
        assert_eq!(table.get("A", "B"), None);
        assert_eq!(table.get("A", "D"), Some(1.5));
    }

    #[test]
    fn non_object_rows_are_malformed() {
        let err = parse_pairs(path(), &json!({ "A": [1, 2] })).expect_err("array row should fail");
        assert!(err.to_string().contains("entry A"));
        assert!(parse_pairs(path(), &json!([])).is_err());
    }
}
