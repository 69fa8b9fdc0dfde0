pub mod audience;
pub mod filesystem;
pub mod pairs;
pub mod tags;
pub mod unlocked;
pub mod variables;

use crate::error::DataLoadError;
use crate::types::config::CompatConfig;
use crate::types::score::ScoreScale;
use crate::types::tag::Tag;
use audience::AudienceGroup;
use filesystem::{read_json, read_json_if_exists};
use pairs::PairTable;
use std::collections::{BTreeMap, BTreeSet, HashSet};
use std::path::Path;

/// Immutable reference data loaded once at startup and borrowed by the
/// calculator and the presentation layer.
#[derive(Debug, Clone)]
pub struct ReferenceData {
    tags: BTreeMap<String, Tag>,
    by_category: BTreeMap<String, Vec<String>>,
    categories: Vec<String>,
    compatibility: PairTable,
    genre_pairs: PairTable,
    audience_groups: Vec<AudienceGroup>,
    manual_unlocked: BTreeSet<String>,
    scale: ScoreScale,
}

pub fn load(root: &Path, config: &CompatConfig) -> Result<ReferenceData, DataLoadError> {
    let files = config.data();
    let dir = config.data_dir(root);

    let compat_path = dir.join(&files.compatibility);
    let tags_path = dir.join(&files.tags);
    let audience_path = dir.join(&files.audiences);
    let genre_path = dir.join(&files.genre_pairs);
    let variables_path = dir.join(&files.variables);
    let manual_path = root.join(&files.manual_unlocked);

    let tag_meta = tags::parse_tag_meta(&tags_path, read_json(&tags_path)?)?;
    let compatibility = pairs::parse_pairs(&compat_path, &read_json(&compat_path)?)?;
    let genre_pairs = pairs::parse_pairs(&genre_path, &read_json(&genre_path)?)?;
    let audience_groups =
        audience::parse_audience_groups(&audience_path, &read_json(&audience_path)?)?;

    let variables = match read_json_if_exists(&variables_path) {
        Ok(value) => value,
        Err(err) => {
            tracing::debug!(error = %err, "game variables unreadable; using default score scale");
            None
        }
    };
    let scale = variables::apply_overrides(
        variables::parse_score_scale(variables.as_ref()),
        config.scoring.as_ref(),
    );

    let manual_unlocked = match read_json_if_exists(&manual_path)? {
        Some(value) => unlocked::parse_manual_unlocked(&manual_path, &value)?,
        None => BTreeSet::new(),
    };

    let genre_tags = config.genre_tags();
    let start_conditions = config.start_conditions();
    let mut tags = BTreeMap::new();

    for (id, meta) in &tag_meta {
        let category = tags::resolve_category(id, Some(meta), &genre_tags)
            .ok_or_else(|| DataLoadError::UnknownCategory(id.clone()))?;
        tags.insert(
            id.clone(),
            Tag {
                id: id.clone(),
                category,
                art_value: meta.art(),
                commercial_value: meta.commercial(),
                start_unlocked: meta.is_start_unlocked(&start_conditions),
            },
        );
    }

    for (table, file) in [
        (&compatibility, &files.compatibility),
        (&genre_pairs, &files.genre_pairs),
    ] {
        for id in table.ids() {
            if tags.contains_key(id) {
                continue;
            }
            let category = tags::resolve_category(id, None, &genre_tags).ok_or_else(|| {
                DataLoadError::UndefinedTag {
                    file: file.clone(),
                    tag: id.to_string(),
                }
            })?;
            tracing::debug!(tag = id, category = %category, "tag defined by prefix only");
            tags.insert(
                id.to_string(),
                Tag {
                    id: id.to_string(),
                    category,
                    art_value: 0.0,
                    commercial_value: 0.0,
                    start_unlocked: false,
                },
            );
        }
    }

    for id in genre_pairs.ids() {
        if !tags.get(id).is_some_and(Tag::is_genre) {
            return Err(DataLoadError::NotGenre {
                file: files.genre_pairs.clone(),
                tag: id.to_string(),
            });
        }
    }

    let mut by_category: BTreeMap<String, Vec<String>> = BTreeMap::new();
    for tag in tags.values() {
        by_category
            .entry(tag.category.clone())
            .or_default()
            .push(tag.id.clone());
    }
    let categories = order_categories(by_category.keys(), &config.display_order());

    tracing::info!(
        tags = tags.len(),
        categories = categories.len(),
        pairs = compatibility.len(),
        genre_pairs = genre_pairs.len(),
        audience_groups = audience_groups.len(),
        dir = %dir.display(),
        "reference data loaded"
    );

    Ok(ReferenceData {
        tags,
        by_category,
        categories,
        compatibility,
        genre_pairs,
        audience_groups,
        manual_unlocked,
        scale,
    })
}

/// Configured display order first, then every remaining category alphabetically.
fn order_categories<'a>(
    present: impl Iterator<Item = &'a String>,
    display_order: &[String],
) -> Vec<String> {
    let present: BTreeSet<&String> = present.collect();
    let mut seen = HashSet::new();
    let mut ordered = Vec::new();
    for category in display_order {
        if present.contains(category) && seen.insert(category.clone()) {
            ordered.push(category.clone());
        }
    }
    for category in present {
        if seen.insert(category.clone()) {
            ordered.push(category.clone());
        }
    }
    ordered
}

impl ReferenceData {
    pub fn tag(&self, id: &str) -> Option<&Tag> {
        self.tags.get(id)
    }

    #[cfg(test)]
    pub fn tag_count(&self) -> usize {
        self.tags.len()
    }

    /// Categories in display order.
    pub fn categories(&self) -> &[String] {
        &self.categories
    }

    /// Tag ids of a category, sorted.
    pub fn tags_in(&self, category: &str) -> &[String] {
        self.by_category
            .get(category)
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    pub fn compatibility(&self, a: &str, b: &str) -> Option<f64> {
        self.compatibility.get(a, b)
    }

    pub fn genre_pair(&self, a: &str, b: &str) -> Option<f64> {
        self.genre_pairs.get(a, b)
    }

    /// Compatibility partners of a tag, highest value first, ties by id.
    pub fn related(&self, id: &str) -> Vec<(&str, f64)> {
        let mut rows: Vec<(&str, f64)> = self.compatibility.partners(id).collect();
        rows.sort_by(|a, b| b.1.total_cmp(&a.1).then_with(|| a.0.cmp(b.0)));
        rows
    }

    pub fn audience_groups(&self) -> &[AudienceGroup] {
        &self.audience_groups
    }

    /// Start-of-game tags plus the manually unlocked list.
    pub fn is_unlocked(&self, id: &str) -> bool {
        self.manual_unlocked.contains(id) || self.tag(id).is_some_and(|tag| tag.start_unlocked)
    }

    pub fn scale(&self) -> ScoreScale {
        self.scale
    }
}


#[cfg(test)]
mod tests {
    use super::fixtures::{dataset, reference, write_file};
    use super::*;
    use std::fs;

    #[test]
    fn load_resolves_categories_and_values() {
        let data = reference();
        assert_eq!(data.tag_count(), 6);
        assert_eq!(data.tag("ACTION").map(|t| t.category.as_str()), Some("Genre"));
        assert_eq!(
            data.tag("PROTAGONIST_COWBOY").map(|t| t.category.as_str()),
            Some("Protagonist")
        );
        assert_eq!(data.tag("WILD_WEST").map(|t| t.art_value), Some(0.5));
        assert_eq!(
            data.tag("THEME_REVENGE").map(|t| t.category.as_str()),
            Some("Theme")
        );
        assert_eq!(data.scale().max_score, 10.0);
    }

    #[test]
    fn categories_follow_display_order() {
        let data = reference();
        assert_eq!(
            data.categories(),
            &["Genre", "Setting", "Protagonist", "Theme"].map(String::from)
        );
        assert_eq!(data.tags_in("Genre"), &["ACTION", "COMEDY", "DRAMA"].map(String::from));
        assert!(data.tags_in("Finale").is_empty());
    }

    #[test]
    fn compatibility_lookup_is_symmetric() {
        let data = reference();
        let ids: Vec<String> = data.tags.keys().cloned().collect();
        for a in &ids {
            for b in &ids {
                assert_eq!(data.compatibility(a, b), data.compatibility(b, a));
                assert_eq!(data.genre_pair(a, b), data.genre_pair(b, a));
            }
        }
        assert_eq!(data.compatibility("WILD_WEST", "ACTION"), Some(3.5));
        assert_eq!(data.genre_pair("COMEDY", "ACTION"), Some(0.6));
    }

    #[test]
    fn related_sorts_by_value_then_id() {
        let data = reference();
        let related = data.related("ACTION");
        let ids: Vec<&str> = related.iter().map(|(id, _)| *id).collect();
        assert_eq!(ids, vec!["PROTAGONIST_COWBOY", "WILD_WEST", "DRAMA", "COMEDY"]);
        assert!(data.related("UNKNOWN").is_empty());
    }

    #[test]
    fn unlocked_combines_start_and_manual_tags() {
        let dir = dataset();
        fs::write(dir.path().join("ManualUnlocked.json"), r#"["DRAMA"]"#)
            .expect("manual unlock list should write");
        let data = load(dir.path(), &CompatConfig::default()).expect("data should load");
        assert!(data.is_unlocked("ACTION"));
        assert!(data.is_unlocked("COMEDY"));
        assert!(data.is_unlocked("DRAMA"));
        assert!(!data.is_unlocked("THEME_REVENGE"));
    }

    #[test]
    fn missing_required_file_fails() {
        let dir = dataset();
        fs::remove_file(dir.path().join("Data/Configs/GenrePairs.json"))
            .expect("genre pairs should be removable");
        let err = load(dir.path(), &CompatConfig::default()).expect_err("load should fail");
        assert!(matches!(err, DataLoadError::MissingFile(_)));
        assert!(err.to_string().contains("GenrePairs.json"));
    }

    #[test]
    fn missing_game_variables_uses_default_scale() {
        let dir = dataset();
        fs::remove_file(dir.path().join("Data/Configs/GameVariables.json"))
            .expect("variables should be removable");
        let data = load(dir.path(), &CompatConfig::default()).expect("data should load");
        assert_eq!(data.scale(), ScoreScale::default());
    }

    #[test]
    fn malformed_file_fails() {
        let dir = dataset();
        write_file(dir.path(), "AudienceGroups.json", "[1, 2");
        let err = load(dir.path(), &CompatConfig::default()).expect_err("load should fail");
        assert!(matches!(err, DataLoadError::Malformed { .. }));
    }

    #[test]
    fn dangling_compatibility_reference_fails() {
        let dir = dataset();
        write_file(
            dir.path(),
            "TagCompatibilityData.json",
            r#"{ "ACTION": { "MYSTERY_BOX": 3.0 } }"#,
        );
        let err = load(dir.path(), &CompatConfig::default()).expect_err("load should fail");
        match err {
            DataLoadError::UndefinedTag { tag, .. } => assert_eq!(tag, "MYSTERY_BOX"),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn prefixed_tags_without_metadata_are_defined() {
        let dir = dataset();
        write_file(
            dir.path(),
            "TagCompatibilityData.json",
            r#"{ "ACTION": { "FINALE_SHOOTOUT": 4.0 } }"#,
        );
        let data = load(dir.path(), &CompatConfig::default()).expect("data should load");
        assert_eq!(
            data.tag("FINALE_SHOOTOUT").map(|t| t.category.as_str()),
            Some("Finale")
        );
    }

    #[test]
    fn genre_pair_with_non_genre_tag_fails() {
        let dir = dataset();
        write_file(
            dir.path(),
            "GenrePairs.json",
            r#"{ "ACTION": { "WILD_WEST": 1.0 } }"#,
        );
        let err = load(dir.path(), &CompatConfig::default()).expect_err("load should fail");
        assert!(matches!(err, DataLoadError::NotGenre { .. }));
    }

    #[test]
    fn unknown_category_fails() {
        let dir = dataset();
        write_file(dir.path(), "TagData.json", r#"{ "MYSTERY": { "category": 3 } }"#);
        write_file(dir.path(), "TagCompatibilityData.json", "{}");
        write_file(dir.path(), "GenrePairs.json", "{}");
        let err = load(dir.path(), &CompatConfig::default()).expect_err("load should fail");
        assert!(matches!(err, DataLoadError::UnknownCategory(id) if id == "MYSTERY"));
    }
}
