use serde::Serialize;

pub const GENRE_CATEGORY: &str = "Genre";

/// Id prefixes that carry their category, with the normalized category name.
pub const CATEGORY_PREFIXES: [(&str, &str); 6] = [
    ("PROTAGONIST_", "Protagonist"),
    ("ANTAGONIST_", "Antagonist"),
    ("SUPPORTINGCHARACTER_", "SupportingCharacter"),
    ("THEME_", "Theme"),
    ("EVENTS_", "Events"),
    ("FINALE_", "Finale"),
];

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Tag {
    pub id: String,
    pub category: String,
    pub art_value: f64,
    pub commercial_value: f64,
    pub start_unlocked: bool,
}

impl Tag {
    pub fn is_genre(&self) -> bool {
        self.category == GENRE_CATEGORY
    }
}

/// Display name for a tag id: the category prefix is stripped and
/// underscores become spaces.
pub fn pretty_tag_name(id: &str) -> String {
    let stripped = CATEGORY_PREFIXES
        .iter()
        .find_map(|(prefix, _)| id.strip_prefix(prefix))
        .unwrap_or(id);
    stripped.replace('_', " ")
}

pub fn pretty_category_name(category: &str) -> &str {
    match category {
        "SupportingCharacter" => "Supporting Character",
        other => other,
    }
}

pub fn category_from_prefix(id: &str) -> Option<&'static str> {
    CATEGORY_PREFIXES
        .iter()
        .find(|(prefix, _)| id.starts_with(prefix))
        .map(|(_, category)| *category)
}

pub fn category_from_code(code: i64) -> Option<&'static str> {
    match code {
        1 => Some("Setting"),
        2 => Some("Protagonist"),
        4 => Some("SupportingCharacter"),
        8 => Some("Antagonist"),
        16 | 32 => Some("Theme"),
        _ => None,
    }
}
