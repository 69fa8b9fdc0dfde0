use crate::types::score::{AudienceShare, DeltaClass, ScoreMode, ValueTotals};
use serde::Serialize;

#[derive(Debug, Clone, Serialize)]
pub struct SelectedTag {
    pub id: String,
    pub name: String,
    pub category: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct Recommendation {
    pub tag: String,
    pub name: String,
    pub category: String,
    pub next_score: f64,
    pub delta: f64,
    pub class: DeltaClass,
    pub recommended: bool,
}

/// Everything the film-builder panel shows for one selection snapshot.
#[derive(Debug, Clone, Serialize)]
pub struct FilmReport {
    pub generated_at: String,
    pub selected: Vec<SelectedTag>,
    pub raw_score: f64,
    pub score: f64,
    pub max_score: f64,
    pub pairs: usize,
    pub totals: ValueTotals,
    pub audience: Vec<AudienceShare>,
    pub mode: ScoreMode,
    pub recommendations: Vec<Recommendation>,
}

#[derive(Debug, Clone, Serialize)]
pub struct RelatedRow {
    pub tag: String,
    pub name: String,
    pub value: f64,
}
