use crate::error::CompatError;
use crate::types::score::{ScoreMode, ScoreScale};
use serde::Deserialize;
use std::collections::{HashMap, HashSet};
use std::path::{Path, PathBuf};

pub const DEFAULT_GENRE_TAGS: [&str; 11] = [
    "DRAMA",
    "COMEDY",
    "ACTION",
    "ROMANCE",
    "DETECTIVE",
    "ADVENTURE",
    "THRILLER",
    "HISTORICAL",
    "HORROR",
    "SCIENCE_FICTION",
    "SLAPSTICK_COMEDY",
];

pub const DEFAULT_DISPLAY_ORDER: [&str; 8] = [
    "Genre",
    "Setting",
    "Protagonist",
    "Antagonist",
    "SupportingCharacter",
    "Theme",
    "Events",
    "Finale",
];

pub const DEFAULT_AUDIENCE_ORDER: [(&str, &str); 6] = [
    ("AF", "Adult Female"),
    ("AM", "Adult Male"),
    ("TF", "Teen Female"),
    ("TM", "Teen Male"),
    ("YF", "Young Female"),
    ("YM", "Young Male"),
];

pub const DEFAULT_START_CONDITIONS: [&str; 2] = ["DATE:>=01-01-1929", "DATE:>=1929"];

/// Deserialized form of `tagcompat.toml` after the global/repo/local merge.
/// Every section is optional; accessors fall back to built-in defaults.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CompatConfig {
    pub data: Option<DataConfig>,
    pub categories: Option<CategoriesConfig>,
    pub scoring: Option<ScoringConfig>,
    pub display: Option<DisplayConfig>,
    pub audience: Option<AudienceConfig>,
    pub unlock: Option<UnlockConfig>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct DataConfig {
    #[serde(default = "default_data_dir")]
    pub dir: String,
    #[serde(default = "default_compatibility_file")]
    pub compatibility: String,
    #[serde(default = "default_tags_file")]
    pub tags: String,
    #[serde(default = "default_audiences_file")]
    pub audiences: String,
    #[serde(default = "default_genre_pairs_file")]
    pub genre_pairs: String,
    #[serde(default = "default_variables_file")]
    pub variables: String,
    #[serde(default = "default_manual_unlocked_file")]
    pub manual_unlocked: String,
}

impl Default for DataConfig {
    fn default() -> Self {
        Self {
            dir: default_data_dir(),
            compatibility: default_compatibility_file(),
            tags: default_tags_file(),
            audiences: default_audiences_file(),
            genre_pairs: default_genre_pairs_file(),
            variables: default_variables_file(),
            manual_unlocked: default_manual_unlocked_file(),
        }
    }
}

fn default_data_dir() -> String {
    "Data/Configs".to_string()
}

fn default_compatibility_file() -> String {
    "TagCompatibilityData.json".to_string()
}

fn default_tags_file() -> String {
    "TagData.json".to_string()
}

fn default_audiences_file() -> String {
    "AudienceGroups.json".to_string()
}

fn default_genre_pairs_file() -> String {
    "GenrePairs.json".to_string()
}

fn default_variables_file() -> String {
    "GameVariables.json".to_string()
}

fn default_manual_unlocked_file() -> String {
    "ManualUnlocked.json".to_string()
}

#[derive(Debug, Clone, Deserialize)]
pub struct CategoriesConfig {
    pub genre_tags: Option<Vec<String>>,
    pub display_order: Option<Vec<String>>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ScoringConfig {
    pub max_score: Option<f64>,
    pub precision: Option<u32>,
    pub range_min: Option<f64>,
    pub range_max: Option<f64>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct DisplayConfig {
    pub mode: Option<ScoreMode>,
    pub recommendations: Option<usize>,
    #[serde(default)]
    pub unlocked_only: bool,
    pub strong_delta_ratio: Option<f64>,
    pub poor_delta_floor: Option<f64>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct AudienceConfig {
    pub order: Option<Vec<String>>,
    pub labels: Option<HashMap<String, String>>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct UnlockConfig {
    #[serde(default)]
    pub start_conditions: Vec<String>,
}

/// Display thresholds for classifying candidate deltas.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DeltaThresholds {
    pub strong_ratio: f64,
    pub poor_floor: f64,
}

impl Default for DeltaThresholds {
    fn default() -> Self {
        Self {
            strong_ratio: 0.66,
            poor_floor: -0.9,
        }
    }
}

impl CompatConfig {
    pub fn data(&self) -> DataConfig {
        self.data.clone().unwrap_or_default()
    }

    pub fn data_dir(&self, root: &Path) -> PathBuf {
        root.join(self.data().dir)
    }

    pub fn genre_tags(&self) -> HashSet<String> {
        match self
            .categories
            .as_ref()
            .and_then(|categories| categories.genre_tags.as_ref())
        {
            Some(tags) => tags.iter().map(|tag| tag.trim().to_string()).collect(),
            None => DEFAULT_GENRE_TAGS.iter().map(|tag| tag.to_string()).collect(),
        }
    }

    pub fn display_order(&self) -> Vec<String> {
        match self
            .categories
            .as_ref()
            .and_then(|categories| categories.display_order.as_ref())
        {
            Some(order) => order.clone(),
            None => DEFAULT_DISPLAY_ORDER.iter().map(|c| c.to_string()).collect(),
        }
    }

    pub fn score_mode(&self) -> ScoreMode {
        self.display
            .as_ref()
            .and_then(|display| display.mode)
            .unwrap_or_default()
    }

    pub fn recommendation_limit(&self) -> usize {
        self.display
            .as_ref()
            .and_then(|display| display.recommendations)
            .unwrap_or(10)
    }

    pub fn unlocked_only(&self) -> bool {
        self.display
            .as_ref()
            .map(|display| display.unlocked_only)
            .unwrap_or(false)
    }

    pub fn delta_thresholds(&self) -> DeltaThresholds {
        let defaults = DeltaThresholds::default();
        match &self.display {
            Some(display) => DeltaThresholds {
                strong_ratio: display.strong_delta_ratio.unwrap_or(defaults.strong_ratio),
                poor_floor: display.poor_delta_floor.unwrap_or(defaults.poor_floor),
            },
            None => defaults,
        }
    }

    pub fn audience_order(&self) -> Vec<String> {
        match self.audience.as_ref().and_then(|audience| audience.order.as_ref()) {
            Some(order) => order.clone(),
            None => DEFAULT_AUDIENCE_ORDER
                .iter()
                .map(|(id, _)| id.to_string())
                .collect(),
        }
    }

    pub fn audience_labels(&self) -> HashMap<String, String> {
        let mut labels: HashMap<String, String> = DEFAULT_AUDIENCE_ORDER
            .iter()
            .map(|(id, label)| (id.to_string(), label.to_string()))
            .collect();
        if let Some(configured) = self.audience.as_ref().and_then(|a| a.labels.as_ref()) {
            labels.extend(configured.clone());
        }
        labels
    }

    pub fn start_conditions(&self) -> Vec<String> {
        match &self.unlock {
            Some(unlock) if !unlock.start_conditions.is_empty() => unlock.start_conditions.clone(),
            _ => DEFAULT_START_CONDITIONS
                .iter()
                .map(|c| c.to_string())
                .collect(),
        }
    }

    pub fn validate(&self) -> Result<(), CompatError> {
        if let Some(scoring) = &self.scoring {
            if let (Some(lo), Some(hi)) = (scoring.range_min, scoring.range_max) {
                if hi <= lo {
                    return Err(CompatError::ConfigParse(format!(
                        "scoring.range_max must be greater than scoring.range_min (found {lo} and {hi})"
                    )));
                }
            }
            if let Some(precision) = scoring.precision {
                if precision > ScoreScale::MAX_PRECISION {
                    return Err(CompatError::ConfigParse(
                        "scoring.precision must be between 0 and 6".to_string(),
                    ));
                }
            }
            if let Some(max_score) = scoring.max_score {
                if max_score <= 0.0 {
                    return Err(CompatError::ConfigParse(
                        "scoring.max_score must be greater than 0".to_string(),
                    ));
                }
            }
        }

        if let Some(display) = &self.display {
            if display.recommendations == Some(0) {
                return Err(CompatError::ConfigParse(
                    "display.recommendations must be greater than 0".to_string(),
                ));
            }
            if let Some(ratio) = display.strong_delta_ratio {
                if !(ratio > 0.0 && ratio <= 1.0) {
                    return Err(CompatError::ConfigParse(
                        "display.strong_delta_ratio must be in (0.0, 1.0]".to_string(),
                    ));
                }
            }
        }

        if let Some(tags) = self
            .categories
            .as_ref()
            .and_then(|categories| categories.genre_tags.as_ref())
        {
            if tags.iter().any(|tag| tag.trim().is_empty()) {
                return Err(CompatError::ConfigParse(
                    "categories.genre_tags entries must be non-empty tag ids".to_string(),
                ));
            }
        }

        Ok(())
    }
}
