use serde::{Deserialize, Serialize};

/// Which candidate value the film builder displays and ranks by.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ScoreMode {
    #[default]
    Delta,
    Next,
}

/// Maps raw compatibility means onto the game's displayed score range.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ScoreScale {
    pub max_score: f64,
    pub precision: u32,
    pub range: (f64, f64),
}

impl Default for ScoreScale {
    fn default() -> Self {
        Self {
            max_score: 9.9,
            precision: 1,
            range: (1.0, 5.0),
        }
    }
}

impl ScoreScale {
    pub const MAX_PRECISION: u32 = 6;

    /// Normalizes `raw` from the compatibility range into `0..=max_score`,
    /// rounded to `precision` decimals. A selection with no defined pair
    /// (`pairs == 0`) always shows 0.
    pub fn apply(&self, raw: f64, pairs: usize) -> f64 {
        if pairs == 0 {
            return 0.0;
        }
        let (lo, hi) = self.range;
        let span = if hi > lo { hi - lo } else { 4.0 };
        let norm = ((raw - lo) / span).clamp(0.0, 1.0);
        self.round(norm * self.max_score)
    }

    pub fn round(&self, value: f64) -> f64 {
        let factor = 10f64.powi(self.precision.min(Self::MAX_PRECISION) as i32);
        (value * factor).round() / factor
    }
}

/// Mean of the defined pair values of a selection.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct AgnosticScore {
    pub raw: f64,
    pub pairs: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum DeltaClass {
    Strong,
    Good,
    Neutral,
    Poor,
}

impl DeltaClass {
    pub fn marker(self) -> &'static str {
        match self {
            Self::Strong => "++",
            Self::Good => "+",
            Self::Neutral => "~",
            Self::Poor => "--",
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct ValueTotals {
    pub art: f64,
    pub commercial: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AudienceShare {
    pub id: String,
    pub label: String,
    pub percent: f64,
}

/// One not-yet-selected tag and what adding it would do to the score.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Candidate {
    pub tag: String,
    pub next: AgnosticScore,
    pub next_score: f64,
    pub delta: f64,
}

impl Candidate {
    pub fn value(&self, mode: ScoreMode) -> f64 {
        match mode {
            ScoreMode::Delta => self.delta,
            ScoreMode::Next => self.next_score,
        }
    }
}
