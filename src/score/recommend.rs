use super::agnostic::{agnostic_score, distinct};
use crate::data::ReferenceData;
use crate::types::config::DeltaThresholds;
use crate::types::score::{Candidate, DeltaClass, ScoreMode};
use std::cmp::Ordering;
use std::collections::BTreeSet;

/// Which tags are offered as next picks.
#[derive(Debug, Clone, Default)]
pub struct CandidateFilter {
    pub query: Option<String>,
    pub unlocked_only: bool,
    pub extra_unlocked: BTreeSet<String>,
}

impl CandidateFilter {
    pub fn is_unlocked(&self, data: &ReferenceData, id: &str) -> bool {
        self.extra_unlocked.contains(id) || data.is_unlocked(id)
    }

    pub fn matches(&self, data: &ReferenceData, id: &str) -> bool {
        let query_ok = match self.query.as_deref().map(str::trim) {
            Some(query) if !query.is_empty() => {
                id.to_lowercase().contains(&query.to_lowercase())
            }
            _ => true,
        };
        query_ok && (!self.unlocked_only || self.is_unlocked(data, id))
    }
}

/// Scores every visible, not-yet-selected tag as the next pick. Both the
/// next score and the delta are on the displayed (scaled) score.
pub fn candidates<S: AsRef<str>>(
    data: &ReferenceData,
    selection: &[S],
    filter: &CandidateFilter,
) -> Vec<Candidate> {
    let scale = data.scale();
    let selected = distinct(selection);
    let current = agnostic_score(data, selected.as_slice());
    let current_score = scale.apply(current.raw, current.pairs);

    let mut next_selection: Vec<&str> = selected.clone();
    next_selection.push("");
    let slot = next_selection.len() - 1;

    let mut out = Vec::new();
    for category in data.categories() {
        for id in data.tags_in(category) {
            if selected.contains(&id.as_str()) || !filter.matches(data, id) {
                continue;
            }
            next_selection[slot] = id.as_str();
            let next = agnostic_score(data, next_selection.as_slice());
            let next_score = scale.apply(next.raw, next.pairs);
            out.push(Candidate {
                tag: id.clone(),
                next,
                next_score,
                delta: scale.round(next_score - current_score),
            });
        }
    }
    tracing::debug!(
        selected = selected.len(),
        candidates = out.len(),
        current = current_score,
        "candidates scored"
    );
    out
}

/// Sorts candidates descending by the value shown in `mode`; ties fall back
/// to the raw next score, then the tag id.
pub fn rank(candidates: &mut [Candidate], mode: ScoreMode) {
    candidates.sort_by(|a, b| compare(a, b, mode));
}

fn compare(a: &Candidate, b: &Candidate, mode: ScoreMode) -> Ordering {
    b.value(mode)
        .total_cmp(&a.value(mode))
        .then_with(|| b.next.raw.total_cmp(&a.next.raw))
        .then_with(|| a.tag.cmp(&b.tag))
}

/// The candidate with the highest next score.
pub fn best(candidates: &[Candidate]) -> Option<&Candidate> {
    candidates
        .iter()
        .min_by(|a, b| compare(a, b, ScoreMode::Next))
}

/// Buckets a delta relative to the largest positive delta on offer.
pub fn classify(delta: f64, max_positive: f64, thresholds: DeltaThresholds) -> DeltaClass {
    if delta > 0.0 {
        if max_positive > 0.0 && delta >= thresholds.strong_ratio * max_positive {
            DeltaClass::Strong
        } else {
            DeltaClass::Good
        }
    } else if delta >= thresholds.poor_floor {
        DeltaClass::Neutral
    } else {
        DeltaClass::Poor
    }
}

pub fn max_positive_delta(candidates: &[Candidate]) -> f64 {
    candidates
        .iter()
        .map(|candidate| candidate.delta)
        .fold(0.0, f64::max)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::fixtures::reference;

    fn ids(candidates: &[Candidate]) -> Vec<&str> {
        candidates.iter().map(|c| c.tag.as_str()).collect()
    }

    #[test]
    fn candidates_skip_selected_tags() {
        let data = reference();
        let found = candidates(&data, &["ACTION"], &CandidateFilter::default());
        assert_eq!(found.len(), 5);
        assert!(!ids(&found).contains(&"ACTION"));
    }

    #[test]
    fn next_score_and_delta_use_displayed_scale() {
        let data = reference();
        let found = candidates(&data, &["ACTION"], &CandidateFilter::default());
        let cowboy = found
            .iter()
            .find(|c| c.tag == "PROTAGONIST_COWBOY")
            .expect("cowboy should be a candidate");
        // raw 4.0 on range 1..5 scaled to 10 -> 7.5
        assert_eq!(cowboy.next_score, 7.5);
        assert_eq!(cowboy.delta, 7.5);

        let found = candidates(&data, &["ACTION", "PROTAGONIST_COWBOY"], &CandidateFilter::default());
        let west = found
            .iter()
            .find(|c| c.tag == "WILD_WEST")
            .expect("wild west should be a candidate");
        // mean (4.0 + 3.5 + 5.0) / 3 -> 7.9
        assert_eq!(west.next_score, 7.9);
        assert_eq!(west.delta, 0.4);
    }

    #[test]
    fn rank_orders_by_mode_value() {
        let data = reference();
        let mut found = candidates(&data, &["ACTION", "PROTAGONIST_COWBOY"], &CandidateFilter::default());
        rank(&mut found, ScoreMode::Delta);
        assert_eq!(found[0].tag, "WILD_WEST");
        for window in found.windows(2) {
            assert!(window[0].delta >= window[1].delta);
        }
        rank(&mut found, ScoreMode::Next);
        for window in found.windows(2) {
            assert!(window[0].next_score >= window[1].next_score);
        }
    }

    #[test]
    fn best_picks_highest_next_score() {
        let data = reference();
        let found = candidates(&data, &["ACTION"], &CandidateFilter::default());
        assert_eq!(best(&found).map(|c| c.tag.as_str()), Some("PROTAGONIST_COWBOY"));
        assert!(best(&[]).is_none());
    }

    #[test]
    fn filter_applies_query_and_unlocks() {
        let data = reference();
        let query = CandidateFilter {
            query: Some("west".to_string()),
            ..CandidateFilter::default()
        };
        assert_eq!(ids(&candidates(&data, &["ACTION"], &query)), vec!["WILD_WEST"]);

        let mut unlocked = CandidateFilter {
            unlocked_only: true,
            ..CandidateFilter::default()
        };
        let visible = candidates(&data, &["ACTION"], &unlocked);
        assert!(!ids(&visible).contains(&"DRAMA"));
        assert!(!ids(&visible).contains(&"THEME_REVENGE"));

        unlocked.extra_unlocked.insert("DRAMA".to_string());
        assert!(ids(&candidates(&data, &["ACTION"], &unlocked)).contains(&"DRAMA"));
    }

    #[test]
    fn classify_buckets_deltas() {
        let thresholds = DeltaThresholds::default();
        assert_eq!(classify(1.0, 1.0, thresholds), DeltaClass::Strong);
        assert_eq!(classify(0.5, 1.0, thresholds), DeltaClass::Good);
        assert_eq!(classify(0.0, 1.0, thresholds), DeltaClass::Neutral);
        assert_eq!(classify(-0.9, 1.0, thresholds), DeltaClass::Neutral);
        assert_eq!(classify(-1.2, 1.0, thresholds), DeltaClass::Poor);
    }

    #[test]
    fn max_positive_delta_ignores_negatives() {
        let data = reference();
        let found = candidates(&data, &["ACTION", "PROTAGONIST_COWBOY"], &CandidateFilter::default());
        assert_eq!(max_positive_delta(&found), 0.4);
        assert_eq!(max_positive_delta(&[]), 0.0);
    }
}
