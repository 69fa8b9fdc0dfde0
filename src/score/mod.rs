pub mod agnostic;
pub mod audience;
pub mod recommend;

use crate::data::ReferenceData;
use crate::types::config::{CompatConfig, DeltaThresholds};
use crate::types::report::{FilmReport, Recommendation, SelectedTag};
use crate::types::score::ScoreMode;
use crate::types::tag::pretty_tag_name;
use audience::AudienceLayout;
use chrono::Utc;
use recommend::CandidateFilter;

/// Presentation choices for a film-builder report. None of these change
/// the underlying scores.
#[derive(Debug, Clone)]
pub struct ReportOptions {
    pub mode: ScoreMode,
    pub limit: usize,
    pub filter: CandidateFilter,
    pub layout: AudienceLayout,
    pub thresholds: DeltaThresholds,
}

impl ReportOptions {
    pub fn from_config(config: &CompatConfig) -> Self {
        Self {
            mode: config.score_mode(),
            limit: config.recommendation_limit(),
            filter: CandidateFilter {
                unlocked_only: config.unlocked_only(),
                ..CandidateFilter::default()
            },
            layout: AudienceLayout {
                order: config.audience_order(),
                labels: config.audience_labels(),
            },
            thresholds: config.delta_thresholds(),
        }
    }
}

pub fn film_report<S: AsRef<str>>(
    data: &ReferenceData,
    selection: &[S],
    options: &ReportOptions,
) -> FilmReport {
    let scale = data.scale();
    let selected = agnostic::distinct(selection);
    let current = agnostic::agnostic_score(data, selected.as_slice());

    let mut candidates = recommend::candidates(data, selected.as_slice(), &options.filter);
    let max_positive = recommend::max_positive_delta(&candidates);
    let best = recommend::best(&candidates).map(|candidate| candidate.tag.clone());
    recommend::rank(&mut candidates, options.mode);

    let recommendations = candidates
        .into_iter()
        .take(options.limit)
        .map(|candidate| Recommendation {
            name: pretty_tag_name(&candidate.tag),
            category: data
                .tag(&candidate.tag)
                .map(|tag| tag.category.clone())
                .unwrap_or_default(),
            class: recommend::classify(candidate.delta, max_positive, options.thresholds),
            recommended: best.as_deref() == Some(candidate.tag.as_str()),
            next_score: candidate.next_score,
            delta: candidate.delta,
            tag: candidate.tag,
        })
        .collect();

    FilmReport {
        generated_at: Utc::now().to_rfc3339(),
        selected: selected
            .iter()
            .map(|id| SelectedTag {
                id: id.to_string(),
                name: pretty_tag_name(id),
                category: data.tag(id).map(|tag| tag.category.clone()),
            })
            .collect(),
        raw_score: current.raw,
        score: scale.apply(current.raw, current.pairs),
        max_score: scale.max_score,
        pairs: current.pairs,
        totals: audience::value_totals(data, selected.as_slice()),
        audience: audience::audience_distribution(data, selected.as_slice(), &options.layout),
        mode: options.mode,
        recommendations,
    }
}
