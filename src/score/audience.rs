use super::agnostic::distinct;
use crate::data::audience::AudienceGroup;
use crate::data::ReferenceData;
use crate::types::score::{AudienceShare, ValueTotals};
use std::collections::HashMap;

/// Sums art and commercial values over the selection. Unknown tags add nothing.
pub fn value_totals<S: AsRef<str>>(data: &ReferenceData, selection: &[S]) -> ValueTotals {
    distinct(selection)
        .into_iter()
        .filter_map(|id| data.tag(id))
        .fold(ValueTotals::default(), |totals, tag| ValueTotals {
            art: totals.art + tag.art_value,
            commercial: totals.commercial + tag.commercial_value,
        })
}

/// Audience labels and row order, taken from config.
#[derive(Debug, Clone, Default)]
pub struct AudienceLayout {
    pub order: Vec<String>,
    pub labels: HashMap<String, String>,
}

impl AudienceLayout {
    fn label(&self, group: &AudienceGroup) -> String {
        self.labels
            .get(&group.id)
            .cloned()
            .or_else(|| group.label.clone())
            .unwrap_or_else(|| group.id.clone())
    }

    fn rank(&self, id: &str) -> usize {
        self.order
            .iter()
            .position(|entry| entry == id)
            .unwrap_or(self.order.len())
    }
}

/// Normalized audience breakdown for a selection, in percent.
///
/// Appeal uses only the positive parts of the art/commercial totals. An
/// empty selection, or one where every group's appeal is zero, falls back
/// to the configured default shares (see [`fallback_weights`]).
pub fn audience_distribution<S: AsRef<str>>(
    data: &ReferenceData,
    selection: &[S],
    layout: &AudienceLayout,
) -> Vec<AudienceShare> {
    let groups = data.audience_groups();
    if groups.is_empty() {
        return Vec::new();
    }

    let totals = value_totals(data, selection);
    let art = totals.art.max(0.0);
    let commercial = totals.commercial.max(0.0);

    let mut weights: Vec<f64> = groups
        .iter()
        .map(|group| group.raw_appeal(art, commercial))
        .collect();
    let mut sum: f64 = weights.iter().sum();
    if distinct(selection).is_empty() || sum <= 0.0 {
        weights = fallback_weights(groups);
        sum = weights.iter().sum();
    }

    let mut shares: Vec<AudienceShare> = groups
        .iter()
        .zip(weights)
        .map(|(group, weight)| AudienceShare {
            id: group.id.clone(),
            label: layout.label(group),
            percent: 100.0 * weight / sum,
        })
        .collect();
    shares.sort_by(|a, b| {
        layout
            .rank(&a.id)
            .cmp(&layout.rank(&b.id))
            .then_with(|| a.id.cmp(&b.id))
    });
    shares
}

/// Default shares when every group defines a positive-sum set of them,
/// otherwise an even split.
pub fn fallback_weights(groups: &[AudienceGroup]) -> Vec<f64> {
    let defaults: Option<Vec<f64>> = groups.iter().map(|group| group.default_share).collect();
    match defaults {
        Some(shares) if shares.iter().sum::<f64>() > 0.0 => shares,
        _ => vec![1.0; groups.len()],
    }
}
