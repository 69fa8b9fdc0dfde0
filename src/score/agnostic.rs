use crate::data::ReferenceData;
use crate::types::score::AgnosticScore;

/// Value of one unordered pair. Two genre tags average their compatibility
/// and genre-pair values (whichever are defined); other pairs use the
/// compatibility value alone. `None` means the pair has no data.
pub fn pair_value(data: &ReferenceData, a: &str, b: &str) -> Option<f64> {
    let compatibility = data.compatibility(a, b);
    let both_genre = data.tag(a).is_some_and(|tag| tag.is_genre())
        && data.tag(b).is_some_and(|tag| tag.is_genre());
    if !both_genre {
        return compatibility;
    }
    match (compatibility, data.genre_pair(a, b)) {
        (Some(c), Some(g)) => Some((c + g) / 2.0),
        (Some(v), None) | (None, Some(v)) => Some(v),
        (None, None) => None,
    }
}

/// Mean of the defined pair values over every unordered pair of distinct
/// selected tags. Undefined pairs are left out of the mean.
pub fn agnostic_score<S: AsRef<str>>(data: &ReferenceData, selection: &[S]) -> AgnosticScore {
    let tags = distinct(selection);
    let mut total = 0.0;
    let mut pairs = 0;
    for (i, a) in tags.iter().enumerate() {
        for b in &tags[i + 1..] {
            if let Some(value) = pair_value(data, a, b) {
                total += value;
                pairs += 1;
            }
        }
    }

    if pairs == 0 {
        return AgnosticScore::default();
    }
    AgnosticScore {
        raw: total / pairs as f64,
        pairs,
    }
}

/// Selection ids in order, with repeats dropped.
pub fn distinct<S: AsRef<str>>(selection: &[S]) -> Vec<&str> {
    let mut seen = Vec::with_capacity(selection.len());
    for tag in selection {
        let tag = tag.as_ref();
        if !seen.contains(&tag) {
            seen.push(tag);
        }
    }
    seen
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::fixtures::reference;

    const EPS: f64 = 1e-9;

    #[test]
    fn genre_pairs_average_both_tables() {
        let data = reference();
        let score = agnostic_score(&data, &["ACTION", "COMEDY"]);
        assert!((score.raw - 0.7).abs() < EPS);
        assert_eq!(score.pairs, 1);
    }

    #[test]
    fn empty_and_single_selections_score_zero() {
        let data = reference();
        let empty: [&str; 0] = [];
        assert_eq!(agnostic_score(&data, &empty), AgnosticScore::default());
        assert_eq!(agnostic_score(&data, &["ACTION"]).raw, 0.0);
    }

    #[test]
    fn undefined_pairs_are_excluded_from_mean() {
        let data = reference();
        // WILD_WEST/DRAMA has no entry; only ACTION/WILD_WEST (3.5) and
        // ACTION/DRAMA (genre mean of 2.0 and 3.0) count.
        let score = agnostic_score(&data, &["ACTION", "WILD_WEST", "DRAMA"]);
        assert_eq!(score.pairs, 2);
        assert!((score.raw - (3.5 + 2.5) / 2.0).abs() < EPS);
    }

    #[test]
    fn selection_without_defined_pairs_scores_zero() {
        let data = reference();
        let score = agnostic_score(&data, &["PROTAGONIST_COWBOY", "THEME_REVENGE"]);
        assert_eq!(score, AgnosticScore::default());
    }

    #[test]
    fn unknown_tags_count_as_no_data() {
        let data = reference();
        let with_unknown = agnostic_score(&data, &["ACTION", "NOT_A_TAG", "WILD_WEST"]);
        let without = agnostic_score(&data, &["ACTION", "WILD_WEST"]);
        assert_eq!(with_unknown, without);
    }

    #[test]
    fn duplicates_are_collapsed() {
        let data = reference();
        let score = agnostic_score(&data, &["ACTION", "COMEDY", "ACTION"]);
        assert_eq!(score.pairs, 1);
    }

    #[test]
    fn score_is_order_independent() {
        let data = reference();
        let forward = agnostic_score(&data, &["ACTION", "PROTAGONIST_COWBOY", "WILD_WEST"]);
        let backward = agnostic_score(&data, &["WILD_WEST", "PROTAGONIST_COWBOY", "ACTION"]);
        assert!((forward.raw - backward.raw).abs() < EPS);
        assert!((forward.raw - 12.5 / 3.0).abs() < EPS);
    }

    #[test]
    fn positive_addition_to_small_selection_never_decreases() {
        let data = reference();
        let single = agnostic_score(&data, &["ACTION"]);
        let pair = agnostic_score(&data, &["ACTION", "WILD_WEST"]);
        assert!(pair.raw >= single.raw);

        // Every new pair (4.0 and 5.0) is at least the current mean (3.5).
        let triple = agnostic_score(&data, &["ACTION", "WILD_WEST", "PROTAGONIST_COWBOY"]);
        assert!(triple.raw >= pair.raw);
    }

    #[test]
    fn non_genre_pairs_ignore_genre_table() {
        let data = reference();
        assert_eq!(pair_value(&data, "ACTION", "WILD_WEST"), Some(3.5));
        assert_eq!(pair_value(&data, "ACTION", "DRAMA"), Some(2.5));
        assert_eq!(pair_value(&data, "COMEDY", "DRAMA"), None);
    }
}
