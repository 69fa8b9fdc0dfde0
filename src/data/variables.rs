use crate::types::config::ScoringConfig;
use crate::types::score::ScoreScale;
use serde_json::Value;

fn variable<'a>(root: &'a Value, key: &str) -> Option<&'a str> {
    root.get(key)
        .and_then(|node| node.get("Value"))
        .and_then(Value::as_str)
        .map(str::trim)
        .filter(|value| !value.is_empty())
}

/// Reads `max_score`, `score_precision` and `tag_compatibility_score_range`
/// from `GameVariables.json`. Anything missing or unparseable keeps its default.
pub fn parse_score_scale(root: Option<&Value>) -> ScoreScale {
    let defaults = ScoreScale::default();
    let Some(root) = root else {
        return defaults;
    };

    let max_score = variable(root, "max_score")
        .and_then(|v| v.parse::<f64>().ok())
        .filter(|v| v.is_finite() && *v > 0.0)
        .unwrap_or(defaults.max_score);
    let precision = variable(root, "score_precision")
        .and_then(|v| v.parse::<u32>().ok())
        .filter(|p| *p <= ScoreScale::MAX_PRECISION)
        .unwrap_or(defaults.precision);
    let range = variable(root, "tag_compatibility_score_range")
        .and_then(|v| v.split_once('_'))
        .and_then(|(lo, hi)| Some((lo.trim().parse::<f64>().ok()?, hi.trim().parse::<f64>().ok()?)))
        .filter(|(lo, hi)| lo.is_finite() && hi.is_finite() && hi > lo)
        .unwrap_or(defaults.range);

    ScoreScale {
        max_score,
        precision,
        range,
    }
}

/// Applies `[scoring]` overrides from the config on top of the game file.
pub fn apply_overrides(scale: ScoreScale, overrides: Option<&ScoringConfig>) -> ScoreScale {
    let Some(overrides) = overrides else {
        return scale;
    };
    let range = (
        overrides.range_min.unwrap_or(scale.range.0),
        overrides.range_max.unwrap_or(scale.range.1),
    );
    ScoreScale {
        max_score: overrides.max_score.unwrap_or(scale.max_score),
        precision: overrides.precision.unwrap_or(scale.precision),
        range: if range.1 > range.0 { range } else { scale.range },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn missing_file_uses_defaults() {
        assert_eq!(parse_score_scale(None), ScoreScale::default());
    }

    #[test]
    fn reads_all_variables() {
        let scale = parse_score_scale(Some(&json!({
            "max_score": { "Value": "10" },
            "score_precision": { "Value": " 2 " },
            "tag_compatibility_score_range": { "Value": "0_3" }
        })));
        assert_eq!(scale.max_score, 10.0);
        assert_eq!(scale.precision, 2);
        assert_eq!(scale.range, (0.0, 3.0));
    }

    #[test]
    fn invalid_values_fall_back_individually() {
        let scale = parse_score_scale(Some(&json!({
            "max_score": { "Value": "lots" },
            "score_precision": { "Value": "3" },
            "tag_compatibility_score_range": { "Value": "5_1" }
        })));
        assert_eq!(scale.max_score, 9.9);
        assert_eq!(scale.precision, 3);
        assert_eq!(scale.range, (1.0, 5.0));
    }

    #[test]
    fn out_of_range_values_fall_back() {
        let scale = parse_score_scale(Some(&json!({
            "max_score": { "Value": "inf" },
            "score_precision": { "Value": "400" },
            "tag_compatibility_score_range": { "Value": "1_inf" }
        })));
        assert_eq!(scale, ScoreScale::default());
        assert_eq!(scale.apply(5.0, 1), 9.9);
    }

    #[test]
    fn overrides_replace_game_values() {
        let overrides = ScoringConfig {
            max_score: Some(100.0),
            precision: None,
            range_min: Some(0.0),
            range_max: None,
        };
        let scale = apply_overrides(ScoreScale::default(), Some(&overrides));
        assert_eq!(scale.max_score, 100.0);
        assert_eq!(scale.precision, 1);
        assert_eq!(scale.range, (0.0, 5.0));
    }
}
