use crate::types::report::{FilmReport, Recommendation};
use crate::types::score::ScoreMode;
use crate::types::tag::pretty_category_name;

pub fn to_markdown(report: &FilmReport) -> String {
    let mut output = String::new();
    output.push_str("# Film Builder\n\n");

    output.push_str(&format!("## Selected Tags ({})\n\n", report.selected.len()));
    if report.selected.is_empty() {
        output.push_str("- none\n\n");
    } else {
        for tag in &report.selected {
            match &tag.category {
                Some(category) => output.push_str(&format!(
                    "- {} [{}]\n",
                    tag.name,
                    pretty_category_name(category)
                )),
                None => output.push_str(&format!("- {} [no data]\n", tag.name)),
            }
        }
        output.push('\n');
    }

    output.push_str(&format!("Score: {} / {}\n", report.score, report.max_score));
    output.push_str(&format!(
        "Raw compatibility: {:.3} over {} pair(s)\n",
        report.raw_score, report.pairs
    ));
    output.push_str(&format!(
        "Art: {:.1}  Commercial: {:.1}\n\n",
        report.totals.art, report.totals.commercial
    ));

    output.push_str("## Audience\n\n");
    if report.audience.is_empty() {
        output.push_str("- none\n\n");
    } else {
        output.push_str("| Audience | % |\n|---|---:|\n");
        for share in &report.audience {
            output.push_str(&format!("| {} | {:.1} |\n", share.label, share.percent));
        }
        output.push('\n');
    }

    output.push_str(&format!(
        "## Next Tags (by {})\n\n",
        match report.mode {
            ScoreMode::Delta => "delta",
            ScoreMode::Next => "next score",
        }
    ));
    if report.recommendations.is_empty() {
        output.push_str("- none\n");
    } else {
        for recommendation in &report.recommendations {
            output.push_str(&recommendation_line(recommendation, report.mode));
        }
    }

    output
}

/// One ranked candidate, e.g. `- * WILD WEST [Setting] (+0.40) ++`.
pub fn recommendation_line(recommendation: &Recommendation, mode: ScoreMode) -> String {
    let value = match mode {
        ScoreMode::Delta => format!("{:+.2}", recommendation.delta),
        ScoreMode::Next => format!("{:.2}", recommendation.next_score),
    };
    format!(
        "- {}{} [{}] ({}) {}\n",
        if recommendation.recommended { "* " } else { "" },
        recommendation.name,
        pretty_category_name(&recommendation.category),
        value,
        recommendation.class.marker()
    )
}
