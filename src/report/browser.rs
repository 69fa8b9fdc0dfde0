use crate::data::ReferenceData;
use crate::error::{CompatError, Result};
use crate::score::recommend::CandidateFilter;
use crate::types::report::RelatedRow;
use crate::types::tag::{pretty_category_name, pretty_tag_name};

const SAMPLE_SIZE: usize = 5;

/// Category counts followed by a few sample tags per category and a preview
/// of the first sample's strongest partners.
pub fn categories_overview(data: &ReferenceData) -> String {
    let mut output = String::from("Categories found:\n");
    for category in data.categories() {
        output.push_str(&format!(
            "- {}: {} items\n",
            category,
            data.tags_in(category).len()
        ));
    }

    output.push_str("\nSamples:\n");
    for category in data.categories() {
        let sample: Vec<&str> = data
            .tags_in(category)
            .iter()
            .take(SAMPLE_SIZE)
            .map(String::as_str)
            .collect();
        if sample.is_empty() {
            output.push_str(&format!("[{category}] -> (none)\n\n"));
            continue;
        }
        output.push_str(&format!("[{category}] -> {}\n", sample.join(", ")));
        let preview: Vec<String> = data
            .related(sample[0])
            .into_iter()
            .take(SAMPLE_SIZE)
            .map(|(tag, value)| format!("{tag}:{value:.3}"))
            .collect();
        output.push_str(&format!(
            "  related({}): {}\n\n",
            sample[0],
            if preview.is_empty() {
                "(none)".to_string()
            } else {
                preview.join(", ")
            }
        ));
    }
    output
}

/// Tags grouped by category in display order, narrowed by an optional
/// category and the usual search/unlock filter.
pub fn tag_list(data: &ReferenceData, category: Option<&str>, filter: &CandidateFilter) -> String {
    let mut output = String::new();
    let mut shown = 0;
    for current in data.categories() {
        if category.is_some_and(|wanted| wanted != current.as_str()) {
            continue;
        }
        let tags: Vec<&String> = data
            .tags_in(current)
            .iter()
            .filter(|id| filter.matches(data, id))
            .collect();
        if tags.is_empty() {
            continue;
        }
        output.push_str(&format!("## {}\n", pretty_category_name(current)));
        for id in tags {
            let pretty = pretty_tag_name(id);
            if pretty == *id {
                output.push_str(&format!("- {id}\n"));
            } else {
                output.push_str(&format!("- {pretty} ({id})\n"));
            }
            shown += 1;
        }
        output.push('\n');
    }
    if shown == 0 {
        output.push_str("no tags match\n");
    }
    output
}

pub fn related_rows(data: &ReferenceData, id: &str) -> Result<Vec<RelatedRow>> {
    if data.tag(id).is_none() {
        return Err(CompatError::UnknownTag(id.to_string()));
    }
    Ok(data
        .related(id)
        .into_iter()
        .map(|(tag, value)| RelatedRow {
            tag: tag.to_string(),
            name: pretty_tag_name(tag),
            value,
        })
        .collect())
}

pub fn related_table(data: &ReferenceData, id: &str) -> Result<String> {
    let rows = related_rows(data, id)?;
    let mut output = format!("# {}\n\n", pretty_tag_name(id));
    output.push_str("| Related Tag | Score |\n|---|---:|\n");
    for row in &rows {
        output.push_str(&format!("| {} | {:.3} |\n", row.name, row.value));
    }
    output.push_str(&format!(
        "\n{}: {} related tags\n",
        pretty_tag_name(id),
        rows.len()
    ));
    Ok(output)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::fixtures::reference;

    #[test]
    fn overview_lists_counts_and_samples() {
        let data = reference();
        let rendered = categories_overview(&data);
        assert!(rendered.contains("- Genre: 3 items"));
        assert!(rendered.contains("[Genre] -> ACTION, COMEDY, DRAMA"));
        assert!(rendered.contains("related(ACTION): PROTAGONIST_COWBOY:4.000, WILD_WEST:3.500"));
        assert!(rendered.contains("related(THEME_REVENGE): DRAMA:4.000"));
    }

    #[test]
    fn tag_list_groups_and_filters() {
        let data = reference();
        let all = tag_list(&data, None, &CandidateFilter::default());
        assert!(all.contains("## Genre\n- ACTION\n"));
        assert!(all.contains("- COWBOY (PROTAGONIST_COWBOY)"));

        let only_theme = tag_list(&data, Some("Theme"), &CandidateFilter::default());
        assert!(only_theme.contains("REVENGE"));
        assert!(!only_theme.contains("ACTION"));

        let unlocked = CandidateFilter {
            unlocked_only: true,
            ..CandidateFilter::default()
        };
        assert_eq!(tag_list(&data, Some("Theme"), &unlocked), "no tags match\n");
    }

    #[test]
    fn related_table_formats_scores() {
        let data = reference();
        let rendered = related_table(&data, "PROTAGONIST_COWBOY").expect("known tag");
        assert!(rendered.contains("| WILD WEST | 5.000 |"));
        assert!(rendered.contains("COWBOY: 3 related tags"));
    }

    #[test]
    fn related_rejects_unknown_tag() {
        let data = reference();
        let err = related_table(&data, "NOPE").expect_err("unknown tag should fail");
        assert!(matches!(err, CompatError::UnknownTag(_)));
    }
}
