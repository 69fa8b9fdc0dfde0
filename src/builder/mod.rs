pub mod command;
pub mod session;

use crate::data::ReferenceData;
use crate::report::md;
use crate::score::{film_report, ReportOptions};
use crate::types::report::FilmReport;
use crate::types::score::ScoreMode;

#[derive(Debug, Clone, Default, PartialEq)]
pub struct SelectionChange {
    pub changed: Vec<String>,
    pub unknown: Vec<String>,
}

/// Film-builder state for one session: the ordered selection plus the
/// display options. Reference data is only borrowed.
pub struct FilmBuilder<'a> {
    data: &'a ReferenceData,
    selection: Vec<String>,
    options: ReportOptions,
}

impl<'a> FilmBuilder<'a> {
    pub fn new(data: &'a ReferenceData, options: ReportOptions) -> Self {
        Self {
            data,
            selection: Vec::new(),
            options,
        }
    }

    pub fn data(&self) -> &'a ReferenceData {
        self.data
    }

    #[cfg(test)]
    pub fn selection(&self) -> &[String] {
        &self.selection
    }

    /// Appends known tags that are not selected yet. Unknown ids are reported
    /// back and left out.
    pub fn add<S: AsRef<str>>(&mut self, tags: &[S]) -> SelectionChange {
        let mut change = SelectionChange::default();
        for tag in tags {
            let tag = tag.as_ref();
            if self.data.tag(tag).is_none() {
                change.unknown.push(tag.to_string());
            } else if !self.selection.iter().any(|selected| selected == tag) {
                self.selection.push(tag.to_string());
                change.changed.push(tag.to_string());
            }
        }
        if !change.changed.is_empty() {
            tracing::debug!(added = ?change.changed, size = self.selection.len(), "selection grew");
        }
        change
    }

    pub fn remove<S: AsRef<str>>(&mut self, tags: &[S]) -> SelectionChange {
        let mut change = SelectionChange::default();
        for tag in tags {
            let tag = tag.as_ref();
            match self.selection.iter().position(|selected| selected == tag) {
                Some(index) => {
                    change.changed.push(self.selection.remove(index));
                }
                None => change.unknown.push(tag.to_string()),
            }
        }
        change
    }

    pub fn clear(&mut self) -> usize {
        let removed = self.selection.len();
        self.selection.clear();
        removed
    }

    pub fn set_mode(&mut self, mode: ScoreMode) {
        self.options.mode = mode;
    }

    pub fn set_query(&mut self, query: Option<String>) {
        self.options.filter.query = query;
    }

    pub fn set_unlocked_only(&mut self, unlocked_only: bool) {
        self.options.filter.unlocked_only = unlocked_only;
    }

    pub fn set_limit(&mut self, limit: usize) {
        self.options.limit = limit;
    }

    pub fn report(&self) -> FilmReport {
        film_report(self.data, self.selection.as_slice(), &self.options)
    }

    pub fn panel(&self) -> String {
        md::to_markdown(&self.report())
    }
}
