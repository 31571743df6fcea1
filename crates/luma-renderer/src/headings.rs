//! Heading extraction for the page outline.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use crate::util::slugify;

/// A heading of the rendered page.
///
/// Headings without a stable anchor (explicit `{#id}` or a non-empty
/// generated slug) carry `id: None` and never appear in the table of
/// contents.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TocEntry {
    /// Anchor ID for linking.
    pub id: Option<String>,
    /// Heading text.
    pub title: String,
    /// Heading level (1-6).
    pub level: u8,
}

impl TocEntry {
    /// Create an entry with an anchor.
    #[must_use]
    pub fn new(id: impl Into<String>, title: impl Into<String>, level: u8) -> Self {
        Self {
            id: Some(id.into()),
            title: title.into(),
            level,
        }
    }
}

/// Collects heading text while the renderer walks the event stream.
#[derive(Default)]
pub(crate) struct HeadingCollector {
    /// Level of the heading being collected (None outside headings).
    current_level: Option<u8>,
    /// Explicit `{#id}` of the heading being collected.
    current_id: Option<String>,
    /// Plain text buffer of the current heading.
    text: String,
    /// Collected entries in document order.
    entries: Vec<TocEntry>,
    /// Text of the first H1 heading.
    title: Option<String>,
    /// Anchors already assigned on this page.
    used_ids: HashSet<String>,
}

impl HeadingCollector {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn start(&mut self, level: u8, explicit_id: Option<&str>) {
        self.current_level = Some(level);
        self.current_id = explicit_id.map(str::to_owned);
        self.text.clear();
    }

    pub(crate) fn is_active(&self) -> bool {
        self.current_level.is_some()
    }

    pub(crate) fn push_text(&mut self, text: &str) {
        if self.is_active() {
            self.text.push_str(text);
        }
    }

    /// Finish the current heading and return its resolved anchor.
    pub(crate) fn end(&mut self) -> Option<String> {
        let level = self.current_level.take()?;
        let title = self.text.trim().to_owned();

        let id = match self.current_id.take().filter(|id| !id.is_empty()) {
            Some(explicit) => self.unique_id(&explicit),
            None => self.unique_id(&slugify(&title)),
        };

        if level == 1 && self.title.is_none() {
            self.title = Some(title.clone());
        }

        self.entries.push(TocEntry {
            id: id.clone(),
            title,
            level,
        });
        id
    }

    pub(crate) fn finish(self) -> (Option<String>, Vec<TocEntry>) {
        (self.title, self.entries)
    }

    /// Reserve `base`, or the first free `base-N` when it is taken.
    fn unique_id(&mut self, base: &str) -> Option<String> {
        if base.is_empty() {
            return None;
        }
        let mut id = base.to_owned();
        let mut suffix = 0;
        while self.used_ids.contains(&id) {
            suffix += 1;
            id = format!("{base}-{suffix}");
        }
        self.used_ids.insert(id.clone());
        Some(id)
    }
}
