//! In-page table of contents.
//!
//! Built from the current page's [`TocEntry`] list. Only level 2 and 3
//! headings with an anchor qualify, and an outline with a single entry is
//! not worth showing, so construction yields `None` below two entries.
//! The active entry follows the URL fragment, not scroll position.

use std::fmt::Write;

use crate::headings::TocEntry;
use crate::util::escape_html;

/// Minimum number of qualifying headings for an outline to render.
const MIN_ENTRIES: usize = 2;

/// Outline of the current page.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TableOfContents {
    entries: Vec<TocEntry>,
}

impl TableOfContents {
    /// Build an outline from extracted headings.
    ///
    /// Returns `None` when fewer than two level-2/3 headings carry an id.
    #[must_use]
    pub fn from_headings(headings: &[TocEntry]) -> Option<Self> {
        let entries: Vec<TocEntry> = headings
            .iter()
            .filter(|entry| entry.id.is_some() && matches!(entry.level, 2 | 3))
            .cloned()
            .collect();

        if entries.len() < MIN_ENTRIES {
            return None;
        }
        Some(Self { entries })
    }

    /// Qualifying entries in document order.
    #[must_use]
    pub fn entries(&self) -> &[TocEntry] {
        &self.entries
    }

    /// Index of the entry matching the URL fragment (with or without `#`).
    #[must_use]
    pub fn active_index(&self, fragment: Option<&str>) -> Option<usize> {
        let fragment = fragment?.trim_start_matches('#');
        if fragment.is_empty() {
            return None;
        }
        self.entries
            .iter()
            .position(|entry| entry.id.as_deref() == Some(fragment))
    }

    /// Render the outline as a `<nav class="toc">` element.
    #[must_use]
    pub fn render_html(&self, fragment: Option<&str>) -> String {
        let active = self.active_index(fragment);
        let mut out = String::from(r#"<nav class="toc"><ul class="flex column">"#);

        for (idx, entry) in self.entries.iter().enumerate() {
            // Entries were filtered on `id.is_some()` at construction.
            let id = entry.id.as_deref().unwrap_or_default();
            let classes: Vec<&str> = [
                (active == Some(idx)).then_some("active"),
                (entry.level == 3).then_some("padded"),
            ]
            .into_iter()
            .flatten()
            .collect();

            if classes.is_empty() {
                out.push_str("<li>");
            } else {
                write!(out, r#"<li class="{}">"#, classes.join(" ")).unwrap();
            }
            write!(
                out,
                r##"<a href="#{}">{}</a></li>"##,
                escape_html(id),
                escape_html(&entry.title)
            )
            .unwrap();
        }

        out.push_str("</ul></nav>");
        out
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    fn untitled(level: u8, title: &str) -> TocEntry {
        TocEntry {
            id: None,
            title: title.to_owned(),
            level,
        }
    }

    #[test]
    fn test_single_entry_renders_nothing() {
        let headings = vec![TocEntry::new("install", "Install", 2)];
        assert!(TableOfContents::from_headings(&headings).is_none());
    }

    #[test]
    fn test_two_entries_kept_in_document_order() {
        let headings = vec![
            TocEntry::new("install", "Install", 2),
            TocEntry::new("usage", "Usage", 2),
        ];
        let toc = TableOfContents::from_headings(&headings).unwrap();
        assert_eq!(toc.entries(), headings.as_slice());
    }

    #[test]
    fn test_filters_levels_outside_two_and_three() {
        let headings = vec![
            TocEntry::new("title", "Title", 1),
            TocEntry::new("a", "A", 2),
            TocEntry::new("b", "B", 3),
            TocEntry::new("c", "C", 4),
        ];
        let toc = TableOfContents::from_headings(&headings).unwrap();
        let ids: Vec<_> = toc.entries().iter().map(|e| e.id.as_deref()).collect();
        assert_eq!(ids, vec![Some("a"), Some("b")]);
    }

    #[test]
    fn test_headings_without_id_do_not_count() {
        let headings = vec![TocEntry::new("a", "A", 2), untitled(2, "B")];
        assert!(TableOfContents::from_headings(&headings).is_none());
    }

    #[test]
    fn test_active_entry_from_fragment() {
        let headings = vec![TocEntry::new("a", "A", 2), TocEntry::new("b", "B", 3)];
        let toc = TableOfContents::from_headings(&headings).unwrap();

        assert_eq!(toc.active_index(Some("#b")), Some(1));
        assert_eq!(toc.active_index(Some("a")), Some(0));
        assert_eq!(toc.active_index(Some("#missing")), None);
        assert_eq!(toc.active_index(Some("#")), None);
        assert_eq!(toc.active_index(None), None);
    }

    #[test]
    fn test_render_marks_active_and_padded() {
        let headings = vec![TocEntry::new("a", "A", 2), TocEntry::new("b", "B & C", 3)];
        let toc = TableOfContents::from_headings(&headings).unwrap();

        let html = toc.render_html(Some("#b"));
        assert_eq!(
            html,
            r##"<nav class="toc"><ul class="flex column"><li><a href="#a">A</a></li><li class="active padded"><a href="#b">B &amp; C</a></li></ul></nav>"##
        );
    }
}
