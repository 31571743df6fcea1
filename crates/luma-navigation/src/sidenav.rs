//! Side navigation.
//!
//! Builds a view model of the navigation tree for the current route and
//! renders it to HTML. Groups render a non-interactive heading followed by
//! their items in original order; the first top-level group omits the top
//! padding. A group nested inside another group is shown one level deep;
//! anything deeper is not rendered.

use std::fmt::Write;

use luma_renderer::escape_html;
use serde::Serialize;

use crate::item::{Group, NavigationItem};

/// One rendered entry of the side navigation.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum SideNavEntry {
    /// A clickable page, reference or link.
    Link {
        /// Display title.
        title: String,
        /// Link target.
        href: String,
        /// Whether this is the current page.
        active: bool,
    },
    /// A group heading with its entries.
    Group {
        /// Heading label.
        title: String,
        /// Whether this is the first top-level entry (no top padding).
        first: bool,
        /// Grouped entries.
        entries: Vec<SideNavEntry>,
    },
}

/// Side navigation for one route.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct SideNav {
    entries: Vec<SideNavEntry>,
}

impl SideNav {
    /// Build the side navigation for `current_path`.
    ///
    /// `current_path` may carry a query string or fragment; both are ignored
    /// when deciding the active entry.
    #[must_use]
    pub fn build(items: &[NavigationItem], current_path: &str) -> Self {
        let entries = items
            .iter()
            .enumerate()
            .filter_map(|(idx, item)| build_entry(item, current_path, idx == 0, 0))
            .collect();
        Self { entries }
    }

    /// Top-level entries.
    #[must_use]
    pub fn entries(&self) -> &[SideNavEntry] {
        &self.entries
    }

    /// Href of the active entry, if any.
    #[must_use]
    pub fn active_href(&self) -> Option<&str> {
        fn find(entries: &[SideNavEntry]) -> Option<&str> {
            entries.iter().find_map(|entry| match entry {
                SideNavEntry::Link {
                    href, active: true, ..
                } => Some(href.as_str()),
                SideNavEntry::Link { .. } => None,
                SideNavEntry::Group { entries, .. } => find(entries),
            })
        }
        find(&self.entries)
    }

    /// Render as a `<nav class="sidenav">` element.
    #[must_use]
    pub fn render_html(&self) -> String {
        let mut out = String::from(r#"<nav class="sidenav"><ul class="sidenav-list">"#);
        for entry in &self.entries {
            render_entry(entry, &mut out);
        }
        out.push_str("</ul></nav>");
        out
    }
}

/// Maximum group nesting shown below the top level.
const MAX_GROUP_DEPTH: usize = 1;

fn build_entry(
    item: &NavigationItem,
    current_path: &str,
    first: bool,
    depth: usize,
) -> Option<SideNavEntry> {
    match item {
        NavigationItem::Page(_) | NavigationItem::Reference(_) | NavigationItem::Link(_) => {
            let href = item.href()?;
            Some(SideNavEntry::Link {
                title: item.title().unwrap_or_default().to_owned(),
                href,
                active: item.is_active(current_path),
            })
        }
        NavigationItem::Section(group) | NavigationItem::Tab(group) => {
            if depth > MAX_GROUP_DEPTH {
                tracing::debug!(title = %group.title, depth, "Skipping deeply nested group");
                return None;
            }
            Some(build_group(group, current_path, first, depth))
        }
        NavigationItem::Unknown => {
            tracing::debug!("Skipping navigation item of unknown type");
            None
        }
    }
}

fn build_group(group: &Group, current_path: &str, first: bool, depth: usize) -> SideNavEntry {
    SideNavEntry::Group {
        title: group.title.clone(),
        first,
        entries: group
            .contents
            .iter()
            .filter_map(|item| build_entry(item, current_path, false, depth + 1))
            .collect(),
    }
}

fn render_entry(entry: &SideNavEntry, out: &mut String) {
    match entry {
        SideNavEntry::Link {
            title,
            href,
            active,
        } => {
            let class = if *active {
                r#" class="sidenav-item-active""#
            } else {
                ""
            };
            write!(
                out,
                r#"<li{class}><a class="sidenav-item" href="{}">{}</a></li>"#,
                escape_html(href),
                escape_html(title)
            )
            .unwrap();
        }
        SideNavEntry::Group {
            title,
            first,
            entries,
        } => {
            let class = if *first {
                "section-title first"
            } else {
                "section-title"
            };
            write!(
                out,
                r#"<li><span class="{class}">{}</span><ul class="section-items">"#,
                escape_html(title)
            )
            .unwrap();
            for child in entries {
                render_entry(child, out);
            }
            out.push_str("</ul></li>");
        }
    }
}
