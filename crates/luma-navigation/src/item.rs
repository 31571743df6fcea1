//! Navigation model.
//!
//! The site's navigation is a list of [`NavigationItem`]s loaded from the
//! configuration document. Items are tagged by a `type` field:
//!
//! ```yaml
//! navigation:
//!   - type: page
//!     title: Introduction
//!     path: intro.md
//!   - type: section
//!     title: API
//!     contents:
//!       - type: reference
//!         title: Client
//!         relative_path: api/client.md
//!         apis: [mylib.Client]
//!       - type: link
//!         title: GitHub
//!         href: https://github.com/example/mylib
//! ```
//!
//! Unknown `type` values deserialize to [`NavigationItem::Unknown`] so older
//! readers keep working when the schema grows.

use serde::{Deserialize, Serialize};

use crate::route::strip_route;

/// A routed markdown document.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Page {
    /// Display title.
    pub title: String,
    /// Path of the markdown file, relative to the pages directory.
    pub path: String,
}

/// An external or absolute URL.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Link {
    /// Display title.
    pub title: String,
    /// Link target, used verbatim.
    pub href: String,
}

/// A generated API-reference document.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Reference {
    /// Display title.
    pub title: String,
    /// Path of the generated markdown file, relative to the pages directory.
    pub relative_path: String,
    /// Qualified names of the documented objects.
    #[serde(default)]
    pub apis: Vec<String>,
}

/// A titled group of items (section or tab).
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Group {
    /// Heading label.
    pub title: String,
    /// Grouped items, in display order.
    #[serde(default)]
    pub contents: Vec<NavigationItem>,
}

/// One entry of the navigation tree.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum NavigationItem {
    /// Routed document.
    Page(Page),
    /// External link, never marked active.
    Link(Link),
    /// Generated API reference document.
    Reference(Reference),
    /// One-level grouping.
    Section(Group),
    /// Top-level grouping.
    Tab(Group),
    /// Item of a type this version does not know; renders nothing.
    #[serde(other)]
    Unknown,
}

impl NavigationItem {
    /// Display title, if the item has one.
    #[must_use]
    pub fn title(&self) -> Option<&str> {
        match self {
            Self::Page(Page { title, .. })
            | Self::Link(Link { title, .. })
            | Self::Reference(Reference { title, .. })
            | Self::Section(Group { title, .. })
            | Self::Tab(Group { title, .. }) => Some(title.as_str()),
            Self::Unknown => None,
        }
    }

    /// Source markdown path of a routed item (`Page` or `Reference`).
    #[must_use]
    pub fn source_path(&self) -> Option<&str> {
        match self {
            Self::Page(page) => Some(page.path.as_str()),
            Self::Reference(reference) => Some(reference.relative_path.as_str()),
            Self::Link(_) | Self::Section(_) | Self::Tab(_) | Self::Unknown => None,
        }
    }

    /// Route of a routed item, derived from its markdown path.
    #[must_use]
    pub fn route(&self) -> Option<String> {
        self.source_path().map(route_for)
    }

    /// Link target of the item: the route for documents, the URL for links.
    #[must_use]
    pub fn href(&self) -> Option<String> {
        match self {
            Self::Link(link) => Some(link.href.clone()),
            _ => self.route(),
        }
    }

    /// Whether this item corresponds to the page at `current_path`.
    ///
    /// Query and fragment are ignored. Links are never active.
    #[must_use]
    pub fn is_active(&self, current_path: &str) -> bool {
        self.route()
            .is_some_and(|route| route == strip_route(current_path))
    }

    /// Nested items of a group.
    #[must_use]
    pub fn contents(&self) -> Option<&[NavigationItem]> {
        match self {
            Self::Section(group) | Self::Tab(group) => Some(group.contents.as_slice()),
            Self::Page(_) | Self::Link(_) | Self::Reference(_) | Self::Unknown => None,
        }
    }
}

/// Route for a markdown path: leading `/`, `.md` extension removed.
///
/// # Examples
///
/// ```
/// use luma_navigation::route_for;
///
/// assert_eq!(route_for("intro.md"), "/intro");
/// assert_eq!(route_for("api/foo.md"), "/api/foo");
/// ```
#[must_use]
pub fn route_for(markdown_path: &str) -> String {
    let trimmed = markdown_path.trim_start_matches('/');
    let without_ext = trimmed.strip_suffix(".md").unwrap_or(trimmed);
    format!("/{without_ext}")
}

/// A routed document found while walking the navigation tree.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RoutedEntry<'a> {
    /// Display title.
    pub title: &'a str,
    /// Markdown path relative to the pages directory.
    pub source_path: &'a str,
    /// Route derived from `source_path`.
    pub route: String,
    /// Title of the innermost enclosing section or tab.
    pub section: Option<&'a str>,
}

/// Collect every `Page` and `Reference` in document order.
///
/// Groups are walked recursively; each entry remembers the title of the
/// innermost group containing it.
#[must_use]
pub fn flatten(items: &[NavigationItem]) -> Vec<RoutedEntry<'_>> {
    let mut out = Vec::new();
    flatten_into(items, None, &mut out);
    out
}

fn flatten_into<'a>(
    items: &'a [NavigationItem],
    section: Option<&'a str>,
    out: &mut Vec<RoutedEntry<'a>>,
) {
    for item in items {
        match item {
            NavigationItem::Page(Page { title, path })
            | NavigationItem::Reference(Reference {
                title,
                relative_path: path,
                ..
            }) => out.push(RoutedEntry {
                title,
                source_path: path,
                route: route_for(path),
                section,
            }),
            NavigationItem::Section(group) | NavigationItem::Tab(group) => {
                flatten_into(&group.contents, Some(group.title.as_str()), out);
            }
            NavigationItem::Link(_) | NavigationItem::Unknown => {}
        }
    }
}

/// Find the routed entry for a route (query and fragment ignored).
#[must_use]
pub fn find_route<'a>(items: &'a [NavigationItem], route: &str) -> Option<RoutedEntry<'a>> {
    let path = strip_route(route);
    flatten(items).into_iter().find(|entry| entry.route == path)
}

/// Where the site root should send visitors.
///
/// The first navigation item's route when it is a page, otherwise `/`.
#[must_use]
pub fn landing_destination(items: &[NavigationItem]) -> String {
    match items.first() {
        Some(NavigationItem::Page(page)) => route_for(&page.path),
        _ => "/".to_owned(),
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    fn page(title: &str, path: &str) -> NavigationItem {
        NavigationItem::Page(Page {
            title: title.to_owned(),
            path: path.to_owned(),
        })
    }

    fn reference(title: &str, path: &str) -> NavigationItem {
        NavigationItem::Reference(Reference {
            title: title.to_owned(),
            relative_path: path.to_owned(),
            apis: Vec::new(),
        })
    }

    fn link(title: &str, href: &str) -> NavigationItem {
        NavigationItem::Link(Link {
            title: title.to_owned(),
            href: href.to_owned(),
        })
    }

    fn section(title: &str, contents: Vec<NavigationItem>) -> NavigationItem {
        NavigationItem::Section(Group {
            title: title.to_owned(),
            contents,
        })
    }

    #[test]
    fn test_page_is_active_on_its_route() {
        let item = page("Intro", "intro.md");
        assert!(item.is_active("/intro"));
        assert!(item.is_active("/intro#install"));
        assert!(item.is_active("/intro?tab=1"));
        assert!(!item.is_active("/other"));
    }

    #[test]
    fn test_reference_href() {
        let item = reference("Foo", "api/foo.md");
        assert_eq!(item.href().as_deref(), Some("/api/foo"));
        assert!(item.is_active("/api/foo"));
    }

    #[test]
    fn test_link_never_active() {
        let item = link("Home", "/intro");
        assert_eq!(item.href().as_deref(), Some("/intro"));
        assert!(!item.is_active("/intro"));
    }

    #[test]
    fn test_groups_have_no_href() {
        let item = section("Guides", vec![page("A", "a.md")]);
        assert_eq!(item.href(), None);
        assert!(!item.is_active("/a"));
        assert_eq!(item.contents().map(<[_]>::len), Some(1));
    }

    #[test]
    fn test_route_for_leading_slash_not_doubled() {
        assert_eq!(route_for("/intro.md"), "/intro");
        assert_eq!(route_for("notes.txt"), "/notes.txt");
    }

    #[test]
    fn test_deserialize_tagged_items() {
        let yaml = r"
- type: page
  title: Intro
  path: intro.md
- type: reference
  title: Client
  relative_path: api/client.md
  apis: [lib.Client]
- type: link
  title: GitHub
  href: https://github.com
- type: section
  title: Guides
  contents:
    - type: page
      title: Install
      path: install.md
- type: tab
  title: API
";
        let items: Vec<NavigationItem> = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(items.len(), 5);
        assert_eq!(items[0], page("Intro", "intro.md"));
        assert!(
            matches!(&items[1], NavigationItem::Reference(r) if r.apis == vec!["lib.Client".to_owned()])
        );
        assert_eq!(items[2], link("GitHub", "https://github.com"));
        assert_eq!(items[3], section("Guides", vec![page("Install", "install.md")]));
        assert!(matches!(&items[4], NavigationItem::Tab(g) if g.contents.is_empty()));
    }

    #[test]
    fn test_unknown_type_deserializes_to_unknown() {
        let json = r#"[{"type": "video", "title": "Demo", "url": "x"}, {"type": "page", "title": "A", "path": "a.md"}]"#;
        let items: Vec<NavigationItem> = serde_json::from_str(json).unwrap();
        assert_eq!(items[0], NavigationItem::Unknown);
        assert_eq!(items[0].title(), None);
        assert_eq!(items[1], page("A", "a.md"));
    }

    #[test]
    fn test_flatten_records_sections() {
        let items = vec![
            page("Intro", "intro.md"),
            section(
                "API",
                vec![reference("Client", "api/client.md"), link("Ext", "https://x")],
            ),
            NavigationItem::Tab(Group {
                title: "Guides".to_owned(),
                contents: vec![section("Setup", vec![page("Install", "install.md")])],
            }),
        ];

        let entries = flatten(&items);
        let summary: Vec<_> = entries
            .iter()
            .map(|e| (e.title, e.route.as_str(), e.section))
            .collect();
        assert_eq!(
            summary,
            vec![
                ("Intro", "/intro", None),
                ("Client", "/api/client", Some("API")),
                ("Install", "/install", Some("Setup")),
            ]
        );
    }

    #[test]
    fn test_find_route() {
        let items = vec![section("S", vec![page("A", "docs/a.md")])];
        let found = find_route(&items, "/docs/a#x").unwrap();
        assert_eq!(found.source_path, "docs/a.md");
        assert!(find_route(&items, "/missing").is_none());
    }

    #[test]
    fn test_landing_destination() {
        assert_eq!(landing_destination(&[page("Intro", "intro.md")]), "/intro");
        assert_eq!(landing_destination(&[]), "/");
        assert_eq!(
            landing_destination(&[section("S", vec![page("A", "a.md")])]),
            "/"
        );
        assert_eq!(landing_destination(&[reference("R", "r.md")]), "/");
    }
}
