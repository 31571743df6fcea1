//! Session context.
//!
//! A [`Session`] holds everything a running site reads: the configuration,
//! the search corpus, the lazily built search index and the page renderer.
//! It is constructed explicitly and shared by reference (or `Arc`) with
//! whatever needs it; dropping it releases everything.

use std::io::ErrorKind;
use std::sync::OnceLock;

use luma_config::Config;
use luma_navigation::{NavigationItem, SideNav, find_route, landing_destination, strip_route};
use luma_renderer::{PageRenderer, RenderResult};
use luma_search::{MAX_RESULTS, SearchDocument, SearchIndex, SearchResult, build_corpus};

use crate::error::RenderError;

/// A page rendered for a route.
#[derive(Clone, Debug)]
pub struct RenderedPage {
    /// Route of the page, without query or fragment.
    pub route: String,
    /// Title from the navigation entry.
    pub title: String,
    /// Enclosing navigation group, if any.
    pub section: Option<String>,
    /// Renderer output.
    pub result: RenderResult,
}

/// Session-scoped site data.
#[derive(Debug)]
pub struct Session {
    config: Config,
    corpus: Vec<SearchDocument>,
    index: OnceLock<SearchIndex>,
    renderer: PageRenderer,
}

impl Session {
    /// Create a session from a configuration and a prebuilt corpus.
    #[must_use]
    pub fn new(config: Config, corpus: Vec<SearchDocument>) -> Self {
        let renderer = PageRenderer::new().with_release_version(config.release_version());
        Self {
            config,
            corpus,
            index: OnceLock::new(),
            renderer,
        }
    }

    /// Create a session, extracting the corpus from the configured pages.
    #[must_use]
    pub fn from_config(config: Config) -> Self {
        let corpus = build_corpus(&config.pages_dir, &config.navigation);
        Self::new(config, corpus)
    }

    /// Site configuration.
    #[must_use]
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Navigation tree.
    #[must_use]
    pub fn navigation(&self) -> &[NavigationItem] {
        &self.config.navigation
    }

    /// Search corpus.
    #[must_use]
    pub fn corpus(&self) -> &[SearchDocument] {
        &self.corpus
    }

    /// Search index, built on first use.
    pub fn search_index(&self) -> &SearchIndex {
        self.index
            .get_or_init(|| SearchIndex::new(self.corpus.clone()))
    }

    /// Best-effort search, capped at [`MAX_RESULTS`].
    #[must_use]
    pub fn search(&self, query: &str) -> Vec<SearchResult> {
        let mut results = self.search_index().search(query);
        results.truncate(MAX_RESULTS);
        results
    }

    /// Side navigation for a route.
    #[must_use]
    pub fn side_nav(&self, route: &str) -> SideNav {
        SideNav::build(self.navigation(), route)
    }

    /// Where the site root redirects to.
    #[must_use]
    pub fn landing(&self) -> String {
        landing_destination(self.navigation())
    }

    /// Render the page at `route`.
    ///
    /// # Errors
    ///
    /// Returns `RenderError::PageNotFound` if the route is not in the
    /// navigation, `RenderError::FileNotFound` if its markdown file is
    /// missing and `RenderError::Io` if the file cannot be read.
    pub fn render_page(&self, route: &str) -> Result<RenderedPage, RenderError> {
        let entry = find_route(self.navigation(), route)
            .ok_or_else(|| RenderError::PageNotFound(strip_route(route).to_owned()))?;

        let file = self.config.page_file(entry.source_path);
        let markdown = match std::fs::read_to_string(&file) {
            Ok(markdown) => markdown,
            Err(err) if err.kind() == ErrorKind::NotFound => {
                return Err(RenderError::FileNotFound(file));
            }
            Err(source) => return Err(RenderError::Io { path: file, source }),
        };

        let result = self.renderer.render(&markdown);
        for warning in &result.warnings {
            tracing::warn!(route = %entry.route, %warning, "Page rendered with warning");
        }

        Ok(RenderedPage {
            title: entry.title.to_owned(),
            section: entry.section.map(str::to_owned),
            route: entry.route,
            result,
        })
    }
}

#[cfg(test)]
mod tests {
    use std::fs;
    use std::path::Path;

    use luma_config::Config;
    use pretty_assertions::assert_eq;

    use super::*;

    static_assertions::assert_impl_all!(super::Session: Send, Sync);

    fn site(dir: &Path) -> Config {
        fs::create_dir_all(dir.join("pages/api")).unwrap();
        fs::write(
            dir.join("pages/intro.md"),
            "# Intro\n\nWelcome to the installation guide.\n\n## Setup\n\n## Usage\n",
        )
        .unwrap();
        fs::write(dir.join("pages/api/client.md"), "# Client\n\n![d](/img/d.png)\n").unwrap();

        let yaml = r"
name: Demo
release_version: '2.1'
navigation:
  - type: page
    title: Intro
    path: intro.md
  - type: section
    title: API
    contents:
      - type: reference
        title: Client
        relative_path: api/client.md
      - type: page
        title: Gone
        path: gone.md
";
        Config::from_yaml(yaml, dir).unwrap()
    }

    #[test]
    fn test_from_config_builds_corpus() {
        let dir = tempfile::tempdir().unwrap();
        let session = Session::from_config(site(dir.path()));

        let ids: Vec<&str> = session.corpus().iter().map(|d| d.id.as_str()).collect();
        assert_eq!(ids, ["/intro", "/api/client"]);
    }

    #[test]
    fn test_index_built_once() {
        let dir = tempfile::tempdir().unwrap();
        let session = Session::from_config(site(dir.path()));

        let first: *const SearchIndex = session.search_index();
        let second: *const SearchIndex = session.search_index();
        assert_eq!(first, second);
        assert_eq!(session.search_index().len(), 2);
    }

    #[test]
    fn test_search_through_session() {
        let dir = tempfile::tempdir().unwrap();
        let session = Session::from_config(site(dir.path()));

        let results = session.search("installation");
        assert_eq!(results[0].path, "/intro");
        assert!(session.search("  ").is_empty());
    }

    #[test]
    fn test_render_page() {
        let dir = tempfile::tempdir().unwrap();
        let session = Session::from_config(site(dir.path()));

        let page = session.render_page("/api/client#top").unwrap();
        assert_eq!(page.route, "/api/client");
        assert_eq!(page.title, "Client");
        assert_eq!(page.section.as_deref(), Some("API"));
        assert!(page.result.html.contains(r#"src="/2.1/img/d.png""#));
    }

    #[test]
    fn test_render_page_errors() {
        let dir = tempfile::tempdir().unwrap();
        let session = Session::from_config(site(dir.path()));

        assert!(matches!(
            session.render_page("/nowhere"),
            Err(RenderError::PageNotFound(route)) if route == "/nowhere"
        ));
        assert!(matches!(
            session.render_page("/gone"),
            Err(RenderError::FileNotFound(_))
        ));
    }

    #[test]
    fn test_landing_and_side_nav() {
        let dir = tempfile::tempdir().unwrap();
        let session = Session::from_config(site(dir.path()));

        assert_eq!(session.landing(), "/intro");
        assert_eq!(session.side_nav("/intro").active_href(), Some("/intro"));
    }

    #[test]
    fn test_empty_navigation_degrades() {
        let session = Session::new(Config::default(), Vec::new());

        assert_eq!(session.landing(), "/");
        assert!(session.side_nav("/").entries().is_empty());
        assert!(session.search("anything").is_empty());
    }
}
