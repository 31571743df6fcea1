//! Routes and the host router.

/// Strip the query string and fragment from a route.
///
/// # Examples
///
/// ```
/// use luma_navigation::strip_route;
///
/// assert_eq!(strip_route("/guide?x=1#install"), "/guide");
/// assert_eq!(strip_route("/guide"), "/guide");
/// ```
#[must_use]
pub fn strip_route(route: &str) -> &str {
    let end = route.find(['?', '#']).unwrap_or(route.len());
    &route[..end]
}

/// Fragment of a route, without the `#`.
///
/// Returns `None` when the route has no fragment or it is empty.
#[must_use]
pub fn route_fragment(route: &str) -> Option<&str> {
    route
        .split_once('#')
        .map(|(_, fragment)| fragment)
        .filter(|fragment| !fragment.is_empty())
}

/// The host router.
///
/// The core only needs to know where the user is and to send them
/// somewhere else.
pub trait Router {
    /// Current route, possibly with query string and fragment.
    fn current_path(&self) -> String;

    /// Navigate to a route.
    fn navigate(&mut self, path: &str);
}

/// In-memory router that records every navigation.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct MemoryRouter {
    history: Vec<String>,
}

impl MemoryRouter {
    /// Create a router positioned at `path`.
    #[must_use]
    pub fn at(path: impl Into<String>) -> Self {
        Self {
            history: vec![path.into()],
        }
    }

    /// Every route visited, oldest first.
    #[must_use]
    pub fn history(&self) -> &[String] {
        &self.history
    }
}

impl Router for MemoryRouter {
    fn current_path(&self) -> String {
        self.history.last().cloned().unwrap_or_else(|| "/".to_owned())
    }

    fn navigate(&mut self, path: &str) {
        tracing::debug!(path, "Navigating");
        self.history.push(path.to_owned());
    }
}
