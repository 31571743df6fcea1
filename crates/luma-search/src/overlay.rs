//! Search overlay state machine.
//!
//! The overlay is either closed or open with a query, its results and a
//! selection cursor. Every transition happens on a discrete host event
//! (key press, click, query change). Closing always clears the query,
//! the results and the cursor together.
//!
//! Typed edits go through a [`QueryDebouncer`]: the field updates at once,
//! the index is searched when [`SearchOverlay::poll`] finds the edits have
//! settled.

use std::fmt::Write;
use std::time::{Duration, Instant};

use luma_navigation::Router;
use luma_renderer::escape_html;

use crate::debouncer::QueryDebouncer;
use crate::document::SearchResult;
use crate::index::SearchIndex;

/// Maximum number of results shown.
pub const MAX_RESULTS: usize = 8;

/// Element that has keyboard focus when a global key is pressed.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Focus {
    /// Page body or any non-editable element.
    Body,
    /// A text `<input>`.
    TextInput,
    /// A `<textarea>`.
    TextArea,
}

/// Keys the overlay reacts to.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Key {
    /// `/`, the global open shortcut.
    Slash,
    /// Move the cursor down.
    ArrowDown,
    /// Move the cursor up.
    ArrowUp,
    /// Open the selected result.
    Enter,
    /// Close the overlay.
    Escape,
}

/// Overlay state.
#[derive(Clone, Debug, Default, PartialEq)]
pub enum OverlayState {
    /// Not shown.
    #[default]
    Closed,
    /// Shown, with the current query and its results.
    Open {
        /// Query text as typed.
        query: String,
        /// At most [`MAX_RESULTS`] results, best first.
        results: Vec<SearchResult>,
        /// Index of the highlighted result.
        selected: usize,
    },
}

/// The search overlay.
#[derive(Clone, Debug, Default)]
pub struct SearchOverlay {
    state: OverlayState,
    debouncer: QueryDebouncer,
}

impl SearchOverlay {
    /// Create a closed overlay.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a closed overlay that searches `delay` after the last edit.
    #[must_use]
    pub fn with_debounce(delay: Duration) -> Self {
        Self {
            state: OverlayState::Closed,
            debouncer: QueryDebouncer::new(delay),
        }
    }

    /// Current state.
    #[must_use]
    pub fn state(&self) -> &OverlayState {
        &self.state
    }

    /// Whether the overlay is shown.
    #[must_use]
    pub fn is_open(&self) -> bool {
        matches!(self.state, OverlayState::Open { .. })
    }

    /// Current query; empty when closed.
    #[must_use]
    pub fn query(&self) -> &str {
        match &self.state {
            OverlayState::Open { query, .. } => query,
            OverlayState::Closed => "",
        }
    }

    /// Current results; empty when closed.
    #[must_use]
    pub fn results(&self) -> &[SearchResult] {
        match &self.state {
            OverlayState::Open { results, .. } => results,
            OverlayState::Closed => &[],
        }
    }

    /// Selection cursor; 0 when closed.
    #[must_use]
    pub fn selected(&self) -> usize {
        match &self.state {
            OverlayState::Open { selected, .. } => *selected,
            OverlayState::Closed => 0,
        }
    }

    /// Whether the "No results found" notice applies.
    #[must_use]
    pub fn no_results(&self) -> bool {
        match &self.state {
            OverlayState::Open { query, results, .. } => {
                !query.trim().is_empty() && results.is_empty()
            }
            OverlayState::Closed => false,
        }
    }

    /// Open with an empty query. Does nothing if already open.
    pub fn open(&mut self) {
        if !self.is_open() {
            self.state = OverlayState::Open {
                query: String::new(),
                results: Vec::new(),
                selected: 0,
            };
        }
    }

    /// Close and clear all transient state, including a pending edit.
    pub fn close(&mut self) {
        self.state = OverlayState::Closed;
        self.debouncer.cancel();
    }

    /// Handle a key pressed anywhere on the page.
    ///
    /// `/` opens the overlay unless an editable element has focus. Returns
    /// whether the key was consumed.
    pub fn on_global_key(&mut self, key: Key, focus: Focus) -> bool {
        match (key, focus) {
            (Key::Slash, Focus::Body) => {
                self.open();
                true
            }
            (Key::Slash, Focus::TextInput | Focus::TextArea)
            | (Key::ArrowDown | Key::ArrowUp | Key::Enter | Key::Escape, _) => false,
        }
    }

    /// Handle a click on the search trigger button.
    pub fn on_trigger_click(&mut self) {
        self.open();
    }

    /// Replace the query and re-run the search.
    ///
    /// Blank queries clear the results. The cursor always returns to the
    /// first result. Ignored while closed.
    pub fn set_query(&mut self, index: &SearchIndex, text: &str) {
        self.debouncer.cancel();
        let OverlayState::Open {
            query,
            results,
            selected,
        } = &mut self.state
        else {
            tracing::debug!("Ignoring query while search overlay is closed");
            return;
        };

        text.clone_into(query);
        *results = if text.trim().is_empty() {
            Vec::new()
        } else {
            let mut found = index.search(text);
            found.truncate(MAX_RESULTS);
            found
        };
        *selected = 0;
    }

    /// Record a typed edit of the query field.
    ///
    /// The field shows `text` at once; results keep matching the previous
    /// query until [`poll`](Self::poll) releases the edit. Ignored while
    /// closed.
    pub fn input(&mut self, text: &str, now: Instant) {
        let OverlayState::Open { query, .. } = &mut self.state else {
            tracing::debug!("Ignoring input while search overlay is closed");
            return;
        };
        text.clone_into(query);
        self.debouncer.input(text, now);
    }

    /// Run the search for the latest edit once it has settled.
    ///
    /// Returns whether a search ran.
    pub fn poll(&mut self, index: &SearchIndex, now: Instant) -> bool {
        let Some(text) = self.debouncer.poll(now) else {
            return false;
        };
        self.set_query(index, &text);
        true
    }

    /// When the host should call [`poll`](Self::poll) next, if an edit is pending.
    #[must_use]
    pub fn next_poll(&self) -> Option<Instant> {
        self.debouncer.deadline()
    }

    /// Handle a key pressed in the query field.
    ///
    /// Arrow keys move the cursor with wrap-around, Enter opens the
    /// selected result and Escape closes. Returns whether the key was
    /// consumed.
    pub fn on_key(&mut self, key: Key, router: &mut dyn Router) -> bool {
        let OverlayState::Open {
            results, selected, ..
        } = &mut self.state
        else {
            return false;
        };

        match key {
            Key::Escape => {
                self.close();
                true
            }
            Key::ArrowDown if !results.is_empty() => {
                *selected = (*selected + 1) % results.len();
                true
            }
            Key::ArrowUp if !results.is_empty() => {
                *selected = (*selected + results.len() - 1) % results.len();
                true
            }
            Key::Enter if !results.is_empty() => {
                let index = *selected;
                self.navigate_to(index, router);
                true
            }
            Key::ArrowDown | Key::ArrowUp | Key::Enter | Key::Slash => false,
        }
    }

    /// Highlight the result under the mouse pointer.
    pub fn on_hover(&mut self, index: usize) {
        if let OverlayState::Open {
            results, selected, ..
        } = &mut self.state
            && index < results.len()
        {
            *selected = index;
        }
    }

    /// Open the clicked result.
    pub fn on_result_click(&mut self, index: usize, router: &mut dyn Router) {
        self.navigate_to(index, router);
    }

    /// Handle a click outside the overlay panel.
    pub fn on_click_outside(&mut self) {
        self.close();
    }

    fn navigate_to(&mut self, index: usize, router: &mut dyn Router) {
        let Some(result) = self.results().get(index) else {
            return;
        };
        let path = result.path.clone();
        router.navigate(&path);
        self.close();
    }

    /// Markup of the button that opens the overlay.
    #[must_use]
    pub fn render_trigger_html() -> &'static str {
        concat!(
            r#"<button type="button" class="search-trigger">"#,
            r#"<span class="search-trigger-text">Search...</span>"#,
            r#"<kbd class="search-shortcut">/</kbd></button>"#,
        )
    }

    /// Markup of the open overlay panel; empty when closed.
    #[must_use]
    pub fn render_html(&self) -> String {
        let OverlayState::Open {
            query,
            results,
            selected,
        } = &self.state
        else {
            return String::new();
        };

        let mut out = String::from(r#"<div class="search-overlay"><div class="search-panel">"#);
        write!(
            out,
            r#"<input type="text" class="search-input" placeholder="Search..." value="{}" autofocus>"#,
            escape_html(query)
        )
        .unwrap();

        if !results.is_empty() {
            out.push_str(r#"<div class="search-results">"#);
            for (idx, result) in results.iter().enumerate() {
                let class = if idx == *selected {
                    "search-result selected"
                } else {
                    "search-result"
                };
                write!(
                    out,
                    r#"<button type="button" class="{class}" data-index="{idx}" data-path="{}"><div class="search-result-title">{}</div>"#,
                    escape_html(&result.path),
                    escape_html(&result.title)
                )
                .unwrap();
                if !result.section.is_empty() {
                    write!(
                        out,
                        r#"<div class="search-result-section">{}</div>"#,
                        escape_html(&result.section)
                    )
                    .unwrap();
                }
                out.push_str("</button>");
            }
            out.push_str("</div>");
        }

        if self.no_results() {
            out.push_str(r#"<div class="search-no-results">No results found</div>"#);
        }

        out.push_str("</div></div>");
        out
    }
}

#[cfg(test)]
mod tests {
    use luma_navigation::MemoryRouter;
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::document::SearchDocument;

    fn index_of(count: usize) -> SearchIndex {
        let documents = (0..count)
            .map(|i| SearchDocument {
                id: format!("/page{i}"),
                title: format!("Page {i}"),
                path: format!("/page{i}"),
                headings: String::new(),
                content: "common words here".to_owned(),
                section: if i == 0 { "Guides".to_owned() } else { String::new() },
            })
            .collect();
        SearchIndex::new(documents)
    }

    fn open_with(index: &SearchIndex, query: &str) -> SearchOverlay {
        let mut overlay = SearchOverlay::new();
        overlay.open();
        overlay.set_query(index, query);
        overlay
    }

    #[test]
    fn test_starts_closed() {
        let overlay = SearchOverlay::new();
        assert_eq!(overlay.state(), &OverlayState::Closed);
        assert_eq!(overlay.render_html(), "");
    }

    #[test]
    fn test_slash_opens_only_from_body() {
        let mut overlay = SearchOverlay::new();

        assert!(!overlay.on_global_key(Key::Slash, Focus::TextInput));
        assert!(!overlay.on_global_key(Key::Slash, Focus::TextArea));
        assert!(!overlay.is_open());

        assert!(overlay.on_global_key(Key::Slash, Focus::Body));
        assert_eq!(
            overlay.state(),
            &OverlayState::Open {
                query: String::new(),
                results: Vec::new(),
                selected: 0,
            }
        );
    }

    #[test]
    fn test_trigger_click_opens() {
        let mut overlay = SearchOverlay::new();
        overlay.on_trigger_click();
        assert!(overlay.is_open());
    }

    #[test]
    fn test_blank_query_clears_results_and_cursor() {
        let index = index_of(3);
        let mut overlay = open_with(&index, "common");
        let mut router = MemoryRouter::default();
        overlay.on_key(Key::ArrowDown, &mut router);
        assert_eq!(overlay.selected(), 1);

        for blank in ["", " ", "\t\n"] {
            overlay.set_query(&index, blank);
            assert!(overlay.results().is_empty());
            assert_eq!(overlay.selected(), 0);
            assert!(!overlay.no_results());
        }
    }

    #[test]
    fn test_results_capped_and_sorted() {
        let index = index_of(12);
        let overlay = open_with(&index, "common");

        assert_eq!(overlay.results().len(), MAX_RESULTS);
        assert!(
            overlay
                .results()
                .windows(2)
                .all(|w| w[0].score >= w[1].score)
        );
    }

    #[test]
    fn test_query_change_resets_cursor() {
        let index = index_of(3);
        let mut overlay = open_with(&index, "common");
        let mut router = MemoryRouter::default();
        overlay.on_key(Key::ArrowDown, &mut router);
        overlay.on_key(Key::ArrowDown, &mut router);

        overlay.set_query(&index, "words");
        assert_eq!(overlay.selected(), 0);
    }

    #[test]
    fn test_arrow_down_wraps_modulo_result_count() {
        let index = index_of(3);
        let mut router = MemoryRouter::default();

        for presses in 0..10 {
            let mut overlay = open_with(&index, "common");
            let count = overlay.results().len();
            for _ in 0..presses {
                overlay.on_key(Key::ArrowDown, &mut router);
            }
            assert_eq!(overlay.selected(), presses % count);
        }
    }

    #[test]
    fn test_arrow_up_wraps_backwards() {
        let index = index_of(3);
        let mut overlay = open_with(&index, "common");
        let mut router = MemoryRouter::default();

        overlay.on_key(Key::ArrowUp, &mut router);
        assert_eq!(overlay.selected(), 2);
        overlay.on_key(Key::ArrowUp, &mut router);
        assert_eq!(overlay.selected(), 1);
    }

    #[test]
    fn test_arrows_ignored_without_results() {
        let index = index_of(3);
        let mut overlay = open_with(&index, "zzzzzzzz");
        let mut router = MemoryRouter::at("/");

        assert!(overlay.no_results());
        assert!(!overlay.on_key(Key::ArrowDown, &mut router));
        assert!(!overlay.on_key(Key::Enter, &mut router));
        assert_eq!(router.history(), ["/".to_owned()]);
    }

    #[test]
    fn test_enter_navigates_and_closes() {
        let index = index_of(3);
        let mut overlay = open_with(&index, "common");
        let mut router = MemoryRouter::at("/");
        overlay.on_key(Key::ArrowDown, &mut router);
        let expected = overlay.results()[1].path.clone();

        assert!(overlay.on_key(Key::Enter, &mut router));
        assert_eq!(router.current_path(), expected);
        assert_eq!(overlay.query(), "");
        assert!(overlay.results().is_empty());
        assert!(!overlay.is_open());
    }

    #[test]
    fn test_escape_closes_even_without_results() {
        let index = index_of(3);
        let mut overlay = open_with(&index, "zzzzzzzz");
        let mut router = MemoryRouter::default();

        assert!(overlay.on_key(Key::Escape, &mut router));
        assert_eq!(overlay.state(), &OverlayState::Closed);
    }

    #[test]
    fn test_click_outside_clears_state() {
        let index = index_of(3);
        let mut overlay = open_with(&index, "common");

        overlay.on_click_outside();
        assert_eq!(overlay.query(), "");
        assert!(overlay.results().is_empty());

        overlay.open();
        assert_eq!(overlay.query(), "");
        assert!(overlay.results().is_empty());
        assert_eq!(overlay.selected(), 0);
    }

    #[test]
    fn test_hover_and_click() {
        let index = index_of(3);
        let mut overlay = open_with(&index, "common");
        let mut router = MemoryRouter::default();

        overlay.on_hover(2);
        assert_eq!(overlay.selected(), 2);
        overlay.on_hover(99);
        assert_eq!(overlay.selected(), 2);

        let target = overlay.results()[0].path.clone();
        overlay.on_result_click(0, &mut router);
        assert_eq!(router.current_path(), target);
        assert!(!overlay.is_open());
    }

    #[test]
    fn test_set_query_ignored_when_closed() {
        let index = index_of(3);
        let mut overlay = SearchOverlay::new();
        overlay.set_query(&index, "common");
        assert_eq!(overlay.state(), &OverlayState::Closed);
    }

    #[test]
    fn test_typed_edits_search_once_after_settling() {
        let index = index_of(3);
        let mut overlay = SearchOverlay::with_debounce(Duration::from_millis(10));
        overlay.open();
        let start = Instant::now();

        overlay.input("c", start);
        overlay.input("com", start + Duration::from_millis(4));
        overlay.input("common", start + Duration::from_millis(8));

        assert_eq!(overlay.query(), "common");
        assert!(overlay.results().is_empty());
        assert!(!overlay.poll(&index, start + Duration::from_millis(12)));
        assert_eq!(overlay.next_poll(), Some(start + Duration::from_millis(18)));

        assert!(overlay.poll(&index, start + Duration::from_millis(18)));
        assert_eq!(overlay.results().len(), 3);
        assert!(!overlay.poll(&index, start + Duration::from_secs(1)));
        assert_eq!(overlay.next_poll(), None);
    }

    #[test]
    fn test_close_drops_pending_edit() {
        let index = index_of(3);
        let mut overlay = SearchOverlay::with_debounce(Duration::from_millis(10));
        overlay.open();
        let start = Instant::now();

        overlay.input("common", start);
        overlay.close();
        overlay.open();

        assert!(!overlay.poll(&index, start + Duration::from_secs(1)));
        assert_eq!(overlay.query(), "");
        assert!(overlay.results().is_empty());
    }

    #[test]
    fn test_input_ignored_when_closed() {
        let index = index_of(3);
        let mut overlay = SearchOverlay::new();
        let start = Instant::now();

        overlay.input("common", start);
        assert_eq!(overlay.next_poll(), None);
        assert!(!overlay.poll(&index, start + Duration::from_secs(1)));
    }

    #[test]
    fn test_render_html_marks_selection_and_section() {
        let index = index_of(2);
        let overlay = open_with(&index, "page0");
        let html = overlay.render_html();

        assert!(html.contains(r#"class="search-result selected" data-index="0" data-path="/page0""#));
        assert!(html.contains(r#"<div class="search-result-section">Guides</div>"#));
        assert!(!html.contains("No results found"));
    }

    #[test]
    fn test_render_html_no_results_notice() {
        let index = index_of(2);
        let overlay = open_with(&index, "<zzzzzzzz>");
        let html = overlay.render_html();

        assert!(html.contains("No results found"));
        assert!(html.contains(r#"value="&lt;zzzzzzzz&gt;""#));
    }
}
