//! Application state.

use luma_site::Session;

/// State shared across all request handlers.
pub(crate) struct AppState {
    /// Site session: configuration, corpus, search index and renderer.
    pub(crate) session: Session,
}
