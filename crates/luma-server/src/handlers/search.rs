//! Search API endpoint.

use std::sync::Arc;

use axum::Json;
use axum::extract::{Query, State};
use luma_search::SearchResult;
use serde::{Deserialize, Serialize};

use crate::state::AppState;

/// Query parameters for GET /api/search.
#[derive(Debug, Default, Deserialize)]
pub(crate) struct SearchQuery {
    #[serde(default)]
    q: String,
}

/// Response for GET /api/search.
#[derive(Debug, Serialize)]
pub(crate) struct SearchResponse {
    /// Query as received.
    query: String,
    /// Ranked results, at most eight.
    results: Vec<SearchResult>,
}

/// Handle GET /api/search.
pub(crate) async fn get_search(
    State(state): State<Arc<AppState>>,
    Query(SearchQuery { q }): Query<SearchQuery>,
) -> Json<SearchResponse> {
    let results = state.session.search(&q);
    Json(SearchResponse { query: q, results })
}
