//! Navigation API endpoint.
//!
//! Returns the side navigation view model for a path.

use std::sync::Arc;

use axum::Json;
use axum::extract::{Query, State};
use luma_navigation::SideNav;
use serde::Deserialize;

use crate::state::AppState;

/// Query parameters for GET /api/navigation.
#[derive(Debug, Default, Deserialize)]
pub(crate) struct NavigationQuery {
    /// Current location; defaults to the site root.
    path: Option<String>,
}

/// Handle GET /api/navigation.
pub(crate) async fn get_navigation(
    State(state): State<Arc<AppState>>,
    Query(query): Query<NavigationQuery>,
) -> Json<SideNav> {
    let path = query.path.as_deref().unwrap_or("/");
    Json(state.session.side_nav(path))
}
