//! Site root.

use std::sync::Arc;

use axum::extract::State;
use axum::response::Redirect;

use crate::state::AppState;

/// Handle GET /: redirect to the first page of the navigation.
pub(crate) async fn get_root(State(state): State<Arc<AppState>>) -> Redirect {
    let destination = state.session.landing();
    tracing::debug!(%destination, "Redirecting site root");
    Redirect::temporary(&destination)
}
