//! Router construction.

use std::sync::Arc;

use axum::Router;
use axum::routing::get;
use luma_site::Session;

use crate::handlers;
use crate::state::AppState;

/// Create the application router around a session.
pub fn create_router(session: Session) -> Router {
    let state = Arc::new(AppState { session });

    let api_routes = Router::new()
        .route("/api/search", get(handlers::search::get_search))
        .route("/api/navigation", get(handlers::navigation::get_navigation));

    Router::new()
        .route("/", get(handlers::landing::get_root))
        .route("/luma.yaml", get(handlers::config::get_config))
        .merge(api_routes)
        .route("/{*path}", get(handlers::pages::get_page))
        .with_state(state)
}
