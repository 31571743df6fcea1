//! Raw configuration endpoint.
//!
//! Serves the `luma.yaml` the session was loaded from, so clients can run
//! their own landing redirect against it.

use std::io::ErrorKind;
use std::sync::Arc;

use axum::extract::State;
use axum::http::header;
use axum::response::IntoResponse;

use crate::error::ServerError;
use crate::state::AppState;

/// Handle GET /luma.yaml.
pub(crate) async fn get_config(
    State(state): State<Arc<AppState>>,
) -> Result<impl IntoResponse, ServerError> {
    let Some(path) = state.session.config().config_path.clone() else {
        return Err(ServerError::PageNotFound("/luma.yaml".to_owned()));
    };

    let content = match tokio::fs::read_to_string(&path).await {
        Ok(content) => content,
        Err(err) if err.kind() == ErrorKind::NotFound => {
            return Err(ServerError::FileNotFound(path));
        }
        Err(err) => return Err(err.into()),
    };

    Ok((
        [(header::CONTENT_TYPE, "application/yaml; charset=utf-8")],
        content,
    ))
}
