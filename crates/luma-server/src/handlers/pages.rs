//! Page endpoint.
//!
//! Renders navigation pages through the document shell. The configured
//! favicon is served from the same catch-all route.

use std::io::ErrorKind;
use std::path::Path as FsPath;
use std::sync::Arc;

use axum::extract::{Path, State};
use axum::http::header;
use axum::response::{Html, IntoResponse, Response};
use luma_site::DocumentShell;

use crate::error::ServerError;
use crate::state::AppState;

/// Handle GET /{*path}.
pub(crate) async fn get_page(
    Path(path): Path<String>,
    State(state): State<Arc<AppState>>,
) -> Result<Response, ServerError> {
    let config = state.session.config();
    if let Some(favicon) = &config.favicon
        && favicon.trim_start_matches('/') == path
    {
        let file = config.root_dir.join(&path);
        return serve_file(&file).await;
    }

    let route = format!("/{path}");
    let page = state.session.render_page(&route)?;
    let html = DocumentShell::render(&state.session, &page, &route);
    Ok(Html(html).into_response())
}

async fn serve_file(file: &FsPath) -> Result<Response, ServerError> {
    let bytes = match tokio::fs::read(file).await {
        Ok(bytes) => bytes,
        Err(err) if err.kind() == ErrorKind::NotFound => {
            return Err(ServerError::FileNotFound(file.to_path_buf()));
        }
        Err(err) => return Err(err.into()),
    };
    Ok(([(header::CONTENT_TYPE, content_type(file))], bytes).into_response())
}

/// Content type for a served file, by extension.
fn content_type(file: &FsPath) -> &'static str {
    match file.extension().and_then(|ext| ext.to_str()) {
        Some("ico") => "image/x-icon",
        Some("png") => "image/png",
        Some("svg") => "image/svg+xml",
        Some("jpg" | "jpeg") => "image/jpeg",
        Some("gif") => "image/gif",
        _ => "application/octet-stream",
    }
}
