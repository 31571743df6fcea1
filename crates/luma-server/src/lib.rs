//! Preview HTTP server for Luma documentation sites.
//!
//! Serves a [`Session`] over axum:
//! - `GET /` redirects to the first page of the navigation
//! - `GET /luma.yaml` returns the raw configuration file
//! - `GET /api/search?q=` returns up to eight ranked results as JSON
//! - `GET /api/navigation?path=` returns the side navigation view model
//! - `GET /{*path}` renders the page through the document shell
//!
//! # Quick Start
//!
//! ```no_run
//! # async fn run() -> Result<(), Box<dyn std::error::Error>> {
//! use luma_config::Config;
//! use luma_site::Session;
//!
//! let config = Config::load(None, None)?;
//! luma_server::run_server(Session::from_config(config)).await?;
//! # Ok(())
//! # }
//! ```

mod app;
mod error;
mod handlers;
mod state;

use std::net::SocketAddr;

use luma_site::Session;

pub use app::create_router;
pub use error::ServerError;

/// Serve `session` on the host and port from its configuration until Ctrl-C.
///
/// # Errors
///
/// Returns an error if the address is invalid or the listener cannot be
/// bound.
pub async fn run_server(session: Session) -> Result<(), ServerError> {
    let server = &session.config().server;
    let address = format!("{}:{}", server.host, server.port);
    let addr: SocketAddr = address
        .parse()
        .map_err(|_| ServerError::InvalidAddress(address.clone()))?;

    let app = create_router(session);

    tracing::info!(address = %addr, "Starting server");
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}

/// Wait for shutdown signal (Ctrl-C).
async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %err, "Failed to install Ctrl+C handler");
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutdown signal received, stopping server...");
}
