//! `luma check` command implementation.

use std::path::{Path, PathBuf};

use luma_config::{CONFIG_FILENAME, Config};
use luma_navigation::{MemoryRouter, flatten};
use luma_site::{FileConfigSource, LandingOutcome, cancel_pair, landing_redirect};

use super::block_on;
use crate::error::CliError;
use crate::output::Output;

/// Validate the configuration and resolve the landing destination.
///
/// The destination is resolved the way a visitor to `/` would see it: by
/// re-fetching the configuration file. Ctrl-C while fetching cancels the
/// redirect.
pub(crate) fn execute(config_path: Option<&Path>) -> Result<(), CliError> {
    let output = Output::new();

    let config = Config::load(config_path, None)?;
    let path = config
        .config_path
        .clone()
        .unwrap_or_else(|| PathBuf::from(CONFIG_FILENAME));

    output.success(&format!("Configuration OK: {}", path.display()));
    output.info(&format!("Site: {}", config.name));
    output.info(&format!("Pages: {}", flatten(&config.navigation).len()));

    match block_on(resolve_landing(&path))? {
        LandingOutcome::Navigated(destination) => {
            output.highlight("Landing page:");
            output.result(&destination);
        }
        LandingOutcome::Cancelled => output.warning("Landing resolution cancelled"),
    }

    Ok(())
}

async fn resolve_landing(path: &Path) -> LandingOutcome {
    let (handle, signal) = cancel_pair();
    let source = FileConfigSource::new(path);
    let mut router = MemoryRouter::at("/");

    let redirect = landing_redirect(&source, &mut router, signal);
    tokio::pin!(redirect);

    tokio::select! {
        outcome = &mut redirect => outcome,
        Ok(()) = tokio::signal::ctrl_c() => {
            handle.cancel();
            redirect.await
        }
    }
}
