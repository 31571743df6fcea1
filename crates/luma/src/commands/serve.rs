//! `luma serve` command implementation.

use std::path::{Path, PathBuf};

use clap::Args;
use luma_config::{CliSettings, Config};
use luma_server::run_server;
use luma_site::Session;

use super::block_on;
use crate::error::CliError;
use crate::output::Output;

/// Arguments for the serve command.
#[derive(Args)]
pub(crate) struct ServeArgs {
    /// Markdown pages directory (overrides config).
    #[arg(long)]
    pages_dir: Option<PathBuf>,

    /// Host to bind to (overrides config).
    #[arg(long)]
    host: Option<String>,

    /// Port to bind to (overrides config).
    #[arg(short, long)]
    port: Option<u16>,

    /// Release version for image paths (overrides config).
    #[arg(long, env = "LUMA_RELEASE_VERSION")]
    release_version: Option<String>,
}

impl ServeArgs {
    /// Start the preview server.
    pub(crate) fn execute(self, config_path: Option<&Path>) -> Result<(), CliError> {
        let output = Output::new();

        let cli_settings = CliSettings {
            host: self.host,
            port: self.port,
            pages_dir: self.pages_dir,
            release_version: self.release_version,
        };
        let config = Config::load(config_path, Some(&cli_settings))?;

        output.info(&format!(
            "Starting server on {}:{}",
            config.server.host, config.server.port
        ));
        output.info(&format!("Pages directory: {}", config.pages_dir.display()));
        if let Some(version) = config.release_version() {
            output.info(&format!("Release version: {version}"));
        }

        let session = Session::from_config(config);
        output.info(&format!("Search corpus: {} pages", session.corpus().len()));

        block_on(run_server(session))??;
        Ok(())
    }
}
