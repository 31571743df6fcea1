//! `luma render` command implementation.

use std::path::{Path, PathBuf};

use clap::Args;
use luma_config::{CliSettings, Config};
use luma_site::{DocumentShell, Session};

use crate::error::CliError;
use crate::output::Output;

/// Arguments for the render command.
#[derive(Args)]
pub(crate) struct RenderArgs {
    /// Route to render, e.g. `/guides/usage#setup`.
    route: String,

    /// Write the document here instead of stdout.
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Release version for image paths (overrides config).
    #[arg(long, env = "LUMA_RELEASE_VERSION")]
    release_version: Option<String>,
}

impl RenderArgs {
    /// Render one page through the document shell.
    pub(crate) fn execute(self, config_path: Option<&Path>) -> Result<(), CliError> {
        let output = Output::new();

        let cli_settings = CliSettings {
            release_version: self.release_version,
            ..CliSettings::default()
        };
        let config = Config::load(config_path, Some(&cli_settings))?;
        let session = Session::new(config, Vec::new());

        let page = session.render_page(&self.route)?;
        for warning in &page.result.warnings {
            output.warning(&format!("Warning: {warning}"));
        }
        let html = DocumentShell::render(&session, &page, &self.route);

        match self.output {
            Some(path) => {
                std::fs::write(&path, html)?;
                output.success(&format!("Rendered {} to {}", page.route, path.display()));
            }
            None => output.result(&html),
        }
        Ok(())
    }
}
