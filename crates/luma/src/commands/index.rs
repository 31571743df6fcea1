//! `luma index` command implementation.

use std::path::{Path, PathBuf};

use clap::Args;
use luma_config::{CliSettings, Config};
use luma_search::{CORPUS_FILENAME, build_corpus, write_corpus};

use crate::error::CliError;
use crate::output::Output;

/// Arguments for the index command.
#[derive(Args)]
pub(crate) struct IndexArgs {
    /// Output file (default: search-index.json next to the config).
    #[arg(short, long)]
    pub(crate) output: Option<PathBuf>,

    /// Markdown pages directory (overrides config).
    #[arg(long)]
    pub(crate) pages_dir: Option<PathBuf>,
}

impl IndexArgs {
    /// Build the search corpus and write it as JSON.
    pub(crate) fn execute(self, config_path: Option<&Path>) -> Result<(), CliError> {
        let output = Output::new();

        let cli_settings = CliSettings {
            pages_dir: self.pages_dir,
            ..CliSettings::default()
        };
        let config = Config::load(config_path, Some(&cli_settings))?;
        output.info(&format!("Pages: {}", config.pages_dir.display()));

        let corpus = build_corpus(&config.pages_dir, &config.navigation);
        let path = self
            .output
            .unwrap_or_else(|| config.root_dir.join(CORPUS_FILENAME));
        write_corpus(&path, &corpus)?;

        output.success(&format!(
            "Indexed {} pages into {}",
            corpus.len(),
            path.display()
        ));
        Ok(())
    }
}
