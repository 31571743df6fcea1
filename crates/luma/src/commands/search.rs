//! `luma search` command implementation.

use std::path::{Path, PathBuf};

use clap::Args;
use luma_config::Config;
use luma_search::{CORPUS_FILENAME, MAX_RESULTS, SearchIndex, read_corpus};

use crate::error::CliError;
use crate::output::Output;

/// Arguments for the search command.
#[derive(Args)]
pub(crate) struct SearchArgs {
    /// Search query.
    query: String,

    /// Corpus file (default: search-index.json next to the config).
    #[arg(long)]
    corpus: Option<PathBuf>,
}

impl SearchArgs {
    /// Query a corpus file and print the top results.
    pub(crate) fn execute(self, config_path: Option<&Path>) -> Result<(), CliError> {
        let output = Output::new();

        let corpus_path = match self.corpus {
            Some(path) => path,
            None => Config::load(config_path, None)?
                .root_dir
                .join(CORPUS_FILENAME),
        };
        let index = SearchIndex::new(read_corpus(&corpus_path)?);

        let mut results = index.try_search(&self.query)?;
        results.truncate(MAX_RESULTS);

        if results.is_empty() {
            output.warning(&format!("No results for '{}'", self.query));
            return Ok(());
        }
        for result in &results {
            output.hit(result.score, &result.path, &result.title, &result.section);
        }
        Ok(())
    }
}
