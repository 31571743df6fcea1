//! CLI error types.

use luma_config::ConfigError;
use luma_search::{CorpusError, SearchError};
use luma_server::ServerError;
use luma_site::RenderError;

/// CLI error type.
#[derive(Debug, thiserror::Error)]
pub(crate) enum CliError {
    #[error("{0}")]
    Config(#[from] ConfigError),

    #[error("{0}")]
    Io(#[from] std::io::Error),

    #[error("{0}")]
    Corpus(#[from] CorpusError),

    #[error("{0}")]
    Search(#[from] SearchError),

    #[error("{0}")]
    Render(#[from] RenderError),

    #[error("{0}")]
    Server(#[from] ServerError),
}
