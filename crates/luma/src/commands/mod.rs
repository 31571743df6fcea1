//! CLI command implementations.

pub(crate) mod check;
pub(crate) mod index;
pub(crate) mod render;
pub(crate) mod search;
pub(crate) mod serve;

use std::future::Future;

pub(crate) use index::IndexArgs;
pub(crate) use render::RenderArgs;
pub(crate) use search::SearchArgs;
pub(crate) use serve::ServeArgs;

use crate::error::CliError;

/// Run a future to completion on a fresh multi-threaded runtime.
pub(crate) fn block_on<F: Future>(future: F) -> Result<F::Output, CliError> {
    let runtime = tokio::runtime::Runtime::new()?;
    Ok(runtime.block_on(future))
}
