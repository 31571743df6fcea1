//! Page rendering errors.

use std::path::PathBuf;

/// Error returned when a page cannot be rendered.
#[derive(Debug, thiserror::Error)]
pub enum RenderError {
    /// Route is not part of the navigation.
    #[error("Page not found: {0}")]
    PageNotFound(String),
    /// Route is in the navigation but its markdown file is missing.
    #[error("Source file not found: {}", .0.display())]
    FileNotFound(PathBuf),
    /// I/O error reading the markdown file.
    #[error("I/O error reading {}: {source}", path.display())]
    Io {
        /// File being read.
        path: PathBuf,
        /// Underlying error.
        #[source]
        source: std::io::Error,
    },
}
