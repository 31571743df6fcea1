//! Search errors.

use std::path::PathBuf;

/// Error raised while querying the index.
#[derive(Debug, thiserror::Error)]
pub enum SearchError {
    /// Query text is too long to be a real query.
    #[error("Query is {len} bytes, limit is {max}")]
    QueryTooLong {
        /// Query length in bytes.
        len: usize,
        /// Maximum accepted length.
        max: usize,
    },
    /// Fuzziness option is negative or not finite.
    #[error("Invalid fuzziness: {0}")]
    InvalidFuzziness(f64),
}

/// Error raised while reading or writing a search corpus.
#[derive(Debug, thiserror::Error)]
pub enum CorpusError {
    /// I/O error on a corpus file.
    #[error("I/O error on {}: {source}", path.display())]
    Io {
        /// File being read or written.
        path: PathBuf,
        /// Underlying error.
        #[source]
        source: std::io::Error,
    },
    /// Corpus file is not a JSON array of documents.
    #[error("Invalid search corpus: {0}")]
    Json(#[from] serde_json::Error),
}
