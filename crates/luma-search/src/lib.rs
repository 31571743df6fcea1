//! Client-side search for Luma sites.
//!
//! - [`SearchIndex`]: weighted full-text index over a fixed corpus with
//!   prefix and fuzzy matching
//! - [`SearchOverlay`]: the keyboard-driven search panel as a state machine
//! - [`QueryDebouncer`]: coalesces rapid query edits
//! - [`build_corpus`]: extracts [`SearchDocument`]s from the site's pages
//!
//! # Example
//!
//! ```
//! use luma_search::{SearchDocument, SearchIndex};
//!
//! let index = SearchIndex::new(vec![SearchDocument {
//!     id: "/install".to_owned(),
//!     title: "Installation".to_owned(),
//!     path: "/install".to_owned(),
//!     ..SearchDocument::default()
//! }]);
//!
//! let results = index.search("instal");
//! assert_eq!(results[0].path, "/install");
//! assert!(index.search("   ").is_empty());
//! ```

mod corpus;
mod debouncer;
mod document;
mod error;
mod index;
mod overlay;

pub use corpus::{CORPUS_FILENAME, build_corpus, extract_document, read_corpus, write_corpus};
pub use debouncer::{DEFAULT_DEBOUNCE, QueryDebouncer};
pub use document::{SearchDocument, SearchResult};
pub use error::{CorpusError, SearchError};
pub use index::{FieldBoost, MAX_QUERY_LEN, SearchIndex, SearchOptions, tokenize};
pub use overlay::{Focus, Key, MAX_RESULTS, OverlayState, SearchOverlay};
