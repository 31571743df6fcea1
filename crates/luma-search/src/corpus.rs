//! Search corpus extraction.
//!
//! Builds one [`SearchDocument`] per routed page of the navigation tree from
//! its markdown source, and reads/writes the corpus as a JSON array
//! (`search-index.json`).

use std::path::Path;
use std::sync::LazyLock;

use luma_navigation::{NavigationItem, RoutedEntry, flatten};
use rayon::prelude::*;
use regex::Regex;

use crate::document::SearchDocument;
use crate::error::CorpusError;

/// Default corpus file name.
pub const CORPUS_FILENAME: &str = "search-index.json";

/// Maximum characters of body text kept per document.
const CONTENT_PREVIEW_CHARS: usize = 300;

static HEADING_TEXT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?m)^#{1,3}[ \t]+(.+)$").unwrap());
static CODE_FENCE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"(?s)```.*?```").unwrap());
static INLINE_CODE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"`[^`]+`").unwrap());
static HEADING_LINE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?m)^#+[ \t]+.+$").unwrap());
static LINK: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\[([^\]]+)\]\([^)]+\)").unwrap());
static EMPHASIS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[*_]{1,2}([^*_]+)[*_]{1,2}").unwrap());
static WHITESPACE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\s+").unwrap());

/// Build a search document from a page's markdown.
///
/// Headings of levels 1 to 3 are joined into the `headings` field. The body
/// is stripped of code, headings, link targets and emphasis markers, then
/// whitespace-collapsed and cut to a short preview.
#[must_use]
pub fn extract_document(markdown: &str, entry: &RoutedEntry<'_>) -> SearchDocument {
    let headings: Vec<&str> = HEADING_TEXT
        .captures_iter(markdown)
        .filter_map(|caps| caps.get(1))
        .map(|m| m.as_str().trim())
        .collect();

    let text = CODE_FENCE.replace_all(markdown, "");
    let text = INLINE_CODE.replace_all(&text, "");
    let text = HEADING_LINE.replace_all(&text, "");
    let text = LINK.replace_all(&text, "$1");
    let text = EMPHASIS.replace_all(&text, "$1");
    let text = WHITESPACE.replace_all(&text, " ");
    let content: String = text.trim().chars().take(CONTENT_PREVIEW_CHARS).collect();

    SearchDocument {
        id: entry.route.clone(),
        title: entry.title.to_owned(),
        path: entry.route.clone(),
        headings: headings.join(" "),
        content,
        section: entry.section.unwrap_or_default().to_owned(),
    }
}

/// Build the corpus for every routed page whose markdown file exists.
///
/// Pages are read in parallel; the output keeps navigation order. Missing
/// files are skipped, unreadable ones are skipped with a warning.
#[must_use]
pub fn build_corpus(pages_dir: &Path, items: &[NavigationItem]) -> Vec<SearchDocument> {
    let entries = flatten(items);
    let documents: Vec<SearchDocument> = entries
        .par_iter()
        .filter_map(|entry| {
            let file = pages_dir.join(entry.source_path.trim_start_matches('/'));
            if !file.is_file() {
                tracing::debug!(path = %file.display(), "Skipping page without source file");
                return None;
            }
            match std::fs::read_to_string(&file) {
                Ok(markdown) => Some(extract_document(&markdown, entry)),
                Err(err) => {
                    tracing::warn!(path = %file.display(), error = %err, "Failed to read page");
                    None
                }
            }
        })
        .collect();

    tracing::debug!(
        pages = entries.len(),
        documents = documents.len(),
        "Built search corpus"
    );
    documents
}

/// Read a corpus file.
///
/// # Errors
///
/// Returns error if the file cannot be read or is not a JSON array of
/// documents.
pub fn read_corpus(path: &Path) -> Result<Vec<SearchDocument>, CorpusError> {
    let content = std::fs::read_to_string(path).map_err(|source| CorpusError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(serde_json::from_str(&content)?)
}

/// Write a corpus file, creating parent directories as needed.
///
/// # Errors
///
/// Returns error if the file cannot be written.
pub fn write_corpus(path: &Path, documents: &[SearchDocument]) -> Result<(), CorpusError> {
    let io_error = |source| CorpusError::Io {
        path: path.to_path_buf(),
        source,
    };
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).map_err(io_error)?;
    }
    let json = serde_json::to_string(documents)?;
    std::fs::write(path, json).map_err(io_error)?;
    tracing::info!(path = %path.display(), documents = documents.len(), "Wrote search corpus");
    Ok(())
}
