//! In-memory full-text index.
//!
//! Each document is indexed over three fields (title, headings, content).
//! A query is tokenized and every query term is matched against the
//! vocabulary of each field exactly, as a prefix, or within a bounded edit
//! distance. Matches are scored with BM25 per field, scaled by the field
//! boost and by how close the match is, and summed per document.

use std::collections::{BTreeMap, HashSet};

use serde::{Deserialize, Serialize};

use crate::document::{SearchDocument, SearchResult};
use crate::error::SearchError;

/// Longest accepted query, in bytes.
pub const MAX_QUERY_LEN: usize = 512;

const BM25_K1: f64 = 1.2;
const BM25_B: f64 = 0.7;

/// Upper bound on the edit distance tolerated by fuzzy matching.
const MAX_EDIT_DISTANCE: usize = 6;

const PREFIX_WEIGHT: f64 = 0.375;
const FUZZY_WEIGHT: f64 = 0.45;

/// Relative weight of each indexed field.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct FieldBoost {
    /// Page title.
    pub title: f64,
    /// Heading texts.
    pub headings: f64,
    /// Body preview.
    pub content: f64,
}

impl Default for FieldBoost {
    fn default() -> Self {
        Self {
            title: 3.0,
            headings: 2.0,
            content: 1.0,
        }
    }
}

/// Query-time matching options.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct SearchOptions {
    /// Field weights.
    pub boost: FieldBoost,
    /// Fraction of a query term's length tolerated as edit distance.
    pub fuzzy: f64,
    /// Whether query terms also match longer terms they start.
    pub prefix: bool,
}

impl Default for SearchOptions {
    fn default() -> Self {
        Self {
            boost: FieldBoost::default(),
            fuzzy: 0.2,
            prefix: true,
        }
    }
}

impl SearchOptions {
    fn validate(&self) -> Result<(), SearchError> {
        if !self.fuzzy.is_finite() || self.fuzzy < 0.0 {
            return Err(SearchError::InvalidFuzziness(self.fuzzy));
        }
        Ok(())
    }

    #[allow(
        clippy::cast_possible_truncation,
        clippy::cast_sign_loss,
        clippy::cast_precision_loss
    )]
    fn max_distance(&self, term_len: usize) -> usize {
        let allowed = (term_len as f64 * self.fuzzy).round() as usize;
        allowed.min(MAX_EDIT_DISTANCE)
    }
}

/// Split text into lowercase alphanumeric terms.
///
/// # Examples
///
/// ```
/// use luma_search::tokenize;
///
/// let terms: Vec<String> = tokenize("Getting-Started: v2.0").collect();
/// assert_eq!(terms, ["getting", "started", "v2", "0"]);
/// ```
pub fn tokenize(text: &str) -> impl Iterator<Item = String> + '_ {
    text.split(|c: char| !c.is_alphanumeric())
        .filter(|token| !token.is_empty())
        .map(str::to_lowercase)
}

#[derive(Clone, Copy, Debug)]
enum Field {
    Title,
    Headings,
    Content,
}

impl Field {
    const ALL: [Self; 3] = [Self::Title, Self::Headings, Self::Content];

    fn text(self, doc: &SearchDocument) -> &str {
        match self {
            Self::Title => &doc.title,
            Self::Headings => &doc.headings,
            Self::Content => &doc.content,
        }
    }

    fn boost(self, boost: &FieldBoost) -> f64 {
        match self {
            Self::Title => boost.title,
            Self::Headings => boost.headings,
            Self::Content => boost.content,
        }
    }
}

#[derive(Clone, Copy, Debug)]
struct Posting {
    doc: usize,
    freq: u32,
}

/// Inverted index of one field.
#[derive(Clone, Debug, Default)]
struct FieldIndex {
    terms: BTreeMap<String, Vec<Posting>>,
    lengths: Vec<u32>,
    total_length: u64,
}

impl FieldIndex {
    fn add(&mut self, doc: usize, text: &str) {
        let mut freqs: BTreeMap<String, u32> = BTreeMap::new();
        let mut length = 0u32;
        for token in tokenize(text) {
            *freqs.entry(token).or_default() += 1;
            length += 1;
        }

        self.lengths.push(length);
        self.total_length += u64::from(length);
        for (term, freq) in freqs {
            self.terms.entry(term).or_default().push(Posting { doc, freq });
        }
    }

    #[allow(clippy::cast_precision_loss)]
    fn average_length(&self) -> f64 {
        if self.lengths.is_empty() {
            0.0
        } else {
            self.total_length as f64 / self.lengths.len() as f64
        }
    }
}

#[allow(clippy::cast_precision_loss)]
fn bm25(freq: u32, doc_freq: usize, doc_count: usize, length: u32, average_length: f64) -> f64 {
    let n = doc_count as f64;
    let df = doc_freq as f64;
    let idf = ((n - df + 0.5) / (df + 0.5)).ln_1p();
    let tf = f64::from(freq);
    let norm = BM25_B.mul_add(f64::from(length) / average_length.max(1.0), 1.0 - BM25_B);
    idf * tf * (BM25_K1 + 1.0) / BM25_K1.mul_add(norm, tf)
}

/// Weight of `term` as a match for `query`, or `None` if it does not match.
#[allow(clippy::cast_precision_loss)]
fn term_weight(query: &str, term: &str, prefix: bool, max_distance: usize) -> Option<f64> {
    if term == query {
        return Some(1.0);
    }

    let query_len = query.chars().count();
    let term_len = term.chars().count();

    if prefix && term.starts_with(query) {
        let extra = (term_len - query_len) as f64;
        return Some(PREFIX_WEIGHT * query_len as f64 / 0.3f64.mul_add(extra, query_len as f64));
    }

    if max_distance > 0 && term_len.abs_diff(query_len) <= max_distance {
        let distance = strsim::levenshtein(query, term);
        if distance <= max_distance {
            return Some(FUZZY_WEIGHT * query_len as f64 / (query_len + distance) as f64);
        }
    }

    None
}

/// Full-text index over a fixed corpus.
///
/// Built once and read-only afterwards.
#[derive(Clone, Debug)]
pub struct SearchIndex {
    documents: Vec<SearchDocument>,
    fields: [FieldIndex; 3],
    options: SearchOptions,
}

impl SearchIndex {
    /// Build an index with default options.
    #[must_use]
    pub fn new(documents: Vec<SearchDocument>) -> Self {
        Self::with_options(documents, SearchOptions::default())
    }

    /// Build an index with explicit options.
    ///
    /// Documents whose id was already seen are skipped.
    #[must_use]
    pub fn with_options(documents: Vec<SearchDocument>, options: SearchOptions) -> Self {
        let mut seen = HashSet::new();
        let mut kept = Vec::with_capacity(documents.len());
        for doc in documents {
            if seen.insert(doc.id.clone()) {
                kept.push(doc);
            } else {
                tracing::warn!(id = %doc.id, "Skipping duplicate search document");
            }
        }

        let mut fields: [FieldIndex; 3] = Default::default();
        for (idx, doc) in kept.iter().enumerate() {
            for (field, index) in Field::ALL.into_iter().zip(fields.iter_mut()) {
                index.add(idx, field.text(doc));
            }
        }

        tracing::debug!(documents = kept.len(), "Built search index");
        Self {
            documents: kept,
            fields,
            options,
        }
    }

    /// Number of indexed documents.
    #[must_use]
    pub fn len(&self) -> usize {
        self.documents.len()
    }

    /// Whether the index holds no documents.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.documents.is_empty()
    }

    /// Indexed documents, in insertion order.
    #[must_use]
    pub fn documents(&self) -> &[SearchDocument] {
        &self.documents
    }

    /// Matching options.
    #[must_use]
    pub fn options(&self) -> &SearchOptions {
        &self.options
    }

    /// Replace the matching options.
    pub fn set_options(&mut self, options: SearchOptions) {
        self.options = options;
    }

    /// Search, never failing.
    ///
    /// Blank queries return nothing without touching the index. Errors are
    /// logged and reported as no results.
    #[must_use]
    pub fn search(&self, query: &str) -> Vec<SearchResult> {
        if query.trim().is_empty() {
            return Vec::new();
        }
        match self.try_search(query) {
            Ok(results) => results,
            Err(err) => {
                tracing::warn!(error = %err, "Search failed");
                Vec::new()
            }
        }
    }

    /// Search, reporting invalid queries and options.
    ///
    /// Results are ordered by descending score; equal scores keep insertion
    /// order.
    ///
    /// # Errors
    ///
    /// Returns `SearchError::QueryTooLong` for queries over
    /// [`MAX_QUERY_LEN`] bytes and `SearchError::InvalidFuzziness` when the
    /// options carry a negative or non-finite fuzziness.
    pub fn try_search(&self, query: &str) -> Result<Vec<SearchResult>, SearchError> {
        if query.len() > MAX_QUERY_LEN {
            return Err(SearchError::QueryTooLong {
                len: query.len(),
                max: MAX_QUERY_LEN,
            });
        }
        self.options.validate()?;

        let mut seen = HashSet::new();
        let terms: Vec<String> = tokenize(query)
            .filter(|term| seen.insert(term.clone()))
            .collect();
        if terms.is_empty() {
            return Ok(Vec::new());
        }

        let doc_count = self.documents.len();
        let mut scores = vec![0.0f64; doc_count];
        let mut matched = vec![false; doc_count];

        for query_term in &terms {
            let max_distance = self.options.max_distance(query_term.chars().count());
            for (field, index) in Field::ALL.into_iter().zip(&self.fields) {
                let boost = field.boost(&self.options.boost);
                let average_length = index.average_length();
                for (term, postings) in &index.terms {
                    let Some(weight) =
                        term_weight(query_term, term, self.options.prefix, max_distance)
                    else {
                        continue;
                    };
                    for posting in postings {
                        let relevance = bm25(
                            posting.freq,
                            postings.len(),
                            doc_count,
                            index.lengths[posting.doc],
                            average_length,
                        );
                        scores[posting.doc] += weight * boost * relevance;
                        matched[posting.doc] = true;
                    }
                }
            }
        }

        let mut results: Vec<SearchResult> = matched
            .iter()
            .enumerate()
            .filter(|(_, hit)| **hit)
            .map(|(idx, _)| SearchResult::from_document(&self.documents[idx], scores[idx]))
            .collect();
        results.sort_by(|a, b| b.score.total_cmp(&a.score));
        Ok(results)
    }
}
