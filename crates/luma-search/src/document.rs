//! Search corpus documents and results.

use serde::{Deserialize, Serialize};

/// One indexed page.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchDocument {
    /// Unique identifier, equal to the page route.
    pub id: String,
    /// Page title.
    pub title: String,
    /// Route of the page.
    pub path: String,
    /// Space-separated heading texts.
    #[serde(default)]
    pub headings: String,
    /// Plain-text preview of the page body.
    #[serde(default)]
    pub content: String,
    /// Title of the enclosing navigation group, or empty.
    #[serde(default)]
    pub section: String,
}

/// A ranked match.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SearchResult {
    /// Document identifier.
    pub id: String,
    /// Page title.
    pub title: String,
    /// Route to navigate to.
    pub path: String,
    /// Enclosing navigation group, or empty.
    pub section: String,
    /// Relevance score; higher is better.
    pub score: f64,
}

impl SearchResult {
    pub(crate) fn from_document(doc: &SearchDocument, score: f64) -> Self {
        Self {
            id: doc.id.clone(),
            title: doc.title.clone(),
            path: doc.path.clone(),
            section: doc.section.clone(),
            score,
        }
    }
}
