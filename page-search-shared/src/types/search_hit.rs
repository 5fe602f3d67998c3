//! Raw search hit types returned by the search backend.

use serde::{Deserialize, Serialize};

/// A single hit returned by a search call.
///
/// Carries the stored document's identifier as the backend reports it and the
/// relevance score when the backend computed one. Resolving the identifier
/// back into a page document is the repository's job.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SearchHit {
    /// The stored document's identifier.
    pub id: String,
    /// Relevance score, if the backend scored the hit.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub score: Option<f64>,
}

impl SearchHit {
    /// Create a new hit.
    pub fn new(id: impl Into<String>, score: Option<f64>) -> Self {
        Self {
            id: id.into(),
            score,
        }
    }
}

/// One page of hits from a search call.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct SearchHits {
    /// The hits, ordered by relevance.
    pub hits: Vec<SearchHit>,
    /// Total number of matching documents, which may exceed the number of
    /// returned hits due to pagination.
    pub total: u64,
}

impl SearchHits {
    /// Create an empty hit page.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Create a new hit page.
    pub fn new(hits: Vec<SearchHit>, total: u64) -> Self {
        Self { hits, total }
    }

    /// Returns true if there are no hits.
    pub fn is_empty(&self) -> bool {
        self.hits.is_empty()
    }

    /// Returns the number of hits in this page.
    pub fn len(&self) -> usize {
        self.hits.len()
    }
}
