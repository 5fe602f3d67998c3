//! Request types for search store operations.
//!
//! These structures are assembled fresh for every call and discarded after
//! sending. Nothing here is persisted.

use chrono::{DateTime, Utc};
use serde::Serialize;
use serde_json::{Map, Value};

/// Address of a single document for existence checks and deletes.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct DocumentPath {
    /// The page's numeric identifier.
    pub id: u64,
    /// The index name.
    pub index: String,
    /// The document type name.
    pub doc_type: String,
}

/// Write payload for indexing a page.
///
/// Carries the page identifier, the configured index/type, the processor's
/// field mapping (nested under a `doc` key on the wire), and the page's
/// modification timestamp.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct IndexRequest {
    /// The page's numeric identifier.
    pub id: u64,
    /// The index name.
    pub index: String,
    /// The document type name.
    pub doc_type: String,
    /// The processed field mapping for the page.
    pub doc: Map<String, Value>,
    /// The page's modification timestamp.
    pub timestamp: DateTime<Utc>,
}

/// Search payload for a boolean query.
///
/// `body` holds the assembled request body:
/// `{"query": {"bool": {"must": [..], "should": [..], "must_not": [..]}}}`
/// plus `offset` and `limit` keys only when the caller supplied them.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct SearchRequest {
    /// The index name.
    pub index: String,
    /// The document type name.
    pub doc_type: String,
    /// The assembled request body.
    pub body: Value,
}
