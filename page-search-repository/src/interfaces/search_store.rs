//! Search store trait definition.
//!
//! This module defines the abstract interface over the remote search engine
//! client, allowing for different backend implementations (OpenSearch,
//! Elasticsearch, etc.) and mock stores in tests.

use async_trait::async_trait;

use crate::errors::PageSearchError;
use crate::types::{DocumentPath, IndexRequest, SearchRequest};
use page_search_shared::SearchHits;

/// Abstracts the underlying search engine client.
///
/// Implementations are injected into `PageRepository`. Every method is a
/// single request/response round trip against the remote engine. No retries,
/// no batching, no caching. Transport failures surface as `PageSearchError`
/// without translation beyond variant classification.
#[async_trait]
pub trait SearchStore: Send + Sync {
    /// Check whether a document exists at the given path.
    ///
    /// # Returns
    ///
    /// * `Ok(true)` - The document is present in the index
    /// * `Ok(false)` - The document is absent
    /// * `Err(PageSearchError)` - The probe itself failed
    async fn exists(&self, path: &DocumentPath) -> Result<bool, PageSearchError>;

    /// Create a new document. Fails if a document with the same id already
    /// exists at that location.
    async fn create(&self, request: &IndexRequest) -> Result<(), PageSearchError>;

    /// Update an existing document with the request's field mapping.
    async fn update(&self, request: &IndexRequest) -> Result<(), PageSearchError>;

    /// Delete the document at the given path.
    async fn delete(&self, path: &DocumentPath) -> Result<(), PageSearchError>;

    /// Execute a search and return the raw hits.
    async fn search(&self, request: &SearchRequest) -> Result<SearchHits, PageSearchError>;

    /// Delete every entry stored under the given index/type pair.
    ///
    /// Destructive and non-reversible. Must not affect any other index/type
    /// pair.
    async fn delete_mapping(&self, index: &str, doc_type: &str) -> Result<(), PageSearchError>;
}
