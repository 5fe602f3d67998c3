//! OpenSearch store implementation.
//!
//! This module provides the concrete implementation of `SearchStore` using
//! the OpenSearch Rust crate.

use async_trait::async_trait;
use opensearch::{
    http::transport::{SingleNodeConnectionPool, TransportBuilder},
    indices::{IndicesCreateParts, IndicesExistsParts},
    CreateParts, DeleteByQueryParts, DeleteParts, ExistsParts, OpenSearch, SearchParts,
    UpdateParts,
};
use serde_json::{json, Map, Value};
use tracing::{debug, error, info};
use url::Url;

use crate::errors::PageSearchError;
use crate::interfaces::SearchStore;
use crate::opensearch::index_settings::{index_settings, physical_index_name};
use crate::types::{DocumentPath, IndexRequest, SearchRequest};
use page_search_shared::{SearchHit, SearchHits};

/// OpenSearch store implementation.
///
/// The engine removed mapping types, so each (index, type) pair is addressed
/// as the physical index `{index}_{type}`. The `offset`/`limit` keys of a
/// search body are translated to the engine's `from`/`size` here, at the last
/// moment before the request goes out.
///
/// # Example
///
/// ```ignore
/// let store = OpenSearchStore::new("http://localhost:9200").await?;
/// store.ensure_index_exists("cms", "page").await?;
/// ```
pub struct OpenSearchStore {
    client: OpenSearch,
}

impl OpenSearchStore {
    /// Create a new OpenSearch store connected to the specified URL.
    ///
    /// # Arguments
    ///
    /// * `url` - The OpenSearch server URL (e.g., "http://localhost:9200")
    ///
    /// # Returns
    ///
    /// * `Ok(OpenSearchStore)` - A new store instance
    /// * `Err(PageSearchError)` - If connection setup fails
    pub async fn new(url: &str) -> Result<Self, PageSearchError> {
        let parsed_url =
            Url::parse(url).map_err(|e| PageSearchError::connection(e.to_string()))?;

        let conn_pool = SingleNodeConnectionPool::new(parsed_url);
        let transport = TransportBuilder::new(conn_pool)
            .disable_proxy()
            .build()
            .map_err(|e| PageSearchError::connection(e.to_string()))?;

        let client = OpenSearch::new(transport);

        info!(url = %url, "Created OpenSearch store");

        Ok(Self { client })
    }

    /// Ensure the physical index for an (index, type) pair exists, creating
    /// it with the page mappings if necessary.
    ///
    /// Call this during application startup before performing document
    /// operations.
    pub async fn ensure_index_exists(
        &self,
        index: &str,
        doc_type: &str,
    ) -> Result<(), PageSearchError> {
        let target = physical_index_name(index, doc_type);

        let response = self
            .client
            .indices()
            .exists(IndicesExistsParts::Index(&[&target]))
            .send()
            .await
            .map_err(|e| PageSearchError::connection(e.to_string()))?;

        if response.status_code().is_success() {
            debug!(index = %target, "Search index already exists");
            return Ok(());
        }

        let response = self
            .client
            .indices()
            .create(IndicesCreateParts::Index(&target))
            .body(index_settings())
            .send()
            .await
            .map_err(|e| PageSearchError::index(e.to_string()))?;

        let status = response.status_code();
        if !status.is_success() {
            let error_body = response.text().await.unwrap_or_default();
            error!(status = %status, body = %error_body, "Index creation failed");
            return Err(PageSearchError::index(format!(
                "Index creation failed with status {}: {}",
                status, error_body
            )));
        }

        info!(index = %target, "Created search index");
        Ok(())
    }

    /// Translate the repository's body keys into the engine's pagination keys.
    ///
    /// `offset` becomes `from` and `limit` becomes `size`; everything else is
    /// passed through untouched.
    fn engine_body(body: &Value) -> Value {
        let mut engine = body.clone();
        if let Some(obj) = engine.as_object_mut() {
            if let Some(offset) = obj.remove("offset") {
                obj.insert("from".to_string(), offset);
            }
            if let Some(limit) = obj.remove("limit") {
                obj.insert("size".to_string(), limit);
            }
        }
        engine
    }

    /// The document source for a write: the processed field mapping plus the
    /// request timestamp as the `indexed_at` date field.
    fn source_fields(request: &IndexRequest) -> Map<String, Value> {
        let mut source = request.doc.clone();
        source.insert("indexed_at".to_string(), json!(request.timestamp));
        source
    }

    /// Parse the raw hits out of a search response body.
    ///
    /// Handles both the modern `{"total": {"value": n}}` shape and the legacy
    /// plain-number total.
    fn parse_hits(body: &Value) -> Result<SearchHits, PageSearchError> {
        let hits_obj = body
            .get("hits")
            .ok_or_else(|| PageSearchError::parse("Search response has no hits object"))?;

        let total = match hits_obj.get("total") {
            Some(Value::Number(n)) => n.as_u64().unwrap_or(0),
            Some(Value::Object(o)) => o.get("value").and_then(Value::as_u64).unwrap_or(0),
            _ => 0,
        };

        let mut hits = Vec::new();
        if let Some(entries) = hits_obj.get("hits").and_then(Value::as_array) {
            for entry in entries {
                let id = entry
                    .get("_id")
                    .and_then(Value::as_str)
                    .ok_or_else(|| PageSearchError::parse("Search hit without an _id"))?;
                let score = entry.get("_score").and_then(Value::as_f64);
                hits.push(SearchHit::new(id, score));
            }
        }

        Ok(SearchHits::new(hits, total))
    }
}

#[async_trait]
impl SearchStore for OpenSearchStore {
    async fn exists(&self, path: &DocumentPath) -> Result<bool, PageSearchError> {
        let target = physical_index_name(&path.index, &path.doc_type);
        let id = path.id.to_string();

        let response = self
            .client
            .exists(ExistsParts::IndexId(&target, &id))
            .send()
            .await
            .map_err(|e| PageSearchError::search(e.to_string()))?;

        let status = response.status_code();
        if status.is_success() {
            return Ok(true);
        }
        if status.as_u16() == 404 {
            return Ok(false);
        }

        let error_body = response.text().await.unwrap_or_default();
        error!(status = %status, body = %error_body, "Exists probe failed");
        Err(PageSearchError::search(format!(
            "Exists probe failed with status {}: {}",
            status, error_body
        )))
    }

    async fn create(&self, request: &IndexRequest) -> Result<(), PageSearchError> {
        let target = physical_index_name(&request.index, &request.doc_type);
        let id = request.id.to_string();
        let source = Self::source_fields(request);

        let response = self
            .client
            .create(CreateParts::IndexId(&target, &id))
            .body(Value::Object(source))
            .send()
            .await
            .map_err(|e| PageSearchError::index(e.to_string()))?;

        let status = response.status_code();
        if !status.is_success() {
            let error_body = response.text().await.unwrap_or_default();
            error!(status = %status, body = %error_body, "Create request failed");
            return Err(PageSearchError::index(format!(
                "Create failed with status {}: {}",
                status, error_body
            )));
        }

        debug!(doc_id = %id, index = %target, "Document created");
        Ok(())
    }

    async fn update(&self, request: &IndexRequest) -> Result<(), PageSearchError> {
        let target = physical_index_name(&request.index, &request.doc_type);
        let id = request.id.to_string();
        let source = Self::source_fields(request);

        let response = self
            .client
            .update(UpdateParts::IndexId(&target, &id))
            .body(json!({ "doc": source }))
            .send()
            .await
            .map_err(|e| PageSearchError::update(e.to_string()))?;

        let status = response.status_code();
        if !status.is_success() {
            let error_body = response.text().await.unwrap_or_default();
            error!(status = %status, body = %error_body, "Update request failed");
            return Err(PageSearchError::update(format!(
                "Update failed with status {}: {}",
                status, error_body
            )));
        }

        debug!(doc_id = %id, index = %target, "Document updated");
        Ok(())
    }

    async fn delete(&self, path: &DocumentPath) -> Result<(), PageSearchError> {
        let target = physical_index_name(&path.index, &path.doc_type);
        let id = path.id.to_string();

        let response = self
            .client
            .delete(DeleteParts::IndexId(&target, &id))
            .send()
            .await
            .map_err(|e| PageSearchError::delete(e.to_string()))?;

        let status = response.status_code();

        // 404 is tolerated: the repository guards with an existence check,
        // but a concurrent delete can win the race.
        if !status.is_success() && status.as_u16() != 404 {
            let error_body = response.text().await.unwrap_or_default();
            error!(status = %status, body = %error_body, "Delete request failed");
            return Err(PageSearchError::delete(format!(
                "Delete failed with status {}: {}",
                status, error_body
            )));
        }

        debug!(doc_id = %id, index = %target, "Document deleted");
        Ok(())
    }

    async fn search(&self, request: &SearchRequest) -> Result<SearchHits, PageSearchError> {
        let target = physical_index_name(&request.index, &request.doc_type);
        let body = Self::engine_body(&request.body);

        let response = self
            .client
            .search(SearchParts::Index(&[&target]))
            .body(body)
            .send()
            .await
            .map_err(|e| PageSearchError::search(e.to_string()))?;

        let status = response.status_code();
        if !status.is_success() {
            let error_body = response.text().await.unwrap_or_default();
            error!(status = %status, body = %error_body, "Search request failed");
            return Err(PageSearchError::search(format!(
                "Search failed with status {}: {}",
                status, error_body
            )));
        }

        let body = response
            .json::<Value>()
            .await
            .map_err(|e| PageSearchError::parse(e.to_string()))?;

        Self::parse_hits(&body)
    }

    async fn delete_mapping(&self, index: &str, doc_type: &str) -> Result<(), PageSearchError> {
        let target = physical_index_name(index, doc_type);

        let response = self
            .client
            .delete_by_query(DeleteByQueryParts::Index(&[&target]))
            .body(json!({ "query": { "match_all": {} } }))
            .send()
            .await
            .map_err(|e| PageSearchError::delete(e.to_string()))?;

        let status = response.status_code();
        if !status.is_success() {
            let error_body = response.text().await.unwrap_or_default();
            error!(status = %status, body = %error_body, "Clear request failed");
            return Err(PageSearchError::delete(format!(
                "Clear failed with status {}: {}",
                status, error_body
            )));
        }

        info!(index = %target, "Cleared all entries from index");
        Ok(())
    }
}
