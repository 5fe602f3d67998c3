//! Page repository implementation.
//!
//! This module provides the main entry point for synchronizing CMS pages with
//! the search index and querying them back. Application code uses this to
//! save, delete, and find pages.

use std::collections::HashMap;
use std::sync::Arc;

use serde_json::json;
use tracing::{debug, warn};

use crate::config::IndexLocation;
use crate::errors::PageSearchError;
use crate::interfaces::{InputFilter, PageLookup, PageProcessor, SearchStore};
use crate::opensearch::AGGREGATE_FIELD;
use crate::types::{DocumentPath, IndexRequest, SearchRequest};
use page_search_shared::{MatchQuery, PageDocument, Query, TermsQuery};

/// Repository translating page lifecycle events and search requests into
/// calls against a search store, and raw hits back into page documents.
///
/// Every operation is a small, fixed number of sequential store round trips
/// with no caching, no retries, and no locking. `save` and `delete` use an
/// explicit existence check before writing; the window between the check and
/// the write is an accepted race, not something this layer coordinates.
///
/// All collaborators are injected at construction. The repository never
/// constructs a dependency itself.
pub struct PageRepository {
    location: IndexLocation,
    store: Arc<dyn SearchStore>,
    processor: Arc<dyn PageProcessor>,
    input_filter: Arc<dyn InputFilter>,
    lookup: Arc<dyn PageLookup>,
}

impl PageRepository {
    /// Create a new page repository.
    ///
    /// # Arguments
    ///
    /// * `configuration` - Mapping that must contain `index` and `type` keys
    /// * `store` - The search backend client
    /// * `processor` - Flattens pages into indexable field mappings
    /// * `input_filter` - Sanitizes query terms
    /// * `lookup` - Resolves hit identifiers back into pages
    ///
    /// # Returns
    ///
    /// * `Ok(PageRepository)` - Ready-to-use repository
    /// * `Err(PageSearchError::ConfigurationError)` - If `index` or `type`
    ///   is missing; no collaborator is invoked in that case
    pub fn new(
        configuration: &HashMap<String, String>,
        store: Arc<dyn SearchStore>,
        processor: Arc<dyn PageProcessor>,
        input_filter: Arc<dyn InputFilter>,
        lookup: Arc<dyn PageLookup>,
    ) -> Result<Self, PageSearchError> {
        let location = IndexLocation::from_map(configuration)?;

        Ok(Self {
            location,
            store,
            processor,
            input_filter,
            lookup,
        })
    }

    /// The index/type pair this repository operates on.
    pub fn location(&self) -> &IndexLocation {
        &self.location
    }

    /// Check whether a page is present in the search index.
    ///
    /// One network round trip per call; nothing is cached.
    pub async fn exists(&self, page: &PageDocument) -> Result<bool, PageSearchError> {
        self.store.exists(&self.document_path(page)).await
    }

    /// Delete a page from the search index.
    ///
    /// Checks existence first: if the page is not indexed, returns `false`
    /// without contacting the delete endpoint, avoiding a remote not-found
    /// error.
    ///
    /// # Returns
    ///
    /// * `Ok(true)` - The page was indexed and the delete call was issued
    /// * `Ok(false)` - The page was not indexed; no delete call was made
    /// * `Err(PageSearchError)` - A store call failed
    pub async fn delete(&self, page: &PageDocument) -> Result<bool, PageSearchError> {
        if !self.exists(page).await? {
            debug!(page_id = page.id, "Page not indexed, skipping delete");
            return Ok(false);
        }

        self.store.delete(&self.document_path(page)).await?;
        Ok(true)
    }

    /// Delete every entry stored under this repository's index/type pair.
    ///
    /// Destructive and non-reversible. Other index/type pairs are untouched.
    pub async fn clear(&self) -> Result<(), PageSearchError> {
        self.store
            .delete_mapping(&self.location.index, &self.location.doc_type)
            .await
    }

    /// Save a page to the search index.
    ///
    /// Builds the write payload (identifier, processed field mapping,
    /// index/type, modification timestamp), checks existence once, then
    /// updates if present and creates otherwise. The check and the write are
    /// two separate calls: a concurrent writer can change existence in
    /// between, which is accepted here rather than coordinated.
    pub async fn save(&self, page: &PageDocument) -> Result<(), PageSearchError> {
        let request = self.page_to_request(page)?;

        if self.exists(page).await? {
            self.store.update(&request).await
        } else {
            self.store.create(&request).await
        }
    }

    /// Execute a boolean search and resolve the hits into page documents.
    ///
    /// The request body always carries all three clause arrays; `offset` and
    /// `limit` are attached only when supplied. Hits are resolved through the
    /// injected lookup in result order. A hit whose identifier does not parse
    /// or no longer resolves to a page is dropped from the result with a
    /// warning; callers see only the resolvable pages.
    pub async fn find_by(
        &self,
        must: &[Query],
        should: &[Query],
        must_not: &[Query],
        offset: Option<u64>,
        limit: Option<u64>,
    ) -> Result<Vec<PageDocument>, PageSearchError> {
        let mut body = json!({
            "query": {
                "bool": {
                    "must": must.iter().map(Query::to_value).collect::<Vec<_>>(),
                    "should": should.iter().map(Query::to_value).collect::<Vec<_>>(),
                    "must_not": must_not.iter().map(Query::to_value).collect::<Vec<_>>()
                }
            }
        });

        if let Some(offset) = offset {
            body["offset"] = json!(offset);
        }
        if let Some(limit) = limit {
            body["limit"] = json!(limit);
        }

        let request = SearchRequest {
            index: self.location.index.clone(),
            doc_type: self.location.doc_type.clone(),
            body,
        };

        let hits = self.store.search(&request).await?;

        let mut pages = Vec::new();
        for hit in &hits.hits {
            let id: u64 = match hit.id.parse() {
                Ok(id) => id,
                Err(_) => {
                    warn!(hit_id = %hit.id, "Hit identifier is not a page id, dropping hit");
                    continue;
                }
            };

            match self.lookup.page_by_id(id).await? {
                Some(page) => pages.push(page),
                None => {
                    warn!(page_id = id, "Indexed page missing from document store, dropping hit");
                }
            }
        }

        debug!(
            hits = hits.len(),
            resolved = pages.len(),
            "Resolved search hits"
        );

        Ok(pages)
    }

    /// Find pages by full text and term filters.
    ///
    /// A non-empty `text` adds a match clause against the aggregate content
    /// field. Each `(field, term)` filter adds a terms clause containing the
    /// single sanitized term with `minimum_should_match` of 1. All clauses
    /// are required (AND semantics).
    pub async fn query(
        &self,
        text: &str,
        filters: &[(String, String)],
        offset: Option<u64>,
        limit: Option<u64>,
    ) -> Result<Vec<PageDocument>, PageSearchError> {
        let mut must = Vec::new();

        if !text.is_empty() {
            must.push(Query::Match(MatchQuery::new(AGGREGATE_FIELD, text)));
        }

        for (field, term) in filters {
            must.push(Query::Terms(TermsQuery::new(
                field.clone(),
                vec![self.input_filter.filter(term)],
            )));
        }

        self.find_by(&must, &[], &[], offset, limit).await
    }

    /// The store-level address of a page within this repository's location.
    fn document_path(&self, page: &PageDocument) -> DocumentPath {
        DocumentPath {
            id: page.id,
            index: self.location.index.clone(),
            doc_type: self.location.doc_type.clone(),
        }
    }

    /// Build the write payload for a page.
    fn page_to_request(&self, page: &PageDocument) -> Result<IndexRequest, PageSearchError> {
        Ok(IndexRequest {
            id: page.id,
            index: self.location.index.clone(),
            doc_type: self.location.doc_type.clone(),
            doc: self.processor.process_page(page)?,
            timestamp: page.modification_date,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use chrono::{TimeZone, Utc};
    use serde_json::{Map, Value};
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Mutex;
    use page_search_shared::{SearchHit, SearchHits};

    /// Mock store recording every call and answering from canned responses.
    struct MockStore {
        exists_response: bool,
        search_response: SearchHits,
        exists_calls: Mutex<Vec<DocumentPath>>,
        create_calls: Mutex<Vec<IndexRequest>>,
        update_calls: Mutex<Vec<IndexRequest>>,
        delete_calls: Mutex<Vec<DocumentPath>>,
        search_calls: Mutex<Vec<SearchRequest>>,
        delete_mapping_calls: Mutex<Vec<(String, String)>>,
    }

    impl MockStore {
        fn new() -> Self {
            Self {
                exists_response: false,
                search_response: SearchHits::empty(),
                exists_calls: Mutex::new(Vec::new()),
                create_calls: Mutex::new(Vec::new()),
                update_calls: Mutex::new(Vec::new()),
                delete_calls: Mutex::new(Vec::new()),
                search_calls: Mutex::new(Vec::new()),
                delete_mapping_calls: Mutex::new(Vec::new()),
            }
        }

        fn with_exists(mut self, exists: bool) -> Self {
            self.exists_response = exists;
            self
        }

        fn with_hits(mut self, hits: SearchHits) -> Self {
            self.search_response = hits;
            self
        }

        fn total_calls(&self) -> usize {
            self.exists_calls.lock().unwrap().len()
                + self.create_calls.lock().unwrap().len()
                + self.update_calls.lock().unwrap().len()
                + self.delete_calls.lock().unwrap().len()
                + self.search_calls.lock().unwrap().len()
                + self.delete_mapping_calls.lock().unwrap().len()
        }
    }

    #[async_trait]
    impl SearchStore for MockStore {
        async fn exists(&self, path: &DocumentPath) -> Result<bool, PageSearchError> {
            self.exists_calls.lock().unwrap().push(path.clone());
            Ok(self.exists_response)
        }

        async fn create(&self, request: &IndexRequest) -> Result<(), PageSearchError> {
            self.create_calls.lock().unwrap().push(request.clone());
            Ok(())
        }

        async fn update(&self, request: &IndexRequest) -> Result<(), PageSearchError> {
            self.update_calls.lock().unwrap().push(request.clone());
            Ok(())
        }

        async fn delete(&self, path: &DocumentPath) -> Result<(), PageSearchError> {
            self.delete_calls.lock().unwrap().push(path.clone());
            Ok(())
        }

        async fn search(&self, request: &SearchRequest) -> Result<SearchHits, PageSearchError> {
            self.search_calls.lock().unwrap().push(request.clone());
            Ok(self.search_response.clone())
        }

        async fn delete_mapping(
            &self,
            index: &str,
            doc_type: &str,
        ) -> Result<(), PageSearchError> {
            self.delete_mapping_calls
                .lock()
                .unwrap()
                .push((index.to_string(), doc_type.to_string()));
            Ok(())
        }
    }

    /// Mock processor returning a fixed mapping and counting invocations.
    struct MockProcessor {
        calls: AtomicUsize,
    }

    impl MockProcessor {
        fn new() -> Self {
            Self {
                calls: AtomicUsize::new(0),
            }
        }
    }

    impl PageProcessor for MockProcessor {
        fn process_page(
            &self,
            page: &PageDocument,
        ) -> Result<Map<String, Value>, PageSearchError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            let mut doc = Map::new();
            doc.insert("title".to_string(), json!(page.title));
            doc.insert("processed".to_string(), json!(true));
            Ok(doc)
        }
    }

    /// Mock filter lowercasing input, so sanitization is observable.
    struct MockFilter;

    impl InputFilter for MockFilter {
        fn filter(&self, input: &str) -> String {
            input.to_lowercase()
        }
    }

    /// Mock lookup resolving from a fixed set of pages.
    struct MockLookup {
        pages: HashMap<u64, PageDocument>,
    }

    impl MockLookup {
        fn new(pages: Vec<PageDocument>) -> Self {
            Self {
                pages: pages.into_iter().map(|p| (p.id, p)).collect(),
            }
        }
    }

    #[async_trait]
    impl PageLookup for MockLookup {
        async fn page_by_id(&self, id: u64) -> Result<Option<PageDocument>, PageSearchError> {
            Ok(self.pages.get(&id).cloned())
        }
    }

    fn configuration() -> HashMap<String, String> {
        [("index", "cms"), ("type", "page")]
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    fn test_page(id: u64) -> PageDocument {
        PageDocument::new(id, Utc.with_ymd_and_hms(2024, 3, 1, 12, 0, 0).unwrap())
            .with_title(format!("Page {}", id))
    }

    fn repository(
        store: Arc<MockStore>,
        lookup: MockLookup,
    ) -> PageRepository {
        PageRepository::new(
            &configuration(),
            store,
            Arc::new(MockProcessor::new()),
            Arc::new(MockFilter),
            Arc::new(lookup),
        )
        .unwrap()
    }

    #[test]
    fn test_construction_fails_without_index_key() {
        let store = Arc::new(MockStore::new());
        let mut config = configuration();
        config.remove("index");

        let result = PageRepository::new(
            &config,
            store.clone(),
            Arc::new(MockProcessor::new()),
            Arc::new(MockFilter),
            Arc::new(MockLookup::new(vec![])),
        );

        assert!(matches!(
            result.err().unwrap(),
            PageSearchError::ConfigurationError(_)
        ));
        // Failing fast means no collaborator was touched.
        assert_eq!(store.total_calls(), 0);
    }

    #[test]
    fn test_construction_fails_without_type_key() {
        let store = Arc::new(MockStore::new());
        let mut config = configuration();
        config.remove("type");

        let result = PageRepository::new(
            &config,
            store.clone(),
            Arc::new(MockProcessor::new()),
            Arc::new(MockFilter),
            Arc::new(MockLookup::new(vec![])),
        );

        assert!(matches!(
            result.err().unwrap(),
            PageSearchError::ConfigurationError(_)
        ));
        assert_eq!(store.total_calls(), 0);
    }

    #[tokio::test]
    async fn test_exists_addresses_configured_location() {
        let store = Arc::new(MockStore::new().with_exists(true));
        let repo = repository(store.clone(), MockLookup::new(vec![]));

        let exists = repo.exists(&test_page(42)).await.unwrap();

        assert!(exists);
        let calls = store.exists_calls.lock().unwrap();
        assert_eq!(calls.len(), 1);
        assert_eq!(calls[0].id, 42);
        assert_eq!(calls[0].index, "cms");
        assert_eq!(calls[0].doc_type, "page");
    }

    #[tokio::test]
    async fn test_delete_skips_absent_page() {
        let store = Arc::new(MockStore::new().with_exists(false));
        let repo = repository(store.clone(), MockLookup::new(vec![]));

        let deleted = repo.delete(&test_page(42)).await.unwrap();

        assert!(!deleted);
        assert!(store.delete_calls.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_delete_present_page() {
        let store = Arc::new(MockStore::new().with_exists(true));
        let repo = repository(store.clone(), MockLookup::new(vec![]));

        let deleted = repo.delete(&test_page(42)).await.unwrap();

        assert!(deleted);
        let calls = store.delete_calls.lock().unwrap();
        assert_eq!(calls.len(), 1);
        assert_eq!(calls[0].id, 42);
    }

    #[tokio::test]
    async fn test_save_updates_existing_page() {
        let store = Arc::new(MockStore::new().with_exists(true));
        let repo = repository(store.clone(), MockLookup::new(vec![]));
        let page = test_page(42);

        repo.save(&page).await.unwrap();

        assert!(store.create_calls.lock().unwrap().is_empty());
        let updates = store.update_calls.lock().unwrap();
        assert_eq!(updates.len(), 1);
        assert_eq!(updates[0].id, 42);
        assert_eq!(updates[0].index, "cms");
        assert_eq!(updates[0].doc_type, "page");
        assert_eq!(updates[0].timestamp, page.modification_date);
        assert_eq!(updates[0].doc["processed"], true);
        assert_eq!(updates[0].doc["title"], "Page 42");
    }

    #[tokio::test]
    async fn test_save_creates_new_page() {
        let store = Arc::new(MockStore::new().with_exists(false));
        let repo = repository(store.clone(), MockLookup::new(vec![]));
        let page = test_page(7);

        repo.save(&page).await.unwrap();

        assert!(store.update_calls.lock().unwrap().is_empty());
        let creates = store.create_calls.lock().unwrap();
        assert_eq!(creates.len(), 1);
        assert_eq!(creates[0].id, 7);
        assert_eq!(creates[0].timestamp, page.modification_date);
        assert_eq!(creates[0].doc["processed"], true);
    }

    #[tokio::test]
    async fn test_find_by_empty_criteria_body() {
        let store = Arc::new(MockStore::new());
        let repo = repository(store.clone(), MockLookup::new(vec![]));

        repo.find_by(&[], &[], &[], None, None).await.unwrap();

        let calls = store.search_calls.lock().unwrap();
        assert_eq!(calls.len(), 1);
        let body = &calls[0].body;
        assert!(body["query"]["bool"]["must"].as_array().unwrap().is_empty());
        assert!(body["query"]["bool"]["should"].as_array().unwrap().is_empty());
        assert!(body["query"]["bool"]["must_not"].as_array().unwrap().is_empty());
        assert!(body.get("offset").is_none());
        assert!(body.get("limit").is_none());
    }

    #[tokio::test]
    async fn test_find_by_attaches_pagination_keys() {
        let store = Arc::new(MockStore::new());
        let repo = repository(store.clone(), MockLookup::new(vec![]));

        repo.find_by(&[], &[], &[], Some(20), Some(10)).await.unwrap();

        let calls = store.search_calls.lock().unwrap();
        let body = &calls[0].body;
        assert_eq!(body["offset"], 20);
        assert_eq!(body["limit"], 10);
    }

    #[tokio::test]
    async fn test_find_by_resolves_hits_and_drops_stale_ones() {
        let hits = SearchHits::new(
            vec![SearchHit::new("1", Some(2.0)), SearchHit::new("2", Some(1.0))],
            2,
        );
        let store = Arc::new(MockStore::new().with_hits(hits));
        // Only page 1 still exists in the primary store.
        let repo = repository(store, MockLookup::new(vec![test_page(1)]));

        let pages = repo.find_by(&[], &[], &[], None, None).await.unwrap();

        assert_eq!(pages.len(), 1);
        assert_eq!(pages[0].id, 1);
    }

    #[tokio::test]
    async fn test_find_by_preserves_hit_order() {
        let hits = SearchHits::new(
            vec![
                SearchHit::new("3", Some(3.0)),
                SearchHit::new("1", Some(2.0)),
                SearchHit::new("2", Some(1.0)),
            ],
            3,
        );
        let store = Arc::new(MockStore::new().with_hits(hits));
        let repo = repository(
            store,
            MockLookup::new(vec![test_page(1), test_page(2), test_page(3)]),
        );

        let pages = repo.find_by(&[], &[], &[], None, None).await.unwrap();

        let ids: Vec<u64> = pages.iter().map(|p| p.id).collect();
        assert_eq!(ids, vec![3, 1, 2]);
    }

    #[tokio::test]
    async fn test_find_by_drops_non_numeric_hit_ids() {
        let hits = SearchHits::new(
            vec![SearchHit::new("not-a-page", None), SearchHit::new("1", None)],
            2,
        );
        let store = Arc::new(MockStore::new().with_hits(hits));
        let repo = repository(store, MockLookup::new(vec![test_page(1)]));

        let pages = repo.find_by(&[], &[], &[], None, None).await.unwrap();

        assert_eq!(pages.len(), 1);
        assert_eq!(pages[0].id, 1);
    }

    #[tokio::test]
    async fn test_query_builds_match_and_terms_clauses() {
        let store = Arc::new(MockStore::new());
        let repo = repository(store.clone(), MockLookup::new(vec![]));

        repo.query(
            "hello",
            &[("category".to_string(), "News".to_string())],
            None,
            None,
        )
        .await
        .unwrap();

        let calls = store.search_calls.lock().unwrap();
        let must = calls[0].body["query"]["bool"]["must"].as_array().unwrap();
        assert_eq!(must.len(), 2);
        assert_eq!(must[0]["match"]["content"]["query"], "hello");
        // The term went through the input filter.
        assert_eq!(must[1]["terms"]["category"][0], "news");
        assert_eq!(must[1]["terms"]["minimum_should_match"], 1);
    }

    #[tokio::test]
    async fn test_query_empty_text_omits_match_clause() {
        let store = Arc::new(MockStore::new());
        let repo = repository(store.clone(), MockLookup::new(vec![]));

        repo.query(
            "",
            &[("category".to_string(), "news".to_string())],
            None,
            None,
        )
        .await
        .unwrap();

        let calls = store.search_calls.lock().unwrap();
        let must = calls[0].body["query"]["bool"]["must"].as_array().unwrap();
        assert_eq!(must.len(), 1);
        assert!(must[0].get("match").is_none());
        assert!(must[0].get("terms").is_some());
    }

    #[tokio::test]
    async fn test_query_filters_are_all_required() {
        let store = Arc::new(MockStore::new());
        let repo = repository(store.clone(), MockLookup::new(vec![]));

        repo.query(
            "hello",
            &[
                ("category".to_string(), "news".to_string()),
                ("locale".to_string(), "EN".to_string()),
            ],
            None,
            None,
        )
        .await
        .unwrap();

        let calls = store.search_calls.lock().unwrap();
        let body = &calls[0].body;
        let must = body["query"]["bool"]["must"].as_array().unwrap();
        assert_eq!(must.len(), 3);
        assert_eq!(must[2]["terms"]["locale"][0], "en");
        assert!(body["query"]["bool"]["should"].as_array().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_clear_issues_single_scoped_call() {
        let store = Arc::new(MockStore::new());
        let repo = repository(store.clone(), MockLookup::new(vec![]));

        repo.clear().await.unwrap();

        let calls = store.delete_mapping_calls.lock().unwrap();
        assert_eq!(calls.len(), 1);
        assert_eq!(calls[0], ("cms".to_string(), "page".to_string()));
        // Release the guard before total_calls(), which re-locks the same mutex.
        drop(calls);
        assert_eq!(store.total_calls(), 1);
    }
}
