//! Page lookup trait definition.

use async_trait::async_trait;

use crate::errors::PageSearchError;
use page_search_shared::PageDocument;

/// Resolves page identifiers back into page documents.
///
/// The primary document store (the CMS) owns the pages; the repository only
/// uses this to turn search hits into documents. Injected rather than looked
/// up globally so the repository stays testable.
#[async_trait]
pub trait PageLookup: Send + Sync {
    /// Fetch the page with the given identifier.
    ///
    /// # Returns
    ///
    /// * `Ok(Some(page))` - The page exists in the primary store
    /// * `Ok(None)` - No page with that identifier exists
    /// * `Err(PageSearchError)` - The lookup itself failed
    async fn page_by_id(&self, id: u64) -> Result<Option<PageDocument>, PageSearchError>;
}
