//! Page processor trait definition.

use serde_json::{Map, Value};

use crate::errors::PageSearchError;
use page_search_shared::PageDocument;

/// Flattens a page document into a plain field mapping for indexing.
///
/// The mapping becomes the `doc` body of a write request. What fields are
/// produced and how rich content is reduced to text is entirely up to the
/// implementation.
pub trait PageProcessor: Send + Sync {
    /// Produce the indexable field mapping for a page.
    fn process_page(&self, page: &PageDocument) -> Result<Map<String, Value>, PageSearchError>;
}
