//! Default page processor implementation.
//!
//! Flattens a CMS page into the plain field mapping the repository indexes.

use serde_json::{json, Map, Value};
use tracing::debug;

use crate::filter::HtmlToTextFilter;
use page_search_repository::{PageProcessor, PageSearchError};
use page_search_shared::{ElementKind, PageDocument};

/// Default `PageProcessor` for CMS pages.
///
/// Title and description map straight through; each content element becomes a
/// field named after the element. WYSIWYG content is reduced to plain text by
/// the injected HTML filter, plain input and textarea content is trimmed.
/// Elements whose extracted text is empty are omitted from the mapping.
pub struct ContentPageProcessor {
    html_filter: HtmlToTextFilter,
}

impl ContentPageProcessor {
    /// Create a new processor with the given text-extraction filter.
    pub fn new(html_filter: HtmlToTextFilter) -> Self {
        Self { html_filter }
    }
}

impl Default for ContentPageProcessor {
    fn default() -> Self {
        Self::new(HtmlToTextFilter::new())
    }
}

impl PageProcessor for ContentPageProcessor {
    fn process_page(&self, page: &PageDocument) -> Result<Map<String, Value>, PageSearchError> {
        let mut doc = Map::new();

        if let Some(ref title) = page.title {
            doc.insert("title".to_string(), json!(title));
        }
        if let Some(ref description) = page.description {
            doc.insert("description".to_string(), json!(description));
        }

        for element in &page.elements {
            let text = match element.kind {
                ElementKind::Wysiwyg => self.html_filter.extract(&element.content),
                ElementKind::Input | ElementKind::Textarea => {
                    element.content.trim().to_string()
                }
            };

            if text.is_empty() {
                continue;
            }

            doc.insert(element.name.clone(), json!(text));
        }

        debug!(page_id = page.id, fields = doc.len(), "Processed page");
        Ok(doc)
    }
}
