//! Page document types for the search index.
//!
//! This module defines the local representation of a CMS page as it is handed
//! to the indexing layer. The CMS owns the page; this crate only reads it.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// The kind of content element a page carries.
///
/// Plain `Input` and `Textarea` elements hold text as-is; `Wysiwyg` elements
/// hold rich HTML that must be run through a text-extraction filter before
/// indexing.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum ElementKind {
    Input,
    Textarea,
    Wysiwyg,
}

/// A single named content element of a page.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PageElement {
    /// The element name, used as the field name in the index.
    pub name: String,
    /// The kind of content this element holds.
    pub kind: ElementKind,
    /// The raw content (plain text or HTML depending on `kind`).
    pub content: String,
}

impl PageElement {
    /// Create a new page element.
    pub fn new(name: impl Into<String>, kind: ElementKind, content: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            kind,
            content: content.into(),
        }
    }
}

/// Local representation of a CMS page document.
///
/// The page is owned by the CMS; this layer never creates, mutates, or
/// destroys it. Only the identifier and modification time are read directly;
/// everything else is handed to a page processor for field extraction.
///
/// # Fields
///
/// - `id`: The page's numeric identifier in the CMS
/// - `title`: Optional page title (primary search field)
/// - `description`: Optional meta description (secondary search field)
/// - `modification_date`: Timestamp of the last modification in the CMS
/// - `elements`: Named content elements making up the page body
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PageDocument {
    pub id: u64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub modification_date: DateTime<Utc>,
    #[serde(default)]
    pub elements: Vec<PageElement>,
}

impl PageDocument {
    /// Create a new page document with no elements.
    ///
    /// # Arguments
    ///
    /// * `id` - The page's numeric identifier
    /// * `modification_date` - Timestamp of the last modification
    pub fn new(id: u64, modification_date: DateTime<Utc>) -> Self {
        Self {
            id,
            title: None,
            description: None,
            modification_date,
            elements: Vec::new(),
        }
    }

    /// Set the page title.
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    /// Set the page description.
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Append a content element.
    pub fn with_element(mut self, element: PageElement) -> Self {
        self.elements.push(element);
        self
    }

    /// The document ID used in the search index.
    pub fn document_id(&self) -> String {
        self.id.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn modified_at() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 3, 1, 12, 0, 0).unwrap()
    }

    #[test]
    fn test_page_document_new() {
        let page = PageDocument::new(42, modified_at());

        assert_eq!(page.id, 42);
        assert!(page.title.is_none());
        assert!(page.description.is_none());
        assert!(page.elements.is_empty());
        assert_eq!(page.modification_date, modified_at());
    }

    #[test]
    fn test_page_document_builders() {
        let page = PageDocument::new(7, modified_at())
            .with_title("About us")
            .with_description("Company background")
            .with_element(PageElement::new("body", ElementKind::Wysiwyg, "<p>Hi</p>"));

        assert_eq!(page.title.as_deref(), Some("About us"));
        assert_eq!(page.description.as_deref(), Some("Company background"));
        assert_eq!(page.elements.len(), 1);
        assert_eq!(page.elements[0].name, "body");
        assert_eq!(page.elements[0].kind, ElementKind::Wysiwyg);
    }

    #[test]
    fn test_document_id() {
        let page = PageDocument::new(123, modified_at());
        assert_eq!(page.document_id(), "123");
    }

    #[test]
    fn test_serialization() {
        let page = PageDocument::new(9, modified_at())
            .with_title("Home")
            .with_element(PageElement::new("intro", ElementKind::Input, "Welcome"));

        let json = serde_json::to_string(&page).unwrap();
        let deserialized: PageDocument = serde_json::from_str(&json).unwrap();

        assert_eq!(page, deserialized);
    }
}
