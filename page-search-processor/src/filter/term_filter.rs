//! Query term sanitization.

use page_search_repository::InputFilter;

/// Sanitizes user-supplied terms before they are embedded in a query.
///
/// Terms are trimmed, lowercased, and reduced to alphanumeric characters,
/// whitespace, dashes, and underscores; whitespace runs collapse to single
/// spaces. The result is safe to place verbatim into a terms clause.
#[derive(Debug, Clone, Copy, Default)]
pub struct TermFilter;

impl TermFilter {
    /// Create a new term filter.
    pub fn new() -> Self {
        Self
    }
}

impl InputFilter for TermFilter {
    fn filter(&self, input: &str) -> String {
        let kept: String = input
            .trim()
            .to_lowercase()
            .chars()
            .filter(|c| c.is_alphanumeric() || c.is_whitespace() || *c == '-' || *c == '_')
            .collect();

        kept.split_whitespace().collect::<Vec<_>>().join(" ")
    }
}
