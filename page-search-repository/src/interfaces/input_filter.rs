//! Input filter trait definition.

/// Sanitizes or normalizes a value before it is embedded in a query or a
/// document body.
///
/// Used for query-term sanitization in `PageRepository::query`; text
/// extraction filters share the same shape.
pub trait InputFilter: Send + Sync {
    /// Filter the input, returning the sanitized value.
    fn filter(&self, input: &str) -> String;
}
