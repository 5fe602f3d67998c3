//! Page search error types.
//!
//! This module defines the unified error type for all page search operations,
//! covering both low-level backend errors (connection, serialization, etc.)
//! and collaborator errors (processor, lookup).

use thiserror::Error;

/// Unified errors from page search operations.
///
/// Used by the `SearchStore` trait and `PageRepository` for all operations.
/// Remote call failures are classified into a variant but otherwise propagate
/// unchanged; there is no retry, wrapping chain, or suppression here.
#[derive(Debug, Clone, Error)]
pub enum PageSearchError {
    /// Missing or invalid construction-time configuration.
    #[error("Configuration error: {0}")]
    ConfigurationError(String),

    /// Failed to establish connection to the search backend.
    #[error("Connection error: {0}")]
    ConnectionError(String),

    /// Failed to index a document.
    #[error("Index error: {0}")]
    IndexError(String),

    /// Failed to update a document.
    #[error("Update error: {0}")]
    UpdateError(String),

    /// Failed to delete a document or clear a mapping.
    #[error("Delete error: {0}")]
    DeleteError(String),

    /// A search call failed.
    #[error("Search error: {0}")]
    SearchError(String),

    /// Failed to parse a response from the search backend.
    #[error("Parse error: {0}")]
    ParseError(String),

    /// Failed to serialize data for the search backend.
    #[error("Serialization error: {0}")]
    SerializationError(String),

    /// The page processor failed to flatten a page.
    #[error("Processor error: {0}")]
    ProcessorError(String),

    /// The page lookup collaborator failed.
    #[error("Lookup error: {0}")]
    LookupError(String),

    /// Unknown error.
    #[error("Unknown error: {0}")]
    Unknown(String),
}

impl PageSearchError {
    /// Create a configuration error.
    pub fn configuration(msg: impl Into<String>) -> Self {
        Self::ConfigurationError(msg.into())
    }

    /// Create a configuration error for a missing required key.
    pub fn missing_configuration(key: &str) -> Self {
        Self::ConfigurationError(format!("Missing configuration setting: {}", key))
    }

    /// Create a connection error.
    pub fn connection(msg: impl Into<String>) -> Self {
        Self::ConnectionError(msg.into())
    }

    /// Create an index error.
    pub fn index(msg: impl Into<String>) -> Self {
        Self::IndexError(msg.into())
    }

    /// Create an update error.
    pub fn update(msg: impl Into<String>) -> Self {
        Self::UpdateError(msg.into())
    }

    /// Create a delete error.
    pub fn delete(msg: impl Into<String>) -> Self {
        Self::DeleteError(msg.into())
    }

    /// Create a search error.
    pub fn search(msg: impl Into<String>) -> Self {
        Self::SearchError(msg.into())
    }

    /// Create a parse error.
    pub fn parse(msg: impl Into<String>) -> Self {
        Self::ParseError(msg.into())
    }

    /// Create a serialization error.
    pub fn serialization(msg: impl Into<String>) -> Self {
        Self::SerializationError(msg.into())
    }

    /// Create a processor error.
    pub fn processor(msg: impl Into<String>) -> Self {
        Self::ProcessorError(msg.into())
    }

    /// Create a lookup error.
    pub fn lookup(msg: impl Into<String>) -> Self {
        Self::LookupError(msg.into())
    }

    /// Create an unknown error.
    pub fn unknown(msg: impl Into<String>) -> Self {
        Self::Unknown(msg.into())
    }
}
