//! Configuration types for the page repository.

use std::collections::HashMap;

use crate::errors::PageSearchError;

/// Configuration key naming the index.
pub const CONFIG_KEY_INDEX: &str = "index";

/// Configuration key naming the document type.
pub const CONFIG_KEY_TYPE: &str = "type";

/// The (index name, type name) pair a repository operates on.
///
/// Fixed at repository construction time and never mutated afterwards. Every
/// store call the repository issues is scoped to this pair.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IndexLocation {
    /// The index name.
    pub index: String,
    /// The document type name within the index.
    pub doc_type: String,
}

impl IndexLocation {
    /// Create an index location directly.
    pub fn new(index: impl Into<String>, doc_type: impl Into<String>) -> Self {
        Self {
            index: index.into(),
            doc_type: doc_type.into(),
        }
    }

    /// Parse an index location from a configuration mapping.
    ///
    /// The mapping MUST contain `index` and `type` string keys. Missing
    /// either fails immediately with a configuration error; the caller must
    /// fix its configuration before any operation is attempted.
    ///
    /// # Arguments
    ///
    /// * `configuration` - The construction-time configuration mapping
    ///
    /// # Returns
    ///
    /// * `Ok(IndexLocation)` - The parsed pair
    /// * `Err(PageSearchError::ConfigurationError)` - If a required key is missing
    pub fn from_map(configuration: &HashMap<String, String>) -> Result<Self, PageSearchError> {
        let index = configuration
            .get(CONFIG_KEY_INDEX)
            .ok_or_else(|| PageSearchError::missing_configuration(CONFIG_KEY_INDEX))?;
        let doc_type = configuration
            .get(CONFIG_KEY_TYPE)
            .ok_or_else(|| PageSearchError::missing_configuration(CONFIG_KEY_TYPE))?;

        Ok(Self::new(index, doc_type))
    }
}
