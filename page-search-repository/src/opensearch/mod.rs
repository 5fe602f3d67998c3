//! OpenSearch implementation of the search store.
//!
//! This module provides a concrete implementation of `SearchStore` using
//! OpenSearch as the backend.

mod index_settings;
mod store;

pub use index_settings::{index_settings, physical_index_name, AGGREGATE_FIELD};
pub use store::OpenSearchStore;
