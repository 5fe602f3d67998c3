//! Error types for the page search repository.
//!
//! This module provides a unified error type for all search operations.

mod page_search_error;

pub use page_search_error::PageSearchError;
