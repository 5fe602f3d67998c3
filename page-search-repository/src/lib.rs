//! # Page Search Repository
//!
//! This crate provides traits and implementations for synchronizing CMS page
//! documents with a search index and querying them back. It includes
//! definitions for errors, collaborator interfaces, a concrete OpenSearch
//! store, and the `PageRepository` that ties them together.

pub mod config;
pub mod errors;
pub mod interfaces;
pub mod opensearch;
pub mod repository;
pub mod types;

pub use config::IndexLocation;
pub use errors::PageSearchError;
pub use interfaces::{InputFilter, PageLookup, PageProcessor, SearchStore};
pub use opensearch::OpenSearchStore;
pub use repository::PageRepository;
pub use types::{DocumentPath, IndexRequest, SearchRequest};
