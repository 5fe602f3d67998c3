//! # Page Search Shared
//!
//! This crate defines shared data structures and types used across the page
//! search system. It includes the page document representation handed over by
//! the CMS, the boolean query model, and the raw hit types returned by the
//! search backend.

pub mod types;

pub use types::page_document::{ElementKind, PageDocument, PageElement};
pub use types::query::{BoolQuery, Filter, MatchQuery, Query, TermsQuery};
pub use types::search_hit::{SearchHit, SearchHits};
