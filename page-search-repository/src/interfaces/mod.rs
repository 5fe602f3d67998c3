//! Interface definitions for the repository's collaborators.
//!
//! All collaborators are injected, which keeps the repository free of hidden
//! global dependencies and makes it testable with mock implementations.

mod input_filter;
mod page_lookup;
mod page_processor;
mod search_store;

pub use input_filter::InputFilter;
pub use page_lookup::PageLookup;
pub use page_processor::PageProcessor;
pub use search_store::SearchStore;
