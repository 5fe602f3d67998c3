//! Page processing into indexable field mappings.

mod page_processor;

pub use page_processor::ContentPageProcessor;
