//! # Page Search Processor
//!
//! Default implementations of the page search collaborators that turn CMS
//! content into indexable text:
//!
//! - [`filter`]: text extraction and term sanitization filters
//! - [`processor`]: the default page processor flattening pages into field
//!   mappings

pub mod filter;
pub mod processor;

pub use filter::{HtmlToTextFilter, TermFilter};
pub use processor::ContentPageProcessor;
