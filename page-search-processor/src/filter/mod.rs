//! Input filters for indexing and querying.

mod html_to_text;
mod term_filter;

pub use html_to_text::HtmlToTextFilter;
pub use term_filter::TermFilter;
