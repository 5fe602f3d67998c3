//! HTML to plain text conversion.

use page_search_repository::InputFilter;

/// Converts rich WYSIWYG HTML into plain text suitable for indexing.
///
/// Script and style blocks are removed entirely, remaining tags are replaced
/// with whitespace, common entities are decoded, and runs of whitespace are
/// collapsed to single spaces.
#[derive(Debug, Clone, Copy, Default)]
pub struct HtmlToTextFilter;

impl HtmlToTextFilter {
    /// Create a new HTML to text filter.
    pub fn new() -> Self {
        Self
    }

    /// Extract the plain text from an HTML fragment.
    pub fn extract(&self, html: &str) -> String {
        let without_scripts = Self::strip_container(html, "script");
        let without_styles = Self::strip_container(&without_scripts, "style");
        let text = Self::strip_tags(&without_styles);
        let text = Self::decode_entities(&text);
        Self::collapse_whitespace(&text)
    }

    /// ASCII-case-insensitive substring search starting at `from`.
    fn find_ci(haystack: &str, needle: &str, from: usize) -> Option<usize> {
        let h = haystack.as_bytes();
        let n = needle.as_bytes();
        if n.is_empty() || from >= h.len() || h.len() < n.len() {
            return None;
        }
        (from..=h.len() - n.len()).find(|&i| h[i..i + n.len()].eq_ignore_ascii_case(n))
    }

    /// Remove `<tag ...> ... </tag>` blocks including their contents.
    ///
    /// An unterminated block swallows the rest of the input, matching how
    /// browsers treat an unclosed script element.
    fn strip_container(html: &str, tag: &str) -> String {
        let open = format!("<{}", tag);
        let close = format!("</{}", tag);

        let mut out = String::with_capacity(html.len());
        let mut pos = 0;

        while let Some(start) = Self::find_ci(html, &open, pos) {
            out.push_str(&html[pos..start]);

            let Some(close_start) = Self::find_ci(html, &close, start) else {
                return out;
            };
            let Some(gt) = html[close_start..].find('>') else {
                return out;
            };
            pos = close_start + gt + 1;
        }

        out.push_str(&html[pos..]);
        out
    }

    /// Replace every tag with a single space so adjacent words stay apart.
    fn strip_tags(html: &str) -> String {
        let mut out = String::with_capacity(html.len());
        let mut in_tag = false;

        for c in html.chars() {
            match c {
                '<' if !in_tag => {
                    in_tag = true;
                    out.push(' ');
                }
                '>' if in_tag => in_tag = false,
                c if !in_tag => out.push(c),
                _ => {}
            }
        }

        out
    }

    /// Decode the entities WYSIWYG editors commonly emit.
    fn decode_entities(text: &str) -> String {
        text.replace("&nbsp;", " ")
            .replace("&lt;", "<")
            .replace("&gt;", ">")
            .replace("&quot;", "\"")
            .replace("&#39;", "'")
            .replace("&amp;", "&")
    }

    /// Collapse all whitespace runs to single spaces and trim the ends.
    fn collapse_whitespace(text: &str) -> String {
        text.split_whitespace().collect::<Vec<_>>().join(" ")
    }
}

impl InputFilter for HtmlToTextFilter {
    fn filter(&self, input: &str) -> String {
        self.extract(input)
    }
}
