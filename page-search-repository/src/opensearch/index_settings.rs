//! OpenSearch index naming and mappings for page documents.
//!
//! The engine no longer supports mapping types, so every (index, type) pair
//! is materialized as its own physical index. All searchable text is copied
//! into a `content` aggregate field which full-text queries match against.

use serde_json::{json, Value};

/// The aggregate field all searchable text is copied into.
pub const AGGREGATE_FIELD: &str = "content";

/// The physical index name backing an (index, type) pair.
///
/// # Example
///
/// ```
/// use page_search_repository::opensearch::physical_index_name;
///
/// assert_eq!(physical_index_name("cms", "page"), "cms_page");
/// ```
pub fn physical_index_name(index: &str, doc_type: &str) -> String {
    format!("{}_{}", index, doc_type)
}

/// Settings and mappings for a page index.
///
/// Known page fields are mapped explicitly; element fields are created on
/// demand through a dynamic template. Every text field is copied into the
/// `content` aggregate so a single match clause covers the whole page.
///
/// # Sharding Configuration
///
/// - 1 primary shard
/// - 1 replica for redundancy
pub fn index_settings() -> Value {
    json!({
        "settings": {
            "number_of_shards": 1,
            "number_of_replicas": 1
        },
        "mappings": {
            "dynamic_templates": [
                {
                    "element_text": {
                        "match_mapping_type": "string",
                        "mapping": {
                            "type": "text",
                            "copy_to": AGGREGATE_FIELD
                        }
                    }
                }
            ],
            "properties": {
                "title": {
                    "type": "text",
                    "copy_to": AGGREGATE_FIELD
                },
                "description": {
                    "type": "text",
                    "copy_to": AGGREGATE_FIELD
                },
                "content": {
                    "type": "text"
                },
                "indexed_at": {
                    "type": "date"
                }
            }
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_physical_index_name() {
        assert_eq!(physical_index_name("cms", "page"), "cms_page");
        assert_eq!(physical_index_name("intranet", "article"), "intranet_article");
    }

    #[test]
    fn test_index_settings_structure() {
        let settings = index_settings();

        assert!(settings["settings"]["number_of_shards"].is_number());
        assert!(settings["settings"]["number_of_replicas"].is_number());

        assert_eq!(settings["mappings"]["properties"]["title"]["type"], "text");
        assert_eq!(
            settings["mappings"]["properties"]["title"]["copy_to"],
            AGGREGATE_FIELD
        );
        assert_eq!(
            settings["mappings"]["properties"]["description"]["copy_to"],
            AGGREGATE_FIELD
        );
        assert_eq!(settings["mappings"]["properties"]["content"]["type"], "text");
        assert_eq!(settings["mappings"]["properties"]["indexed_at"]["type"], "date");
    }

    #[test]
    fn test_dynamic_template_copies_elements_into_aggregate() {
        let settings = index_settings();
        let template = &settings["mappings"]["dynamic_templates"][0]["element_text"];

        assert_eq!(template["match_mapping_type"], "string");
        assert_eq!(template["mapping"]["copy_to"], AGGREGATE_FIELD);
    }
}
