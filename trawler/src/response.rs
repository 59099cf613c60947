//! Response envelope types.
//!
//! Buffered crawl-family operations return a sequence of page records;
//! streamed operations deliver the same records one callback at a time.
//! Records are decoded leniently: every field is optional, so a record
//! that parses as JSON always maps into the envelope.

use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Content payload of a single page record.
///
/// A single requested format arrives as one string; requesting multiple
/// return formats yields an object keyed by format name. Binary formats
/// (bytes, screenshots) are base64-encoded strings on the wire.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Content {
    /// Single-format payload: HTML, markdown, text, or base64 bytes.
    Text(String),
    /// Multi-format payload keyed by requested format.
    Formats {
        /// The resource exactly as fetched.
        #[serde(skip_serializing_if = "Option::is_none")]
        raw: Option<String>,
        /// Base64-encoded raw bytes.
        #[serde(skip_serializing_if = "Option::is_none")]
        bytes: Option<String>,
        /// Plain text.
        #[serde(skip_serializing_if = "Option::is_none")]
        text: Option<String>,
        /// Markdown.
        #[serde(skip_serializing_if = "Option::is_none")]
        markdown: Option<String>,
        /// HTML converted to text.
        #[serde(skip_serializing_if = "Option::is_none")]
        html2text: Option<String>,
        /// Base64-encoded screenshot.
        #[serde(skip_serializing_if = "Option::is_none")]
        screenshot: Option<String>,
    },
}

impl Content {
    /// The best-guess textual representation of the content.
    #[must_use]
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::Text(s) => Some(s),
            Self::Formats {
                text,
                raw,
                html2text,
                markdown,
                ..
            } => text
                .as_deref()
                .or(raw.as_deref())
                .or(html2text.as_deref())
                .or(markdown.as_deref()),
        }
    }

    /// Decodes the binary payload, if one is present.
    #[must_use]
    pub fn decode_bytes(&self) -> Option<Vec<u8>> {
        match self {
            Self::Text(_) => None,
            Self::Formats {
                bytes, screenshot, ..
            } => bytes
                .as_deref()
                .or(screenshot.as_deref())
                .and_then(|b64| BASE64.decode(b64).ok()),
        }
    }

    /// Whether the record carries a screenshot.
    #[must_use]
    pub fn has_screenshot(&self) -> bool {
        matches!(
            self,
            Self::Formats {
                screenshot: Some(_),
                ..
            }
        )
    }

    /// Whether every payload slot is empty or whitespace.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        match self {
            Self::Text(s) => s.trim().is_empty(),
            Self::Formats {
                raw,
                bytes,
                text,
                markdown,
                html2text,
                screenshot,
            } => [raw, bytes, text, markdown, html2text, screenshot]
                .iter()
                .all(|slot| slot.as_deref().map_or(true, |s| s.trim().is_empty())),
        }
    }
}

/// Page metadata, present when the `metadata` option was set.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Metadata {
    /// SEO title of the page.
    #[serde(default)]
    pub title: Option<String>,
    /// Meta description of the page.
    #[serde(default)]
    pub description: Option<String>,
    /// Final resolved URL.
    #[serde(default)]
    pub url: Option<String>,
    /// Social Open Graph preview image.
    #[serde(default, rename = "og_image")]
    pub image: Option<String>,
    /// Keywords extracted from the content.
    #[serde(default)]
    pub keywords: Option<Vec<String>>,
    /// Domain of the source page.
    #[serde(default)]
    pub domain: Option<String>,
    /// Path of the source page.
    #[serde(default)]
    pub pathname: Option<String>,
    /// The URL as originally requested.
    #[serde(default)]
    pub original_url: Option<String>,
    /// File-type classification, if detected.
    #[serde(default)]
    pub resource_type: Option<String>,
    /// File size in bytes, if known.
    #[serde(default)]
    pub file_size: Option<u64>,
    /// Structured extraction output.
    #[serde(default)]
    pub extracted_data: Option<Value>,
    /// Output of automation steps.
    #[serde(default)]
    pub automation_data: Option<Value>,
}

/// Per-record cost breakdown.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Costs {
    /// Cost of AI processing.
    #[serde(default)]
    pub ai_cost: f64,
    /// Cost of bytes transferred.
    #[serde(default)]
    pub bytes_transferred_cost: f64,
    /// Cost of compute.
    #[serde(default)]
    pub compute_cost: f64,
    /// Cost of file handling.
    #[serde(default)]
    pub file_cost: f64,
    /// Cost of transforms.
    #[serde(default)]
    pub transform_cost: f64,
    /// Total cost of the record.
    #[serde(default)]
    pub total_cost: f64,
}

/// A single page record returned by crawl-family operations.
///
/// An `error` marks a per-page failure; it does not mean the overall
/// operation failed, and other records in the same response may be fine.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CoreResponse {
    /// Page content in the requested format(s).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content: Option<Content>,
    /// Human-readable detail about this record.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    /// Per-page error string.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    /// HTTP-like status for this record.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<u16>,
    /// The subject URL of this record.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    /// Links found on the page, when requested.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub links: Option<Vec<String>>,
    /// Page metadata, when requested.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub metadata: Option<Metadata>,
    /// Cost breakdown for this record.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub costs: Option<Costs>,
}

impl CoreResponse {
    /// Whether this record reports a per-page failure.
    #[must_use]
    pub fn is_page_error(&self) -> bool {
        self.error.is_some()
    }
}

/// The result list of a search operation.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SearchResults {
    /// The matched entries.
    #[serde(default)]
    pub content: Vec<SearchResult>,
}

/// One search result entry.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SearchResult {
    /// The result title.
    #[serde(default)]
    pub title: Option<String>,
    /// The result description.
    #[serde(default)]
    pub description: Option<String>,
    /// The result URL.
    #[serde(default)]
    pub url: String,
}

/// Decodes a buffered crawl body into page records.
///
/// The server answers with an array of records, or a single record for
/// one-page operations. Entries that do not decode into the envelope are
/// dropped, matching the streaming path's treatment of malformed records.
#[must_use]
pub fn records_from(value: Value) -> Vec<CoreResponse> {
    match value {
        Value::Array(items) => items
            .into_iter()
            .filter_map(|item| serde_json::from_value(item).ok())
            .collect(),
        Value::Object(_) => serde_json::from_value(value).map_or_else(|_| Vec::new(), |r| vec![r]),
        _ => Vec::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    #[test]
    fn test_single_format_content_is_a_string() {
        let record: CoreResponse = serde_json::from_value(json!({
            "content": "<html></html>",
            "status": 200,
            "url": "https://example.com",
        }))
        .unwrap();
        assert_eq!(record.content.unwrap().as_str(), Some("<html></html>"));
        assert_eq!(record.status, Some(200));
    }

    #[test]
    fn test_multi_format_content_keyed_by_name() {
        let content: Content = serde_json::from_value(json!({
            "markdown": "# Title",
            "text": "Title",
        }))
        .unwrap();
        // Text wins over markdown as the string view.
        assert_eq!(content.as_str(), Some("Title"));
        assert!(!content.has_screenshot());
    }

    #[test]
    fn test_bytes_decode_from_base64() {
        let content: Content = serde_json::from_value(json!({"bytes": "aGVsbG8="})).unwrap();
        assert_eq!(content.decode_bytes().as_deref(), Some(b"hello".as_ref()));
    }

    #[test]
    fn test_content_emptiness() {
        let content: Content = serde_json::from_value(json!("  ")).unwrap();
        assert!(content.is_empty());
        let content: Content = serde_json::from_value(json!({"raw": "x"})).unwrap();
        assert!(!content.is_empty());
    }

    #[test]
    fn test_records_from_array_drops_non_records() {
        let records = records_from(json!([
            {"url": "https://example.com/a", "status": 200},
            42,
            {"url": "https://example.com/b", "status": 404, "error": "not found"},
        ]));
        assert_eq!(records.len(), 2);
        assert!(!records[0].is_page_error());
        assert!(records[1].is_page_error());
    }

    #[test]
    fn test_records_from_single_object() {
        let records = records_from(json!({"url": "https://example.com"}));
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].url.as_deref(), Some("https://example.com"));
    }

    #[test]
    fn test_records_from_scalar_is_empty() {
        assert!(records_from(json!("plain text body")).is_empty());
    }

    #[test]
    fn test_metadata_tolerates_sparse_objects() {
        let metadata: Metadata = serde_json::from_value(json!({"title": "Home"})).unwrap();
        assert_eq!(metadata.title.as_deref(), Some("Home"));
        assert!(metadata.description.is_none());
    }

    #[test]
    fn test_search_results_shape() {
        let results: SearchResults = serde_json::from_value(json!({
            "content": [
                {"title": "Example", "url": "https://example.com"},
                {"url": "https://example.org", "description": "Another"},
            ]
        }))
        .unwrap();
        assert_eq!(results.content.len(), 2);
        assert_eq!(results.content[0].url, "https://example.com");
    }
}
