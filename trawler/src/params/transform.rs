//! Transform request parameters.

use super::base::ReturnFormat;
use serde::{Deserialize, Serialize};

/// Options for the HTML/text transform operation.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TransformParams {
    /// Output encoding of the transformed documents.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub return_format: Option<ReturnFormat>,
    /// Apply readability preprocessing.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub readability: Option<bool>,
    /// Clean the output for model consumption.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub clean: Option<bool>,
    /// Aggressive cleaning: also strip footers, navigation, and chrome.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub clean_full: Option<bool>,
}

/// One document submitted for transformation.
///
/// Either `html` or `content` carries the payload; `url` is only consulted
/// in readability mode.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TransformInput {
    /// The HTML source.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub html: Option<String>,
    /// Alternative plain content payload.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
    /// The source URL of the document.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    /// Language hint for the document.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub lang: Option<String>,
}

impl TransformInput {
    /// Creates an input from an HTML string.
    #[must_use]
    pub fn from_html(html: impl Into<String>) -> Self {
        Self {
            html: Some(html.into()),
            ..Default::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_transform_input_wire_shape() {
        let input = TransformInput {
            html: Some("<h1>hi</h1>".to_string()),
            url: Some("https://example.com".to_string()),
            ..Default::default()
        };
        assert_eq!(
            serde_json::to_value(&input).unwrap(),
            json!({"html": "<h1>hi</h1>", "url": "https://example.com"})
        );
    }
}
