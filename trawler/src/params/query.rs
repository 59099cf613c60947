//! Data-plane request shapes: stored-document queries and signed URLs.

use serde::{Deserialize, Serialize};

/// Identifies a stored document by URL, domain, or path.
///
/// Used by the download and query endpoints, which answer from the
/// precomputed store without re-crawling when a match exists.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct QueryRequest {
    /// The exact resource URL.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    /// The website domain.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub domain: Option<String>,
    /// The path of the resource.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pathname: Option<String>,
}

impl QueryRequest {
    /// Creates a query for an exact URL.
    #[must_use]
    pub fn url(url: impl Into<String>) -> Self {
        Self {
            url: Some(url.into()),
            ..Default::default()
        }
    }

    /// Creates a query for a whole domain.
    #[must_use]
    pub fn domain(domain: impl Into<String>) -> Self {
        Self {
            domain: Some(domain.into()),
            ..Default::default()
        }
    }
}

/// Options for issuing a time-limited, pre-authorized download link.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SignedUrlParams {
    /// The exact resource URL.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    /// The website domain.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub domain: Option<String>,
    /// Maximum records covered by the link.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub limit: Option<u32>,
    /// Result page the link starts from.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub page: Option<u32>,
    /// Link lifetime in seconds.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub expires_in: Option<u64>,
}
