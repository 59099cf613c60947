//! Server-side data collection identifiers.

use serde::{Deserialize, Serialize};
use std::fmt;

/// A named server-side table addressable through the data endpoints.
///
/// Collections only shape URL paths; they carry no client-side state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Collection {
    /// Registered websites and their crawl configuration.
    Websites,
    /// Crawled pages.
    Pages,
    /// Metadata extracted per page.
    PagesMetadata,
    /// Contacts extracted from pages.
    Contacts,
    /// Per-website crawl state.
    CrawlState,
    /// Crawl activity logs.
    CrawlLogs,
    /// Credit balance and usage.
    Credits,
    /// Configured webhooks.
    Webhooks,
    /// Issued API keys.
    ApiKeys,
}

impl Collection {
    /// The path segment naming this collection.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Websites => "websites",
            Self::Pages => "pages",
            Self::PagesMetadata => "pages_metadata",
            Self::Contacts => "contacts",
            Self::CrawlState => "crawl_state",
            Self::CrawlLogs => "crawl_logs",
            Self::Credits => "credits",
            Self::Webhooks => "webhooks",
            Self::ApiKeys => "api_keys",
        }
    }
}

impl fmt::Display for Collection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_path_segments() {
        assert_eq!(Collection::Websites.as_str(), "websites");
        assert_eq!(Collection::CrawlState.as_str(), "crawl_state");
        assert_eq!(Collection::ApiKeys.to_string(), "api_keys");
    }

    #[test]
    fn test_serde_names_match_path_segments() {
        for collection in [
            Collection::Websites,
            Collection::Pages,
            Collection::PagesMetadata,
            Collection::Contacts,
            Collection::CrawlState,
            Collection::CrawlLogs,
            Collection::Credits,
            Collection::Webhooks,
            Collection::ApiKeys,
        ] {
            let serialized = serde_json::to_value(collection).unwrap();
            assert_eq!(serialized, serde_json::json!(collection.as_str()));
        }
    }
}
