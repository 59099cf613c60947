//! Search request parameters.

use super::base::RequestParams;
use serde::{Deserialize, Serialize};

/// Parameters for the search operation.
///
/// Extends the base crawl configuration, which governs the page fetches
/// triggered for individual results when `fetch_page_content` is set.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SearchParams {
    /// Base configuration applied to per-result page fetches.
    #[serde(flatten)]
    pub base: RequestParams,
    /// The search query. Set by [`crate::Trawler::search`].
    #[serde(default)]
    pub search: String,
    /// Maximum number of results to process.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub search_limit: Option<u32>,
    /// Fetch the content of each result page. Server default is true.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fetch_page_content: Option<bool>,
    /// Search location.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    /// Country code of the search.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub country: Option<String>,
    /// Language code of the search.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub language: Option<String>,
    /// Number of search results per page.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub num: Option<u32>,
    /// Result page to fetch.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub page: Option<u32>,
    /// Website cap when the query expands to a list of sites.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub website_limit: Option<u32>,
    /// Prioritize speed over result volume.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub quick_search: Option<bool>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    #[test]
    fn test_base_params_flatten_to_top_level() {
        let params = SearchParams {
            base: RequestParams {
                limit: Some(3),
                ..Default::default()
            },
            search: "rust crates".to_string(),
            num: Some(10),
            fetch_page_content: Some(false),
            ..Default::default()
        };
        assert_eq!(
            serde_json::to_value(&params).unwrap(),
            json!({
                "search": "rust crates",
                "limit": 3,
                "num": 10,
                "fetch_page_content": false,
            })
        );
    }
}
