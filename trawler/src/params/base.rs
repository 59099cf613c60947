//! The base per-crawl configuration surface.

use super::automation::{AutomationMap, ExecutionScripts, Timeout, WaitFor};
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};

/// Transport/render mode for page fetches.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RequestKind {
    /// Plain HTTP request, no rendering.
    Http,
    /// Full browser rendering.
    Chrome,
    /// Adaptive mode: HTTP first, browser when the page needs it.
    #[default]
    Smart,
}

/// Output encoding for returned page content.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReturnFormat {
    /// The resource exactly as fetched.
    #[default]
    Raw,
    /// Markdown.
    Markdown,
    /// CommonMark-flavored markdown.
    Commonmark,
    /// HTML converted to text.
    Html2text,
    /// Plain text.
    Text,
    /// A screenshot, base64-encoded.
    Screenshot,
    /// XML.
    Xml,
    /// Raw bytes.
    Bytes,
}

/// One return format, or several keyed by name in the response content.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ReturnFormats {
    /// A single format.
    One(ReturnFormat),
    /// Multiple formats returned side by side.
    Many(HashSet<ReturnFormat>),
}

impl Default for ReturnFormats {
    fn default() -> Self {
        Self::One(ReturnFormat::Raw)
    }
}

/// Outbound proxy pool selection.
///
/// Pools trade cost against stealth and latency; the server routes page
/// fetches through the selected pool.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProxyPool {
    /// Entry-level residential pool.
    Residential,
    /// Higher-throughput residential pool.
    ResidentialFast,
    /// Static residential IPs, rotated daily.
    ResidentialStatic,
    /// 4G/5G mobile proxies for maximum evasion.
    Mobile,
    /// ISP-grade datacenter routing.
    #[serde(alias = "datacenter")]
    #[default]
    Isp,
    /// Premium low-latency residential pool.
    ResidentialPremium,
    /// Balanced residential plan.
    ResidentialCore,
    /// Largest, highest-quality residential pool.
    ResidentialPlus,
}

impl ProxyPool {
    /// The canonical wire name of the pool.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Residential => "residential",
            Self::ResidentialFast => "residential_fast",
            Self::ResidentialStatic => "residential_static",
            Self::Mobile => "mobile",
            Self::Isp => "isp",
            Self::ResidentialPremium => "residential_premium",
            Self::ResidentialCore => "residential_core",
            Self::ResidentialPlus => "residential_plus",
        }
    }
}

/// How returned text content is segmented.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChunkingKind {
    /// By word count.
    #[default]
    ByWords,
    /// By line count.
    ByLines,
    /// By character length.
    ByCharacterLength,
    /// By sentence.
    BySentence,
}

/// Text chunking algorithm and the amount to chunk by.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct ChunkingAlg {
    /// The segmentation strategy.
    #[serde(rename = "type")]
    pub kind: ChunkingKind,
    /// The amount to chunk by, in the strategy's unit.
    pub value: i32,
}

/// Redirect policy for page fetches.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RedirectPolicy {
    /// Follow all redirects.
    Loose,
    /// Follow same-origin redirects only.
    #[default]
    Strict,
}

/// Browser viewport emulation.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Viewport {
    /// Device screen width.
    pub width: u32,
    /// Device screen height.
    pub height: u32,
    /// Device scale factor.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub device_scale_factor: Option<f64>,
    /// Emulate a mobile device.
    pub emulating_mobile: bool,
    /// Landscape instead of portrait.
    pub is_landscape: bool,
    /// Emulate a touch screen.
    pub has_touch: bool,
}

/// Event notification target and triggers.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct WebhookSettings {
    /// Where webhook payloads are delivered.
    pub destination: String,
    /// Fire when all credits are depleted.
    pub on_credits_depleted: bool,
    /// Fire when half of the credits are depleted.
    pub on_credits_half_depleted: bool,
    /// Fire on website status updates.
    pub on_website_status: bool,
    /// Fire when a new page is found (links and bytes).
    pub on_find: bool,
    /// Fire with the metadata of each found page.
    pub on_find_metadata: bool,
}

/// Tracking toggles for rendered-page network activity.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct EventTracker {
    /// Track responses received, including bytes used.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub responses: Option<bool>,
    /// Track requests sent, with send times.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub requests: Option<bool>,
}

/// A named group of CSS selectors for content extraction.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CssSelectorGroup {
    /// The name of the selector group.
    pub name: String,
    /// The CSS selectors in the group.
    pub selectors: Vec<String>,
}

/// CSS extraction groups keyed by URL path or page.
pub type CssExtractionMap = HashMap<String, Vec<CssSelectorGroup>>;

/// Configuration for one operation against one URL.
///
/// Every field is optional and independently meaningful; unset fields are
/// omitted from the request payload and take the server-side default.
/// The only client-side default anywhere is [`crate::Trawler::scrape`]
/// injecting `limit = 1`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RequestParams {
    /// The URL to crawl or scrape.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    /// Transport/render mode for page fetches.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub request: Option<RequestKind>,
    /// Maximum number of pages to visit. 0 or unset means unlimited.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub limit: Option<u32>,
    /// Output encoding(s) for returned content.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub return_format: Option<ReturnFormats>,
    /// Country code to originate fetches from.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub country_code: Option<String>,
    /// Only visit the top-level domain.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tld: Option<bool>,
    /// Link-following depth ceiling.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub depth: Option<u32>,
    /// Serve from the crawl cache when possible.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cache: Option<bool>,
    /// Infinite-scroll passes on rendered pages.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub scroll: Option<u32>,
    /// Page-count caps per path prefix.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub budget: Option<HashMap<String, u32>>,
    /// Route patterns to ignore. Regex strings are accepted.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub blacklist: Option<Vec<String>>,
    /// Route patterns to crawl exclusively. Regex strings are accepted.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub whitelist: Option<Vec<String>>,
    /// Locale used during the crawl.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub locale: Option<String>,
    /// Cookie header value for page fetches.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cookies: Option<String>,
    /// Use stealth techniques to avoid detection.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stealth: Option<bool>,
    /// Headers applied to page fetches.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub headers: Option<HashMap<String, String>>,
    /// Enable anti-bot countermeasures.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub anti_bot: Option<bool>,
    /// Event notification target and triggers.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub webhooks: Option<WebhookSettings>,
    /// Include page metadata in the response.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub metadata: Option<bool>,
    /// Browser viewport emulation.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub viewport: Option<Viewport>,
    /// Text encoding of returned content.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub encoding: Option<String>,
    /// Include subdomains in the crawl.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub subdomains: Option<bool>,
    /// User agent string for page fetches.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user_agent: Option<String>,
    /// Persist response data server-side.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub store_data: Option<bool>,
    /// Model configuration for AI-assisted extraction.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub gpt_config: Option<HashMap<String, String>>,
    /// Enable fingerprint protection.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fingerprint: Option<bool>,
    /// Run without any server-side storage.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub storageless: Option<bool>,
    /// Apply readability preprocessing to content.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub readability: Option<bool>,
    /// Route through the proxy pool. Deprecated in favor of `proxy`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub proxy_enabled: Option<bool>,
    /// Respect the target's robots.txt.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub respect_robots: Option<bool>,
    /// CSS selector that scopes the returned content.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub root_selector: Option<String>,
    /// Load all page resources, not just the document.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub full_resources: Option<bool>,
    /// Free-text input to extract data from.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
    /// Seed the crawl from sitemap links.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sitemap: Option<bool>,
    /// External domains to include in the crawl.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub external_domains: Option<Vec<String>>,
    /// Collect page insights such as request duration and web vitals.
    /// Requires `metadata`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub page_insights: Option<bool>,
    /// Return embeddings for the title and description. Requires `metadata`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub return_embeddings: Option<bool>,
    /// Return the HTTP response headers.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub return_headers: Option<bool>,
    /// Return the links found on each page.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub return_page_links: Option<bool>,
    /// Return the HTTP response cookies.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub return_cookies: Option<bool>,
    /// Per-page processing ceiling, in seconds.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub request_timeout: Option<u8>,
    /// Run the operation in the background and return immediately.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub run_in_background: Option<bool>,
    /// Skip server-side configuration checks.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub skip_config_checks: Option<bool>,
    /// CSS extraction groups applied per path or page.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub css_extraction_map: Option<CssExtractionMap>,
    /// How returned text content is segmented.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub chunking_alg: Option<ChunkingAlg>,
    /// Disable request interception in rendered fetches. Helps pages that
    /// load content through third-party scripts.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub disable_intercept: Option<bool>,
    /// Page-readiness conditions for rendered fetches.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub wait_for: Option<WaitFor>,
    /// Raw JavaScript to run, keyed by URL or URL path.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub execution_scripts: Option<ExecutionScripts>,
    /// Automated browser actions, keyed by URL or URL path.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub automation_scripts: Option<AutomationMap>,
    /// Redirect policy for page fetches.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub redirect_policy: Option<RedirectPolicy>,
    /// Track request/response network activity on rendered pages.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub event_tracker: Option<EventTracker>,
    /// Wall-clock ceiling for the whole crawl.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub crawl_timeout: Option<Timeout>,
    /// Script evaluated in every frame before its own scripts load.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub evaluate_on_new_document: Option<String>,
    /// Reduced-cost mode trading speed and accuracy for transfer cost.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub lite_mode: Option<bool>,
    /// Outbound proxy pool selection.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub proxy: Option<ProxyPool>,
    /// User-supplied static proxy endpoint for file downloads.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub remote_proxy: Option<String>,
    /// Maximum credits to spend per page. Applies to rendered fetches.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_credits_per_page: Option<f64>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    #[test]
    fn test_default_params_serialize_to_empty_object() {
        let params = RequestParams::default();
        assert_eq!(serde_json::to_value(&params).unwrap(), json!({}));
    }

    #[test]
    fn test_only_set_fields_appear_on_the_wire() {
        let params = RequestParams {
            limit: Some(10),
            depth: Some(2),
            proxy: Some(ProxyPool::ResidentialFast),
            request: Some(RequestKind::Smart),
            ..Default::default()
        };
        assert_eq!(
            serde_json::to_value(&params).unwrap(),
            json!({
                "limit": 10,
                "depth": 2,
                "proxy": "residential_fast",
                "request": "smart",
            })
        );
    }

    #[test]
    fn test_proxy_pool_wire_names() {
        for pool in [
            ProxyPool::Residential,
            ProxyPool::ResidentialFast,
            ProxyPool::ResidentialStatic,
            ProxyPool::Mobile,
            ProxyPool::Isp,
            ProxyPool::ResidentialPremium,
            ProxyPool::ResidentialCore,
            ProxyPool::ResidentialPlus,
        ] {
            assert_eq!(
                serde_json::to_value(pool).unwrap(),
                json!(pool.as_str()),
                "{pool:?}"
            );
        }
    }

    #[test]
    fn test_proxy_pool_datacenter_alias() {
        let pool: ProxyPool = serde_json::from_value(json!("datacenter")).unwrap();
        assert_eq!(pool, ProxyPool::Isp);
    }

    #[test]
    fn test_return_formats_single_and_multi() {
        let one = ReturnFormats::One(ReturnFormat::Markdown);
        assert_eq!(serde_json::to_value(&one).unwrap(), json!("markdown"));

        let many = ReturnFormats::Many([ReturnFormat::Markdown].into_iter().collect());
        assert_eq!(serde_json::to_value(&many).unwrap(), json!(["markdown"]));

        let parsed: ReturnFormats =
            serde_json::from_value(json!(["markdown", "bytes"])).unwrap();
        assert!(matches!(parsed, ReturnFormats::Many(set) if set.len() == 2));
    }

    #[test]
    fn test_chunking_alg_wire_shape() {
        let alg = ChunkingAlg {
            kind: ChunkingKind::BySentence,
            value: 4,
        };
        assert_eq!(
            serde_json::to_value(alg).unwrap(),
            json!({"type": "bysentence", "value": 4})
        );
    }

    #[test]
    fn test_budget_and_filters_serialize() {
        let params = RequestParams {
            budget: Some([("/docs".to_string(), 50)].into_iter().collect()),
            blacklist: Some(vec!["/private/.*".to_string()]),
            ..Default::default()
        };
        assert_eq!(
            serde_json::to_value(&params).unwrap(),
            json!({
                "budget": {"/docs": 50},
                "blacklist": ["/private/.*"],
            })
        );
    }
}
