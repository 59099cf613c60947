//! Client configuration.
//!
//! Configuration is an explicit immutable value handed to the client
//! constructor. Nothing in the crate mutates process-wide state: concurrent
//! clients with different keys or base URLs coexist without coordination.

use crate::errors::Error;
use crate::transport::RetryConfig;
use std::time::Duration;

/// Environment variable consulted for the API key when none is passed.
pub const API_KEY_ENV: &str = "TRAWLER_API_KEY";

/// Environment variable overriding the API base URL.
pub const API_URL_ENV: &str = "TRAWLER_API_URL";

/// Default API origin.
pub const DEFAULT_API_URL: &str = "https://api.trawler.dev";

/// Immutable configuration for a [`crate::Trawler`] client.
///
/// Constructed once, read-only afterwards.
#[derive(Debug, Clone)]
pub struct ClientConfig {
    api_key: String,
    base_url: String,
    user_agent: String,
    retry: RetryConfig,
    request_timeout: Option<Duration>,
}

impl ClientConfig {
    /// Creates a configuration with an explicit API key and defaults for
    /// everything else.
    #[must_use]
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            base_url: std::env::var(API_URL_ENV).unwrap_or_else(|_| DEFAULT_API_URL.to_string()),
            user_agent: default_user_agent(),
            retry: RetryConfig::default(),
            request_timeout: None,
        }
    }

    /// Resolves a configuration from an optional explicit key, falling back
    /// to the `TRAWLER_API_KEY` environment variable.
    ///
    /// Fails synchronously when neither source yields a key; no network
    /// call is ever attempted with missing credentials.
    pub fn resolve(api_key: Option<String>) -> Result<Self, Error> {
        let api_key = api_key.or_else(|| std::env::var(API_KEY_ENV).ok());
        match api_key {
            Some(key) if !key.is_empty() => Ok(Self::new(key)),
            _ => Err(Error::Configuration {
                env_var: API_KEY_ENV,
            }),
        }
    }

    /// Resolves a configuration from the environment alone.
    pub fn from_env() -> Result<Self, Error> {
        Self::resolve(None)
    }

    /// Sets the API base URL (scheme + host, no trailing slash required).
    #[must_use]
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// Sets the User-Agent header value.
    #[must_use]
    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = user_agent.into();
        self
    }

    /// Sets the retry policy for transient failures.
    #[must_use]
    pub fn with_retry(mut self, retry: RetryConfig) -> Self {
        self.retry = retry;
        self
    }

    /// Sets a client-side ceiling on buffered request duration.
    ///
    /// Streaming calls are exempt: a crawl stream stays open for as long as
    /// the server keeps emitting records.
    #[must_use]
    pub fn with_request_timeout(mut self, timeout: Duration) -> Self {
        self.request_timeout = Some(timeout);
        self
    }

    /// The API key used for bearer authorization.
    #[must_use]
    pub fn api_key(&self) -> &str {
        &self.api_key
    }

    /// The API origin, without a trailing slash.
    #[must_use]
    pub fn base_url(&self) -> &str {
        self.base_url.trim_end_matches('/')
    }

    /// The User-Agent header value.
    #[must_use]
    pub fn user_agent(&self) -> &str {
        &self.user_agent
    }

    /// The retry policy.
    #[must_use]
    pub fn retry(&self) -> &RetryConfig {
        &self.retry
    }

    /// The buffered-request timeout, if any.
    #[must_use]
    pub fn request_timeout(&self) -> Option<Duration> {
        self.request_timeout
    }
}

fn default_user_agent() -> String {
    format!("Trawler-Client/{}", env!("CARGO_PKG_VERSION"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_explicit_key_with_defaults() {
        let config = ClientConfig::new("sk-test");
        assert_eq!(config.api_key(), "sk-test");
        assert!(config.user_agent().starts_with("Trawler-Client/"));
        assert!(config.request_timeout().is_none());
    }

    #[test]
    fn test_base_url_trailing_slash_trimmed() {
        let config = ClientConfig::new("sk-test").with_base_url("http://localhost:9999/");
        assert_eq!(config.base_url(), "http://localhost:9999");
    }

    #[test]
    fn test_builder_overrides() {
        let config = ClientConfig::new("sk-test")
            .with_user_agent("custom/1.0")
            .with_request_timeout(Duration::from_secs(90));
        assert_eq!(config.user_agent(), "custom/1.0");
        assert_eq!(config.request_timeout(), Some(Duration::from_secs(90)));
    }

    // Environment access is process-global, so every env-dependent
    // assertion lives in this single test.
    #[test]
    fn test_key_resolution_order() {
        std::env::remove_var(API_KEY_ENV);
        assert!(matches!(
            ClientConfig::resolve(None),
            Err(Error::Configuration { .. })
        ));
        assert!(matches!(
            ClientConfig::resolve(Some(String::new())),
            Err(Error::Configuration { .. })
        ));

        std::env::set_var(API_KEY_ENV, "sk-from-env");
        let from_env = ClientConfig::resolve(None).map(|c| c.api_key().to_string());
        let explicit_wins =
            ClientConfig::resolve(Some("sk-explicit".into())).map(|c| c.api_key().to_string());
        std::env::remove_var(API_KEY_ENV);

        assert_eq!(from_env.ok().as_deref(), Some("sk-from-env"));
        assert_eq!(explicit_wins.ok().as_deref(), Some("sk-explicit"));
    }
}
