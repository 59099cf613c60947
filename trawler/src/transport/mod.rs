//! HTTP dispatch against the Trawler API.
//!
//! This module provides:
//! - Header preparation (bearer auth, client identifier, content negotiation)
//! - POST/GET/DELETE dispatch with bounded backoff retries
//! - Buffered response parsing keyed on the response content type

mod retry;

pub use retry::{BackoffStrategy, JitterStrategy, RetryConfig};

use crate::config::ClientConfig;
use crate::errors::Error;
use reqwest::header::CONTENT_TYPE;
use reqwest::{Client, Method, Response};
use serde_json::Value;
use std::sync::Arc;
use tracing::{debug, warn};

/// Request body serialization selector, sent as the Content-Type header.
///
/// [`ContentType::Jsonl`] asks the server to emit one JSON record per line
/// instead of a single aggregate document; the other variants select the
/// serialization of buffered responses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ContentType {
    /// One aggregate JSON document.
    #[default]
    Json,
    /// Newline-delimited JSON records (streaming).
    Jsonl,
    /// Comma-separated values.
    Csv,
    /// XML document.
    Xml,
}

impl ContentType {
    /// The header value for this content type.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Json => "application/json",
            Self::Jsonl => "application/jsonl",
            Self::Csv => "text/csv",
            Self::Xml => "application/xml",
        }
    }
}

/// Dispatches HTTP requests for the client facade.
///
/// Holds the shared connection pool and the immutable configuration; cheap
/// to clone, safe to use from any number of concurrent calls.
#[derive(Debug, Clone)]
pub struct Transport {
    http: Client,
    config: Arc<ClientConfig>,
}

impl Transport {
    /// Builds a transport over a fresh connection pool.
    pub fn new(config: Arc<ClientConfig>) -> Result<Self, Error> {
        let http = Client::builder()
            .user_agent(config.user_agent())
            .build()
            .map_err(|e| Error::transport("build the HTTP client", e))?;
        Ok(Self { http, config })
    }

    /// The configuration this transport was built with.
    #[must_use]
    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// Sends a POST with a JSON body, returning the open response.
    ///
    /// The response is *not* read here: buffered callers hand it to
    /// [`Transport::parse_body`], streaming callers to
    /// [`crate::streaming::for_each_record`].
    pub async fn post(
        &self,
        path: &str,
        body: &Value,
        content_type: ContentType,
    ) -> Result<Response, Error> {
        self.execute(Method::POST, path, Some(body), None, content_type)
            .await
    }

    /// Sends a GET with optional query parameters.
    pub async fn get(&self, path: &str, query: Option<&Value>) -> Result<Response, Error> {
        self.execute(Method::GET, path, None, query, ContentType::Json)
            .await
    }

    /// Sends a DELETE with optional query parameters.
    pub async fn delete(&self, path: &str, query: Option<&Value>) -> Result<Response, Error> {
        self.execute(Method::DELETE, path, None, query, ContentType::Json)
            .await
    }

    /// POST, then buffer and decode the response body.
    pub async fn post_json(
        &self,
        path: &str,
        body: &Value,
        content_type: ContentType,
    ) -> Result<Value, Error> {
        let res = self.post(path, body, content_type).await?;
        Self::parse_body(res, &action_label(&Method::POST, path)).await
    }

    /// GET, then buffer and decode the response body.
    pub async fn get_json(&self, path: &str, query: Option<&Value>) -> Result<Value, Error> {
        let res = self.get(path, query).await?;
        Self::parse_body(res, &action_label(&Method::GET, path)).await
    }

    /// DELETE, then buffer and decode the response body.
    pub async fn delete_json(&self, path: &str, query: Option<&Value>) -> Result<Value, Error> {
        let res = self.delete(path, query).await?;
        Self::parse_body(res, &action_label(&Method::DELETE, path)).await
    }

    /// Performs one logical request with bounded backoff retries.
    ///
    /// Network-level errors and retryable statuses (5xx and the configured
    /// extras, 429 by default) are retried until the attempt budget runs
    /// out; other non-2xx statuses fail on the first occurrence.
    async fn execute(
        &self,
        method: Method,
        path: &str,
        body: Option<&Value>,
        query: Option<&Value>,
        content_type: ContentType,
    ) -> Result<Response, Error> {
        let action = action_label(&method, path);
        let retry = self.config.retry();
        let mut attempt = 0usize;

        loop {
            let result = self
                .build_request(method.clone(), path, body, query, content_type)
                .send()
                .await;

            let give_up = retry.is_exhausted(attempt);
            match result {
                Ok(res) if res.status().is_success() => return Ok(res),
                Ok(res) => {
                    let status = res.status().as_u16();
                    if give_up || !retry.should_retry_status(status) {
                        warn!(%action, status, "request failed");
                        return Err(Error::status(action, status));
                    }
                    let delay = retry.delay_for_attempt(attempt);
                    debug!(
                        %action,
                        status,
                        attempt,
                        delay_ms = delay.as_millis() as u64,
                        "retrying after retryable status"
                    );
                    tokio::time::sleep(delay).await;
                }
                Err(err) => {
                    if give_up || !is_transient(&err) {
                        warn!(%action, error = %err, "request failed");
                        return Err(Error::transport(action, err));
                    }
                    let delay = retry.delay_for_attempt(attempt);
                    debug!(
                        %action,
                        attempt,
                        delay_ms = delay.as_millis() as u64,
                        error = %err,
                        "retrying after transport error"
                    );
                    tokio::time::sleep(delay).await;
                }
            }
            attempt += 1;
        }
    }

    fn build_request(
        &self,
        method: Method,
        path: &str,
        body: Option<&Value>,
        query: Option<&Value>,
        content_type: ContentType,
    ) -> reqwest::RequestBuilder {
        let url = format!("{}/{}", self.config.base_url(), path);
        let mut req = self
            .http
            .request(method, url)
            .header(CONTENT_TYPE, content_type.as_str())
            .bearer_auth(self.config.api_key());

        if let Some(body) = body {
            req = req.json(body);
        }
        if let Some(query) = query {
            req = req.query(query);
        }
        // Streaming responses stay open for the lifetime of the crawl, so
        // the configured ceiling only applies to buffered calls.
        if content_type != ContentType::Jsonl {
            if let Some(timeout) = self.config.request_timeout() {
                req = req.timeout(timeout);
            }
        }
        req
    }

    /// Reads a buffered response body and decodes it per its content type.
    ///
    /// JSON parses into a [`Value`]; JSONL aggregates one parsed value per
    /// line into an array (malformed lines dropped); CSV, XML, and anything
    /// else pass through as a string payload.
    pub async fn parse_body(res: Response, action: &str) -> Result<Value, Error> {
        let content_type = res
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .unwrap_or_default()
            .to_ascii_lowercase();

        let text = res
            .text()
            .await
            .map_err(|e| Error::transport(action.to_string(), e))?;

        if content_type.contains("jsonl") || content_type.contains("ndjson") {
            let records = text
                .lines()
                .filter_map(|line| serde_json::from_str::<Value>(line).ok())
                .collect();
            Ok(Value::Array(records))
        } else if content_type.contains("json") {
            serde_json::from_str(&text).map_err(|e| Error::decode(action.to_string(), e))
        } else {
            Ok(Value::String(text))
        }
    }
}

fn action_label(method: &Method, path: &str) -> String {
    match *method {
        Method::GET => format!("get from {path}"),
        Method::DELETE => format!("delete from {path}"),
        _ => format!("post to {path}"),
    }
}

fn is_transient(err: &reqwest::Error) -> bool {
    err.is_timeout() || err.is_connect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use wiremock::matchers::{header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn test_transport(base_url: &str) -> Transport {
        let config = ClientConfig::new("sk-test")
            .with_base_url(base_url)
            .with_retry(
                RetryConfig::new()
                    .with_base_delay_ms(1)
                    .with_jitter(JitterStrategy::None),
            );
        Transport::new(Arc::new(config)).expect("transport builds")
    }

    #[tokio::test]
    async fn test_server_errors_retried_up_to_five_attempts() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/v1/crawl"))
            .respond_with(ResponseTemplate::new(500))
            .expect(5)
            .mount(&server)
            .await;

        let transport = test_transport(&server.uri());
        let err = transport
            .post("v1/crawl", &json!({"url": "https://example.com"}), ContentType::Json)
            .await
            .unwrap_err();

        assert!(matches!(err, Error::Status { status: 500, .. }));
    }

    #[tokio::test]
    async fn test_client_errors_fail_on_first_attempt() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/v1/crawl"))
            .respond_with(ResponseTemplate::new(404))
            .expect(1)
            .mount(&server)
            .await;

        let transport = test_transport(&server.uri());
        let err = transport
            .post("v1/crawl", &json!({"url": "https://example.com"}), ContentType::Json)
            .await
            .unwrap_err();

        assert!(err.is_not_found());
    }

    #[tokio::test]
    async fn test_bearer_and_content_type_headers_sent() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/v1/crawl"))
            .and(header("Authorization", "Bearer sk-test"))
            .and(header("Content-Type", "application/jsonl"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
            .expect(1)
            .mount(&server)
            .await;

        let transport = test_transport(&server.uri());
        let res = transport
            .post("v1/crawl", &json!({"url": "https://example.com"}), ContentType::Jsonl)
            .await;
        assert!(res.is_ok());
    }

    #[test]
    fn test_parse_body_dispatches_on_content_type() {
        tokio_test::block_on(async {
            let server = MockServer::start().await;
            Mock::given(method("GET"))
                .and(path("/jsonl"))
                .respond_with(
                    ResponseTemplate::new(200)
                        .set_body_raw("{\"a\":1}\nnot-json\n{\"b\":2}\n", "application/jsonl"),
                )
                .mount(&server)
                .await;
            Mock::given(method("GET"))
                .and(path("/csv"))
                .respond_with(
                    ResponseTemplate::new(200)
                        .set_body_raw("url,status\nhttps://example.com,200\n", "text/csv"),
                )
                .mount(&server)
                .await;

            let transport = test_transport(&server.uri());

            let res = transport.get("jsonl", None).await.unwrap();
            let parsed = Transport::parse_body(res, "get from jsonl").await.unwrap();
            assert_eq!(parsed, json!([{"a": 1}, {"b": 2}]));

            let res = transport.get("csv", None).await.unwrap();
            let parsed = Transport::parse_body(res, "get from csv").await.unwrap();
            assert_eq!(
                parsed,
                Value::String("url,status\nhttps://example.com,200\n".to_string())
            );
        });
    }

    #[tokio::test]
    async fn test_query_parameters_serialized() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/data/query"))
            .and(wiremock::matchers::query_param("domain", "example.com"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"content": null})))
            .expect(1)
            .mount(&server)
            .await;

        let transport = test_transport(&server.uri());
        let res = transport
            .get("data/query", Some(&json!({"domain": "example.com"})))
            .await;
        assert!(res.is_ok());
    }
}
