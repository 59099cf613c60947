//! The client facade: one method per remote capability.
//!
//! Every method composes the transport with the parameter schema; the
//! streaming variants additionally route the open response through the
//! JSONL demultiplexer. Calls are independent and safe to issue
//! concurrently — the only shared state is the immutable configuration.


use crate::collections::Collection;
use crate::config::ClientConfig;
use crate::errors::Error;
use crate::params::{
    QueryRequest, RequestParams, SearchParams, SignedUrlParams, TransformInput, TransformParams,
};
use crate::response::{records_from, CoreResponse, SearchResults};
use crate::streaming;
use crate::transport::{ContentType, Transport};
use serde::Serialize;
use serde_json::{Map, Value};
use std::sync::Arc;

/// Async client for the Trawler API.
///
/// Cheap to clone; clones share the connection pool and configuration.
#[derive(Debug, Clone)]
pub struct Trawler {
    transport: Transport,
}

impl Trawler {
    /// Creates a client from an explicit configuration.
    pub fn new(config: ClientConfig) -> Result<Self, Error> {
        Ok(Self {
            transport: Transport::new(Arc::new(config))?,
        })
    }

    /// Creates a client from the `TRAWLER_API_KEY` environment variable.
    ///
    /// Fails synchronously when no key is present; no network call is
    /// attempted.
    pub fn from_env() -> Result<Self, Error> {
        Self::new(ClientConfig::from_env()?)
    }

    /// Creates a client from an explicit API key with default settings.
    pub fn with_api_key(api_key: impl Into<String>) -> Result<Self, Error> {
        Self::new(ClientConfig::resolve(Some(api_key.into()))?)
    }

    /// The configuration this client was built with.
    #[must_use]
    pub fn config(&self) -> &ClientConfig {
        self.transport.config()
    }

    /// Fetches a single page.
    ///
    /// Convenience over [`Trawler::crawl`]: injects `limit = 1` unless the
    /// caller set a limit explicitly.
    pub async fn scrape(
        &self,
        url: &str,
        params: Option<RequestParams>,
    ) -> Result<Vec<CoreResponse>, Error> {
        let mut params = params.unwrap_or_default();
        if params.limit.is_none() {
            params.limit = Some(1);
        }
        self.crawl(url, Some(params)).await
    }

    /// Crawls a website starting from `url`, buffering the full result.
    ///
    /// For unbounded crawls prefer [`Trawler::crawl_stream`], which never
    /// holds more than one record in memory.
    pub async fn crawl(
        &self,
        url: &str,
        params: Option<RequestParams>,
    ) -> Result<Vec<CoreResponse>, Error> {
        let body = merge_url(url, params);
        let value = self
            .transport
            .post_json("v1/crawl", &body, ContentType::Json)
            .await?;
        Ok(records_from(value))
    }

    /// Crawls a website with an explicit response serialization.
    ///
    /// CSV and XML bodies are returned as string payloads; JSON parses
    /// into a structured value.
    pub async fn crawl_as(
        &self,
        url: &str,
        params: Option<RequestParams>,
        content_type: ContentType,
    ) -> Result<Value, Error> {
        let body = merge_url(url, params);
        self.transport.post_json("v1/crawl", &body, content_type).await
    }

    /// Crawls a website, delivering each page record to `on_record` as the
    /// server emits it.
    ///
    /// Records arrive in stream order, at most once each; malformed
    /// records are dropped without aborting the crawl. The future resolves
    /// once the server closes the stream. Dropping the future aborts the
    /// crawl read and closes the connection; records already delivered
    /// stand, and no other in-flight call is affected.
    pub async fn crawl_stream<F>(
        &self,
        url: &str,
        params: Option<RequestParams>,
        on_record: F,
    ) -> Result<(), Error>
    where
        F: FnMut(Value) + Send,
    {
        let body = merge_url(url, params);
        let res = self
            .transport
            .post("v1/crawl", &body, ContentType::Jsonl)
            .await?;
        streaming::for_each_record(res, "stream from v1/crawl", on_record).await
    }

    /// Collects the links reachable from `url`, buffering the full result.
    pub async fn links(
        &self,
        url: &str,
        params: Option<RequestParams>,
    ) -> Result<Vec<CoreResponse>, Error> {
        let body = merge_url(url, params);
        let value = self
            .transport
            .post_json("v1/links", &body, ContentType::Json)
            .await?;
        Ok(records_from(value))
    }

    /// Collects links, delivering each record to `on_record` as the server
    /// emits it. Same contract as [`Trawler::crawl_stream`].
    pub async fn links_stream<F>(
        &self,
        url: &str,
        params: Option<RequestParams>,
        on_record: F,
    ) -> Result<(), Error>
    where
        F: FnMut(Value) + Send,
    {
        let body = merge_url(url, params);
        let res = self
            .transport
            .post("v1/links", &body, ContentType::Jsonl)
            .await?;
        streaming::for_each_record(res, "stream from v1/links", on_record).await
    }

    /// Takes a screenshot of `url`.
    pub async fn screenshot(
        &self,
        url: &str,
        params: Option<RequestParams>,
    ) -> Result<Value, Error> {
        let body = merge_url(url, params);
        self.transport
            .post_json("v1/screenshot", &body, ContentType::Json)
            .await
    }

    /// Runs a search query, optionally fetching content for each result.
    pub async fn search(
        &self,
        query: &str,
        params: Option<SearchParams>,
    ) -> Result<SearchResults, Error> {
        let mut params = params.unwrap_or_default();
        params.search = query.to_string();
        let body = serde_json::to_value(&params)
            .map_err(|e| Error::decode("post to v1/search", e))?;
        let value = self
            .transport
            .post_json("v1/search", &body, ContentType::Json)
            .await?;
        serde_json::from_value(value).map_err(|e| Error::decode("post to v1/search", e))
    }

    /// Transforms HTML or text documents into the requested format.
    ///
    /// The server accepts up to 10MB of data per call; the client sends
    /// the batch as-is and never truncates it.
    pub async fn transform(
        &self,
        data: Vec<TransformInput>,
        params: Option<TransformParams>,
    ) -> Result<Value, Error> {
        let mut body = to_object(params.as_ref());
        if let Ok(data) = serde_json::to_value(data) {
            body.insert("data".to_string(), data);
        }
        self.transport
            .post_json("v1/transform", &Value::Object(body), ContentType::Json)
            .await
    }

    /// Extracts contact information from `url`.
    pub async fn extract_contacts(
        &self,
        url: &str,
        params: Option<RequestParams>,
    ) -> Result<Value, Error> {
        let body = merge_url(url, params);
        self.transport
            .post_json("v1/pipeline/extract-contacts", &body, ContentType::Json)
            .await
    }

    /// Labels the data extracted from `url`.
    pub async fn label(&self, url: &str, params: Option<RequestParams>) -> Result<Value, Error> {
        let body = merge_url(url, params);
        self.transport
            .post_json("v1/pipeline/label", &body, ContentType::Json)
            .await
    }

    /// Retrieves the active crawl state for a website.
    pub async fn crawl_state(
        &self,
        url: &str,
        params: Option<RequestParams>,
    ) -> Result<Value, Error> {
        let body = merge_url(url, params);
        self.transport
            .post_json("v1/crawl/status", &body, ContentType::Json)
            .await
    }

    /// Fetches a page through the unblocker pipeline.
    pub async fn unblock(&self, url: &str, params: Option<RequestParams>) -> Result<Value, Error> {
        let body = merge_url(url, params);
        self.transport
            .post_json("v1/unblocker", &body, ContentType::Json)
            .await
    }

    /// Retrieves the account's remaining credits.
    pub async fn credits(&self) -> Result<Value, Error> {
        self.transport.get_json("v1/data/credits", None).await
    }

    /// Issues a time-limited, pre-authorized download link.
    pub async fn create_signed_url(&self, params: SignedUrlParams) -> Result<Value, Error> {
        let query = serde_json::to_value(&params)
            .map_err(|e| Error::decode("get from v1/data/sign-url", e))?;
        self.transport
            .get_json("v1/data/sign-url", Some(&query))
            .await
    }

    /// Downloads a stored resource as raw bytes.
    pub async fn download(&self, query: QueryRequest) -> Result<Vec<u8>, Error> {
        let query = serde_json::to_value(&query)
            .map_err(|e| Error::decode("get from data/download", e))?;
        let res = self.transport.get("data/download", Some(&query)).await?;
        let bytes = res
            .bytes()
            .await
            .map_err(|e| Error::transport("get from data/download", e))?;
        Ok(bytes.to_vec())
    }

    /// Looks a document up in the precomputed store without re-crawling.
    pub async fn query(&self, request: QueryRequest) -> Result<Value, Error> {
        let query = serde_json::to_value(&request)
            .map_err(|e| Error::decode("get from data/query", e))?;
        self.transport.get_json("data/query", Some(&query)).await
    }

    /// Inserts a record into a server-side collection.
    pub async fn data_post<T: Serialize>(
        &self,
        collection: Collection,
        data: &T,
    ) -> Result<Value, Error> {
        let path = format!("v1/data/{collection}");
        let body =
            serde_json::to_value(data).map_err(|e| Error::decode(format!("post to {path}"), e))?;
        self.transport
            .post_json(&path, &body, ContentType::Json)
            .await
    }

    /// Queries records from a server-side collection.
    pub async fn data_get(
        &self,
        collection: Collection,
        query: Option<Value>,
    ) -> Result<Value, Error> {
        self.transport
            .get_json(&format!("v1/data/{collection}"), query.as_ref())
            .await
    }

    /// Deletes records from a server-side collection.
    pub async fn data_delete(
        &self,
        collection: Collection,
        query: Option<Value>,
    ) -> Result<Value, Error> {
        self.transport
            .delete_json(&format!("v1/data/{collection}"), query.as_ref())
            .await
    }
}

/// Serializes `params` and sets the subject URL on the payload.
fn merge_url(url: &str, params: Option<RequestParams>) -> Value {
    let mut body = to_object(params.as_ref());
    if !url.is_empty() {
        body.insert("url".to_string(), Value::String(url.to_string()));
    }
    Value::Object(body)
}

/// Serializes any parameter struct into a JSON object map.
fn to_object<T: Serialize>(params: Option<&T>) -> Map<String, Value> {
    match params.and_then(|p| serde_json::to_value(p).ok()) {
        Some(Value::Object(map)) => map,
        _ => Map::new(),
    }
}
