//! Request-parameter schema for the Trawler API.
//!
//! This module provides:
//! - The base per-crawl configuration surface ([`RequestParams`])
//! - Browser automation steps and page-readiness conditions
//! - Search, transform, and data-plane request shapes
//!
//! Every option is optional and forwarded to the server unchanged; field
//! names and accepted values are part of the wire contract. The client
//! performs no validation beyond what the types enforce — contradictory
//! combinations are rejected server-side.

mod automation;
mod base;
mod query;
mod search;
mod transform;

pub use automation::{
    AutomationMap, Delay, ExecutionScripts, IdleNetwork, PageAction, Selector, Timeout, WaitFor,
};
pub use base::{
    ChunkingAlg, ChunkingKind, CssExtractionMap, CssSelectorGroup, EventTracker, ProxyPool,
    RedirectPolicy, RequestKind, RequestParams, ReturnFormat, ReturnFormats, Viewport,
    WebhookSettings,
};
pub use query::{QueryRequest, SignedUrlParams};
pub use search::SearchParams;
pub use transform::{TransformInput, TransformParams};
