//! # Trawler
//!
//! Async Rust client for the Trawler web crawling and scraping API.
//!
//! The crate wraps the HTTP surface of the hosted service:
//!
//! - **Request dispatch**: POST/GET/DELETE against the versioned API base,
//!   with bearer auth and bounded exponential-backoff retries
//! - **Streaming**: newline-delimited JSON crawl output demultiplexed into
//!   per-record callbacks, so unbounded crawls never buffer whole result
//!   sets in memory
//! - **Typed parameters**: the full request-configuration surface as
//!   optional-field structs and tagged enums
//! - **One method per capability**: scrape, crawl, links, screenshot,
//!   search, transform, contact extraction, labeling, and data collections
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use trawler::{RequestParams, Trawler};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), trawler::Error> {
//!     let client = Trawler::from_env()?;
//!
//!     let params = RequestParams {
//!         limit: Some(10),
//!         ..Default::default()
//!     };
//!     let pages = client.crawl("https://example.com", Some(params)).await?;
//!     for page in pages {
//!         println!("{:?} -> {:?}", page.url, page.status);
//!     }
//!     Ok(())
//! }
//! ```
//!
//! ## Streaming
//!
//! ```rust,no_run
//! # use trawler::Trawler;
//! # #[tokio::main]
//! # async fn main() -> Result<(), trawler::Error> {
//! let client = Trawler::from_env()?;
//! client
//!     .crawl_stream("https://example.com", None, |record| {
//!         println!("{record}");
//!     })
//!     .await?;
//! # Ok(())
//! # }
//! ```

#![forbid(unsafe_code)]
#![warn(
    clippy::all,
    clippy::pedantic,
    missing_docs,
    rust_2018_idioms
)]
#![allow(
    clippy::module_name_repetitions,
    clippy::must_use_candidate,
    clippy::missing_errors_doc,
    clippy::missing_panics_doc
)]

pub mod client;
pub mod collections;
pub mod config;
pub mod errors;
pub mod params;
pub mod response;
pub mod streaming;
pub mod transport;

pub use client::Trawler;
pub use config::ClientConfig;
pub use errors::Error;
pub use params::RequestParams;

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::client::Trawler;
    pub use crate::collections::Collection;
    pub use crate::config::ClientConfig;
    pub use crate::errors::Error;
    pub use crate::params::{
        ChunkingAlg, PageAction, ProxyPool, QueryRequest, RequestKind, RequestParams,
        ReturnFormat, ReturnFormats, SearchParams, SignedUrlParams, TransformInput,
        TransformParams, WaitFor, WebhookSettings,
    };
    pub use crate::response::{Content, CoreResponse, SearchResult, SearchResults};
    pub use crate::streaming::JsonLineDecoder;
    pub use crate::transport::{ContentType, RetryConfig, Transport};
}
