//! Minimal HTTP request client.
//!
//! Describe a request with [`RequestConfig`]; courier appends the query
//! parameters to the URL, canonicalizes `Content-Type` (inferring JSON for
//! structured data), serializes the body and sends it.
//!
//! # Example
//!
//! ```ignore
//! use courier::prelude::*;
//!
//! let client = Client::new();
//! client
//!     .request(
//!         RequestConfig::new("https://api.example.com/search")
//!             .param("q", "a b")
//!             .param("tags", vec!["x", "y"]),
//!     )
//!     .await?;
//! // GET https://api.example.com/search?q=a+b&tags%5B%5D=x&tags%5B%5D=y
//! ```
//!
//! The normalization steps live in [`courier_core`] and can be used on their
//! own through [`prepare`].

mod client;
mod config;
mod connector;
pub mod middleware;
pub mod prelude;
mod transport;

pub use client::{Client, request};
pub use config::{TransportConfig, TransportConfigBuilder};
pub use transport::{BoxedService, HyperTransport, HyperTransportBuilder, ServiceFuture};

// Re-export core types
pub use courier_core::{
    CONTENT_TYPE, Error, Headers, JSON_CONTENT_TYPE, Method, Params, PreparedRequest,
    RequestConfig, Result, Transport, Value, build_url, normalize_header_name, normalize_headers,
    prepare, serialize_body,
};
