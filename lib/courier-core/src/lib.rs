//! Request normalization pipeline for the courier HTTP client.
//!
//! This crate turns a declarative [`RequestConfig`] into a wire-ready
//! [`PreparedRequest`]:
//! - [`build_url`] - serializes [`Params`] into the URL query string
//! - [`normalize_headers`] - canonicalizes `Content-Type` and infers JSON
//! - [`serialize_body`] - serializes structured data to JSON text
//! - [`prepare`] - runs the three steps in order
//!
//! Supporting types:
//! - [`Value`] - dynamic parameter and body values
//! - [`Method`] - HTTP method enum
//! - [`Error`] and [`Result`] - Error handling
//! - [`Transport`] - seam for the component that sends requests

mod body;
mod error;
mod headers;
mod method;
mod pipeline;
pub mod prelude;
mod query;
mod request;
mod transport;
mod value;

pub use body::{body_bytes, serialize_body};
pub use error::{Error, Result};
pub use headers::{
    CONTENT_TYPE, Headers, JSON_CONTENT_TYPE, normalize_header_name, normalize_headers,
};
pub use method::Method;
pub use pipeline::prepare;
pub use query::{build_url, encode_component, serialize_params};
pub use request::{PreparedRequest, RequestConfig};
pub use transport::Transport;
pub use value::{Params, Value, iso_instant};
