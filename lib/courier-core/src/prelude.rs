//! Prelude module for convenient imports.
//!
//! This module re-exports the most commonly used types and functions
//! for easy glob importing:
//!
//! ```ignore
//! use courier_core::prelude::*;
//! ```

pub use crate::{
    Error, Headers, Method, Params, PreparedRequest, RequestConfig, Result, Transport, Value,
    build_url, normalize_headers, prepare, serialize_body,
};
