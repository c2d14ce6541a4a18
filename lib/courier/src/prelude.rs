//! Prelude module for convenient imports.
//!
//! ```ignore
//! use courier::prelude::*;
//! ```

pub use crate::{
    Client, Error, Headers, HyperTransport, Method, Params, PreparedRequest, RequestConfig,
    Result, Transport, Value, prepare,
};
