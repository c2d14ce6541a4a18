//! Request descriptors.
//!
//! A [`RequestConfig`] describes one outgoing request the way callers write it.
//! [`crate::prepare`] turns it into a [`PreparedRequest`] ready for a
//! [`crate::Transport`].
//!
//! # Example
//!
//! ```
//! use courier_core::{Method, RequestConfig};
//! use serde_json::json;
//!
//! let config = RequestConfig::new("https://api.example.com/users")
//!     .method(Method::Post)
//!     .param("notify", true)
//!     .header("Accept", "application/json")
//!     .data(json!({"name": "Alice"}));
//!
//! assert_eq!(config.method, Method::Post);
//! ```

use bytes::Bytes;

use crate::{Headers, Method, Params, Result, Value};

/// Declarative description of an outgoing request.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct RequestConfig {
    /// Target URL, possibly with a query and a fragment.
    pub url: String,
    /// HTTP method, `GET` unless set.
    pub method: Method,
    /// Query parameters appended to the URL.
    pub params: Option<Params>,
    /// Request headers.
    pub headers: Headers,
    /// Request data.
    pub data: Value,
}

impl RequestConfig {
    /// Creates a `GET` request for `url`.
    #[must_use]
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            ..Self::default()
        }
    }

    /// Sets the method.
    #[must_use]
    pub fn method(mut self, method: Method) -> Self {
        self.method = method;
        self
    }

    /// Replaces all query parameters.
    #[must_use]
    pub fn params(mut self, params: Params) -> Self {
        self.params = Some(params);
        self
    }

    /// Adds a query parameter.
    #[must_use]
    pub fn param(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        self.params.get_or_insert_with(Params::new).insert(name, value);
        self
    }

    /// Sets a header.
    #[must_use]
    pub fn header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.insert(name.into(), value.into());
        self
    }

    /// Sets multiple headers.
    #[must_use]
    pub fn headers(mut self, headers: impl IntoIterator<Item = (String, String)>) -> Self {
        self.headers.extend(headers);
        self
    }

    /// Sets the request data.
    #[must_use]
    pub fn data(mut self, data: impl Into<Value>) -> Self {
        self.data = data.into();
        self
    }
}

/// A normalized request, ready for the wire.
///
/// The URL carries its serialized parameters, `Content-Type` has a single
/// spelling and the data is a scalar, a string or null.
#[derive(Debug, Clone, PartialEq)]
pub struct PreparedRequest {
    method: Method,
    url: String,
    headers: Headers,
    data: Value,
}

impl PreparedRequest {
    pub(crate) const fn new(method: Method, url: String, headers: Headers, data: Value) -> Self {
        Self {
            method,
            url,
            headers,
            data,
        }
    }

    /// HTTP method.
    #[must_use]
    pub const fn method(&self) -> &Method {
        &self.method
    }

    /// Final URL.
    #[must_use]
    pub fn url(&self) -> &str {
        &self.url
    }

    /// Request headers.
    #[must_use]
    pub const fn headers(&self) -> &Headers {
        &self.headers
    }

    /// Single header value by exact name.
    #[must_use]
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers.get(name).map(String::as_str)
    }

    /// Serialized request data.
    #[must_use]
    pub const fn data(&self) -> &Value {
        &self.data
    }

    /// Body bytes, `None` when there is no data.
    ///
    /// # Errors
    ///
    /// Returns an error if the data cannot be rendered as text.
    pub fn body_bytes(&self) -> Result<Option<Bytes>> {
        crate::body::body_bytes(&self.data)
    }

    /// Consume into (method, url, headers, data).
    #[must_use]
    pub fn into_parts(self) -> (Method, String, Headers, Value) {
        (self.method, self.url, self.headers, self.data)
    }
}
