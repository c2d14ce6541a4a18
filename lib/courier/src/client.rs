//! Request entry point.

use tracing::debug;

use crate::{HyperTransport, RequestConfig, Result, Transport, prepare};

/// Prepares requests and hands them to a [`Transport`].
///
/// # Example
///
/// ```ignore
/// use courier::{Client, Method, RequestConfig};
/// use serde_json::json;
///
/// let client = Client::new();
/// client
///     .request(
///         RequestConfig::new("https://api.example.com/users")
///             .method(Method::Post)
///             .data(json!({"name": "Alice"})),
///     )
///     .await?;
/// ```
#[derive(Debug, Clone, Default)]
pub struct Client<T = HyperTransport> {
    transport: T,
}

impl Client {
    /// Create a client backed by a default [`HyperTransport`].
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

impl<T> Client<T> {
    /// Create a client sending through `transport`.
    #[must_use]
    pub const fn with_transport(transport: T) -> Self {
        Self { transport }
    }

    /// Get a reference to the transport.
    #[must_use]
    pub const fn transport(&self) -> &T {
        &self.transport
    }

    /// Consume the client and return the transport.
    #[must_use]
    pub fn into_transport(self) -> T {
        self.transport
    }
}

impl<T: Transport> Client<T> {
    /// Normalize `config` and send it.
    ///
    /// The transport is called once, after normalization succeeded.
    ///
    /// # Errors
    ///
    /// Returns an error if normalization fails (nothing is sent) or if the
    /// transport cannot send the request.
    pub async fn request(&self, config: RequestConfig) -> Result<()> {
        let request = prepare(config)?;
        debug!(method = %request.method(), url = request.url(), "dispatching request");
        self.transport.send(request).await
    }
}

/// Send a request with a fresh default [`Client`].
///
/// # Errors
///
/// See [`Client::request`].
pub async fn request(config: RequestConfig) -> Result<()> {
    Client::new().request(config).await
}
