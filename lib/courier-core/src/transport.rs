//! Transport trait.
//!
//! A [`Transport`] puts a [`PreparedRequest`] on the wire. The `courier` crate
//! ships a hyper based implementation; implement the trait directly to plug
//! another HTTP stack or to capture requests in tests.

use std::future::Future;

use crate::{PreparedRequest, Result};

/// Sends normalized requests.
///
/// Each request is handed to the transport exactly once. No response is
/// returned to the caller; an error means the request could not be sent.
///
/// # Example
///
/// ```
/// use std::sync::{Arc, Mutex};
///
/// use courier_core::{PreparedRequest, Result, Transport};
///
/// #[derive(Clone, Default)]
/// struct Recorder(Arc<Mutex<Vec<PreparedRequest>>>);
///
/// impl Transport for Recorder {
///     async fn send(&self, request: PreparedRequest) -> Result<()> {
///         self.0.lock().unwrap().push(request);
///         Ok(())
///     }
/// }
/// ```
pub trait Transport: Send + Sync {
    /// Send a prepared request.
    ///
    /// # Errors
    ///
    /// Returns an error if the request cannot be sent:
    /// - Invalid URL or header
    /// - Network errors
    /// - TLS errors
    fn send(&self, request: PreparedRequest) -> impl Future<Output = Result<()>> + Send;
}

impl<T: Transport> Transport for &T {
    fn send(&self, request: PreparedRequest) -> impl Future<Output = Result<()>> + Send {
        (**self).send(request)
    }
}

impl<T: Transport> Transport for std::sync::Arc<T> {
    fn send(&self, request: PreparedRequest) -> impl Future<Output = Result<()>> + Send {
        (**self).send(request)
    }
}
