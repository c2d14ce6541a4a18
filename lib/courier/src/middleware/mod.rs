//! Tower middleware layers for the hyper transport.
//!
//! Layers wrap the innermost hyper service and see every
//! [`PreparedRequest`](crate::PreparedRequest) on its way out, and the
//! response status on its way back.
//!
//! - [`LoggingLayer`] - Logs requests using `tracing`
//!
//! # Example
//!
//! ```ignore
//! use courier::HyperTransport;
//! use courier::middleware::LoggingLayer;
//!
//! let transport = HyperTransport::builder()
//!     .layer(LoggingLayer::debug())
//!     .build();
//! ```

mod logging;

pub use logging::{LogLevel, Logging, LoggingLayer};

// Re-export tower types for convenience
pub use tower::{Layer, ServiceBuilder};
