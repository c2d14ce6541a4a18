//! Transport configuration.

use std::time::Duration;

/// Settings for [`crate::HyperTransport`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransportConfig {
    /// Idle connections kept per host.
    pub pool_idle_per_host: usize,
    /// How long an idle connection stays in the pool.
    pub pool_idle_timeout: Duration,
    /// Refuse plain `http://` URLs.
    pub https_only: bool,
    /// Offer HTTP/2 during the TLS handshake.
    pub http2: bool,
}

impl Default for TransportConfig {
    fn default() -> Self {
        Self {
            pool_idle_per_host: 32,
            pool_idle_timeout: Duration::from_secs(90),
            https_only: false,
            http2: true,
        }
    }
}

impl TransportConfig {
    /// Starts from the defaults.
    #[must_use]
    pub fn builder() -> TransportConfigBuilder {
        TransportConfigBuilder::default()
    }
}

/// Builder for [`TransportConfig`].
///
/// Unset fields keep their default.
#[derive(Debug, Clone, Default)]
pub struct TransportConfigBuilder {
    config: TransportConfig,
}

impl TransportConfigBuilder {
    /// Idle connections kept per host.
    #[must_use]
    pub const fn pool_idle_per_host(mut self, count: usize) -> Self {
        self.config.pool_idle_per_host = count;
        self
    }

    /// Idle connection lifetime.
    #[must_use]
    pub const fn pool_idle_timeout(mut self, timeout: Duration) -> Self {
        self.config.pool_idle_timeout = timeout;
        self
    }

    /// Refuse plain `http://` URLs.
    #[must_use]
    pub const fn https_only(mut self, https_only: bool) -> Self {
        self.config.https_only = https_only;
        self
    }

    /// Offer HTTP/2.
    #[must_use]
    pub const fn http2(mut self, http2: bool) -> Self {
        self.config.http2 = http2;
        self
    }

    /// Finish the configuration.
    #[must_use]
    pub fn build(self) -> TransportConfig {
        self.config
    }
}
