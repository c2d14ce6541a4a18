//! rustls connector for the hyper transport.

use hyper_rustls::{HttpsConnector, HttpsConnectorBuilder};
use hyper_util::client::legacy::connect::HttpConnector;

use crate::TransportConfig;

/// Builds the connector described by `config`.
///
/// Certificates are checked against the bundled Mozilla roots. Plain `http://`
/// URLs are refused when [`TransportConfig::https_only`] is set.
#[must_use]
pub fn connector(config: &TransportConfig) -> HttpsConnector<HttpConnector> {
    let roots: rustls::RootCertStore = webpki_roots::TLS_SERVER_ROOTS.iter().cloned().collect();
    let tls = rustls::ClientConfig::builder()
        .with_root_certificates(roots)
        .with_no_client_auth();

    let builder = HttpsConnectorBuilder::new().with_tls_config(tls);
    let builder = if config.https_only {
        builder.https_only()
    } else {
        builder.https_or_http()
    };

    let builder = builder.enable_http1();
    if config.http2 {
        builder.enable_http2().build()
    } else {
        builder.build()
    }
}
