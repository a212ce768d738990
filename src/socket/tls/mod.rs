//! TLS handshake driver.
//!
//! Builds one BoringSSL connector from a [`TlsConfig`] and a [`TrustStore`],
//! then upgrades TCP streams to TLS for a given server name. SNI is set
//! explicitly before the handshake starts, so a name BoringSSL refuses is
//! reported without any bytes touching the wire.

use crate::base::neterror::NetError;
use boring::ssl::{Ssl, SslConnector, SslMethod};
use std::fmt;
use std::io::{Read, Write};
use tokio::io::{AsyncRead, AsyncWrite};

pub mod options;
pub mod trust;

pub use self::options::TlsConfig;
pub use self::trust::TrustStore;

/// Longest name allowed in the SNI extension (RFC 6066 `HostName`).
const MAX_SNI_LEN: usize = 255;
/// Longest single DNS label.
const MAX_LABEL_LEN: usize = 63;

/// Shared TLS client context.
///
/// Cheap to clone; both execution drivers use the same instance.
#[derive(Clone)]
pub struct TlsConnector {
    connector: SslConnector,
}

impl TlsConnector {
    pub fn new(config: &TlsConfig, trust: &TrustStore) -> Result<Self, NetError> {
        let mut builder = SslConnector::builder(SslMethod::tls())
            .map_err(|e| NetError::TlsConfig(format!("creating connector: {e}")))?;
        config.apply_to_builder(&mut builder)?;
        trust.apply_to_builder(&mut builder)?;
        Ok(Self {
            connector: builder.build(),
        })
    }

    /// Creates the per-connection SSL object with SNI set to `server_name`.
    ///
    /// IP literals get no SNI extension, per RFC 6066, but are still used
    /// for certificate verification.
    pub fn ssl_for(&self, server_name: &str) -> Result<Ssl, NetError> {
        check_server_name(server_name)?;

        let config = self
            .connector
            .configure()
            .map_err(|e| NetError::TlsConfig(format!("configuring connection: {e}")))?;
        config
            .into_ssl(server_name)
            .map_err(|e| NetError::SniRejected {
                server_name: server_name.to_string(),
                reason: e.to_string(),
            })
    }

    /// Performs the client handshake on the calling thread.
    pub fn connect_blocking<S>(
        &self,
        server_name: &str,
        stream: S,
    ) -> Result<boring::ssl::SslStream<S>, NetError>
    where
        S: Read + Write + fmt::Debug,
    {
        let ssl = self.ssl_for(server_name)?;
        tracing::debug!(server_name, "starting TLS handshake");
        ssl.connect(stream).map_err(|e| {
            tracing::debug!(server_name, error = %e, "TLS handshake failed");
            NetError::SslHandshakeFailed {
                server_name: server_name.to_string(),
                reason: e.to_string(),
            }
        })
    }

    /// Performs the client handshake as an async task.
    pub async fn connect<S>(
        &self,
        server_name: &str,
        stream: S,
    ) -> Result<tokio_boring::SslStream<S>, NetError>
    where
        S: AsyncRead + AsyncWrite + Unpin + fmt::Debug,
    {
        let ssl = self.ssl_for(server_name)?;
        tracing::debug!(server_name, "starting TLS handshake");
        tokio_boring::SslStreamBuilder::new(ssl, stream)
            .connect()
            .await
            .map_err(|e| {
                tracing::debug!(server_name, error = %e, "TLS handshake failed");
                NetError::SslHandshakeFailed {
                    server_name: server_name.to_string(),
                    reason: e.to_string(),
                }
            })
    }
}

impl fmt::Debug for TlsConnector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TlsConnector").finish_non_exhaustive()
    }
}

/// Rejects names BoringSSL would refuse (or panic on) as an SNI value.
pub fn check_server_name(server_name: &str) -> Result<(), NetError> {
    let reject = |reason: &str| {
        Err(NetError::SniRejected {
            server_name: server_name.to_string(),
            reason: reason.to_string(),
        })
    };

    if server_name.is_empty() {
        return reject("empty server name");
    }
    if server_name.contains('\0') {
        return reject("embedded NUL byte");
    }
    if !should_set_sni(server_name) {
        return Ok(());
    }
    if server_name.len() > MAX_SNI_LEN {
        return reject("server name longer than 255 bytes");
    }
    if server_name
        .trim_end_matches('.')
        .split('.')
        .any(|label| label.is_empty() || label.len() > MAX_LABEL_LEN)
    {
        return reject("malformed DNS label");
    }
    Ok(())
}

/// Check if SNI should be set for this host.
/// Per RFC 6066, SNI MUST NOT be set for raw IP addresses.
pub fn should_set_sni(host: &str) -> bool {
    host.parse::<std::net::IpAddr>().is_err()
}
