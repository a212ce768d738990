use crate::base::neterror::NetError;
use boring::ssl::{SslConnectorBuilder, SslVerifyMode, SslVersion};

/// ECDHE suites for TLS 1.2; TLS 1.3 suites are fixed by BoringSSL.
const DEFAULT_CIPHERS: &str = "ECDHE-ECDSA-AES128-GCM-SHA256:ECDHE-RSA-AES128-GCM-SHA256:\
    ECDHE-ECDSA-AES256-GCM-SHA384:ECDHE-RSA-AES256-GCM-SHA384:\
    ECDHE-ECDSA-CHACHA20-POLY1305:ECDHE-RSA-CHACHA20-POLY1305";
const DEFAULT_CURVES: &str = "X25519:P-256:P-384";

/// Client-side TLS configuration.
#[derive(Debug, Clone)]
pub struct TlsConfig {
    pub min_version: Option<SslVersion>,
    pub max_version: Option<SslVersion>,
    pub cipher_list: Option<String>,
    pub curves_list: Option<String>,
    pub sigalgs_list: Option<String>,
    /// ALPN protocols. The WebSocket upgrade needs HTTP/1.1, so `h2` must
    /// never be offered here.
    pub alpn_protos: Vec<String>,
    /// Verify the server certificate chain and hostname.
    pub verify_peer: bool,
}

impl Default for TlsConfig {
    fn default() -> Self {
        Self {
            min_version: Some(SslVersion::TLS1_2),
            max_version: Some(SslVersion::TLS1_3),
            cipher_list: Some(DEFAULT_CIPHERS.to_string()),
            curves_list: Some(DEFAULT_CURVES.to_string()),
            sigalgs_list: None,
            alpn_protos: vec!["http/1.1".to_string()],
            verify_peer: true,
        }
    }
}

impl TlsConfig {
    /// Encodes the ALPN list in wire format (length-prefixed).
    pub fn alpn_wire(&self) -> Result<Vec<u8>, NetError> {
        let mut wire = Vec::new();
        for proto in &self.alpn_protos {
            if proto.is_empty() || proto.len() > 255 {
                return Err(NetError::TlsConfig(format!(
                    "invalid ALPN protocol {proto:?}"
                )));
            }
            wire.push(proto.len() as u8);
            wire.extend_from_slice(proto.as_bytes());
        }
        Ok(wire)
    }

    /// Apply this configuration to an SSL connector builder.
    pub fn apply_to_builder(&self, builder: &mut SslConnectorBuilder) -> Result<(), NetError> {
        let tls_err = |what: &str, e: boring::error::ErrorStack| {
            NetError::TlsConfig(format!("{what}: {e}"))
        };

        if let Some(min) = self.min_version {
            builder
                .set_min_proto_version(Some(min))
                .map_err(|e| tls_err("min version", e))?;
        }
        if let Some(max) = self.max_version {
            builder
                .set_max_proto_version(Some(max))
                .map_err(|e| tls_err("max version", e))?;
        }

        if let Some(ciphers) = &self.cipher_list {
            builder
                .set_cipher_list(ciphers)
                .map_err(|e| tls_err("cipher list", e))?;
        }

        if !self.alpn_protos.is_empty() {
            builder
                .set_alpn_protos(&self.alpn_wire()?)
                .map_err(|e| tls_err("alpn", e))?;
        }

        if let Some(sigalgs) = &self.sigalgs_list {
            builder
                .set_sigalgs_list(sigalgs)
                .map_err(|e| tls_err("sigalgs", e))?;
        }

        if let Some(curves) = &self.curves_list {
            builder
                .set_curves_list(curves)
                .map_err(|e| tls_err("curves", e))?;
        }

        if self.verify_peer {
            builder.set_verify(SslVerifyMode::PEER);
        } else {
            tracing::warn!("TLS peer verification disabled");
            builder.set_verify(SslVerifyMode::NONE);
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use boring::ssl::{SslConnector, SslMethod};

    #[test]
    fn test_default_offers_only_http11() {
        let config = TlsConfig::default();
        assert_eq!(config.alpn_protos, vec!["http/1.1".to_string()]);
        assert_eq!(config.alpn_wire().unwrap(), b"\x08http/1.1");
        assert!(config.verify_peer);
    }

    #[test]
    fn test_default_applies() {
        let mut builder = SslConnector::builder(SslMethod::tls()).unwrap();
        TlsConfig::default().apply_to_builder(&mut builder).unwrap();
    }

    #[test]
    fn test_oversized_alpn_rejected() {
        let config = TlsConfig {
            alpn_protos: vec!["x".repeat(256)],
            ..TlsConfig::default()
        };
        assert!(matches!(config.alpn_wire(), Err(NetError::TlsConfig(_))));
    }
}
