use std::io;
use thiserror::Error;
use tokio_tungstenite::tungstenite;

/// The stage of the session pipeline an error belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// Name or service lookup failed.
    Resolution,
    /// No TCP connection could be established.
    Connect,
    /// TLS configuration, SNI setup or handshake failed.
    Tls,
    /// The WebSocket upgrade failed at the transport level.
    Upgrade,
    /// Sending or receiving an application message failed.
    Io,
    /// The close handshake failed or the session was already closed.
    Close,
}

impl ErrorKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorKind::Resolution => "resolution",
            ErrorKind::Connect => "connect",
            ErrorKind::Tls => "tls",
            ErrorKind::Upgrade => "upgrade",
            ErrorKind::Io => "io",
            ErrorKind::Close => "close",
        }
    }
}

impl std::fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Error)]
pub enum NetError {
    // Resolution Errors
    #[error("Invalid endpoint {host:?}:{port:?}: {reason}")]
    InvalidEndpoint {
        host: String,
        port: String,
        reason: &'static str,
    },
    #[error("Service lookup for {host}:{service} failed: {source}")]
    ServiceLookupFailed {
        host: String,
        service: String,
        #[source]
        source: io::Error,
    },
    #[error("Name not resolved for {domain}: {source}")]
    NameNotResolvedFor {
        domain: String,
        #[source]
        source: io::Error,
    },
    #[error("Resolver task failed: {0}")]
    ResolverTaskFailed(String),

    // Connection Errors
    #[error("No endpoints to connect to")]
    NoEndpoints,
    #[error("Connection to {host}:{port} failed after {attempts} attempt(s): {source}")]
    ConnectionFailedTo {
        host: String,
        port: u16,
        attempts: usize,
        #[source]
        source: io::Error,
    },

    // TLS Errors
    #[error("Failed to set SNI hostname {server_name:?}: {reason}")]
    SniRejected { server_name: String, reason: String },
    #[error("TLS configuration error: {0}")]
    TlsConfig(String),
    #[error("SSL handshake with {server_name} failed: {reason}")]
    SslHandshakeFailed { server_name: String, reason: String },

    // WebSocket Errors
    #[error("Invalid upgrade request: {0}")]
    InvalidUpgradeRequest(String),
    #[error("WebSocket handshake failed: {0}")]
    WsHandshakeFailed(#[source] tungstenite::Error),
    #[error("WebSocket handshake interrupted")]
    WsHandshakeInterrupted,
    #[error("WebSocket send failed: {0}")]
    WsSendFailed(#[source] tungstenite::Error),
    #[error("WebSocket receive failed: {0}")]
    WsReceiveFailed(#[source] tungstenite::Error),
    #[error("Connection closed before a message arrived")]
    ConnectionClosed,
    #[error("WebSocket close failed: {0}")]
    WsCloseFailed(#[source] tungstenite::Error),
    #[error("Session already closed")]
    AlreadyClosed,
}

impl NetError {
    /// Returns the pipeline stage this error belongs to.
    pub fn kind(&self) -> ErrorKind {
        match self {
            NetError::InvalidEndpoint { .. }
            | NetError::ServiceLookupFailed { .. }
            | NetError::NameNotResolvedFor { .. }
            | NetError::ResolverTaskFailed(_) => ErrorKind::Resolution,
            NetError::NoEndpoints | NetError::ConnectionFailedTo { .. } => ErrorKind::Connect,
            NetError::SniRejected { .. }
            | NetError::TlsConfig(_)
            | NetError::SslHandshakeFailed { .. } => ErrorKind::Tls,
            NetError::InvalidUpgradeRequest(_)
            | NetError::WsHandshakeFailed(_)
            | NetError::WsHandshakeInterrupted => ErrorKind::Upgrade,
            NetError::WsSendFailed(_)
            | NetError::WsReceiveFailed(_)
            | NetError::ConnectionClosed => ErrorKind::Io,
            NetError::WsCloseFailed(_) | NetError::AlreadyClosed => ErrorKind::Close,
        }
    }

    /// True when TLS failed while configuring SNI, before any handshake I/O.
    pub fn is_sni_failure(&self) -> bool {
        matches!(self, NetError::SniRejected { .. })
    }

    /// Chromium net error code closest to this error, for log correlation.
    pub fn as_i32(&self) -> i32 {
        match self {
            NetError::ConnectionClosed => -100,
            NetError::ConnectionFailedTo { source, .. } => match source.kind() {
                io::ErrorKind::ConnectionRefused => -102,
                io::ErrorKind::ConnectionReset => -101,
                io::ErrorKind::TimedOut => -118,
                _ => -104,
            },
            NetError::NoEndpoints => -108,
            NetError::NameNotResolvedFor { .. } => -105,
            NetError::ResolverTaskFailed(_) => -137,
            NetError::InvalidEndpoint { .. } => -108,
            NetError::ServiceLookupFailed { .. } => -105,
            NetError::SslHandshakeFailed { .. } => -107,
            NetError::SniRejected { .. } => -159,
            NetError::TlsConfig(_) => -342,
            NetError::InvalidUpgradeRequest(_) => -300,
            NetError::WsHandshakeFailed(_) | NetError::WsHandshakeInterrupted => -145,
            NetError::WsSendFailed(_) | NetError::WsReceiveFailed(_) => -145,
            NetError::WsCloseFailed(_) => -145,
            NetError::AlreadyClosed => -112,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind_taxonomy() {
        let err = NetError::NameNotResolvedFor {
            domain: "nowhere.invalid".into(),
            source: io::Error::new(io::ErrorKind::NotFound, "no such host"),
        };
        assert_eq!(err.kind(), ErrorKind::Resolution);
        assert_eq!(NetError::NoEndpoints.kind(), ErrorKind::Connect);
        assert_eq!(NetError::ConnectionClosed.kind(), ErrorKind::Io);
        assert_eq!(NetError::AlreadyClosed.kind(), ErrorKind::Close);
        assert_eq!(NetError::WsHandshakeInterrupted.kind(), ErrorKind::Upgrade);
    }

    #[test]
    fn test_sni_is_tls_subkind() {
        let err = NetError::SniRejected {
            server_name: "bad\0host".into(),
            reason: "embedded NUL".into(),
        };
        assert_eq!(err.kind(), ErrorKind::Tls);
        assert!(err.is_sni_failure());

        let handshake = NetError::SslHandshakeFailed {
            server_name: "example.com".into(),
            reason: "certificate verify failed".into(),
        };
        assert_eq!(handshake.kind(), ErrorKind::Tls);
        assert!(!handshake.is_sni_failure());
    }

    #[test]
    fn test_resolution_error_is_verbatim() {
        let err = NetError::NameNotResolvedFor {
            domain: "nowhere.invalid".into(),
            source: io::Error::new(io::ErrorKind::NotFound, "failed to lookup address information"),
        };
        assert!(err
            .to_string()
            .ends_with("failed to lookup address information"));
        assert_eq!(err.as_i32(), -105);
    }

    #[test]
    fn test_connect_codes() {
        let refused = NetError::ConnectionFailedTo {
            host: "127.0.0.1".into(),
            port: 443,
            attempts: 1,
            source: io::Error::new(io::ErrorKind::ConnectionRefused, "refused"),
        };
        assert_eq!(refused.as_i32(), -102);
        assert_eq!(ErrorKind::Connect.to_string(), "connect");
    }
}
