//! Session target and client configuration.

use crate::dns::Endpoint;
use crate::pipeline::ExecutionMode;
use crate::socket::tls::{TlsConfig, TrustStore};
use crate::ws::CloseCode;

/// Upgrade path used when none is given.
pub const DEFAULT_PATH: &str = "/401";

/// Product token sent in `User-Agent` ahead of the mode suffix.
pub fn default_product() -> String {
    concat!("wss-client/", env!("CARGO_PKG_VERSION")).to_string()
}

/// Where one session connects and what it sends.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Target {
    host: String,
    port: String,
    path: String,
    payload: String,
}

impl Target {
    pub fn new(
        host: impl Into<String>,
        port: impl Into<String>,
        payload: impl Into<String>,
    ) -> Self {
        Self {
            host: host.into(),
            port: port.into(),
            path: DEFAULT_PATH.to_string(),
            payload: payload.into(),
        }
    }

    pub fn with_path(mut self, path: impl Into<String>) -> Self {
        self.path = path.into();
        self
    }

    /// Host as given on the command line.
    pub fn host(&self) -> &str {
        &self.host
    }

    /// Port as given: a number or a service name.
    pub fn port(&self) -> &str {
        &self.port
    }

    pub fn path(&self) -> &str {
        &self.path
    }

    pub fn payload(&self) -> &str {
        &self.payload
    }

    /// Host with IPv6 brackets removed, used for SNI and the `Host` header.
    pub fn server_name(&self) -> &str {
        self.host
            .strip_prefix('[')
            .and_then(|h| h.strip_suffix(']'))
            .unwrap_or(&self.host)
    }

    pub fn endpoint(&self) -> Endpoint {
        Endpoint::new(self.server_name(), self.port.as_str())
    }
}

/// Which drivers a run starts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Modes {
    #[default]
    Both,
    BlockingOnly,
    CooperativeOnly,
}

impl Modes {
    pub fn includes(self, mode: ExecutionMode) -> bool {
        match (self, mode) {
            (Modes::Both, _) => true,
            (Modes::BlockingOnly, ExecutionMode::Blocking) => true,
            (Modes::CooperativeOnly, ExecutionMode::Cooperative) => true,
            _ => false,
        }
    }
}

/// Settings shared by every session of a client.
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Product token; the mode suffix is appended per session.
    pub product: String,
    /// Code sent in the close frame.
    pub close_code: CloseCode,
    pub tls: TlsConfig,
    pub trust: TrustStore,
    pub modes: Modes,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            product: default_product(),
            close_code: CloseCode::NORMAL,
            tls: TlsConfig::default(),
            trust: TrustStore::default(),
            modes: Modes::default(),
        }
    }
}

impl ClientConfig {
    pub fn builder() -> ClientConfigBuilder {
        ClientConfigBuilder {
            inner: Self::default(),
        }
    }

    /// The `User-Agent` value for sessions run by `mode`.
    pub fn user_agent(&self, mode: ExecutionMode) -> String {
        format!("{} {}", self.product, mode.agent_suffix())
    }
}

/// Builder for [`ClientConfig`].
#[must_use]
#[derive(Debug)]
pub struct ClientConfigBuilder {
    inner: ClientConfig,
}

impl ClientConfigBuilder {
    pub fn product(mut self, product: impl Into<String>) -> Self {
        self.inner.product = product.into();
        self
    }

    pub fn close_code(mut self, code: CloseCode) -> Self {
        self.inner.close_code = code;
        self
    }

    pub fn tls(mut self, tls: TlsConfig) -> Self {
        self.inner.tls = tls;
        self
    }

    pub fn trust(mut self, trust: TrustStore) -> Self {
        self.inner.trust = trust;
        self
    }

    pub fn modes(mut self, modes: Modes) -> Self {
        self.inner.modes = modes;
        self
    }

    pub fn build(self) -> ClientConfig {
        self.inner
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_target_defaults() {
        let target = Target::new("example.com", "443", "Hello, world!");
        assert_eq!(target.path(), "/401");
        assert_eq!(target.server_name(), "example.com");
        assert_eq!(target.endpoint().port(), "443");

        let target = target.with_path("/echo");
        assert_eq!(target.path(), "/echo");
    }

    #[test]
    fn test_bracketed_host() {
        let target = Target::new("[::1]", "443", "x");
        assert_eq!(target.host(), "[::1]");
        assert_eq!(target.server_name(), "::1");
        assert_eq!(target.endpoint().host(), "::1");
    }

    #[test]
    fn test_user_agent_per_mode() {
        let config = ClientConfig::builder().product("acme/1.0").build();
        assert_eq!(
            config.user_agent(ExecutionMode::Blocking),
            "acme/1.0 websocket-client-sync"
        );
        assert_eq!(
            config.user_agent(ExecutionMode::Cooperative),
            "acme/1.0 websocket-client-async"
        );
        assert!(ClientConfig::default().product.starts_with("wss-client/"));
    }

    #[test]
    fn test_modes() {
        assert!(Modes::Both.includes(ExecutionMode::Blocking));
        assert!(Modes::Both.includes(ExecutionMode::Cooperative));
        assert!(!Modes::BlockingOnly.includes(ExecutionMode::Cooperative));
        assert!(!Modes::CooperativeOnly.includes(ExecutionMode::Blocking));
    }
}
