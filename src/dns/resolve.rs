//! Core DNS resolution types.
//!
//! This module defines the host/port pair handed to the resolver and the
//! ordered address list it produces.

use crate::base::neterror::NetError;
use std::{
    fmt,
    net::{IpAddr, SocketAddr},
};

/// A host/port pair to resolve.
///
/// The port is kept as given: either a decimal number or a well-known
/// service name such as `https`.
#[derive(Clone, Hash, Eq, PartialEq)]
pub struct Endpoint {
    host: Box<str>,
    port: Box<str>,
}

impl Endpoint {
    /// Creates a new [`Endpoint`].
    #[inline]
    pub fn new(host: impl Into<Box<str>>, port: impl Into<Box<str>>) -> Self {
        Self {
            host: host.into(),
            port: port.into(),
        }
    }

    /// The host as given.
    #[inline]
    pub fn host(&self) -> &str {
        &self.host
    }

    /// The port as given.
    #[inline]
    pub fn port(&self) -> &str {
        &self.port
    }

    /// Checks both parts are present and maps the port to a number when
    /// that needs no system lookup.
    ///
    /// `Ok(None)` means the port is a service name the system resolver
    /// has to look up.
    pub fn validate(&self) -> Result<Option<u16>, NetError> {
        if self.host.trim().is_empty() {
            return Err(self.invalid("empty host"));
        }
        let port = self.port.trim();
        if port.is_empty() {
            return Err(self.invalid("empty port"));
        }
        if port.bytes().all(|b| b.is_ascii_digit()) && port.parse::<u16>().is_err() {
            return Err(self.invalid("port out of range"));
        }
        Ok(service_port(port))
    }

    /// Returns the host as an IP address when it is a literal.
    ///
    /// Bracketed IPv6 literals (`[::1]`) are accepted.
    pub fn ip_literal(&self) -> Option<IpAddr> {
        let host = self
            .host
            .strip_prefix('[')
            .and_then(|h| h.strip_suffix(']'))
            .unwrap_or(&self.host);
        host.parse().ok()
    }

    fn invalid(&self, reason: &'static str) -> NetError {
        NetError::InvalidEndpoint {
            host: self.host.to_string(),
            port: self.port.to_string(),
            reason,
        }
    }
}

impl fmt::Debug for Endpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}:{:?}", self.host, self.port)
    }
}

impl fmt::Display for Endpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.host, self.port)
    }
}

/// Maps a port string to its number without asking the system.
///
/// Decimal ports parse directly and the service names used for web
/// traffic come from a fixed table. Anything else returns `None`.
pub fn service_port(port: &str) -> Option<u16> {
    let port = port.trim();
    if let Ok(number) = port.parse::<u16>() {
        return Some(number);
    }
    match port.to_ascii_lowercase().as_str() {
        "http" | "ws" => Some(80),
        "https" | "wss" => Some(443),
        _ => None,
    }
}

/// Ordered candidate addresses for one [`Endpoint`].
///
/// Produced by the resolver, consumed once by the connector.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedEndpoints {
    host: String,
    addrs: Vec<SocketAddr>,
}

impl ResolvedEndpoints {
    /// Creates a list for `host`. Order is preserved.
    pub fn new(host: impl Into<String>, addrs: Vec<SocketAddr>) -> Self {
        Self {
            host: host.into(),
            addrs,
        }
    }

    /// The host these addresses were resolved for.
    pub fn host(&self) -> &str {
        &self.host
    }

    pub fn addrs(&self) -> &[SocketAddr] {
        &self.addrs
    }

    pub fn len(&self) -> usize {
        self.addrs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.addrs.is_empty()
    }
}

impl IntoIterator for ResolvedEndpoints {
    type Item = SocketAddr;
    type IntoIter = std::vec::IntoIter<SocketAddr>;

    fn into_iter(self) -> Self::IntoIter {
        self.addrs.into_iter()
    }
}
