//! WebSocket upgrade request and result types.

use crate::base::neterror::NetError;
use http::header::{HeaderValue, HOST, USER_AGENT};
use http::{HeaderMap, Request, Response, StatusCode, Version};
use std::fmt;
use std::net::Ipv6Addr;
use tokio_tungstenite::tungstenite::client::IntoClientRequest;

/// Builds the `Host` header value for an upgrade.
///
/// Uses the port actually connected, not the one originally requested.
/// IPv6 literals are bracketed (RFC 7230 §5.4).
pub fn host_header(host: &str, connected_port: u16) -> String {
    if host.parse::<Ipv6Addr>().is_ok() {
        format!("[{host}]:{connected_port}")
    } else {
        format!("{host}:{connected_port}")
    }
}

/// The outbound upgrade request, before the framing library adds its keys.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UpgradeRequest {
    host_header: String,
    path: String,
    user_agent: String,
}

impl UpgradeRequest {
    pub fn new(
        host: &str,
        connected_port: u16,
        path: &str,
        user_agent: impl Into<String>,
    ) -> Self {
        let path = if path.starts_with('/') {
            path.to_string()
        } else {
            format!("/{path}")
        };
        Self {
            host_header: host_header(host, connected_port),
            path,
            user_agent: user_agent.into(),
        }
    }

    pub fn host_header(&self) -> &str {
        &self.host_header
    }

    pub fn path(&self) -> &str {
        &self.path
    }

    pub fn user_agent(&self) -> &str {
        &self.user_agent
    }

    /// Produces the HTTP request handed to the framing library.
    ///
    /// The library generates the key and version headers; `Host` and
    /// `User-Agent` are then set to our values.
    pub fn into_client_request(self) -> Result<Request<()>, NetError> {
        let uri = format!("wss://{}{}", self.host_header, self.path);
        let mut request = uri
            .as_str()
            .into_client_request()
            .map_err(|e| NetError::InvalidUpgradeRequest(format!("{uri}: {e}")))?;

        let host = HeaderValue::from_str(&self.host_header)
            .map_err(|e| NetError::InvalidUpgradeRequest(format!("host header: {e}")))?;
        let agent = HeaderValue::from_str(&self.user_agent)
            .map_err(|e| NetError::InvalidUpgradeRequest(format!("user agent: {e}")))?;
        let headers = request.headers_mut();
        headers.insert(HOST, host);
        headers.insert(USER_AGENT, agent);
        Ok(request)
    }
}

/// What the server answered to the upgrade request.
#[derive(Debug, Clone)]
pub struct HandshakeResult {
    version: Version,
    status: StatusCode,
    headers: HeaderMap,
    body: Option<Vec<u8>>,
    error: Option<String>,
}

impl HandshakeResult {
    /// Result of an accepted upgrade.
    pub fn accepted<B: AsRef<[u8]>>(response: &Response<Option<B>>) -> Self {
        Self::from_response(response, None)
    }

    /// Result of an upgrade the server declined.
    pub fn rejected<B: AsRef<[u8]>>(response: &Response<Option<B>>) -> Self {
        let error = format!(
            "The WebSocket handshake was declined by the remote peer ({})",
            response.status()
        );
        Self::from_response(response, Some(error))
    }

    fn from_response<B: AsRef<[u8]>>(response: &Response<Option<B>>, error: Option<String>) -> Self {
        Self {
            version: response.version(),
            status: response.status(),
            headers: response.headers().clone(),
            body: response.body().as_ref().map(|b| b.as_ref().to_vec()),
            error,
        }
    }

    /// Builds a result directly; used by transports that do not speak HTTP.
    pub fn new(status: StatusCode, headers: HeaderMap, error: Option<String>) -> Self {
        Self {
            version: Version::HTTP_11,
            status,
            headers,
            body: None,
            error,
        }
    }

    pub fn is_success(&self) -> bool {
        self.error.is_none()
    }

    /// `Success`, or the reason the upgrade was declined.
    pub fn message(&self) -> &str {
        self.error.as_deref().unwrap_or("Success")
    }

    pub fn status(&self) -> StatusCode {
        self.status
    }

    pub fn headers(&self) -> &HeaderMap {
        &self.headers
    }

    /// Response body, if the server sent one with a declined upgrade.
    pub fn body(&self) -> Option<&[u8]> {
        self.body.as_deref()
    }
}

impl fmt::Display for HandshakeResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{:?} {} {}",
            self.version,
            self.status.as_u16(),
            self.status.canonical_reason().unwrap_or("")
        )?;
        for (name, value) in &self.headers {
            write!(f, "; {}: {}", name, String::from_utf8_lossy(value.as_bytes()))?;
        }
        match self.body.as_deref() {
            Some(body) if !body.is_empty() => write!(f, " | {}", String::from_utf8_lossy(body)),
            _ => Ok(()),
        }
    }
}

/// Outcome of a completed upgrade exchange.
///
/// A declined upgrade is not an error: the server answered, the caller
/// reports it and stops before exchanging messages.
#[derive(Debug)]
pub enum Upgrade<S> {
    Accepted { socket: S, response: HandshakeResult },
    Rejected(HandshakeResult),
}
