use crate::base::neterror::NetError;
use crate::dns::ResolvedEndpoints;
use std::io;
use std::net::SocketAddr;

/// Opens the TCP connection for a session.
///
/// Candidates are tried one at a time in resolver order; the first success
/// wins. The returned address is the one actually connected, so callers see
/// the real port even when the resolver rewrote it.
pub struct ConnectJob;

impl ConnectJob {
    /// Connects on the calling thread.
    pub fn connect_blocking(
        endpoints: ResolvedEndpoints,
    ) -> Result<(std::net::TcpStream, SocketAddr), NetError> {
        let host = endpoints.host().to_string();
        let mut attempts = 0;
        let mut last = None;

        for addr in endpoints {
            attempts += 1;
            tracing::debug!(host = %host, %addr, "connecting");
            match std::net::TcpStream::connect(addr) {
                Ok(stream) => {
                    tracing::debug!(host = %host, %addr, "connected");
                    return Ok((stream, addr));
                }
                Err(e) => {
                    tracing::debug!(host = %host, %addr, error = %e, "connect attempt failed");
                    last = Some((addr, e));
                }
            }
        }

        Err(Self::exhausted(&host, attempts, last))
    }

    /// Connects from inside the async runtime.
    pub async fn connect(
        endpoints: ResolvedEndpoints,
    ) -> Result<(tokio::net::TcpStream, SocketAddr), NetError> {
        let host = endpoints.host().to_string();
        let mut attempts = 0;
        let mut last = None;

        for addr in endpoints {
            attempts += 1;
            tracing::debug!(host = %host, %addr, "connecting");
            match tokio::net::TcpStream::connect(addr).await {
                Ok(stream) => {
                    tracing::debug!(host = %host, %addr, "connected");
                    return Ok((stream, addr));
                }
                Err(e) => {
                    tracing::debug!(host = %host, %addr, error = %e, "connect attempt failed");
                    last = Some((addr, e));
                }
            }
        }

        Err(Self::exhausted(&host, attempts, last))
    }

    fn exhausted(host: &str, attempts: usize, last: Option<(SocketAddr, io::Error)>) -> NetError {
        match last {
            Some((addr, source)) => NetError::ConnectionFailedTo {
                host: host.to_string(),
                port: addr.port(),
                attempts,
                source,
            },
            None => NetError::NoEndpoints,
        }
    }
}
