//! System DNS resolution using getaddrinfo.
//!
//! The blocking form runs the lookup on the calling thread. The async form
//! executes the same lookup in `tokio::task::spawn_blocking` so the shared
//! event loop keeps running while getaddrinfo waits.

use super::{Endpoint, ResolvedEndpoints};
use crate::base::context::IoResultExt;
use crate::base::neterror::NetError;
use dns_lookup::{AddrInfoHints, SockType};
use std::{
    io,
    net::{SocketAddr, ToSocketAddrs},
};

/// Resolves `endpoint` on the calling thread.
pub fn resolve_blocking(endpoint: &Endpoint) -> Result<ResolvedEndpoints, NetError> {
    let Some(port) = endpoint.validate()? else {
        return resolve_service(endpoint);
    };

    if let Some(ip) = endpoint.ip_literal() {
        tracing::debug!(host = %endpoint.host(), "host is an IP literal, skipping lookup");
        return Ok(ResolvedEndpoints::new(
            endpoint.host(),
            vec![SocketAddr::new(ip, port)],
        ));
    }

    let host = endpoint.host();
    tracing::debug!(host = %host, port, "resolving via getaddrinfo");
    let addrs: Vec<SocketAddr> = (host, port).to_socket_addrs().dns_context(host)?.collect();

    if addrs.is_empty() {
        return Err(NetError::NameNotResolvedFor {
            domain: host.to_string(),
            source: io::Error::new(
                io::ErrorKind::NotFound,
                "No addresses returned by getaddrinfo",
            ),
        });
    }

    tracing::debug!(host = %host, count = addrs.len(), "DNS resolution complete");
    Ok(ResolvedEndpoints::new(host, addrs))
}

/// Resolves a host together with a named service through getaddrinfo, so
/// every name in the system services database is accepted.
fn resolve_service(endpoint: &Endpoint) -> Result<ResolvedEndpoints, NetError> {
    let host = match endpoint.ip_literal() {
        Some(ip) => ip.to_string(),
        None => endpoint.host().to_string(),
    };
    let service = endpoint.port().trim();
    let failed = |source: io::Error| NetError::ServiceLookupFailed {
        host: host.clone(),
        service: service.to_string(),
        source,
    };

    let hints = AddrInfoHints {
        socktype: SockType::Stream.into(),
        ..AddrInfoHints::default()
    };
    tracing::debug!(host = %host, service, "resolving service via getaddrinfo");
    let addrs = dns_lookup::getaddrinfo(Some(&host), Some(service), Some(hints))
        .map_err(|e| failed(e.into()))?
        .map(|info| info.map(|info| info.sockaddr))
        .collect::<io::Result<Vec<SocketAddr>>>()
        .map_err(failed)?;

    if addrs.is_empty() {
        return Err(failed(io::Error::new(
            io::ErrorKind::NotFound,
            "No addresses returned by getaddrinfo",
        )));
    }

    tracing::debug!(host = %host, service, count = addrs.len(), "service resolution complete");
    Ok(ResolvedEndpoints::new(host, addrs))
}

/// Resolves `endpoint` without blocking the async runtime.
pub async fn resolve(endpoint: &Endpoint) -> Result<ResolvedEndpoints, NetError> {
    let endpoint = endpoint.clone();
    tokio::task::spawn_blocking(move || resolve_blocking(&endpoint))
        .await
        .map_err(|e| {
            tracing::error!(error = %e, "DNS resolution task failed");
            NetError::ResolverTaskFailed(e.to_string())
        })?
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::base::ErrorKind;

    #[test]
    fn test_ip_literal_bypasses_lookup() {
        let resolved = resolve_blocking(&Endpoint::new("127.0.0.1", "https")).unwrap();
        assert_eq!(resolved.len(), 1);
        assert_eq!(resolved.addrs()[0], "127.0.0.1:443".parse().unwrap());
    }

    #[test]
    fn test_invalid_endpoint_fails_before_lookup() {
        let err = resolve_blocking(&Endpoint::new("", "443")).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Resolution);
    }

    #[test]
    fn test_unresolvable_host() {
        // RFC 6761 reserves .invalid; it never resolves.
        let err = resolve_blocking(&Endpoint::new("no-such-host.invalid", "443")).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Resolution);
        assert!(matches!(err, NetError::NameNotResolvedFor { .. }));
    }

    /// True when the local services database maps `http-alt` to 8080.
    fn services_know_http_alt() -> bool {
        std::fs::read_to_string("/etc/services").is_ok_and(|db| {
            db.lines()
                .any(|l| l.split_whitespace().take(2).eq(["http-alt", "8080/tcp"]))
        })
    }

    #[test]
    fn test_system_service_name() {
        if !services_know_http_alt() {
            eprintln!("System service test skipped: no http-alt entry");
            return;
        }
        let resolved = resolve_blocking(&Endpoint::new("127.0.0.1", "http-alt")).unwrap();
        let expected: SocketAddr = "127.0.0.1:8080".parse().unwrap();
        assert_eq!(resolved.addrs().to_vec(), vec![expected]);
    }

    #[test]
    fn test_unknown_service_fails_in_lookup() {
        let err = resolve_blocking(&Endpoint::new("127.0.0.1", "no-such-service-x")).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Resolution);
        match err {
            NetError::ServiceLookupFailed { host, service, .. } => {
                assert_eq!(host, "127.0.0.1");
                assert_eq!(service, "no-such-service-x");
            }
            other => panic!("Expected a service lookup failure, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_async_resolve_localhost() {
        let resolved = resolve(&Endpoint::new("localhost", "8080")).await.unwrap();
        assert!(!resolved.is_empty());
        assert!(resolved.addrs().iter().all(|addr| addr.port() == 8080));
    }
}
