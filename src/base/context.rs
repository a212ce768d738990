//! Ergonomic error context helpers.
//!
//! Extension traits that turn `io::Error` into context-rich `NetError`
//! variants.

use crate::base::neterror::NetError;
use std::io;

/// Extension trait for adding context to IO Results.
pub trait IoResultExt<T> {
    /// Add DNS resolution context to an IO error.
    ///
    /// # Example
    /// ```ignore
    /// use wss_client::base::context::IoResultExt;
    ///
    /// let addrs = ("example.com", 443).to_socket_addrs().dns_context("example.com")?;
    /// // Error: "Name not resolved for example.com: failed to lookup address information"
    /// ```
    fn dns_context(self, domain: &str) -> Result<T, NetError>;
}

impl<T> IoResultExt<T> for Result<T, io::Error> {
    fn dns_context(self, domain: &str) -> Result<T, NetError> {
        self.map_err(|source| NetError::NameNotResolvedFor {
            domain: domain.to_string(),
            source,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::{Error, ErrorKind};

    #[test]
    fn test_dns_context() {
        let result: Result<(), io::Error> = Err(Error::new(ErrorKind::NotFound, "no such host"));
        let err = result.dns_context("unknown.example.com").unwrap_err();

        match err {
            NetError::NameNotResolvedFor { domain, source } => {
                assert_eq!(domain, "unknown.example.com");
                assert_eq!(source.kind(), ErrorKind::NotFound);
            }
            _ => panic!("Expected NameNotResolvedFor"),
        }
    }

    #[test]
    fn test_ok_passes_through() {
        let result: Result<u8, io::Error> = Ok(7);
        assert_eq!(result.dns_context("example.com").unwrap(), 7);
    }
}
