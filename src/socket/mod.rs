//! TCP connection and TLS layers.

pub mod connectjob;
pub mod tls;

pub use connectjob::ConnectJob;
pub use tls::{TlsConfig, TlsConnector, TrustStore};
