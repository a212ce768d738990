//! Endpoint Resolution Module
//!
//! Turns a host/port pair into an ordered list of connectable addresses,
//! either on the calling thread or from inside the async runtime.
//!
//! # Example
//!
//! ```rust,ignore
//! use wss_client::dns::{self, Endpoint};
//!
//! let resolved = dns::resolve(&Endpoint::new("example.com", "443")).await?;
//! for addr in resolved {
//!     println!("Resolved: {}", addr);
//! }
//! ```

mod gai;
mod resolve;

pub use gai::{resolve, resolve_blocking};
pub use resolve::{service_port, Endpoint, ResolvedEndpoints};
