//! Base types and error handling.
//!
//! - [`NetError`]: the error taxonomy shared by both execution drivers
//! - [`ConnectionState`]: a session's connection lifecycle

pub mod connstate;
pub mod context;
pub mod neterror;

pub use connstate::ConnectionState;
pub use neterror::{ErrorKind, NetError};
