//! WebSocket message, upgrade request and handshake result types.
//!
//! Framing is done by tungstenite; these types keep it out of the public API.

mod handshake;
pub(crate) mod message;

pub use handshake::{host_header, HandshakeResult, Upgrade, UpgradeRequest};
pub use message::{CloseCode, CloseFrame, Message};
