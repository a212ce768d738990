//! # wss-client
//!
//! A TLS WebSocket client that runs one session pipeline under two
//! execution models: a blocking worker thread and a cooperative tokio task.
//!
//! Each session resolves the target, connects over TCP, performs a TLS
//! handshake with SNI, upgrades to WebSocket with a mode-specific
//! `User-Agent`, exchanges one text message and closes the connection.
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use wss_client::config::{ClientConfig, Target};
//! use wss_client::{console, pipeline::Client};
//!
//! let client = Client::new(ClientConfig::default(), Arc::new(console::stdout()))?;
//! let runtime = tokio::runtime::Builder::new_current_thread().enable_all().build()?;
//! let summary = client.run(&runtime, &Target::new("example.com", "443", "Hello, world!"));
//! ```
//!
//! ## Modules
//!
//! - [`base`] - Error taxonomy and connection state
//! - [`config`] - Session target and client settings
//! - [`console`] - Serialized report lines
//! - [`dns`] - Endpoint resolution
//! - [`pipeline`] - The session pipeline and its two drivers
//! - [`socket`] - TCP connect and TLS
//! - [`ws`] - WebSocket messages and upgrade results

pub mod base;
pub mod config;
pub mod console;
pub mod dns;
pub mod pipeline;
pub mod socket;
pub mod ws;

pub use base::{ErrorKind, NetError};
pub use config::{ClientConfig, Target};
pub use pipeline::{Client, ExecutionMode, SessionOutcome};
