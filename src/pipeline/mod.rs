//! One WebSocket session pipeline, two ways to run it.

pub mod blocking;
pub mod cooperative;
pub mod driver;
pub mod session;
pub mod transport;

pub use blocking::BlockingTransport;
pub use cooperative::TokioTransport;
pub use driver::{
    establish, run_session, Client, Established, ExecutionMode, RunSummary, SessionOutcome,
};
pub use session::Session;
pub use transport::Transport;
