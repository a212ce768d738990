//! The session pipeline and its two execution drivers.
//!
//! [`run_session`] is the one copy of the resolve, connect, secure, upgrade,
//! exchange and close sequence. The blocking driver runs it with
//! `futures::executor::block_on` on a dedicated thread; the cooperative
//! driver runs it as a tokio task.

use super::blocking::BlockingTransport;
use super::cooperative::TokioTransport;
use super::session::Session;
use super::transport::Transport;
use crate::base::connstate::ConnectionState;
use crate::base::neterror::NetError;
use crate::config::{ClientConfig, Target};
use crate::console::Reporter;
use crate::socket::tls::TlsConnector;
use crate::ws::{HandshakeResult, Upgrade, UpgradeRequest};
use std::fmt;
use std::io;
use std::sync::Arc;
use std::thread;

/// Which driver runs a pipeline.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ExecutionMode {
    /// One dedicated worker thread, every step blocks.
    Blocking,
    /// A task on the shared event loop.
    Cooperative,
}

impl ExecutionMode {
    /// Console tag.
    pub fn tag(self) -> &'static str {
        match self {
            ExecutionMode::Blocking => "sync",
            ExecutionMode::Cooperative => "async",
        }
    }

    /// Appended to the product token in the `User-Agent` header.
    pub fn agent_suffix(self) -> &'static str {
        match self {
            ExecutionMode::Blocking => "websocket-client-sync",
            ExecutionMode::Cooperative => "websocket-client-async",
        }
    }
}

impl fmt::Display for ExecutionMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}

/// How one pipeline run ended.
#[derive(Debug)]
pub enum SessionOutcome {
    /// Upgrade accepted, reply received, close handshake done.
    Completed {
        handshake: HandshakeResult,
        reply: String,
    },
    /// The server declined the upgrade. Not an error.
    Rejected(HandshakeResult),
    /// A fatal error stopped the pipeline.
    Failed(NetError),
}

impl SessionOutcome {
    pub fn is_completed(&self) -> bool {
        matches!(self, SessionOutcome::Completed { .. })
    }

    pub fn reply(&self) -> Option<&str> {
        match self {
            SessionOutcome::Completed { reply, .. } => Some(reply),
            _ => None,
        }
    }

    pub fn error(&self) -> Option<&NetError> {
        match self {
            SessionOutcome::Failed(e) => Some(e),
            _ => None,
        }
    }
}

/// Result of [`establish`]: an open session or a soft rejection.
#[derive(Debug)]
pub enum Established<S> {
    Open(Session<S>),
    Rejected(HandshakeResult),
}

/// Resolves, connects, secures and upgrades a connection to `target`.
///
/// SNI is the bare host. The `Host` header carries the port actually
/// connected, which may differ from the one in `target`.
pub async fn establish<T: Transport>(
    transport: &T,
    target: &Target,
    user_agent: &str,
) -> Result<Established<T::Socket>, NetError> {
    let mut state = ConnectionState::Unconnected;

    let endpoints = transport.resolve(&target.endpoint()).await?;
    tracing::debug!(host = %target.host(), count = endpoints.len(), "resolved");

    let (stream, addr) = transport.connect(endpoints).await?;
    state.advance(ConnectionState::Connected);

    let stream = transport.secure(stream, target.server_name()).await?;
    state.advance(ConnectionState::TlsEstablished);

    let request = UpgradeRequest::new(target.server_name(), addr.port(), target.path(), user_agent);
    tracing::debug!(host = request.host_header(), path = request.path(), "upgrading");

    match transport.upgrade(stream, request).await? {
        Upgrade::Accepted { socket, response } => {
            state.advance(ConnectionState::WebSocketEstablished);
            Ok(Established::Open(Session::new(socket, response)))
        }
        Upgrade::Rejected(response) => {
            tracing::debug!(?state, status = %response.status(), "upgrade declined");
            Ok(Established::Rejected(response))
        }
    }
}

/// Runs one full session and reports its progress.
///
/// Never fails: errors are reported as one `Error:` line and returned as
/// [`SessionOutcome::Failed`].
pub async fn run_session<T: Transport>(
    transport: &T,
    mode: ExecutionMode,
    target: &Target,
    config: &ClientConfig,
    reporter: &dyn Reporter,
) -> SessionOutcome {
    tracing::debug!(%mode, host = %target.host(), port = %target.port(), "session starting");
    match drive(transport, mode, target, config, reporter).await {
        Ok(outcome) => outcome,
        Err(e) => {
            tracing::warn!(%mode, kind = %e.kind(), code = e.as_i32(), error = %e, "session failed");
            reporter.report(mode, &format!("Error: {e}"));
            SessionOutcome::Failed(e)
        }
    }
}

async fn drive<T: Transport>(
    transport: &T,
    mode: ExecutionMode,
    target: &Target,
    config: &ClientConfig,
    reporter: &dyn Reporter,
) -> Result<SessionOutcome, NetError> {
    let user_agent = config.user_agent(mode);
    let mut session = match establish(transport, target, &user_agent).await? {
        Established::Open(session) => session,
        Established::Rejected(handshake) => {
            reporter.report(mode, handshake.message());
            reporter.report(mode, &handshake.to_string());
            return Ok(SessionOutcome::Rejected(handshake));
        }
    };
    reporter.report(mode, session.handshake().message());
    reporter.report(mode, &session.handshake().to_string());

    let reply = session.exchange(transport, target.payload()).await?;
    session.close(transport, config.close_code).await?;

    let reply = reply.to_text_lossy();
    reporter.report(mode, &reply);
    tracing::debug!(%mode, state = ?session.state(), "session complete");

    Ok(SessionOutcome::Completed {
        handshake: session.handshake().clone(),
        reply,
    })
}

/// Outcomes of one [`Client::run`]; `None` for a mode that did not run.
#[derive(Debug, Default)]
pub struct RunSummary {
    pub blocking: Option<SessionOutcome>,
    pub cooperative: Option<SessionOutcome>,
}

/// Both drivers over one shared configuration and TLS context.
#[derive(Clone)]
pub struct Client {
    config: Arc<ClientConfig>,
    tls: TlsConnector,
    reporter: Arc<dyn Reporter>,
}

impl Client {
    /// Initializes the trust store and TLS context once for every session.
    pub fn new(config: ClientConfig, reporter: Arc<dyn Reporter>) -> Result<Self, NetError> {
        let tls = TlsConnector::new(&config.tls, &config.trust)?;
        Ok(Self {
            config: Arc::new(config),
            tls,
            reporter,
        })
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// Runs the blocking pipeline on the calling thread.
    pub fn run_blocking(&self, target: &Target) -> SessionOutcome {
        let transport = BlockingTransport::new(self.tls.clone());
        futures::executor::block_on(run_session(
            &transport,
            ExecutionMode::Blocking,
            target,
            &self.config,
            self.reporter.as_ref(),
        ))
    }

    /// Starts the blocking pipeline on its own worker thread.
    pub fn spawn_blocking_worker(
        &self,
        target: Target,
    ) -> io::Result<thread::JoinHandle<SessionOutcome>> {
        let client = self.clone();
        thread::Builder::new()
            .name("wss-sync".into())
            .spawn(move || client.run_blocking(&target))
    }

    /// Runs the cooperative pipeline on the current runtime.
    pub async fn run_cooperative(&self, target: &Target) -> SessionOutcome {
        let transport = TokioTransport::new(self.tls.clone());
        run_session(
            &transport,
            ExecutionMode::Cooperative,
            target,
            &self.config,
            self.reporter.as_ref(),
        )
        .await
    }

    /// Runs the configured modes against `target` concurrently.
    ///
    /// The blocking worker starts first. The runtime is pumped until the
    /// cooperative task has finished, then the worker is joined.
    pub fn run(&self, runtime: &tokio::runtime::Runtime, target: &Target) -> RunSummary {
        let modes = self.config.modes;
        let mut summary = RunSummary::default();

        let worker = if modes.includes(ExecutionMode::Blocking) {
            self.worker_started(self.spawn_blocking_worker(target.clone()))
        } else {
            None
        };

        if modes.includes(ExecutionMode::Cooperative) {
            let client = self.clone();
            let target = target.clone();
            let task = runtime.spawn(async move { client.run_cooperative(&target).await });
            match runtime.block_on(task) {
                Ok(outcome) => summary.cooperative = Some(outcome),
                Err(e) => tracing::error!(error = %e, "cooperative task did not finish"),
            }
        }

        if let Some(worker) = worker {
            match worker.join() {
                Ok(outcome) => summary.blocking = Some(outcome),
                Err(_) => self.worker_failed("blocking worker panicked"),
            }
        }

        summary
    }

    fn worker_started(
        &self,
        spawned: io::Result<thread::JoinHandle<SessionOutcome>>,
    ) -> Option<thread::JoinHandle<SessionOutcome>> {
        match spawned {
            Ok(handle) => Some(handle),
            Err(e) => {
                self.worker_failed(&format!("failed to start blocking worker: {e}"));
                None
            }
        }
    }

    /// Reports a blocking pipeline that never produced an outcome.
    fn worker_failed(&self, reason: &str) {
        tracing::error!(mode = %ExecutionMode::Blocking, reason, "blocking pipeline lost");
        self.reporter
            .report(ExecutionMode::Blocking, &format!("Error: {reason}"));
    }
}

impl fmt::Debug for Client {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Client")
            .field("config", &self.config)
            .field("tls", &self.tls)
            .finish_non_exhaustive()
    }
}
