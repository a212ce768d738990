use crate::base::neterror::NetError;
use crate::dns::{Endpoint, ResolvedEndpoints};
use crate::ws::{CloseFrame, Message, Upgrade, UpgradeRequest};
use std::future::Future;
use std::net::SocketAddr;

/// The suspension points of one session, in pipeline order.
///
/// The session pipeline is written once against this trait. The blocking
/// implementation completes every step before returning its future; the
/// async implementation yields to the event loop while I/O is pending.
///
/// Each stage consumes the previous stage's stream, so no two stages ever
/// hold the same connection.
pub trait Transport: Send + Sync {
    /// A connected TCP stream.
    type Tcp: Send;
    /// The TCP stream after the TLS handshake.
    type Tls: Send;
    /// The WebSocket over the TLS stream.
    type Socket: Send;

    /// Looks up `endpoint` and returns candidates in resolver order.
    fn resolve(
        &self,
        endpoint: &Endpoint,
    ) -> impl Future<Output = Result<ResolvedEndpoints, NetError>> + Send;

    /// Connects to the first reachable candidate, returning the address used.
    fn connect(
        &self,
        endpoints: ResolvedEndpoints,
    ) -> impl Future<Output = Result<(Self::Tcp, SocketAddr), NetError>> + Send;

    /// Sets SNI to `server_name` and performs the client TLS handshake.
    fn secure(
        &self,
        stream: Self::Tcp,
        server_name: &str,
    ) -> impl Future<Output = Result<Self::Tls, NetError>> + Send;

    /// Sends the upgrade request and reads the server's answer.
    fn upgrade(
        &self,
        stream: Self::Tls,
        request: UpgradeRequest,
    ) -> impl Future<Output = Result<Upgrade<Self::Socket>, NetError>> + Send;

    /// Writes and flushes one message.
    fn send(
        &self,
        socket: &mut Self::Socket,
        message: Message,
    ) -> impl Future<Output = Result<(), NetError>> + Send;

    /// Reads the next complete message, control frames included.
    fn receive(
        &self,
        socket: &mut Self::Socket,
    ) -> impl Future<Output = Result<Message, NetError>> + Send;

    /// Sends `frame` and waits until the peer acknowledges the close.
    fn close(
        &self,
        socket: &mut Self::Socket,
        frame: CloseFrame,
    ) -> impl Future<Output = Result<(), NetError>> + Send;
}
