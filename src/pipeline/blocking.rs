//! Thread-per-call transport.
//!
//! Every step runs to completion on the calling thread before its future
//! resolves. Meant to be driven by `futures::executor::block_on` on a
//! dedicated worker, never from inside the async runtime.

use super::transport::Transport;
use crate::base::neterror::NetError;
use crate::dns::{self, Endpoint, ResolvedEndpoints};
use crate::socket::connectjob::ConnectJob;
use crate::socket::tls::TlsConnector;
use crate::ws::message::{close_frame_to_tungstenite, from_tungstenite, to_tungstenite};
use crate::ws::{CloseFrame, HandshakeResult, Message, Upgrade, UpgradeRequest};
use std::future::Future;
use std::net::{SocketAddr, TcpStream};
use tokio_tungstenite::tungstenite::{self, HandshakeError, WebSocket};

type TlsStream = boring::ssl::SslStream<TcpStream>;

/// Blocking I/O over std sockets, BoringSSL and tungstenite.
#[derive(Debug, Clone)]
pub struct BlockingTransport {
    tls: TlsConnector,
}

impl BlockingTransport {
    pub fn new(tls: TlsConnector) -> Self {
        Self { tls }
    }
}

impl Transport for BlockingTransport {
    type Tcp = TcpStream;
    type Tls = TlsStream;
    type Socket = WebSocket<TlsStream>;

    fn resolve(
        &self,
        endpoint: &Endpoint,
    ) -> impl Future<Output = Result<ResolvedEndpoints, NetError>> + Send {
        async move { dns::resolve_blocking(endpoint) }
    }

    fn connect(
        &self,
        endpoints: ResolvedEndpoints,
    ) -> impl Future<Output = Result<(TcpStream, SocketAddr), NetError>> + Send {
        async move { ConnectJob::connect_blocking(endpoints) }
    }

    fn secure(
        &self,
        stream: TcpStream,
        server_name: &str,
    ) -> impl Future<Output = Result<TlsStream, NetError>> + Send {
        async move { self.tls.connect_blocking(server_name, stream) }
    }

    fn upgrade(
        &self,
        stream: TlsStream,
        request: UpgradeRequest,
    ) -> impl Future<Output = Result<Upgrade<Self::Socket>, NetError>> + Send {
        async move {
            let request = request.into_client_request()?;
            match tungstenite::client::client(request, stream) {
                Ok((socket, response)) => Ok(Upgrade::Accepted {
                    socket,
                    response: HandshakeResult::accepted(&response),
                }),
                Err(HandshakeError::Failure(tungstenite::Error::Http(response))) => {
                    Ok(Upgrade::Rejected(HandshakeResult::rejected(&response)))
                }
                Err(HandshakeError::Failure(e)) => Err(NetError::WsHandshakeFailed(e)),
                Err(HandshakeError::Interrupted(_)) => Err(NetError::WsHandshakeInterrupted),
            }
        }
    }

    fn send(
        &self,
        socket: &mut Self::Socket,
        message: Message,
    ) -> impl Future<Output = Result<(), NetError>> + Send {
        async move {
            socket
                .send(to_tungstenite(message))
                .map_err(NetError::WsSendFailed)
        }
    }

    fn receive(
        &self,
        socket: &mut Self::Socket,
    ) -> impl Future<Output = Result<Message, NetError>> + Send {
        async move {
            match socket.read() {
                Ok(message) => Ok(from_tungstenite(message)),
                Err(tungstenite::Error::ConnectionClosed | tungstenite::Error::AlreadyClosed) => {
                    Err(NetError::ConnectionClosed)
                }
                Err(e) => Err(NetError::WsReceiveFailed(e)),
            }
        }
    }

    fn close(
        &self,
        socket: &mut Self::Socket,
        frame: CloseFrame,
    ) -> impl Future<Output = Result<(), NetError>> + Send {
        async move {
            socket
                .close(Some(close_frame_to_tungstenite(frame)))
                .map_err(NetError::WsCloseFailed)?;
            loop {
                match socket.read() {
                    Ok(tungstenite::Message::Close(_)) => return Ok(()),
                    Ok(_) => continue,
                    Err(tungstenite::Error::ConnectionClosed) => return Ok(()),
                    Err(e) => return Err(NetError::WsCloseFailed(e)),
                }
            }
        }
    }
}
