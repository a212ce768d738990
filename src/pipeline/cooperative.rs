//! Event-loop transport.
//!
//! Every step suspends the calling task while I/O is pending, so one tokio
//! runtime can multiplex this session with any other task.

use super::transport::Transport;
use crate::base::neterror::NetError;
use crate::dns::{self, Endpoint, ResolvedEndpoints};
use crate::socket::connectjob::ConnectJob;
use crate::socket::tls::TlsConnector;
use crate::ws::message::{close_frame_to_tungstenite, from_tungstenite, to_tungstenite};
use crate::ws::{CloseFrame, HandshakeResult, Message, Upgrade, UpgradeRequest};
use futures::{SinkExt, StreamExt};
use std::future::Future;
use std::net::SocketAddr;
use tokio::net::TcpStream;
use tokio_tungstenite::{client_async, tungstenite, WebSocketStream};

type TlsStream = tokio_boring::SslStream<TcpStream>;

/// Async I/O over tokio sockets, tokio-boring and tokio-tungstenite.
#[derive(Debug, Clone)]
pub struct TokioTransport {
    tls: TlsConnector,
}

impl TokioTransport {
    pub fn new(tls: TlsConnector) -> Self {
        Self { tls }
    }
}

impl Transport for TokioTransport {
    type Tcp = TcpStream;
    type Tls = TlsStream;
    type Socket = WebSocketStream<TlsStream>;

    fn resolve(
        &self,
        endpoint: &Endpoint,
    ) -> impl Future<Output = Result<ResolvedEndpoints, NetError>> + Send {
        dns::resolve(endpoint)
    }

    fn connect(
        &self,
        endpoints: ResolvedEndpoints,
    ) -> impl Future<Output = Result<(TcpStream, SocketAddr), NetError>> + Send {
        ConnectJob::connect(endpoints)
    }

    fn secure(
        &self,
        stream: TcpStream,
        server_name: &str,
    ) -> impl Future<Output = Result<TlsStream, NetError>> + Send {
        self.tls.connect(server_name, stream)
    }

    fn upgrade(
        &self,
        stream: TlsStream,
        request: UpgradeRequest,
    ) -> impl Future<Output = Result<Upgrade<Self::Socket>, NetError>> + Send {
        async move {
            let request = request.into_client_request()?;
            match client_async(request, stream).await {
                Ok((socket, response)) => Ok(Upgrade::Accepted {
                    socket,
                    response: HandshakeResult::accepted(&response),
                }),
                Err(tungstenite::Error::Http(response)) => {
                    Ok(Upgrade::Rejected(HandshakeResult::rejected(&response)))
                }
                Err(e) => Err(NetError::WsHandshakeFailed(e)),
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
                .await
                .map_err(NetError::WsSendFailed)
        }
    }

    fn receive(
        &self,
        socket: &mut Self::Socket,
    ) -> impl Future<Output = Result<Message, NetError>> + Send {
        async move {
            match socket.next().await {
                Some(Ok(message)) => Ok(from_tungstenite(message)),
                Some(Err(tungstenite::Error::ConnectionClosed | tungstenite::Error::AlreadyClosed))
                | None => Err(NetError::ConnectionClosed),
                Some(Err(e)) => Err(NetError::WsReceiveFailed(e)),
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
                .await
                .map_err(NetError::WsCloseFailed)?;
            while let Some(message) = socket.next().await {
                match message {
                    Ok(tungstenite::Message::Close(_)) => return Ok(()),
                    Ok(_) => continue,
                    Err(tungstenite::Error::ConnectionClosed) => return Ok(()),
                    Err(e) => return Err(NetError::WsCloseFailed(e)),
                }
            }
            Ok(())
        }
    }
}
