use super::transport::Transport;
use crate::base::connstate::ConnectionState;
use crate::base::neterror::NetError;
use crate::ws::{CloseCode, CloseFrame, HandshakeResult, Message};

/// An established WebSocket, owned by exactly one driver.
///
/// Tracks its own [`ConnectionState`] so a second close is refused without
/// touching the wire.
#[derive(Debug)]
pub struct Session<S> {
    socket: S,
    state: ConnectionState,
    handshake: HandshakeResult,
}

impl<S: Send> Session<S> {
    pub(crate) fn new(socket: S, handshake: HandshakeResult) -> Self {
        Self {
            socket,
            state: ConnectionState::WebSocketEstablished,
            handshake,
        }
    }

    pub fn state(&self) -> ConnectionState {
        self.state
    }

    pub fn handshake(&self) -> &HandshakeResult {
        &self.handshake
    }

    /// Sends `payload` as one text message and waits for the next data
    /// message. Pings and pongs received in between are skipped.
    pub async fn exchange<T>(&mut self, transport: &T, payload: &str) -> Result<Message, NetError>
    where
        T: Transport<Socket = S>,
    {
        if self.state.is_closing_or_closed() {
            return Err(NetError::ConnectionClosed);
        }

        transport
            .send(&mut self.socket, Message::Text(payload.to_string()))
            .await?;
        tracing::trace!(len = payload.len(), "message sent");

        loop {
            match transport.receive(&mut self.socket).await? {
                Message::Close(frame) => {
                    tracing::debug!(?frame, "peer closed before replying");
                    self.state = ConnectionState::Closed;
                    return Err(NetError::ConnectionClosed);
                }
                message if message.is_data() => return Ok(message),
                control => tracing::trace!(?control, "skipping control frame"),
            }
        }
    }

    /// Runs the close handshake with `code`.
    ///
    /// Fails with [`NetError::AlreadyClosed`] once a close was attempted,
    /// whether or not that attempt succeeded.
    pub async fn close<T>(&mut self, transport: &T, code: CloseCode) -> Result<(), NetError>
    where
        T: Transport<Socket = S>,
    {
        if self.state.is_closing_or_closed() {
            return Err(NetError::AlreadyClosed);
        }

        self.state.advance(ConnectionState::Closing);
        let result = transport
            .close(&mut self.socket, CloseFrame::new(code, ""))
            .await;
        self.state = ConnectionState::Closed;

        if let Err(e) = &result {
            tracing::debug!(error = %e, "close handshake failed");
        }
        result
    }
}
