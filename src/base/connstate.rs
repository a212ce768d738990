/// The lifecycle of one session's connection.
/// Transitions only move forward, one step at a time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default)]
pub enum ConnectionState {
    /// Nothing has been opened yet.
    #[default]
    Unconnected,

    /// A TCP connection to one resolved address is open.
    Connected,

    /// The TLS handshake completed.
    TlsEstablished,

    /// The WebSocket upgrade was accepted.
    WebSocketEstablished,

    /// A close frame was sent.
    Closing,

    /// The close handshake completed, or failed and left the stream unusable.
    Closed,
}

impl ConnectionState {
    /// The state that follows this one, if any.
    pub fn next(self) -> Option<Self> {
        match self {
            ConnectionState::Unconnected => Some(ConnectionState::Connected),
            ConnectionState::Connected => Some(ConnectionState::TlsEstablished),
            ConnectionState::TlsEstablished => Some(ConnectionState::WebSocketEstablished),
            ConnectionState::WebSocketEstablished => Some(ConnectionState::Closing),
            ConnectionState::Closing => Some(ConnectionState::Closed),
            ConnectionState::Closed => None,
        }
    }

    /// Moves to `next` if it is the immediate successor.
    ///
    /// Returns the new state, or `None` for an out-of-order transition.
    pub fn advance(&mut self, next: Self) -> Option<Self> {
        if self.next() == Some(next) {
            tracing::trace!(from = ?*self, to = ?next, "connection state");
            *self = next;
            Some(next)
        } else {
            None
        }
    }

    /// True once the close handshake has started.
    pub fn is_closing_or_closed(self) -> bool {
        self >= ConnectionState::Closing
    }
}
