//! WebSocket message types.

use bytes::Bytes;
use tokio_tungstenite::tungstenite;

/// WebSocket message type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Message {
    /// Text message (UTF-8)
    Text(String),
    /// Binary message
    Binary(Bytes),
    /// Ping frame
    Ping(Vec<u8>),
    /// Pong frame
    Pong(Vec<u8>),
    /// Close frame with optional code and reason
    Close(Option<CloseFrame>),
}

/// Close frame data.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CloseFrame {
    /// Close code (RFC 6455)
    pub code: CloseCode,
    /// Close reason (optional UTF-8 string)
    pub reason: String,
}

impl CloseFrame {
    /// Create a new close frame.
    pub fn new(code: CloseCode, reason: impl Into<String>) -> Self {
        Self {
            code,
            reason: reason.into(),
        }
    }
}

/// WebSocket close codes (RFC 6455).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CloseCode(pub u16);

impl CloseCode {
    /// Normal closure
    pub const NORMAL: Self = Self(1000);
}

impl Default for CloseCode {
    fn default() -> Self {
        Self::NORMAL
    }
}

impl From<u16> for CloseCode {
    fn from(code: u16) -> Self {
        Self(code)
    }
}

impl From<CloseCode> for u16 {
    fn from(code: CloseCode) -> Self {
        code.0
    }
}

impl Message {
    /// Check if this is a text or binary message.
    pub fn is_data(&self) -> bool {
        matches!(self, Message::Text(_) | Message::Binary(_))
    }

    /// Renders the payload as text, replacing invalid UTF-8.
    pub fn to_text_lossy(&self) -> String {
        match self {
            Message::Text(s) => s.clone(),
            Message::Binary(b) => String::from_utf8_lossy(b).into_owned(),
            Message::Ping(d) | Message::Pong(d) => String::from_utf8_lossy(d).into_owned(),
            Message::Close(_) => String::new(),
        }
    }
}

/// Convert our Message to tungstenite Message.
pub(crate) fn to_tungstenite(msg: Message) -> tungstenite::Message {
    match msg {
        Message::Text(s) => tungstenite::Message::Text(s),
        Message::Binary(b) => tungstenite::Message::Binary(b.to_vec()),
        Message::Ping(d) => tungstenite::Message::Ping(d),
        Message::Pong(d) => tungstenite::Message::Pong(d),
        Message::Close(frame) => tungstenite::Message::Close(frame.map(close_frame_to_tungstenite)),
    }
}

/// Convert tungstenite Message to our Message.
pub(crate) fn from_tungstenite(msg: tungstenite::Message) -> Message {
    match msg {
        tungstenite::Message::Text(s) => Message::Text(s.to_string()),
        tungstenite::Message::Binary(b) => Message::Binary(Bytes::from(b.to_vec())),
        tungstenite::Message::Ping(d) => Message::Ping(d.to_vec()),
        tungstenite::Message::Pong(d) => Message::Pong(d.to_vec()),
        tungstenite::Message::Close(frame) => Message::Close(frame.map(|f| CloseFrame {
            code: CloseCode(f.code.into()),
            reason: f.reason.to_string(),
        })),
        tungstenite::Message::Frame(_) => Message::Binary(Bytes::new()),
    }
}

pub(crate) fn close_frame_to_tungstenite(
    frame: CloseFrame,
) -> tungstenite::protocol::CloseFrame<'static> {
    tungstenite::protocol::CloseFrame {
        code: tungstenite::protocol::frame::coding::CloseCode::from(frame.code.0),
        reason: frame.reason.into(),
    }
}
