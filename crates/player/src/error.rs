//! Error types for the player session.

use connect4_protocol::ProtocolError;
use thiserror::Error;

/// Failure of the underlying connection.
#[derive(Debug, Error)]
pub enum TransportError {
    #[error("WebSocket connection failed: {0}")]
    Connect(#[source] tokio_tungstenite::tungstenite::Error),

    #[error("Receive failed: {0}")]
    Receive(#[source] tokio_tungstenite::tungstenite::Error),

    #[error("Send failed: {0}")]
    SendFailed(String),

    #[error("Socket write failed: {0}")]
    Write(#[source] tokio_tungstenite::tungstenite::Error),

    #[error("Outbound message could not be encoded: {0}")]
    Encode(#[source] ProtocolError),

    #[error("Connection is closed")]
    Closed,
}

/// Failure of a session operation.
///
/// Everything except a rejected move (which arrives as an `error` event and is
/// not an error here) ends the session.
#[derive(Debug, Error)]
pub enum SessionError {
    #[error(transparent)]
    Transport(#[from] TransportError),

    #[error(transparent)]
    Protocol(#[from] ProtocolError),

    #[error("Session was already negotiated")]
    AlreadyNegotiated,

    #[error("Session has not been negotiated yet")]
    NotNegotiated,

    #[error("Frame received after the session terminated")]
    FrameAfterTermination,

    #[error("Session has terminated")]
    SessionTerminated,

    #[error("Server closed the connection before the game ended")]
    ConnectionClosed,
}

/// Invalid configuration value.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid {name} URL '{value}': {source}")]
    InvalidUrl {
        name: &'static str,
        value: String,
        #[source]
        source: url::ParseError,
    },

    #[error("Server URL must use ws:// or wss://, got '{0}'")]
    UnsupportedScheme(String),
}
