//! Outbound Port - The sending half of the game connection

use connect4_protocol::ClientMessage;

use crate::error::TransportError;

/// Close code for a normal, completed session.
pub const NORMAL_CLOSURE: u16 = 1000;

/// Close code used when the peer broke the protocol.
pub const PROTOCOL_ERROR_CLOSURE: u16 = 1002;

/// Port for transmitting messages to the authority
///
/// Implementations must preserve the order of `send` calls. Once `close` has
/// been called, further sends fail with [`TransportError::Closed`].
#[cfg_attr(any(test, feature = "testing"), mockall::automock)]
pub trait OutboundPort: Send + Sync {
    /// Queue a message for transmission
    fn send(&self, message: ClientMessage) -> Result<(), TransportError>;

    /// Close the connection with the given close code
    fn close(&self, code: u16) -> Result<(), TransportError>;
}
