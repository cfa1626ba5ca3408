//! Command Bus for sending messages to the game authority.
//!
//! The bus is the only way anything in the player writes to the socket. It
//! queues messages in order for the WebSocket writer task.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use connect4_protocol::ClientMessage;
use tokio::sync::mpsc;

use crate::error::TransportError;
use crate::ports::outbound::OutboundPort;

/// Message types sent through the command bus to the WebSocket writer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BusMessage {
    /// Transmit a message as a text frame
    Send(ClientMessage),
    /// Send a close frame with this code, then stop writing
    Close(u16),
}

/// Command bus for sending messages to the game authority.
///
/// Cheap to clone; all clones feed the same writer and share the closed flag.
#[derive(Clone)]
pub struct CommandBus {
    tx: mpsc::UnboundedSender<BusMessage>,
    closed: Arc<AtomicBool>,
}

impl CommandBus {
    /// Create a new CommandBus with the given channel sender.
    pub fn new(tx: mpsc::UnboundedSender<BusMessage>) -> Self {
        Self {
            tx,
            closed: Arc::new(AtomicBool::new(false)),
        }
    }

    /// Queue a message for transmission.
    ///
    /// Fails once the bus has been closed; queued-but-unsent messages are
    /// dropped by the writer when it shuts down.
    pub fn send(&self, message: ClientMessage) -> Result<(), TransportError> {
        if self.is_closed() {
            return Err(TransportError::Closed);
        }
        self.tx
            .send(BusMessage::Send(message))
            .map_err(|e| TransportError::SendFailed(format!("CommandBus send failed: {}", e)))
    }

    /// Request a close frame with `code`.
    ///
    /// Only the first call has an effect.
    pub fn close(&self, code: u16) -> Result<(), TransportError> {
        if self.closed.swap(true, Ordering::SeqCst) {
            return Ok(());
        }
        tracing::debug!(code, "Closing connection");
        self.tx
            .send(BusMessage::Close(code))
            .map_err(|e| TransportError::SendFailed(format!("CommandBus close failed: {}", e)))
    }

    pub fn is_closed(&self) -> bool {
        self.closed.load(Ordering::SeqCst)
    }
}

impl OutboundPort for CommandBus {
    fn send(&self, message: ClientMessage) -> Result<(), TransportError> {
        CommandBus::send(self, message)
    }

    fn close(&self, code: u16) -> Result<(), TransportError> {
        CommandBus::close(self, code)
    }
}
