use std::sync::atomic::AtomicU8;
use std::sync::Arc;

use connect4_protocol::{PlayerId, ProtocolError, ServerMessage, WireMessage};

use crate::config::ShareLinks;
use crate::error::SessionError;
use crate::infrastructure::messaging::{advance_session_state, load_session_state, SessionState};
use crate::ports::outbound::{OutboundPort, NORMAL_CLOSURE};
use crate::session::{Collaborators, SessionRole};

/// What the caller should do after a frame was routed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Dispatch {
    /// Keep listening
    Continue,
    /// The game ended; the connection has been closed
    Finished { winner: PlayerId },
}

/// Decodes inbound frames and hands each event to its collaborator.
///
/// Holds no board state. Every event is forwarded exactly as the authority
/// sent it.
pub struct EventRouter {
    collaborators: Collaborators,
    outbound: Arc<dyn OutboundPort>,
    links: ShareLinks,
    role: SessionRole,
    state: Arc<AtomicU8>,
}

impl EventRouter {
    pub fn new(
        collaborators: Collaborators,
        outbound: Arc<dyn OutboundPort>,
        links: ShareLinks,
        role: SessionRole,
        state: Arc<AtomicU8>,
    ) -> Self {
        Self {
            collaborators,
            outbound,
            links,
            role,
            state,
        }
    }

    /// Route one inbound text frame.
    ///
    /// Frames must be passed in arrival order. Decode failures are fatal: the
    /// session moves to `Terminated` and no collaborator is called.
    pub fn on_message(&self, raw: &str) -> Result<Dispatch, SessionError> {
        match load_session_state(&self.state) {
            SessionState::Terminated => {
                tracing::warn!(frame = %raw, "Frame received after session terminated");
                return Err(SessionError::FrameAfterTermination);
            }
            SessionState::Connecting => return Err(SessionError::NotNegotiated),
            SessionState::Negotiated | SessionState::Active => {}
        }

        let event = match ServerMessage::decode(raw) {
            Ok(event) => event,
            Err(e) => return Err(self.fail(e)),
        };
        tracing::debug!(event_type = event.tag(), "Routing event");
        if event.is_terminal() {
            // Nothing may be dispatched once the terminal event is in
            advance_session_state(&self.state, SessionState::Terminated);
        }

        match event {
            ServerMessage::Init { join, watch } => {
                self.share_links(&join, watch.as_deref());
                Ok(Dispatch::Continue)
            }
            ServerMessage::Play {
                player,
                column,
                row,
            } => {
                self.collaborators.board.place_move(&player, column, row);
                Ok(Dispatch::Continue)
            }
            ServerMessage::Win { player } => {
                // Any placement for the winning move has already been rendered:
                // frames are routed one at a time, in order.
                self.collaborators
                    .notifier
                    .show_message(&format!("Player {} wins!", player));
                tracing::info!(winner = %player, "Game over");
                self.outbound.close(NORMAL_CLOSURE)?;
                Ok(Dispatch::Finished { winner: player })
            }
            ServerMessage::Error { message } => {
                tracing::info!(message = %message, "Action rejected by server");
                self.collaborators.notifier.show_message(&message);
                Ok(Dispatch::Continue)
            }
        }
    }

    /// Terminate the session because of a protocol violation.
    pub fn fail(&self, error: ProtocolError) -> SessionError {
        tracing::error!(
            tag = error.tag().unwrap_or("-"),
            "Protocol violation, terminating session: {}",
            error
        );
        advance_session_state(&self.state, SessionState::Terminated);
        SessionError::Protocol(error)
    }

    fn share_links(&self, join: &str, watch: Option<&str>) {
        if !self.role.is_initiator() {
            tracing::warn!(role = %self.role, "Received game tokens while not the initiator");
        }
        self.collaborators
            .links
            .set_join_link(&self.links.join_link(join));
        if let Some(watch) = watch {
            self.collaborators
                .links
                .set_watch_link(&self.links.watch_link(watch));
        }
    }
}
