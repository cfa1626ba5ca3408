use std::sync::atomic::AtomicU8;
use std::sync::Arc;

use connect4_protocol::{PlayerId, ProtocolError};
use futures_util::{Stream, StreamExt};
use tokio::sync::{mpsc, oneshot};
use tokio_tungstenite::tungstenite::{Error as WsError, Message};

use crate::config::SessionConfig;
use crate::error::{SessionError, TransportError};
use crate::infrastructure::messaging::{
    advance_session_state, SessionState, SessionStateObserver,
};
use crate::infrastructure::websocket;
use crate::ports::outbound::{
    BoardRenderPort, LinkSharingPort, NotificationPort, OutboundPort, NORMAL_CLOSURE,
    PROTOCOL_ERROR_CLOSURE,
};
use crate::session::{negotiate, ClickTarget, Dispatch, EventRouter, InputCapture, SessionRole};

/// UI collaborators the session renders into.
#[derive(Clone)]
pub struct Collaborators {
    pub board: Arc<dyn BoardRenderPort>,
    pub links: Arc<dyn LinkSharingPort>,
    pub notifier: Arc<dyn NotificationPort>,
}

/// How a completed session ended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionOutcome {
    pub role: SessionRole,
    pub winner: PlayerId,
}

/// Runs one session over a live WebSocket.
///
/// All work happens on the task that calls [`SessionDriver::run`]: inbound
/// frames and user clicks are interleaved with `select!`, never processed
/// concurrently.
pub struct SessionDriver {
    config: SessionConfig,
    collaborators: Collaborators,
    state: Arc<AtomicU8>,
}

impl SessionDriver {
    pub fn new(config: SessionConfig, collaborators: Collaborators) -> Self {
        Self {
            config,
            collaborators,
            state: Arc::new(AtomicU8::new(SessionState::Connecting.to_u8())),
        }
    }

    /// Observe the session state (for UI binding).
    pub fn state_observer(&self) -> SessionStateObserver {
        SessionStateObserver::new(Arc::clone(&self.state))
    }

    /// Connect, negotiate, and route events until the game ends.
    ///
    /// Returns the winner on a `win` event. Every other way out (connect
    /// failure, protocol violation, lost connection) is an error, and the
    /// session is `Terminated` either way.
    pub async fn run(
        self,
        mut intents: mpsc::Receiver<ClickTarget>,
    ) -> Result<SessionOutcome, SessionError> {
        self.collaborators.board.create_board();

        let mut connection = match websocket::open(&self.config.server_url).await {
            Ok(connection) => connection,
            Err(e) => {
                tracing::error!("Failed to connect to game server: {}", e);
                advance_session_state(&self.state, SessionState::Terminated);
                return Err(e.into());
            }
        };

        let outbound: Arc<dyn OutboundPort> = Arc::new(connection.command_bus.clone());
        let result = self
            .drive(
                outbound,
                &mut connection.inbound,
                &mut intents,
                &mut connection.write_failure,
            )
            .await;

        advance_session_state(&self.state, SessionState::Terminated);
        let code = match &result {
            Err(SessionError::Protocol(_)) => PROTOCOL_ERROR_CLOSURE,
            _ => NORMAL_CLOSURE,
        };
        if let Err(e) = connection.command_bus.close(code) {
            tracing::debug!("Close after session end failed: {}", e);
        }
        connection.finish().await;

        result
    }

    async fn drive<S>(
        &self,
        outbound: Arc<dyn OutboundPort>,
        inbound: &mut S,
        intents: &mut mpsc::Receiver<ClickTarget>,
        write_failure: &mut oneshot::Receiver<TransportError>,
    ) -> Result<SessionOutcome, SessionError>
    where
        S: Stream<Item = Result<Message, WsError>> + Unpin,
    {
        let role = negotiate(outbound.as_ref(), &self.config.tokens, &self.state)?;

        let router = EventRouter::new(
            self.collaborators.clone(),
            Arc::clone(&outbound),
            self.config.share_links(),
            role.clone(),
            Arc::clone(&self.state),
        );
        let input = InputCapture::new(outbound, Arc::clone(&self.state));

        // Queued sends succeed before they reach the socket; the writer reports
        // what actually failed here.
        let mut writer_running = true;
        loop {
            tokio::select! {
                failure = &mut *write_failure, if writer_running => {
                    match failure {
                        Ok(e) => {
                            tracing::error!("Lost the outbound side of the connection: {}", e);
                            return Err(e.into());
                        }
                        Err(_) => writer_running = false,
                    }
                }
                frame = inbound.next() => {
                    let text = match frame {
                        Some(Ok(Message::Text(text))) => text,
                        Some(Ok(Message::Binary(_))) => {
                            return Err(router.fail(ProtocolError::NonTextFrame));
                        }
                        Some(Ok(Message::Close(frame))) => {
                            tracing::warn!(?frame, "Server closed the connection");
                            return Err(SessionError::ConnectionClosed);
                        }
                        Some(Ok(_)) => continue,
                        Some(Err(e)) => {
                            tracing::error!("WebSocket error: {}", e);
                            return Err(TransportError::Receive(e).into());
                        }
                        None => return Err(SessionError::ConnectionClosed),
                    };

                    if let Dispatch::Finished { winner } = router.on_message(&text)? {
                        return Ok(SessionOutcome { role, winner });
                    }
                }
                Some(target) = intents.recv() => {
                    input.on_click(&target)?;
                }
            }
        }
    }
}
