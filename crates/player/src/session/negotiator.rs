use std::sync::atomic::{AtomicU8, Ordering};

use crate::config::AmbientTokens;
use crate::error::SessionError;
use crate::infrastructure::messaging::{advance_session_state, SessionState};
use crate::ports::outbound::OutboundPort;
use crate::session::SessionRole;

/// Declare this connection's role to the authority.
///
/// Must run exactly once, as soon as the connection can send, and before any
/// other message. The `Connecting → Negotiated` claim is atomic, so a second
/// call fails with [`SessionError::AlreadyNegotiated`] without sending.
///
/// A transmission failure terminates the session; there is no retry.
pub fn negotiate(
    outbound: &dyn OutboundPort,
    tokens: &AmbientTokens,
    state: &AtomicU8,
) -> Result<SessionRole, SessionError> {
    state
        .compare_exchange(
            SessionState::Connecting.to_u8(),
            SessionState::Negotiated.to_u8(),
            Ordering::SeqCst,
            Ordering::SeqCst,
        )
        .map_err(|_| SessionError::AlreadyNegotiated)?;

    let role = SessionRole::resolve(tokens);

    if let Err(e) = outbound.send(role.init_message()) {
        tracing::error!(role = %role, "Failed to send init message: {}", e);
        advance_session_state(state, SessionState::Terminated);
        return Err(e.into());
    }

    tracing::info!(role = %role, "Session negotiated");
    advance_session_state(state, SessionState::Active);
    Ok(role)
}
