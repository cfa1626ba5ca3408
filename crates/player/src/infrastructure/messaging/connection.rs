//! Session lifecycle state.
//!
//! `CONNECTING → NEGOTIATED → ACTIVE → TERMINATED`. Transitions only move
//! forward; nothing leaves `Terminated`.

use std::sync::atomic::{AtomicU8, Ordering};
use std::sync::Arc;

/// Lifecycle state of a game session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum SessionState {
    /// Connection not yet negotiated
    Connecting,
    /// `Init` has been sent
    Negotiated,
    /// Routing events and forwarding user intents
    Active,
    /// Win received, fatal error, or connection lost
    Terminated,
}

impl SessionState {
    /// Convert to u8 for atomic storage.
    pub fn to_u8(self) -> u8 {
        match self {
            SessionState::Connecting => 0,
            SessionState::Negotiated => 1,
            SessionState::Active => 2,
            SessionState::Terminated => 3,
        }
    }

    /// Convert from u8 (atomic storage).
    pub fn from_u8(v: u8) -> Self {
        match v {
            0 => SessionState::Connecting,
            1 => SessionState::Negotiated,
            2 => SessionState::Active,
            _ => SessionState::Terminated,
        }
    }

    pub fn is_terminated(self) -> bool {
        self == SessionState::Terminated
    }
}

/// Read the current state.
pub fn load_session_state(state_ref: &AtomicU8) -> SessionState {
    SessionState::from_u8(state_ref.load(Ordering::SeqCst))
}

/// Move the session forward to `new_state`.
///
/// Returns false (and leaves the state alone) if that would move it backwards.
pub fn advance_session_state(state_ref: &AtomicU8, new_state: SessionState) -> bool {
    state_ref
        .fetch_update(Ordering::SeqCst, Ordering::SeqCst, |current| {
            (SessionState::from_u8(current) <= new_state).then_some(new_state.to_u8())
        })
        .is_ok()
}

/// Observable session state for UI binding.
///
/// Multiple observers can share the same underlying state; none of them can
/// change it.
#[derive(Clone)]
pub struct SessionStateObserver {
    state: Arc<AtomicU8>,
}

impl SessionStateObserver {
    /// Create a new observer from a shared state Arc.
    pub fn new(state: Arc<AtomicU8>) -> Self {
        Self { state }
    }

    /// Get the current session state.
    pub fn state(&self) -> SessionState {
        load_session_state(&self.state)
    }

    pub fn is_terminated(&self) -> bool {
        self.state().is_terminated()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_session_state_roundtrip() {
        let states = [
            SessionState::Connecting,
            SessionState::Negotiated,
            SessionState::Active,
            SessionState::Terminated,
        ];

        for state in states {
            assert_eq!(SessionState::from_u8(state.to_u8()), state);
        }
    }

    #[test]
    fn test_state_only_moves_forward() {
        let state = AtomicU8::new(SessionState::Connecting.to_u8());

        assert!(advance_session_state(&state, SessionState::Negotiated));
        assert!(advance_session_state(&state, SessionState::Active));
        assert!(advance_session_state(&state, SessionState::Terminated));
        assert!(!advance_session_state(&state, SessionState::Active));
        assert_eq!(load_session_state(&state), SessionState::Terminated);
    }

    #[test]
    fn test_observer_reads_state() {
        let state = Arc::new(AtomicU8::new(SessionState::Connecting.to_u8()));
        let observer = SessionStateObserver::new(Arc::clone(&state));

        assert_eq!(observer.state(), SessionState::Connecting);
        assert!(!observer.is_terminated());

        advance_session_state(&state, SessionState::Terminated);

        assert!(observer.is_terminated());
    }
}
