use std::sync::atomic::AtomicU8;
use std::sync::Arc;

use connect4_protocol::ClientMessage;

use crate::error::SessionError;
use crate::infrastructure::messaging::{load_session_state, SessionState};
use crate::ports::outbound::OutboundPort;

/// The element a user clicked on the board.
///
/// `column` is the raw column attribute of that element; clicks between
/// columns have none.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ClickTarget {
    pub column: Option<String>,
}

impl ClickTarget {
    pub fn column(attribute: impl Into<String>) -> Self {
        Self {
            column: Some(attribute.into()),
        }
    }

    pub fn outside() -> Self {
        Self::default()
    }
}

/// Turns column clicks into `Play` messages.
///
/// No validation of bounds or turn order happens here: the authority rejects
/// illegal moves with an `error` event.
pub struct InputCapture {
    outbound: Arc<dyn OutboundPort>,
    state: Arc<AtomicU8>,
}

impl InputCapture {
    pub fn new(outbound: Arc<dyn OutboundPort>, state: Arc<AtomicU8>) -> Self {
        Self { outbound, state }
    }

    /// Handle a click. Returns the column sent, or `None` if the click was
    /// ignored.
    pub fn on_click(&self, target: &ClickTarget) -> Result<Option<u32>, SessionError> {
        let Some(attribute) = target.column.as_deref() else {
            return Ok(None);
        };

        let column = match attribute.trim().parse::<u32>() {
            Ok(column) => column,
            Err(_) => {
                tracing::warn!(attribute = %attribute, "Ignoring click with invalid column");
                return Ok(None);
            }
        };

        self.on_user_intent(column)?;
        Ok(Some(column))
    }

    /// Send a move in `column` right away.
    pub fn on_user_intent(&self, column: u32) -> Result<(), SessionError> {
        match load_session_state(&self.state) {
            SessionState::Connecting => return Err(SessionError::NotNegotiated),
            SessionState::Terminated => return Err(SessionError::SessionTerminated),
            SessionState::Negotiated | SessionState::Active => {}
        }

        tracing::debug!(column, "Sending move");
        self.outbound.send(ClientMessage::Play { column })?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use mockall::predicate::eq;

    use super::*;
    use crate::ports::outbound::MockOutboundPort;

    fn capture(outbound: MockOutboundPort, state: SessionState) -> InputCapture {
        InputCapture::new(Arc::new(outbound), Arc::new(AtomicU8::new(state.to_u8())))
    }

    #[test]
    fn click_on_column_sends_one_play() {
        let mut outbound = MockOutboundPort::new();
        outbound
            .expect_send()
            .with(eq(ClientMessage::Play { column: 3 }))
            .times(1)
            .returning(|_| Ok(()));
        let input = capture(outbound, SessionState::Active);

        let sent = input.on_click(&ClickTarget::column("3")).expect("click");

        assert_eq!(sent, Some(3));
    }

    #[test]
    fn click_outside_columns_sends_nothing() {
        let input = capture(MockOutboundPort::new(), SessionState::Active);

        let sent = input.on_click(&ClickTarget::outside()).expect("click");

        assert_eq!(sent, None);
    }

    #[test]
    fn unparsable_column_is_ignored() {
        let input = capture(MockOutboundPort::new(), SessionState::Active);

        for attribute in ["", "left", "-1", "2.5", "3abc"] {
            let sent = input
                .on_click(&ClickTarget::column(attribute))
                .expect("click");
            assert_eq!(sent, None, "{attribute:?}");
        }
    }

    #[test]
    fn out_of_range_columns_are_still_forwarded() {
        let mut outbound = MockOutboundPort::new();
        outbound
            .expect_send()
            .with(eq(ClientMessage::Play { column: 42 }))
            .times(1)
            .returning(|_| Ok(()));
        let input = capture(outbound, SessionState::Active);

        input.on_user_intent(42).expect("forwarded");
    }

    #[test]
    fn no_moves_before_negotiation() {
        let input = capture(MockOutboundPort::new(), SessionState::Connecting);

        let err = input.on_user_intent(0).expect_err("must fail");

        assert!(matches!(err, SessionError::NotNegotiated));
    }

    #[test]
    fn no_moves_after_termination() {
        let input = capture(MockOutboundPort::new(), SessionState::Terminated);

        let err = input
            .on_click(&ClickTarget::column("1"))
            .expect_err("must fail");

        assert!(matches!(err, SessionError::SessionTerminated));
    }
}
