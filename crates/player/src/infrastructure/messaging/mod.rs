//! Session state and outbound messaging infrastructure.
//!
//! - `CommandBus`: Queue messages for the WebSocket writer task
//! - `SessionState`: Lifecycle of the session, observable from the UI
//!
//! The WebSocket module connects the bus to the actual transport.

pub mod command_bus;
pub mod connection;

pub use command_bus::{BusMessage, CommandBus};
pub use connection::{
    advance_session_state, load_session_state, SessionState, SessionStateObserver,
};
