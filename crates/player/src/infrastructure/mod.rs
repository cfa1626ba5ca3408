pub mod messaging;
pub mod terminal;
pub mod websocket;

#[cfg(any(test, feature = "testing"))]
pub mod testing {
    pub mod fixtures;
}

// Re-export messaging types
pub use messaging::{CommandBus, SessionState, SessionStateObserver};
