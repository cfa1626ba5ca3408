//! Connect Four Player crate.
//!
//! Client-side session driver for a game whose rules live entirely on a remote
//! authority. The player negotiates a role, forwards column clicks, and renders
//! the events the authority broadcasts. It never decides legality or outcome.

pub mod config;
pub mod error;
pub mod infrastructure;
pub mod ports;
pub mod session;

// Re-export commonly used entrypoints
pub use config::{AmbientTokens, SessionConfig, ShareLinks};
pub use error::{ConfigError, SessionError, TransportError};
pub use session::{ClickTarget, Collaborators, SessionDriver, SessionOutcome, SessionRole};
