use std::fmt;

use connect4_protocol::ClientMessage;

use crate::config::AmbientTokens;

/// Role of this connection, fixed for its whole lifetime.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionRole {
    /// Starts a new game
    Initiator,
    /// Enters an existing game as the second player
    Joiner { join: String },
    /// Observes an existing game
    Watcher { watch: String },
}

impl SessionRole {
    /// Resolve the role from ambient tokens.
    ///
    /// Precedence is join > watch > initiator. Both tokens being present is
    /// not expected; the watch token is discarded and the anomaly logged.
    pub fn resolve(tokens: &AmbientTokens) -> Self {
        match (&tokens.join, &tokens.watch) {
            (Some(join), Some(watch)) => {
                tracing::warn!(
                    join = %join,
                    watch = %watch,
                    "Both join and watch tokens supplied; joining and ignoring the watch token"
                );
                SessionRole::Joiner { join: join.clone() }
            }
            (Some(join), None) => SessionRole::Joiner { join: join.clone() },
            (None, Some(watch)) => SessionRole::Watcher {
                watch: watch.clone(),
            },
            (None, None) => SessionRole::Initiator,
        }
    }

    /// The negotiation message declaring this role.
    pub fn init_message(&self) -> ClientMessage {
        match self {
            SessionRole::Initiator => ClientMessage::Init {
                join: None,
                watch: None,
            },
            SessionRole::Joiner { join } => ClientMessage::Init {
                join: Some(join.clone()),
                watch: None,
            },
            SessionRole::Watcher { watch } => ClientMessage::Init {
                join: None,
                watch: Some(watch.clone()),
            },
        }
    }

    pub fn is_initiator(&self) -> bool {
        matches!(self, SessionRole::Initiator)
    }
}

impl fmt::Display for SessionRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SessionRole::Initiator => f.write_str("initiator"),
            SessionRole::Joiner { .. } => f.write_str("joiner"),
            SessionRole::Watcher { .. } => f.write_str("watcher"),
        }
    }
}
