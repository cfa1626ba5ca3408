//! WebSocket message types for Player-authority communication
//!
//! Every frame is a JSON object with a mandatory string `type` field naming the
//! variant, plus the variant's own fields. The Player sends `ClientMessage` and
//! receives `ServerMessage`; an authority does the opposite.
//!
//! ## Compatibility Policy
//!
//! - Unknown fields are tolerated (ignored on decode)
//! - Unknown `type` values are rejected; there is no catch-all variant
//! - There is no schema version; renaming a variant is a breaking change

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::ProtocolError;
use crate::types::PlayerId;

// =============================================================================
// Client Messages (Player → authority)
// =============================================================================

/// Messages from client (Player) to the authority
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum ClientMessage {
    /// Role declaration, always the first message on a connection.
    ///
    /// At most one of the tokens is set: `join` for a joiner, `watch` for a
    /// watcher, neither for the player starting a new game.
    Init {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        join: Option<String>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        watch: Option<String>,
    },
    /// Drop a disc in a zero-based column
    Play { column: u32 },
}

// =============================================================================
// Server Messages (authority → Player)
// =============================================================================

/// Events from the authority to the client
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum ServerMessage {
    /// Tokens for a newly created game
    Init {
        join: String,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        watch: Option<String>,
    },
    /// Authoritative placement of a move
    Play {
        player: PlayerId,
        column: u32,
        row: u32,
    },
    /// The game is over; terminal
    Win { player: PlayerId },
    /// A rejected action; the session continues
    Error { message: String },
}

// =============================================================================
// Framing
// =============================================================================

/// A message type that travels as one JSON text frame.
pub trait WireMessage: Serialize + DeserializeOwned + Sized {
    /// Every `type` value this message type can carry.
    const TAGS: &'static [&'static str];

    /// The `type` value of this particular message.
    fn tag(&self) -> &'static str;

    /// Serialize to a JSON text frame.
    fn encode(&self) -> Result<String, ProtocolError> {
        serde_json::to_string(self).map_err(ProtocolError::Encode)
    }

    /// Strictly decode a JSON text frame.
    ///
    /// Unknown tags are reported by name instead of being folded into a
    /// generic serde error, so callers can surface exactly what was refused.
    fn decode(text: &str) -> Result<Self, ProtocolError> {
        let value: Value = serde_json::from_str(text).map_err(ProtocolError::Malformed)?;

        let tag = match value.get("type") {
            Some(Value::String(tag)) => tag.clone(),
            _ => return Err(ProtocolError::MissingType),
        };

        if !Self::TAGS.contains(&tag.as_str()) {
            return Err(ProtocolError::UnsupportedEventType(tag));
        }

        serde_json::from_value(value)
            .map_err(|source| ProtocolError::InvalidPayload { tag, source })
    }
}

impl WireMessage for ClientMessage {
    const TAGS: &'static [&'static str] = &["init", "play"];

    fn tag(&self) -> &'static str {
        match self {
            ClientMessage::Init { .. } => "init",
            ClientMessage::Play { .. } => "play",
        }
    }
}

impl WireMessage for ServerMessage {
    const TAGS: &'static [&'static str] = &["init", "play", "win", "error"];

    fn tag(&self) -> &'static str {
        match self {
            ServerMessage::Init { .. } => "init",
            ServerMessage::Play { .. } => "play",
            ServerMessage::Win { .. } => "win",
            ServerMessage::Error { .. } => "error",
        }
    }
}

impl ServerMessage {
    /// Whether no further events are expected after this one.
    pub fn is_terminal(&self) -> bool {
        matches!(self, ServerMessage::Win { .. })
    }
}

#[cfg(test)]
mod serde_tests {
    use super::{ClientMessage, ServerMessage, WireMessage};
    use crate::error::ProtocolError;
    use crate::types::PlayerId;

    #[test]
    fn initiator_init_has_no_token_fields() {
        let msg = ClientMessage::Init {
            join: None,
            watch: None,
        };

        assert_eq!(msg.encode().expect("encode"), r#"{"type":"init"}"#);
    }

    #[test]
    fn joiner_init_carries_join_token() {
        let msg = ClientMessage::Init {
            join: Some("abc".to_string()),
            watch: None,
        };

        let value: serde_json::Value =
            serde_json::from_str(&msg.encode().expect("encode")).expect("json");
        assert_eq!(value, serde_json::json!({"type": "init", "join": "abc"}));
    }

    #[test]
    fn play_encodes_column_as_integer() {
        let msg = ClientMessage::Play { column: 3 };

        let value: serde_json::Value =
            serde_json::from_str(&msg.encode().expect("encode")).expect("json");
        assert_eq!(value, serde_json::json!({"type": "play", "column": 3}));
    }

    #[test]
    fn client_messages_survive_encode_then_decode() {
        let messages = [
            ClientMessage::Init {
                join: None,
                watch: Some("w4tch".to_string()),
            },
            ClientMessage::Play { column: 6 },
        ];

        for msg in messages {
            let decoded = ClientMessage::decode(&msg.encode().expect("encode")).expect("decode");
            assert_eq!(decoded, msg);
        }
    }

    #[test]
    fn server_messages_survive_encode_then_decode() {
        let messages = [
            ServerMessage::Init {
                join: "j".to_string(),
                watch: Some("w".to_string()),
            },
            ServerMessage::Play {
                player: PlayerId::from("red"),
                column: 2,
                row: 5,
            },
            ServerMessage::Win {
                player: PlayerId::from(2),
            },
            ServerMessage::Error {
                message: "Illegal move".to_string(),
            },
        ];

        for msg in messages {
            let decoded = ServerMessage::decode(&msg.encode().expect("encode")).expect("decode");
            assert_eq!(decoded, msg);
        }
    }

    #[test]
    fn decodes_play_fields_unmodified() {
        let msg = ServerMessage::decode(r#"{"type":"play","player":1,"column":2,"row":0}"#)
            .expect("decode");

        assert_eq!(
            msg,
            ServerMessage::Play {
                player: PlayerId::Number(1),
                column: 2,
                row: 0,
            }
        );
    }

    #[test]
    fn init_without_watch_token_is_accepted() {
        let msg = ServerMessage::decode(r#"{"type":"init","join":"k3y"}"#).expect("decode");

        assert_eq!(
            msg,
            ServerMessage::Init {
                join: "k3y".to_string(),
                watch: None,
            }
        );
    }

    #[test]
    fn unknown_fields_are_tolerated() {
        let msg = ServerMessage::decode(r#"{"type":"error","message":"nope","code":7}"#)
            .expect("decode");

        assert_eq!(
            msg,
            ServerMessage::Error {
                message: "nope".to_string()
            }
        );
    }

    #[test]
    fn unknown_type_is_reported_by_name() {
        let err = ServerMessage::decode(r#"{"type":"resign"}"#).expect_err("must fail");

        assert!(matches!(err, ProtocolError::UnsupportedEventType(ref tag) if tag == "resign"));
        assert_eq!(err.to_string(), "Unsupported event type: resign.");
        assert_eq!(err.tag(), Some("resign"));
    }

    #[test]
    fn client_tags_are_not_server_tags() {
        let err = ClientMessage::decode(r#"{"type":"win","player":1}"#).expect_err("must fail");

        assert!(matches!(err, ProtocolError::UnsupportedEventType(ref tag) if tag == "win"));
    }

    #[test]
    fn missing_or_non_string_type_is_rejected() {
        for frame in [r#"{"player":1}"#, r#"{"type":3}"#, "[1,2]", "\"play\""] {
            let err = ServerMessage::decode(frame).expect_err("must fail");
            assert!(matches!(err, ProtocolError::MissingType), "{frame}: {err:?}");
        }
    }

    #[test]
    fn malformed_json_is_rejected() {
        let err = ServerMessage::decode("{\"type\":").expect_err("must fail");

        assert!(matches!(err, ProtocolError::Malformed(_)));
    }

    #[test]
    fn known_type_with_wrong_fields_is_rejected() {
        let err = ServerMessage::decode(r#"{"type":"play","player":1,"column":-1,"row":0}"#)
            .expect_err("must fail");

        assert!(matches!(err, ProtocolError::InvalidPayload { ref tag, .. } if tag == "play"));
    }

    #[test]
    fn only_win_is_terminal() {
        assert!(ServerMessage::Win {
            player: PlayerId::from(1)
        }
        .is_terminal());
        assert!(!ServerMessage::Error {
            message: String::new()
        }
        .is_terminal());
    }
}
