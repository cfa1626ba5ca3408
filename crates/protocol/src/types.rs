//! Shared value types used inside messages.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Identifier of a player as assigned by the authority.
///
/// The authority owns player assignment and may name players with integers
/// (`1`, `2`) or colours (`"red"`, `"yellow"`). The client never interprets the
/// value; it only renders it, so both forms are kept exactly as received.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum PlayerId {
    Number(u64),
    Name(String),
}

impl fmt::Display for PlayerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PlayerId::Number(n) => write!(f, "{}", n),
            PlayerId::Name(name) => f.write_str(name),
        }
    }
}

impl From<u64> for PlayerId {
    fn from(value: u64) -> Self {
        PlayerId::Number(value)
    }
}

impl From<&str> for PlayerId {
    fn from(value: &str) -> Self {
        PlayerId::Name(value.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::PlayerId;

    #[test]
    fn numeric_and_named_ids_keep_their_wire_form() {
        let numeric: PlayerId = serde_json::from_str("1").expect("numeric id");
        let named: PlayerId = serde_json::from_str("\"red\"").expect("named id");

        assert_eq!(numeric, PlayerId::Number(1));
        assert_eq!(named, PlayerId::Name("red".to_string()));
        assert_eq!(serde_json::to_string(&numeric).expect("serialize"), "1");
        assert_eq!(serde_json::to_string(&named).expect("serialize"), "\"red\"");
    }

    #[test]
    fn display_renders_raw_value() {
        assert_eq!(PlayerId::from(2).to_string(), "2");
        assert_eq!(PlayerId::from("yellow").to_string(), "yellow");
    }
}
