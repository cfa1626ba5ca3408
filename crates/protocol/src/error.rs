//! Decode/encode failures for wire frames.

use thiserror::Error;

/// Error raised when a frame cannot be mapped onto the message vocabulary.
///
/// Every variant is fatal to the session that produced the frame: dropping a
/// frame would leave the client and the authority out of sync.
#[derive(Debug, Error)]
pub enum ProtocolError {
    /// The frame is not valid JSON.
    #[error("Malformed frame: {0}")]
    Malformed(#[source] serde_json::Error),

    /// The frame is JSON but has no string `type` field.
    #[error("Frame has no string `type` field")]
    MissingType,

    /// The `type` field names a variant outside the vocabulary.
    #[error("Unsupported event type: {0}.")]
    UnsupportedEventType(String),

    /// The `type` is known but the variant fields do not match.
    #[error("Invalid `{tag}` payload: {source}")]
    InvalidPayload {
        tag: String,
        #[source]
        source: serde_json::Error,
    },

    /// A binary (non-text) frame arrived on a text-only protocol.
    #[error("Unexpected non-text frame")]
    NonTextFrame,

    /// A message could not be serialized.
    #[error("Failed to encode message: {0}")]
    Encode(#[source] serde_json::Error),
}

impl ProtocolError {
    /// The offending tag, when the failure is tied to one.
    pub fn tag(&self) -> Option<&str> {
        match self {
            ProtocolError::UnsupportedEventType(tag) => Some(tag),
            ProtocolError::InvalidPayload { tag, .. } => Some(tag),
            _ => None,
        }
    }
}
