//! Connect Four Protocol - Shared types for Player and authority communication
//!
//! This crate contains the closed message vocabulary exchanged over the game
//! WebSocket:
//! - Outbound messages (`ClientMessage`): session negotiation and moves
//! - Inbound events (`ServerMessage`): link tokens, placements, win, errors
//! - Strict decoding (`WireMessage::decode`) that fails loudly on unknown tags
//!
//! # Design Principles
//!
//! 1. **Minimal dependencies** - Only serde, serde_json, and thiserror
//! 2. **No game logic** - Pure data types and serialization
//! 3. **Symmetric schema** - Whatever one side encodes, the other side decodes

pub mod error;
pub mod messages;
pub mod types;

pub use error::ProtocolError;
pub use messages::{ClientMessage, ServerMessage, WireMessage};
pub use types::PlayerId;
