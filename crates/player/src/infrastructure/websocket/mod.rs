//! WebSocket client for the game authority connection
//!
//! - `client`: tokio-tungstenite connection with a dedicated writer task

mod client;

pub use client::{open, InboundFrames, WebSocketConnection};
