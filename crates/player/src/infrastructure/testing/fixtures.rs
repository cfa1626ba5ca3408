//! Simple test fixtures used across unit tests.

use connect4_protocol::{PlayerId, ServerMessage, WireMessage};

/// An inbound `play` frame as the authority would send it.
pub fn play_frame(player: &str, column: u32, row: u32) -> String {
    server_frame(ServerMessage::Play {
        player: PlayerId::from(player),
        column,
        row,
    })
}

/// An inbound `win` frame.
pub fn win_frame(player: &str) -> String {
    server_frame(ServerMessage::Win {
        player: PlayerId::from(player),
    })
}

fn server_frame(message: ServerMessage) -> String {
    message.encode().expect("fixture messages always encode")
}
