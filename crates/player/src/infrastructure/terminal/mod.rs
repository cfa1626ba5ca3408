//! Terminal front-end
//!
//! Implementations of the UI ports that draw to stdout, used by the
//! `connect4-player` binary.

mod board;
mod links;
mod notifier;

pub use board::{TerminalBoard, COLUMNS, ROWS};
pub use links::TerminalLinks;
pub use notifier::TerminalNotifier;
