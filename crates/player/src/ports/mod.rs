//! Player port definitions.
//!
//! Ports are the seams between the session core and everything it does not
//! own: the socket, the board view, the link-sharing widget and user
//! notifications.

pub mod outbound;
