use crate::ports::outbound::LinkSharingPort;

/// Prints shareable links for the player to copy.
#[derive(Debug, Clone, Copy, Default)]
pub struct TerminalLinks;

impl LinkSharingPort for TerminalLinks {
    fn set_join_link(&self, link: &str) {
        println!("Share this link to invite a second player: {}", link);
    }

    fn set_watch_link(&self, link: &str) {
        println!("Share this link with spectators: {}", link);
    }
}
