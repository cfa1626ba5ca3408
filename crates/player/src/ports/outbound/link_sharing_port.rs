//! Link Sharing Port - Shareable join/watch links for a new game

/// Port for the link-sharing widget
#[cfg_attr(any(test, feature = "testing"), mockall::automock)]
pub trait LinkSharingPort: Send + Sync {
    /// Set the link a second player opens to join the game
    fn set_join_link(&self, link: &str);

    /// Set the link spectators open to watch the game
    fn set_watch_link(&self, link: &str);
}
