//! Board Render Port - The graphical board the session renders into

use connect4_protocol::PlayerId;

/// Port for the board view
///
/// The view only draws what it is told. It never decides legality or where a
/// disc lands; `row` always comes from the authority.
#[cfg_attr(any(test, feature = "testing"), mockall::automock)]
pub trait BoardRenderPort: Send + Sync {
    /// One-time setup of an empty board
    fn create_board(&self);

    /// Render one authoritative placement
    fn place_move(&self, player: &PlayerId, column: u32, row: u32);
}
