//! Text rendering of the board.

use std::sync::Mutex;

use connect4_protocol::PlayerId;

use crate::ports::outbound::BoardRenderPort;

pub const ROWS: usize = 6;
pub const COLUMNS: usize = 7;

type Grid = [[Option<char>; COLUMNS]; ROWS];

/// Board view that prints itself after every placement.
///
/// Row 0 is the bottom row. The grid only mirrors what the authority reports;
/// it is never consulted to decide anything.
pub struct TerminalBoard {
    cells: Mutex<Grid>,
}

impl TerminalBoard {
    pub fn new() -> Self {
        Self {
            cells: Mutex::new([[None; COLUMNS]; ROWS]),
        }
    }

    /// Render the grid, top row first, with column numbers underneath.
    pub fn render(&self) -> String {
        let cells = self.cells.lock().unwrap_or_else(|p| p.into_inner());
        let mut out = String::new();
        for row in cells.iter().rev() {
            out.push('|');
            for cell in row {
                out.push(cell.unwrap_or('.'));
                out.push('|');
            }
            out.push('\n');
        }
        out.push(' ');
        for column in 0..COLUMNS {
            out.push_str(&column.to_string());
            out.push(' ');
        }
        out.push('\n');
        out
    }
}

impl Default for TerminalBoard {
    fn default() -> Self {
        Self::new()
    }
}

impl BoardRenderPort for TerminalBoard {
    fn create_board(&self) {
        {
            let mut cells = self.cells.lock().unwrap_or_else(|p| p.into_inner());
            *cells = [[None; COLUMNS]; ROWS];
        }
        println!("{}", self.render());
    }

    fn place_move(&self, player: &PlayerId, column: u32, row: u32) {
        let (column, row) = (column as usize, row as usize);
        if column >= COLUMNS || row >= ROWS {
            tracing::warn!(%player, column, row, "Placement outside the board, not drawn");
            return;
        }
        {
            let mut cells = self.cells.lock().unwrap_or_else(|p| p.into_inner());
            cells[row][column] = Some(disc(player));
        }
        println!("{}", self.render());
    }
}

/// Single-character disc for a player: the digit or the name's initial.
fn disc(player: &PlayerId) -> char {
    match player {
        PlayerId::Number(n) => char::from_digit((n % 10) as u32, 10).unwrap_or('?'),
        PlayerId::Name(name) => name
            .chars()
            .next()
            .map(|c| c.to_ascii_uppercase())
            .unwrap_or('?'),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn placements_fill_from_the_bottom_row() {
        let board = TerminalBoard::new();

        board.place_move(&PlayerId::from("red"), 3, 0);
        board.place_move(&PlayerId::from("yellow"), 3, 1);

        let rendered = board.render();
        let lines: Vec<&str> = rendered.lines().collect();
        assert_eq!(lines[ROWS - 1], "|.|.|.|R|.|.|.|");
        assert_eq!(lines[ROWS - 2], "|.|.|.|Y|.|.|.|");
        assert_eq!(lines[ROWS], " 0 1 2 3 4 5 6 ");
    }

    #[test]
    fn numeric_players_use_their_digit() {
        let board = TerminalBoard::new();

        board.place_move(&PlayerId::from(2), 0, 5);

        assert!(board.render().starts_with("|2|.|"));
    }

    #[test]
    fn out_of_range_placement_is_ignored() {
        let board = TerminalBoard::new();
        let before = board.render();

        board.place_move(&PlayerId::from(1), 7, 0);
        board.place_move(&PlayerId::from(1), 0, 6);

        assert_eq!(board.render(), before);
    }

    #[test]
    fn create_board_clears_previous_discs() {
        let board = TerminalBoard::new();
        board.place_move(&PlayerId::from("red"), 0, 0);

        board.create_board();

        assert!(!board.render().contains('R'));
    }
}
