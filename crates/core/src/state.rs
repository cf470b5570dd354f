//! Game state carried through a query.

use crate::board::Board;
use serde::{Deserialize, Serialize};

#[derive(Clone, PartialEq, Debug, Serialize, Deserialize)]
pub struct GameState {
    pub board: Board,
    /// Height of each column above the floor.
    pub surface: [i32; 10],
    /// Holes plus half-weighted tuck-setup cells.
    pub adjusted_num_holes: f32,
    pub lines: u32,
    pub level: u32,
}

impl GameState {
    pub fn new(level: u32) -> GameState {
        GameState::from_board(Board::new(), 0, level)
    }

    /// Build a state from raw rows, refreshing the marker planes and
    /// derived fields so external boards can enter a query directly.
    pub fn from_board(mut board: Board, lines: u32, level: u32) -> GameState {
        let summary = board.refresh_markers();
        let surface = board.surface_array();
        GameState {
            board,
            surface,
            adjusted_num_holes: summary.adjusted_holes(),
            lines,
            level,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_state_is_empty() {
        let s = GameState::new(18);
        assert_eq!(s.surface, [0; 10]);
        assert_eq!(s.adjusted_num_holes, 0.0);
        assert_eq!(s.lines, 0);
        assert_eq!(s.level, 18);
    }

    #[test]
    fn test_from_board_derives_fields() {
        let mut board = Board::new();
        for x in 0..Board::WIDTH {
            board.set(x, 18, true);
            board.set(x, 19, true);
        }
        board.set(6, 19, false);
        let s = GameState::from_board(board, 30, 18);
        assert_eq!(s.surface[6], 2);
        assert_eq!(s.surface[0], 2);
        assert!(s.adjusted_num_holes > 0.0);
        assert_eq!(s.lines, 30);
    }
}
