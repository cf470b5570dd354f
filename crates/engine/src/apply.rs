//! Advancing a game state by a lock placement.

use quicktap_core::{Board, GameState, LockPlacement};

/// NES level progression: the starting levels hold through their transition
/// line targets, then the level rises on every crossed multiple of ten.
pub fn level_after_clears(level: u32, lines: u32, cleared: u32) -> u32 {
    if level == 18 && lines < 126 {
        return 18;
    }
    if level == 19 && lines < 136 {
        return 19;
    }
    if level == 29 && lines < 196 {
        return 29;
    }
    if (lines % 10) + cleared >= 10 {
        level + 1
    } else {
        level
    }
}

/// Stamp the placement onto the board, clear full rows, and rebuild the
/// surface array, marker planes, and hole count of the resulting state.
pub fn advance_game_state(state: &GameState, placement: &LockPlacement) -> GameState {
    let mut board = state.board.clone();
    let orientation = &placement.piece.orientations()[placement.rotation];
    for (c, r) in orientation.cells() {
        let x = placement.x + c;
        let y = placement.y + r;
        if (0..Board::WIDTH as i32).contains(&x) && (0..Board::HEIGHT as i32).contains(&y) {
            board.set(x as usize, y as usize, true);
        }
    }

    let cleared = board.clear_lines() as u32;
    let lines = state.lines + cleared;
    let level = level_after_clears(state.level, state.lines, cleared);
    GameState::from_board(board, lines, level)
}

#[cfg(test)]
mod tests {
    use super::*;
    use quicktap_core::Piece;

    #[test]
    fn test_advance_stamps_piece_and_updates_surface() {
        let state = GameState::new(18);
        let placement = LockPlacement::new(Piece::T, 3, 17, 0);
        let next = advance_game_state(&state, &placement);
        assert!(next.board.get(4, 18));
        assert!(next.board.get(5, 18));
        assert!(next.board.get(6, 18));
        assert!(next.board.get(5, 19));
        assert_eq!(next.surface[4], 2);
        assert_eq!(next.surface[5], 2);
        assert_eq!(next.surface[6], 2);
        assert_eq!(next.lines, 0);
        assert_eq!(next.adjusted_num_holes, 0.0);
    }

    #[test]
    fn test_advance_clears_lines() {
        let mut board = Board::new();
        for x in 0..Board::WIDTH {
            if !(4..=7).contains(&x) {
                board.set(x, 19, true);
            }
        }
        let state = GameState::from_board(board, 8, 18);
        // Flat I fills columns 4..=7 of the bottom row.
        let placement = LockPlacement::new(Piece::I, 4, 17, 0);
        let next = advance_game_state(&state, &placement);
        assert_eq!(next.lines, 9);
        assert_eq!(next.surface, [0; 10]);
        assert_eq!(next.level, 18);
    }

    #[test]
    fn test_advance_counts_new_holes() {
        let state = GameState::new(18);
        // An S piece flat on the floor covers (1, 19) only via its lower
        // row; the cell under its upper-row overhang stays empty.
        let placement = LockPlacement::new(Piece::S, 1, 17, 0);
        let next = advance_game_state(&state, &placement);
        assert!(next.adjusted_num_holes > 0.0);
    }

    #[test]
    fn test_level_transition_table() {
        assert_eq!(level_after_clears(18, 124, 1), 18);
        assert_eq!(level_after_clears(18, 124, 2), 18);
        assert_eq!(level_after_clears(18, 126, 4), 19);
        assert_eq!(level_after_clears(19, 130, 4), 19);
        assert_eq!(level_after_clears(19, 138, 4), 20);
        assert_eq!(level_after_clears(20, 146, 4), 21);
        assert_eq!(level_after_clears(20, 142, 4), 20);
        assert_eq!(level_after_clears(29, 190, 4), 29);
        assert_eq!(level_after_clears(29, 196, 4), 30);
    }
}
