//! collision detection - walls, floor, and the stack

use quicktap_core::{shift_row, Board, Piece};

/// Does the piece at (x, y, rotation) overlap the stack, poke below the
/// floor, or cross a wall? Checks the floor bound first, then the walls,
/// then the four mask rows against the board. Rows above the ceiling are
/// never collisions.
pub fn collides(board: &Board, piece: Piece, x: i32, y: i32, rotation: usize) -> bool {
    let orientation = &piece.orientations()[rotation];
    if y > orientation.max_y as i32 {
        return true;
    }
    if x < orientation.min_x as i32 || x > orientation.max_x as i32 {
        return true;
    }
    for r in 0..4i32 {
        let row_y = y + r;
        if row_y < 0 {
            continue;
        }
        let mask = orientation.rows[r as usize];
        if mask == 0 {
            continue;
        }
        if shift_row(mask, x) & board.cells(row_y as usize) != 0 {
            return true;
        }
    }
    false
}

/// can we place here? (just !collides)
pub fn can_place(board: &Board, piece: Piece, x: i32, y: i32, rotation: usize) -> bool {
    !collides(board, piece, x, y, rotation)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_collision_on_empty_board() {
        let board = Board::new();
        // J at spawn, and far above the ceiling.
        assert!(!collides(&board, Piece::J, 3, -1, 0));
        assert!(!collides(&board, Piece::J, 3, -10, 0));
    }

    #[test]
    fn test_collision_past_floor_bound() {
        let board = Board::new();
        assert!(collides(&board, Piece::J, 3, 22, 0));
        // J rotation 0 reaches frame row 2, so y = 17 is the last legal row.
        assert!(!collides(&board, Piece::J, 3, 17, 0));
        assert!(collides(&board, Piece::J, 3, 18, 0));
    }

    #[test]
    fn test_collision_with_walls() {
        let board = Board::new();
        // T rotation 0 occupies frame columns 1..=3.
        assert!(!collides(&board, Piece::T, -1, 5, 0));
        assert!(collides(&board, Piece::T, -2, 5, 0));
        assert!(!collides(&board, Piece::T, 6, 5, 0));
        assert!(collides(&board, Piece::T, 7, 5, 0));
    }

    #[test]
    fn test_collision_with_stack() {
        let mut board = Board::new();
        board.set(5, 11, true);
        // T rotation 0 at x = 3 covers columns 4..=6 on row y + 1 and
        // column 5 on row y + 2.
        assert!(collides(&board, Piece::T, 3, 10, 0));
        assert!(collides(&board, Piece::T, 3, 9, 0));
        assert!(!collides(&board, Piece::T, 3, 8, 0));
        assert!(!collides(&board, Piece::T, 0, 10, 0));
    }

    #[test]
    fn test_marker_bits_do_not_collide() {
        let mut rows = [0u32; 20];
        rows[11] = quicktap_core::tuck_setup_bit(5) | quicktap_core::hole_bit(5);
        let board = Board::from_rows(rows);
        assert!(!collides(&board, Piece::T, 3, 10, 0));
    }
}
