//! Tuck search: placements that slip under an overhang with one extra
//! input after the piece has already passed beneath it.
//!
//! Works backwards from the marked overhang cells: every way the piece
//! could fill one is a candidate, and a candidate survives when some single
//! input, undone, leaves a pose the straight-drop search could have reached.

use std::collections::HashSet;

use quicktap_core::{
    tuck_setup_bit, Board, LockPlacement, Piece, SimState, TuckInput, ALL_TUCK_SETUP_BITS, SPAWN_X,
};

use crate::collision::collides;
use crate::movegen::tuck_col_index;

pub(crate) fn find_tucks(
    board: &Board,
    piece: Piece,
    tuck_cols: &[i32; 40],
    min_y_by_inputs: &[i32; 7],
    placements: &mut Vec<LockPlacement>,
) {
    let mut seen_lock_spots: HashSet<i32> = HashSet::new();
    for overhang_y in 0..Board::HEIGHT {
        if board.row(overhang_y) & ALL_TUCK_SETUP_BITS == 0 {
            continue;
        }
        for overhang_x in 0..Board::WIDTH {
            if board.row(overhang_y) & tuck_setup_bit(overhang_x) == 0 {
                continue;
            }
            tracing::trace!(overhang_x, overhang_y, "searching tucks under overhang");
            for (rotation, orientation) in piece.orientations().iter().enumerate() {
                for (cell_x, cell_y) in orientation.cells() {
                    let piece_x = overhang_x as i32 - cell_x;
                    let post_tuck_y = overhang_y as i32 - cell_y;
                    if collides(board, piece, piece_x, post_tuck_y, rotation) {
                        continue;
                    }
                    // The piece fits; let it fall the rest of the way.
                    let mut lock_y = post_tuck_y;
                    while !collides(board, piece, piece_x, lock_y + 1, rotation) {
                        lock_y += 1;
                    }
                    let lock_spot = lock_y * 1000 + piece_x * 10 + rotation as i32;
                    if seen_lock_spots.contains(&lock_spot) {
                        continue;
                    }
                    let after_tuck = SimState {
                        piece,
                        x: piece_x,
                        y: post_tuck_y,
                        rotation,
                        frame: 0,
                        arr: 0,
                    };
                    if let Some(input) =
                        find_tuck_input(board, after_tuck, tuck_cols, min_y_by_inputs)
                    {
                        placements.push(
                            LockPlacement::new(piece, piece_x, lock_y, rotation).with_tuck(input),
                        );
                        seen_lock_spots.insert(lock_spot);
                    }
                }
            }
        }
    }
}

/// Find an input whose reversal leads from the post-tuck pose back to a
/// pose the piece can actually fall in. The input order goes shift, then
/// rotate, then drop, so the pose must survive with the pre-tuck rotation
/// both at the post-tuck x and at the pre-tuck x.
fn find_tuck_input(
    board: &Board,
    after: SimState,
    tuck_cols: &[i32; 40],
    min_y_by_inputs: &[i32; 7],
) -> Option<TuckInput> {
    let num_orientations = after.piece.num_orientations() as i32;
    for input in TuckInput::ALL {
        let pre_x = after.x - input.x_change();
        let pre_rotation = (after.rotation as i32 - input.rotation_change())
            .rem_euclid(num_orientations) as usize;

        if !(-2..=7).contains(&pre_x) {
            continue; // outside the reachability table
        }
        let rotations_before = if pre_rotation == 3 { 1 } else { pre_rotation };
        let inputs_before = rotations_before.max((pre_x - SPAWN_X).unsigned_abs() as usize);
        // Gravity must allow the piece to still be this high when the tuck
        // input fires, and the pre-tuck column must fall at least this far.
        if after.y < min_y_by_inputs[inputs_before + 1] {
            continue;
        }
        if after.y > tuck_cols[tuck_col_index(pre_rotation, pre_x)] {
            continue;
        }
        if collides(board, after.piece, after.x, after.y, pre_rotation) {
            continue;
        }
        if collides(board, after.piece, pre_x, after.y, pre_rotation) {
            continue;
        }
        return Some(input);
    }
    None
}
