//! Frame-accurate move search: every lock position a piece can reach under
//! the input timeline and gravity, tucks included.

use quicktap_core::{
    gravity, is_gravity_frame, min_y_by_inputs, Board, GameState, InputTimeline, LockPlacement,
    Piece, SimState, SPAWN_X,
};

use crate::collision::collides;
use crate::tucks::find_tucks;

/// Sentinel resting row for rotation/column pairs no drop populated. It
/// sits above every real row, so unpopulated pairs never constrain a tuck.
pub(crate) const UNREACHED: i32 = 99;

/// Index into the rotation/column reachability table: 4 rotations by
/// columns -2..=7.
#[inline]
pub(crate) fn tuck_col_index(rotation: usize, x: i32) -> usize {
    rotation * 10 + (x + 2) as usize
}

/// Enumerate every reachable lock placement for a piece spawning fresh.
pub fn move_search(
    state: &GameState,
    piece: Piece,
    timeline: &InputTimeline,
) -> Vec<LockPlacement> {
    move_search_internal(state, SimState::spawn(piece), timeline)
}

/// Enumerate lock placements for a piece already mid-flight: the pose is
/// spawn shifted by `(x_offset, y_offset)` after `frames_elapsed` frames.
///
/// Planning restarts from the spawn orientation, so the rotation the piece
/// currently holds is only sanity-checked; the offsets carry the position.
#[allow(clippy::too_many_arguments)]
pub fn adjustment_search(
    state: &GameState,
    piece: Piece,
    timeline: &InputTimeline,
    x_offset: i32,
    y_offset: i32,
    existing_rotation: usize,
    frames_elapsed: u32,
    arr_was_reset: bool,
) -> Vec<LockPlacement> {
    debug_assert!(existing_rotation < piece.num_orientations());
    let start = SimState {
        piece,
        x: SPAWN_X + x_offset,
        y: piece.spawn_y() + y_offset,
        rotation: 0,
        frame: 0,
        arr: if arr_was_reset { 0 } else { frames_elapsed },
    };
    move_search_internal(state, start, timeline)
}

fn move_search_internal(
    state: &GameState,
    spawn: SimState,
    timeline: &InputTimeline,
) -> Vec<LockPlacement> {
    let piece = spawn.piece;
    let gravity = gravity(state.level);
    let min_y = min_y_by_inputs(timeline, gravity, piece.spawn_y());
    let mut tuck_cols = [UNREACHED; 40];
    let mut legal_midair: Vec<SimState> = Vec::new();

    for goal_rotation in 0..piece.num_orientations() {
        if goal_rotation == 0 {
            if collides(&state.board, piece, spawn.x, spawn.y, spawn.rotation) {
                tracing::trace!(piece = %piece.id(), "spawn pose collides, no placements");
                return Vec::new();
            }
            legal_midair.push(spawn);
        }

        explore_horizontally(
            &state.board,
            spawn,
            -1,
            -99,
            goal_rotation,
            timeline,
            gravity,
            &mut legal_midair,
        );
        explore_horizontally(
            &state.board,
            spawn,
            1,
            99,
            goal_rotation,
            timeline,
            gravity,
            &mut legal_midair,
        );
        explore_placements_near_spawn(
            &state.board,
            spawn,
            goal_rotation,
            timeline,
            gravity,
            &mut legal_midair,
        );
    }

    let mut placements = Vec::with_capacity(legal_midair.len());
    drop_to_rest(&legal_midair, &state.surface, &mut tuck_cols, &mut placements);
    find_tucks(&state.board, piece, &tuck_cols, &min_y, &mut placements);
    placements
}

/// One rotation step toward the goal, favoring right rotations: the goal is
/// taken directly when it sits one left rotation away, otherwise the piece
/// rotates right whether or not that reaches the goal.
pub fn rotate_towards_goal(current: usize, goal: usize) -> usize {
    if current == goal {
        current
    } else if goal + 1 == current || goal == current + 3 {
        goal
    } else {
        current + 1
    }
}

/// Simulate frames while shifting toward `max_or_min_x` and rotating toward
/// the goal rotation, registering every pose that ends an input frame in
/// the goal rotation. Returns when either movement collides or gravity
/// locks the piece.
#[allow(clippy::too_many_arguments)]
fn explore_horizontally(
    board: &Board,
    mut sim: SimState,
    shift_increment: i32,
    max_or_min_x: i32,
    goal_rotation: usize,
    timeline: &InputTimeline,
    gravity: u32,
    legal_placements: &mut Vec<SimState>,
) {
    while sim.x != max_or_min_x || sim.rotation != goal_rotation {
        let is_input = timeline.is_input_frame(sim.frame);
        let is_gravity = is_gravity_frame(sim.frame, gravity);
        let mut found_new_placement = false;
        let mut locked = false;

        if is_input {
            if sim.x != max_or_min_x {
                if collides(board, sim.piece, sim.x + shift_increment, sim.y, sim.rotation) {
                    return; // shift range exhausted in this direction
                }
                sim.x += shift_increment;
            }
            if sim.rotation != goal_rotation {
                let next = rotate_towards_goal(sim.rotation, goal_rotation);
                if collides(board, sim.piece, sim.x, sim.y, next) {
                    return;
                }
                sim.rotation = next;
            }
            found_new_placement = sim.rotation == goal_rotation;
        }

        if is_gravity {
            if collides(board, sim.piece, sim.x, sim.y + 1, sim.rotation) {
                locked = true;
            } else {
                sim.y += 1;
            }
        }

        sim.frame += 1;

        // Registration happens after the frame advances so y and frame
        // describe the moment the next input could fire, which is what the
        // tuck reachability checks compare against. A pose that locked this
        // frame keeps its resting y.
        if found_new_placement {
            legal_placements.push(sim);
        }
        if locked {
            return;
        }
    }
}

/// Re-explore within a column of spawn to catch placements needing more
/// rotations than shifts, the one blind spot of the directional sweeps.
/// Only the 180-degree rotation needs the widened range.
fn explore_placements_near_spawn(
    board: &Board,
    sim: SimState,
    goal_rotation: usize,
    timeline: &InputTimeline,
    gravity: u32,
    legal_placements: &mut Vec<SimState>,
) {
    let (range_start, range_end) = if goal_rotation == 2 { (-1, 1) } else { (0, 0) };
    for x_offset in range_start..=range_end {
        explore_horizontally(
            board,
            sim,
            x_offset,
            sim.x + x_offset,
            goal_rotation,
            timeline,
            gravity,
            legal_placements,
        );
    }
}

/// Drop every mid-air pose straight to its resting row, recording each
/// rotation/column's resting y for the tuck finder. (!!) This fast path
/// cannot produce tucks; those come from the tuck finder afterwards.
fn drop_to_rest(
    legal_midair: &[SimState],
    surface: &[i32; 10],
    tuck_cols: &mut [i32; 40],
    placements: &mut Vec<LockPlacement>,
) {
    for sim in legal_midair {
        let orientation = &sim.piece.orientations()[sim.rotation];
        let mut rows_to_shift = i32::MAX;
        for (c, &bottom) in orientation.bottom_surface.iter().enumerate() {
            if bottom < 0 {
                continue; // column not occupied by this rotation
            }
            let under_surface = 20 - bottom as i32 - sim.y;
            let col_height = surface[(sim.x + c as i32) as usize];
            rows_to_shift = rows_to_shift.min(under_surface - col_height);
        }
        let rest_y = sim.y + rows_to_shift;
        tuck_cols[tuck_col_index(sim.rotation, sim.x)] = rest_y;
        placements.push(LockPlacement::new(sim.piece, sim.x, rest_y, sim.rotation));
    }
}
