//! Quicktap core crate - fundamental types for NES Tetris move search.

mod board;
mod piece;
mod placement;
mod state;
mod timing;

pub use board::{
    cell_bit, hole_bit, shift_row, tuck_setup_bit, Board, MarkerSummary, ALL_HOLE_BITS,
    ALL_TUCK_SETUP_BITS, FULL_ROW, HOLE_WEIGHT_BIT,
};
pub use piece::{Orientation, Piece, SPAWN_X};
pub use placement::{
    LockLocation, LockPlacement, ParseLockLocationError, SimState, TuckInput,
};
pub use state::GameState;
pub use timing::{gravity, is_gravity_frame, min_y_by_inputs, InputTimeline, TimelineError};
