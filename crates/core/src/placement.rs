//! In-flight piece states and resting placements.

use crate::piece::{Piece, SPAWN_X};
use serde::{Deserialize, Serialize};

/// Snapshot of a falling piece during frame-by-frame exploration.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SimState {
    pub piece: Piece,
    pub x: i32,
    pub y: i32,
    pub rotation: usize,
    pub frame: u32,
    /// ARR phase inherited from inputs made before an adjustment snapshot.
    /// Recorded on the state; the frame predicate runs off `frame`.
    pub arr: u32,
}

impl SimState {
    pub fn spawn(piece: Piece) -> SimState {
        SimState {
            piece,
            x: SPAWN_X,
            y: piece.spawn_y(),
            rotation: 0,
            frame: 0,
            arr: 0,
        }
    }
}

/// The single extra input that turns a plain drop into a tuck, applied on
/// the frame the piece passes under an overhang.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Serialize, Deserialize)]
pub enum TuckInput {
    ShiftLeft,
    ShiftRight,
    RotateRight,
    RotateLeft,
    ShiftLeftRotateRight,
    ShiftLeftRotateLeft,
    ShiftRightRotateRight,
    ShiftRightRotateLeft,
}

impl TuckInput {
    /// Candidate inputs in the order the tuck finder tries them: plain
    /// shifts, then plain rotations, then shift-rotate pairs.
    pub const ALL: [TuckInput; 8] = [
        TuckInput::ShiftLeft,
        TuckInput::ShiftRight,
        TuckInput::RotateRight,
        TuckInput::RotateLeft,
        TuckInput::ShiftLeftRotateRight,
        TuckInput::ShiftLeftRotateLeft,
        TuckInput::ShiftRightRotateRight,
        TuckInput::ShiftRightRotateLeft,
    ];

    pub fn x_change(self) -> i32 {
        match self {
            TuckInput::ShiftLeft
            | TuckInput::ShiftLeftRotateRight
            | TuckInput::ShiftLeftRotateLeft => -1,
            TuckInput::ShiftRight
            | TuckInput::ShiftRightRotateRight
            | TuckInput::ShiftRightRotateLeft => 1,
            TuckInput::RotateRight | TuckInput::RotateLeft => 0,
        }
    }

    pub fn rotation_change(self) -> i32 {
        match self {
            TuckInput::RotateRight
            | TuckInput::ShiftLeftRotateRight
            | TuckInput::ShiftRightRotateRight => 1,
            TuckInput::RotateLeft
            | TuckInput::ShiftLeftRotateLeft
            | TuckInput::ShiftRightRotateLeft => -1,
            TuckInput::ShiftLeft | TuckInput::ShiftRight => 0,
        }
    }

    pub fn notation(self) -> char {
        match self {
            TuckInput::ShiftLeft => 'L',
            TuckInput::ShiftRight => 'R',
            TuckInput::RotateRight => 'A',
            TuckInput::RotateLeft => 'B',
            TuckInput::ShiftLeftRotateRight => 'E',
            TuckInput::ShiftLeftRotateLeft => 'F',
            TuckInput::ShiftRightRotateRight => 'I',
            TuckInput::ShiftRightRotateLeft => 'G',
        }
    }
}

/// A resting pose: applying one more row of gravity would collide.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct LockPlacement {
    pub piece: Piece,
    pub x: i32,
    pub y: i32,
    pub rotation: usize,
    /// Index into an externally assembled input sequence; -1 until the
    /// caller assigns one.
    pub input_sequence_index: i32,
    /// The input that tucked the piece here, or None for a straight drop.
    pub tuck: Option<TuckInput>,
}

impl LockPlacement {
    pub fn new(piece: Piece, x: i32, y: i32, rotation: usize) -> LockPlacement {
        LockPlacement {
            piece,
            x,
            y,
            rotation,
            input_sequence_index: -1,
            tuck: None,
        }
    }

    pub fn with_tuck(mut self, tuck: TuckInput) -> LockPlacement {
        self.tuck = Some(tuck);
        self
    }

    /// Single-character tuck notation, `.` for straight drops.
    pub fn notation(&self) -> char {
        self.tuck.map(TuckInput::notation).unwrap_or('.')
    }

    pub fn location(&self) -> LockLocation {
        LockLocation {
            rotation: self.rotation,
            x: self.x,
            y: self.y,
        }
    }
}

/// Piece-independent lock position, the key of the aggregated value map.
/// Encodes as `"rotation|x|y"`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct LockLocation {
    pub rotation: usize,
    pub x: i32,
    pub y: i32,
}

impl std::fmt::Display for LockLocation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}|{}|{}", self.rotation, self.x, self.y)
    }
}

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct ParseLockLocationError;

impl std::fmt::Display for ParseLockLocationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "expected a \"rotation|x|y\" lock location")
    }
}

impl std::error::Error for ParseLockLocationError {}

impl std::str::FromStr for LockLocation {
    type Err = ParseLockLocationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut parts = s.split('|');
        let rotation = parts
            .next()
            .and_then(|p| p.parse::<usize>().ok())
            .ok_or(ParseLockLocationError)?;
        let x = parts
            .next()
            .and_then(|p| p.parse::<i32>().ok())
            .ok_or(ParseLockLocationError)?;
        let y = parts
            .next()
            .and_then(|p| p.parse::<i32>().ok())
            .ok_or(ParseLockLocationError)?;
        if parts.next().is_some() {
            return Err(ParseLockLocationError);
        }
        Ok(LockLocation { rotation, x, y })
    }
}
