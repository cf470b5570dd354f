//! NES piece tables - rotation masks, bottom surfaces, and legal x ranges.
//!
//! Rotation masks live in a 4x4 frame whose column 0 sits at bit 9 of a
//! 10-bit row, so a piece at board position x shifts its masks right by x.
//! Rotation index 0 is the spawn orientation; +1 is one clockwise rotation.

use serde::{Deserialize, Serialize};

/// Column every piece spawns in.
pub const SPAWN_X: i32 = 3;

#[derive(Clone, Copy, PartialEq, Eq, Debug, Hash, Serialize, Deserialize)]
pub enum Piece {
    I,
    O,
    L,
    J,
    T,
    S,
    Z,
}

/// One rotation state of a piece.
#[derive(Clone, Copy, Debug)]
pub struct Orientation {
    /// Four row masks in frame columns 0..=3 (bits 9..6), top row first.
    pub rows: [u16; 4],
    /// One past the lowest occupied frame row per frame column, -1 for
    /// empty columns. Written so that a piece resting on a column of
    /// height h sits at y = 20 - bottom_surface - h.
    pub bottom_surface: [i8; 4],
    /// Highest y at which the piece still fits above the floor.
    pub max_y: i8,
    /// Legal x range given the occupied frame columns.
    pub min_x: i8,
    pub max_x: i8,
}

impl Orientation {
    /// Occupied frame cells as (column, row) pairs.
    pub fn cells(&self) -> impl Iterator<Item = (i32, i32)> + '_ {
        (0..4).flat_map(move |r| {
            (0..4).filter_map(move |c| {
                if self.rows[r as usize] & (1u16 << (9 - c)) != 0 {
                    Some((c, r))
                } else {
                    None
                }
            })
        })
    }
}

static I_ORIENTATIONS: [Orientation; 2] = [
    Orientation {
        rows: [0, 0, 960, 0],
        bottom_surface: [3, 3, 3, 3],
        max_y: 17,
        min_x: 0,
        max_x: 6,
    },
    Orientation {
        rows: [128, 128, 128, 128],
        bottom_surface: [-1, -1, 4, -1],
        max_y: 16,
        min_x: -2,
        max_x: 7,
    },
];

static O_ORIENTATIONS: [Orientation; 1] = [Orientation {
    rows: [0, 384, 384, 0],
    bottom_surface: [-1, 3, 3, -1],
    max_y: 17,
    min_x: -1,
    max_x: 7,
}];

static L_ORIENTATIONS: [Orientation; 4] = [
    Orientation {
        rows: [0, 448, 256, 0],
        bottom_surface: [-1, 3, 2, 2],
        max_y: 17,
        min_x: -1,
        max_x: 6,
    },
    Orientation {
        rows: [384, 128, 128, 0],
        bottom_surface: [-1, 1, 3, -1],
        max_y: 17,
        min_x: -1,
        max_x: 7,
    },
    Orientation {
        rows: [64, 448, 0, 0],
        bottom_surface: [-1, 2, 2, 2],
        max_y: 18,
        min_x: -1,
        max_x: 6,
    },
    Orientation {
        rows: [128, 128, 192, 0],
        bottom_surface: [-1, -1, 3, 3],
        max_y: 17,
        min_x: -2,
        max_x: 6,
    },
];

static J_ORIENTATIONS: [Orientation; 4] = [
    Orientation {
        rows: [0, 448, 64, 0],
        bottom_surface: [-1, 2, 2, 3],
        max_y: 17,
        min_x: -1,
        max_x: 6,
    },
    Orientation {
        rows: [128, 128, 384, 0],
        bottom_surface: [-1, 3, 3, -1],
        max_y: 17,
        min_x: -1,
        max_x: 7,
    },
    Orientation {
        rows: [256, 448, 0, 0],
        bottom_surface: [-1, 2, 2, 2],
        max_y: 18,
        min_x: -1,
        max_x: 6,
    },
    Orientation {
        rows: [192, 128, 128, 0],
        bottom_surface: [-1, -1, 3, 1],
        max_y: 17,
        min_x: -2,
        max_x: 6,
    },
];

static T_ORIENTATIONS: [Orientation; 4] = [
    Orientation {
        rows: [0, 448, 128, 0],
        bottom_surface: [-1, 2, 3, 2],
        max_y: 17,
        min_x: -1,
        max_x: 6,
    },
    Orientation {
        rows: [128, 384, 128, 0],
        bottom_surface: [-1, 2, 3, -1],
        max_y: 17,
        min_x: -1,
        max_x: 7,
    },
    Orientation {
        rows: [128, 448, 0, 0],
        bottom_surface: [-1, 2, 2, 2],
        max_y: 18,
        min_x: -1,
        max_x: 6,
    },
    Orientation {
        rows: [128, 192, 128, 0],
        bottom_surface: [-1, -1, 3, 2],
        max_y: 17,
        min_x: -2,
        max_x: 6,
    },
];

static S_ORIENTATIONS: [Orientation; 2] = [
    Orientation {
        rows: [0, 192, 384, 0],
        bottom_surface: [-1, 3, 3, 2],
        max_y: 17,
        min_x: -1,
        max_x: 6,
    },
    Orientation {
        rows: [128, 192, 64, 0],
        bottom_surface: [-1, -1, 2, 3],
        max_y: 17,
        min_x: -2,
        max_x: 6,
    },
];

static Z_ORIENTATIONS: [Orientation; 2] = [
    Orientation {
        rows: [0, 384, 192, 0],
        bottom_surface: [-1, 2, 3, 3],
        max_y: 17,
        min_x: -1,
        max_x: 6,
    },
    Orientation {
        rows: [64, 192, 128, 0],
        bottom_surface: [-1, -1, 3, 2],
        max_y: 17,
        min_x: -2,
        max_x: 6,
    },
];

impl Piece {
    pub const ALL: [Piece; 7] = [
        Piece::I,
        Piece::O,
        Piece::L,
        Piece::J,
        Piece::T,
        Piece::S,
        Piece::Z,
    ];

    pub fn index(self) -> usize {
        match self {
            Piece::I => 0,
            Piece::O => 1,
            Piece::L => 2,
            Piece::J => 3,
            Piece::T => 4,
            Piece::S => 5,
            Piece::Z => 6,
        }
    }

    pub fn from_index(index: usize) -> Piece {
        Piece::ALL[index]
    }

    pub fn id(self) -> char {
        match self {
            Piece::I => 'I',
            Piece::O => 'O',
            Piece::L => 'L',
            Piece::J => 'J',
            Piece::T => 'T',
            Piece::S => 'S',
            Piece::Z => 'Z',
        }
    }

    pub fn from_id(id: char) -> Option<Piece> {
        Piece::ALL.into_iter().find(|p| p.id() == id)
    }

    pub fn orientations(self) -> &'static [Orientation] {
        match self {
            Piece::I => &I_ORIENTATIONS,
            Piece::O => &O_ORIENTATIONS,
            Piece::L => &L_ORIENTATIONS,
            Piece::J => &J_ORIENTATIONS,
            Piece::T => &T_ORIENTATIONS,
            Piece::S => &S_ORIENTATIONS,
            Piece::Z => &Z_ORIENTATIONS,
        }
    }

    pub fn num_orientations(self) -> usize {
        self.orientations().len()
    }

    /// Spawn row. The I piece's filled mask row is frame row 2, so it
    /// spawns one row higher than everything else.
    pub fn spawn_y(self) -> i32 {
        match self {
            Piece::I => -2,
            _ => -1,
        }
    }
}
