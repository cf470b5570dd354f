//! Quicktap eval crate - fast board heuristics for the search.

use quicktap_core::{gravity, GameState, InputTimeline, LockPlacement};
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct EvalWeights {
    pub avg_height: f32,
    pub holes: f32,
    pub bumpiness: f32,
    pub deep_well: f32,
    pub new_holes: f32,
    /// Applied per line on 1-3 line clears; negative keeps burns rare.
    pub burn: f32,
    pub tetris: f32,
}

impl Default for EvalWeights {
    fn default() -> Self {
        Self {
            avg_height: -2.0,
            holes: -40.0,
            bumpiness: -1.5,
            deep_well: -4.0,
            new_holes: -30.0,
            burn: -12.0,
            tetris: 400.0,
        }
    }
}

/// Per-gravity-regime context handed to the move search and playouts.
#[derive(Clone, PartialEq, Debug, Serialize, Deserialize)]
pub struct PieceRangeContext {
    pub input_frame_timeline: InputTimeline,
    pub gravity: u32,
}

/// One context per gravity regime: levels 18 and below, 19 through 28, and
/// the killscreen at 29 plus.
pub fn piece_range_context_lookup(timeline: &InputTimeline) -> [PieceRangeContext; 3] {
    [18, 19, 29].map(|level| PieceRangeContext {
        input_frame_timeline: timeline.clone(),
        gravity: gravity(level),
    })
}

/// Index into a [`piece_range_context_lookup`] result for a level.
pub fn speed_index(level: u32) -> usize {
    if level <= 18 {
        0
    } else if level < 29 {
        1
    } else {
        2
    }
}

#[derive(Clone, Debug)]
pub struct EvalContext {
    pub piece_range_context: PieceRangeContext,
    pub weights: EvalWeights,
    pub should_reward_line_clears: bool,
}

impl EvalContext {
    pub fn new(timeline: InputTimeline, level: u32) -> EvalContext {
        EvalContext {
            piece_range_context: PieceRangeContext {
                gravity: gravity(level),
                input_frame_timeline: timeline,
            },
            weights: EvalWeights::default(),
            should_reward_line_clears: false,
        }
    }
}

/// Reward (or penalty) for clearing lines on a single move. Tetrises pay
/// out; burns cost unless the caller wants the stack kept low.
pub fn line_clear_factor(lines: u32, weights: &EvalWeights, should_reward: bool) -> f32 {
    match lines {
        0 => 0.0,
        4 => weights.tetris,
        n if should_reward => n as f32 * weights.burn.abs(),
        n => n as f32 * weights.burn,
    }
}

/// Cheap surface heuristic for a resulting state. The placement itself is
/// already baked into `after`; `before` only supplies the hole delta.
pub fn fast_eval(
    before: &GameState,
    after: &GameState,
    _placement: &LockPlacement,
    ctx: &EvalContext,
) -> f32 {
    let weights = &ctx.weights;
    let surface = &after.surface;

    let avg_height = surface.iter().sum::<i32>() as f32 / 10.0;

    let mut bumpiness = 0;
    for i in 0..9 {
        bumpiness += (surface[i] - surface[i + 1]).abs();
    }

    let mut deep_well = 0;
    for i in 0..10 {
        let left = if i == 0 { i32::MAX } else { surface[i - 1] };
        let right = if i == 9 { i32::MAX } else { surface[i + 1] };
        let depth = left.min(right) - surface[i];
        deep_well = deep_well.max(depth);
    }

    let new_holes = (after.adjusted_num_holes - before.adjusted_num_holes).max(0.0);

    avg_height * weights.avg_height
        + after.adjusted_num_holes * weights.holes
        + bumpiness as f32 * weights.bumpiness
        + deep_well as f32 * weights.deep_well
        + new_holes * weights.new_holes
}

#[cfg(test)]
mod tests {
    use super::*;
    use quicktap_core::{Board, Piece};

    fn ctx() -> EvalContext {
        EvalContext::new(InputTimeline::parse("X...").unwrap(), 18)
    }

    fn state_with_columns(heights: [i32; 10]) -> GameState {
        let mut board = Board::new();
        for (x, &h) in heights.iter().enumerate() {
            for y in (20 - h as usize)..20 {
                board.set(x, y, true);
            }
        }
        GameState::from_board(board, 0, 18)
    }

    #[test]
    fn test_line_clear_factor() {
        let weights = EvalWeights::default();
        assert_eq!(line_clear_factor(0, &weights, false), 0.0);
        assert_eq!(line_clear_factor(4, &weights, false), weights.tetris);
        assert!(line_clear_factor(2, &weights, false) < 0.0);
        assert!(line_clear_factor(2, &weights, true) > 0.0);
        // The tetris payout dwarfs the rewarded burn.
        assert!(line_clear_factor(4, &weights, true) > line_clear_factor(3, &weights, true));
    }

    #[test]
    fn test_flat_beats_bumpy() {
        let flat = state_with_columns([2; 10]);
        let bumpy = state_with_columns([4, 0, 4, 0, 4, 0, 4, 0, 4, 0]);
        let empty = GameState::new(18);
        let placement = LockPlacement::new(Piece::O, 3, 17, 0);
        let flat_score = fast_eval(&empty, &flat, &placement, &ctx());
        let bumpy_score = fast_eval(&empty, &bumpy, &placement, &ctx());
        assert!(flat_score > bumpy_score);
    }

    #[test]
    fn test_holes_hurt() {
        let clean = state_with_columns([3, 3, 3, 3, 3, 3, 3, 3, 3, 0]);
        let mut holey_board = clean.board.clone();
        holey_board.set(4, 19, false);
        holey_board.set(4, 18, false);
        let holey = GameState::from_board(holey_board, 0, 18);
        let empty = GameState::new(18);
        let placement = LockPlacement::new(Piece::O, 3, 17, 0);
        let clean_score = fast_eval(&empty, &clean, &placement, &ctx());
        let holey_score = fast_eval(&empty, &holey, &placement, &ctx());
        assert!(clean_score > holey_score);
    }

    #[test]
    fn test_range_context_lookup_buckets() {
        let timeline = InputTimeline::parse("X...").unwrap();
        let lookup = piece_range_context_lookup(&timeline);
        assert_eq!(lookup[0].gravity, 3);
        assert_eq!(lookup[1].gravity, 2);
        assert_eq!(lookup[2].gravity, 1);
        assert_eq!(speed_index(18), 0);
        assert_eq!(speed_index(23), 1);
        assert_eq!(speed_index(29), 2);
        assert_eq!(speed_index(33), 2);
    }
}
