//! Bounded greedy playouts used to refine the most promising placements.

use quicktap_core::{GameState, Piece};
use quicktap_engine::{advance_game_state, move_search};
use quicktap_eval::{fast_eval, line_clear_factor, speed_index, EvalContext, PieceRangeContext};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Added when a playout sequence has no legal move left.
pub const TOPOUT_PENALTY: f32 = -10_000.0;

#[derive(Clone, Debug)]
pub struct PlayoutConfig {
    /// Independent piece sequences averaged per score.
    pub count: u32,
    /// Moves played per sequence.
    pub depth: u32,
    /// Mixed with the seed piece so identical queries score identically.
    pub seed: u64,
}

impl Default for PlayoutConfig {
    fn default() -> Self {
        Self {
            count: 7,
            depth: 3,
            seed: 0x5eed,
        }
    }
}

/// Mean score of `config.count` greedy playouts from a resulting state.
/// Each sequence draws pieces with the NES reroll rule starting after
/// `seed_piece` and plays the best placement by line reward plus heuristic.
pub fn playout_score(
    state: &GameState,
    range_lookup: &[PieceRangeContext; 3],
    seed_piece: Piece,
    ctx: &EvalContext,
    config: &PlayoutConfig,
) -> f32 {
    let mut rng = StdRng::seed_from_u64(config.seed.wrapping_add(seed_piece.index() as u64));
    let mut total = 0.0;
    for _ in 0..config.count {
        total += run_sequence(state, range_lookup, seed_piece, ctx, config.depth, &mut rng);
    }
    total / config.count.max(1) as f32
}

fn run_sequence(
    state: &GameState,
    range_lookup: &[PieceRangeContext; 3],
    seed_piece: Piece,
    ctx: &EvalContext,
    depth: u32,
    rng: &mut StdRng,
) -> f32 {
    let mut current = state.clone();
    let mut previous = seed_piece;
    let mut reward = 0.0;
    let mut last_eval = 0.0;

    for _ in 0..depth {
        let piece = roll_piece(rng, previous);
        previous = piece;
        let range = &range_lookup[speed_index(current.level)];
        let placements = move_search(&current, piece, &range.input_frame_timeline);

        let mut best: Option<(f32, f32, f32, GameState)> = None;
        for placement in &placements {
            let next = advance_game_state(&current, placement);
            let step_reward = line_clear_factor(
                next.lines - current.lines,
                &ctx.weights,
                ctx.should_reward_line_clears,
            );
            let step_eval = fast_eval(&current, &next, placement, ctx);
            let step = step_reward + step_eval;
            if best.as_ref().map_or(true, |(total, ..)| step > *total) {
                best = Some((step, step_reward, step_eval, next));
            }
        }

        match best {
            Some((_, step_reward, step_eval, next)) => {
                reward += step_reward;
                last_eval = step_eval;
                current = next;
            }
            None => return reward + TOPOUT_PENALTY,
        }
    }

    reward + last_eval
}

/// NES piece randomizer: roll 0..8, rerolling once on 7 or on a repeat of
/// the previous piece.
fn roll_piece(rng: &mut StdRng, previous: Piece) -> Piece {
    let roll = rng.random_range(0..8usize);
    if roll == 7 || roll == previous.index() {
        return Piece::from_index(rng.random_range(0..7usize));
    }
    Piece::from_index(roll)
}
