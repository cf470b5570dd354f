//! Lock-value aggregation: collapse depth-2 possibilities into one value
//! per first placement, refining the best candidates with playouts.

use std::collections::{BTreeMap, HashMap};

use quicktap_core::{GameState, Piece};
use quicktap_eval::{EvalContext, PieceRangeContext};

use crate::depth2::{search_depth2, Depth2Possibility};
use crate::playout::{playout_score, PlayoutConfig};

/// Offset keeping every stored score above the map's default of zero, so
/// "greater than the existing entry" needs no separate presence flag.
pub const MAP_OFFSET: f32 = 20_000.0;

/// Pessimism applied to candidates scored by heuristic alone: an
/// unexplored placement could be worse than its eval suggests.
pub const UNEXPLORED_PENALTY: f32 = -500.0;

#[derive(Clone, Debug)]
pub struct LookupConfig {
    /// The depth-2 sorted prefix holds this many times `keep_top_n`
    /// possibilities.
    pub sorted_factor: usize,
    /// Updates allowed per first placement before it stops drawing
    /// playouts, so one strong placement cannot monopolize the budget.
    pub max_updates_per_placement: u32,
}

impl Default for LookupConfig {
    fn default() -> Self {
        Self {
            sorted_factor: 2,
            max_updates_per_placement: 3,
        }
    }
}

/// Value every reachable first placement of `first_piece`, keyed by its
/// encoded lock location. The top candidates by depth-2 eval get playouts,
/// up to `keep_top_n` of them; the rest keep their penalized heuristic.
#[allow(clippy::too_many_arguments)]
pub fn lock_value_lookup(
    state: &GameState,
    first_piece: Piece,
    second_piece: Piece,
    keep_top_n: usize,
    ctx: &EvalContext,
    range_lookup: &[PieceRangeContext; 3],
    playouts: &PlayoutConfig,
) -> BTreeMap<String, f32> {
    lock_value_lookup_with_config(
        state,
        first_piece,
        second_piece,
        keep_top_n,
        ctx,
        range_lookup,
        playouts,
        &LookupConfig::default(),
    )
}

#[allow(clippy::too_many_arguments)]
pub fn lock_value_lookup_with_config(
    state: &GameState,
    first_piece: Piece,
    second_piece: Piece,
    keep_top_n: usize,
    ctx: &EvalContext,
    range_lookup: &[PieceRangeContext; 3],
    playouts: &PlayoutConfig,
    config: &LookupConfig,
) -> BTreeMap<String, f32> {
    let num_sorted = keep_top_n * config.sorted_factor;
    let possibilities = search_depth2(state, first_piece, second_piece, num_sorted, ctx);
    aggregate_lock_values(
        &possibilities,
        keep_top_n,
        num_sorted,
        config.max_updates_per_placement,
        |possibility| {
            playout_score(
                &possibility.resulting_state,
                range_lookup,
                second_piece,
                ctx,
                playouts,
            )
        },
    )
}

/// The aggregation loop itself, with the playout injected so its budget
/// and repeat-cap policies stay testable.
pub fn aggregate_lock_values<F>(
    possibilities: &[Depth2Possibility],
    keep_top_n: usize,
    num_sorted: usize,
    max_updates_per_placement: u32,
    mut playout: F,
) -> BTreeMap<String, f32>
where
    F: FnMut(&Depth2Possibility) -> f32,
{
    let mut values: BTreeMap<String, f32> = BTreeMap::new();
    let mut update_counts: HashMap<String, u32> = HashMap::new();
    let mut played_out = 0usize;

    for (i, possibility) in possibilities.iter().enumerate() {
        let key = possibility.first_placement.to_string();
        let updates = update_counts.get(&key).copied().unwrap_or(0);
        let should_playout =
            i < num_sorted && played_out < keep_top_n && updates < max_updates_per_placement;

        let overall = MAP_OFFSET
            + if should_playout {
                possibility.immediate_reward + playout(possibility)
            } else {
                possibility.immediate_reward + possibility.eval_score + UNEXPLORED_PENALTY
            };

        let entry = values.entry(key.clone()).or_insert(0.0);
        if overall > *entry {
            tracing::debug!(key = %key, score = overall - MAP_OFFSET, "updating lock value");
            *entry = overall;
            *update_counts.entry(key).or_insert(0) += 1;
        }
        if should_playout {
            played_out += 1;
        }
    }

    values.into_iter().map(|(k, v)| (k, v - MAP_OFFSET)).collect()
}

/// The lookup as a JSON object string, the shape the move server ships.
#[allow(clippy::too_many_arguments)]
pub fn lock_value_lookup_encoded(
    state: &GameState,
    first_piece: Piece,
    second_piece: Piece,
    keep_top_n: usize,
    ctx: &EvalContext,
    range_lookup: &[PieceRangeContext; 3],
    playouts: &PlayoutConfig,
) -> serde_json::Result<String> {
    let lookup = lock_value_lookup(
        state,
        first_piece,
        second_piece,
        keep_top_n,
        ctx,
        range_lookup,
        playouts,
    );
    serde_json::to_string(&lookup)
}
