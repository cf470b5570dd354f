//! Depth-2 search: every (first, second) placement pair fast-evaluated,
//! with a sorted top-N prefix and an unordered tail.

use quicktap_core::{GameState, LockLocation, Piece};
use quicktap_engine::{advance_game_state, move_search};
use quicktap_eval::{fast_eval, line_clear_factor, EvalContext};

#[derive(Clone, Debug)]
pub struct Depth2Possibility {
    pub first_placement: LockLocation,
    pub second_placement: LockLocation,
    pub resulting_state: GameState,
    pub eval_score: f32,
    /// Line-clear rewards of both moves, independent of the heuristic.
    pub immediate_reward: f32,
}

/// Ordered sequence with a cutoff: the best `keep_sorted` entries stay
/// sorted descending by eval score, and anything that cannot beat the
/// cutoff is appended to the tail in arrival order.
pub struct PossibilityList {
    entries: Vec<Depth2Possibility>,
    keep_sorted: usize,
    sorted_len: usize,
}

impl PossibilityList {
    pub fn new(keep_sorted: usize) -> PossibilityList {
        debug_assert!(keep_sorted > 0);
        PossibilityList {
            entries: Vec::new(),
            keep_sorted,
            sorted_len: 0,
        }
    }

    /// Score of the entry on the cutoff, once the prefix is full.
    fn cutoff_score(&self) -> Option<f32> {
        if self.sorted_len >= self.keep_sorted {
            Some(self.entries[self.keep_sorted - 1].eval_score)
        } else {
            None
        }
    }

    pub fn insert(&mut self, possibility: Depth2Possibility) {
        let beats_cutoff = match self.cutoff_score() {
            None => true,
            Some(cutoff) => possibility.eval_score > cutoff,
        };
        if beats_cutoff {
            let position = self.entries[..self.sorted_len]
                .iter()
                .position(|p| possibility.eval_score > p.eval_score)
                .unwrap_or(self.sorted_len);
            self.entries.insert(position, possibility);
            self.sorted_len += 1;
        } else {
            self.entries.push(possibility);
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn into_vec(self) -> Vec<Depth2Possibility> {
        self.entries
    }
}

/// Search two pieces deep, fast-evaluating every resulting state. The
/// returned list's first `keep_sorted` entries are sorted descending by
/// eval score; the rest are unordered but never beat the cutoff.
pub fn search_depth2(
    state: &GameState,
    first_piece: Piece,
    second_piece: Piece,
    keep_sorted: usize,
    ctx: &EvalContext,
) -> Vec<Depth2Possibility> {
    let timeline = &ctx.piece_range_context.input_frame_timeline;
    let mut list = PossibilityList::new(keep_sorted);

    for first in move_search(state, first_piece, timeline) {
        let after_first = advance_game_state(state, &first);
        let first_reward = line_clear_factor(
            after_first.lines - state.lines,
            &ctx.weights,
            ctx.should_reward_line_clears,
        );

        for second in move_search(&after_first, second_piece, timeline) {
            let resulting = advance_game_state(&after_first, &second);
            let eval_score = first_reward + fast_eval(&after_first, &resulting, &second, ctx);
            let second_reward = line_clear_factor(
                resulting.lines - after_first.lines,
                &ctx.weights,
                ctx.should_reward_line_clears,
            );
            list.insert(Depth2Possibility {
                first_placement: first.location(),
                second_placement: second.location(),
                resulting_state: resulting,
                eval_score,
                immediate_reward: first_reward + second_reward,
            });
        }
    }

    tracing::debug!(
        possibilities = list.len(),
        first = %first_piece.id(),
        second = %second_piece.id(),
        "depth-2 search complete"
    );
    list.into_vec()
}

#[cfg(test)]
mod tests {
    use super::*;
    use quicktap_core::InputTimeline;

    fn possibility(score: f32) -> Depth2Possibility {
        Depth2Possibility {
            first_placement: LockLocation {
                rotation: 0,
                x: 0,
                y: 17,
            },
            second_placement: LockLocation {
                rotation: 0,
                x: 5,
                y: 17,
            },
            resulting_state: GameState::new(18),
            eval_score: score,
            immediate_reward: 0.0,
        }
    }

    #[test]
    fn test_cutoff_insertion_order() {
        let mut list = PossibilityList::new(2);
        for score in [3.0, 1.0, 5.0, 2.0, 4.0] {
            list.insert(possibility(score));
        }
        let scores: Vec<f32> = list.into_vec().iter().map(|p| p.eval_score).collect();
        assert_eq!(scores[0], 5.0);
        assert_eq!(scores[1], 4.0);
        assert!(scores[2..].iter().all(|&s| s <= 4.0));
        assert_eq!(scores.len(), 5);
    }

    #[test]
    fn test_everything_sorted_below_capacity() {
        let mut list = PossibilityList::new(10);
        for score in [3.0, 1.0, 5.0, 2.0, 4.0] {
            list.insert(possibility(score));
        }
        let scores: Vec<f32> = list.into_vec().iter().map(|p| p.eval_score).collect();
        assert_eq!(scores, vec![5.0, 4.0, 3.0, 2.0, 1.0]);
    }

    #[test]
    fn test_search_depth2_prefix_is_sorted() {
        let state = GameState::new(18);
        let ctx = EvalContext::new(InputTimeline::parse("X...").unwrap(), 18);
        let keep = 10;
        let possibilities = search_depth2(&state, Piece::L, Piece::J, keep, &ctx);
        assert!(possibilities.len() > keep);

        for window in possibilities[..keep].windows(2) {
            assert!(window[0].eval_score >= window[1].eval_score);
        }
        let cutoff = possibilities[keep - 1].eval_score;
        for p in &possibilities[keep..] {
            assert!(p.eval_score <= cutoff);
        }
    }

    #[test]
    fn test_search_depth2_empty_when_spawn_blocked() {
        let mut board = quicktap_core::Board::new();
        for y in 0..20 {
            board.set(4, y, true);
            board.set(5, y, true);
        }
        let state = GameState::from_board(board, 0, 18);
        let ctx = EvalContext::new(InputTimeline::parse("X...").unwrap(), 18);
        assert!(search_depth2(&state, Piece::T, Piece::O, 5, &ctx).is_empty());
    }
}
