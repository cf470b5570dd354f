//! Quicktap search crate - depth-2 search, playouts, and lock-value
//! aggregation over the move search.

mod depth2;
mod lookup;
mod playout;

pub use depth2::{search_depth2, Depth2Possibility, PossibilityList};
pub use lookup::{
    aggregate_lock_values, lock_value_lookup, lock_value_lookup_encoded,
    lock_value_lookup_with_config, LookupConfig, MAP_OFFSET, UNEXPLORED_PENALTY,
};
pub use playout::{playout_score, PlayoutConfig, TOPOUT_PENALTY};
