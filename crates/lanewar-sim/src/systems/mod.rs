//! Tick phases that operate on the game state.
//!
//! Each phase is a free function taking `&mut Game`. Phases do not own
//! state; everything lives in the game. `Game::tick` runs them in a fixed
//! order.

use lanewar_core::enums::Side;

pub mod combat;
pub mod flanking;
pub mod income;
pub mod movement;
pub mod placement;

/// Scale a per-second `rate` by `dt`, truncating toward zero.
pub(crate) fn per_tick(dt: f64, rate: i64) -> i64 {
    (dt * rate as f64) as i64
}

/// Index visited at `step` when walking `len` units in `side`'s forward
/// direction (ascending for friendly, descending for enemy).
pub(crate) fn forward_index(side: Side, len: usize, step: usize) -> usize {
    match side {
        Side::Friendly => step,
        Side::Enemy => len - 1 - step,
    }
}

/// Index one step from `index` in direction `direction` (+1 or -1), if it
/// stays within `len`.
pub(crate) fn offset_index(index: usize, direction: i64, len: usize) -> Option<usize> {
    let next = if direction >= 0 {
        index.checked_add(1)?
    } else {
        index.checked_sub(1)?
    };
    (next < len).then_some(next)
}
