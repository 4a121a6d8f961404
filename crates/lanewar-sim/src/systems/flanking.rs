//! Flanking phase: lane-swap capable units slip sideways into an adjacent
//! lane, landing directly in front of an enemy so they can hit it from
//! behind.
//!
//! A unit is a candidate when it belongs to the side being processed, can
//! swap lanes, is in movement and is not already flanking. The previous
//! lane is tried before the next one.

use tracing::debug;

use lanewar_core::enums::{Side, UnitState};
use lanewar_core::spec::GameSpec;

use crate::game::{units_overlap, Game, Lane, Unit};
use crate::systems::{forward_index, offset_index};

/// Whether `unit` is already behind enemy lines: it can swap lanes and
/// the unit immediately behind it (towards its own home edge) is hostile.
pub fn is_flanking(spec: &GameSpec, unit: &Unit, behind: Option<&Unit>) -> bool {
    spec.units[unit.kind].swap_lanes && behind.is_some_and(|other| other.side != unit.side)
}

/// [`is_flanking`] for the unit at `index` of a lane.
pub fn is_flanking_at(spec: &GameSpec, units: &[Unit], index: usize) -> bool {
    let unit = &units[index];
    let behind = offset_index(index, -unit.side.direction(), units.len()).map(|i| &units[i]);
    is_flanking(spec, unit, behind)
}

/// Insertion index for `unit` in the `adjacent` lane, if that lane offers
/// a flank slot.
///
/// The slot must not overlap any unit already there, and the nearest unit
/// behind `unit`'s position in that lane must be an enemy.
pub fn find_flank_slot(spec: &GameSpec, unit: &Unit, adjacent: &[Unit]) -> Option<usize> {
    if adjacent.iter().any(|other| units_overlap(spec, unit, other)) {
        return None;
    }
    let side = unit.side;
    let d = side.direction();
    for step in 0..adjacent.len() {
        let index = forward_index(side, adjacent.len(), step);
        let other = &adjacent[index];
        let next = offset_index(index, d, adjacent.len()).map(|i| &adjacent[i]);
        if other.position * d < unit.position * d
            && next.map_or(true, |next| unit.position * d < next.position * d)
        {
            if other.side == side {
                return None;
            }
            return Some(match side {
                Side::Friendly => index + 1,
                Side::Enemy => index,
            });
        }
    }
    None
}

pub fn run(game: &mut Game, side: Side) {
    let Game { spec, lanes, .. } = game;

    for lane_index in 0..lanes.len() {
        // Walk the lane in `side`'s forward direction. `step` counts the
        // visited units still in the lane, so it stays put when the
        // current unit leaves.
        let mut step = 0;
        while step < lanes[lane_index].units.len() {
            let index = forward_index(side, lanes[lane_index].units.len(), step);
            if !try_flank(spec, lanes, lane_index, index, side) {
                step += 1;
            }
        }
    }
}

/// Move `lanes[lane_index].units[index]` into a neighbouring lane if it is
/// a candidate and a slot exists. Returns whether it moved.
fn try_flank(
    spec: &GameSpec,
    lanes: &mut [Lane],
    lane_index: usize,
    index: usize,
    side: Side,
) -> bool {
    let current = &lanes[lane_index].units;
    let unit = current[index];
    if unit.side != side
        || !spec.units[unit.kind].swap_lanes
        || unit.state != UnitState::Movement
        || is_flanking_at(spec, current, index)
    {
        return false;
    }

    let neighbours = [
        lane_index.checked_sub(1),
        Some(lane_index + 1).filter(|&next| next < lanes.len()),
    ];
    for adjacent in neighbours.into_iter().flatten() {
        if let Some(slot) = find_flank_slot(spec, &unit, &lanes[adjacent].units) {
            lanes[lane_index].units.remove(index);
            lanes[adjacent].units.insert(slot, unit);
            debug!(id = %unit.id, ?side, from = lane_index, to = adjacent, position = unit.position, "Unit flanked");
            return true;
        }
    }
    false
}
