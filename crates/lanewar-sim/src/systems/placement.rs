//! Placement phase: turns an accepted [`Placement`] into a new unit at the
//! side's home edge.
//!
//! Illegal placements (unknown lane or unit type, insufficient funds, a
//! blocked spawn slot) are dropped without error.

use tracing::debug;

use lanewar_core::commands::Placement;
use lanewar_core::enums::Side;

use crate::game::{spans_overlap, Game, Unit};

/// Apply one side's placement, if any.
pub fn run(game: &mut Game, side: Side, placement: Option<&Placement>) {
    let Some(placement) = placement else {
        return;
    };
    let Game {
        spec,
        lanes,
        players,
        ids,
        unit_names,
        ..
    } = game;

    let Some(lane) = lanes.get_mut(placement.lane) else {
        debug!(?side, lane = placement.lane, "Placement rejected: no such lane");
        return;
    };
    let Some(&kind) = unit_names.get(&placement.unit) else {
        debug!(?side, unit = %placement.unit, "Placement rejected: unknown unit type");
        return;
    };
    let unit_spec = &spec.units[kind];
    let player = &mut players[side.index()];
    if unit_spec.cost > player.balance {
        debug!(
            ?side,
            unit = %placement.unit,
            cost = unit_spec.cost,
            balance = player.balance,
            "Placement rejected: insufficient funds"
        );
        return;
    }

    // Spawns always happen at an extreme end, so inserting there keeps
    // the lane sorted.
    let (position, index, incumbent) = match side {
        Side::Friendly => (0, 0, lane.units.first()),
        Side::Enemy => (
            spec.length - unit_spec.height,
            lane.units.len(),
            lane.units.last(),
        ),
    };
    if let Some(incumbent) = incumbent {
        if spans_overlap(
            position,
            unit_spec.height,
            incumbent.position,
            incumbent.height(spec),
        ) {
            debug!(?side, lane = placement.lane, "Placement rejected: spawn slot blocked");
            return;
        }
    }

    let id = ids.allocate();
    lane.units
        .insert(index, Unit::new(id, kind, side, position, unit_spec.health));
    player.balance -= unit_spec.cost;
    debug!(?side, %id, unit = %placement.unit, lane = placement.lane, position, "Unit placed");
}
