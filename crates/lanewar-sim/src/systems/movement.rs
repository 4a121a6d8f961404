//! Movement phase, run per side and per lane.
//!
//! Units are processed furthest-from-home first so a fast unit can never
//! leapfrog a slower one ahead of it within a tick. Movers are clamped
//! flush against the next unit in their direction of travel; a mover
//! blocked by a friendly unit of the same merge-capable type is absorbed
//! into it, and a mover whose footprint leaves the track is refunded.
//!
//! Removals are recorded in a tombstone list during the walk and
//! compacted once per lane, so indices stay stable while scanning.

use tracing::debug;

use lanewar_core::enums::{Side, UnitState};
use lanewar_core::spec::GameSpec;

use crate::game::{Game, Lane, Player};
use crate::ids::UnitIdAllocator;
use crate::systems::flanking::is_flanking;
use crate::systems::{forward_index, per_tick};

pub fn run(game: &mut Game, dt: f64, side: Side) {
    let Game {
        spec,
        lanes,
        players,
        ids,
        ..
    } = game;

    let mut mover = Mover {
        spec,
        players,
        ids,
        dt,
    };
    let mut removed: Vec<bool> = Vec::new();
    for (lane_index, lane) in lanes.iter_mut().enumerate() {
        let len = lane.units.len();
        removed.clear();
        removed.resize(len, false);

        // Furthest first: the reverse of this side's forward order.
        for step in 0..len {
            let index = forward_index(side.flip(), len, step);
            let unit = &lane.units[index];
            if unit.side == side && unit.state == UnitState::Movement {
                mover.move_unit(lane, lane_index, &mut removed, index);
            }
        }

        let mut tombstones = removed.iter();
        lane.units
            .retain(|_| !tombstones.next().copied().unwrap_or(false));
    }
}

/// Nearest unit index from `index` in `direction`, skipping removed units.
fn neighbour(removed: &[bool], index: usize, direction: i64) -> Option<usize> {
    let mut cursor = index;
    loop {
        cursor = if direction >= 0 {
            cursor.checked_add(1)?
        } else {
            cursor.checked_sub(1)?
        };
        match removed.get(cursor) {
            None => return None,
            Some(false) => return Some(cursor),
            Some(true) => {}
        }
    }
}

/// Clamp the mover at `index` flush against the next live unit in
/// `direction` if it now overlaps it. Returns the blocker's index.
fn resolve_collision(
    spec: &GameSpec,
    lane: &mut Lane,
    removed: &[bool],
    index: usize,
    direction: i64,
) -> Option<usize> {
    let next_index = neighbour(removed, index, direction)?;
    let next = lane.units[next_index];
    let unit = &mut lane.units[index];
    let height = unit.height(spec);
    if direction > 0 && next.position < unit.position + height {
        unit.position = next.position - height;
        return Some(next_index);
    }
    if direction < 0 && unit.position < next.end(spec) {
        unit.position = next.end(spec);
        return Some(next_index);
    }
    None
}

/// Per-tick state shared by every unit moved in one side's pass.
struct Mover<'a> {
    spec: &'a GameSpec,
    players: &'a mut [Player; 2],
    ids: &'a mut UnitIdAllocator,
    dt: f64,
}

impl Mover<'_> {
    fn move_unit(&mut self, lane: &mut Lane, lane_index: usize, removed: &mut [bool], index: usize) {
        let spec = self.spec;
        let unit = lane.units[index];
        let unit_spec = &spec.units[unit.kind];

        // Flankers fight from behind enemy lines and walk back toward home.
        let behind = neighbour(removed, index, -unit.side.direction()).map(|i| &lane.units[i]);
        let mut direction = unit.side.direction();
        if is_flanking(spec, &unit, behind) {
            direction = -direction;
        }
        lane.units[index].position += direction * per_tick(self.dt, unit_spec.speed);

        if let Some(blocker_index) = resolve_collision(spec, lane, removed, index, direction) {
            let mover = lane.units[index];
            let blocker = &mut lane.units[blocker_index];
            if blocker.side == mover.side && blocker.kind == mover.kind && unit_spec.merge {
                blocker.health += mover.health;
                removed[index] = true;
                self.ids.release(mover.id);
                debug!(lane = lane_index, id = %mover.id, into = %blocker.id, health = blocker.health, "Units merged");
                return;
            }
        }

        let unit = lane.units[index];
        if unit.position < 0 || spec.length < unit.end(spec) {
            let refund = unit_spec.cost * unit.health / unit_spec.health;
            self.players[unit.side.index()].balance += refund;
            removed[index] = true;
            self.ids.release(unit.id);
            debug!(lane = lane_index, id = %unit.id, side = ?unit.side, refund, "Unit left the track");
        }
    }
}
