//! Combat phase, run per lane in two passes.
//!
//! Pass 1 picks every unit's nearest enemy, sets its state and accrues
//! damage onto the target. Pass 2 applies all accrued damage at once and
//! compacts dead units out of the lane, so the result does not depend on
//! scan order and a unit can be hit by several attackers in one tick.

use tracing::debug;

use lanewar_core::enums::UnitState;
use lanewar_core::spec::{GameSpec, UnitSpec};

use crate::game::{Game, Unit};
use crate::systems::per_tick;

/// Separation between two footprints along the lane. Never negative for
/// non-overlapping units; zero means adjacent.
pub fn gap(spec: &GameSpec, a: &Unit, b: &Unit) -> i64 {
    (a.position - b.position - b.height(spec)).max(b.position - a.position - a.height(spec))
}

/// Damage dealt over `dt` by a unit of type `unit_spec` at `health`.
/// Output falls with the health fraction but never below `min_attack`.
pub fn attack_output(unit_spec: &UnitSpec, health: i64, dt: f64) -> i64 {
    let scaled = unit_spec.attack * health / unit_spec.health;
    per_tick(dt, unit_spec.min_attack.max(scaled))
}

/// Index of the nearest enemy of `units[index]`, if it is within range.
/// Ties go to the first enemy in lane order.
pub fn find_target(spec: &GameSpec, units: &[Unit], index: usize) -> Option<usize> {
    let unit = &units[index];
    let mut closest = None;
    let mut closest_gap = i64::MAX;
    for (other_index, other) in units.iter().enumerate() {
        if other.side == unit.side {
            continue;
        }
        let distance = gap(spec, unit, other);
        debug_assert!(distance >= 0, "bad distance calculation: {distance}");
        if distance < closest_gap {
            closest = Some(other_index);
            closest_gap = distance;
        }
    }
    closest.filter(|_| closest_gap <= spec.units[unit.kind].range)
}

pub fn run(game: &mut Game, dt: f64) {
    let Game {
        spec, lanes, ids, ..
    } = game;

    let mut damage: Vec<i64> = Vec::new();
    for (lane_index, lane) in lanes.iter_mut().enumerate() {
        damage.clear();
        damage.resize(lane.units.len(), 0);

        // Pass 1: targeting and accrual.
        for index in 0..lane.units.len() {
            match find_target(spec, &lane.units, index) {
                Some(target) => {
                    let unit = &mut lane.units[index];
                    unit.state = UnitState::Combat;
                    damage[target] += attack_output(&spec.units[unit.kind], unit.health, dt);
                }
                None => lane.units[index].state = UnitState::Movement,
            }
        }

        // Pass 2: application and compaction.
        for (unit, &taken) in lane.units.iter_mut().zip(&damage) {
            unit.health -= taken;
        }
        lane.units.retain(|unit| {
            if unit.health > 0 {
                return true;
            }
            debug!(lane = lane_index, id = %unit.id, side = ?unit.side, "Unit destroyed");
            ids.release(unit.id);
            false
        });
    }
}
