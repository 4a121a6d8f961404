//! Mirror transform.
//!
//! Swaps the two sides and flips the board end to end. Running
//! `invert(); tick(..); invert()` gives the enemy the first-mover slot for
//! that tick, which is how callers alternate the advantage.
//!
//! Far-edge spawns sit at `length - height` but unit footprints mirror to
//! `length - 1 - p - height`, so a unit spawned on the inverted board comes
//! back one step short of its home edge, at `-1`. If it has not moved by
//! the next movement phase it counts as off the track and is refunded.

use lanewar_core::commands::Placement;

use crate::game::Game;
use crate::invariants;

impl Game {
    /// Reverse lane order, reverse and mirror every lane's objectives and
    /// units, swap all side labels and swap the two players.
    ///
    /// Objectives map `p -> length - 1 - p`; units mirror their whole
    /// footprint, `p -> length - 1 - p - height`. Applying it twice is the
    /// identity.
    pub fn invert(&mut self) {
        let length = self.spec.length;
        self.lanes.reverse();
        for lane in &mut self.lanes {
            lane.objectives.reverse();
            for objective in &mut lane.objectives {
                objective.owner = objective.owner.map(|side| side.flip());
                objective.position = length - 1 - objective.position;
            }
            lane.units.reverse();
            for unit in &mut lane.units {
                unit.side = unit.side.flip();
                unit.position = length - 1 - unit.position - self.spec.units[unit.kind].height;
            }
        }
        self.players.swap(0, 1);
        invariants::debug_check(self);
    }

    /// Tick with the enemy processed first.
    ///
    /// Placements are given in this game's orientation; they are swapped
    /// and mirrored onto the inverted board.
    pub fn tick_mirrored(
        &mut self,
        dt: f64,
        friendly: Option<&Placement>,
        enemy: Option<&Placement>,
    ) {
        let lanes = self.spec.lanes;
        let friendly = friendly.map(|placement| placement.mirrored(lanes));
        let enemy = enemy.map(|placement| placement.mirrored(lanes));
        self.invert();
        self.tick(dt, enemy.as_ref(), friendly.as_ref());
        self.invert();
    }
}
