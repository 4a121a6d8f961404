//! In-place snapshot copies between games built from the same spec.
//!
//! The destination keeps its lane and objective structure; unit records
//! are reused by index. Extra destination units are dropped from the tail
//! and missing ones appended. A consumer holding a long-lived scratch copy
//! therefore sees the same record at an index across ticks, but only as
//! long as no merge, death, refund or flank move shifted that lane. Use
//! [`Unit::id`](crate::game::Unit) for real identity.

use crate::error::SimError;
use crate::game::Game;
use crate::invariants;

impl Game {
    /// Overwrite this game's mutable state with `other`'s.
    ///
    /// Fails with [`SimError::SpecMismatch`] unless both games were built
    /// from the same spec instance.
    pub fn copy_from(&mut self, other: &Game) -> Result<(), SimError> {
        if !self.shares_spec(other) {
            return Err(SimError::SpecMismatch);
        }

        self.players = other.players;
        self.time = other.time;
        self.ids.clone_from(&other.ids);

        for (dest, src) in self.lanes.iter_mut().zip(&other.lanes) {
            debug_assert_eq!(
                dest.objectives.len(),
                src.objectives.len(),
                "same spec => same objectives"
            );
            for (dest_objective, src_objective) in dest.objectives.iter_mut().zip(&src.objectives) {
                dest_objective.spec = src_objective.spec;
                dest_objective.owner = src_objective.owner;
                dest_objective.position = src_objective.position;
            }

            dest.units.truncate(src.units.len());
            let retained = dest.units.len();
            for (dest_unit, src_unit) in dest.units.iter_mut().zip(&src.units) {
                dest_unit.id = src_unit.id;
                dest_unit.kind = src_unit.kind;
                dest_unit.side = src_unit.side;
                dest_unit.position = src_unit.position;
                dest_unit.health = src_unit.health;
                dest_unit.state = src_unit.state;
            }
            dest.units.extend_from_slice(&src.units[retained..]);
        }

        invariants::debug_check(self);
        Ok(())
    }
}
