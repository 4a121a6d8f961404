//! Structural invariants that must hold after every completed tick.
//!
//! Violations are programming defects. [`debug_check`] asserts them in
//! debug builds and compiles to nothing in release builds.

use crate::error::InvariantViolation;
use crate::game::{units_overlap, Game};

/// Return the first broken invariant, if any.
pub fn check(game: &Game) -> Result<(), InvariantViolation> {
    let spec = &game.spec;
    if game.lanes.len() != spec.lanes {
        return Err(InvariantViolation::WrongLaneCount {
            expected: spec.lanes,
            found: game.lanes.len(),
        });
    }

    for (lane_index, lane) in game.lanes.iter().enumerate() {
        if lane
            .objectives
            .windows(2)
            .any(|pair| pair[0].position > pair[1].position)
        {
            return Err(InvariantViolation::UnsortedObjectives { lane: lane_index });
        }

        for (index, unit) in lane.units.iter().enumerate() {
            if unit.health <= 0 {
                return Err(InvariantViolation::DeadUnit {
                    lane: lane_index,
                    index,
                    health: unit.health,
                });
            }
        }

        for (index, pair) in lane.units.windows(2).enumerate() {
            if pair[0].position >= pair[1].position {
                return Err(InvariantViolation::MisorderedUnits {
                    lane: lane_index,
                    index,
                });
            }
            if units_overlap(spec, &pair[0], &pair[1]) {
                return Err(InvariantViolation::OverlappingUnits {
                    lane: lane_index,
                    index,
                });
            }
        }
    }
    Ok(())
}

pub fn debug_check(game: &Game) {
    if cfg!(debug_assertions) {
        if let Err(violation) = check(game) {
            panic!("invariant violated: {violation}");
        }
    }
}
