//! Placement commands issued by deciders, once per side per tick.
//!
//! A placement is only a request. The engine drops it silently when the
//! lane does not exist, the unit type is unknown or unaffordable, or the
//! spawn slot is blocked.

use serde::{Deserialize, Serialize};

/// Request to spawn one unit of type `unit` at the home edge of `lane`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Placement {
    pub unit: String,
    pub lane: usize,
}

impl Placement {
    pub fn new(unit: impl Into<String>, lane: usize) -> Self {
        Self {
            unit: unit.into(),
            lane,
        }
    }

    /// The same placement expressed on a board with reversed lane order.
    ///
    /// Out-of-range lanes stay out of range so the engine still rejects them.
    pub fn mirrored(&self, lanes: usize) -> Self {
        let lane = if self.lane < lanes {
            lanes - 1 - self.lane
        } else {
            self.lane
        };
        Self {
            unit: self.unit.clone(),
            lane,
        }
    }
}
