//! Enumeration types used throughout the simulation.

use serde::{Deserialize, Serialize};

/// One of the two opposing sides.
///
/// `Friendly` spawns at position 0 and advances toward increasing
/// positions; `Enemy` spawns at the far edge and advances the other way.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Side {
    Friendly,
    Enemy,
}

impl Side {
    pub const BOTH: [Side; 2] = [Side::Friendly, Side::Enemy];

    pub fn flip(self) -> Self {
        match self {
            Side::Friendly => Side::Enemy,
            Side::Enemy => Side::Friendly,
        }
    }

    /// +1 for friendly, -1 for enemy.
    pub fn direction(self) -> i64 {
        match self {
            Side::Friendly => 1,
            Side::Enemy => -1,
        }
    }

    /// Index into per-side arrays such as the player pair.
    pub fn index(self) -> usize {
        match self {
            Side::Friendly => 0,
            Side::Enemy => 1,
        }
    }
}

/// Behavioral state of a unit, recomputed by the combat phase every tick.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum UnitState {
    #[default]
    Movement,
    Combat,
}
