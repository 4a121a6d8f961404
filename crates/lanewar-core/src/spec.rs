//! Immutable game configuration.
//!
//! A [`GameSpec`] is shared (behind an `Arc`) by every game state built
//! from it and is never mutated after construction. Unit and objective
//! specs are referred to by index from the mutable state.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use crate::constants::*;
use crate::error::SpecError;

/// Stats for one unit type, looked up by its unique `name`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UnitSpec {
    pub name: String,
    /// Footprint length along the lane.
    pub height: i64,
    /// Distance covered per second while in movement.
    pub speed: i64,
    /// Maximum (and starting) health.
    pub health: i64,
    /// Damage per second at full health.
    pub attack: i64,
    /// Damage per second floor as health drops.
    pub min_attack: i64,
    pub cost: i64,
    /// Same-type friendly units that bump into this one are absorbed.
    #[serde(default)]
    pub merge: bool,
    /// Maximum footprint gap to a target; 0 means adjacent only.
    #[serde(default)]
    pub range: i64,
    /// May slip into an adjacent lane behind an enemy.
    #[serde(default)]
    pub swap_lanes: bool,
}

impl UnitSpec {
    /// A melee unit with no special powers.
    pub fn melee(
        name: impl Into<String>,
        height: i64,
        speed: i64,
        health: i64,
        attack: i64,
        min_attack: i64,
        cost: i64,
    ) -> Self {
        Self {
            name: name.into(),
            height,
            speed,
            health,
            attack,
            min_attack,
            cost,
            merge: false,
            range: 0,
            swap_lanes: false,
        }
    }

    pub fn with_merge(mut self) -> Self {
        self.merge = true;
        self
    }

    pub fn with_range(mut self, range: i64) -> Self {
        self.range = range;
        self
    }

    pub fn with_swap_lanes(mut self) -> Self {
        self.swap_lanes = true;
        self
    }
}

/// A fixed income point in a lane.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ObjectiveSpec {
    pub lane: usize,
    pub position: i64,
    /// Income per second paid to the controlling side.
    pub income: i64,
}

impl ObjectiveSpec {
    pub fn new(lane: usize, position: i64, income: i64) -> Self {
        Self {
            lane,
            position,
            income,
        }
    }
}

/// Complete configuration of a match.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameSpec {
    /// Number of parallel lanes.
    pub lanes: usize,
    /// Track length shared by every lane.
    pub length: i64,
    pub objectives: Vec<ObjectiveSpec>,
    pub starting_balance: i64,
    /// Flat income per second paid to both sides.
    pub income: i64,
    pub units: Vec<UnitSpec>,
}

impl GameSpec {
    /// Parse a spec from JSON and validate it.
    pub fn from_json(json: &str) -> Result<Self, SpecError> {
        let spec: GameSpec = serde_json::from_str(json)?;
        spec.validate()?;
        Ok(spec)
    }

    /// Check everything a game needs from its spec.
    pub fn validate(&self) -> Result<(), SpecError> {
        let mut names = HashSet::with_capacity(self.units.len());
        for unit in &self.units {
            if !names.insert(unit.name.as_str()) {
                return Err(SpecError::DuplicateUnitName(unit.name.clone()));
            }
            if unit.height <= 0 {
                return Err(SpecError::InvalidUnitStat {
                    unit: unit.name.clone(),
                    stat: "height",
                });
            }
            if unit.health <= 0 {
                return Err(SpecError::InvalidUnitStat {
                    unit: unit.name.clone(),
                    stat: "health",
                });
            }
        }
        if let Some(objective) = self.objectives.iter().find(|o| o.lane >= self.lanes) {
            return Err(SpecError::ObjectiveLaneOutOfRange {
                lane: objective.lane,
                lanes: self.lanes,
            });
        }
        Ok(())
    }

    /// Index of the unit spec called `name`, if any.
    pub fn unit_index(&self, name: &str) -> Option<usize> {
        self.units.iter().position(|u| u.name == name)
    }

    /// The built-in five-lane example: a merging melee unit, a ranged
    /// unit and a fast flanker.
    pub fn example() -> Self {
        let unit = |name: &str, speed: i64| {
            UnitSpec::melee(
                name,
                EXAMPLE_UNIT_HEIGHT,
                speed,
                EXAMPLE_UNIT_HEALTH,
                4000,
                1000,
                EXAMPLE_UNIT_COST,
            )
        };
        Self {
            lanes: EXAMPLE_LANES,
            length: EXAMPLE_TRACK_LENGTH,
            objectives: vec![
                ObjectiveSpec::new(0, 2000, EXAMPLE_OBJECTIVE_INCOME),
                ObjectiveSpec::new(1, 6000, EXAMPLE_OBJECTIVE_INCOME),
                ObjectiveSpec::new(2, 5000, EXAMPLE_OBJECTIVE_INCOME),
                ObjectiveSpec::new(3, 4000, EXAMPLE_OBJECTIVE_INCOME),
                ObjectiveSpec::new(4, 8000, EXAMPLE_OBJECTIVE_INCOME),
            ],
            starting_balance: EXAMPLE_STARTING_BALANCE,
            income: EXAMPLE_INCOME,
            units: vec![
                unit("sword", 2000).with_merge(),
                unit("arrow", 2000).with_range(EXAMPLE_ARROW_RANGE),
                unit("horse", 4000).with_swap_lanes(),
            ],
        }
    }
}
