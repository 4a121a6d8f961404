//! Mutable per-match state.
//!
//! A [`Game`] is built once from a shared [`GameSpec`]. Its lanes and
//! objectives are created at construction and never replaced; units are
//! created by placement, mutated every tick and removed by death, refund
//! or merge.

use std::collections::HashMap;
use std::sync::Arc;

use lanewar_core::enums::{Side, UnitState};
use lanewar_core::spec::{GameSpec, UnitSpec};
use lanewar_core::types::SimTime;
use lanewar_core::SpecError;

use crate::ids::{UnitId, UnitIdAllocator};

/// One side's economy.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Player {
    pub balance: i64,
}

/// A capturable income point.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Objective {
    /// Index into `GameSpec::objectives`.
    pub spec: usize,
    /// Side currently collecting this objective's income.
    pub owner: Option<Side>,
    /// Copy of the spec position, mirrored by `invert`.
    pub position: i64,
}

/// A unit on the board.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Unit {
    pub id: UnitId,
    /// Index into `GameSpec::units`.
    pub kind: usize,
    pub side: Side,
    /// Leading edge; the footprint is `[position, position + height)`.
    pub position: i64,
    pub health: i64,
    pub state: UnitState,
}

impl Unit {
    pub fn new(id: UnitId, kind: usize, side: Side, position: i64, health: i64) -> Self {
        Self {
            id,
            kind,
            side,
            position,
            health,
            state: UnitState::Movement,
        }
    }

    pub fn height(&self, spec: &GameSpec) -> i64 {
        spec.units[self.kind].height
    }

    /// One past the last position covered by the footprint.
    pub fn end(&self, spec: &GameSpec) -> i64 {
        self.position + self.height(spec)
    }
}

/// One track: objectives and units, both sorted ascending by position.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Lane {
    pub objectives: Vec<Objective>,
    pub units: Vec<Unit>,
}

/// Whether the half-open footprints `[a, a + a_height)` and
/// `[b, b + b_height)` share any position.
pub fn spans_overlap(a: i64, a_height: i64, b: i64, b_height: i64) -> bool {
    a < b + b_height && b < a + a_height
}

pub fn units_overlap(spec: &GameSpec, a: &Unit, b: &Unit) -> bool {
    spans_overlap(a.position, a.height(spec), b.position, b.height(spec))
}

/// The aggregate match state.
#[derive(Debug, Clone)]
pub struct Game {
    pub spec: Arc<GameSpec>,
    pub lanes: Vec<Lane>,
    pub time: SimTime,
    pub(crate) players: [Player; 2],
    pub(crate) ids: UnitIdAllocator,
    pub(crate) unit_names: HashMap<String, usize>,
}

impl Game {
    /// Build a fresh game. Fails if the spec does not validate, most
    /// notably when two unit types share a name.
    pub fn new(spec: Arc<GameSpec>) -> Result<Self, SpecError> {
        spec.validate()?;

        let unit_names = spec
            .units
            .iter()
            .enumerate()
            .map(|(index, unit)| (unit.name.clone(), index))
            .collect();

        let lanes = (0..spec.lanes)
            .map(|lane| {
                let mut objectives: Vec<Objective> = spec
                    .objectives
                    .iter()
                    .enumerate()
                    .filter(|(_, objective)| objective.lane == lane)
                    .map(|(index, objective)| Objective {
                        spec: index,
                        owner: None,
                        position: objective.position,
                    })
                    .collect();
                objectives.sort_by_key(|objective| objective.position);
                Lane {
                    objectives,
                    units: Vec::new(),
                }
            })
            .collect();

        let player = Player {
            balance: spec.starting_balance,
        };

        Ok(Self {
            lanes,
            time: SimTime::default(),
            players: [player; 2],
            ids: UnitIdAllocator::new(),
            unit_names,
            spec,
        })
    }

    pub fn player(&self, side: Side) -> &Player {
        &self.players[side.index()]
    }

    pub fn player_mut(&mut self, side: Side) -> &mut Player {
        &mut self.players[side.index()]
    }

    pub fn unit_spec(&self, unit: &Unit) -> &UnitSpec {
        &self.spec.units[unit.kind]
    }

    /// Look up a unit type by name, returning its index and stats.
    pub fn unit_spec_by_name(&self, name: &str) -> Option<(usize, &UnitSpec)> {
        self.unit_names
            .get(name)
            .map(|&index| (index, &self.spec.units[index]))
    }

    /// Total number of units across all lanes.
    pub fn unit_count(&self) -> usize {
        self.lanes.iter().map(|lane| lane.units.len()).sum()
    }

    /// Whether the id still refers to a unit on the board.
    pub fn is_live(&self, id: UnitId) -> bool {
        self.ids.is_alive(id)
    }

    /// Whether both games were built from the same spec instance.
    pub fn shares_spec(&self, other: &Game) -> bool {
        Arc::ptr_eq(&self.spec, &other.spec)
    }
}
