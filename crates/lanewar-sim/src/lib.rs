//! Simulation engine for LANEWAR.
//!
//! Owns the per-match [`Game`] state and advances it with a fixed,
//! ordered phase pipeline (placement, income and capture, combat,
//! flanking, movement). Also provides the mirror transform, in-place
//! snapshot copies and the [`Decider`] capability consumed by schedulers.
//! Completely headless and single-threaded; see `lanewar-app` for the
//! background scheduler.

pub mod decision;
pub mod engine;
pub mod error;
pub mod game;
pub mod ids;
pub mod invariants;
pub mod mirror;
pub mod snapshot;
pub mod systems;

pub use decision::Decider;
pub use error::{InvariantViolation, SimError};
pub use game::{Game, Lane, Objective, Player, Unit};
pub use ids::UnitId;
pub use lanewar_core as core;

#[cfg(test)]
mod tests;
