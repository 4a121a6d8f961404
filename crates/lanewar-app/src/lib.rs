//! LANEWAR scheduler.
//!
//! Runs a [`lanewar_sim::Game`] on a background thread at a fixed cadence
//! and lets other threads take consistent snapshots of it.

pub mod game_loop;
pub mod state;

pub use game_loop::Simulation;
pub use lanewar_core as core;
pub use state::{SimConfig, SimulationError};
