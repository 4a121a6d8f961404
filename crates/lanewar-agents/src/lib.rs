//! Placement strategies for LANEWAR.
//!
//! Every strategy implements [`lanewar_sim::Decider`] and only reads the
//! game it is handed. None of them checks affordability or spawn room;
//! the engine silently drops placements it cannot honour.

pub mod random;
pub mod scripted;

pub use lanewar_core as core;
pub use random::RandomDecider;
pub use scripted::{IdleDecider, ScriptedDecider};
