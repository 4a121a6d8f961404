//! Core types and definitions for the LANEWAR simulation.
//!
//! This crate defines the vocabulary shared across all other crates:
//! the immutable game spec, placement commands, sides, unit states,
//! the simulation clock and constants. It has no dependency on any
//! runtime framework.

pub mod commands;
pub mod constants;
pub mod enums;
pub mod error;
pub mod spec;
pub mod types;

pub use error::SpecError;
