//! Error types for the simulation crate.

use lanewar_core::SpecError;

/// Errors reported to callers of the simulation API.
#[derive(Debug, thiserror::Error)]
pub enum SimError {
    /// The spec could not be used to build a game.
    #[error(transparent)]
    Spec(#[from] SpecError),

    /// `copy_from` was given a game built from a different spec instance.
    #[error("cannot copy from a game built from a different spec")]
    SpecMismatch,
}

/// A broken structural invariant. Always a programming defect.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum InvariantViolation {
    #[error("expected {expected} lanes, found {found}")]
    WrongLaneCount { expected: usize, found: usize },

    #[error("lane {lane}: unit {index} is not strictly before its successor")]
    MisorderedUnits { lane: usize, index: usize },

    #[error("lane {lane}: unit {index} overlaps its successor")]
    OverlappingUnits { lane: usize, index: usize },

    #[error("lane {lane}: objectives are not sorted by position")]
    UnsortedObjectives { lane: usize },

    #[error("lane {lane}: unit {index} has non-positive health {health}")]
    DeadUnit { lane: usize, index: usize, health: i64 },
}
