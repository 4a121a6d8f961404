//! Configuration errors raised while validating a [`GameSpec`](crate::spec::GameSpec).

/// Errors that make a spec unusable for building a game.
#[derive(Debug, thiserror::Error)]
pub enum SpecError {
    /// Two unit specs share a name.
    #[error("duplicate unit name \"{0}\"")]
    DuplicateUnitName(String),

    /// An objective refers to a lane the spec does not have.
    #[error("objective lane {lane} out of range (spec has {lanes} lanes)")]
    ObjectiveLaneOutOfRange {
        /// Lane index named by the objective.
        lane: usize,
        /// Number of lanes in the spec.
        lanes: usize,
    },

    /// A unit stat that must be positive is not.
    #[error("unit \"{unit}\" has non-positive {stat}")]
    InvalidUnitStat {
        /// Unit name.
        unit: String,
        /// Name of the offending stat.
        stat: &'static str,
    },

    /// The spec document could not be parsed.
    #[error("failed to parse spec: {0}")]
    Parse(#[from] serde_json::Error),
}
