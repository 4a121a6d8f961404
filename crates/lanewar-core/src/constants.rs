//! Simulation constants and the built-in example spec's tuning values.

/// Default scheduler timestep in seconds (100 Hz).
pub const DEFAULT_TIMESTEP_SECS: f64 = 0.01;

/// Upper bound on how far the scheduler may fall behind before it resets
/// its cadence instead of trying to catch up, in ticks.
pub const MAX_TICK_LAG: u32 = 2;

// --- Example spec ---

pub const EXAMPLE_LANES: usize = 5;
pub const EXAMPLE_TRACK_LENGTH: i64 = 10_000;
pub const EXAMPLE_STARTING_BALANCE: i64 = 3000;
pub const EXAMPLE_INCOME: i64 = 200;
pub const EXAMPLE_OBJECTIVE_INCOME: i64 = 200;

/// Footprint length shared by every example unit.
pub const EXAMPLE_UNIT_HEIGHT: i64 = 1000;
pub const EXAMPLE_UNIT_HEALTH: i64 = 10_000;
pub const EXAMPLE_UNIT_COST: i64 = 1000;

/// Reach of the example ranged unit.
pub const EXAMPLE_ARROW_RANGE: i64 = 3000;
