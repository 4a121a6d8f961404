//! Scheduler configuration and errors.

use std::io;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use lanewar_core::constants::DEFAULT_TIMESTEP_SECS;
use lanewar_sim::SimError;

/// Settings for a [`Simulation`](crate::game_loop::Simulation).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimConfig {
    /// Simulated seconds per tick. The loop also waits this long in wall
    /// clock time between ticks.
    pub timestep_secs: f64,
    /// Give the enemy the first-mover slot on every odd tick.
    pub fair: bool,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            timestep_secs: DEFAULT_TIMESTEP_SECS,
            fair: false,
        }
    }
}

impl SimConfig {
    /// Wall-clock cadence of the loop.
    pub fn tick_duration(&self) -> Result<Duration, SimulationError> {
        if self.timestep_secs <= 0.0 {
            return Err(SimulationError::InvalidTimestep(self.timestep_secs));
        }
        Duration::try_from_secs_f64(self.timestep_secs)
            .map_err(|_| SimulationError::InvalidTimestep(self.timestep_secs))
    }
}

#[derive(Debug, Error)]
pub enum SimulationError {
    #[error(transparent)]
    Sim(#[from] SimError),
    #[error("game state lock poisoned")]
    LockPoisoned,
    #[error("simulation is already running")]
    AlreadyRunning,
    #[error("game loop thread panicked; its deciders are lost")]
    LoopPanicked,
    #[error("timestep must be a positive number of seconds, got {0}")]
    InvalidTimestep(f64),
    #[error("failed to spawn game loop thread: {0}")]
    ThreadSpawn(#[source] io::Error),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = SimConfig::default();
        assert_eq!(config.timestep_secs, 0.01);
        assert!(!config.fair);
        assert_eq!(config.tick_duration().unwrap(), Duration::from_millis(10));
    }

    #[test]
    fn test_bad_timesteps_rejected() {
        for timestep_secs in [0.0, -1.0, f64::NAN, f64::INFINITY] {
            let config = SimConfig {
                timestep_secs,
                fair: false,
            };
            assert!(matches!(
                config.tick_duration(),
                Err(SimulationError::InvalidTimestep(_))
            ));
        }
    }

    #[test]
    fn test_config_from_partial_json() {
        let config: SimConfig = serde_json::from_str(r#"{ "fair": true }"#).unwrap();
        assert!(config.fair);
        assert_eq!(config.timestep_secs, 0.01);
    }
}
