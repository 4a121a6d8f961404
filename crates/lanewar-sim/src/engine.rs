//! The tick pipeline.
//!
//! `Game::tick` advances the state by one timestep, running the phases in
//! a fixed order. The friendly side is always processed before the enemy
//! within a phase; see [`Game::tick_mirrored`] for the fair variant.

use lanewar_core::commands::Placement;
use lanewar_core::enums::Side;

use crate::game::Game;
use crate::invariants;
use crate::systems;

impl Game {
    /// Advance the simulation by `dt` seconds.
    ///
    /// Never fails: illegal placements are dropped by the placement phase.
    pub fn tick(&mut self, dt: f64, friendly: Option<&Placement>, enemy: Option<&Placement>) {
        // 1. Placement
        systems::placement::run(self, Side::Friendly, friendly);
        systems::placement::run(self, Side::Enemy, enemy);
        // 2. Income and objective capture
        systems::income::run(self, dt);
        // 3. Combat (targeting, damage, deaths)
        systems::combat::run(self, dt);
        // 4. Flanking
        for side in Side::BOTH {
            systems::flanking::run(self, side);
        }
        // 5. Movement (collisions, merges, refunds)
        for side in Side::BOTH {
            systems::movement::run(self, dt, side);
        }

        self.time.advance(dt);
        invariants::debug_check(self);
    }
}
