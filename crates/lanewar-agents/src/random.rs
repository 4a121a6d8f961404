//! Uniform random placement.

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

use lanewar_core::commands::Placement;
use lanewar_sim::{Decider, Game};

/// Picks a unit type and a lane uniformly at random every tick.
///
/// Seeded, so a given seed always produces the same sequence against the
/// same spec.
#[derive(Debug, Clone)]
pub struct RandomDecider {
    rng: ChaCha8Rng,
}

impl RandomDecider {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: ChaCha8Rng::seed_from_u64(seed),
        }
    }
}

impl Decider for RandomDecider {
    fn decide(&mut self, game: &Game) -> Option<Placement> {
        let spec = &game.spec;
        if spec.units.is_empty() || spec.lanes == 0 {
            return None;
        }
        let unit = &spec.units[self.rng.gen_range(0..spec.units.len())];
        let lane = self.rng.gen_range(0..spec.lanes);
        Some(Placement::new(unit.name.clone(), lane))
    }
}
