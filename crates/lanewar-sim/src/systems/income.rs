//! Income and capture phase.
//!
//! Both sides receive the flat income. Then every objective is captured
//! by whichever unit's footprint covers its position (the last such unit
//! in lane order wins) and pays its controller.

use tracing::debug;

use crate::game::Game;
use crate::systems::per_tick;

pub fn run(game: &mut Game, dt: f64) {
    let Game {
        spec,
        lanes,
        players,
        ..
    } = game;

    let base = per_tick(dt, spec.income);
    for player in players.iter_mut() {
        player.balance += base;
    }

    for (lane_index, lane) in lanes.iter_mut().enumerate() {
        for objective in &mut lane.objectives {
            for unit in &lane.units {
                let offset = objective.position - unit.position;
                if (0..unit.height(spec)).contains(&offset) {
                    if objective.owner != Some(unit.side) {
                        debug!(lane = lane_index, position = objective.position, side = ?unit.side, "Objective captured");
                    }
                    objective.owner = Some(unit.side);
                }
            }
            if let Some(owner) = objective.owner {
                players[owner.index()].balance +=
                    per_tick(dt, spec.objectives[objective.spec].income);
            }
        }
    }
}
