//! Deterministic deciders for tests and replays.

use std::collections::VecDeque;

use lanewar_core::commands::Placement;
use lanewar_sim::{Decider, Game};

/// Plays back a fixed sequence, one entry per tick, then stays idle.
#[derive(Debug, Clone, Default)]
pub struct ScriptedDecider {
    script: VecDeque<Option<Placement>>,
}

impl ScriptedDecider {
    pub fn new(script: impl IntoIterator<Item = Option<Placement>>) -> Self {
        Self {
            script: script.into_iter().collect(),
        }
    }

    /// Entries not yet played.
    pub fn remaining(&self) -> usize {
        self.script.len()
    }
}

impl Decider for ScriptedDecider {
    fn decide(&mut self, _game: &Game) -> Option<Placement> {
        self.script.pop_front().flatten()
    }
}

/// Never places anything.
#[derive(Debug, Clone, Copy, Default)]
pub struct IdleDecider;

impl Decider for IdleDecider {
    fn decide(&mut self, _game: &Game) -> Option<Placement> {
        None
    }
}
