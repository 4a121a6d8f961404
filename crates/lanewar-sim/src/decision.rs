//! The placement decision capability consumed by schedulers.

use lanewar_core::commands::Placement;

use crate::game::Game;

/// Chooses at most one placement per tick for one side.
///
/// Implementations get a read-only view of the live game and must not
/// assume their placement will be accepted.
pub trait Decider: Send {
    fn decide(&mut self, game: &Game) -> Option<Placement>;
}

impl<D: Decider + ?Sized> Decider for Box<D> {
    fn decide(&mut self, game: &Game) -> Option<Placement> {
        (**self).decide(game)
    }
}
