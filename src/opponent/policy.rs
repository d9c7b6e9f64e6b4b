//! Move selection policies.
//!
//! A `MovePolicy` picks a pit for the player to move, or `None` when that
//! player has no legal pick. `None` is an expected end-of-turn condition,
//! not an error.

use crate::core::{GameRng, GameState};
use crate::rules::RulesEngine;

/// Integer form of "no move" for callers that need it.
pub const NO_MOVE: i32 = -1;

/// Convert a policy choice to its integer form.
#[must_use]
pub fn as_sentinel(choice: Option<usize>) -> i32 {
    choice.map_or(NO_MOVE, |pit| pit as i32)
}

/// Chooses a pit for the player to move.
pub trait MovePolicy<E: RulesEngine> {
    /// Pick a legal pit, or `None` if there is none.
    fn choose_move(&mut self, engine: &E, state: &GameState) -> Option<usize>;
}

/// Uniform random mover.
#[derive(Clone, Debug)]
pub struct UniformPolicy {
    rng: GameRng,
}

impl UniformPolicy {
    /// Random mover drawing from `rng`.
    #[must_use]
    pub fn new(rng: GameRng) -> Self {
        Self { rng }
    }
}

impl<E: RulesEngine> MovePolicy<E> for UniformPolicy {
    fn choose_move(&mut self, engine: &E, state: &GameState) -> Option<usize> {
        let moves = engine.legal_moves(state);
        self.rng.choose(&moves).copied()
    }
}

/// Always picks the lowest legal pit.
#[derive(Clone, Copy, Debug, Default)]
pub struct FirstLegalPolicy;

impl<E: RulesEngine> MovePolicy<E> for FirstLegalPolicy {
    fn choose_move(&mut self, engine: &E, state: &GameState) -> Option<usize> {
        engine.legal_moves(state).first().copied()
    }
}
