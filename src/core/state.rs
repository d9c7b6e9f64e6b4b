//! Game state snapshots.
//!
//! A `GameState` is an immutable snapshot: every engine call returns a new
//! one and the caller replaces its current value wholesale. `im` persistent
//! collections keep those copies cheap for history and undo.

use im::{OrdSet, Vector};
use serde::{Deserialize, Serialize};

use super::action::MoveRecord;
use super::board::Board;
use super::config::RuleConfig;
use super::outcome::MoveResult;
use super::player::{Player, PlayerMap};

/// Lifecycle of a game.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum GamePhase {
    /// Moves are accepted.
    #[default]
    Playing,
    /// A half was emptied; the round manager has yet to refill it.
    RoundEnd,
    /// Terminal.
    Ended,
}

/// Complete game state.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameState {
    /// Shells in play.
    pub board: Board,

    /// Captured shells per player (the reserve).
    pub scores: PlayerMap<u32>,

    /// Pits permanently excluded from refill and from picking.
    pub unusable: PlayerMap<OrdSet<usize>>,

    /// Player to move.
    pub turn: Player,

    /// Current phase.
    pub phase: GamePhase,

    /// Round number (starts at 1).
    pub round: u32,

    /// Every pick so far.
    pub history: Vector<MoveRecord>,

    /// Result of the most recent pick.
    pub last_move: Option<MoveResult>,
}

impl GameState {
    /// Standard opening position: every pit filled, Player One to move.
    #[must_use]
    pub fn new(config: &RuleConfig) -> Self {
        Self::from_board(Board::filled(config.shells_per_pit), Player::One)
    }

    /// Start from an arbitrary position with empty reserves.
    #[must_use]
    pub fn from_board(board: Board, turn: Player) -> Self {
        Self {
            board,
            scores: PlayerMap::with_value(0),
            unusable: PlayerMap::with_default(),
            turn,
            phase: GamePhase::Playing,
            round: 1,
            history: Vector::new(),
            last_move: None,
        }
    }

    /// Set both reserves.
    #[must_use]
    pub fn with_scores(mut self, one: u32, two: u32) -> Self {
        self.scores = PlayerMap::from_pair(one, two);
        self
    }

    /// Mark pits as unusable for their owners.
    #[must_use]
    pub fn with_unusable(mut self, pits: &[usize]) -> Self {
        for &pit in pits {
            self.unusable[Board::owner(pit)].insert(pit);
        }
        self
    }

    /// Shells on the board plus both reserves.
    #[must_use]
    pub fn total_shells(&self) -> u32 {
        self.board.total() + self.scores[Player::One] + self.scores[Player::Two]
    }

    /// Check if the game has ended.
    #[must_use]
    pub fn is_over(&self) -> bool {
        self.phase == GamePhase::Ended
    }

    /// Check if a pit is unusable for its owner.
    #[must_use]
    pub fn is_unusable(&self, pit: usize) -> bool {
        self.unusable[Board::owner(pit)].contains(&pit)
    }

    /// Sequence number for the next recorded move.
    #[must_use]
    pub fn next_sequence(&self) -> u32 {
        self.history.len() as u32
    }
}
