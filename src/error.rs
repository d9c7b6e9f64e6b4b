//! Error types shared by the rule engine and the opponent.

use crate::core::Player;
use crate::rules::IllegalMove;

/// Errors surfaced by the engine, the session and the opponent memory.
///
/// All variants are recoverable: re-prompt for input, skip to the round
/// boundary, or discard the bad snapshot.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum EngineError {
    #[error("illegal move at pit {pit}: {reason}")]
    IllegalMove { pit: usize, reason: IllegalMove },

    #[error("{player} has no legal move")]
    NoLegalMove { player: Player },

    #[error("it is {player}'s turn")]
    OutOfTurn { player: Player },

    #[error("corrupt opponent snapshot: {0}")]
    CorruptSnapshot(String),

    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
}

pub type Result<T> = std::result::Result<T, EngineError>;
