//! Move history records.
//!
//! A move in Pallanguzhi is a single pit index. `MoveRecord` stores who
//! picked which pit and when, for replay and debugging.

use serde::{Deserialize, Serialize};

use super::player::Player;

/// A recorded pick with metadata for history tracking.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct MoveRecord {
    /// The player who picked.
    pub player: Player,

    /// The pit that was picked.
    pub pit: usize,

    /// Round the move was played in (starts at 1).
    pub round: u32,

    /// Sequence number across the whole game.
    pub sequence: u32,
}

impl MoveRecord {
    /// Create a new move record.
    #[must_use]
    pub fn new(player: Player, pit: usize, round: u32, sequence: u32) -> Self {
        Self {
            player,
            pit,
            round,
            sequence,
        }
    }
}
