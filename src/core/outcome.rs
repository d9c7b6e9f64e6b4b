//! What a single pick did to the board.

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use super::board::Board;
use super::player::{Player, PlayerMap};

/// How a capture was triggered.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CaptureKind {
    /// A pit reached exactly four shells mid-sow.
    FourShell,
    /// The pit after the landing pit.
    NextPit,
    /// The pit opposite the (empty) pit after the landing pit.
    OppositePit,
}

/// Shells removed from one pit and credited to a reserve.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Capture {
    pub pit: usize,
    pub shells: u32,
    pub credited_to: Player,
    pub kind: CaptureKind,
}

/// One uninterrupted sowing run: shells lifted from `from` and dropped one
/// per pit until `landing`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SowLeg {
    pub from: usize,
    pub shells: u32,
    pub landing: usize,
}

/// The engine's output for one pick.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct MoveResult {
    /// Who picked.
    pub player: Player,

    /// The picked pit.
    pub pit: usize,

    /// Board after sowing and captures.
    pub board: Board,

    /// Captures in the order they happened.
    pub captures: SmallVec<[Capture; 4]>,

    /// Pit that received the final shell.
    pub landing: usize,

    /// Reserves after this move.
    pub scores: PlayerMap<u32>,

    /// The initial sow followed by every relay leg.
    pub legs: SmallVec<[SowLeg; 4]>,

    /// Total single-shell placements.
    pub sow_steps: u32,

    /// True when the relay chain was cut off by `RuleConfig::relay_limit`.
    pub relay_capped: bool,
}

impl MoveResult {
    /// Number of relay legs after the initial sow.
    #[must_use]
    pub fn relay_count(&self) -> usize {
        self.legs.len().saturating_sub(1)
    }

    /// Pits emptied by captures, in order.
    pub fn captured_pits(&self) -> impl Iterator<Item = usize> + '_ {
        self.captures.iter().map(|c| c.pit)
    }

    /// Shells a player gained from this move.
    #[must_use]
    pub fn captured_by(&self, player: Player) -> u32 {
        self.captures
            .iter()
            .filter(|c| c.credited_to == player)
            .map(|c| c.shells)
            .sum()
    }
}
