//! The 14-pit Pallanguzhi board.
//!
//! ```text
//!  Player Two:  [13][12][11][10][ 9][ 8][ 7]
//!  Player One:  [ 0][ 1][ 2][ 3][ 4][ 5][ 6]
//! ```
//!
//! Sowing runs counterclockwise: 0 → 1 → … → 13 → 0.

use serde::{Deserialize, Serialize};
use std::ops::{Index, IndexMut};

use super::player::Player;

/// Pits owned by each player.
pub const PITS_PER_SIDE: usize = 7;

/// Total pits on the board.
pub const PIT_COUNT: usize = PITS_PER_SIDE * 2;

/// Shell counts for all 14 pits.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Board {
    pits: [u32; PIT_COUNT],
}

impl Board {
    /// Board with every pit holding `shells`.
    #[must_use]
    pub const fn filled(shells: u32) -> Self {
        Self {
            pits: [shells; PIT_COUNT],
        }
    }

    /// Board with all pits empty.
    #[must_use]
    pub const fn empty() -> Self {
        Self::filled(0)
    }

    /// Board from explicit pit counts.
    #[must_use]
    pub const fn from_pits(pits: [u32; PIT_COUNT]) -> Self {
        Self { pits }
    }

    /// Raw pit counts.
    #[must_use]
    pub fn pits(&self) -> &[u32; PIT_COUNT] {
        &self.pits
    }

    /// Next pit in sowing order.
    #[must_use]
    pub const fn next(pit: usize) -> usize {
        (pit + 1) % PIT_COUNT
    }

    /// The pit facing `pit` across the board.
    #[must_use]
    pub const fn opposite(pit: usize) -> usize {
        (pit + PITS_PER_SIDE) % PIT_COUNT
    }

    /// Owner of a pit.
    #[must_use]
    pub const fn owner(pit: usize) -> Player {
        if pit < PITS_PER_SIDE {
            Player::One
        } else {
            Player::Two
        }
    }

    /// A player's half of the board.
    #[must_use]
    pub fn side(&self, player: Player) -> &[u32] {
        &self.pits[player.pits()]
    }

    /// Shells on a player's half.
    #[must_use]
    pub fn side_total(&self, player: Player) -> u32 {
        self.side(player).iter().sum()
    }

    /// True when every pit on a player's half is empty.
    #[must_use]
    pub fn is_side_empty(&self, player: Player) -> bool {
        self.side(player).iter().all(|&shells| shells == 0)
    }

    /// Shells on the whole board.
    #[must_use]
    pub fn total(&self) -> u32 {
        self.pits.iter().sum()
    }

    /// Empty a pit and return what it held.
    pub fn take(&mut self, pit: usize) -> u32 {
        std::mem::take(&mut self.pits[pit])
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::empty()
    }
}

impl Index<usize> for Board {
    type Output = u32;

    fn index(&self, pit: usize) -> &Self::Output {
        &self.pits[pit]
    }
}

impl IndexMut<usize> for Board {
    fn index_mut(&mut self, pit: usize) -> &mut Self::Output {
        &mut self.pits[pit]
    }
}

impl std::fmt::Display for Board {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for shells in self.side(Player::Two).iter().rev() {
            write!(f, "{shells:>3}")?;
        }
        writeln!(f)?;
        for shells in self.side(Player::One) {
            write!(f, "{shells:>3}")?;
        }
        Ok(())
    }
}
