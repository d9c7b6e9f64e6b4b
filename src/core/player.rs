//! Player identification and per-player data storage.
//!
//! ## Player
//!
//! Pallanguzhi is strictly two-player. Player One owns pits 0-6,
//! Player Two owns pits 7-13.
//!
//! ## PlayerMap
//!
//! Fixed two-entry storage indexed by `Player`.

use serde::{Deserialize, Serialize};
use std::ops::{Index, IndexMut, Range};

use super::board::PITS_PER_SIDE;

/// One of the two seats at the board.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Player {
    One,
    Two,
}

impl Player {
    /// Both players, in seating order.
    pub const ALL: [Player; 2] = [Player::One, Player::Two];

    /// 0 for Player One, 1 for Player Two.
    #[must_use]
    pub const fn index(self) -> usize {
        match self {
            Player::One => 0,
            Player::Two => 1,
        }
    }

    /// The other seat.
    #[must_use]
    pub const fn other(self) -> Player {
        match self {
            Player::One => Player::Two,
            Player::Two => Player::One,
        }
    }

    /// Pit indices owned by this player.
    ///
    /// ```
    /// use pallanguzhi::core::Player;
    ///
    /// assert_eq!(Player::One.pits(), 0..7);
    /// assert_eq!(Player::Two.pits(), 7..14);
    /// ```
    #[must_use]
    pub const fn pits(self) -> Range<usize> {
        let start = self.index() * PITS_PER_SIDE;
        start..start + PITS_PER_SIDE
    }

    /// Check if this player owns `pit`.
    #[must_use]
    pub fn owns(self, pit: usize) -> bool {
        self.pits().contains(&pit)
    }
}

impl std::fmt::Display for Player {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Player {}", self.index() + 1)
    }
}

/// Per-player data storage with O(1) access.
///
/// ## Example
///
/// ```
/// use pallanguzhi::core::{Player, PlayerMap};
///
/// let mut reserves: PlayerMap<u32> = PlayerMap::with_value(0);
/// reserves[Player::Two] += 4;
///
/// assert_eq!(reserves[Player::One], 0);
/// assert_eq!(reserves[Player::Two], 4);
/// ```
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PlayerMap<T> {
    data: [T; 2],
}

impl<T> PlayerMap<T> {
    /// Create a map with values from a factory function.
    pub fn new(factory: impl Fn(Player) -> T) -> Self {
        Self {
            data: [factory(Player::One), factory(Player::Two)],
        }
    }

    /// Create a map with both entries set to the same value.
    pub fn with_value(value: T) -> Self
    where
        T: Clone,
    {
        Self {
            data: [value.clone(), value],
        }
    }

    /// Create a map with default values.
    pub fn with_default() -> Self
    where
        T: Default,
    {
        Self::new(|_| T::default())
    }

    /// Create a map from explicit per-player values.
    pub fn from_pair(one: T, two: T) -> Self {
        Self { data: [one, two] }
    }

    /// Get a reference to a player's data.
    #[must_use]
    pub fn get(&self, player: Player) -> &T {
        &self.data[player.index()]
    }

    /// Get a mutable reference to a player's data.
    pub fn get_mut(&mut self, player: Player) -> &mut T {
        &mut self.data[player.index()]
    }

    /// Iterate over (Player, &T) pairs.
    pub fn iter(&self) -> impl Iterator<Item = (Player, &T)> {
        Player::ALL.into_iter().zip(self.data.iter())
    }
}

impl<T> Index<Player> for PlayerMap<T> {
    type Output = T;

    fn index(&self, player: Player) -> &Self::Output {
        self.get(player)
    }
}

impl<T> IndexMut<Player> for PlayerMap<T> {
    fn index_mut(&mut self, player: Player) -> &mut Self::Output {
        self.get_mut(player)
    }
}
