//! Opponent statistics and the derived difficulty label.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Games needed before the win rate is trusted.
pub const MIN_RATED_GAMES: u32 = 10;

/// Observational skill label. Never feeds back into learning.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Difficulty {
    Easy,
    Medium,
    Hard,
    Expert,
}

impl Difficulty {
    /// Label for a game count and win count.
    #[must_use]
    pub fn rate(games_played: u32, wins: u32) -> Self {
        if games_played < MIN_RATED_GAMES {
            return Difficulty::Easy;
        }
        let win_rate = f64::from(wins) / f64::from(games_played);
        if win_rate < 0.3 {
            Difficulty::Easy
        } else if win_rate < 0.5 {
            Difficulty::Medium
        } else if win_rate < 0.7 {
            Difficulty::Hard
        } else {
            Difficulty::Expert
        }
    }
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Difficulty::Easy => "easy",
            Difficulty::Medium => "medium",
            Difficulty::Hard => "hard",
            Difficulty::Expert => "expert",
        };
        f.write_str(label)
    }
}

/// Snapshot of an opponent's learning progress.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct OpponentStats {
    /// Completed games.
    pub games_played: u32,

    /// Games won.
    pub wins: u32,

    /// Current exploration rate.
    pub epsilon: f64,

    /// Fingerprints in the Q-table.
    pub states_known: usize,

    pub difficulty: Difficulty,
}

impl OpponentStats {
    /// Fraction of games won, 0 before the first game.
    #[must_use]
    pub fn win_rate(&self) -> f64 {
        if self.games_played == 0 {
            0.0
        } else {
            f64::from(self.wins) / f64::from(self.games_played)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_easy_until_rated() {
        assert_eq!(Difficulty::rate(0, 0), Difficulty::Easy);
        assert_eq!(Difficulty::rate(9, 9), Difficulty::Easy);
        assert_eq!(Difficulty::rate(10, 10), Difficulty::Expert);
    }

    #[test]
    fn test_win_rate_bands() {
        assert_eq!(Difficulty::rate(100, 29), Difficulty::Easy);
        assert_eq!(Difficulty::rate(100, 30), Difficulty::Medium);
        assert_eq!(Difficulty::rate(100, 49), Difficulty::Medium);
        assert_eq!(Difficulty::rate(100, 50), Difficulty::Hard);
        assert_eq!(Difficulty::rate(100, 69), Difficulty::Hard);
        assert_eq!(Difficulty::rate(100, 70), Difficulty::Expert);
    }

    #[test]
    fn test_ordering_and_display() {
        assert!(Difficulty::Easy < Difficulty::Medium);
        assert!(Difficulty::Hard < Difficulty::Expert);
        assert_eq!(Difficulty::Medium.to_string(), "medium");
    }

    #[test]
    fn test_stats_win_rate() {
        let mut stats = OpponentStats {
            games_played: 0,
            wins: 0,
            epsilon: 0.9,
            states_known: 0,
            difficulty: Difficulty::Easy,
        };
        assert_eq!(stats.win_rate(), 0.0);

        stats.games_played = 8;
        stats.wins = 2;
        assert_eq!(stats.win_rate(), 0.25);
    }
}
