//! Per-game records and the training report.

use serde::{Deserialize, Serialize};

use crate::core::{MoveRecord, Player, PlayerMap};
use crate::opponent::Difficulty;

/// How a self-play game finished, from the learner's seat.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Outcome {
    Win,
    Loss,
    Draw,
}

/// One self-play game.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct GameRecord {
    /// Seed handed to the rival factory for this game.
    pub seed: u64,

    /// Seat the learner played.
    pub learner: Player,

    /// Every pick, in order.
    pub moves: Vec<MoveRecord>,

    /// Reserves when the game stopped.
    pub final_scores: PlayerMap<u32>,

    /// Rounds started.
    pub rounds: u32,

    pub outcome: Outcome,

    /// True when the game hit `max_moves` and was decided by reserves.
    pub adjudicated: bool,
}

impl GameRecord {
    /// Number of picks made.
    #[must_use]
    pub fn len(&self) -> usize {
        self.moves.len()
    }

    /// True when no pick was made.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.moves.is_empty()
    }

    /// Picks made by one player.
    pub fn player_moves(&self, player: Player) -> impl Iterator<Item = &MoveRecord> {
        self.moves.iter().filter(move |m| m.player == player)
    }
}

/// Summary of a training run.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct TrainingReport {
    pub games: u32,
    pub wins: u32,
    pub losses: u32,
    pub draws: u32,

    /// Games decided by reserves after hitting `max_moves`.
    pub adjudicated: u32,

    /// Learner win rate for each consecutive window of games.
    pub window_win_rates: Vec<f64>,

    /// Learner's label after the run.
    pub difficulty: Difficulty,

    /// Learner's ε after the run.
    pub epsilon: f64,
}

impl TrainingReport {
    /// Win rate over the whole run.
    #[must_use]
    pub fn win_rate(&self) -> f64 {
        if self.games == 0 {
            0.0
        } else {
            f64::from(self.wins) / f64::from(self.games)
        }
    }

    /// Tally one finished game.
    pub fn count(&mut self, record: &GameRecord) {
        self.games += 1;
        match record.outcome {
            Outcome::Win => self.wins += 1,
            Outcome::Loss => self.losses += 1,
            Outcome::Draw => self.draws += 1,
        }
        if record.adjudicated {
            self.adjudicated += 1;
        }
    }
}

impl Default for TrainingReport {
    fn default() -> Self {
        Self {
            games: 0,
            wins: 0,
            losses: 0,
            draws: 0,
            adjudicated: 0,
            window_win_rates: Vec::new(),
            difficulty: Difficulty::Easy,
            epsilon: 0.0,
        }
    }
}

/// Win rate per consecutive chunk of `window` outcomes. A trailing partial
/// chunk is included.
#[must_use]
pub fn window_win_rates(outcomes: &[Outcome], window: usize) -> Vec<f64> {
    if window == 0 {
        return Vec::new();
    }
    outcomes
        .chunks(window)
        .map(|chunk| {
            let wins = chunk.iter().filter(|&&o| o == Outcome::Win).count();
            wins as f64 / chunk.len() as f64
        })
        .collect()
}
