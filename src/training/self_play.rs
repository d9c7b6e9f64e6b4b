//! Self-play loop for training the adaptive opponent.
//!
//! The learner plays a rival `MovePolicy` game after game. The learner's
//! hooks run exactly as they would in a live session: `record_outcome`
//! after each of its moves, `record_game_end` once per game.

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::error::Result;
use crate::opponent::{AdaptiveOpponent, MovePolicy};
use crate::rules::{decide_winner, GameResult, Pallanguzhi, RulesEngine};

use super::record::{window_win_rates, GameRecord, Outcome, TrainingReport};

/// Configuration for self-play.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SelfPlayConfig {
    /// Games to play.
    pub games: u32,

    /// Maximum picks per game. Longer games are decided by reserves.
    pub max_moves: usize,

    /// Seed offset (combined with game index for per-game seeds).
    pub seed_offset: u64,

    /// Games per win-rate window in the report.
    pub window: usize,
}

impl Default for SelfPlayConfig {
    fn default() -> Self {
        Self {
            games: 500,
            max_moves: 500,
            seed_offset: 0,
            window: 50,
        }
    }
}

impl SelfPlayConfig {
    /// Create a new self-play config.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the number of games.
    pub fn with_games(mut self, games: u32) -> Self {
        self.games = games;
        self
    }

    /// Set maximum picks per game.
    pub fn with_max_moves(mut self, max: usize) -> Self {
        self.max_moves = max;
        self
    }

    /// Set seed offset.
    pub fn with_seed_offset(mut self, offset: u64) -> Self {
        self.seed_offset = offset;
        self
    }

    /// Set the report window.
    pub fn with_window(mut self, window: usize) -> Self {
        self.window = window;
        self
    }

    /// Seed for game `index`.
    #[must_use]
    pub fn game_seed(&self, index: u32) -> u64 {
        self.seed_offset.wrapping_add(u64::from(index))
    }
}

/// Runs learner-vs-rival games.
#[derive(Clone, Debug)]
pub struct SelfPlayTrainer {
    engine: Pallanguzhi,
    config: SelfPlayConfig,
}

impl SelfPlayTrainer {
    /// Create a new trainer.
    pub fn new(engine: Pallanguzhi, config: SelfPlayConfig) -> Self {
        Self { engine, config }
    }

    /// Get the configuration.
    pub fn config(&self) -> &SelfPlayConfig {
        &self.config
    }

    /// Play one game from the opening position.
    pub fn play_game<P: MovePolicy<Pallanguzhi>>(
        &self,
        learner: &mut AdaptiveOpponent,
        rival: &mut P,
        seed: u64,
    ) -> Result<GameRecord> {
        let seat = learner.seat();
        let mut state = self.engine.new_game();

        while !state.is_over() && state.history.len() < self.config.max_moves {
            let choice = if state.turn == seat {
                learner.choose_move(&self.engine, &state)
            } else {
                rival.choose_move(&self.engine, &state)
            };
            let Some(pit) = choice else {
                let next = self.engine.skip_turn(&state);
                if next == state {
                    // The policy passed although it had a legal pick.
                    break;
                }
                state = next;
                continue;
            };

            let turn = self.engine.play(&state, pit)?;
            if turn.outcome.player == seat {
                learner.record_outcome(&turn.state, learner.position_reward(&turn.state));
            }
            state = turn.state;
        }

        let adjudicated = !state.is_over();
        let result = self.engine.result(&state).unwrap_or_else(|| decide_winner(&state.scores));
        learner.record_game_end(&state, result.is_winner(seat));

        let outcome = match result {
            GameResult::Draw => Outcome::Draw,
            r if r.is_winner(seat) => Outcome::Win,
            _ => Outcome::Loss,
        };
        debug!(seed, moves = state.history.len(), ?outcome, adjudicated, "self-play game finished");

        Ok(GameRecord {
            seed,
            learner: seat,
            moves: state.history.iter().copied().collect(),
            final_scores: state.scores.clone(),
            rounds: state.round,
            outcome,
            adjudicated,
        })
    }

    /// Play `config.games` games. `rival_for` builds the rival for each
    /// game from that game's seed.
    pub fn run<P, F>(&self, learner: &mut AdaptiveOpponent, mut rival_for: F) -> Result<TrainingReport>
    where
        P: MovePolicy<Pallanguzhi>,
        F: FnMut(u64) -> P,
    {
        let mut report = TrainingReport::default();
        let mut outcomes = Vec::with_capacity(self.config.games as usize);

        info!(games = self.config.games, max_moves = self.config.max_moves, "self-play started");
        for index in 0..self.config.games {
            let seed = self.config.game_seed(index);
            let mut rival = rival_for(seed);
            let record = self.play_game(learner, &mut rival, seed)?;

            report.count(&record);
            outcomes.push(record.outcome);

            let window = self.config.window;
            if window > 0 && outcomes.len() % window == 0 {
                let recent = &outcomes[outcomes.len() - window..];
                let rate = window_win_rates(recent, window)[0];
                info!(
                    games = report.games,
                    window_win_rate = rate,
                    epsilon = learner.epsilon(),
                    difficulty = %learner.difficulty(),
                    "self-play progress"
                );
            }
        }

        report.window_win_rates = window_win_rates(&outcomes, self.config.window);
        report.difficulty = learner.difficulty();
        report.epsilon = learner.epsilon();
        info!(
            games = report.games,
            wins = report.wins,
            losses = report.losses,
            draws = report.draws,
            difficulty = %report.difficulty,
            "self-play finished"
        );
        Ok(report)
    }
}
