//! Q-learning opponent.
//!
//! ## Learning loop
//!
//! 1. `choose_move` fingerprints the position and remembers the
//!    (fingerprint, pit) pair it picked.
//! 2. `record_outcome` is called with the state that followed and an
//!    immediate reward, and updates the remembered pair toward
//!    `reward + γ · max Q(next)`.
//! 3. `record_game_end` applies the terminal reward without bootstrapping,
//!    bumps the counters, decays ε and forgets the pending pair.

use tracing::{debug, trace, warn};

use super::config::OpponentConfig;
use super::fingerprint::Fingerprint;
use super::policy::MovePolicy;
use super::snapshot::{OpponentSnapshot, SNAPSHOT_VERSION};
use super::stats::{Difficulty, OpponentStats};
use super::table::QTable;
use crate::core::{GameRng, GameState, Player};
use crate::error::{EngineError, Result};
use crate::rules::RulesEngine;

/// Terminal reward for a win.
pub const WIN_REWARD: f64 = 100.0;

/// Terminal reward magnitude for a non-win, signed by the reserve difference.
pub const RESERVE_REWARD: f64 = 50.0;

/// Adaptive opponent seated at one side of the board.
#[derive(Clone, Debug)]
pub struct AdaptiveOpponent {
    config: OpponentConfig,
    seat: Player,
    table: QTable,
    epsilon: f64,
    games_played: u32,
    wins: u32,
    rng: GameRng,
    pending: Option<(Fingerprint, usize)>,
}

impl AdaptiveOpponent {
    /// Create a fresh opponent. All randomness comes from `rng`.
    pub fn new(seat: Player, config: OpponentConfig, rng: GameRng) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            epsilon: config.epsilon_start,
            config,
            seat,
            table: QTable::new(),
            games_played: 0,
            wins: 0,
            rng,
            pending: None,
        })
    }

    /// Never explore, now or after future games.
    #[must_use]
    pub fn with_exploration_disabled(mut self) -> Self {
        self.config.epsilon_min = 0.0;
        self.epsilon = 0.0;
        self
    }

    /// Override ε. Clamped to `[0, 1]`; NaN reads as 0.
    pub fn set_epsilon(&mut self, epsilon: f64) {
        self.epsilon = if epsilon.is_nan() { 0.0 } else { epsilon.clamp(0.0, 1.0) };
    }

    /// Seat this opponent plays and learns from.
    #[must_use]
    pub fn seat(&self) -> Player {
        self.seat
    }

    /// Current exploration rate.
    #[must_use]
    pub fn epsilon(&self) -> f64 {
        self.epsilon
    }

    /// Learning parameters.
    #[must_use]
    pub fn config(&self) -> &OpponentConfig {
        &self.config
    }

    /// Learned values, for inspection.
    #[must_use]
    pub fn table(&self) -> &QTable {
        &self.table
    }

    /// Games closed out with `record_game_end`.
    #[must_use]
    pub fn games_played(&self) -> u32 {
        self.games_played
    }

    /// Games among those that this seat won.
    #[must_use]
    pub fn wins(&self) -> u32 {
        self.wins
    }

    /// True while a chosen move awaits its terminal update.
    #[must_use]
    pub fn has_pending(&self) -> bool {
        self.pending.is_some()
    }

    /// Drop the pending pair without updating it, e.g. for an abandoned game.
    pub fn reset_episode(&mut self) {
        self.pending = None;
    }

    /// Immediate reward for a position from this seat:
    /// `10 × reserve difference + board difference`.
    #[must_use]
    pub fn position_reward(&self, state: &GameState) -> f64 {
        let (own, other) = (self.seat, self.seat.other());
        let reserve = f64::from(state.scores[own]) - f64::from(state.scores[other]);
        let board = f64::from(state.board.side_total(own)) - f64::from(state.board.side_total(other));
        reserve * 10.0 + board
    }

    /// Terminal reward for a finished game.
    #[must_use]
    pub fn terminal_reward(&self, state: &GameState, won: bool) -> f64 {
        if won {
            return WIN_REWARD;
        }
        let (own, other) = (state.scores[self.seat], state.scores[self.seat.other()]);
        match own.cmp(&other) {
            std::cmp::Ordering::Greater => RESERVE_REWARD,
            std::cmp::Ordering::Less => -RESERVE_REWARD,
            std::cmp::Ordering::Equal => 0.0,
        }
    }

    /// TD update for the last chosen move, from the state that followed it.
    ///
    /// Does nothing if no move is pending.
    pub fn record_outcome(&mut self, state: &GameState, reward: f64) {
        let Some((fp, pit)) = &self.pending else {
            return;
        };
        let next = Fingerprint::of(state, self.seat);
        let target = reward + self.config.gamma * self.table.max_value(&next);
        let value = self.table.update(fp, *pit, target, self.config.alpha);
        trace!(fingerprint = %fp, pit, reward, target, value, "td update");
    }

    /// Close out a game: terminal update, counters, ε decay.
    pub fn record_game_end(&mut self, state: &GameState, won: bool) {
        let reward = self.terminal_reward(state, won);
        if let Some((fp, pit)) = self.pending.take() {
            let value = self.table.update(&fp, pit, reward, self.config.alpha);
            trace!(fingerprint = %fp, pit, reward, value, "terminal update");
        }

        self.games_played += 1;
        if won {
            self.wins += 1;
        }
        self.epsilon = self.config.decayed(self.epsilon);
        debug!(
            seat = %self.seat,
            won,
            games = self.games_played,
            epsilon = self.epsilon,
            states = self.table.len(),
            "opponent game recorded"
        );
    }

    /// Derived skill label.
    #[must_use]
    pub fn difficulty(&self) -> Difficulty {
        Difficulty::rate(self.games_played, self.wins)
    }

    /// Counters and derived figures for display.
    #[must_use]
    pub fn stats(&self) -> OpponentStats {
        OpponentStats {
            games_played: self.games_played,
            wins: self.wins,
            epsilon: self.epsilon,
            states_known: self.table.len(),
            difficulty: self.difficulty(),
        }
    }

    /// Export the full memory, RNG position and pending move included.
    #[must_use]
    pub fn export_memory(&self) -> OpponentSnapshot {
        OpponentSnapshot {
            version: SNAPSHOT_VERSION,
            seat: self.seat,
            table: self.table.to_sorted(),
            epsilon: self.epsilon,
            games_played: self.games_played,
            wins: self.wins,
            rng: self.rng.state(),
            pending: self.pending.as_ref().map(|(fp, pit)| (fp.as_str().to_owned(), *pit)),
        }
    }

    /// Replace the memory with a snapshot.
    ///
    /// The snapshot is validated and the new table fully built before
    /// anything is swapped in. On error the current memory is untouched.
    pub fn import_memory(&mut self, snapshot: &OpponentSnapshot) -> Result<()> {
        if let Err(e) = self.check_snapshot(snapshot) {
            warn!(error = %e, "rejected opponent snapshot");
            return Err(e);
        }

        let table = QTable::from_sorted(&snapshot.table);
        let rng = GameRng::from_state(&snapshot.rng);

        self.table = table;
        self.rng = rng;
        self.epsilon = snapshot.epsilon;
        self.games_played = snapshot.games_played;
        self.wins = snapshot.wins;
        self.pending = snapshot
            .pending
            .as_ref()
            .map(|(key, pit)| (Fingerprint::from_raw(key.as_str()), *pit));
        debug!(states = self.table.len(), games = self.games_played, "opponent memory imported");
        Ok(())
    }

    /// Decode bincode bytes and import them.
    pub fn import_bytes(&mut self, bytes: &[u8]) -> Result<()> {
        let snapshot = OpponentSnapshot::from_bytes(bytes).map_err(|e| {
            warn!(error = %e, "rejected opponent snapshot");
            e
        })?;
        self.import_memory(&snapshot)
    }

    fn check_snapshot(&self, snapshot: &OpponentSnapshot) -> Result<()> {
        snapshot.validate()?;
        if snapshot.seat != self.seat {
            return Err(EngineError::CorruptSnapshot(format!(
                "snapshot was learned as {}, opponent sits as {}",
                snapshot.seat, self.seat
            )));
        }
        Ok(())
    }
}

impl<E: RulesEngine> MovePolicy<E> for AdaptiveOpponent {
    /// ε-greedy choice over the legal picks. Returns `None` when it is not
    /// this seat's turn or no pick is legal.
    fn choose_move(&mut self, engine: &E, state: &GameState) -> Option<usize> {
        if state.turn != self.seat {
            return None;
        }
        let moves = engine.legal_moves(state);
        if moves.is_empty() {
            debug!(seat = %self.seat, "opponent has no legal move");
            return None;
        }

        let fp = Fingerprint::of(state, self.seat);
        let explore = self.rng.gen_bool(self.epsilon);
        let pit = if explore {
            moves[self.rng.index(moves.len())]
        } else {
            self.table.best(&fp, &moves)?
        };

        trace!(fingerprint = %fp, pit, explore, "opponent move");
        self.pending = Some((fp, pit));
        Some(pit)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{Board, RuleConfig};
    use crate::rules::Pallanguzhi;

    fn opponent(seed: u64) -> AdaptiveOpponent {
        AdaptiveOpponent::new(Player::Two, OpponentConfig::default(), GameRng::new(seed)).unwrap()
    }

    fn two_to_move() -> GameState {
        GameState::from_board(Board::filled(5), Player::Two)
    }

    #[test]
    fn test_new_opponent() {
        let ai = opponent(1);
        assert_eq!(ai.epsilon(), 0.9);
        assert_eq!(ai.games_played(), 0);
        assert_eq!(ai.difficulty(), Difficulty::Easy);
        assert!(ai.table().is_empty());
        assert!(!ai.has_pending());
    }

    #[test]
    fn test_new_rejects_bad_config() {
        let config = OpponentConfig::new().with_alpha(2.0);
        assert!(AdaptiveOpponent::new(Player::Two, config, GameRng::new(0)).is_err());
    }

    #[test]
    fn test_greedy_picks_lowest_unseen() {
        let engine = Pallanguzhi::default();
        let mut ai = opponent(1).with_exploration_disabled();

        assert_eq!(ai.choose_move(&engine, &two_to_move()), Some(7));
        assert!(ai.has_pending());
    }

    #[test]
    fn test_not_my_turn_or_no_moves() {
        let engine = Pallanguzhi::default();
        let mut ai = opponent(1);

        let state = GameState::new(&RuleConfig::default());
        assert_eq!(ai.choose_move(&engine, &state), None);

        let stuck = two_to_move().with_unusable(&[7, 8, 9, 10, 11, 12, 13]);
        assert_eq!(ai.choose_move(&engine, &stuck), None);
        assert!(!ai.has_pending());
    }

    #[test]
    fn test_record_outcome_updates_pending_pair() {
        let engine = Pallanguzhi::default();
        let mut ai = opponent(1).with_exploration_disabled();
        let state = two_to_move();

        let pit = ai.choose_move(&engine, &state).unwrap();
        let fp = Fingerprint::of(&state, Player::Two);
        ai.record_outcome(&state, 20.0);

        // 0 + 0.1 * (20 + 0.95 * 0) = 2.0
        assert!((ai.table().value(&fp, pit) - 2.0).abs() < 1e-12);

        // Same pair again, now bootstrapping from its own value.
        ai.record_outcome(&state, 0.0);
        let after = ai.table().value(&fp, pit);
        // 2 + 0.1 * (0 + 0.95 * 2 - 2) = 1.99
        assert!((after - 1.99).abs() < 1e-12);
    }

    #[test]
    fn test_learns_to_prefer_rewarded_pit() {
        let engine = Pallanguzhi::default();
        let mut ai = opponent(1).with_exploration_disabled();
        let state = two_to_move();

        assert_eq!(ai.choose_move(&engine, &state), Some(7));
        ai.record_outcome(&state, -10.0);

        // Pit 7 now has a negative value; 8 is the first unseen pit.
        assert_eq!(ai.choose_move(&engine, &state), Some(8));
    }

    #[test]
    fn test_record_game_end() {
        let engine = Pallanguzhi::default();
        let mut ai = opponent(1).with_exploration_disabled();
        let state = two_to_move();
        let fp = Fingerprint::of(&state, Player::Two);

        ai.choose_move(&engine, &state);
        ai.record_game_end(&state, true);

        assert!((ai.table().value(&fp, 7) - 10.0).abs() < 1e-12);
        assert_eq!(ai.games_played(), 1);
        assert_eq!(ai.wins(), 1);
        assert!(!ai.has_pending());
        assert_eq!(ai.epsilon(), 0.0);
    }

    #[test]
    fn test_epsilon_decays_per_game() {
        let mut ai = opponent(1);
        let state = two_to_move();

        ai.record_game_end(&state, false);
        assert!((ai.epsilon() - 0.9 * 0.995).abs() < 1e-12);

        for _ in 0..2000 {
            ai.record_game_end(&state, false);
        }
        assert_eq!(ai.epsilon(), 0.1);
        assert_eq!(ai.difficulty(), Difficulty::Easy);
    }

    #[test]
    fn test_terminal_reward() {
        let ai = opponent(1);
        let ahead = two_to_move().with_scores(10, 30);
        let behind = two_to_move().with_scores(30, 10);
        let level = two_to_move().with_scores(20, 20);

        assert_eq!(ai.terminal_reward(&behind, true), 100.0);
        assert_eq!(ai.terminal_reward(&ahead, false), 50.0);
        assert_eq!(ai.terminal_reward(&behind, false), -50.0);
        assert_eq!(ai.terminal_reward(&level, false), 0.0);
    }

    #[test]
    fn test_position_reward() {
        let ai = opponent(1);
        let mut board = Board::empty();
        board[0] = 4;
        board[9] = 10;
        let state = GameState::from_board(board, Player::Two).with_scores(26, 30);

        // 10 * (30 - 26) + (10 - 4)
        assert_eq!(ai.position_reward(&state), 46.0);
    }

    #[test]
    fn test_set_epsilon_clamps() {
        let mut ai = opponent(1);
        ai.set_epsilon(3.0);
        assert_eq!(ai.epsilon(), 1.0);
        ai.set_epsilon(f64::NAN);
        assert_eq!(ai.epsilon(), 0.0);
    }

    #[test]
    fn test_import_restores_pending_move() {
        let engine = Pallanguzhi::default();
        let mut ai = opponent(1).with_exploration_disabled();
        let state = two_to_move();
        let pit = ai.choose_move(&engine, &state).unwrap();

        let mut restored = opponent(2);
        restored.import_memory(&ai.export_memory()).unwrap();
        assert!(restored.has_pending());

        restored.record_outcome(&state, 20.0);
        let fp = Fingerprint::of(&state, Player::Two);
        assert!((restored.table().value(&fp, pit) - 2.0).abs() < 1e-12);
    }

    #[test]
    fn test_import_rejects_wrong_seat() {
        let mut one = AdaptiveOpponent::new(Player::One, OpponentConfig::default(), GameRng::new(2)).unwrap();
        let snapshot = opponent(1).export_memory();

        assert!(matches!(one.import_memory(&snapshot), Err(EngineError::CorruptSnapshot(_))));
    }

    #[test]
    fn test_stats() {
        let mut ai = opponent(1);
        let state = two_to_move();
        for i in 0..10 {
            ai.record_game_end(&state, i % 2 == 0);
        }

        let stats = ai.stats();
        assert_eq!(stats.games_played, 10);
        assert_eq!(stats.wins, 5);
        assert_eq!(stats.win_rate(), 0.5);
        assert_eq!(stats.difficulty, Difficulty::Hard);
    }
}
