//! Rules engine trait and the Pallanguzhi implementation.
//!
//! `play` is the single step function: it validates, sows, and runs the
//! round manager, returning a fresh snapshot. The input state is never
//! mutated.

use smallvec::SmallVec;
use tracing::debug;

use super::round::{advance_round, decide_winner, is_round_over, RoundTransition};
use super::sowing::apply_move;
use super::validator::{check_state_move, state_legal_moves};
use crate::core::{GamePhase, GameState, MoveRecord, MoveResult, Player, RuleConfig};
use crate::error::{EngineError, Result};

/// Result of a completed game.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum GameResult {
    /// Single winner.
    Winner(Player),
    /// Equal reserves.
    Draw,
}

impl GameResult {
    /// Check if a player won.
    #[must_use]
    pub fn is_winner(&self, player: Player) -> bool {
        matches!(self, GameResult::Winner(p) if *p == player)
    }
}

/// Everything one pick produced.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Turn {
    /// The snapshot after the move (and any round transition).
    pub state: GameState,
    /// Sowing and capture details.
    pub outcome: MoveResult,
    /// Present when the move emptied a half.
    pub round: Option<RoundTransition>,
}

/// Rules engine trait.
///
/// ## Implementation Notes
///
/// - `legal_moves`: empty if the player to move cannot act
/// - `play`: deterministic, never mutates its input
/// - `result`: `None` while the game continues
pub trait RulesEngine {
    /// Get the rule configuration.
    fn rules(&self) -> &RuleConfig;

    /// Legal pits for the player to move, ascending.
    fn legal_moves(&self, state: &GameState) -> SmallVec<[usize; 7]>;

    /// Play a pick for the player to move.
    fn play(&self, state: &GameState, pit: usize) -> Result<Turn>;

    /// Check if the game is over.
    fn result(&self, state: &GameState) -> Option<GameResult>;

    /// True when the player to move has at least one legal pick.
    fn can_move(&self, state: &GameState) -> bool {
        !self.legal_moves(state).is_empty()
    }
}

/// Standard Pallanguzhi rules.
#[derive(Clone, Debug, Default)]
pub struct Pallanguzhi {
    rules: RuleConfig,
}

impl Pallanguzhi {
    /// Create an engine after validating the configuration.
    pub fn new(rules: RuleConfig) -> Result<Self> {
        rules.validate()?;
        Ok(Self { rules })
    }

    /// Opening position for these rules.
    #[must_use]
    pub fn new_game(&self) -> GameState {
        GameState::new(&self.rules)
    }

    /// Fold a move result into a snapshot without running the round
    /// manager. The phase is `RoundEnd` if a half is now empty.
    #[must_use]
    pub fn resolve_move(&self, state: &GameState, outcome: &MoveResult) -> GameState {
        let mut next = state.clone();
        next.board = outcome.board;
        next.scores = outcome.scores.clone();
        next.history
            .push_back(MoveRecord::new(outcome.player, outcome.pit, state.round, state.next_sequence()));
        next.last_move = Some(outcome.clone());
        next.turn = outcome.player.other();
        if is_round_over(&next.board) {
            next.phase = GamePhase::RoundEnd;
        }
        next
    }

    /// Resolve a `RoundEnd` snapshot into `Playing` or `Ended`.
    #[must_use]
    pub fn finish_round(&self, state: &GameState) -> (GameState, RoundTransition) {
        let transition = advance_round(&state.board, &state.scores, &state.unusable, state.round, &self.rules);
        let mut next = state.clone();
        next.board = transition.board;
        next.scores = transition.scores.clone();
        next.unusable = transition.unusable.clone();
        next.phase = transition.phase;
        next.round = transition.round;
        debug!(round = next.round, phase = ?next.phase, "round boundary");
        (next, transition)
    }

    /// Handle a player to move who has no legal pick.
    ///
    /// The turn passes to the other player; if they cannot move either the
    /// game ends. Returns the state unchanged when the player to move has a
    /// legal pick or the game is not in live play.
    #[must_use]
    pub fn skip_turn(&self, state: &GameState) -> GameState {
        if state.phase != GamePhase::Playing || self.can_move(state) {
            return state.clone();
        }

        let mut next = state.clone();
        next.turn = state.turn.other();
        if !self.can_move(&next) {
            debug!("neither player can move, ending game");
            next.phase = GamePhase::Ended;
        } else {
            debug!(skipped = %state.turn, "no legal move, turn passes");
        }
        next
    }
}

impl RulesEngine for Pallanguzhi {
    fn rules(&self) -> &RuleConfig {
        &self.rules
    }

    fn legal_moves(&self, state: &GameState) -> SmallVec<[usize; 7]> {
        state_legal_moves(state)
    }

    fn play(&self, state: &GameState, pit: usize) -> Result<Turn> {
        check_state_move(state, pit).map_err(|reason| EngineError::IllegalMove { pit, reason })?;

        let outcome = apply_move(&state.board, &state.scores, state.turn, pit, &self.rules);
        debug!(
            player = %state.turn,
            pit,
            landing = outcome.landing,
            relays = outcome.relay_count(),
            captured = outcome.captured_by(state.turn),
            "move played"
        );

        let resolved = self.resolve_move(state, &outcome);
        let (state, round) = if resolved.phase == GamePhase::RoundEnd {
            let (next, transition) = self.finish_round(&resolved);
            (next, Some(transition))
        } else {
            (resolved, None)
        };

        Ok(Turn { state, outcome, round })
    }

    fn result(&self, state: &GameState) -> Option<GameResult> {
        state.is_over().then(|| decide_winner(&state.scores))
    }
}
