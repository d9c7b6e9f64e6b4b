//! Interactive game session.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::core::{GameState, Player};
use crate::error::{EngineError, Result};
use crate::opponent::{AdaptiveOpponent, MovePolicy};
use crate::rules::{GameResult, Pallanguzhi, RulesEngine, Turn};

/// Who sits at the board.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum GameMode {
    #[default]
    HumanVsHuman,
    /// The session's opponent plays its own seat.
    HumanVsComputer,
}

/// One board, the players' intents, and an optional computer opponent.
///
/// The opponent's memory survives `new_game`, so it keeps learning across
/// games in the same session.
#[derive(Clone, Debug)]
pub struct Session {
    engine: Pallanguzhi,
    state: GameState,
    mode: GameMode,
    opponent: Option<AdaptiveOpponent>,
    undo_stack: Vec<GameState>,
    game_recorded: bool,
}

impl Session {
    /// Two humans share the board.
    #[must_use]
    pub fn human_vs_human(engine: Pallanguzhi) -> Self {
        Self {
            state: engine.new_game(),
            engine,
            mode: GameMode::HumanVsHuman,
            opponent: None,
            undo_stack: Vec::new(),
            game_recorded: false,
        }
    }

    /// A human against `opponent`, which plays its own seat.
    #[must_use]
    pub fn human_vs_computer(engine: Pallanguzhi, opponent: AdaptiveOpponent) -> Self {
        Self {
            state: engine.new_game(),
            engine,
            mode: GameMode::HumanVsComputer,
            opponent: Some(opponent),
            undo_stack: Vec::new(),
            game_recorded: false,
        }
    }

    /// Current snapshot.
    #[must_use]
    pub fn state(&self) -> &GameState {
        &self.state
    }

    /// Who sits at the board this game.
    #[must_use]
    pub fn mode(&self) -> GameMode {
        self.mode
    }

    /// Rules this session plays by.
    #[must_use]
    pub fn engine(&self) -> &Pallanguzhi {
        &self.engine
    }

    /// The computer opponent, seated or not.
    #[must_use]
    pub fn opponent(&self) -> Option<&AdaptiveOpponent> {
        self.opponent.as_ref()
    }

    /// Mutable access to the opponent, e.g. to import memory.
    pub fn opponent_mut(&mut self) -> Option<&mut AdaptiveOpponent> {
        self.opponent.as_mut()
    }

    /// Seat played by the computer, if any.
    #[must_use]
    pub fn computer_seat(&self) -> Option<Player> {
        match self.mode {
            GameMode::HumanVsComputer => self.opponent.as_ref().map(AdaptiveOpponent::seat),
            GameMode::HumanVsHuman => None,
        }
    }

    /// True when the computer should move next.
    #[must_use]
    pub fn is_computer_turn(&self) -> bool {
        !self.state.is_over() && self.computer_seat() == Some(self.state.turn)
    }

    /// Result once the game has ended.
    #[must_use]
    pub fn result(&self) -> Option<GameResult> {
        self.engine.result(&self.state)
    }

    /// Play a human pick for the player to move.
    pub fn select_pit(&mut self, pit: usize) -> Result<Turn> {
        if self.is_computer_turn() {
            return Err(EngineError::OutOfTurn { player: self.state.turn });
        }
        if !self.state.is_over() && !self.engine.can_move(&self.state) {
            return Err(EngineError::NoLegalMove { player: self.state.turn });
        }

        let turn = self.engine.play(&self.state, pit)?;
        self.advance(turn.state.clone());
        Ok(turn)
    }

    /// Let the computer move.
    ///
    /// Returns `Ok(None)` when the game is over or the computer had no legal
    /// pick, in which case the turn has been skipped.
    pub fn opponent_turn(&mut self) -> Result<Option<Turn>> {
        if self.state.is_over() {
            return Ok(None);
        }
        if !self.is_computer_turn() {
            return Err(EngineError::OutOfTurn { player: self.state.turn });
        }
        let Some(opponent) = self.opponent.as_mut() else {
            return Err(EngineError::InvalidConfig("session has no opponent".into()));
        };

        let Some(pit) = opponent.choose_move(&self.engine, &self.state) else {
            let next = self.engine.skip_turn(&self.state);
            self.advance(next);
            return Ok(None);
        };

        let turn = self.engine.play(&self.state, pit)?;
        let reward = opponent.position_reward(&turn.state);
        opponent.record_outcome(&turn.state, reward);
        self.advance(turn.state.clone());
        Ok(Some(turn))
    }

    /// Pass the turn when the player to move has no legal pick.
    ///
    /// Returns `false` if there was nothing to skip.
    pub fn skip_turn(&mut self) -> bool {
        let next = self.engine.skip_turn(&self.state);
        if next == self.state {
            return false;
        }
        self.advance(next);
        true
    }

    /// Start over in `mode`. The opponent keeps its memory.
    pub fn new_game(&mut self, mode: GameMode) -> Result<()> {
        if mode == GameMode::HumanVsComputer && self.opponent.is_none() {
            return Err(EngineError::InvalidConfig(
                "human-vs-computer needs an opponent".into(),
            ));
        }
        if let Some(opponent) = self.opponent.as_mut() {
            opponent.reset_episode();
        }
        self.mode = mode;
        self.state = self.engine.new_game();
        self.undo_stack.clear();
        self.game_recorded = false;
        debug!(?mode, "new game");
        Ok(())
    }

    /// Restore the snapshot before the last move. Human-vs-human only.
    ///
    /// Returns `false` when there is nothing to undo.
    pub fn undo(&mut self) -> bool {
        if self.mode != GameMode::HumanVsHuman {
            return false;
        }
        match self.undo_stack.pop() {
            Some(previous) => {
                self.state = previous;
                true
            }
            None => false,
        }
    }

    fn advance(&mut self, next: GameState) {
        let previous = std::mem::replace(&mut self.state, next);
        // Only human-vs-human games can be undone.
        if self.mode == GameMode::HumanVsHuman {
            self.undo_stack.push(previous);
        }
        if self.state.is_over() {
            self.finish_game();
        }
    }

    fn finish_game(&mut self) {
        let result = self.engine.result(&self.state);
        debug!(?result, round = self.state.round, moves = self.state.history.len(), "game over");

        if self.game_recorded || self.mode != GameMode::HumanVsComputer {
            return;
        }
        if let (Some(opponent), Some(result)) = (self.opponent.as_mut(), result) {
            opponent.record_game_end(&self.state, result.is_winner(opponent.seat()));
            self.game_recorded = true;
        }
    }
}
