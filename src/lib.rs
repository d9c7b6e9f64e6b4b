//! # pallanguzhi
//!
//! Rule engine for Pallanguzhi, the fourteen-pit mancala of South India,
//! with a Q-learning opponent that improves across games.
//!
//! ## Design Principles
//!
//! 1. **Immutable Snapshots**: Every engine call takes a `GameState` and
//!    returns a new one. Callers replace their current state wholesale, so
//!    undo and replay come for free.
//!
//! 2. **Explicit Rule Variants**: Capture style and the game-over threshold
//!    are `RuleConfig` enums chosen at game start.
//!
//! 3. **Seeded Randomness**: Nothing reads a global RNG. The opponent owns a
//!    `GameRng` handed to it at construction, and its position is part of
//!    the exported memory.
//!
//! ## Modules
//!
//! - `core`: Board, players, state snapshots, move results, RNG, rule config
//! - `rules`: Validator, sowing/capture, round manager, `RulesEngine`
//! - `opponent`: Move policies and the adaptive opponent
//! - `session`: Turn sequencing for a front end
//! - `training`: Self-play against a rival policy
//! - `error`: `EngineError`
//!
//! ## Example
//!
//! ```rust
//! use pallanguzhi::{Pallanguzhi, Player, RulesEngine};
//!
//! let engine = Pallanguzhi::default();
//! let state = engine.new_game();
//!
//! let turn = engine.play(&state, 2).unwrap();
//! assert_eq!(turn.state.turn, Player::Two);
//! assert_eq!(turn.state.total_shells(), 70);
//! ```

pub mod core;
pub mod error;
pub mod opponent;
pub mod rules;
pub mod session;
pub mod training;

// Re-export commonly used types
pub use crate::core::{
    Board, Capture, CaptureKind, CaptureRule, EndThreshold, GamePhase, GameRng, GameRngState,
    GameState, MoveRecord, MoveResult, Player, PlayerMap, RuleConfig, SowLeg, PIT_COUNT,
    PITS_PER_SIDE,
};

pub use crate::error::{EngineError, Result};

pub use crate::rules::{
    advance_round, apply_move, is_legal, legal_moves, GameResult, IllegalMove, Pallanguzhi,
    RoundTransition, RulesEngine, Turn,
};

pub use crate::opponent::{
    as_sentinel, AdaptiveOpponent, Difficulty, Fingerprint, MovePolicy, OpponentConfig,
    OpponentSnapshot, OpponentStats, UniformPolicy, NO_MOVE,
};

pub use crate::session::{GameMode, Session};

pub use crate::training::{SelfPlayConfig, SelfPlayTrainer, TrainingReport};
