//! Core types: players, board, state snapshots, move results, RNG,
//! rule configuration.
//!
//! Everything here is plain data. Behaviour lives in `rules` and `opponent`.

pub mod action;
pub mod board;
pub mod config;
pub mod outcome;
pub mod player;
pub mod rng;
pub mod state;

pub use action::MoveRecord;
pub use board::{Board, PITS_PER_SIDE, PIT_COUNT};
pub use config::{CaptureRule, EndThreshold, RuleConfig};
pub use outcome::{Capture, CaptureKind, MoveResult, SowLeg};
pub use player::{Player, PlayerMap};
pub use rng::{GameRng, GameRngState};
pub use state::{GamePhase, GameState};
