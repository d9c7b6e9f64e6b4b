//! The Pallanguzhi rule engine.
//!
//! - `validator`: which pits may be picked
//! - `sowing`: sowing, relay and capture for one pick
//! - `round`: refilling emptied halves and deciding game over
//! - `engine`: the `RulesEngine` trait and the `Pallanguzhi` step function
//!
//! Everything here is a pure function of its inputs. Callers hold the
//! current `GameState` and replace it with whatever `play` returns.

pub mod engine;
pub mod round;
pub mod sowing;
pub mod validator;

pub use engine::{GameResult, Pallanguzhi, RulesEngine, Turn};
pub use round::{advance_round, decide_winner, is_round_over, Refill, RoundTransition};
pub use sowing::apply_move;
pub use validator::{check_move, check_state_move, is_legal, legal_moves, state_legal_moves, IllegalMove};
