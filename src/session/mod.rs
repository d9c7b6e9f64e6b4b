//! Session layer between a front end and the engine.
//!
//! A front end forwards pit selections to `Session::select_pit`, calls
//! `opponent_turn` whenever `is_computer_turn` is true, and redraws from
//! `state()`. The session owns sequencing and feeds the opponent's learning
//! hooks.

pub mod game_session;

pub use game_session::{GameMode, Session};
