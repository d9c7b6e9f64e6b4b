//! Self-play training for the adaptive opponent.
//!
//! ## Overview
//!
//! - **SelfPlayTrainer**: plays the learner against a rival policy
//! - **GameRecord**: the picks and outcome of one game
//! - **TrainingReport**: totals and per-window win rates for a run
//!
//! ## Usage
//!
//! ```rust
//! use pallanguzhi::core::{GameRng, Player};
//! use pallanguzhi::opponent::{AdaptiveOpponent, OpponentConfig, UniformPolicy};
//! use pallanguzhi::rules::Pallanguzhi;
//! use pallanguzhi::training::{SelfPlayConfig, SelfPlayTrainer};
//!
//! let mut learner =
//!     AdaptiveOpponent::new(Player::Two, OpponentConfig::default(), GameRng::new(7)).unwrap();
//! let config = SelfPlayConfig::default().with_games(5).with_window(5);
//! let trainer = SelfPlayTrainer::new(Pallanguzhi::default(), config);
//!
//! let report = trainer
//!     .run(&mut learner, |seed| UniformPolicy::new(GameRng::new(seed)))
//!     .unwrap();
//! assert_eq!(report.games, 5);
//! assert_eq!(learner.games_played(), 5);
//! ```

pub mod record;
pub mod self_play;

pub use record::{window_win_rates, GameRecord, Outcome, TrainingReport};
pub use self_play::{SelfPlayConfig, SelfPlayTrainer};
