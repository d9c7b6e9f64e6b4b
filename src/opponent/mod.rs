//! Computer opponents.
//!
//! ## Overview
//!
//! - **MovePolicy**: picks a pit for the player to move, `None` if stuck
//! - **UniformPolicy**: random mover, the baseline for self-play
//! - **AdaptiveOpponent**: ε-greedy Q-learner keyed by `Fingerprint`
//! - **OpponentSnapshot**: exported memory, bincode on the wire
//!
//! The opponent only reads `GameState` values handed to it. The rule engine
//! never touches opponent memory.

pub mod adaptive;
pub mod config;
pub mod fingerprint;
pub mod policy;
pub mod snapshot;
pub mod stats;
pub mod table;

pub use adaptive::{AdaptiveOpponent, RESERVE_REWARD, WIN_REWARD};
pub use config::OpponentConfig;
pub use fingerprint::Fingerprint;
pub use policy::{as_sentinel, FirstLegalPolicy, MovePolicy, UniformPolicy, NO_MOVE};
pub use snapshot::{OpponentSnapshot, SNAPSHOT_VERSION};
pub use stats::{Difficulty, OpponentStats, MIN_RATED_GAMES};
pub use table::QTable;
