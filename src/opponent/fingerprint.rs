//! State fingerprints used as Q-table keys.
//!
//! A fingerprint is the board split by owner plus the signed reserve
//! difference, all seen from one seat:
//!
//! ```text
//! 5,5,5,5,5,5,5_5,5,5,5,5,5,5_0
//! ```
//!
//! Unusable pits and the round number are left out, so structurally similar
//! positions share an entry.

use std::fmt;
use std::fmt::Write as _;

use serde::{Deserialize, Serialize};

use crate::core::{GameState, Player};

/// Compact summary of a position from one player's seat.
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Fingerprint(String);

impl Fingerprint {
    /// Fingerprint `state` as seen by `seat`.
    #[must_use]
    pub fn of(state: &GameState, seat: Player) -> Self {
        let mut key = String::with_capacity(48);
        push_side(&mut key, state, seat);
        key.push('_');
        push_side(&mut key, state, seat.other());

        let diff = i64::from(state.scores[seat]) - i64::from(state.scores[seat.other()]);
        // Writing to a String cannot fail.
        let _ = write!(key, "_{diff}");
        Self(key)
    }

    /// Wrap a raw key, e.g. one read back from a snapshot.
    #[must_use]
    pub fn from_raw(key: impl Into<String>) -> Self {
        Self(key.into())
    }

    /// The raw key.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

fn push_side(key: &mut String, state: &GameState, player: Player) {
    for (i, pit) in player.pits().enumerate() {
        if i > 0 {
            key.push(',');
        }
        key.push_str(&state.board[pit].to_string());
    }
}

impl fmt::Display for Fingerprint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
