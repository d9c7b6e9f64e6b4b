//! Exported opponent memory.
//!
//! A snapshot carries everything that drives future choices: the Q-table,
//! ε, the game counters, the RNG position and the move still awaiting its
//! update. Importing a snapshot into a fresh opponent, even mid-game,
//! therefore reproduces the original's behaviour exactly.
//!
//! The table is stored in `BTreeMap`s so two exports of the same memory
//! encode to the same bytes.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::core::{GameRngState, Player, PITS_PER_SIDE};
use crate::error::{EngineError, Result};

/// Format version written by `export_memory`.
pub const SNAPSHOT_VERSION: u32 = 2;

/// Serializable opponent memory.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct OpponentSnapshot {
    pub version: u32,

    /// Seat the table was learned from. Pit indices are absolute.
    pub seat: Player,

    /// Fingerprint → pit → value.
    pub table: BTreeMap<String, BTreeMap<usize, f64>>,

    pub epsilon: f64,
    pub games_played: u32,
    pub wins: u32,
    pub rng: GameRngState,

    /// Fingerprint and pit of the last choice not yet updated.
    pub pending: Option<(String, usize)>,
}

impl OpponentSnapshot {
    /// Encode with bincode.
    pub fn to_bytes(&self) -> Result<Vec<u8>> {
        bincode::serialize(self).map_err(|e| EngineError::CorruptSnapshot(e.to_string()))
    }

    /// Decode and validate.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self> {
        let snapshot: Self =
            bincode::deserialize(bytes).map_err(|e| EngineError::CorruptSnapshot(e.to_string()))?;
        snapshot.validate()?;
        Ok(snapshot)
    }

    /// Check every field. The first problem found is reported.
    pub fn validate(&self) -> Result<()> {
        if self.version != SNAPSHOT_VERSION {
            return Err(corrupt(format!(
                "unsupported version {} (expected {SNAPSHOT_VERSION})",
                self.version
            )));
        }
        if !(0.0..=1.0).contains(&self.epsilon) {
            return Err(corrupt(format!("epsilon {} out of range", self.epsilon)));
        }
        if self.wins > self.games_played {
            return Err(corrupt(format!(
                "{} wins in {} games",
                self.wins, self.games_played
            )));
        }

        if let Some((key, pit)) = &self.pending {
            if !is_well_formed(key) {
                return Err(corrupt(format!("malformed pending fingerprint {key:?}")));
            }
            if !self.seat.owns(*pit) {
                return Err(corrupt(format!("pending pit {pit} is not on {}'s side", self.seat)));
            }
        }

        for (key, actions) in &self.table {
            if !is_well_formed(key) {
                return Err(corrupt(format!("malformed fingerprint {key:?}")));
            }
            for (&pit, value) in actions {
                if !self.seat.owns(pit) {
                    return Err(corrupt(format!("pit {pit} is not on {}'s side", self.seat)));
                }
                if !value.is_finite() {
                    return Err(corrupt(format!("non-finite value at {key:?}/{pit}")));
                }
            }
        }
        Ok(())
    }
}

fn corrupt(msg: String) -> EngineError {
    EngineError::CorruptSnapshot(msg)
}

/// `a,a,a,a,a,a,a_b,b,b,b,b,b,b_d` with unsigned pit counts and a signed diff.
fn is_well_formed(key: &str) -> bool {
    let parts: Vec<&str> = key.split('_').collect();
    let [own, other, diff] = parts.as_slice() else {
        return false;
    };
    let side_ok = |side: &str| {
        let pits: Vec<&str> = side.split(',').collect();
        pits.len() == PITS_PER_SIDE && pits.iter().all(|p| p.parse::<u32>().is_ok())
    };
    side_ok(*own) && side_ok(*other) && diff.parse::<i64>().is_ok()
}
