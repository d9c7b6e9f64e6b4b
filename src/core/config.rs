//! Rule configuration, selected once at game start.
//!
//! The capture rule and the game-over threshold exist in two flavours each.
//! Games pick one explicitly via `RuleConfig`; the engine never infers a
//! variant from board contents.

use serde::{Deserialize, Serialize};

use super::board::PIT_COUNT;
use crate::error::{EngineError, Result};

/// Which capture rule a game is played with.
///
/// The two rules are separate game modes and never combine.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CaptureRule {
    /// Relay sowing, then when the last shell lands in an empty pit the
    /// mover captures the next pit, or the pit opposite the next pit if
    /// the next pit is empty.
    #[default]
    NextOrOpposite,
    /// Relay sowing where any pit reaching exactly four shells mid-sow is
    /// emptied into its owner's reserve. No end-of-move capture.
    FourShell,
}

/// When a failed refill ends the game.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EndThreshold {
    /// The game ends when an emptied player can refill at most one pit.
    #[default]
    AtMostOnePit,
    /// The game ends only when an emptied player cannot refill any pit.
    BelowOneRefill,
}

impl EndThreshold {
    /// Does refilling `pits_fillable` pits end the game?
    #[must_use]
    pub fn ends_game(self, pits_fillable: usize) -> bool {
        match self {
            EndThreshold::AtMostOnePit => pits_fillable <= 1,
            EndThreshold::BelowOneRefill => pits_fillable == 0,
        }
    }
}

/// Complete rule configuration.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RuleConfig {
    /// Shells placed in every pit at game start.
    pub shells_per_pit: u32,

    /// Shells a refilled pit receives from its owner's reserve.
    pub refill_per_pit: u32,

    /// Capture rule variant.
    pub capture_rule: CaptureRule,

    /// Refill threshold below which the game ends.
    pub end_threshold: EndThreshold,

    /// Maximum relay legs in one move before the move is cut short.
    pub relay_limit: u32,
}

impl Default for RuleConfig {
    fn default() -> Self {
        Self {
            shells_per_pit: 5,
            refill_per_pit: 5,
            capture_rule: CaptureRule::NextOrOpposite,
            end_threshold: EndThreshold::AtMostOnePit,
            relay_limit: 1_000,
        }
    }
}

impl RuleConfig {
    /// Create the standard 14 × 5 configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the capture rule.
    #[must_use]
    pub fn with_capture_rule(mut self, rule: CaptureRule) -> Self {
        self.capture_rule = rule;
        self
    }

    /// Set the end-of-game threshold.
    #[must_use]
    pub fn with_end_threshold(mut self, threshold: EndThreshold) -> Self {
        self.end_threshold = threshold;
        self
    }

    /// Set the starting shells per pit.
    #[must_use]
    pub fn with_shells_per_pit(mut self, shells: u32) -> Self {
        self.shells_per_pit = shells;
        self
    }

    /// Set the refill amount per pit.
    #[must_use]
    pub fn with_refill_per_pit(mut self, shells: u32) -> Self {
        self.refill_per_pit = shells;
        self
    }

    /// Set the relay leg limit.
    #[must_use]
    pub fn with_relay_limit(mut self, legs: u32) -> Self {
        self.relay_limit = legs;
        self
    }

    /// Fixed shell total for a game played with this configuration.
    #[must_use]
    pub fn total_shells(&self) -> u32 {
        self.shells_per_pit * PIT_COUNT as u32
    }

    /// Reject configurations the engine cannot play.
    pub fn validate(&self) -> Result<()> {
        if self.shells_per_pit == 0 {
            return Err(EngineError::InvalidConfig("shells_per_pit must be positive".into()));
        }
        if self.refill_per_pit == 0 {
            return Err(EngineError::InvalidConfig("refill_per_pit must be positive".into()));
        }
        if self.relay_limit == 0 {
            return Err(EngineError::InvalidConfig("relay_limit must be positive".into()));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = RuleConfig::default();
        assert_eq!(config.shells_per_pit, 5);
        assert_eq!(config.refill_per_pit, 5);
        assert_eq!(config.capture_rule, CaptureRule::NextOrOpposite);
        assert_eq!(config.end_threshold, EndThreshold::AtMostOnePit);
        assert_eq!(config.total_shells(), 70);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_builder_pattern() {
        let config = RuleConfig::new()
            .with_capture_rule(CaptureRule::FourShell)
            .with_end_threshold(EndThreshold::BelowOneRefill)
            .with_shells_per_pit(6)
            .with_relay_limit(50);

        assert_eq!(config.capture_rule, CaptureRule::FourShell);
        assert_eq!(config.end_threshold, EndThreshold::BelowOneRefill);
        assert_eq!(config.total_shells(), 84);
        assert_eq!(config.relay_limit, 50);
    }

    #[test]
    fn test_end_threshold() {
        assert!(EndThreshold::AtMostOnePit.ends_game(0));
        assert!(EndThreshold::AtMostOnePit.ends_game(1));
        assert!(!EndThreshold::AtMostOnePit.ends_game(2));

        assert!(EndThreshold::BelowOneRefill.ends_game(0));
        assert!(!EndThreshold::BelowOneRefill.ends_game(1));
    }

    #[test]
    fn test_validate_rejects_zero() {
        assert!(RuleConfig::new().with_shells_per_pit(0).validate().is_err());
        assert!(RuleConfig::new().with_refill_per_pit(0).validate().is_err());
        assert!(matches!(
            RuleConfig::new().with_relay_limit(0).validate(),
            Err(EngineError::InvalidConfig(_))
        ));
    }

    #[test]
    fn test_serialization() {
        let config = RuleConfig::new().with_capture_rule(CaptureRule::FourShell);
        let json = serde_json::to_string(&config).unwrap();
        let deserialized: RuleConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(config, deserialized);
    }
}
