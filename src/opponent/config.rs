//! Learning parameters for the adaptive opponent.

use serde::{Deserialize, Serialize};

use crate::error::{EngineError, Result};

/// Q-learning and exploration parameters.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct OpponentConfig {
    /// Learning rate (default: 0.1).
    pub alpha: f64,

    /// Discount factor for the next state's best value (default: 0.95).
    pub gamma: f64,

    /// Exploration rate for a fresh opponent (default: 0.9).
    pub epsilon_start: f64,

    /// Multiplier applied to ε after every completed game (default: 0.995).
    pub epsilon_decay: f64,

    /// Floor for ε (default: 0.1).
    pub epsilon_min: f64,
}

impl Default for OpponentConfig {
    fn default() -> Self {
        Self {
            alpha: 0.1,
            gamma: 0.95,
            epsilon_start: 0.9,
            epsilon_decay: 0.995,
            epsilon_min: 0.1,
        }
    }
}

impl OpponentConfig {
    /// Create a config with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the learning rate.
    pub fn with_alpha(mut self, alpha: f64) -> Self {
        self.alpha = alpha;
        self
    }

    /// Set the discount factor.
    pub fn with_gamma(mut self, gamma: f64) -> Self {
        self.gamma = gamma;
        self
    }

    /// Set the starting exploration rate.
    pub fn with_epsilon_start(mut self, epsilon: f64) -> Self {
        self.epsilon_start = epsilon;
        self
    }

    /// Set the per-game decay and the floor.
    pub fn with_epsilon_decay(mut self, decay: f64, min: f64) -> Self {
        self.epsilon_decay = decay;
        self.epsilon_min = min;
        self
    }

    /// ε after one more completed game.
    #[must_use]
    pub fn decayed(&self, epsilon: f64) -> f64 {
        (epsilon * self.epsilon_decay).max(self.epsilon_min)
    }

    /// Reject out-of-range parameters.
    pub fn validate(&self) -> Result<()> {
        let unit = |name: &str, value: f64| {
            if (0.0..=1.0).contains(&value) {
                Ok(())
            } else {
                Err(EngineError::InvalidConfig(format!("{name} must be in [0, 1], got {value}")))
            }
        };
        unit("alpha", self.alpha)?;
        unit("gamma", self.gamma)?;
        unit("epsilon_start", self.epsilon_start)?;
        unit("epsilon_decay", self.epsilon_decay)?;
        unit("epsilon_min", self.epsilon_min)?;
        if self.epsilon_min > self.epsilon_start {
            return Err(EngineError::InvalidConfig(
                "epsilon_min must not exceed epsilon_start".into(),
            ));
        }
        Ok(())
    }
}
