//! Design configuration
//!
//! Tunable knobs for the allocator. Defaults reproduce the stock tables.

use serde::{Deserialize, Serialize};

use super::DesignError;
use crate::consts::{MAX_POTENTIAL, RANDOM_SELECT_TRIES};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DesignConfig {
    /// Chance in percent that a finished jewel is corrupted
    pub corruption_percent: u32,
    /// Theme draws attempted before falling back to an untheme'd jewel
    pub max_theme_attempts: u32,
    /// Iterations of the resistance shopping loop
    pub shopping_iterations: u32,
    /// Draws the random-choice selector makes before giving up
    pub random_select_tries: u32,
    /// Activation price per point of effect power
    pub activation_cost_mult: i32,
    /// Potential granted per dungeon level
    pub potential_per_level: i32,
}

impl Default for DesignConfig {
    fn default() -> Self {
        Self {
            corruption_percent: 5,
            max_theme_attempts: 100,
            shopping_iterations: 20,
            random_select_tries: RANDOM_SELECT_TRIES,
            activation_cost_mult: 40,
            potential_per_level: 55,
        }
    }
}

impl DesignConfig {
    /// Parse a JSON config; missing fields take their defaults
    pub fn from_json(json: &str) -> Result<Self, DesignError> {
        let config: Self =
            serde_json::from_str(json).map_err(|e| DesignError::ConfigParse(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    pub fn to_json(&self) -> String {
        serde_json::to_string_pretty(self).unwrap_or_default()
    }

    /// Reject values that would break the allocator's termination or pricing
    pub fn validate(&self) -> Result<(), DesignError> {
        if self.corruption_percent > 100 {
            return Err(DesignError::InvalidConfig {
                field: "corruption_percent",
                reason: format!("{} is above 100", self.corruption_percent),
            });
        }
        if self.max_theme_attempts == 0 {
            return Err(DesignError::InvalidConfig {
                field: "max_theme_attempts",
                reason: "must be at least 1".to_string(),
            });
        }
        if self.random_select_tries == 0 {
            return Err(DesignError::InvalidConfig {
                field: "random_select_tries",
                reason: "must be at least 1".to_string(),
            });
        }
        if self.activation_cost_mult < 0 {
            return Err(DesignError::InvalidConfig {
                field: "activation_cost_mult",
                reason: "must not be negative".to_string(),
            });
        }
        if !(0..=MAX_POTENTIAL).contains(&self.potential_per_level) {
            return Err(DesignError::InvalidConfig {
                field: "potential_per_level",
                reason: format!("must be within 0..={MAX_POTENTIAL}"),
            });
        }
        Ok(())
    }
}
