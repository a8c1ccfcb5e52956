//! Combat configuration with documented constants
//!
//! The round caps and withdrawal defaults are collected here so the
//! orchestrator never hard-codes them.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::core::error::{CombatError, Result};

/// Configuration for battle resolution
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CombatConfig {
    // === ROUND CAPS ===
    /// Upper bound on rounds for any sub-engagement
    ///
    /// Fights normally end long before this through shot exhaustion or
    /// one side running out of targets. The cap only guards degenerate
    /// stalemates (e.g. two fleets that can never hit each other).
    pub max_rounds: u32,

    /// Rounds simulated for a bombardment
    ///
    /// Bomb damage accumulates over these rounds and is then normalised
    /// against the same number of rounds of a reference strike fleet.
    pub bombardment_rounds: u32,

    /// Rounds simulated for germ warfare (bombs are dropped once)
    pub germ_warfare_rounds: u32,

    /// Rounds simulated for a siege (the blockade is established once)
    pub siege_rounds: u32,

    // === FORCED JUMPS ===
    /// Largest coordinate a forced misjump may send a ship to
    pub galaxy_radius: i32,

    /// Maximum per-axis offset of a directed forced jump
    pub forced_jump_scatter: i32,

    // === WITHDRAWAL DEFAULTS ===
    /// Warship age above which a ship withdraws when no order says otherwise
    ///
    /// Ships are destroyed above age 49, so the default of 100 means
    /// "fight to the death".
    pub default_warship_withdraw_age: i32,

    /// Transport age above which a transport withdraws by default
    pub default_transport_withdraw_age: i32,

    /// Percentage of a fleet lost before the rest withdraws by default
    ///
    /// The rule fires when losses strictly exceed the percentage, so 100
    /// never triggers.
    pub default_fleet_withdraw_percent: u32,
}

impl Default for CombatConfig {
    fn default() -> Self {
        Self {
            max_rounds: 10_000,
            bombardment_rounds: 10,
            germ_warfare_rounds: 1,
            siege_rounds: 1,

            galaxy_radius: 20,
            forced_jump_scatter: 2,

            default_warship_withdraw_age: 100,
            default_transport_withdraw_age: 100,
            default_fleet_withdraw_percent: 100,
        }
    }
}

impl CombatConfig {
    /// Create a new config with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Load a config from a TOML file
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_toml_str(&content)
    }

    /// Parse a config from a TOML string; missing keys keep their defaults
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let config: CombatConfig = toml::from_str(content)?;
        config.validate().map_err(CombatError::InvalidConfig)?;
        Ok(config)
    }

    /// Validate configuration for internal consistency
    pub fn validate(&self) -> std::result::Result<(), String> {
        if self.max_rounds == 0 {
            return Err("max_rounds must be at least 1".into());
        }

        for (name, rounds) in [
            ("bombardment_rounds", self.bombardment_rounds),
            ("germ_warfare_rounds", self.germ_warfare_rounds),
            ("siege_rounds", self.siege_rounds),
        ] {
            if rounds == 0 || rounds > self.max_rounds {
                return Err(format!(
                    "{} ({}) must be between 1 and max_rounds ({})",
                    name, rounds, self.max_rounds
                ));
            }
        }

        if self.galaxy_radius <= 0 {
            return Err(format!("galaxy_radius ({}) must be positive", self.galaxy_radius));
        }

        if self.forced_jump_scatter < 0 {
            return Err("forced_jump_scatter must not be negative".into());
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        let config = CombatConfig::new();
        assert!(config.validate().is_ok());
        assert_eq!(config.max_rounds, 10_000);
        assert_eq!(config.bombardment_rounds, 10);
    }

    #[test]
    fn test_partial_toml_keeps_defaults() {
        let config = CombatConfig::from_toml_str("max_rounds = 50\ngalaxy_radius = 8\n").unwrap();
        assert_eq!(config.max_rounds, 50);
        assert_eq!(config.galaxy_radius, 8);
        assert_eq!(config.siege_rounds, 1);
    }

    #[test]
    fn test_rejects_bombardment_above_cap() {
        let result = CombatConfig::from_toml_str("max_rounds = 5\n");
        assert!(matches!(result, Err(CombatError::InvalidConfig(_))));
    }

    #[test]
    fn test_rejects_malformed_toml() {
        let result = CombatConfig::from_toml_str("max_rounds = \"many\"");
        assert!(matches!(result, Err(CombatError::Toml(_))));
    }
}
