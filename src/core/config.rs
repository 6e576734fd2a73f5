//! Game configuration with documented constants
//!
//! Every tunable number of the standard match lives here. Values can be
//! overridden from a TOML file; anything left out keeps its default.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

use crate::core::error::{Result, WarError};

/// Smallest grid that still fits the standard city and mountain layout
///
/// The outermost fixed feature is the city column at x = 12.
pub const MIN_GRID_SIZE: i32 = 13;

/// Configuration for a match
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    // === MAP ===
    /// Side length of the square grid (tiles)
    ///
    /// Blue deploys on row 0, red on row `grid_size - 1`.
    pub grid_size: i32,

    /// Number of units each side starts with
    ///
    /// Units deploy on every second column, so the grid must be at
    /// least twice this wide.
    pub units_per_side: u32,

    // === UNITS ===
    /// Starting hit points of every unit
    ///
    /// Combat draws a d6 per side, so at 10 hp a unit survives at least
    /// one exchange and at most nine.
    pub initial_hp: u32,

    // === TIMING ===
    /// Wall-clock period between turns (milliseconds)
    pub tick_interval_ms: u64,

    /// Seed for dice and coin flips
    ///
    /// None draws a seed from OS entropy, so matches differ run to run.
    pub seed: Option<u64>,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            grid_size: 20,
            units_per_side: 5,
            initial_hp: 10,
            tick_interval_ms: 1000,
            seed: None,
        }
    }
}

impl GameConfig {
    /// Create a new config with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Load and validate a config from a TOML file
    pub fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)?;
        Self::from_toml(&content)
    }

    /// Parse and validate a config from TOML text
    pub fn from_toml(content: &str) -> Result<Self> {
        let config: GameConfig = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Validate configuration for internal consistency
    pub fn validate(&self) -> Result<()> {
        if self.grid_size < MIN_GRID_SIZE {
            return Err(WarError::Config(format!(
                "grid_size ({}) must be at least {}",
                self.grid_size, MIN_GRID_SIZE
            )));
        }

        if self.units_per_side == 0 {
            return Err(WarError::Config("units_per_side must be positive".into()));
        }

        // Deployment columns are 0, 2, 4, ... so they must all fit
        if i64::from(self.units_per_side) * 2 > i64::from(self.grid_size) {
            return Err(WarError::Config(format!(
                "units_per_side ({}) does not fit a {}-wide grid",
                self.units_per_side, self.grid_size
            )));
        }

        if self.initial_hp == 0 {
            return Err(WarError::Config("initial_hp must be positive".into()));
        }

        if self.tick_interval_ms == 0 {
            return Err(WarError::Config("tick_interval_ms must be positive".into()));
        }

        Ok(())
    }

    pub fn tick_interval(&self) -> std::time::Duration {
        std::time::Duration::from_millis(self.tick_interval_ms)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_valid() {
        assert!(GameConfig::default().validate().is_ok());
    }

    #[test]
    fn test_partial_toml_keeps_defaults() {
        let config = GameConfig::from_toml("initial_hp = 4\nseed = 7\n").unwrap();
        assert_eq!(config.initial_hp, 4);
        assert_eq!(config.seed, Some(7));
        assert_eq!(config.grid_size, 20);
        assert_eq!(config.tick_interval_ms, 1000);
    }

    #[test]
    fn test_rejects_small_grid() {
        let err = GameConfig::from_toml("grid_size = 8").unwrap_err();
        assert!(matches!(err, WarError::Config(_)));
    }

    #[test]
    fn test_rejects_crowded_deployment() {
        let config = GameConfig {
            units_per_side: 11,
            ..GameConfig::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_rejects_zero_hp_and_interval() {
        let zero_hp = GameConfig {
            initial_hp: 0,
            ..GameConfig::default()
        };
        assert!(zero_hp.validate().is_err());

        let zero_tick = GameConfig {
            tick_interval_ms: 0,
            ..GameConfig::default()
        };
        assert!(zero_tick.validate().is_err());
    }

    #[test]
    fn test_malformed_toml_is_error() {
        let err = GameConfig::from_toml("grid_size = \"big\"").unwrap_err();
        assert!(matches!(err, WarError::TomlError(_)));
    }
}
