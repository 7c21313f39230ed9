//! Game configuration with documented constants
//!
//! Every rule number the simulation uses lives here. Values can be
//! overridden from a TOML file; missing keys fall back to the defaults.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::core::error::{ConquestError, Result};
use crate::core::types::Owner;

/// Offsets of the Player's starting cities around the capital
pub const STARTING_CITY_OFFSETS: [(i32, i32); 3] = [(1, 0), (0, 1), (-1, 0)];

/// Which tiles a route may pass through or end on
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct WalkabilityRules {
    /// AI cities can be crossed by routes
    pub ai_city_transit: bool,
    /// Neutral cities can be crossed by routes
    ///
    /// Off by default: routes stop at the border of a neutral city
    /// instead of marching through it.
    pub neutral_city_transit: bool,
    /// Any city tile is accepted as the final step of a route
    pub city_destination: bool,
}

impl Default for WalkabilityRules {
    fn default() -> Self {
        Self {
            ai_city_transit: false,
            neutral_city_transit: false,
            city_destination: true,
        }
    }
}

/// Rule set for one game
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    // === MAP ===
    /// Width and height of the square grid
    pub map_size: i32,
    /// Width and height of the viewport window
    pub view_size: i32,

    // === ECONOMY ===
    /// Gold per turn for each Player city
    pub player_income: u32,
    /// Gold per turn for each AI city
    pub ai_income: u32,
    /// Gold per turn for each neutral city
    pub neutral_income: u32,
    /// Gold per unit queued through `dispatch_train`
    pub unit_train_cost: u32,
    /// Gold to build barracks in a city without one
    pub barracks_cost: u32,
    /// Starting gold of a city founded on a bare tile
    pub settlement_gold: u32,

    // === COMBAT ===
    /// Percentage of a side's units dealt as damage to the other side
    ///
    /// At 70, an attacker of 10 kills 7 defenders and a defender of 5
    /// kills 3 attackers.
    pub casualty_percent: u32,

    // === AI ===
    /// Gold the AI pays for one training batch
    pub ai_train_cost: u32,
    /// Units in one AI training batch
    pub ai_train_batch: u32,
    /// Half-width of the square the AI scans for targets
    pub ai_scan_radius: i32,
    /// Stationed armies an AI city needs before it attacks
    pub ai_attack_threshold: u32,
    /// Units sent in one AI attack
    pub ai_attack_units: u32,

    // === SETUP ===
    pub capital_gold: u32,
    pub city_gold: u32,
    /// AI capital position relative to the map centre
    pub ai_capital_offset: (i32, i32),
    pub ai_starting_armies: u32,
    pub neutral_city_count: u32,
    pub neutral_garrison_min: u32,
    pub neutral_garrison_max: u32,

    pub walkability: WalkabilityRules,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            map_size: 100,
            view_size: 20,

            player_income: 10,
            ai_income: 8,
            neutral_income: 0,
            unit_train_cost: 10,
            barracks_cost: 50,
            settlement_gold: 0,

            casualty_percent: 70,

            ai_train_cost: 20,
            ai_train_batch: 5,
            ai_scan_radius: 4,
            ai_attack_threshold: 10,
            ai_attack_units: 10,

            capital_gold: 100,
            city_gold: 50,
            ai_capital_offset: (12, 8),
            ai_starting_armies: 10,
            neutral_city_count: 12,
            neutral_garrison_min: 2,
            neutral_garrison_max: 8,

            walkability: WalkabilityRules::default(),
        }
    }
}

impl GameConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Load and validate a config from a TOML file
    pub fn load_from_toml(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::parse_toml(&content)
    }

    /// Parse and validate a config from a TOML string
    pub fn parse_toml(content: &str) -> Result<Self> {
        let config: GameConfig = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Income per turn for a city of the given owner
    pub fn income_for(&self, owner: Owner) -> u32 {
        match owner {
            Owner::Player => self.player_income,
            Owner::Ai => self.ai_income,
            Owner::Neutral => self.neutral_income,
        }
    }

    /// Validate configuration for internal consistency
    pub fn validate(&self) -> Result<()> {
        if self.map_size <= 0 {
            return Err(ConquestError::Config(format!(
                "map_size must be positive (got {})",
                self.map_size
            )));
        }

        if self.view_size <= 0 || self.view_size > self.map_size {
            return Err(ConquestError::Config(format!(
                "view_size ({}) must be in 1..={}",
                self.view_size, self.map_size
            )));
        }

        if self.casualty_percent > 100 {
            return Err(ConquestError::Config(format!(
                "casualty_percent ({}) cannot exceed 100",
                self.casualty_percent
            )));
        }

        if self.unit_train_cost == 0 {
            return Err(ConquestError::Config("unit_train_cost must be positive".into()));
        }

        if self.ai_train_batch == 0 || self.ai_attack_units == 0 {
            return Err(ConquestError::Config(
                "AI batch and attack sizes must be positive".into(),
            ));
        }

        if self.ai_attack_units > self.ai_attack_threshold {
            return Err(ConquestError::Config(format!(
                "ai_attack_units ({}) should be <= ai_attack_threshold ({})",
                self.ai_attack_units, self.ai_attack_threshold
            )));
        }

        if self.neutral_garrison_min > self.neutral_garrison_max {
            return Err(ConquestError::Config(format!(
                "neutral_garrison_min ({}) should be <= neutral_garrison_max ({})",
                self.neutral_garrison_min, self.neutral_garrison_max
            )));
        }

        let center = self.map_size / 2;
        let (dx, dy) = self.ai_capital_offset;
        let (ax, ay) = (center + dx, center + dy);
        if ax < 0 || ay < 0 || ax >= self.map_size || ay >= self.map_size {
            return Err(ConquestError::Config(format!(
                "ai_capital_offset {:?} puts the AI capital off the map",
                self.ai_capital_offset
            )));
        }

        if (dx, dy) == (0, 0) || STARTING_CITY_OFFSETS.contains(&(dx, dy)) {
            return Err(ConquestError::Config(format!(
                "ai_capital_offset {:?} lands on a Player starting city",
                self.ai_capital_offset
            )));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        assert!(GameConfig::default().validate().is_ok());
    }

    #[test]
    fn test_partial_toml_keeps_defaults() {
        let config = GameConfig::parse_toml(
            r#"
            player_income = 15
            ai_scan_radius = 6

            [walkability]
            neutral_city_transit = true
            "#,
        )
        .unwrap();

        assert_eq!(config.player_income, 15);
        assert_eq!(config.ai_scan_radius, 6);
        assert_eq!(config.ai_income, 8);
        assert!(config.walkability.neutral_city_transit);
        assert!(config.walkability.city_destination);
    }

    #[test]
    fn test_invalid_values_rejected() {
        let result = GameConfig::parse_toml("casualty_percent = 150");
        assert!(matches!(result, Err(ConquestError::Config(_))));

        let result = GameConfig::parse_toml("map_size = 10\nview_size = 20");
        assert!(matches!(result, Err(ConquestError::Config(_))));

        let result = GameConfig::parse_toml("ai_capital_offset = [80, 0]");
        assert!(matches!(result, Err(ConquestError::Config(_))));
    }

    #[test]
    fn test_ai_capital_cannot_overlap_player_start() {
        for offset in [(0, 0), (1, 0), (0, 1), (-1, 0)] {
            let config = GameConfig {
                ai_capital_offset: offset,
                ..GameConfig::default()
            };
            assert!(
                matches!(config.validate(), Err(ConquestError::Config(_))),
                "offset {:?} accepted",
                offset
            );
        }

        // Diagonal and north neighbours of the capital are free
        for offset in [(0, -1), (1, 1)] {
            let config = GameConfig {
                ai_capital_offset: offset,
                ..GameConfig::default()
            };
            assert!(config.validate().is_ok());
        }
    }

    #[test]
    fn test_zero_train_cost_rejected() {
        let result = GameConfig::parse_toml("unit_train_cost = 0");
        assert!(matches!(result, Err(ConquestError::Config(_))));
    }

    #[test]
    fn test_malformed_toml_is_parse_error() {
        let result = GameConfig::parse_toml("player_income = \"lots\"");
        assert!(matches!(result, Err(ConquestError::Toml(_))));
    }
}
