//! World configuration with documented defaults
//!
//! Every option a world can tune about battle resolution lives here. Any
//! field missing from a world file resolves to its default, so a partial
//! (or empty) config is always valid input.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::core::error::{BattleError, Result};

/// Upper bound on how much plunder a single battle may take before carry
/// capacity is considered
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LootCap {
    /// Fixed number of resource units across all three resources
    Absolute(u64),
    /// Percentage (0-100) of the defender's total stored resources
    Percent(f64),
}

impl LootCap {
    /// Resolve the cap against the defender's total stored resources
    pub fn resolve(&self, total_stored: u64) -> u64 {
        match *self {
            LootCap::Absolute(amount) => amount,
            LootCap::Percent(pct) => {
                let pct = pct.clamp(0.0, 100.0);
                (total_stored as f64 * pct / 100.0).floor() as u64
            }
        }
    }
}

/// Configuration for battle resolution in one world
///
/// Constructed once per world and shared by reference with every
/// resolution call. Never mutated by the engine.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WorldConfig {
    // === LUCK ===
    /// Lower bound of the uniform luck window (offense multiplier)
    pub luck_min: f64,

    /// Upper bound of the uniform luck window
    ///
    /// The default window [0.75, 1.25] lets luck swing a close fight
    /// either way without overturning a clear mismatch.
    pub luck_max: f64,

    // === ENVIRONMENT ===
    /// Whether defenders get a bonus during the night window
    pub night_bonus_enabled: bool,

    /// First hour (0-23, inclusive) of the night window
    pub night_start_hour: u8,

    /// Hour (0-23, exclusive) at which the night window ends
    ///
    /// May be smaller than `night_start_hour`; the window then spans midnight.
    pub night_end_hour: u8,

    /// Defense multiplier while the night window is active
    pub night_defense_multiplier: f64,

    pub terrain_enabled: bool,
    pub terrain_attack_multiplier: f64,
    pub terrain_defense_multiplier: f64,

    pub weather_enabled: bool,
    pub weather_attack_multiplier: f64,
    pub weather_defense_multiplier: f64,

    // === OVERSTACK ===
    /// Whether oversized defending stacks lose effectiveness
    pub overstack_enabled: bool,

    /// Defending population above which the penalty starts
    pub overstack_threshold: u64,

    /// Fraction of defense lost per full threshold of excess population
    ///
    /// At 0.3, a stack twice the threshold defends at 70%.
    pub overstack_penalty_rate: f64,

    /// Floor for the overstack multiplier; stacking never costs more than half
    pub overstack_min_multiplier: f64,

    // === SIEGE ===
    /// World speed. Divides the rams/catapults needed per level.
    pub speed: f64,

    // === PLUNDER ===
    /// Percentage (0-100) of each stored resource shielded by the vault
    pub vault_percent: f64,

    /// Diminishing returns factor (0-1) applied to lootable resources
    pub plunder_dr_multiplier: f64,

    /// Carry multiplier applied to raids on top of `carry_multiplier`
    pub raid_bonus: f64,

    /// Global carry capacity multiplier
    pub carry_multiplier: f64,

    /// Optional cap on total loot per battle
    pub loot_cap: Option<LootCap>,

    // === CONQUEST ===
    /// Allegiance removed by each surviving conquest unit
    pub allegiance_drop_per_noble: i64,

    /// Allegiance a village restarts with after capture
    pub post_capture_allegiance: i64,
}

impl Default for WorldConfig {
    fn default() -> Self {
        Self {
            luck_min: 0.75,
            luck_max: 1.25,

            night_bonus_enabled: false,
            night_start_hour: 22,
            night_end_hour: 6,
            night_defense_multiplier: 1.5,
            terrain_enabled: false,
            terrain_attack_multiplier: 1.0,
            terrain_defense_multiplier: 1.0,
            weather_enabled: false,
            weather_attack_multiplier: 1.0,
            weather_defense_multiplier: 1.0,

            overstack_enabled: false,
            overstack_threshold: 30_000,
            overstack_penalty_rate: 0.3,
            overstack_min_multiplier: 0.5,

            speed: 1.0,

            vault_percent: 0.0,
            plunder_dr_multiplier: 1.0,
            raid_bonus: 1.0,
            carry_multiplier: 1.0,
            loot_cap: None,

            allegiance_drop_per_noble: 25,
            post_capture_allegiance: 25,
        }
    }
}

impl WorldConfig {
    /// Create a new config with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse a world config from TOML; absent keys take their defaults
    pub fn from_toml_str(content: &str) -> Result<Self> {
        toml::from_str(content)
            .map_err(|e| BattleError::Config(format!("Failed to parse world TOML: {}", e)))
    }

    /// Load a world config from a TOML file
    pub fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)?;
        Self::from_toml_str(&content)
    }

    /// Whether `hour` (0-23) falls inside the configured night window
    pub fn is_night_hour(&self, hour: u8) -> bool {
        let (start, end) = (self.night_start_hour, self.night_end_hour);
        if start == end {
            false
        } else if start < end {
            hour >= start && hour < end
        } else {
            hour >= start || hour < end
        }
    }

    /// Validate configuration for internal consistency
    pub fn validate(&self) -> std::result::Result<(), String> {
        if self.luck_min > self.luck_max {
            return Err(format!(
                "luck_min ({}) must be <= luck_max ({})",
                self.luck_min, self.luck_max
            ));
        }

        if self.luck_min < 0.0 {
            return Err("luck window must be non-negative".into());
        }

        if self.speed <= 0.0 {
            return Err(format!("speed ({}) must be positive", self.speed));
        }

        if self.night_start_hour > 23 || self.night_end_hour > 23 {
            return Err("night window hours must be within 0-23".into());
        }

        if !(0.0..=100.0).contains(&self.vault_percent) {
            return Err(format!("vault_percent ({}) must be within 0-100", self.vault_percent));
        }

        if !(0.0..=1.0).contains(&self.plunder_dr_multiplier) {
            return Err(format!(
                "plunder_dr_multiplier ({}) must be within 0-1",
                self.plunder_dr_multiplier
            ));
        }

        if self.overstack_threshold == 0 {
            return Err("overstack_threshold must be positive".into());
        }

        Ok(())
    }
}
