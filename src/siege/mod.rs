//! Siege damage from surviving rams and catapults
//!
//! Higher levels cost more engines per level knocked down. World speed
//! divides the requirement, so faster worlds breach more easily.

use serde::{Deserialize, Serialize};

/// Base rams needed per wall level before scaling
pub const RAM_BASE_COST: f64 = 2.0;
/// Extra rams per wall level, per current level
pub const RAM_COST_PER_LEVEL: f64 = 0.5;
/// Catapults are slower: higher base and per-level cost
pub const CATAPULT_BASE_COST: f64 = 8.0;
pub const CATAPULT_COST_PER_LEVEL: f64 = 2.0;

/// Building chosen as catapult target
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SiegeTarget {
    pub building: String,
    pub level: i32,
}

/// Level before and after the battle
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LevelChange {
    pub start: i32,
    pub end: i32,
}

impl LevelChange {
    pub fn unchanged(level: i32) -> Self {
        Self { start: level, end: level }
    }

    pub fn levels_lost(&self) -> i32 {
        (self.start - self.end).max(0)
    }
}

/// Catapult damage to the targeted building
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BuildingChange {
    pub target: String,
    pub start: i32,
    pub end: i32,
}

/// Siege results for one battle
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SiegeOutcome {
    pub wall: LevelChange,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub building: Option<BuildingChange>,
}

impl SiegeOutcome {
    /// Whether any level was knocked down
    pub fn occurred(&self) -> bool {
        self.wall.levels_lost() > 0
            || self.building.as_ref().is_some_and(|b| b.end < b.start)
    }
}

/// Engines needed per level: `max(1, ceil((base + level * per_level) / speed))`
fn engines_per_level(level: i32, base: f64, per_level: f64, speed: f64) -> u64 {
    let speed = if speed > 0.0 { speed } else { 1.0 };
    let needed = ((base + level as f64 * per_level) / speed).ceil();
    (needed as u64).max(1)
}

/// Levels left after `engines` each knock down one level per full batch
fn reduce_level(level: i32, engines: u64, per_level: u64) -> i32 {
    let drop = engines / per_level;
    let drop = i32::try_from(drop).unwrap_or(i32::MAX);
    level.saturating_sub(drop).max(0)
}

/// Wall level after surviving rams
pub fn apply_ram_damage(wall_level: i32, surviving_rams: u64, speed: f64) -> i32 {
    if wall_level <= 0 || surviving_rams == 0 {
        return wall_level;
    }
    let per_level = engines_per_level(wall_level, RAM_BASE_COST, RAM_COST_PER_LEVEL, speed);
    reduce_level(wall_level, surviving_rams, per_level)
}

/// Building level after surviving catapults; only a winning attacker fires them
pub fn apply_catapult_damage(
    building_level: i32,
    surviving_catapults: u64,
    speed: f64,
    attacker_won: bool,
) -> i32 {
    if !attacker_won || surviving_catapults == 0 || building_level <= 0 {
        return building_level;
    }
    let per_level =
        engines_per_level(building_level, CATAPULT_BASE_COST, CATAPULT_COST_PER_LEVEL, speed);
    reduce_level(building_level, surviving_catapults, per_level)
}

/// Resolve both siege effects for one battle
pub fn resolve_siege(
    wall_level: i32,
    target: Option<&SiegeTarget>,
    surviving_rams: u64,
    surviving_catapults: u64,
    speed: f64,
    attacker_won: bool,
) -> SiegeOutcome {
    let wall = LevelChange {
        start: wall_level,
        end: apply_ram_damage(wall_level, surviving_rams, speed),
    };
    let building = target.map(|target| BuildingChange {
        target: target.building.clone(),
        start: target.level,
        end: apply_catapult_damage(target.level, surviving_catapults, speed, attacker_won),
    });
    SiegeOutcome { wall, building }
}
