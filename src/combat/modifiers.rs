//! Ordered modifier pipeline
//!
//! Stages run in a fixed order and each multiplies the running values:
//! 1. Overstack penalty (defense)
//! 2. Wall (defense)
//! 3. Environment: night (defense), terrain and weather (both)
//! 4. Morale (offense)
//! 5. Luck (offense)
//!
//! The order is part of the game rules. Every multiplier that fires is
//! recorded in a `ModifierTrace`; stages that did not apply are absent.

use serde::{Deserialize, Serialize};

use crate::combat::constants::{WALL_BASE_PER_LEVEL, WALL_STEEP_PER_LEVEL, WALL_TIER_BREAKPOINT};
use crate::combat::luck::LuckSource;
use crate::combat::morale::morale_multiplier;
use crate::core::config::WorldConfig;

/// Defense multiplier for a wall level
///
/// `1.037^level` up to level 10, then `1.05` per level beyond.
pub fn wall_multiplier(wall_level: i32) -> f64 {
    if wall_level <= 0 {
        1.0
    } else if wall_level <= WALL_TIER_BREAKPOINT {
        WALL_BASE_PER_LEVEL.powi(wall_level)
    } else {
        WALL_BASE_PER_LEVEL.powi(WALL_TIER_BREAKPOINT)
            * WALL_STEEP_PER_LEVEL.powi(wall_level - WALL_TIER_BREAKPOINT)
    }
}

/// Defense multiplier for an oversized defending stack, if the penalty applies
pub fn overstack_multiplier(defending_population: u64, config: &WorldConfig) -> Option<f64> {
    if !config.overstack_enabled || config.overstack_threshold == 0 {
        return None;
    }
    if defending_population <= config.overstack_threshold {
        return None;
    }
    let threshold = config.overstack_threshold as f64;
    let excess = (defending_population as f64 - threshold) / threshold;
    Some((1.0 - config.overstack_penalty_rate * excess).max(config.overstack_min_multiplier))
}

/// Battle facts the pipeline needs besides raw power
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct ModifierContext {
    pub defending_population: u64,
    pub wall_level: i32,
    /// Hour of day (0-23) at which the battle happens
    pub battle_hour: u8,
    pub attacker_points: u64,
    pub defender_points: u64,
}

/// Offense/defense pair for terrain and weather
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EnvironmentFactor {
    pub attack: f64,
    pub defense: f64,
}

/// Environment multipliers that fired
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct EnvironmentTrace {
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub terrain: Option<EnvironmentFactor>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub weather: Option<EnvironmentFactor>,
}

impl EnvironmentTrace {
    pub fn is_empty(&self) -> bool {
        self.terrain.is_none() && self.weather.is_none()
    }
}

/// Which running value a modifier scales
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PowerTarget {
    Offense,
    Defense,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ModifierKind {
    Overstack,
    Wall,
    Night,
    Terrain,
    Weather,
    Morale,
    Luck,
}

/// One multiplier as applied, in pipeline order
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AppliedModifier {
    pub kind: ModifierKind,
    pub target: PowerTarget,
    pub value: f64,
}

/// Record of every multiplier a battle used
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModifierTrace {
    luck: f64,
    morale: f64,
    wall_multiplier: f64,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    night_bonus: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    overstack_penalty: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    environment: Option<EnvironmentTrace>,
}

impl ModifierTrace {
    pub fn luck(&self) -> f64 {
        self.luck
    }

    pub fn morale(&self) -> f64 {
        self.morale
    }

    pub fn wall_multiplier(&self) -> f64 {
        self.wall_multiplier
    }

    pub fn night_bonus(&self) -> Option<f64> {
        self.night_bonus
    }

    pub fn overstack_penalty(&self) -> Option<f64> {
        self.overstack_penalty
    }

    pub fn environment(&self) -> Option<&EnvironmentTrace> {
        self.environment.as_ref()
    }

    /// Applied multipliers in the order the pipeline ran them
    pub fn steps(&self) -> Vec<AppliedModifier> {
        let mut steps = Vec::with_capacity(9);
        let mut push = |kind, target, value| steps.push(AppliedModifier { kind, target, value });

        if let Some(value) = self.overstack_penalty {
            push(ModifierKind::Overstack, PowerTarget::Defense, value);
        }
        push(ModifierKind::Wall, PowerTarget::Defense, self.wall_multiplier);
        if let Some(value) = self.night_bonus {
            push(ModifierKind::Night, PowerTarget::Defense, value);
        }
        if let Some(env) = &self.environment {
            if let Some(terrain) = env.terrain {
                push(ModifierKind::Terrain, PowerTarget::Offense, terrain.attack);
                push(ModifierKind::Terrain, PowerTarget::Defense, terrain.defense);
            }
            if let Some(weather) = env.weather {
                push(ModifierKind::Weather, PowerTarget::Offense, weather.attack);
                push(ModifierKind::Weather, PowerTarget::Defense, weather.defense);
            }
        }
        push(ModifierKind::Morale, PowerTarget::Offense, self.morale);
        push(ModifierKind::Luck, PowerTarget::Offense, self.luck);
        steps
    }
}

/// Offense and defense after the full pipeline
#[derive(Debug, Clone, PartialEq)]
pub struct ModifiedPower {
    pub offense: f64,
    pub defense: f64,
    pub trace: ModifierTrace,
}

/// Run all five stages over raw power
pub fn apply_modifiers<L: LuckSource + ?Sized>(
    raw_offense: f64,
    raw_defense: f64,
    context: &ModifierContext,
    config: &WorldConfig,
    luck_source: &mut L,
) -> ModifiedPower {
    let mut offense = raw_offense;
    let mut defense = raw_defense;

    // 1. Overstack
    let overstack_penalty = overstack_multiplier(context.defending_population, config);
    if let Some(penalty) = overstack_penalty {
        defense *= penalty;
    }

    // 2. Wall
    let wall = wall_multiplier(context.wall_level);
    defense *= wall;

    // 3. Environment
    let night_bonus = (config.night_bonus_enabled && config.is_night_hour(context.battle_hour))
        .then_some(config.night_defense_multiplier);
    if let Some(bonus) = night_bonus {
        defense *= bonus;
    }

    let mut environment = EnvironmentTrace::default();
    if config.terrain_enabled {
        let factor = EnvironmentFactor {
            attack: config.terrain_attack_multiplier,
            defense: config.terrain_defense_multiplier,
        };
        offense *= factor.attack;
        defense *= factor.defense;
        environment.terrain = Some(factor);
    }
    if config.weather_enabled {
        let factor = EnvironmentFactor {
            attack: config.weather_attack_multiplier,
            defense: config.weather_defense_multiplier,
        };
        offense *= factor.attack;
        defense *= factor.defense;
        environment.weather = Some(factor);
    }

    // 4. Morale
    let morale = morale_multiplier(context.defender_points, context.attacker_points);
    offense *= morale;

    // 5. Luck
    let luck = luck_source.sample(config.luck_min, config.luck_max);
    offense *= luck;

    tracing::trace!(
        offense,
        defense,
        wall,
        morale,
        luck,
        ?night_bonus,
        ?overstack_penalty,
        "Modifiers applied"
    );

    ModifiedPower {
        offense,
        defense,
        trace: ModifierTrace {
            luck,
            morale,
            wall_multiplier: wall,
            night_bonus,
            overstack_penalty,
            environment: (!environment.is_empty()).then_some(environment),
        },
    }
}
