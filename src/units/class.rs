//! Unit classes and the rock-paper-scissors relation between them
//!
//! Cavalry rides down archers, archers shoot infantry, infantry braces
//! against cavalry. Bonuses are additive on a 1.0 base and never negative.

use serde::{Deserialize, Serialize};

/// Bonus per unit of defender archer share for attacking cavalry
pub const CAVALRY_VS_ARCHER_BONUS: f64 = 0.25;

/// Bonus per unit of defender infantry share for attacking archers
pub const ARCHER_VS_INFANTRY_BONUS: f64 = 0.15;

/// Bonus per unit of defender cavalry share for attacking infantry
pub const INFANTRY_VS_CAVALRY_BONUS: f64 = 0.10;

/// Combat class of a unit
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UnitClass {
    #[default]
    Infantry,
    Cavalry,
    Archer,
}

impl UnitClass {
    pub const ALL: [UnitClass; 3] = [UnitClass::Infantry, UnitClass::Cavalry, UnitClass::Archer];

    /// Offense multiplier for a unit of this class against a defender mix
    pub fn attack_multiplier(&self, defender: &ClassShares) -> f64 {
        let bonus = match self {
            UnitClass::Cavalry => CAVALRY_VS_ARCHER_BONUS * defender.archer,
            UnitClass::Archer => ARCHER_VS_INFANTRY_BONUS * defender.infantry,
            UnitClass::Infantry => INFANTRY_VS_CAVALRY_BONUS * defender.cavalry,
        };
        1.0 + bonus.max(0.0)
    }
}

/// What a unit does besides fighting
///
/// Siege and conquest units never carry loot; scouts unlock report intel.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UnitRole {
    #[default]
    Regular,
    Scout,
    /// Breaks down walls
    Ram,
    /// Breaks down a targeted building
    Catapult,
    /// Any other siege engine
    Siege,
    /// Reduces allegiance (nobles, chieftains, envoys)
    Conquest,
}

impl UnitRole {
    pub fn is_siege(&self) -> bool {
        matches!(self, UnitRole::Ram | UnitRole::Catapult | UnitRole::Siege)
    }

    /// Whether surviving units of this role add to carry capacity
    pub fn carries_loot(&self) -> bool {
        !self.is_siege() && *self != UnitRole::Conquest
    }
}

/// Head counts per class
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ClassCounts {
    pub infantry: u64,
    pub cavalry: u64,
    pub archer: u64,
}

impl ClassCounts {
    pub fn add(&mut self, class: UnitClass, count: u64) {
        match class {
            UnitClass::Infantry => self.infantry = self.infantry.saturating_add(count),
            UnitClass::Cavalry => self.cavalry = self.cavalry.saturating_add(count),
            UnitClass::Archer => self.archer = self.archer.saturating_add(count),
        }
    }

    pub fn get(&self, class: UnitClass) -> u64 {
        match class {
            UnitClass::Infantry => self.infantry,
            UnitClass::Cavalry => self.cavalry,
            UnitClass::Archer => self.archer,
        }
    }

    pub fn total(&self) -> u64 {
        self.infantry.saturating_add(self.cavalry).saturating_add(self.archer)
    }

    /// Fractions of the total; all zero for an empty army
    pub fn shares(&self) -> ClassShares {
        let total = self.total();
        if total == 0 {
            return ClassShares::default();
        }
        let total = total as f64;
        ClassShares {
            infantry: self.infantry as f64 / total,
            cavalry: self.cavalry as f64 / total,
            archer: self.archer as f64 / total,
        }
    }
}

/// Fraction of an army in each class. Sums to 1.0, or all zero.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct ClassShares {
    pub infantry: f64,
    pub cavalry: f64,
    pub archer: f64,
}

impl ClassShares {
    pub fn get(&self, class: UnitClass) -> f64 {
        match class {
            UnitClass::Infantry => self.infantry,
            UnitClass::Cavalry => self.cavalry,
            UnitClass::Archer => self.archer,
        }
    }

    pub fn sum(&self) -> f64 {
        self.infantry + self.cavalry + self.archer
    }
}
