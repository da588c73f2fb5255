//! Core type definitions used throughout the codebase

use std::borrow::Borrow;
use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Opaque unique identifier for a single battle resolution
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct BattleId(pub Uuid);

impl BattleId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for BattleId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for BattleId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Unit identifier as it appears in the unit catalog ("spear", "ram", ...)
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UnitId(pub String);

impl UnitId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for UnitId {
    fn from(id: &str) -> Self {
        Self(id.to_string())
    }
}

impl Borrow<str> for UnitId {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for UnitId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Unique identifier for villages
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct VillageId(pub u64);

/// Unique identifier for players
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PlayerId(pub u64);

/// Which side of a battle something belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Side {
    Attacker,
    Defender,
}

/// The three lootable resource streams
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ResourceKind {
    Wood,
    Clay,
    Iron,
}

impl ResourceKind {
    pub const ALL: [ResourceKind; 3] = [ResourceKind::Wood, ResourceKind::Clay, ResourceKind::Iron];
}

/// Amounts of each resource
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(default)]
pub struct Resources {
    pub wood: u64,
    pub clay: u64,
    pub iron: u64,
}

impl Resources {
    pub fn new(wood: u64, clay: u64, iron: u64) -> Self {
        Self { wood, clay, iron }
    }

    /// Same amount of every resource
    pub fn uniform(amount: u64) -> Self {
        Self::new(amount, amount, amount)
    }

    pub fn get(&self, kind: ResourceKind) -> u64 {
        match kind {
            ResourceKind::Wood => self.wood,
            ResourceKind::Clay => self.clay,
            ResourceKind::Iron => self.iron,
        }
    }

    pub fn set(&mut self, kind: ResourceKind, amount: u64) {
        match kind {
            ResourceKind::Wood => self.wood = amount,
            ResourceKind::Clay => self.clay = amount,
            ResourceKind::Iron => self.iron = amount,
        }
    }

    /// Sum of all three; saturates at `u64::MAX`
    pub fn total(&self) -> u64 {
        self.wood.saturating_add(self.clay).saturating_add(self.iron)
    }

    /// Apply `f` to every resource
    pub fn map(&self, mut f: impl FnMut(ResourceKind, u64) -> u64) -> Self {
        let mut out = Self::default();
        for kind in ResourceKind::ALL {
            out.set(kind, f(kind, self.get(kind)));
        }
        out
    }

    pub fn saturating_sub(&self, other: &Resources) -> Self {
        self.map(|kind, amount| amount.saturating_sub(other.get(kind)))
    }
}

/// Troop composition: unit identifier to head count
///
/// Ordered so that reports and casualty output iterate deterministically.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Army(pub BTreeMap<UnitId, u64>);

impl Army {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style insert
    pub fn with(mut self, unit: impl Into<UnitId>, count: u64) -> Self {
        self.set(unit, count);
        self
    }

    pub fn set(&mut self, unit: impl Into<UnitId>, count: u64) {
        self.0.insert(unit.into(), count);
    }

    pub fn count(&self, unit: &str) -> u64 {
        self.0.get(unit).copied().unwrap_or(0)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&UnitId, u64)> {
        self.0.iter().map(|(id, count)| (id, *count))
    }

    /// Total head count including unknown units; saturates at `u64::MAX`
    pub fn total(&self) -> u64 {
        self.0.values().fold(0, |sum, count| sum.saturating_add(*count))
    }

    pub fn is_empty(&self) -> bool {
        self.total() == 0
    }
}

impl<U: Into<UnitId>> FromIterator<(U, u64)> for Army {
    fn from_iter<T: IntoIterator<Item = (U, u64)>>(iter: T) -> Self {
        Self(iter.into_iter().map(|(id, count)| (id.into(), count)).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resources_get_set() {
        let mut res = Resources::default();
        res.set(ResourceKind::Clay, 40);
        assert_eq!(res.get(ResourceKind::Clay), 40);
        assert_eq!(res.get(ResourceKind::Wood), 0);
        assert_eq!(res.total(), 40);
    }

    #[test]
    fn test_resources_saturating_sub() {
        let a = Resources::new(10, 5, 0);
        let b = Resources::new(3, 9, 1);
        assert_eq!(a.saturating_sub(&b), Resources::new(7, 0, 0));
    }

    #[test]
    fn test_army_count_and_total() {
        let army = Army::new().with("spear", 100).with("axe", 50);
        assert_eq!(army.count("spear"), 100);
        assert_eq!(army.count("missing"), 0);
        assert_eq!(army.total(), 150);
    }

    #[test]
    fn test_army_serializes_as_map() {
        let army = Army::new().with("axe", 3);
        let json = serde_json::to_string(&army).unwrap();
        assert_eq!(json, r#"{"axe":3}"#);
        let back: Army = serde_json::from_str(&json).unwrap();
        assert_eq!(back, army);
    }

    #[test]
    fn test_battle_id_unique() {
        assert_ne!(BattleId::new(), BattleId::new());
    }
}
