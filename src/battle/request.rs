//! Battle request: everything one resolution needs from the outside world

use serde::{Deserialize, Serialize};

use crate::conquest::FULL_ALLEGIANCE;
use crate::core::types::{Army, PlayerId, Resources, VillageId};
use crate::siege::SiegeTarget;

/// How the attack was launched
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AttackKind {
    #[default]
    Attack,
    /// Loot-focused; carry capacity gets the world raid bonus
    Raid,
    Siege,
}

fn full_allegiance() -> i64 {
    FULL_ALLEGIANCE
}

/// A validated battle between one attacking army and one village
///
/// Optional fields default so that requests from older producers still
/// resolve.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BattleRequest {
    #[serde(default)]
    pub kind: AttackKind,
    /// Unix seconds at which the attack lands
    #[serde(default)]
    pub timestamp: u64,
    #[serde(default)]
    pub attacker_player_id: PlayerId,
    #[serde(default)]
    pub defender_village_id: VillageId,
    pub attacker: Army,
    #[serde(default)]
    pub defender: Army,
    #[serde(default)]
    pub attacker_points: u64,
    #[serde(default)]
    pub defender_points: u64,
    #[serde(default)]
    pub wall_level: i32,
    #[serde(default)]
    pub siege_target: Option<SiegeTarget>,
    /// Resources stored in the defending village
    #[serde(default)]
    pub resources: Resources,
    /// Flat per-resource amount hidden from plunder
    #[serde(default)]
    pub hidden_resources: u64,
    #[serde(default = "full_allegiance")]
    pub allegiance: i64,
    #[serde(default)]
    pub conquest_cooldown_active: bool,
}

impl BattleRequest {
    pub fn new(attacker: Army, defender: Army) -> Self {
        Self {
            kind: AttackKind::default(),
            timestamp: 0,
            attacker_player_id: PlayerId::default(),
            defender_village_id: VillageId::default(),
            attacker,
            defender,
            attacker_points: 0,
            defender_points: 0,
            wall_level: 0,
            siege_target: None,
            resources: Resources::default(),
            hidden_resources: 0,
            allegiance: FULL_ALLEGIANCE,
            conquest_cooldown_active: false,
        }
    }

    /// Hour of day (UTC) at which the battle happens
    pub fn battle_hour(&self) -> u8 {
        ((self.timestamp % 86_400) / 3_600) as u8
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_minimal_json_request() {
        let request: BattleRequest = serde_json::from_str(r#"{"attacker": {"axe": 100}}"#).unwrap();
        assert_eq!(request.attacker.count("axe"), 100);
        assert!(request.defender.is_empty());
        assert_eq!(request.allegiance, 100);
        assert_eq!(request.kind, AttackKind::Attack);
    }

    #[test]
    fn test_battle_hour_from_timestamp() {
        let mut request = BattleRequest::new(Army::new(), Army::new());
        request.timestamp = 86_400 * 3 + 23 * 3_600 + 59;
        assert_eq!(request.battle_hour(), 23);
        request.timestamp = 0;
        assert_eq!(request.battle_hour(), 0);
    }
}
