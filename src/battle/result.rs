//! Result of one battle resolution

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::battle::request::AttackKind;
use crate::combat::{ArmyLosses, BattleOutcome, ModifierTrace};
use crate::conquest::{AllegianceOutcome, OwnershipTransfer};
use crate::core::types::{Army, BattleId, Resources};
use crate::plunder::PlunderDetails;
use crate::siege::SiegeOutcome;

/// Ratio on the wire: finite values as numbers, +inf as `null`
mod ratio_format {
    use super::*;

    pub fn serialize<S: Serializer>(ratio: &f64, serializer: S) -> Result<S::Ok, S::Error> {
        ratio.is_finite().then_some(*ratio).serialize(serializer)
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<f64, D::Error> {
        Ok(Option::<f64>::deserialize(deserializer)?.unwrap_or(f64::INFINITY))
    }
}

/// Defending troops present, lost and surviving
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DefenderLosses {
    pub present: Army,
    pub lost: Army,
    pub survivors: Army,
}

impl From<ArmyLosses> for DefenderLosses {
    fn from(losses: ArmyLosses) -> Self {
        Self {
            present: losses.sent,
            lost: losses.lost,
            survivors: losses.survivors,
        }
    }
}

/// Everything that happened in one battle
///
/// Built once by the resolver and never modified afterwards.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BattleResult {
    pub battle_id: BattleId,
    pub timestamp: u64,
    pub kind: AttackKind,
    pub outcome: BattleOutcome,
    /// Final offense over final defense; +inf serializes as null
    #[serde(with = "ratio_format")]
    pub ratio: f64,
    pub offense: f64,
    pub defense: f64,
    pub modifiers: ModifierTrace,
    pub attacker: ArmyLosses,
    pub defender: DefenderLosses,
    pub siege: SiegeOutcome,
    pub plunder: Resources,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub plunder_details: Option<PlunderDetails>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub vault_protection: Option<Resources>,
    /// Present when the attacker sent conquest units
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub allegiance: Option<AllegianceOutcome>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub transfer: Option<OwnershipTransfer>,
}

impl BattleResult {
    pub fn attacker_won(&self) -> bool {
        self.outcome.attacker_won()
    }

    pub fn captured(&self) -> bool {
        self.allegiance.is_some_and(|a| a.captured)
    }

    /// Village resources left after plunder
    pub fn resources_after(&self, stored: &Resources) -> Resources {
        stored.saturating_sub(&self.plunder)
    }
}
