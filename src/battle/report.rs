//! Per-side battle reports
//!
//! Both sides see the same battle. A side additionally gets reconnaissance
//! intel when at least one of its scouts survived.

use serde::{Deserialize, Serialize};

use crate::battle::result::BattleResult;
use crate::core::types::{Army, Resources, Side};
use crate::units::{UnitCatalog, UnitRole};

/// What surviving scouts brought back
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ReconIntel {
    /// Attacker's view of the defending village after the battle
    Village { resources: Resources, wall_level: i32 },
    /// Defender's view of the attacking troops heading home
    Army { survivors: Army },
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BattleReport {
    pub perspective: Side,
    #[serde(flatten)]
    pub result: BattleResult,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub intel: Option<ReconIntel>,
}

/// Whether any scout-role unit is in the army
pub fn has_scouts(army: &Army, catalog: &UnitCatalog) -> bool {
    army.iter()
        .any(|(id, count)| count > 0 && catalog.role_of(id.as_str()) == Some(UnitRole::Scout))
}

impl BattleReport {
    /// Attacker report; `stored` is the village's resources before plunder
    pub fn for_attacker(result: &BattleResult, stored: &Resources, catalog: &UnitCatalog) -> Self {
        let intel = has_scouts(&result.attacker.survivors, catalog).then(|| ReconIntel::Village {
            resources: result.resources_after(stored),
            wall_level: result.siege.wall.end,
        });
        Self {
            perspective: Side::Attacker,
            result: result.clone(),
            intel,
        }
    }

    pub fn for_defender(result: &BattleResult, catalog: &UnitCatalog) -> Self {
        let intel = has_scouts(&result.defender.survivors, catalog).then(|| ReconIntel::Army {
            survivors: result.attacker.survivors.clone(),
        });
        Self {
            perspective: Side::Defender,
            result: result.clone(),
            intel,
        }
    }

    pub fn for_side(
        side: Side,
        result: &BattleResult,
        stored: &Resources,
        catalog: &UnitCatalog,
    ) -> Self {
        match side {
            Side::Attacker => Self::for_attacker(result, stored, catalog),
            Side::Defender => Self::for_defender(result, catalog),
        }
    }
}
