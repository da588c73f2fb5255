//! Plunder: protected resources, carry capacity and the loot split

pub mod capacity;
pub mod loot;
pub mod scale;

use serde::{Deserialize, Serialize};

use crate::core::config::WorldConfig;
use crate::core::types::{Army, Resources};
use crate::units::UnitCatalog;

pub use capacity::calculate_carry_capacity;
pub use loot::{calculate_available_loot, protected_amount, AvailableLoot};
pub use scale::{scale_to_target, PriorityOrder};

/// Loot split across the carriers
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlunderDistribution {
    pub loot: Resources,
    pub carry_used: u64,
    pub carry_unused: u64,
}

/// Fit lootable resources into the available carry capacity
pub fn distribute_plunder(
    lootable: &Resources,
    carry_capacity: u64,
    priority: &PriorityOrder,
) -> PlunderDistribution {
    let loot = scale_to_target(lootable, carry_capacity, priority);
    let carry_used = loot.total();
    PlunderDistribution {
        loot,
        carry_used,
        carry_unused: carry_capacity.saturating_sub(carry_used),
    }
}

/// Plunder facts surfaced in battle results
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlunderDetails {
    pub lootable: Resources,
    pub carry_capacity: u64,
    pub carry_used: u64,
    pub carry_unused: u64,
    pub cap_applied: bool,
}

/// Complete plunder resolution for a won battle
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlunderOutcome {
    pub loot: Resources,
    pub details: PlunderDetails,
    pub vault_protection: Resources,
}

/// Inputs from the defending village
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct VillageStores {
    pub stored: Resources,
    /// Flat amount per resource kept out of reach by the hiding place
    pub hidden: u64,
}

/// Resolve plunder for a winning attacker
///
/// `carry_multiplier` already includes any raid bonus.
pub fn resolve_plunder(
    village: &VillageStores,
    survivors: &Army,
    catalog: &UnitCatalog,
    config: &WorldConfig,
    carry_multiplier: f64,
    priority: &PriorityOrder,
) -> PlunderOutcome {
    let available = calculate_available_loot(
        &village.stored,
        village.hidden,
        config.vault_percent,
        config.loot_cap,
        config.plunder_dr_multiplier,
        priority,
    );
    let carry_capacity = calculate_carry_capacity(survivors, catalog, carry_multiplier);
    let distribution = distribute_plunder(&available.lootable, carry_capacity, priority);

    PlunderOutcome {
        loot: distribution.loot,
        details: PlunderDetails {
            lootable: available.lootable,
            carry_capacity,
            carry_used: distribution.carry_used,
            carry_unused: distribution.carry_unused,
            cap_applied: available.cap_applied,
        },
        vault_protection: available.protected,
    }
}
