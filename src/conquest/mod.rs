//! Allegiance reduction and village capture
//!
//! Only surviving conquest units lower allegiance. Reaching zero captures the
//! village; the new owner starts from a configured floor instead of zero.
//! Applying the ownership change is left to the caller.

use serde::{Deserialize, Serialize};

use crate::core::config::WorldConfig;
use crate::core::types::{PlayerId, VillageId};

/// Default allegiance of a village that was never hit
pub const FULL_ALLEGIANCE: i64 = 100;

/// Why allegiance did not move
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum BlockReason {
    /// The attacker lost the battle
    NoWin,
    /// The village was captured too recently
    ConquestCooldown,
}

/// Result of one allegiance reduction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AllegianceReduction {
    pub new: i64,
    pub dropped: i64,
    pub blocked: bool,
    pub reason: Option<BlockReason>,
}

/// Lower allegiance by the surviving conquest units
pub fn reduce_allegiance(
    current: i64,
    surviving_conquest_units: u64,
    drop_per_unit: i64,
    attacker_won: bool,
    cooldown_active: bool,
) -> AllegianceReduction {
    let blocked = |reason| AllegianceReduction {
        new: current,
        dropped: 0,
        blocked: true,
        reason: Some(reason),
    };

    if !attacker_won {
        return blocked(BlockReason::NoWin);
    }
    if cooldown_active {
        return blocked(BlockReason::ConquestCooldown);
    }

    let units = i64::try_from(surviving_conquest_units).unwrap_or(i64::MAX);
    let dropped = units.saturating_mul(drop_per_unit.max(0));
    AllegianceReduction {
        new: current.saturating_sub(dropped).max(0),
        dropped,
        blocked: false,
        reason: None,
    }
}

/// Capture happens once allegiance is gone
pub fn check_capture_conditions(new_allegiance: i64) -> bool {
    new_allegiance <= 0
}

/// Allegiance a freshly captured village starts with
pub fn apply_post_capture_allegiance(config: &WorldConfig) -> i64 {
    config.post_capture_allegiance
}

/// Allegiance before and after, as reported in battle results
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AllegianceOutcome {
    pub start: i64,
    pub end: i64,
    pub captured: bool,
    pub dropped: i64,
    pub blocked: bool,
    pub reason: Option<BlockReason>,
}

/// Ownership change handed to whoever owns village bookkeeping
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct OwnershipTransfer {
    pub village_id: VillageId,
    pub new_owner_id: PlayerId,
}

/// Full conquest step for one battle
pub fn resolve_conquest(
    start: i64,
    surviving_conquest_units: u64,
    attacker_won: bool,
    cooldown_active: bool,
    config: &WorldConfig,
) -> AllegianceOutcome {
    let reduction = reduce_allegiance(
        start,
        surviving_conquest_units,
        config.allegiance_drop_per_noble,
        attacker_won,
        cooldown_active,
    );
    let captured = !reduction.blocked && check_capture_conditions(reduction.new);
    let end = if captured {
        apply_post_capture_allegiance(config)
    } else {
        reduction.new
    };

    AllegianceOutcome {
        start,
        end,
        captured,
        dropped: reduction.dropped,
        blocked: reduction.blocked,
        reason: reduction.reason,
    }
}
