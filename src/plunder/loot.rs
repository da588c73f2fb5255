//! What part of a village's resources can be taken at all

use serde::{Deserialize, Serialize};

use crate::core::config::LootCap;
use crate::core::types::Resources;
use crate::plunder::scale::{scale_to_target, PriorityOrder};

/// Lootable resources after protection, diminishing returns and caps
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AvailableLoot {
    pub lootable: Resources,
    /// Shielded by the hiding place or the vault
    pub protected: Resources,
    /// Stored minus protected
    pub available: Resources,
    pub cap_applied: bool,
}

/// Amount of one resource shielded from plunder
pub fn protected_amount(stored: u64, hidden_flat: u64, vault_percent: f64) -> u64 {
    let vault_percent = vault_percent.clamp(0.0, 100.0);
    let vaulted = (stored as f64 * vault_percent / 100.0).ceil() as u64;
    hidden_flat.max(vaulted)
}

/// Compute the lootable amount of each resource
///
/// `cap` is checked against the total after diminishing returns; when it is
/// exceeded all resources are scaled toward it together.
pub fn calculate_available_loot(
    stored: &Resources,
    hidden_flat: u64,
    vault_percent: f64,
    cap: Option<LootCap>,
    diminishing_returns: f64,
    priority: &PriorityOrder,
) -> AvailableLoot {
    let diminishing_returns = diminishing_returns.clamp(0.0, 1.0);

    let protected = stored.map(|_, amount| protected_amount(amount, hidden_flat, vault_percent));
    let available = stored.saturating_sub(&protected);
    // f64 rounding may land above large amounts
    let pre_cap = available
        .map(|_, amount| ((amount as f64 * diminishing_returns).floor() as u64).min(amount));

    let cap_amount = cap.map(|cap| cap.resolve(stored.total()));
    let (lootable, cap_applied) = match cap_amount {
        Some(cap) if pre_cap.total() > cap => (scale_to_target(&pre_cap, cap, priority), true),
        _ => (pre_cap, false),
    };

    AvailableLoot {
        lootable,
        protected,
        available,
        cap_applied,
    }
}
