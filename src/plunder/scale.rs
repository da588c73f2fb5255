//! Deterministic proportional scaling with remainder distribution
//!
//! Used both for loot caps and for fitting loot into carry capacity. Two
//! players auditing the same battle must get the same split, so there is no
//! randomness: floors first, then leftover units one at a time in priority
//! order.

use serde::{Deserialize, Serialize};

use crate::core::error::{BattleError, Result};
use crate::core::types::{ResourceKind, Resources};

/// Order in which resources receive leftover units
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "Vec<ResourceKind>", into = "Vec<ResourceKind>")]
pub struct PriorityOrder([ResourceKind; 3]);

impl PriorityOrder {
    /// Build from a list that must name each resource exactly once
    pub fn new(order: &[ResourceKind]) -> Result<Self> {
        let [a, b, c] = <[ResourceKind; 3]>::try_from(order).map_err(|_| {
            BattleError::InvalidPriorityOrder(format!("expected 3 resources, got {}", order.len()))
        })?;
        if a == b || b == c || a == c {
            return Err(BattleError::InvalidPriorityOrder(format!(
                "duplicate resource in {:?}",
                order
            )));
        }
        Ok(Self([a, b, c]))
    }

    pub fn iter(&self) -> impl Iterator<Item = ResourceKind> + '_ {
        self.0.iter().copied()
    }
}

impl Default for PriorityOrder {
    fn default() -> Self {
        Self(ResourceKind::ALL)
    }
}

impl TryFrom<Vec<ResourceKind>> for PriorityOrder {
    type Error = BattleError;

    fn try_from(order: Vec<ResourceKind>) -> Result<Self> {
        Self::new(&order)
    }
}

impl From<PriorityOrder> for Vec<ResourceKind> {
    fn from(order: PriorityOrder) -> Self {
        order.0.to_vec()
    }
}

/// Scale `amounts` down so they sum to exactly `target`
///
/// No resource ever exceeds its original amount. When `target` is at least
/// the current total, the amounts are returned unchanged.
pub fn scale_to_target(amounts: &Resources, target: u64, priority: &PriorityOrder) -> Resources {
    let total: u128 = ResourceKind::ALL
        .iter()
        .map(|&kind| amounts.get(kind) as u128)
        .sum();
    if total <= target as u128 {
        return *amounts;
    }

    // Each share is at most `amount`, and the shares sum to at most `target`
    let mut scaled = amounts.map(|_, amount| (amount as u128 * target as u128 / total) as u64);

    let mut remainder = target.saturating_sub(scaled.total());
    while remainder > 0 {
        let mut progressed = false;
        for kind in priority.iter() {
            if remainder == 0 {
                break;
            }
            if scaled.get(kind) < amounts.get(kind) {
                scaled.set(kind, scaled.get(kind) + 1);
                remainder -= 1;
                progressed = true;
            }
        }
        if !progressed {
            break;
        }
    }

    scaled
}
