//! Morale: attackers hitting much smaller players fight worse
//!
//! Morale only ever scales offense.

use crate::combat::constants::{MORALE_BASE, MORALE_MAX, MORALE_MIN};

/// Offense multiplier from the points of both players
///
/// `0.3 + defender / attacker`, clamped to `[0.5, 1.5]`. An attacker with no
/// points fights at full morale.
pub fn morale_multiplier(defender_points: u64, attacker_points: u64) -> f64 {
    if attacker_points == 0 {
        return MORALE_MAX;
    }
    let morale = MORALE_BASE + defender_points as f64 / attacker_points as f64;
    morale.clamp(MORALE_MIN, MORALE_MAX)
}
