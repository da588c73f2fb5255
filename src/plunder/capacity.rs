//! Carry capacity of the surviving attackers

use crate::core::types::Army;
use crate::units::UnitCatalog;

/// Total resources the survivors can haul home
///
/// Siege engines and conquest units never carry loot. Unknown units carry
/// nothing.
pub fn calculate_carry_capacity(survivors: &Army, catalog: &UnitCatalog, carry_multiplier: f64) -> u64 {
    let raw: u64 = survivors
        .iter()
        .filter_map(|(id, count)| catalog.get(id.as_str()).map(|stat| (stat, count)))
        .filter(|(stat, _)| stat.role.carries_loot())
        .map(|(stat, count)| (stat.carry_capacity as u64).saturating_mul(count))
        .fold(0, u64::saturating_add);

    (raw as f64 * carry_multiplier.max(0.0)).floor() as u64
}
