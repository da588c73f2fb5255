//! Raw offensive and defensive power
//!
//! Units missing from the catalog contribute nothing here. They still flow
//! through casualty accounting untouched.

use crate::core::types::Army;
use crate::units::{ClassCounts, ClassShares, UnitCatalog, UnitClass};

/// Head counts per class, ignoring unknown units
pub fn class_counts(army: &Army, catalog: &UnitCatalog) -> ClassCounts {
    let mut counts = ClassCounts::default();
    for (id, count) in army.iter() {
        if count == 0 {
            continue;
        }
        if let Some(stat) = catalog.get(id.as_str()) {
            counts.add(stat.class, count);
        }
    }
    counts
}

/// Fraction of the army in each class
pub fn class_shares(army: &Army, catalog: &UnitCatalog) -> ClassShares {
    class_counts(army, catalog).shares()
}

/// Attacker power before modifiers, with the RPS bonus against the defender mix
pub fn offensive_power(attacker: &Army, defender_shares: &ClassShares, catalog: &UnitCatalog) -> f64 {
    attacker
        .iter()
        .filter(|(_, count)| *count > 0)
        .filter_map(|(id, count)| catalog.get(id.as_str()).map(|stat| (stat, count)))
        .map(|(stat, count)| stat.offense * stat.class.attack_multiplier(defender_shares) * count as f64)
        .sum()
}

/// Defender power before modifiers
///
/// Each defending unit uses a defense value weighted by the attacker's class
/// mix. With no known attackers the general defense applies unweighted.
pub fn defensive_power(defender: &Army, attacker: &Army, catalog: &UnitCatalog) -> f64 {
    let attacker_counts = class_counts(attacker, catalog);
    let total_attackers = attacker_counts.total();

    defender
        .iter()
        .filter(|(_, count)| *count > 0)
        .filter_map(|(id, count)| catalog.get(id.as_str()).map(|stat| (stat, count)))
        .map(|(stat, count)| {
            let per_unit = if total_attackers == 0 {
                stat.defense_general
            } else {
                UnitClass::ALL
                    .iter()
                    .map(|class| {
                        let weight = attacker_counts.get(*class) as f64 / total_attackers as f64;
                        weight * stat.defense_against(*class)
                    })
                    .sum()
            };
            per_unit * count as f64
        })
        .sum()
}

/// Total population of an army, used for the overstack penalty
pub fn population(army: &Army, catalog: &UnitCatalog) -> u64 {
    army.iter()
        .filter_map(|(id, count)| {
            catalog
                .get(id.as_str())
                .map(|stat| (stat.population as u64).saturating_mul(count))
        })
        .fold(0, u64::saturating_add)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn catalog() -> UnitCatalog {
        UnitCatalog::standard()
    }

    #[test]
    fn test_class_shares_ignore_unknown_units() {
        let army = Army::new().with("axe", 50).with("light", 50).with("dragon", 1000);
        let shares = class_shares(&army, &catalog());
        assert!((shares.infantry - 0.5).abs() < 1e-12);
        assert!((shares.cavalry - 0.5).abs() < 1e-12);
        assert_eq!(shares.archer, 0.0);
    }

    #[test]
    fn test_class_shares_empty_army() {
        let shares = class_shares(&Army::new(), &catalog());
        assert_eq!(shares.sum(), 0.0);
        let unknown_only = Army::new().with("dragon", 5);
        assert_eq!(class_shares(&unknown_only, &catalog()).sum(), 0.0);
    }

    #[test]
    fn test_offense_plain_against_empty_defender() {
        let attacker = Army::new().with("axe", 100);
        let power = offensive_power(&attacker, &ClassShares::default(), &catalog());
        assert_eq!(power, 4000.0);
    }

    #[test]
    fn test_offense_cavalry_bonus_against_archers() {
        let attacker = Army::new().with("light", 10);
        let archers = ClassShares { infantry: 0.0, cavalry: 0.0, archer: 1.0 };
        let power = offensive_power(&attacker, &archers, &catalog());
        assert!((power - 130.0 * 1.25 * 10.0).abs() < 1e-9);
    }

    #[test]
    fn test_offense_skips_unknown_and_zero_counts() {
        let attacker = Army::new().with("axe", 0).with("dragon", 99);
        assert_eq!(offensive_power(&attacker, &ClassShares::default(), &catalog()), 0.0);
    }

    #[test]
    fn test_defense_without_attackers_uses_general() {
        let defender = Army::new().with("spear", 10);
        assert_eq!(defensive_power(&defender, &Army::new(), &catalog()), 150.0);
    }

    #[test]
    fn test_defense_weighted_by_attacker_mix() {
        let defender = Army::new().with("spear", 10);
        // Half infantry (general 15), half cavalry (cavalry 45)
        let attacker = Army::new().with("axe", 5).with("light", 5);
        let power = defensive_power(&defender, &attacker, &catalog());
        assert!((power - 10.0 * (0.5 * 15.0 + 0.5 * 45.0)).abs() < 1e-9);
    }

    #[test]
    fn test_defense_against_archers() {
        let defender = Army::new().with("sword", 2);
        let attacker = Army::new().with("archer", 7);
        assert!((defensive_power(&defender, &attacker, &catalog()) - 80.0).abs() < 1e-9);
    }

    #[test]
    fn test_population_sums_known_units() {
        let army = Army::new().with("light", 10).with("snob", 1).with("dragon", 50);
        assert_eq!(population(&army, &catalog()), 140);
    }
}
