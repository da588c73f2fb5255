//! Battle ratio, outcome and casualties

use serde::{Deserialize, Serialize};

use crate::combat::constants::{CASUALTY_EXPONENT, WIN_RATIO};
use crate::core::error::{BattleError, Result};
use crate::core::types::{Army, Side};

/// Who won the battle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BattleOutcome {
    AttackerWin,
    DefenderHold,
}

impl BattleOutcome {
    pub fn attacker_won(&self) -> bool {
        *self == BattleOutcome::AttackerWin
    }
}

/// Offense over defense after modifiers
///
/// A defense of zero against any offense is an outright win (+inf). With no
/// offense at all the ratio is 0 and the defender holds.
pub fn battle_ratio(offense: f64, defense: f64) -> f64 {
    if offense <= 0.0 {
        0.0
    } else if defense <= 0.0 {
        f64::INFINITY
    } else {
        offense / defense
    }
}

/// Outcome from the ratio. Exactly 1.0 goes to the attacker.
pub fn determine_winner(ratio: f64) -> BattleOutcome {
    if ratio >= WIN_RATIO {
        BattleOutcome::AttackerWin
    } else {
        BattleOutcome::DefenderHold
    }
}

/// Fraction of each side that dies
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LossFactors {
    pub attacker: f64,
    pub defender: f64,
}

impl LossFactors {
    pub fn from_ratio(ratio: f64) -> Self {
        if ratio >= WIN_RATIO {
            // 1 / inf^1.5 == 0: an unopposed attacker loses nobody
            Self {
                attacker: (1.0 / ratio.powf(CASUALTY_EXPONENT)).clamp(0.0, 1.0),
                defender: 1.0,
            }
        } else {
            Self {
                attacker: 1.0,
                defender: ratio.max(0.0).powf(CASUALTY_EXPONENT).clamp(0.0, 1.0),
            }
        }
    }

    pub fn for_side(&self, side: Side) -> f64 {
        match side {
            Side::Attacker => self.attacker,
            Side::Defender => self.defender,
        }
    }
}

/// Sent, lost and surviving troops for one side
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ArmyLosses {
    pub sent: Army,
    pub lost: Army,
    pub survivors: Army,
}

impl ArmyLosses {
    /// Every unit kept for a side that took no losses
    pub fn untouched(army: &Army) -> Self {
        Self {
            sent: army.clone(),
            lost: army.iter().map(|(id, _)| (id.clone(), 0)).collect(),
            survivors: army.clone(),
        }
    }
}

/// Casualties for both sides
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Casualties {
    pub attacker: ArmyLosses,
    pub defender: ArmyLosses,
}

/// Apply a loss factor to every unit of one army
///
/// Losses round up per unit type. Unknown unit ids are treated like any
/// other entry so that every sent unit is accounted for.
pub fn apply_losses(army: &Army, loss_factor: f64, side: Side) -> Result<ArmyLosses> {
    let loss_factor = loss_factor.clamp(0.0, 1.0);
    let mut losses = ArmyLosses {
        sent: army.clone(),
        ..ArmyLosses::default()
    };

    for (id, sent) in army.iter() {
        let killed = (sent as f64 * loss_factor).ceil() as u64;
        let survivors = sent.saturating_sub(killed);
        let lost = sent - survivors;

        losses.lost.set(id.clone(), lost);
        losses.survivors.set(id.clone(), survivors);
    }

    verify_conservation(&losses, side)?;
    Ok(losses)
}

/// Check `sent == lost + survivors` for every unit id that was sent
pub fn verify_conservation(losses: &ArmyLosses, side: Side) -> Result<()> {
    for (id, sent) in losses.sent.iter() {
        let lost = losses.lost.count(id.as_str());
        let survivors = losses.survivors.count(id.as_str());
        if lost.checked_add(survivors) != Some(sent) {
            return Err(BattleError::ConservationViolated {
                side,
                unit: id.clone(),
                sent,
                lost,
                survivors,
            });
        }
    }
    Ok(())
}

/// Casualties for both armies given the final ratio
pub fn calculate_casualties(ratio: f64, attacker: &Army, defender: &Army) -> Result<Casualties> {
    let factors = LossFactors::from_ratio(ratio);
    Ok(Casualties {
        attacker: apply_losses(attacker, factors.attacker, Side::Attacker)?,
        defender: apply_losses(defender, factors.defender, Side::Defender)?,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ratio_guards() {
        assert_eq!(battle_ratio(1000.0, 500.0), 2.0);
        assert_eq!(battle_ratio(10.0, 0.0), f64::INFINITY);
        assert_eq!(battle_ratio(0.0, 0.0), 0.0);
        assert_eq!(battle_ratio(0.0, 50.0), 0.0);
    }

    #[test]
    fn test_winner_threshold_closed_for_attacker() {
        assert_eq!(determine_winner(1.0), BattleOutcome::AttackerWin);
        assert_eq!(determine_winner(0.999_999), BattleOutcome::DefenderHold);
        assert_eq!(determine_winner(f64::INFINITY), BattleOutcome::AttackerWin);
    }

    #[test]
    fn test_ratio_two_losses() {
        let attacker = Army::new().with("axe", 100);
        let defender = Army::new().with("spear", 80);
        let casualties = calculate_casualties(2.0, &attacker, &defender).unwrap();

        // 1 / 2^1.5 = 0.3536 -> ceil(35.36) = 36
        assert_eq!(casualties.attacker.lost.count("axe"), 36);
        assert_eq!(casualties.attacker.survivors.count("axe"), 64);
        assert_eq!(casualties.defender.lost.count("spear"), 80);
        assert_eq!(casualties.defender.survivors.count("spear"), 0);
    }

    #[test]
    fn test_defender_hold_losses() {
        let attacker = Army::new().with("axe", 10);
        let defender = Army::new().with("spear", 100);
        let casualties = calculate_casualties(0.25, &attacker, &defender).unwrap();

        // 0.25^1.5 = 0.125
        assert_eq!(casualties.attacker.survivors.count("axe"), 0);
        assert_eq!(casualties.defender.lost.count("spear"), 13);
        assert_eq!(casualties.defender.survivors.count("spear"), 87);
    }

    #[test]
    fn test_infinite_ratio_attacker_unharmed() {
        let attacker = Army::new().with("light", 7);
        let casualties = calculate_casualties(f64::INFINITY, &attacker, &Army::new()).unwrap();
        assert_eq!(casualties.attacker.survivors.count("light"), 7);
        assert_eq!(casualties.attacker.lost.count("light"), 0);
    }

    #[test]
    fn test_unknown_units_conserved() {
        let attacker = Army::new().with("dragon", 9).with("axe", 0);
        let losses = apply_losses(&attacker, 0.5, Side::Attacker).unwrap();
        assert_eq!(losses.lost.count("dragon") + losses.survivors.count("dragon"), 9);
        assert_eq!(losses.survivors.0.len(), 2);
    }

    #[test]
    fn test_verify_conservation_detects_mismatch() {
        let mut losses = ArmyLosses::untouched(&Army::new().with("spear", 10));
        losses.lost.set("spear", 3);
        let err = verify_conservation(&losses, Side::Defender).unwrap_err();
        assert!(err.is_internal());
    }
}
