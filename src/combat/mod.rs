//! Combat calculation: power, modifiers, outcome and casualties

pub mod casualties;
pub mod constants;
pub mod luck;
pub mod modifiers;
pub mod morale;
pub mod power;

pub use casualties::{
    apply_losses, battle_ratio, calculate_casualties, determine_winner, verify_conservation,
    ArmyLosses, BattleOutcome, Casualties, LossFactors,
};
pub use luck::{FixedLuck, LuckSource, RngLuck};
pub use modifiers::{
    apply_modifiers, overstack_multiplier, wall_multiplier, AppliedModifier, EnvironmentFactor,
    EnvironmentTrace, ModifiedPower, ModifierContext, ModifierKind, ModifierTrace, PowerTarget,
};
pub use morale::morale_multiplier;
pub use power::{class_counts, class_shares, defensive_power, offensive_power, population};
