//! Combat constants - all tunable values in one place
//!
//! World-specific knobs live in `WorldConfig`; these are fixed game rules.

// Outcome
/// Ratio at or above which the attacker wins (closed on the attacker side)
pub const WIN_RATIO: f64 = 1.0;
/// Exponent of the casualty curve
pub const CASUALTY_EXPONENT: f64 = 1.5;

// Wall curve (two tiers, steeper past the breakpoint)
pub const WALL_BASE_PER_LEVEL: f64 = 1.037;
pub const WALL_STEEP_PER_LEVEL: f64 = 1.05;
pub const WALL_TIER_BREAKPOINT: i32 = 10;

// Morale
pub const MORALE_BASE: f64 = 0.3;
pub const MORALE_MIN: f64 = 0.5;
pub const MORALE_MAX: f64 = 1.5;
