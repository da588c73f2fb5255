//! Tick-level simulation

pub mod tick;

pub use tick::{battle_seed, resolve_tick, QueuedBattle, TickOutcome};
