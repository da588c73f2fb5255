//! Bastion - deterministic battle resolution for persistent strategy worlds
//!
//! Given two armies, a village and a luck source, produces the full outcome
//! of a battle: casualties, wall and building damage, plunder and allegiance
//! change. Pure computation; persistence and scheduling live elsewhere.

pub mod battle;
pub mod combat;
pub mod command;
pub mod conquest;
pub mod core;
pub mod plunder;
pub mod siege;
pub mod simulation;
pub mod units;
