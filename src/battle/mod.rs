//! Battle orchestration - one request in, one immutable result out
//!
//! The resolver chains combat, siege, plunder and conquest in a fixed order
//! and builds the per-side reports from the finished result.

pub mod metrics;
pub mod report;
pub mod request;
pub mod resolution;
pub mod result;

pub use metrics::{BattleMetrics, TickSummary};
pub use report::{has_scouts, BattleReport, ReconIntel};
pub use request::{AttackKind, BattleRequest};
pub use resolution::{count_role, BattleResolution, BattleResolver};
pub use result::{BattleResult, DefenderLosses};
