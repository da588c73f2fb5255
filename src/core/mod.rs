pub mod config;
pub mod error;
pub mod types;

pub use config::{LootCap, WorldConfig};
pub use error::{BattleError, Result};
pub use types::{Army, BattleId, PlayerId, ResourceKind, Resources, Side, UnitId, VillageId};
