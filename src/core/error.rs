use thiserror::Error;

use crate::core::types::{Side, UnitId};

#[derive(Error, Debug)]
pub enum BattleError {
    /// Casualty accounting lost or invented units. Always a calculation bug.
    #[error(
        "Unit conservation violated for {side:?} {unit}: sent {sent} != lost {lost} + survivors {survivors}"
    )]
    ConservationViolated {
        side: Side,
        unit: UnitId,
        sent: u64,
        lost: u64,
        survivors: u64,
    },

    #[error("Invalid plunder priority order: {0}")]
    InvalidPriorityOrder(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerdeError(#[from] serde_json::Error),
}

impl BattleError {
    /// True for failures that indicate a bug in the engine rather than bad input
    pub fn is_internal(&self) -> bool {
        matches!(self, BattleError::ConservationViolated { .. })
    }
}

pub type Result<T> = std::result::Result<T, BattleError>;
