//! Lightweight per-battle and per-tick metrics

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::battle::result::BattleResult;
use crate::combat::BattleOutcome;

/// Metrics for one resolution
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BattleMetrics {
    pub latency_micros: u64,
    pub outcome: BattleOutcome,
    pub siege_occurred: bool,
    pub conquest_occurred: bool,
    pub captured: bool,
}

impl BattleMetrics {
    pub fn from_result(result: &BattleResult, latency: Duration) -> Self {
        Self {
            latency_micros: u64::try_from(latency.as_micros()).unwrap_or(u64::MAX),
            outcome: result.outcome,
            siege_occurred: result.siege.occurred(),
            conquest_occurred: result
                .allegiance
                .is_some_and(|a| !a.blocked && a.dropped > 0),
            captured: result.captured(),
        }
    }
}

/// Aggregate over all battles resolved in one tick
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TickSummary {
    pub resolved: usize,
    pub failed: usize,
    pub skipped: usize,
    pub attacker_wins: usize,
    pub defender_holds: usize,
    pub sieges: usize,
    pub captures: usize,
    pub total_latency_micros: u64,
}

impl TickSummary {
    pub fn record(&mut self, metrics: &BattleMetrics) {
        self.resolved += 1;
        match metrics.outcome {
            BattleOutcome::AttackerWin => self.attacker_wins += 1,
            BattleOutcome::DefenderHold => self.defender_holds += 1,
        }
        if metrics.siege_occurred {
            self.sieges += 1;
        }
        if metrics.captured {
            self.captures += 1;
        }
        self.total_latency_micros = self.total_latency_micros.saturating_add(metrics.latency_micros);
    }

    pub fn mean_latency_micros(&self) -> u64 {
        if self.resolved == 0 {
            0
        } else {
            self.total_latency_micros / self.resolved as u64
        }
    }
}
