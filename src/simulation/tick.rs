//! Tick resolution: every battle that lands in one tick
//!
//! Battles in a tick never share mutable state, so they resolve in parallel
//! with rayon. Each battle draws luck from its own rng seeded from the tick
//! seed and the command id, which keeps parallel runs reproducible.
//! Results come back in command order.

use rayon::prelude::*;

use crate::battle::metrics::TickSummary;
use crate::battle::request::BattleRequest;
use crate::battle::resolution::{BattleResolution, BattleResolver};
use crate::combat::RngLuck;
use crate::command::ordering::{compare_commands, QueuedCommand};
use crate::core::error::Result;

/// A command together with the battle it would start
#[derive(Debug, Clone, PartialEq)]
pub struct QueuedBattle {
    pub command: QueuedCommand,
    pub request: BattleRequest,
}

impl QueuedBattle {
    /// The request's attack kind follows the command kind
    pub fn new(command: QueuedCommand, mut request: BattleRequest) -> Self {
        if let Some(kind) = command.kind.attack_kind() {
            request.kind = kind;
        }
        Self { command, request }
    }
}

/// Everything a tick produced
#[derive(Debug)]
pub struct TickOutcome {
    /// Resolved battles in processing order
    pub resolutions: Vec<(QueuedCommand, Result<BattleResolution>)>,
    /// Commands that do not start a battle (support, spy, return)
    pub skipped: Vec<QueuedCommand>,
    pub summary: TickSummary,
}

/// SplitMix64 finalizer
fn mix(mut z: u64) -> u64 {
    z = z.wrapping_add(0x9E37_79B9_7F4A_7C15);
    z = (z ^ (z >> 30)).wrapping_mul(0xBF58_476D_1CE4_E5B9);
    z = (z ^ (z >> 27)).wrapping_mul(0x94D0_49BB_1331_11EB);
    z ^ (z >> 31)
}

/// Luck seed for one battle in a tick
pub fn battle_seed(tick_seed: u64, command: &QueuedCommand) -> u64 {
    mix(tick_seed ^ mix(command.id))
}

/// Resolve every battle in the tick
pub fn resolve_tick(
    resolver: &BattleResolver<'_>,
    mut battles: Vec<QueuedBattle>,
    tick_seed: u64,
) -> TickOutcome {
    battles.sort_by(|a, b| compare_commands(&a.command, &b.command));

    let (battles, skipped): (Vec<_>, Vec<_>) =
        battles.into_iter().partition(|b| b.command.kind.is_battle());
    let skipped: Vec<QueuedCommand> = skipped.into_iter().map(|b| b.command).collect();

    let resolutions: Vec<(QueuedCommand, Result<BattleResolution>)> = battles
        .par_iter()
        .map(|battle| {
            let mut luck = RngLuck::seeded(battle_seed(tick_seed, &battle.command));
            (battle.command, resolver.resolve(&battle.request, &mut luck))
        })
        .collect();

    let mut summary = TickSummary {
        skipped: skipped.len(),
        ..TickSummary::default()
    };
    for (command, resolution) in &resolutions {
        match resolution {
            Ok(resolution) => summary.record(&resolution.metrics),
            Err(e) => {
                summary.failed += 1;
                tracing::error!(command_id = command.id, error = %e, "Battle resolution failed");
            }
        }
    }

    tracing::info!(
        resolved = summary.resolved,
        failed = summary.failed,
        skipped = summary.skipped,
        captures = summary.captures,
        mean_latency_micros = summary.mean_latency_micros(),
        "Tick resolved"
    );

    TickOutcome {
        resolutions,
        skipped,
        summary,
    }
}
