//! Deterministic ordering of queued commands
//!
//! Commands landing in the same tick resolve by arrival time, then sequence
//! number, then command kind, then id. Ties never depend on insertion order.

use std::cmp::Ordering;

use serde::{Deserialize, Serialize};

use crate::battle::request::AttackKind;

/// Kind of a queued command, in tie-break priority order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CommandKind {
    Support,
    Attack,
    Raid,
    Siege,
    Spy,
    Fake,
    Return,
}

impl CommandKind {
    /// Lower resolves first when arrival and sequence tie
    pub fn priority(&self) -> u8 {
        match self {
            CommandKind::Support => 0,
            CommandKind::Attack => 1,
            CommandKind::Raid => 2,
            CommandKind::Siege => 3,
            CommandKind::Spy => 4,
            CommandKind::Fake => 5,
            CommandKind::Return => 6,
        }
    }

    /// Attack kind for commands that end in a battle
    pub fn attack_kind(&self) -> Option<AttackKind> {
        match self {
            CommandKind::Attack | CommandKind::Fake => Some(AttackKind::Attack),
            CommandKind::Raid => Some(AttackKind::Raid),
            CommandKind::Siege => Some(AttackKind::Siege),
            CommandKind::Support | CommandKind::Spy | CommandKind::Return => None,
        }
    }

    pub fn is_battle(&self) -> bool {
        self.attack_kind().is_some()
    }
}

/// Sort key of a command waiting to be processed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct QueuedCommand {
    pub id: u64,
    /// Unix seconds at which the command arrives
    pub arrival: u64,
    pub sequence: u64,
    pub kind: CommandKind,
}

impl QueuedCommand {
    pub fn new(id: u64, arrival: u64, sequence: u64, kind: CommandKind) -> Self {
        Self {
            id,
            arrival,
            sequence,
            kind,
        }
    }
}

/// Arrival, then sequence, then kind priority, then id
pub fn compare_commands(a: &QueuedCommand, b: &QueuedCommand) -> Ordering {
    a.arrival
        .cmp(&b.arrival)
        .then(a.sequence.cmp(&b.sequence))
        .then(a.kind.priority().cmp(&b.kind.priority()))
        .then(a.id.cmp(&b.id))
}

impl Ord for QueuedCommand {
    fn cmp(&self, other: &Self) -> Ordering {
        compare_commands(self, other)
    }
}

impl PartialOrd for QueuedCommand {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// Sort commands into processing order
pub fn sort_commands(commands: &mut [QueuedCommand]) {
    commands.sort_by(compare_commands);
}
