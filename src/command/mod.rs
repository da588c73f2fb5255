//! Command queue helpers
//!
//! Deterministic processing order for commands landing in the same tick and
//! a per-player sliding-window rate limiter for incoming commands.

pub mod ordering;
pub mod rate_limit;

pub use ordering::{compare_commands, sort_commands, CommandKind, QueuedCommand};
pub use rate_limit::SlidingWindowLimiter;
