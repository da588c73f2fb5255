//! Sliding-window rate limiting for command submission

use std::collections::VecDeque;

use ahash::AHashMap;

use crate::core::types::PlayerId;

/// Allows at most `max_events` per player in any `window_secs` span
#[derive(Debug, Clone)]
pub struct SlidingWindowLimiter {
    max_events: usize,
    window_secs: u64,
    events: AHashMap<PlayerId, VecDeque<u64>>,
}

impl SlidingWindowLimiter {
    pub fn new(max_events: usize, window_secs: u64) -> Self {
        Self {
            max_events,
            window_secs,
            events: AHashMap::new(),
        }
    }

    fn prune(window: &mut VecDeque<u64>, now: u64, window_secs: u64) {
        while window.front().is_some_and(|&t| t.saturating_add(window_secs) <= now) {
            window.pop_front();
        }
    }

    /// Record an event at `now` if the player still has room
    pub fn try_acquire(&mut self, player: PlayerId, now: u64) -> bool {
        let window = self.events.entry(player).or_default();
        Self::prune(window, now, self.window_secs);
        if window.len() >= self.max_events {
            return false;
        }
        window.push_back(now);
        true
    }

    /// Events the player may still submit at `now`
    pub fn remaining(&mut self, player: PlayerId, now: u64) -> usize {
        match self.events.get_mut(&player) {
            Some(window) => {
                Self::prune(window, now, self.window_secs);
                self.max_events.saturating_sub(window.len())
            }
            None => self.max_events,
        }
    }

    /// Drop players with no events left in the window
    pub fn purge_idle(&mut self, now: u64) {
        let window_secs = self.window_secs;
        self.events.retain(|_, window| {
            Self::prune(window, now, window_secs);
            !window.is_empty()
        });
    }

    pub fn tracked_players(&self) -> usize {
        self.events.len()
    }
}
