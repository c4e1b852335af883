//! Runtime configuration shared across workers and handles.

use std::time::Duration;

use arena_core::CombatTuning;

/// Configuration for one battle runtime.
#[derive(Debug, Clone)]
pub struct RuntimeConfig {
    /// Balance numbers handed to the core session.
    pub tuning: CombatTuning,
    /// How long the enemy "thinks" before acting. Cooperative: the worker
    /// keeps answering snapshots during the delay, and tearing the worker
    /// down cancels the pending action entirely.
    pub think_delay: Duration,
    /// Capacity of the event broadcast channel.
    pub event_buffer_size: usize,
    /// Capacity of the command channel.
    pub command_buffer_size: usize,
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        Self {
            tuning: CombatTuning::default(),
            think_delay: Duration::from_millis(900),
            event_buffer_size: 100,
            command_buffer_size: 32,
        }
    }
}
