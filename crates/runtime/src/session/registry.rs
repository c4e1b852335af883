//! Tracks which players currently have a live battle.
//!
//! The equipment service consults this registry to enforce the
//! no-equipment-changes-mid-fight rule; battle workers hold a guard for
//! their player and release it when the battle is decided or torn down.

use std::collections::HashSet;
use std::sync::{Arc, Mutex};

use arena_core::PlayerId;

/// Shared registry of players with an active combat session.
#[derive(Clone, Default)]
pub struct ActiveSessions {
    inner: Arc<Mutex<HashSet<PlayerId>>>,
}

impl ActiveSessions {
    pub fn new() -> Self {
        Self::default()
    }

    /// True if `player` is currently in a battle.
    pub fn is_active(&self, player: PlayerId) -> bool {
        self.lock().contains(&player)
    }

    /// Claims the battle slot for `player`.
    ///
    /// Returns `None` if the player already has a live battle; the guard
    /// releases the slot when dropped.
    pub(crate) fn begin(&self, player: PlayerId) -> Option<SessionGuard> {
        let mut active = self.lock();
        if !active.insert(player) {
            return None;
        }
        Some(SessionGuard {
            player,
            registry: self.clone(),
        })
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, HashSet<PlayerId>> {
        // A poisoned registry means a worker panicked mid-update; nothing
        // here can be mid-update (single insert/remove), so recover.
        self.inner.lock().unwrap_or_else(|e| e.into_inner())
    }
}

/// Releases a player's battle slot on drop.
pub(crate) struct SessionGuard {
    player: PlayerId,
    registry: ActiveSessions,
}

impl Drop for SessionGuard {
    fn drop(&mut self) {
        self.registry.lock().remove(&self.player);
    }
}
