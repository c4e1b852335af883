//! In-memory PlayerRepository implementation for tests and local runs.

use std::collections::HashMap;
use std::sync::RwLock;

use arena_core::{Op, PlayerId, PlayerState};

use super::error::{RepositoryError, Result};
use super::traits::PlayerRepository;

/// In-memory implementation of [`PlayerRepository`].
///
/// Records live in a `RwLock`ed map; a commit applies its whole batch to a
/// copy under the write lock and swaps it in, so readers never observe a
/// half-applied batch.
#[derive(Default)]
pub struct InMemoryPlayerRepo {
    players: RwLock<HashMap<PlayerId, PlayerState>>,
}

impl InMemoryPlayerRepo {
    /// Creates an empty repository.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a repository seeded with one record.
    pub fn with_player(player: PlayerId, state: PlayerState) -> Self {
        let repo = Self::new();
        repo.players
            .write()
            .expect("fresh lock cannot be poisoned")
            .insert(player, state);
        repo
    }
}

#[async_trait::async_trait]
impl PlayerRepository for InMemoryPlayerRepo {
    async fn load(&self, player: PlayerId) -> Result<PlayerState> {
        let players = self
            .players
            .read()
            .map_err(|_| RepositoryError::LockPoisoned)?;
        players
            .get(&player)
            .cloned()
            .ok_or(RepositoryError::NotFound(player))
    }

    async fn put(&self, player: PlayerId, state: &PlayerState) -> Result<()> {
        let mut players = self
            .players
            .write()
            .map_err(|_| RepositoryError::LockPoisoned)?;
        players.insert(player, state.clone());
        Ok(())
    }

    async fn commit_atomic(&self, player: PlayerId, ops: &[Op]) -> Result<()> {
        let mut players = self
            .players
            .write()
            .map_err(|_| RepositoryError::LockPoisoned)?;
        let current = players
            .get(&player)
            .ok_or(RepositoryError::NotFound(player))?;

        let next = current
            .with_ops(ops)
            .map_err(|e| RepositoryError::Conflict {
                player,
                reason: e.to_string(),
            })?;

        players.insert(player, next);
        Ok(())
    }
}
