//! Repository contract for the persistent player record.

use arena_core::{Op, PlayerId, PlayerState};

use super::error::Result;

/// Storage for player records with atomic multi-field commits.
///
/// This is the primitive the equipment aggregator and the reward path
/// require from the persistence collaborator: [`PlayerRepository::commit_atomic`]
/// applies a whole [`Op`] batch or none of it. Implementations must never
/// expose a record with part of a batch applied.
#[async_trait::async_trait]
pub trait PlayerRepository: Send + Sync {
    /// Loads the current record.
    async fn load(&self, player: PlayerId) -> Result<PlayerState>;

    /// Creates or replaces the record wholesale (bootstrap, tooling).
    async fn put(&self, player: PlayerId, state: &PlayerState) -> Result<()>;

    /// Commits `ops` all-or-nothing against the current record.
    ///
    /// A batch that cannot apply (unknown player, inventory underflow)
    /// fails with `Conflict`/`NotFound` without writing anything.
    async fn commit_atomic(&self, player: PlayerId, ops: &[Op]) -> Result<()>;
}
