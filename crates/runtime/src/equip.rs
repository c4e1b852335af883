//! Equipment service: single-writer equip/unequip/sell with atomic commit.
//!
//! The service is the only path that mutates a player's equipment. Each
//! operation loads the current record, runs the core planner (which either
//! produces a complete plan or rejects before any mutation), and commits
//! the plan's op batch atomically. The updated record is returned only
//! after the commit succeeds; on a conflict
//! ([`RepositoryError::Conflict`](crate::repository::RepositoryError::Conflict))
//! nothing has changed anywhere and the call is safe to retry.

use std::sync::Arc;

use tracing::info;

use arena_core::{
    EquipError, EquipSlot, ItemId, ItemOracle, PlayerId, PlayerState, plan_equip, plan_sell,
    plan_unequip,
};

use crate::error::{Result, RuntimeError};
use crate::repository::PlayerRepository;
use crate::session::ActiveSessions;

/// Orchestrates equipment mutation against the persistence collaborator.
pub struct EquipService {
    repository: Arc<dyn PlayerRepository>,
    items: Arc<dyn ItemOracle>,
    sessions: ActiveSessions,
}

impl EquipService {
    pub fn new(
        repository: Arc<dyn PlayerRepository>,
        items: Arc<dyn ItemOracle>,
        sessions: ActiveSessions,
    ) -> Self {
        Self {
            repository,
            items,
            sessions,
        }
    }

    /// Equips `item` into `target_slot`, displacing any incumbent back to
    /// the bag. Returns the committed record.
    pub async fn equip(
        &self,
        player: PlayerId,
        item: ItemId,
        target_slot: EquipSlot,
    ) -> Result<PlayerState> {
        self.reject_during_combat(player)?;
        let current = self.repository.load(player).await?;
        let plan = plan_equip(&current, self.items.as_ref(), item, target_slot)?;
        self.repository.commit_atomic(player, &plan.ops).await?;
        info!(%player, %item, slot = %target_slot, "equipped");
        Ok(plan.next)
    }

    /// Empties `slot`, returning the worn item to the bag.
    pub async fn unequip(&self, player: PlayerId, slot: EquipSlot) -> Result<PlayerState> {
        self.reject_during_combat(player)?;
        let current = self.repository.load(player).await?;
        let plan = plan_unequip(&current, self.items.as_ref(), slot)?;
        self.repository.commit_atomic(player, &plan.ops).await?;
        info!(%player, slot = %slot, "unequipped");
        Ok(plan.next)
    }

    /// Sells one bag copy of `item` for its catalog price.
    pub async fn sell(&self, player: PlayerId, item: ItemId) -> Result<PlayerState> {
        self.reject_during_combat(player)?;
        let current = self.repository.load(player).await?;
        let plan = plan_sell(&current, self.items.as_ref(), item)?;
        self.repository.commit_atomic(player, &plan.ops).await?;
        info!(%player, %item, "sold");
        Ok(plan.next)
    }

    fn reject_during_combat(&self, player: PlayerId) -> Result<()> {
        if self.sessions.is_active(player) {
            return Err(RuntimeError::Equip(EquipError::CombatInProgress));
        }
        Ok(())
    }
}
