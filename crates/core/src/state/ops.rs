//! Atomic persistence operations over the player record.
//!
//! Every durable mutation of a [`PlayerState`] is expressed as a batch of
//! [`Op`]s. The persistence collaborator commits a batch all-or-nothing;
//! [`PlayerState::with_ops`] is the reference application semantics both
//! repositories and tests share.

use serde::{Deserialize, Serialize};

use crate::catalog::ItemId;
use crate::stats::StatBlock;

use super::{EquipSlot, PlayerState};

/// One field mutation inside an atomic commit.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Op {
    /// Wear `item` in `slot` (displacing any incumbent).
    SetEquipped { slot: EquipSlot, item: ItemId },
    /// Empty `slot`.
    ClearEquipped { slot: EquipSlot },
    /// Add or remove copies of `item` in the bag.
    AdjustInventory { item: ItemId, delta: i32 },
    /// Replace the cached aggregate stat block.
    SetStats(StatBlock),
    /// Credit experience.
    AdjustXp(i64),
    /// Credit or debit coins.
    AdjustCoins(i64),
}

/// A batch member could not be applied; the whole batch must be rejected.
#[derive(Clone, Copy, Debug, PartialEq, Eq, thiserror::Error)]
pub enum OpError {
    #[error("inventory for {item} would go negative")]
    InventoryUnderflow { item: ItemId },

    #[error("coin balance would go negative")]
    CoinsUnderflow,
}

impl PlayerState {
    /// Applies a batch of ops to a copy of this record, all-or-nothing.
    ///
    /// Returns the updated record on success; on failure nothing is
    /// consumed and the original record is untouched.
    pub fn with_ops(&self, ops: &[Op]) -> Result<PlayerState, OpError> {
        let mut next = self.clone();
        for op in ops {
            next.apply(op)?;
        }
        Ok(next)
    }

    fn apply(&mut self, op: &Op) -> Result<(), OpError> {
        match *op {
            Op::SetEquipped { slot, item } => {
                self.equipped.set(slot, item);
            }
            Op::ClearEquipped { slot } => {
                self.equipped.clear(slot);
            }
            Op::AdjustInventory { item, delta } => {
                self.inventory
                    .adjust(item, delta)
                    .map_err(|e| OpError::InventoryUnderflow { item: e.item })?;
            }
            Op::SetStats(stats) => {
                self.stats = stats;
            }
            Op::AdjustXp(delta) => {
                self.xp += delta;
            }
            Op::AdjustCoins(delta) => {
                let next = self.coins + delta;
                if next < 0 {
                    return Err(OpError::CoinsUnderflow);
                }
                self.coins = next;
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::InventoryState;

    #[test]
    fn batch_applies_in_order() {
        let mut player = PlayerState::new(StatBlock::default());
        player.inventory = InventoryState::with_items([(ItemId(1), 1)]);

        let next = player
            .with_ops(&[
                Op::AdjustInventory {
                    item: ItemId(1),
                    delta: -1,
                },
                Op::SetEquipped {
                    slot: EquipSlot::MainHand,
                    item: ItemId(1),
                },
                Op::AdjustCoins(25),
            ])
            .unwrap();

        assert_eq!(next.inventory.quantity(ItemId(1)), 0);
        assert_eq!(next.equipped.get(EquipSlot::MainHand), Some(ItemId(1)));
        assert_eq!(next.coins, 25);
    }

    #[test]
    fn failing_batch_leaves_original_untouched() {
        let player = PlayerState::new(StatBlock::default());

        let err = player
            .with_ops(&[
                Op::AdjustXp(10),
                Op::AdjustInventory {
                    item: ItemId(9),
                    delta: -1,
                },
            ])
            .unwrap_err();

        assert_eq!(err, OpError::InventoryUnderflow { item: ItemId(9) });
        assert_eq!(player.xp, 0);
    }
}
