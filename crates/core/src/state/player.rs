//! The persistent player record.

use serde::{Deserialize, Serialize};

use crate::catalog::{CatalogError, ItemId, ItemOracle};
use crate::stats::StatBlock;

use super::EquippedSet;

/// Stable identifier of a player record.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct PlayerId(pub u64);

impl std::fmt::Display for PlayerId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "player#{}", self.0)
    }
}

/// One stack of items in the bag.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct InventorySlot {
    pub item: ItemId,
    pub quantity: u16,
}

impl InventorySlot {
    pub fn new(item: ItemId, quantity: u16) -> Self {
        Self { item, quantity }
    }
}

/// Owned items not currently worn.
///
/// Equipping moves an item out of the bag; unequipping puts it back. A
/// stack whose quantity reaches zero is dropped from the list.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct InventoryState {
    slots: Vec<InventorySlot>,
}

/// An inventory adjustment would drive a stack below zero.
#[derive(Clone, Copy, Debug, PartialEq, Eq, thiserror::Error)]
#[error("inventory cannot go below zero for {item}")]
pub struct InventoryUnderflow {
    pub item: ItemId,
}

impl InventoryState {
    pub fn empty() -> Self {
        Self::default()
    }

    /// Builds an inventory from `(item, quantity)` pairs.
    pub fn with_items(items: impl IntoIterator<Item = (ItemId, u16)>) -> Self {
        let mut inv = Self::empty();
        for (item, quantity) in items {
            if quantity > 0 {
                inv.slots.push(InventorySlot::new(item, quantity));
            }
        }
        inv
    }

    /// Quantity of `item` in the bag (zero if absent).
    pub fn quantity(&self, item: ItemId) -> u16 {
        self.slots
            .iter()
            .find(|slot| slot.item == item)
            .map(|slot| slot.quantity)
            .unwrap_or(0)
    }

    /// Adds or removes `delta` copies of `item`.
    ///
    /// Fails without mutating anything if the result would be negative.
    pub fn adjust(&mut self, item: ItemId, delta: i32) -> Result<(), InventoryUnderflow> {
        let current = self.quantity(item) as i32;
        let next = current + delta;
        if next < 0 {
            return Err(InventoryUnderflow { item });
        }

        if next == 0 {
            self.slots.retain(|slot| slot.item != item);
        } else if let Some(slot) = self.slots.iter_mut().find(|slot| slot.item == item) {
            slot.quantity = next as u16;
        } else {
            self.slots.push(InventorySlot::new(item, next as u16));
        }
        Ok(())
    }

    /// Iterates over non-empty stacks.
    pub fn iter(&self) -> impl Iterator<Item = &InventorySlot> {
        self.slots.iter()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }
}

/// The authoritative persistent record for one player.
///
/// `stats` is the cached aggregate (`base_stats` plus the sum of every
/// worn item's modifiers) and is kept in lockstep with `equipped` by the
/// equip planners. [`PlayerState::recompute_stats`] rebuilds the aggregate
/// from scratch for audits.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerState {
    pub base_stats: StatBlock,
    pub stats: StatBlock,
    pub equipped: EquippedSet,
    pub inventory: InventoryState,
    pub xp: i64,
    pub coins: i64,
}

impl PlayerState {
    /// Fresh record: nothing worn, empty bag, aggregate equals base.
    pub fn new(base_stats: StatBlock) -> Self {
        Self {
            base_stats,
            stats: base_stats,
            equipped: EquippedSet::empty(),
            inventory: InventoryState::empty(),
            xp: 0,
            coins: 0,
        }
    }

    /// Rebuilds the aggregate stat block from base stats and the worn set.
    ///
    /// The planners maintain `stats` incrementally; this is the from-scratch
    /// recomputation used to audit that invariant (and by tests).
    pub fn recompute_stats(&self, items: &dyn ItemOracle) -> Result<StatBlock, CatalogError> {
        let mut stats = StatBlock {
            hp: self.stats.hp,
            ..self.base_stats
        };
        for (_, item) in self.equipped.iter() {
            let def = items.definition(item).ok_or(CatalogError::ItemNotFound(item))?;
            if let Some(gear) = def.gear() {
                stats = stats.with_modifier(&gear.modifier);
            }
        }
        Ok(stats.hp_clamped())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn adjust_tracks_quantities() {
        let mut inv = InventoryState::empty();
        inv.adjust(ItemId(1), 3).unwrap();
        assert_eq!(inv.quantity(ItemId(1)), 3);
        inv.adjust(ItemId(1), -2).unwrap();
        assert_eq!(inv.quantity(ItemId(1)), 1);
    }

    #[test]
    fn adjust_rejects_underflow_without_mutating() {
        let mut inv = InventoryState::with_items([(ItemId(1), 1)]);
        let err = inv.adjust(ItemId(1), -2).unwrap_err();
        assert_eq!(err.item, ItemId(1));
        assert_eq!(inv.quantity(ItemId(1)), 1);
    }

    #[test]
    fn empty_stacks_are_dropped() {
        let mut inv = InventoryState::with_items([(ItemId(1), 1)]);
        inv.adjust(ItemId(1), -1).unwrap();
        assert!(inv.is_empty());
    }
}
