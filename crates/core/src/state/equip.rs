//! Equipment aggregation: equip, unequip, and sell planners.
//!
//! Each planner validates the request against the current record and, on
//! success, returns an [`EquipPlan`]: the complete next record plus the
//! [`Op`] batch the persistence collaborator must commit atomically. The
//! caller either commits the whole plan or discards it; a half-applied
//! equip is unrepresentable.

use crate::catalog::{GearData, ItemId, ItemOracle};

use super::{EquipSlot, Op, PlayerState};

/// Why an equipment operation was rejected.
///
/// All rejections happen before any stat mutation; the player record is
/// untouched.
#[derive(Clone, Copy, Debug, PartialEq, Eq, thiserror::Error)]
pub enum EquipError {
    #[error("{item} does not fit the {slot} slot")]
    SlotMismatch { item: ItemId, slot: EquipSlot },

    #[error("nothing is equipped in the {slot} slot")]
    EquipSlotEmpty { slot: EquipSlot },

    #[error("equipment cannot change while a battle is in progress")]
    CombatInProgress,

    #[error("{item} is not equippable")]
    NotEquippable { item: ItemId },

    #[error("{item} is not in the inventory")]
    NotInInventory { item: ItemId },

    #[error("{item} is not in the catalog")]
    UnknownItem { item: ItemId },
}

/// Result of a successful equipment planning step.
///
/// `next` is the record after the change; `ops` is the equivalent atomic
/// batch for the persistence collaborator. Committing `ops` and swapping in
/// `next` are two views of one logical mutation.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct EquipPlan {
    pub next: PlayerState,
    pub ops: Vec<Op>,
    /// Item returned to the bag by this plan (displaced incumbent or
    /// unequipped gear), if any.
    pub returned: Option<ItemId>,
}

fn lookup_gear(items: &dyn ItemOracle, item: ItemId) -> Result<GearData, EquipError> {
    let def = items
        .definition(item)
        .ok_or(EquipError::UnknownItem { item })?;
    def.gear().copied().ok_or(EquipError::NotEquippable { item })
}

/// Plans wearing `item` in `target_slot`.
///
/// Any incumbent is unequipped first (its modifiers removed, the item
/// returned to the bag), then the new item's modifiers are applied and the
/// bag loses one copy. Current hp is preserved except for the final clamp
/// when the aggregate `max_hp` shrank.
pub fn plan_equip(
    player: &PlayerState,
    items: &dyn ItemOracle,
    item: ItemId,
    target_slot: EquipSlot,
) -> Result<EquipPlan, EquipError> {
    let gear = lookup_gear(items, item)?;
    if !target_slot.accepts(gear.slot) {
        return Err(EquipError::SlotMismatch {
            item,
            slot: target_slot,
        });
    }
    if player.inventory.quantity(item) == 0 {
        return Err(EquipError::NotInInventory { item });
    }

    let mut next = player.clone();
    let mut ops = Vec::with_capacity(4);
    let mut stats = next.stats;

    // Displace the incumbent first so its deltas never stack with the
    // newcomer's.
    let incumbent = next.equipped.clear(target_slot);
    if let Some(worn) = incumbent {
        let worn_gear = lookup_gear(items, worn)?;
        stats = stats.without_modifier(&worn_gear.modifier);
        next.inventory
            .adjust(worn, 1)
            .expect("returning an item cannot underflow");
        ops.push(Op::AdjustInventory {
            item: worn,
            delta: 1,
        });
    }

    stats = stats.with_modifier(&gear.modifier).hp_clamped();

    next.inventory
        .adjust(item, -1)
        .map_err(|_| EquipError::NotInInventory { item })?;
    next.equipped.set(target_slot, item);
    next.stats = stats;

    ops.push(Op::AdjustInventory { item, delta: -1 });
    ops.push(Op::SetEquipped {
        slot: target_slot,
        item,
    });
    ops.push(Op::SetStats(stats));

    Ok(EquipPlan {
        next,
        ops,
        returned: incumbent,
    })
}

/// Plans emptying `slot`, returning the worn item to the bag.
///
/// An empty slot is an error, not a silent no-op.
pub fn plan_unequip(
    player: &PlayerState,
    items: &dyn ItemOracle,
    slot: EquipSlot,
) -> Result<EquipPlan, EquipError> {
    let worn = player
        .equipped
        .get(slot)
        .ok_or(EquipError::EquipSlotEmpty { slot })?;
    let gear = lookup_gear(items, worn)?;

    let mut next = player.clone();
    next.equipped.clear(slot);
    next.inventory
        .adjust(worn, 1)
        .expect("returning an item cannot underflow");
    let stats = next.stats.without_modifier(&gear.modifier).hp_clamped();
    next.stats = stats;

    let ops = vec![
        Op::ClearEquipped { slot },
        Op::AdjustInventory {
            item: worn,
            delta: 1,
        },
        Op::SetStats(stats),
    ];

    Ok(EquipPlan {
        next,
        ops,
        returned: Some(worn),
    })
}

/// Plans selling one bag copy of `item` for its catalog price.
///
/// Sells from the bag only; a worn item must be unequipped first, which
/// keeps the aggregate stats out of the sale entirely.
pub fn plan_sell(
    player: &PlayerState,
    items: &dyn ItemOracle,
    item: ItemId,
) -> Result<EquipPlan, EquipError> {
    let def = items
        .definition(item)
        .ok_or(EquipError::UnknownItem { item })?;
    if player.inventory.quantity(item) == 0 {
        return Err(EquipError::NotInInventory { item });
    }

    let mut next = player.clone();
    next.inventory
        .adjust(item, -1)
        .map_err(|_| EquipError::NotInInventory { item })?;
    next.coins += def.price;

    let ops = vec![
        Op::AdjustInventory { item, delta: -1 },
        Op::AdjustCoins(def.price),
    ];

    Ok(EquipPlan {
        next,
        ops,
        returned: None,
    })
}
