//! Item catalog oracle and definitions.

use serde::{Deserialize, Serialize};

use crate::state::SlotKind;
use crate::stats::ItemModifier;

/// Stable identifier of an item definition in the catalog.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ItemId(pub u32);

impl std::fmt::Display for ItemId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "item#{}", self.0)
    }
}

/// Oracle supplying item definitions.
///
/// Implementations live outside the core (static tables, loaded files, a
/// remote store); the core only reads.
pub trait ItemOracle: Send + Sync {
    /// Returns the definition for `id`, if the catalog knows it.
    fn definition(&self, id: ItemId) -> Option<ItemDefinition>;

    /// Returns every definition in this catalog.
    ///
    /// Used by tooling and tests; oracles backed by remote stores may
    /// return an empty list.
    fn all_definitions(&self) -> Vec<ItemDefinition> {
        Vec::new()
    }
}

/// Item definition with common fields and kind-specific data.
///
/// Base struct holds the fields every item has; the `kind` enum carries the
/// data that differs between gear and consumables.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ItemDefinition {
    pub id: ItemId,
    pub name: String,
    pub kind: ItemKind,
    /// Base price in coins; selling credits this amount.
    pub price: i64,
}

impl ItemDefinition {
    pub fn new(id: ItemId, name: impl Into<String>, kind: ItemKind, price: i64) -> Self {
        Self {
            id,
            name: name.into(),
            kind,
            price,
        }
    }

    /// Gear payload, if this item is equippable.
    pub fn gear(&self) -> Option<&GearData> {
        match &self.kind {
            ItemKind::Gear(data) => Some(data),
            ItemKind::Consumable(_) => None,
        }
    }

    /// Health restored when consumed, if this is a healing consumable.
    pub fn heals(&self) -> Option<i32> {
        match &self.kind {
            ItemKind::Consumable(ConsumableData {
                effect: ConsumableEffect::RestoreHealth(amount),
            }) => Some(*amount),
            _ => None,
        }
    }
}

/// Item type with kind-specific data.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum ItemKind {
    /// Equippable gear: weapons, armor, and spell tomes.
    Gear(GearData),

    /// Consumable item (potions, elixirs). Carries no slot.
    Consumable(ConsumableData),
}

/// Gear-specific data.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GearData {
    /// Slot family this item fits (the three spell slots share one family).
    pub slot: SlotKind,
    /// Stat deltas granted while equipped.
    pub modifier: ItemModifier,
    /// Castable spell granted while equipped, for spell-slot gear.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub spell: Option<SpellData>,
}

/// Spell granted by an equipped spell-slot item.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SpellData {
    pub mana_cost: i32,
}

/// Consumable-specific data.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConsumableData {
    pub effect: ConsumableEffect,
}

/// Consumable effects.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum ConsumableEffect {
    /// Restore health.
    RestoreHealth(i32),

    /// Restore mana.
    RestoreMana(i32),
}
