//! Equipment slots and the worn-item set.

use serde::{Deserialize, Serialize};

use crate::catalog::ItemId;

/// Equipment slots a player can fill, one item each.
///
/// A closed enum rather than slot-name strings: adding a slot forces every
/// match in the crate to handle it.
#[derive(
    Clone,
    Copy,
    Debug,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    strum::Display,
    strum::EnumString,
    strum::EnumIter,
)]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum EquipSlot {
    MainHand,
    OffHand,
    Head,
    Chest,
    Hands,
    Legs,
    Feet,
    Spell1,
    Spell2,
    Spell3,
}

impl EquipSlot {
    /// The slot family this slot belongs to.
    ///
    /// The three spell slots are interchangeable homes for spell gear; every
    /// other slot is its own family.
    pub fn kind(&self) -> SlotKind {
        match self {
            EquipSlot::MainHand => SlotKind::MainHand,
            EquipSlot::OffHand => SlotKind::OffHand,
            EquipSlot::Head => SlotKind::Head,
            EquipSlot::Chest => SlotKind::Chest,
            EquipSlot::Hands => SlotKind::Hands,
            EquipSlot::Legs => SlotKind::Legs,
            EquipSlot::Feet => SlotKind::Feet,
            EquipSlot::Spell1 | EquipSlot::Spell2 | EquipSlot::Spell3 => SlotKind::Spell,
        }
    }

    /// True if gear classified as `kind` may be worn in this slot.
    pub fn accepts(&self, kind: SlotKind) -> bool {
        self.kind() == kind
    }

    /// The three spell slots in display order.
    pub const SPELL_SLOTS: [EquipSlot; 3] = [EquipSlot::Spell1, EquipSlot::Spell2, EquipSlot::Spell3];
}

/// Slot classification carried by gear in the item catalog.
#[derive(
    Clone,
    Copy,
    Debug,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    strum::Display,
    strum::EnumString,
)]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum SlotKind {
    MainHand,
    OffHand,
    Head,
    Chest,
    Hands,
    Legs,
    Feet,
    /// Fits any of the three spell slots.
    Spell,
}

/// What the player currently wears: at most one item per slot.
///
/// Mutated only through the equip planners, never directly, so the cached
/// aggregate stats can never drift from the worn set.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EquippedSet {
    main_hand: Option<ItemId>,
    off_hand: Option<ItemId>,
    head: Option<ItemId>,
    chest: Option<ItemId>,
    hands: Option<ItemId>,
    legs: Option<ItemId>,
    feet: Option<ItemId>,
    spell_1: Option<ItemId>,
    spell_2: Option<ItemId>,
    spell_3: Option<ItemId>,
}

impl EquippedSet {
    /// Creates an empty set (nothing worn).
    pub fn empty() -> Self {
        Self::default()
    }

    fn entry(&self, slot: EquipSlot) -> &Option<ItemId> {
        match slot {
            EquipSlot::MainHand => &self.main_hand,
            EquipSlot::OffHand => &self.off_hand,
            EquipSlot::Head => &self.head,
            EquipSlot::Chest => &self.chest,
            EquipSlot::Hands => &self.hands,
            EquipSlot::Legs => &self.legs,
            EquipSlot::Feet => &self.feet,
            EquipSlot::Spell1 => &self.spell_1,
            EquipSlot::Spell2 => &self.spell_2,
            EquipSlot::Spell3 => &self.spell_3,
        }
    }

    fn entry_mut(&mut self, slot: EquipSlot) -> &mut Option<ItemId> {
        match slot {
            EquipSlot::MainHand => &mut self.main_hand,
            EquipSlot::OffHand => &mut self.off_hand,
            EquipSlot::Head => &mut self.head,
            EquipSlot::Chest => &mut self.chest,
            EquipSlot::Hands => &mut self.hands,
            EquipSlot::Legs => &mut self.legs,
            EquipSlot::Feet => &mut self.feet,
            EquipSlot::Spell1 => &mut self.spell_1,
            EquipSlot::Spell2 => &mut self.spell_2,
            EquipSlot::Spell3 => &mut self.spell_3,
        }
    }

    /// Item currently worn in `slot`, if any.
    pub fn get(&self, slot: EquipSlot) -> Option<ItemId> {
        *self.entry(slot)
    }

    /// Wears `item` in `slot`, returning the displaced incumbent if any.
    pub fn set(&mut self, slot: EquipSlot, item: ItemId) -> Option<ItemId> {
        self.entry_mut(slot).replace(item)
    }

    /// Empties `slot`, returning the item that was worn there.
    pub fn clear(&mut self, slot: EquipSlot) -> Option<ItemId> {
        self.entry_mut(slot).take()
    }

    /// Iterates over filled slots in declaration order.
    pub fn iter(&self) -> impl Iterator<Item = (EquipSlot, ItemId)> + '_ {
        use strum::IntoEnumIterator;
        EquipSlot::iter().filter_map(|slot| self.get(slot).map(|item| (slot, item)))
    }

    /// Slot currently holding `item`, if it is worn anywhere.
    pub fn slot_of(&self, item: ItemId) -> Option<EquipSlot> {
        self.iter()
            .find_map(|(slot, worn)| (worn == item).then_some(slot))
    }

    /// True if nothing is worn.
    pub fn is_empty(&self) -> bool {
        self.iter().next().is_none()
    }
}
