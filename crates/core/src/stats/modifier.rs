//! Sparse equipment deltas and their signed application.

use serde::{Deserialize, Serialize};

use super::StatBlock;

/// Sparse stat delta carried by a catalog item.
///
/// Absent fields contribute zero. `health_bonus` adjusts `max_hp`, never
/// current `hp`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ItemModifier {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub physical_damage: Option<i32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub magic_damage: Option<i32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub defense: Option<i32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub health_bonus: Option<i32>,
}

impl ItemModifier {
    /// Delta with no effect on any stat.
    pub fn none() -> Self {
        Self::default()
    }

    /// True if every field is absent.
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}

impl StatBlock {
    /// Applies an item's deltas (equip direction) and re-floors.
    ///
    /// Current `hp` is left as-is even when `health_bonus` changes `max_hp`;
    /// the equipment aggregator clamps `hp <= max_hp` once the whole plan is
    /// assembled.
    pub fn with_modifier(self, modifier: &ItemModifier) -> Self {
        self.with_signed_modifier(modifier, 1)
    }

    /// Removes an item's deltas (unequip direction) and re-floors.
    pub fn without_modifier(self, modifier: &ItemModifier) -> Self {
        self.with_signed_modifier(modifier, -1)
    }

    fn with_signed_modifier(mut self, modifier: &ItemModifier, sign: i32) -> Self {
        debug_assert!(sign == 1 || sign == -1, "sign must be +1 or -1");

        if let Some(delta) = modifier.physical_damage {
            self.physical_damage += sign * delta;
        }
        if let Some(delta) = modifier.magic_damage {
            self.magic_damage += sign * delta;
        }
        if let Some(delta) = modifier.defense {
            self.defense += sign * delta;
        }
        if let Some(delta) = modifier.health_bonus {
            self.max_hp += sign * delta;
        }

        self.floored()
    }
}
