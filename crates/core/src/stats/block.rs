//! The numeric capability set governing combat outcomes.

use serde::{Deserialize, Serialize};

/// Numeric capability set of a combatant.
///
/// `StatBlock` is a value type: every mutation produces a new block with the
/// floor invariants re-applied. The combat session and the persistent player
/// record each hold their own copy, so the "live" combat stats can never
/// alias the stored ones.
///
/// # Invariants
///
/// - `0 <= hp <= max_hp`
/// - `physical_damage >= 1`
/// - `magic_damage >= 0`
/// - `defense >= 0`
/// - `max_hp >= 10`
///
/// Floors are enforced after every mutation, never before. Equipment
/// application deliberately leaves `hp` untouched (see
/// [`StatBlock::with_modifier`]); callers re-clamp `hp` when `max_hp`
/// shrank.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatBlock {
    pub hp: i32,
    pub max_hp: i32,
    pub physical_damage: i32,
    pub magic_damage: i32,
    pub defense: i32,
    pub speed: i32,
    /// Chance (integer percent, 0-100) that an armed evade negates a hit.
    pub evasion: i32,
}

impl StatBlock {
    /// Lowest legal `physical_damage`.
    pub const MIN_PHYSICAL_DAMAGE: i32 = 1;
    /// Lowest legal `magic_damage`.
    pub const MIN_MAGIC_DAMAGE: i32 = 0;
    /// Lowest legal `defense`.
    pub const MIN_DEFENSE: i32 = 0;
    /// Lowest legal `max_hp`.
    pub const MIN_MAX_HP: i32 = 10;

    /// Creates a stat block at full health with the floors applied.
    pub fn new(
        max_hp: i32,
        physical_damage: i32,
        magic_damage: i32,
        defense: i32,
        speed: i32,
        evasion: i32,
    ) -> Self {
        Self {
            hp: max_hp,
            max_hp,
            physical_damage,
            magic_damage,
            defense,
            speed,
            evasion,
        }
        .floored()
        .hp_clamped()
    }

    /// Re-applies the non-hp floors.
    ///
    /// `hp` is intentionally not touched here: equip/unequip must be able to
    /// shrink `max_hp` without silently rewriting current `hp` (the caller
    /// decides when to clamp).
    pub fn floored(mut self) -> Self {
        self.physical_damage = self.physical_damage.max(Self::MIN_PHYSICAL_DAMAGE);
        self.magic_damage = self.magic_damage.max(Self::MIN_MAGIC_DAMAGE);
        self.defense = self.defense.max(Self::MIN_DEFENSE);
        self.max_hp = self.max_hp.max(Self::MIN_MAX_HP);
        self.evasion = self.evasion.clamp(0, 100);
        self
    }

    /// Clamps `hp` into `[0, max_hp]`.
    pub fn hp_clamped(mut self) -> Self {
        self.hp = self.hp.clamp(0, self.max_hp);
        self
    }

    /// Returns a block with `damage` subtracted from `hp`, clamped to 0.
    pub fn damaged(mut self, damage: i32) -> Self {
        debug_assert!(damage >= 0, "damage must be non-negative");
        self.hp = (self.hp - damage).max(0);
        self
    }

    /// Returns a block with `amount` added to `hp`, clamped to `max_hp`.
    pub fn healed(mut self, amount: i32) -> Self {
        debug_assert!(amount >= 0, "heal amount must be non-negative");
        self.hp = (self.hp + amount).min(self.max_hp);
        self
    }

    /// True once `hp` has reached 0.
    pub fn is_defeated(&self) -> bool {
        self.hp <= 0
    }
}

impl Default for StatBlock {
    /// Baseline block: 100 hp, modest offense, no mitigation.
    fn default() -> Self {
        Self::new(100, 10, 0, 0, 10, 0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_applies_floors() {
        let stats = StatBlock::new(5, 0, -3, -1, 10, 120);
        assert_eq!(stats.max_hp, StatBlock::MIN_MAX_HP);
        assert_eq!(stats.hp, StatBlock::MIN_MAX_HP);
        assert_eq!(stats.physical_damage, StatBlock::MIN_PHYSICAL_DAMAGE);
        assert_eq!(stats.magic_damage, 0);
        assert_eq!(stats.defense, 0);
        assert_eq!(stats.evasion, 100);
    }

    #[test]
    fn damage_clamps_to_zero() {
        let stats = StatBlock::new(20, 5, 0, 0, 10, 0).damaged(50);
        assert_eq!(stats.hp, 0);
        assert!(stats.is_defeated());
    }

    #[test]
    fn heal_clamps_to_max() {
        let stats = StatBlock::new(20, 5, 0, 0, 10, 0).damaged(5).healed(100);
        assert_eq!(stats.hp, 20);
    }

    #[test]
    fn hp_clamp_after_max_hp_shrink() {
        let mut stats = StatBlock::new(100, 5, 0, 0, 10, 0);
        stats.max_hp = 30;
        let stats = stats.hp_clamped();
        assert_eq!(stats.hp, 30);
    }
}
