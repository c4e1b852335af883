//! Property tests for the invariants the rest of the system leans on.

use proptest::prelude::*;

use arena_core::combat::damage::{magic_strike, physical_strike};
use arena_core::{ItemModifier, StatBlock};

proptest! {
    /// Direct damage never drops below 1, whatever the stats and variance.
    #[test]
    fn damage_floor_holds(
        attack in 1i32..500,
        defense in 0i32..500,
        variation in -10i32..10,
    ) {
        prop_assert!(physical_strike(attack, defense, variation) >= 1);
        prop_assert!(magic_strike(attack, defense, variation) >= 1);
    }

    /// Hp stays inside [0, max_hp] through arbitrary damage/heal sequences.
    #[test]
    fn hp_bounds_hold(
        max_hp in 10i32..1000,
        steps in proptest::collection::vec((any::<bool>(), 0i32..200), 0..64),
    ) {
        let mut stats = StatBlock::new(max_hp, 10, 0, 5, 10, 0);
        for (heal, amount) in steps {
            stats = if heal { stats.healed(amount) } else { stats.damaged(amount) };
            prop_assert!(stats.hp >= 0);
            prop_assert!(stats.hp <= stats.max_hp);
        }
    }

    /// Equip-then-unequip restores the original block whenever no floor
    /// clamp fires. Stat ranges are chosen so that applying the modifier
    /// cannot touch a floor (clamping is deliberately lossy).
    #[test]
    fn modifier_round_trip(
        max_hp in 100i32..500,
        physical in 50i32..100,
        magic in 50i32..100,
        defense in 50i32..100,
        d_phys in -40i32..40,
        d_magic in -40i32..40,
        d_def in -40i32..40,
        d_hp in -80i32..80,
    ) {
        let base = StatBlock::new(max_hp, physical, magic, defense, 10, 10);
        let modifier = ItemModifier {
            physical_damage: Some(d_phys),
            magic_damage: Some(d_magic),
            defense: Some(d_def),
            health_bonus: Some(d_hp),
        };

        let round_tripped = base.with_modifier(&modifier).without_modifier(&modifier);
        prop_assert_eq!(round_tripped, base);
    }

    /// Sparse deltas leave untouched fields bit-identical.
    #[test]
    fn absent_fields_change_nothing(
        max_hp in 10i32..500,
        physical in 1i32..100,
        d_def in -5i32..40,
    ) {
        let base = StatBlock::new(max_hp, physical, 3, 50, 10, 10);
        let modifier = ItemModifier {
            defense: Some(d_def),
            ..ItemModifier::default()
        };
        let applied = base.with_modifier(&modifier);
        prop_assert_eq!(applied.physical_damage, base.physical_damage);
        prop_assert_eq!(applied.magic_damage, base.magic_damage);
        prop_assert_eq!(applied.max_hp, base.max_hp);
        prop_assert_eq!(applied.hp, base.hp);
    }
}
