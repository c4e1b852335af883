//! Damage formulas.
//!
//! Two families cover every direct-damage action:
//!
//! ```text
//! base  = max(1, attack - defense / 2)     (integer division)
//! final = max(1, base + variation)
//! ```
//!
//! Physical actions feed `physical_damage` into `attack`; spells feed
//! `magic_damage`. The same `defense` stat mitigates both families (there
//! is no separate magic resist).

/// Guaranteed minimum for any direct-damage hit.
pub const MINIMUM_DAMAGE: i32 = 1;

/// Physical damage: attack vs halved defense, plus variance, floored at 1.
pub fn physical_strike(physical_damage: i32, defense: i32, variation: i32) -> i32 {
    strike(physical_damage, defense, variation)
}

/// Spell damage: identical shape with `magic_damage` as the attack stat.
pub fn magic_strike(magic_damage: i32, defense: i32, variation: i32) -> i32 {
    strike(magic_damage, defense, variation)
}

fn strike(attack: i32, defense: i32, variation: i32) -> i32 {
    let base = (attack - defense / 2).max(MINIMUM_DAMAGE);
    (base + variation).max(MINIMUM_DAMAGE)
}

/// Halves a hit through a raised guard; the damage floor still applies.
pub fn guarded(damage: i32, divisor: i32) -> i32 {
    debug_assert!(divisor >= 1, "guard divisor must be at least 1");
    (damage / divisor.max(1)).max(MINIMUM_DAMAGE)
}
