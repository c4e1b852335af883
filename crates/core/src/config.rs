//! Balance numbers for combat resolution.

use serde::{Deserialize, Serialize};

/// Tunable combat parameters.
///
/// The defaults are the shipped balance; tests override individual fields
/// (most often the variance ranges, to make rolls predictable).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CombatTuning {
    /// Hp restored by drinking a health potion.
    pub heal_amount: i32,
    /// Mana pool granted to each combatant at session start.
    pub starting_mana: i32,
    /// Inclusive damage-variance range for player attacks.
    pub player_variance: (i32, i32),
    /// Inclusive damage-variance range for enemy attacks. Skewed upward on
    /// purpose: enemy swings have a higher expected value.
    pub enemy_variance: (i32, i32),
    /// Incoming damage is divided by this while a guard is up.
    pub guard_divisor: i32,
}

impl CombatTuning {
    pub const DEFAULT_HEAL_AMOUNT: i32 = 20;
    pub const DEFAULT_STARTING_MANA: i32 = 50;
    pub const DEFAULT_PLAYER_VARIANCE: (i32, i32) = (-2, 2);
    pub const DEFAULT_ENEMY_VARIANCE: (i32, i32) = (-1, 3);
    pub const DEFAULT_GUARD_DIVISOR: i32 = 2;

    pub fn new() -> Self {
        Self {
            heal_amount: Self::DEFAULT_HEAL_AMOUNT,
            starting_mana: Self::DEFAULT_STARTING_MANA,
            player_variance: Self::DEFAULT_PLAYER_VARIANCE,
            enemy_variance: Self::DEFAULT_ENEMY_VARIANCE,
            guard_divisor: Self::DEFAULT_GUARD_DIVISOR,
        }
    }

    /// Tuning with both variance ranges pinned to zero.
    ///
    /// Turns the damage formulas into exact arithmetic; used by tests and
    /// balance tooling.
    pub fn without_variance() -> Self {
        Self {
            player_variance: (0, 0),
            enemy_variance: (0, 0),
            ..Self::new()
        }
    }
}

impl Default for CombatTuning {
    fn default() -> Self {
        Self::new()
    }
}
