//! Resolution outcome types.

use serde::{Deserialize, Serialize};

/// How a resolved action landed.
///
/// `Dodged` is distinct from a floored 1-damage hit: a successful evade is
/// the only way a direct-damage action deals exactly zero.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum OutcomeKind {
    /// Direct damage connected.
    Damage,
    /// Direct damage connected but a guard halved it.
    GuardedHit,
    /// An armed evade negated the hit entirely.
    Dodged,
    /// The actor restored its own hp.
    Healed,
    /// The actor raised a guard for the next incoming hit.
    Braced,
    /// The actor armed an evade for the next incoming hit.
    Evading,
}

/// Result of resolving one combat action.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActionOutcome {
    pub kind: OutcomeKind,

    /// Damage dealt to the target. Never negative; zero only for
    /// non-damaging outcomes and successful dodges.
    pub final_damage: i32,

    /// Human-readable narration, also the battle-log entry.
    pub message: String,

    /// True if this action reduced the target's hp to 0.
    pub target_defeated: bool,
}
