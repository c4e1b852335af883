//! Events emitted while a battle runs.

use serde::{Deserialize, Serialize};

use arena_core::{CombatState, RewardGrant};

/// Final result of a battle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BattleOutcome {
    Victory,
    Defeat,
}

/// One state transition, as seen by UI subscribers.
///
/// Every transition carries its battle-log message and the hp of both
/// sides after the transition; terminal transitions also carry the
/// outcome.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CombatEvent {
    pub state: CombatState,
    pub message: String,
    /// Player hp as `(current, max)`.
    pub player_hp: (i32, i32),
    /// Enemy hp as `(current, max)`.
    pub enemy_hp: (i32, i32),
    pub outcome: Option<BattleOutcome>,
    /// Loot granted by a victory, for the progression collaborator.
    /// Present only on the terminal victory event.
    pub reward: Option<RewardGrant>,
}

impl CombatEvent {
    /// True for the event that closed the battle.
    pub fn is_terminal(&self) -> bool {
        self.outcome.is_some()
    }
}
