//! Victory rewards.

use serde::{Deserialize, Serialize};

use crate::catalog::LootTable;
use crate::state::Op;

/// Durable deltas granted to the player for a victory.
///
/// Produced by the session exactly once per Victory transition (see
/// `CombatSession::take_reward`); the progression collaborator turns the xp
/// into level-ups, the persistence collaborator commits the ops.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RewardGrant {
    pub xp: i64,
    pub coins: i64,
}

impl RewardGrant {
    /// Converts a defeated enemy's loot table into the player's grant.
    pub fn from_loot(loot: &LootTable) -> Self {
        Self {
            xp: loot.xp,
            coins: loot.coins,
        }
    }

    /// The atomic op batch that applies this grant.
    pub fn ops(&self) -> Vec<Op> {
        vec![Op::AdjustXp(self.xp), Op::AdjustCoins(self.coins)]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn grant_mirrors_loot() {
        let grant = RewardGrant::from_loot(&LootTable::new(50, 10));
        assert_eq!(grant.xp, 50);
        assert_eq!(grant.coins, 10);
        assert_eq!(grant.ops(), vec![Op::AdjustXp(50), Op::AdjustCoins(10)]);
    }
}
