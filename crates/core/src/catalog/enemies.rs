//! Enemy catalog oracle and templates.

use serde::{Deserialize, Serialize};

use crate::stats::StatBlock;

/// Stable identifier of an enemy definition in the catalog.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct EnemyId(pub u32);

impl std::fmt::Display for EnemyId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "enemy#{}", self.0)
    }
}

/// Rewards granted to the player when this enemy is defeated.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LootTable {
    pub xp: i64,
    pub coins: i64,
}

impl LootTable {
    pub const fn new(xp: i64, coins: i64) -> Self {
        Self { xp, coins }
    }
}

/// Enemy definition: combat stats straight from the catalog plus loot.
///
/// Unlike the player, an enemy's stats are not aggregated from equipment;
/// the template is the authority.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct EnemyTemplate {
    pub id: EnemyId,
    pub name: String,
    pub stats: StatBlock,
    pub loot: LootTable,
}

impl EnemyTemplate {
    pub fn new(id: EnemyId, name: impl Into<String>, stats: StatBlock, loot: LootTable) -> Self {
        Self {
            id,
            name: name.into(),
            stats,
            loot,
        }
    }
}

/// Oracle supplying enemy templates.
pub trait EnemyOracle: Send + Sync {
    /// Returns the template for `id`, if the catalog knows it.
    fn template(&self, id: EnemyId) -> Option<EnemyTemplate>;
}
