//! Session-scoped combatants.

use serde::{Deserialize, Serialize};

use crate::catalog::{CatalogError, EnemyTemplate, ItemDefinition, ItemOracle};
use crate::config::CombatTuning;
use crate::state::{EquipSlot, PlayerState};
use crate::stats::StatBlock;

/// Identifies a combatant within one session.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CombatantId(pub u32);

impl CombatantId {
    /// The player side of a session.
    pub const PLAYER: CombatantId = CombatantId(0);
    /// The enemy side of a session.
    pub const ENEMY: CombatantId = CombatantId(1);
}

/// A bounded resource pool (mana).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResourceMeter {
    pub current: i32,
    pub max: i32,
}

impl ResourceMeter {
    /// Meter filled to `max`.
    pub fn full(max: i32) -> Self {
        let max = max.max(0);
        Self { current: max, max }
    }

    /// True if `amount` can be spent.
    pub fn can_spend(&self, amount: i32) -> bool {
        self.current >= amount
    }

    /// Meter with `amount` spent. Callers check [`ResourceMeter::can_spend`]
    /// first; overspending is an invariant violation.
    pub fn spent(mut self, amount: i32) -> Self {
        debug_assert!(self.can_spend(amount), "resource overspend");
        self.current = (self.current - amount).max(0);
        self
    }

    /// Meter with `amount` restored, clamped to `max`.
    pub fn restored(mut self, amount: i32) -> Self {
        self.current = (self.current + amount).min(self.max);
        self
    }
}

/// A spell available to a combatant this session.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct KnownSpell {
    pub name: String,
    pub mana_cost: i32,
}

/// One participant in a combat session.
///
/// A `Combatant` is a snapshot: built from the persistent record (player)
/// or a catalog template (enemy) when the session starts, mutated only by
/// the session, and discarded when the session ends. Session hp loss never
/// writes back to the persistent record.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Combatant {
    pub id: CombatantId,
    pub display_name: String,
    pub stats: StatBlock,
    pub mana: ResourceMeter,
    /// Health potions carried into the session.
    pub potions: u16,
    /// Spells granted by equipped spell-slot gear.
    pub spells: Vec<KnownSpell>,
    /// One-shot: the next incoming hit is halved.
    pub guard: bool,
    /// One-shot: the next incoming hit rolls against evasion.
    pub evade: bool,
    pub is_player_controlled: bool,
}

impl Combatant {
    /// Snapshots the player's persistent record into a combatant.
    ///
    /// Aggregate stats are taken as-is (the equipment planners keep them
    /// consistent); potions are counted across the bag; known spells come
    /// from whatever sits in the spell slots.
    pub fn from_player(
        display_name: impl Into<String>,
        player: &PlayerState,
        items: &dyn ItemOracle,
        tuning: &CombatTuning,
    ) -> Result<Self, CatalogError> {
        let mut potions: u16 = 0;
        for slot in player.inventory.iter() {
            let def = items
                .definition(slot.item)
                .ok_or(CatalogError::ItemNotFound(slot.item))?;
            if def.heals().is_some() {
                potions = potions.saturating_add(slot.quantity);
            }
        }

        let mut spells = Vec::new();
        for slot in EquipSlot::SPELL_SLOTS {
            if let Some(item) = player.equipped.get(slot) {
                let def = items
                    .definition(item)
                    .ok_or(CatalogError::ItemNotFound(item))?;
                if let Some(spell) = spell_of(&def) {
                    spells.push(spell);
                }
            }
        }

        Ok(Self {
            id: CombatantId::PLAYER,
            display_name: display_name.into(),
            stats: player.stats.hp_clamped(),
            mana: ResourceMeter::full(tuning.starting_mana),
            potions,
            spells,
            guard: false,
            evade: false,
            is_player_controlled: true,
        })
    }

    /// Builds the enemy combatant from its catalog template.
    pub fn from_enemy(template: &EnemyTemplate, tuning: &CombatTuning) -> Self {
        Self {
            id: CombatantId::ENEMY,
            display_name: template.name.clone(),
            stats: template.stats.hp_clamped(),
            mana: ResourceMeter::full(tuning.starting_mana),
            potions: 0,
            spells: Vec::new(),
            guard: false,
            evade: false,
            is_player_controlled: false,
        }
    }

    /// True once hp has reached 0.
    pub fn is_defeated(&self) -> bool {
        self.stats.is_defeated()
    }
}

fn spell_of(def: &ItemDefinition) -> Option<KnownSpell> {
    let gear = def.gear()?;
    gear.spell.map(|spell| KnownSpell {
        name: def.name.clone(),
        mana_cost: spell.mana_cost,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn resource_meter_clamps() {
        let meter = ResourceMeter::full(50);
        assert!(meter.can_spend(50));
        assert!(!meter.can_spend(51));
        let spent = meter.spent(30);
        assert_eq!(spent.current, 20);
        assert_eq!(spent.restored(100).current, 50);
    }

    #[test]
    fn enemy_snapshot_comes_from_template() {
        let template = EnemyTemplate::new(
            crate::catalog::EnemyId(1),
            "Giant Rat",
            StatBlock::new(20, 8, 0, 3, 8, 5),
            crate::catalog::LootTable::new(50, 10),
        );
        let enemy = Combatant::from_enemy(&template, &CombatTuning::default());
        assert_eq!(enemy.id, CombatantId::ENEMY);
        assert_eq!(enemy.stats, template.stats);
        assert!(!enemy.is_player_controlled);
        assert!(enemy.spells.is_empty());
    }
}
