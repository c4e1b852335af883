//! Static catalog implementations of the core oracle traits.
//!
//! Catalogs are in-memory maps, built programmatically or loaded from RON
//! documents. The shop/loot collaborator that decides *which* items and
//! enemies exist is out of scope; these types only serve lookups.

use std::collections::HashMap;
use std::path::Path;

use serde::{Deserialize, Serialize};

use arena_core::{EnemyId, EnemyOracle, EnemyTemplate, ItemDefinition, ItemId, ItemOracle};

/// Errors raised while loading catalog documents.
#[derive(Debug, thiserror::Error)]
pub enum CatalogLoadError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("catalog parse error: {0}")]
    Parse(#[from] ron::error::SpannedError),
}

/// Item catalog structure for RON documents.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ItemCatalogFile {
    pub items: Vec<ItemDefinition>,
}

/// Enemy catalog structure for RON documents.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EnemyCatalogFile {
    pub enemies: Vec<EnemyTemplate>,
}

/// In-memory [`ItemOracle`].
#[derive(Debug, Clone, Default)]
pub struct StaticItemCatalog {
    items: HashMap<ItemId, ItemDefinition>,
}

impl StaticItemCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a catalog from definitions; later duplicates win.
    pub fn from_definitions(definitions: impl IntoIterator<Item = ItemDefinition>) -> Self {
        Self {
            items: definitions.into_iter().map(|def| (def.id, def)).collect(),
        }
    }

    /// Parses a catalog from RON text.
    pub fn from_ron_str(content: &str) -> Result<Self, CatalogLoadError> {
        let file: ItemCatalogFile = ron::from_str(content)?;
        Ok(Self::from_definitions(file.items))
    }

    /// Loads a catalog from a RON file.
    pub fn load(path: &Path) -> Result<Self, CatalogLoadError> {
        Self::from_ron_str(&std::fs::read_to_string(path)?)
    }

    /// Adds a definition (builder style).
    pub fn with_item(mut self, def: ItemDefinition) -> Self {
        self.items.insert(def.id, def);
        self
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

impl ItemOracle for StaticItemCatalog {
    fn definition(&self, id: ItemId) -> Option<ItemDefinition> {
        self.items.get(&id).cloned()
    }

    fn all_definitions(&self) -> Vec<ItemDefinition> {
        self.items.values().cloned().collect()
    }
}

/// In-memory [`EnemyOracle`].
#[derive(Debug, Clone, Default)]
pub struct StaticEnemyCatalog {
    enemies: HashMap<EnemyId, EnemyTemplate>,
}

impl StaticEnemyCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a catalog from templates; later duplicates win.
    pub fn from_templates(templates: impl IntoIterator<Item = EnemyTemplate>) -> Self {
        Self {
            enemies: templates.into_iter().map(|t| (t.id, t)).collect(),
        }
    }

    /// Parses a catalog from RON text.
    pub fn from_ron_str(content: &str) -> Result<Self, CatalogLoadError> {
        let file: EnemyCatalogFile = ron::from_str(content)?;
        Ok(Self::from_templates(file.enemies))
    }

    /// Loads a catalog from a RON file.
    pub fn load(path: &Path) -> Result<Self, CatalogLoadError> {
        Self::from_ron_str(&std::fs::read_to_string(path)?)
    }

    /// Adds a template (builder style).
    pub fn with_enemy(mut self, template: EnemyTemplate) -> Self {
        self.enemies.insert(template.id, template);
        self
    }
}

impl EnemyOracle for StaticEnemyCatalog {
    fn template(&self, id: EnemyId) -> Option<EnemyTemplate> {
        self.enemies.get(&id).cloned()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use arena_core::{ConsumableData, ConsumableEffect, ItemKind, LootTable, StatBlock};

    #[test]
    fn lookup_finds_inserted_items() {
        let catalog = StaticItemCatalog::new().with_item(ItemDefinition::new(
            ItemId(1),
            "Health Potion",
            ItemKind::Consumable(ConsumableData {
                effect: ConsumableEffect::RestoreHealth(20),
            }),
            5,
        ));

        let def = catalog.definition(ItemId(1)).unwrap();
        assert_eq!(def.name, "Health Potion");
        assert_eq!(def.heals(), Some(20));
        assert!(catalog.definition(ItemId(2)).is_none());
    }

    #[test]
    fn enemy_catalog_parses_ron() {
        let content = r#"(
            enemies: [
                (
                    id: (1),
                    name: "Giant Rat",
                    stats: (
                        hp: 20,
                        max_hp: 20,
                        physical_damage: 8,
                        magic_damage: 0,
                        defense: 3,
                        speed: 8,
                        evasion: 5,
                    ),
                    loot: (xp: 50, coins: 10),
                ),
            ],
        )"#;

        let catalog = StaticEnemyCatalog::from_ron_str(content).unwrap();
        let rat = catalog.template(EnemyId(1)).unwrap();
        assert_eq!(rat.stats, StatBlock::new(20, 8, 0, 3, 8, 5));
        assert_eq!(rat.loot, LootTable::new(50, 10));
    }
}
