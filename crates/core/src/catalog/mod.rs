//! Traits describing read-only collaborator data.
//!
//! The item and enemy catalogs are external collaborators: the core only
//! ever reads their definitions through oracle traits, so the engine stays
//! decoupled from however catalog data is stored or transported. The RNG
//! oracle lives here too because randomness is likewise injected, never
//! ambient.

mod enemies;
mod error;
mod items;
mod rng;

pub use enemies::{EnemyId, EnemyOracle, EnemyTemplate, LootTable};
pub use error::CatalogError;
pub use items::{
    ConsumableData, ConsumableEffect, GearData, ItemDefinition, ItemId, ItemKind, ItemOracle,
    SpellData,
};
pub use rng::{PcgRng, RngOracle, compute_seed};
