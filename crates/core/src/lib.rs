//! Deterministic combat and equipment logic shared across clients.
//!
//! `arena-core` defines the canonical rules: the stat model, equipment
//! aggregation, action resolution, and the combat session state machine.
//! Everything here is synchronous, value-typed, and deterministic; the
//! runtime crate layers scheduling, events, and persistence on top.
pub mod catalog;
pub mod combat;
pub mod combatant;
pub mod config;
pub mod log;
pub mod reward;
pub mod session;
pub mod state;
pub mod stats;

pub use catalog::{
    CatalogError, ConsumableData, ConsumableEffect, EnemyId, EnemyOracle, EnemyTemplate, GearData,
    ItemDefinition, ItemId, ItemKind, ItemOracle, LootTable, PcgRng, RngOracle, SpellData,
    compute_seed,
};
pub use combat::{
    ActionError, ActionOutcome, CombatAction, OutcomeKind, Resolution, Rolls, resolve_action,
};
pub use combatant::{Combatant, CombatantId, KnownSpell, ResourceMeter};
pub use config::CombatTuning;
pub use log::BattleLog;
pub use reward::RewardGrant;
pub use session::{CombatSession, CombatState, SessionError, TurnReport};
pub use state::{
    EquipError, EquipPlan, EquipSlot, EquippedSet, InventorySlot, InventoryState, Op, OpError,
    PlayerId, PlayerState, SlotKind, plan_equip, plan_sell, plan_unequip,
};
pub use stats::{ItemModifier, StatBlock};
