//! Runtime orchestration for the combat and equipment core.
//!
//! This crate wires the pure [`arena_core`] logic into a running system:
//! battle workers with the enemy thinking delay, event broadcasting for
//! UI subscribers, the single-writer equipment service, persistence
//! repositories with atomic commits, and catalog implementations.
//!
//! Modules are organized by responsibility:
//! - [`session`] hosts the battle builder, worker, and handle
//! - [`equip`] is the only path that mutates equipment
//! - [`repository`] provides the atomic-commit persistence contract
//! - [`oracle`] supplies in-memory/RON catalog implementations
//! - [`events`] and [`feedback`] are the outbound surfaces
pub mod config;
pub mod equip;
pub mod error;
pub mod events;
pub mod feedback;
pub mod oracle;
pub mod repository;
pub mod session;

pub use config::RuntimeConfig;
pub use equip::EquipService;
pub use error::{Result, RuntimeError};
pub use events::{BattleOutcome, CombatEvent};
pub use feedback::{FeedbackSink, NoopFeedback};
pub use oracle::{CatalogLoadError, StaticEnemyCatalog, StaticItemCatalog};
pub use repository::{FilePlayerRepo, InMemoryPlayerRepo, PlayerRepository, RepositoryError};
pub use session::{
    ActiveSessions, Battle, BattleBuilder, CombatantView, SessionHandle, SessionSnapshot,
};
