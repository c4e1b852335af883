//! Combat action resolution.
//!
//! This module provides pure functions for resolving combat actions. All
//! resolution is deterministic and side-effect free: rolls are drawn by the
//! caller (the session) from the deterministic RNG stream and passed in,
//! and resolution returns new combatant values rather than mutating in
//! place.
//!
//! # Core pieces
//!
//! - [`CombatAction`]: the closed set of submittable actions
//! - `resolve_action`: complete resolution of one action
//! - `damage`: the two damage formula families

pub mod damage;
mod resolve;
mod result;

pub use resolve::{ActionError, CombatAction, Resolution, Rolls, resolve_action};
pub use result::{ActionOutcome, OutcomeKind};
