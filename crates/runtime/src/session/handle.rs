//! Clonable façade for a running battle.

use tokio::sync::{broadcast, mpsc, oneshot};

use arena_core::{CombatAction, CombatState, Combatant, TurnReport};

use crate::error::{Result, RuntimeError};
use crate::events::CombatEvent;

use super::worker::Command;

/// Read-only view of one combatant for UI consumption.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CombatantView {
    pub name: String,
    pub hp: i32,
    pub max_hp: i32,
    pub mana: i32,
    pub potions: u16,
}

impl CombatantView {
    pub(crate) fn of(combatant: &Combatant) -> Self {
        Self {
            name: combatant.display_name.clone(),
            hp: combatant.stats.hp,
            max_hp: combatant.stats.max_hp,
            mana: combatant.mana.current,
            potions: combatant.potions,
        }
    }
}

/// Point-in-time view of a battle.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionSnapshot {
    pub state: CombatState,
    pub player: CombatantView,
    pub enemy: CombatantView,
    /// Battle log, newest entry first.
    pub log: Vec<String>,
}

/// Clonable handle to a battle worker.
///
/// All interaction with a running battle goes through a handle: submitting
/// the player's action, snapshotting state, subscribing to events. The
/// worker stops once every handle is dropped.
#[derive(Clone)]
pub struct SessionHandle {
    command_tx: mpsc::Sender<Command>,
    events: broadcast::Sender<CombatEvent>,
}

impl SessionHandle {
    pub(crate) fn new(
        command_tx: mpsc::Sender<Command>,
        events: broadcast::Sender<CombatEvent>,
    ) -> Self {
        Self { command_tx, events }
    }

    /// Submits the player's action for the current turn.
    ///
    /// Turn-protocol rejections (`NotYourTurn`, `SessionAlreadyFinished`)
    /// come back as [`RuntimeError::Session`] without having touched the
    /// battle.
    pub async fn submit(&self, action: CombatAction) -> Result<TurnReport> {
        let (reply, rx) = oneshot::channel();
        self.command_tx
            .send(Command::SubmitAction { action, reply })
            .await
            .map_err(|_| RuntimeError::SessionClosed)?;
        rx.await
            .map_err(|_| RuntimeError::SessionClosed)?
            .map_err(RuntimeError::Session)
    }

    /// Reads the current battle state.
    ///
    /// Served even while the enemy is thinking.
    pub async fn snapshot(&self) -> Result<SessionSnapshot> {
        let (reply, rx) = oneshot::channel();
        self.command_tx
            .send(Command::Snapshot { reply })
            .await
            .map_err(|_| RuntimeError::SessionClosed)?;
        rx.await.map_err(|_| RuntimeError::SessionClosed)
    }

    /// Subscribes to the battle's event stream.
    pub fn subscribe(&self) -> broadcast::Receiver<CombatEvent> {
        self.events.subscribe()
    }
}
