//! Battle orchestration: builder, worker, and handle.
//!
//! [`Battle`] wires a core [`CombatSession`] to a background worker task
//! with a command channel and an event broadcast, mirroring how the rest
//! of the runtime exposes long-lived state behind clonable handles. The
//! enemy's thinking delay lives here, in the concurrency layer, as an
//! explicitly cancellable timed task.

mod handle;
mod registry;
mod worker;

pub use handle::{CombatantView, SessionHandle, SessionSnapshot};
pub use registry::ActiveSessions;

use std::sync::Arc;

use tokio::sync::{broadcast, mpsc};
use tokio::task::JoinHandle;

use arena_core::{
    CombatSession, Combatant, EnemyTemplate, EquipError, ItemId, ItemOracle, PlayerId, PlayerState,
};

use crate::config::RuntimeConfig;
use crate::error::{Result, RuntimeError};
use crate::events::CombatEvent;
use crate::feedback::{FeedbackSink, NoopFeedback};
use crate::repository::PlayerRepository;

use worker::SessionWorker;

/// A running battle: the worker task plus the primary handle.
pub struct Battle {
    handle: SessionHandle,
    worker: JoinHandle<()>,
}

impl Battle {
    /// Starts configuring a battle.
    pub fn builder() -> BattleBuilder {
        BattleBuilder::new()
    }

    /// A clonable handle to this battle.
    pub fn handle(&self) -> SessionHandle {
        self.handle.clone()
    }

    /// Subscribes to this battle's event stream.
    pub fn subscribe_events(&self) -> broadcast::Receiver<CombatEvent> {
        self.handle.subscribe()
    }

    /// Tears the battle down and waits for the worker to stop.
    ///
    /// If the enemy's thinking delay is pending, the AI action is cancelled
    /// before it mutates anything. Handles cloned from this battle keep the
    /// worker alive until they too are dropped.
    pub async fn shutdown(self) -> Result<()> {
        drop(self.handle);
        self.worker.await?;
        Ok(())
    }
}

/// Builder for [`Battle`] with flexible configuration.
pub struct BattleBuilder {
    config: RuntimeConfig,
    seed: Option<u64>,
    repository: Option<Arc<dyn PlayerRepository>>,
    feedback: Arc<dyn FeedbackSink>,
    sessions: ActiveSessions,
}

impl BattleBuilder {
    fn new() -> Self {
        Self {
            config: RuntimeConfig::default(),
            seed: None,
            repository: None,
            feedback: Arc::new(NoopFeedback),
            sessions: ActiveSessions::new(),
        }
    }

    /// Overrides the runtime configuration.
    pub fn config(mut self, config: RuntimeConfig) -> Self {
        self.config = config;
        self
    }

    /// Pins the session seed (replay/tests). Defaults to a random seed.
    pub fn seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Attaches the persistence collaborator for the terminal commit.
    ///
    /// Without a repository the battle still runs; the reward is only
    /// reported on the terminal event, nothing is persisted.
    pub fn repository(mut self, repository: Arc<dyn PlayerRepository>) -> Self {
        self.repository = Some(repository);
        self
    }

    /// Attaches a feedback sink (haptics/sound). Defaults to a no-op.
    pub fn feedback(mut self, feedback: Arc<dyn FeedbackSink>) -> Self {
        self.feedback = feedback;
        self
    }

    /// Shares an active-session registry with the equipment service.
    pub fn sessions(mut self, sessions: ActiveSessions) -> Self {
        self.sessions = sessions;
        self
    }

    /// Builds the combatants and spawns the battle worker.
    ///
    /// Fails with [`EquipError::CombatInProgress`] if the player already
    /// has a live battle in the shared registry. Must run inside a tokio
    /// runtime.
    pub fn begin(
        self,
        player_id: PlayerId,
        player_name: &str,
        player: &PlayerState,
        enemy: &EnemyTemplate,
        items: &dyn ItemOracle,
    ) -> Result<Battle> {
        let guard = self
            .sessions
            .begin(player_id)
            .ok_or(RuntimeError::Equip(EquipError::CombatInProgress))?;

        let hero = Combatant::from_player(player_name, player, items, &self.config.tuning)?;
        let foe = Combatant::from_enemy(enemy, &self.config.tuning);
        let potion_stacks = potion_stacks(player, items)?;

        let seed = self.seed.unwrap_or_else(rand::random);
        let session = CombatSession::new(hero, foe, enemy.loot, seed)
            .with_tuning(self.config.tuning);

        let (command_tx, command_rx) = mpsc::channel(self.config.command_buffer_size);
        let (events, _) = broadcast::channel(self.config.event_buffer_size);

        let worker = SessionWorker::new(
            session,
            command_rx,
            events.clone(),
            self.config.think_delay,
            self.repository,
            player_id,
            potion_stacks,
            self.feedback,
            guard,
        );

        tracing::info!(player = %player_id, enemy = %enemy.name, seed, "battle started");

        Ok(Battle {
            handle: SessionHandle::new(command_tx, events),
            worker: tokio::spawn(worker.run()),
        })
    }
}

/// Healing-consumable stacks in bag order, for the terminal potion commit.
fn potion_stacks(
    player: &PlayerState,
    items: &dyn ItemOracle,
) -> Result<Vec<(ItemId, u16)>> {
    let mut stacks = Vec::new();
    for slot in player.inventory.iter() {
        let def = items
            .definition(slot.item)
            .ok_or(arena_core::CatalogError::ItemNotFound(slot.item))?;
        if def.heals().is_some() {
            stacks.push((slot.item, slot.quantity));
        }
    }
    Ok(stacks)
}
