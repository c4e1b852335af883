//! Battle worker: owns the authoritative [`CombatSession`].
//!
//! Receives commands from [`SessionHandle`](super::SessionHandle), drives
//! the turn protocol, publishes [`CombatEvent`]s, and performs the terminal
//! commit. One worker per battle; the session has a single logical writer
//! by construction.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::{broadcast, mpsc, oneshot};
use tokio::time;
use tracing::{debug, warn};

use arena_core::{
    CombatAction, CombatSession, CombatState, Op, PlayerId, SessionError, TurnReport,
};

use crate::events::{BattleOutcome, CombatEvent};
use crate::feedback::FeedbackSink;
use crate::repository::PlayerRepository;

use super::handle::{CombatantView, SessionSnapshot};
use super::registry::SessionGuard;

/// Commands the handle sends to the worker.
pub(crate) enum Command {
    SubmitAction {
        action: CombatAction,
        reply: oneshot::Sender<Result<TurnReport, SessionError>>,
    },
    Snapshot {
        reply: oneshot::Sender<SessionSnapshot>,
    },
}

/// Background task that processes one battle.
pub(crate) struct SessionWorker {
    session: CombatSession,
    command_rx: mpsc::Receiver<Command>,
    events: broadcast::Sender<CombatEvent>,
    think_delay: Duration,
    repository: Option<Arc<dyn PlayerRepository>>,
    player_id: PlayerId,
    /// Healing-consumable stacks the player brought in, in bag order; the
    /// terminal commit decrements these for potions drunk.
    potion_stacks: Vec<(arena_core::ItemId, u16)>,
    feedback: Arc<dyn FeedbackSink>,
    /// Registry slot, released when the battle is decided or torn down.
    guard: Option<SessionGuard>,
    committed: bool,
}

impl SessionWorker {
    #[allow(clippy::too_many_arguments)]
    pub(crate) fn new(
        session: CombatSession,
        command_rx: mpsc::Receiver<Command>,
        events: broadcast::Sender<CombatEvent>,
        think_delay: Duration,
        repository: Option<Arc<dyn PlayerRepository>>,
        player_id: PlayerId,
        potion_stacks: Vec<(arena_core::ItemId, u16)>,
        feedback: Arc<dyn FeedbackSink>,
        guard: SessionGuard,
    ) -> Self {
        Self {
            session,
            command_rx,
            events,
            think_delay,
            repository,
            player_id,
            potion_stacks,
            feedback,
            guard: Some(guard),
            committed: false,
        }
    }

    /// Main worker loop. Runs until every handle is dropped.
    pub(crate) async fn run(mut self) {
        debug!(player = %self.player_id, "battle worker started");

        loop {
            if self.session.state() == CombatState::EnemyTurn {
                if !self.enemy_turn().await {
                    break;
                }
            } else {
                // PlayerTurn or terminal: wait for commands. A finished
                // session keeps serving snapshots and rejecting actions
                // until the last handle drops.
                match self.command_rx.recv().await {
                    Some(cmd) => self.handle_command(cmd).await,
                    None => break,
                }
            }
        }

        debug!(player = %self.player_id, "battle worker stopped");
    }

    /// Waits out the thinking delay, then resolves the enemy action.
    ///
    /// Commands arriving during the delay are answered without touching the
    /// session (`NotYourTurn` for submissions, live data for snapshots).
    /// If the last handle drops while the delay pends, the AI action is
    /// cancelled before it mutates anything: the session simply ceases to
    /// exist with the enemy still "thinking".
    ///
    /// Returns `false` when the worker should stop.
    async fn enemy_turn(&mut self) -> bool {
        let think = time::sleep(self.think_delay);
        tokio::pin!(think);

        loop {
            tokio::select! {
                _ = &mut think => break,
                cmd = self.command_rx.recv() => match cmd {
                    Some(Command::SubmitAction { reply, .. }) => {
                        let _ = reply.send(Err(SessionError::NotYourTurn));
                    }
                    Some(Command::Snapshot { reply }) => {
                        let _ = reply.send(self.snapshot());
                    }
                    None => return false,
                },
            }
        }

        let report = self
            .session
            .resolve_enemy_action()
            .expect("state was checked: enemy turn is pending");
        self.apply_report(&report).await;
        true
    }

    async fn handle_command(&mut self, cmd: Command) {
        match cmd {
            Command::SubmitAction { action, reply } => {
                let result = self.session.submit_player_action(action);
                if let Ok(report) = &result {
                    let report = report.clone();
                    self.apply_report(&report).await;
                }
                // Replying after the side effects: a successful submit
                // implies events are published and terminal state durable.
                let _ = reply.send(result);
            }
            Command::Snapshot { reply } => {
                let _ = reply.send(self.snapshot());
            }
        }
    }

    /// Publishes events and feedback for an accepted transition, and runs
    /// the terminal commit when the battle just ended.
    async fn apply_report(&mut self, report: &TurnReport) {
        use arena_core::OutcomeKind;

        match report.outcome.kind {
            OutcomeKind::Damage | OutcomeKind::GuardedHit => {
                self.feedback.on_hit(report.outcome.final_damage);
            }
            OutcomeKind::Healed => self.feedback.on_heal(),
            OutcomeKind::Dodged | OutcomeKind::Braced | OutcomeKind::Evading => {}
        }

        let outcome = match report.state {
            CombatState::Victory => Some(BattleOutcome::Victory),
            CombatState::Defeat => Some(BattleOutcome::Defeat),
            _ => None,
        };
        // Victory arms the reward exactly once; it rides the terminal event
        // out to the progression collaborator and feeds the commit below.
        let reward = if report.state == CombatState::Victory {
            self.session.take_reward()
        } else {
            None
        };

        let player = self.session.player();
        let enemy = self.session.enemy();
        let last = report.entries.len().saturating_sub(1);
        for (i, entry) in report.entries.iter().enumerate() {
            let event = CombatEvent {
                state: report.state,
                message: entry.clone(),
                player_hp: (player.stats.hp, player.stats.max_hp),
                enemy_hp: (enemy.stats.hp, enemy.stats.max_hp),
                outcome: if i == last { outcome } else { None },
                reward: if i == last { reward } else { None },
            };
            // Best-effort: a send error just means nobody is subscribed.
            let _ = self.events.send(event);
        }

        if let Some(outcome) = outcome {
            match outcome {
                BattleOutcome::Victory => self.feedback.on_victory(),
                BattleOutcome::Defeat => self.feedback.on_defeat(),
            }
            self.finish(reward).await;
        }
    }

    /// Terminal commit: rewards (victory only) and potion consumption, as
    /// one atomic batch, exactly once. Session hp is never written back.
    async fn finish(&mut self, reward: Option<arena_core::RewardGrant>) {
        if self.committed {
            return;
        }
        self.committed = true;

        // The battle is decided; the player may equip again.
        self.guard.take();

        let mut ops: Vec<Op> = Vec::new();
        if let Some(reward) = reward {
            debug!(player = %self.player_id, xp = reward.xp, coins = reward.coins, "granting victory reward");
            ops.extend(reward.ops());
        }

        let mut remaining = self.session.potions_used();
        for (item, quantity) in &self.potion_stacks {
            if remaining == 0 {
                break;
            }
            let used = remaining.min(*quantity);
            ops.push(Op::AdjustInventory {
                item: *item,
                delta: -(used as i32),
            });
            remaining -= used;
        }

        if ops.is_empty() {
            return;
        }
        let Some(repository) = &self.repository else {
            return;
        };

        if let Err(error) = repository.commit_atomic(self.player_id, &ops).await {
            // The in-memory session is already terminal either way; the
            // caller sees the failure through the repository's own state
            // and can re-drive the commit with tooling.
            warn!(player = %self.player_id, %error, "terminal commit failed");
        }
    }

    fn snapshot(&self) -> SessionSnapshot {
        let player = self.session.player();
        let enemy = self.session.enemy();
        SessionSnapshot {
            state: self.session.state(),
            player: CombatantView::of(player),
            enemy: CombatantView::of(enemy),
            log: self
                .session
                .log()
                .newest_first()
                .map(str::to_owned)
                .collect(),
        }
    }
}
