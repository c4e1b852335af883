//! The combat session state machine.
//!
//! [`CombatSession`] is the authoritative reducer for one battle: it owns
//! both combatants exclusively, enforces the turn protocol, routes actions
//! through the resolver, narrates every transition into the battle log,
//! and decides termination. It is synchronous and pure over its own state;
//! the hosting runtime supplies the enemy "thinking" delay and calls
//! [`CombatSession::resolve_enemy_action`] when it elapses.

use serde::{Deserialize, Serialize};

use crate::catalog::{LootTable, PcgRng, RngOracle, compute_seed};
use crate::combat::{ActionError, ActionOutcome, CombatAction, Rolls, resolve_action};
use crate::combatant::{Combatant, CombatantId};
use crate::config::CombatTuning;
use crate::log::BattleLog;
use crate::reward::RewardGrant;

/// Roll-context discriminators for the per-roll seed stream.
const CTX_VARIANCE: u32 = 0;
const CTX_EVADE: u32 = 1;

/// Where a session stands in the turn protocol.
///
/// Construction lands directly in `PlayerTurn`; `Victory` and `Defeat` are
/// terminal.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CombatState {
    PlayerTurn,
    EnemyTurn,
    Victory,
    Defeat,
}

impl CombatState {
    /// True once the battle is decided.
    pub fn is_terminal(&self) -> bool {
        matches!(self, CombatState::Victory | CombatState::Defeat)
    }
}

/// Why a submission was rejected.
///
/// Rejections never mutate the session: the state, both combatants, and
/// the log all stay exactly as they were.
#[derive(Clone, Copy, Debug, PartialEq, Eq, thiserror::Error)]
pub enum SessionError {
    #[error("it is not this side's turn to act")]
    NotYourTurn,

    #[error("the battle is already over")]
    SessionAlreadyFinished,

    #[error(transparent)]
    Action(#[from] ActionError),
}

/// What one accepted action did to the session.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TurnReport {
    /// The resolver's outcome for the action itself.
    pub outcome: ActionOutcome,
    /// State after the transition.
    pub state: CombatState,
    /// Log entries appended by this transition, oldest first (the action
    /// entry, plus a terminal entry when hp exhaustion decided the battle).
    pub entries: Vec<String>,
}

/// One battle between the player and an enemy.
///
/// Owns both combatants for its whole lifetime; nothing else may mutate
/// them while the session lives. Randomness comes from an injected
/// [`RngOracle`] seeded once at construction, so a fixed seed replays the
/// identical battle.
pub struct CombatSession {
    player: Combatant,
    enemy: Combatant,
    state: CombatState,
    log: BattleLog,
    loot: LootTable,
    tuning: CombatTuning,
    rng: Box<dyn RngOracle>,
    seed: u64,
    /// Count of resolved actions; advances the per-roll seed stream.
    nonce: u64,
    /// Armed by the Victory transition, consumed by `take_reward`.
    reward: Option<RewardGrant>,
    potions_used: u16,
}

impl CombatSession {
    /// Opens a battle. The session starts in `PlayerTurn` immediately;
    /// there is no separate "ready" step once the object exists.
    pub fn new(player: Combatant, enemy: Combatant, loot: LootTable, seed: u64) -> Self {
        debug_assert!(player.is_player_controlled && !enemy.is_player_controlled);

        let mut log = BattleLog::new();
        log.push(format!(
            "{} faces {}. Battle begins!",
            player.display_name, enemy.display_name
        ));

        Self {
            player,
            enemy,
            state: CombatState::PlayerTurn,
            log,
            loot,
            tuning: CombatTuning::default(),
            rng: Box::new(PcgRng),
            seed,
            nonce: 0,
            reward: None,
            potions_used: 0,
        }
    }

    /// Replaces the balance tuning (builder style).
    pub fn with_tuning(mut self, tuning: CombatTuning) -> Self {
        self.tuning = tuning;
        self
    }

    /// Replaces the RNG oracle (builder style); tests inject fixed rolls.
    pub fn with_rng(mut self, rng: Box<dyn RngOracle>) -> Self {
        self.rng = rng;
        self
    }

    pub fn state(&self) -> CombatState {
        self.state
    }

    pub fn player(&self) -> &Combatant {
        &self.player
    }

    pub fn enemy(&self) -> &Combatant {
        &self.enemy
    }

    pub fn log(&self) -> &BattleLog {
        &self.log
    }

    /// Health potions drunk so far this session.
    pub fn potions_used(&self) -> u16 {
        self.potions_used
    }

    /// True once the battle is decided.
    pub fn is_finished(&self) -> bool {
        self.state.is_terminal()
    }

    /// Submits the player's action for the current turn.
    ///
    /// Exactly one action is accepted per `PlayerTurn`. Submitting during
    /// `EnemyTurn` answers `NotYourTurn`; submitting after the battle ended
    /// answers `SessionAlreadyFinished`. Either way nothing is mutated.
    pub fn submit_player_action(&mut self, action: CombatAction) -> Result<TurnReport, SessionError> {
        match self.state {
            CombatState::PlayerTurn => {}
            CombatState::EnemyTurn => return Err(SessionError::NotYourTurn),
            CombatState::Victory | CombatState::Defeat => {
                return Err(SessionError::SessionAlreadyFinished);
            }
        }

        let rolls = self.draw_rolls(CombatantId::PLAYER);
        let resolution = resolve_action(action, &self.player, &self.enemy, &rolls, &self.tuning)?;

        // Committed only now: a resolver rejection above left no trace.
        self.nonce += 1;
        self.player = resolution.actor;
        self.enemy = resolution.target;
        if resolution.potion_used {
            self.potions_used += 1;
        }

        let mut entries = vec![resolution.outcome.message.clone()];
        self.log.push(resolution.outcome.message.clone());

        if self.enemy.is_defeated() {
            self.state = CombatState::Victory;
            self.reward = Some(RewardGrant::from_loot(&self.loot));
            let finale = format!("{} is defeated. Victory!", self.enemy.display_name);
            self.log.push(finale.clone());
            entries.push(finale);
        } else {
            self.state = CombatState::EnemyTurn;
        }

        Ok(TurnReport {
            outcome: resolution.outcome,
            state: self.state,
            entries,
        })
    }

    /// Resolves the enemy's turn.
    ///
    /// The hosting runtime calls this after the thinking delay elapses. The
    /// AI is deterministic in the current scope: it always attacks with its
    /// base stats.
    pub fn resolve_enemy_action(&mut self) -> Result<TurnReport, SessionError> {
        match self.state {
            CombatState::EnemyTurn => {}
            CombatState::PlayerTurn => return Err(SessionError::NotYourTurn),
            CombatState::Victory | CombatState::Defeat => {
                return Err(SessionError::SessionAlreadyFinished);
            }
        }

        let rolls = self.draw_rolls(CombatantId::ENEMY);
        let resolution = resolve_action(
            CombatAction::QuickAttack,
            &self.enemy,
            &self.player,
            &rolls,
            &self.tuning,
        )
        .expect("the basic attack needs no resources");

        self.nonce += 1;
        self.enemy = resolution.actor;
        self.player = resolution.target;

        let mut entries = vec![resolution.outcome.message.clone()];
        self.log.push(resolution.outcome.message.clone());

        if self.player.is_defeated() {
            self.state = CombatState::Defeat;
            let finale = format!("{} falls. Defeat...", self.player.display_name);
            self.log.push(finale.clone());
            entries.push(finale);
        } else {
            self.state = CombatState::PlayerTurn;
        }

        Ok(TurnReport {
            outcome: resolution.outcome,
            state: self.state,
            entries,
        })
    }

    /// Hands out the victory reward, exactly once.
    ///
    /// Returns `Some` on the first call after the Victory transition and
    /// `None` forever after (and always `None` without a victory), so
    /// re-reading a finished session can never re-grant loot.
    pub fn take_reward(&mut self) -> Option<RewardGrant> {
        self.reward.take()
    }

    fn draw_rolls(&self, actor: CombatantId) -> Rolls {
        let (lo, hi) = if actor == CombatantId::PLAYER {
            self.tuning.player_variance
        } else {
            self.tuning.enemy_variance
        };

        let variance_seed = compute_seed(self.seed, self.nonce, actor.0, CTX_VARIANCE);
        let evade_seed = compute_seed(self.seed, self.nonce, actor.0, CTX_EVADE);

        Rolls {
            variation: self.rng.variance(variance_seed, lo, hi),
            evade: self.rng.roll_d100(evade_seed),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::EnemyId;
    use crate::combatant::ResourceMeter;
    use crate::stats::StatBlock;

    fn hero() -> Combatant {
        Combatant {
            id: CombatantId::PLAYER,
            display_name: "Hero".into(),
            stats: StatBlock::new(100, 12, 0, 5, 10, 0),
            mana: ResourceMeter::full(50),
            potions: 1,
            spells: Vec::new(),
            guard: false,
            evade: false,
            is_player_controlled: true,
        }
    }

    fn rat() -> Combatant {
        Combatant::from_enemy(
            &crate::catalog::EnemyTemplate::new(
                EnemyId(1),
                "Giant Rat",
                StatBlock::new(20, 8, 0, 3, 8, 0),
                LootTable::new(50, 10),
            ),
            &CombatTuning::default(),
        )
    }

    fn session() -> CombatSession {
        CombatSession::new(hero(), rat(), LootTable::new(50, 10), 7)
            .with_tuning(CombatTuning::without_variance())
    }

    #[test]
    fn opening_entry_is_logged() {
        let session = session();
        assert_eq!(session.state(), CombatState::PlayerTurn);
        assert_eq!(session.log().len(), 1);
        assert!(session.log().latest().unwrap().contains("Battle begins"));
    }

    #[test]
    fn worked_example_plays_out_exactly() {
        // Player 12 phys / 5 def / 100 hp vs enemy 8 phys / 3 def / 20 hp,
        // all variance pinned to zero.
        let mut session = session();

        // Quick attack: 12 - 3/2 = 11. Enemy at 9.
        let report = session.submit_player_action(CombatAction::QuickAttack).unwrap();
        assert_eq!(report.outcome.final_damage, 11);
        assert_eq!(session.enemy().stats.hp, 9);
        assert_eq!(report.state, CombatState::EnemyTurn);

        // Enemy answer: 8 - 5/2 = 6. Player at 94.
        let report = session.resolve_enemy_action().unwrap();
        assert_eq!(report.outcome.final_damage, 6);
        assert_eq!(session.player().stats.hp, 94);
        assert_eq!(report.state, CombatState::PlayerTurn);

        // Second quick attack: 9 - 11 clamps to 0. Victory.
        let report = session.submit_player_action(CombatAction::QuickAttack).unwrap();
        assert!(report.outcome.target_defeated);
        assert_eq!(session.enemy().stats.hp, 0);
        assert_eq!(report.state, CombatState::Victory);
        assert_eq!(report.entries.len(), 2, "action entry plus victory entry");

        // Loot is handed out exactly once.
        assert_eq!(session.take_reward(), Some(RewardGrant { xp: 50, coins: 10 }));
        assert_eq!(session.take_reward(), None);
    }

    #[test]
    fn submitting_out_of_turn_mutates_nothing() {
        let mut session = session();
        session.submit_player_action(CombatAction::QuickAttack).unwrap();
        assert_eq!(session.state(), CombatState::EnemyTurn);

        let player_before = session.player().clone();
        let enemy_before = session.enemy().clone();
        let log_before = session.log().len();

        let err = session.submit_player_action(CombatAction::QuickAttack).unwrap_err();
        assert_eq!(err, SessionError::NotYourTurn);
        assert_eq!(session.player(), &player_before);
        assert_eq!(session.enemy(), &enemy_before);
        assert_eq!(session.log().len(), log_before);
    }

    #[test]
    fn finished_session_rejects_everything() {
        let mut session = session();
        session.submit_player_action(CombatAction::QuickAttack).unwrap();
        session.resolve_enemy_action().unwrap();
        session.submit_player_action(CombatAction::QuickAttack).unwrap();
        assert!(session.is_finished());

        assert_eq!(
            session.submit_player_action(CombatAction::QuickAttack),
            Err(SessionError::SessionAlreadyFinished)
        );
        assert_eq!(
            session.resolve_enemy_action().unwrap_err(),
            SessionError::SessionAlreadyFinished
        );
    }

    #[test]
    fn enemy_turn_is_not_player_submittable() {
        let mut session = session();
        assert_eq!(
            session.resolve_enemy_action().unwrap_err(),
            SessionError::NotYourTurn
        );
    }

    #[test]
    fn rejected_action_keeps_the_turn() {
        let mut session = session();
        // No spells readied: the cast is rejected and it is still the
        // player's turn.
        let err = session
            .submit_player_action(CombatAction::CastSpell { spell: 0 })
            .unwrap_err();
        assert!(matches!(err, SessionError::Action(ActionError::UnknownSpell { .. })));
        assert_eq!(session.state(), CombatState::PlayerTurn);
        assert_eq!(session.log().len(), 1);
    }

    #[test]
    fn defeat_is_reached_and_terminal() {
        let mut session = CombatSession::new(
            Combatant {
                stats: StatBlock::new(10, 1, 0, 0, 10, 0),
                ..hero()
            },
            Combatant {
                stats: StatBlock::new(1000, 30, 0, 100, 8, 0),
                ..rat()
            },
            LootTable::default(),
            7,
        )
        .with_tuning(CombatTuning::without_variance());

        session.submit_player_action(CombatAction::QuickAttack).unwrap();
        let report = session.resolve_enemy_action().unwrap();
        assert_eq!(report.state, CombatState::Defeat);
        assert_eq!(session.player().stats.hp, 0);
        assert_eq!(session.take_reward(), None, "no loot for a defeat");
    }

    #[test]
    fn potion_use_is_counted() {
        let mut session = session();
        session.submit_player_action(CombatAction::Heal).unwrap();
        assert_eq!(session.potions_used(), 1);
    }

    /// RNG stub whose every draw comes from a constant word.
    struct FixedRng(u32);

    impl crate::catalog::RngOracle for FixedRng {
        fn next_u32(&self, _seed: u64) -> u32 {
            self.0
        }
    }

    #[test]
    fn armed_dodge_negates_the_enemy_hit() {
        let mut nimble = hero();
        nimble.stats.evasion = 50;

        // next_u32 = 0 pins the d100 roll at 1, under any evasion.
        let mut session = CombatSession::new(nimble, rat(), LootTable::new(50, 10), 7)
            .with_tuning(CombatTuning::without_variance())
            .with_rng(Box::new(FixedRng(0)));

        session.submit_player_action(CombatAction::Dodge).unwrap();
        let hp_before = session.player().stats.hp;
        let report = session.resolve_enemy_action().unwrap();

        assert_eq!(report.outcome.kind, crate::combat::OutcomeKind::Dodged);
        assert_eq!(report.outcome.final_damage, 0);
        assert_eq!(session.player().stats.hp, hp_before);
        assert!(
            session.log().latest().unwrap().contains("dodges"),
            "a dodge must be distinguishable from a floored hit in the log"
        );
    }
}
