//! Action resolution: one submitted action in, one outcome out.

use serde::{Deserialize, Serialize};

use crate::combatant::Combatant;
use crate::config::CombatTuning;

use super::damage::{guarded, magic_strike, physical_strike};
use super::result::{ActionOutcome, OutcomeKind};

/// The closed set of submittable combat actions.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum CombatAction {
    /// Basic physical attack.
    QuickAttack,
    /// Committed physical attack.
    HeavyAttack,
    /// Raise a one-shot guard: the next incoming hit is halved.
    Block,
    /// Arm a one-shot evade: the next incoming hit rolls against evasion.
    Dodge,
    /// Drink a health potion.
    Heal,
    /// Cast the known spell at `spell` (index into the combatant's spell
    /// list, i.e. the spell-slot order).
    CastSpell { spell: usize },
}

/// Rolls drawn by the session for one resolution.
///
/// Both rolls are always drawn (and always consume the same points of the
/// seed stream) whether or not the action ends up using them; that keeps
/// replays identical regardless of guard/evade flags.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Rolls {
    /// Damage variance, drawn from the acting side's variance range.
    pub variation: i32,
    /// d100 roll checked against the defender's evasion when an evade is
    /// armed.
    pub evade: u32,
}

/// Why an action could not be resolved.
///
/// A rejected action mutates nothing; the turn is still the actor's.
#[derive(Clone, Copy, Debug, PartialEq, Eq, thiserror::Error)]
pub enum ActionError {
    #[error("not enough mana: need {required}, have {available}")]
    InsufficientMana { required: i32, available: i32 },

    #[error("no health potions left")]
    NoPotionsLeft,

    #[error("no spell is readied at slot {index}")]
    UnknownSpell { index: usize },
}

/// Result of a successful resolution: updated combatant values plus the
/// outcome record. The caller commits both or neither.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Resolution {
    pub actor: Combatant,
    pub target: Combatant,
    pub outcome: ActionOutcome,
    /// True if this action consumed a health potion.
    pub potion_used: bool,
}

/// Resolves `action` by `actor` against `target`.
///
/// Pure: inputs are borrowed, outputs are new values. Self-directed actions
/// (heal, block, dodge) leave `target` untouched.
pub fn resolve_action(
    action: CombatAction,
    actor: &Combatant,
    target: &Combatant,
    rolls: &Rolls,
    tuning: &CombatTuning,
) -> Result<Resolution, ActionError> {
    match action {
        CombatAction::QuickAttack => {
            let raw = physical_strike(actor.stats.physical_damage, target.stats.defense, rolls.variation);
            let verb = if actor.is_player_controlled {
                "strikes"
            } else {
                "attacks"
            };
            Ok(resolve_strike(actor, target, raw, verb, rolls, tuning))
        }
        CombatAction::HeavyAttack => {
            let raw = physical_strike(actor.stats.physical_damage, target.stats.defense, rolls.variation);
            Ok(resolve_strike(actor, target, raw, "smashes", rolls, tuning))
        }
        CombatAction::CastSpell { spell } => {
            let known = actor
                .spells
                .get(spell)
                .ok_or(ActionError::UnknownSpell { index: spell })?;
            if !actor.mana.can_spend(known.mana_cost) {
                return Err(ActionError::InsufficientMana {
                    required: known.mana_cost,
                    available: actor.mana.current,
                });
            }

            let raw = magic_strike(actor.stats.magic_damage, target.stats.defense, rolls.variation);
            let verb = format!("casts {} at", known.name);
            let cost = known.mana_cost;
            let mut resolution = resolve_strike(actor, target, raw, &verb, rolls, tuning);
            resolution.actor.mana = resolution.actor.mana.spent(cost);
            Ok(resolution)
        }
        CombatAction::Heal => {
            if actor.potions == 0 {
                return Err(ActionError::NoPotionsLeft);
            }
            let mut next = actor.clone();
            next.potions -= 1;
            let before = next.stats.hp;
            next.stats = next.stats.healed(tuning.heal_amount);
            let restored = next.stats.hp - before;

            Ok(Resolution {
                outcome: ActionOutcome {
                    kind: OutcomeKind::Healed,
                    final_damage: 0,
                    message: format!("{} drinks a potion and recovers {restored} hp.", next.display_name),
                    target_defeated: false,
                },
                actor: next,
                target: target.clone(),
                potion_used: true,
            })
        }
        CombatAction::Block => {
            let mut next = actor.clone();
            next.guard = true;
            Ok(Resolution {
                outcome: ActionOutcome {
                    kind: OutcomeKind::Braced,
                    final_damage: 0,
                    message: format!("{} braces behind a guard.", next.display_name),
                    target_defeated: false,
                },
                actor: next,
                target: target.clone(),
                potion_used: false,
            })
        }
        CombatAction::Dodge => {
            let mut next = actor.clone();
            next.evade = true;
            Ok(Resolution {
                outcome: ActionOutcome {
                    kind: OutcomeKind::Evading,
                    final_damage: 0,
                    message: format!("{} watches for an opening to dodge.", next.display_name),
                    target_defeated: false,
                },
                actor: next,
                target: target.clone(),
                potion_used: false,
            })
        }
    }
}

/// Runs a computed hit through the defender's one-shot flags and applies
/// the surviving damage.
///
/// Evade is checked before guard: a successful dodge negates the hit
/// entirely, so halving it would be meaningless. Both flags are consumed
/// by the incoming hit that triggers them.
fn resolve_strike(
    actor: &Combatant,
    target: &Combatant,
    raw_damage: i32,
    verb: &str,
    rolls: &Rolls,
    tuning: &CombatTuning,
) -> Resolution {
    let mut defender = target.clone();

    if defender.evade {
        defender.evade = false;
        if rolls.evade <= defender.stats.evasion as u32 {
            return Resolution {
                outcome: ActionOutcome {
                    kind: OutcomeKind::Dodged,
                    final_damage: 0,
                    message: format!(
                        "{} dodges! {}'s attack misses entirely.",
                        defender.display_name, actor.display_name
                    ),
                    target_defeated: false,
                },
                actor: actor.clone(),
                target: defender,
                potion_used: false,
            };
        }
    }

    let (final_damage, kind) = if defender.guard {
        defender.guard = false;
        (guarded(raw_damage, tuning.guard_divisor), OutcomeKind::GuardedHit)
    } else {
        (raw_damage, OutcomeKind::Damage)
    };

    defender.stats = defender.stats.damaged(final_damage);
    let target_defeated = defender.is_defeated();

    let message = match kind {
        OutcomeKind::GuardedHit => format!(
            "{} guards! {} {} {} for only {final_damage} damage.",
            defender.display_name, actor.display_name, verb, defender.display_name
        ),
        _ => format!(
            "{} {} {} for {final_damage} damage.",
            actor.display_name, verb, defender.display_name
        ),
    };

    Resolution {
        outcome: ActionOutcome {
            kind,
            final_damage,
            message,
            target_defeated,
        },
        actor: actor.clone(),
        target: defender,
        potion_used: false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::combatant::{CombatantId, KnownSpell, ResourceMeter};
    use crate::stats::StatBlock;

    fn combatant(id: CombatantId, name: &str, stats: StatBlock, player: bool) -> Combatant {
        Combatant {
            id,
            display_name: name.into(),
            stats,
            mana: ResourceMeter::full(50),
            potions: 1,
            spells: vec![KnownSpell {
                name: "Fireball".into(),
                mana_cost: 10,
            }],
            guard: false,
            evade: false,
            is_player_controlled: player,
        }
    }

    fn hero() -> Combatant {
        combatant(
            CombatantId::PLAYER,
            "Hero",
            StatBlock::new(100, 12, 9, 5, 10, 35),
            true,
        )
    }

    fn rat() -> Combatant {
        combatant(
            CombatantId::ENEMY,
            "Giant Rat",
            StatBlock::new(20, 8, 0, 3, 8, 0),
            false,
        )
    }

    fn no_rolls() -> Rolls {
        Rolls {
            variation: 0,
            evade: 100,
        }
    }

    #[test]
    fn quick_attack_matches_formula() {
        let res = resolve_action(
            CombatAction::QuickAttack,
            &hero(),
            &rat(),
            &no_rolls(),
            &CombatTuning::default(),
        )
        .unwrap();

        // 12 - 3/2 = 11
        assert_eq!(res.outcome.final_damage, 11);
        assert_eq!(res.outcome.kind, OutcomeKind::Damage);
        assert_eq!(res.target.stats.hp, 9);
        assert!(!res.outcome.target_defeated);
    }

    #[test]
    fn killing_blow_clamps_hp_and_reports_defeat() {
        let mut weakened = rat();
        weakened.stats.hp = 5;

        let res = resolve_action(
            CombatAction::QuickAttack,
            &hero(),
            &weakened,
            &no_rolls(),
            &CombatTuning::default(),
        )
        .unwrap();

        assert_eq!(res.target.stats.hp, 0);
        assert!(res.outcome.target_defeated);
    }

    #[test]
    fn spell_uses_magic_damage_and_spends_mana() {
        let res = resolve_action(
            CombatAction::CastSpell { spell: 0 },
            &hero(),
            &rat(),
            &no_rolls(),
            &CombatTuning::default(),
        )
        .unwrap();

        // 9 - 3/2 = 8
        assert_eq!(res.outcome.final_damage, 8);
        assert_eq!(res.actor.mana.current, 40);
        assert!(res.outcome.message.contains("Fireball"));
    }

    #[test]
    fn spell_without_mana_is_rejected() {
        let mut caster = hero();
        caster.mana = ResourceMeter::full(5);

        let err = resolve_action(
            CombatAction::CastSpell { spell: 0 },
            &caster,
            &rat(),
            &no_rolls(),
            &CombatTuning::default(),
        )
        .unwrap_err();

        assert_eq!(
            err,
            ActionError::InsufficientMana {
                required: 10,
                available: 5
            }
        );
    }

    #[test]
    fn unknown_spell_slot_is_rejected() {
        let err = resolve_action(
            CombatAction::CastSpell { spell: 3 },
            &hero(),
            &rat(),
            &no_rolls(),
            &CombatTuning::default(),
        )
        .unwrap_err();
        assert_eq!(err, ActionError::UnknownSpell { index: 3 });
    }

    #[test]
    fn guard_halves_the_next_hit_once() {
        let mut guarded_target = hero();
        guarded_target.guard = true;

        let res = resolve_action(
            CombatAction::QuickAttack,
            &rat(),
            &guarded_target,
            &no_rolls(),
            &CombatTuning::default(),
        )
        .unwrap();

        // 8 - 5/2 = 6, halved to 3.
        assert_eq!(res.outcome.final_damage, 3);
        assert_eq!(res.outcome.kind, OutcomeKind::GuardedHit);
        assert!(!res.target.guard, "guard is one-shot");
    }

    #[test]
    fn successful_dodge_deals_exactly_zero() {
        let mut evading = hero();
        evading.evade = true;

        let res = resolve_action(
            CombatAction::QuickAttack,
            &rat(),
            &evading,
            &Rolls {
                variation: 0,
                evade: 35, // == evasion, inclusive success
            },
            &CombatTuning::default(),
        )
        .unwrap();

        assert_eq!(res.outcome.kind, OutcomeKind::Dodged);
        assert_eq!(res.outcome.final_damage, 0);
        assert_eq!(res.target.stats.hp, evading.stats.hp);
        assert!(!res.target.evade, "evade is one-shot");
    }

    #[test]
    fn failed_dodge_still_consumes_the_flag() {
        let mut evading = hero();
        evading.evade = true;

        let res = resolve_action(
            CombatAction::QuickAttack,
            &rat(),
            &evading,
            &Rolls {
                variation: 0,
                evade: 36, // just above evasion
            },
            &CombatTuning::default(),
        )
        .unwrap();

        assert_eq!(res.outcome.kind, OutcomeKind::Damage);
        assert_eq!(res.outcome.final_damage, 6);
        assert!(!res.target.evade);
    }

    #[test]
    fn heal_is_fixed_and_clamped() {
        let mut wounded = hero();
        wounded.stats.hp = 90;

        let res = resolve_action(
            CombatAction::Heal,
            &wounded,
            &rat(),
            &no_rolls(),
            &CombatTuning::default(),
        )
        .unwrap();

        assert_eq!(res.actor.stats.hp, 100, "clamped to max_hp");
        assert_eq!(res.actor.potions, 0);
        assert!(res.potion_used);
        assert_eq!(res.target, rat(), "heal never touches the target");
    }

    #[test]
    fn heal_without_potions_is_rejected() {
        let mut dry = hero();
        dry.potions = 0;

        let err = resolve_action(
            CombatAction::Heal,
            &dry,
            &rat(),
            &no_rolls(),
            &CombatTuning::default(),
        )
        .unwrap_err();
        assert_eq!(err, ActionError::NoPotionsLeft);
    }
}
