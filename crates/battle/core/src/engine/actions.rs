//! Action resolution: attacks, spells, breath and extra actions.

use tracing::trace;

use crate::combat::{
    CombatView, Combatant, DamageOutcome, Interrupt, Mitigation, SpellCast, Strike,
    breath_damage, heal_amount, hit_count, magical_damage, physical_damage, roll_hit,
    roll_interrupt,
};
use crate::config::CombatRules;
use crate::env::{SpellKind, SpellSchool};
use crate::log::{ActionKind, BattleLogEntry, EffectFlags, EffectKind, TargetEffect};
use crate::random::{RandomSource, percent_chance};
use crate::skill::SpecialAttack;
use crate::state::{Actor, DamageType, SpellId, StatusId};
use crate::status;

use super::selection::{ActionChoice, PlannedAction, SkipReason};
use super::{BattleEngine, BattleError, pair_mut};

/// One kind of damaging blow.
#[derive(Clone, Copy, Debug)]
pub(super) enum Blow {
    Physical(Strike),
    Magical(SpellCast),
    Breath,
}

/// A blow that connected.
#[derive(Clone, Copy, Debug)]
pub(super) struct Landed {
    pub outcome: DamageOutcome,
    pub effect: TargetEffect,
    pub defeated: bool,
}

/// Who was hurt by an action, for reactions and revival.
#[derive(Clone, Debug, Default)]
pub(super) struct ActionReport {
    /// Damaged defenders in first-hit order, with the damage type.
    pub damaged: Vec<(usize, DamageType)>,
    pub defeated: Vec<usize>,
}

impl ActionReport {
    pub fn record(&mut self, target: usize, landed: &Landed) {
        if landed.outcome.amount > 0 && !self.damaged.iter().any(|&(t, _)| t == target) {
            self.damaged.push((target, landed.outcome.damage_type));
        }
        if landed.defeated && !self.defeated.contains(&target) {
            self.defeated.push(target);
        }
    }
}

impl<'a, R: RandomSource> BattleEngine<'a, R> {
    /// Executes the turn's plan in initiative order.
    ///
    /// Actors that are no longer alive when their slot comes up are skipped,
    /// and an actor incapacitated since selection loses its planned action.
    /// Termination is checked after each actor's full sequence.
    pub(super) fn resolve_actions(&mut self) -> Result<(), BattleError> {
        let plan = std::mem::take(&mut self.plan);
        for PlannedAction { actor, mut choice } in plan {
            if !self.actors[actor].is_alive() {
                continue;
            }
            if !matches!(choice, ActionChoice::Skip(_))
                && status::is_incapacitated(&self.env, &self.actors[actor])?
            {
                choice = ActionChoice::Skip(SkipReason::Incapacitated);
            }
            self.necromancer_cadence(actor);
            self.perform(actor, choice)?;
            self.extra_actions(actor)?;
            if self.evaluate_outcome().is_some() {
                break;
            }
        }
        Ok(())
    }

    /// Performs one selected action and settles its consequences.
    pub(super) fn perform(&mut self, index: usize, choice: ActionChoice) -> Result<(), BattleError> {
        let report = match choice {
            ActionChoice::Skip(reason) => {
                let reason: &'static str = reason.into();
                self.log.push(
                    BattleLogEntry::action(self.turn, self.actors[index].id, ActionKind::ActionSkipped)
                        .with_meta("reason", reason),
                );
                return Ok(());
            }
            ActionChoice::Defend => {
                self.log.push(BattleLogEntry::action(
                    self.turn,
                    self.actors[index].id,
                    ActionKind::Defend,
                ));
                return Ok(());
            }
            ActionChoice::Attack { forced_target } => self.attack_action(index, forced_target)?,
            ActionChoice::Spell(spell) => self.cast_spell(index, spell)?,
            ActionChoice::Breath => self.breath_attack(index)?,
        };

        self.process_defeats(&report.defeated);
        self.damage_reactions(index, &report.damaged)?;
        self.ally_defeated_reactions(index, &report.defeated)?;
        Ok(())
    }

    /// Rolls the actor's extra actions after its base action.
    ///
    /// Each granted action is a fresh selection and resolution. The per-turn
    /// total is capped by `max_extra_actions`, and extra actions never grant
    /// more extra actions.
    fn extra_actions(&mut self, index: usize) -> Result<(), BattleError> {
        let extras = self.actors[index].effects.combat.extra_actions.clone();
        for extra in extras {
            let used = self.actors[index].counters.extra_actions_this_turn;
            let remaining = self.config.max_extra_actions.saturating_sub(used);
            if remaining == 0 || !self.actors[index].is_alive() || self.evaluate_outcome().is_some()
            {
                break;
            }
            if !percent_chance(&mut self.rng, extra.chance) {
                continue;
            }

            for _ in 0..extra.count.min(remaining) {
                if !self.actors[index].is_alive() || self.evaluate_outcome().is_some() {
                    return Ok(());
                }
                self.actors[index].counters.extra_actions_this_turn += 1;
                self.log.push(
                    BattleLogEntry::action(self.turn, self.actors[index].id, ActionKind::ExtraAction)
                        .with_meta("count", self.actors[index].counters.extra_actions_this_turn),
                );
                let choice = self.select_for(index)?;
                self.perform(index, choice)?;
            }
        }
        Ok(())
    }

    // ========================================================================
    // Physical
    // ========================================================================

    fn attack_action(
        &mut self,
        index: usize,
        forced_target: Option<usize>,
    ) -> Result<ActionReport, BattleError> {
        if let Some(target) = forced_target {
            if self.actors[target].is_alive() {
                self.log.push(
                    BattleLogEntry::action(self.turn, self.actors[index].id, ActionKind::Sacrifice)
                        .with_meta("target", self.actors[target].id),
                );
                return self.basic_attack(index, target, false);
            }
        }

        let Some(target) = self.pick_opponent(index) else {
            return Ok(ActionReport::default());
        };
        if self.actors[index].effects.combat.anti_healing {
            return self.anti_heal(index, target);
        }
        self.basic_attack(index, target, true)
    }

    /// Multi-hit physical attack on one target.
    ///
    /// Per hit: hit check, damage, optional status infliction. A defeated
    /// target ends the action. After a landed hit with hits remaining the
    /// target may parry or shield-block, which ends the action.
    fn basic_attack(
        &mut self,
        index: usize,
        aimed_at: usize,
        allow_cover: bool,
    ) -> Result<ActionReport, BattleError> {
        let cover = if allow_cover {
            self.cover_for(aimed_at)
        } else {
            None
        };
        let target = cover.unwrap_or(aimed_at);

        let special = self.roll_special_attack(index);
        let strike = special.as_ref().map_or(Strike::BASIC, Strike::special);
        let hit_multiplier = special.as_ref().map_or(1.0, |s| s.hit_multiplier);

        let attacker = &self.actors[index];
        let attacker_view = CombatView::of(&self.env, attacker)?;
        let hits = hit_count(
            &attacker_view,
            attacker.effects.combat.attack_count_multiplier * hit_multiplier,
        );
        let accuracy = attacker.effects.damage.accuracy_multiplier;

        let mut entry = BattleLogEntry::action(self.turn, attacker.id, ActionKind::Attack)
            .with_meta("hits", hits);
        if let Some(special) = &special {
            entry.insert_meta("special_attack", &special.label);
        }
        if cover.is_some() {
            entry.insert_meta("covered", self.actors[aimed_at].id);
        }

        let mut report = ActionReport::default();
        for hit in 0..hits {
            if !self.actors[target].is_alive() {
                break;
            }
            let target_view = CombatView::of(&self.env, &self.actors[target])?;
            if !roll_hit(
                &mut self.rng,
                &attacker_view,
                accuracy,
                &target_view,
                &self.config.rules,
            ) {
                entry.push_effect(TargetEffect::miss(self.actors[target].id));
                continue;
            }

            let mut landed = self.strike(
                index,
                &attacker_view,
                target,
                &target_view,
                Blow::Physical(strike),
            )?;
            if cover.is_some() {
                landed.effect.flags |= EffectFlags::COVERED;
            }
            report.record(target, &landed);
            entry.push_effect(landed.effect);

            if let Some((status, base_chance)) = special.as_ref().and_then(|s| s.inflict) {
                if self.actors[target].is_alive() {
                    let effect = self.inflict(index, target, status, base_chance)?;
                    entry.insert_meta("status", status);
                    entry.push_effect(effect);
                }
            }

            if landed.defeated {
                break;
            }
            if hit + 1 < hits {
                let interrupt = roll_interrupt(
                    &mut self.rng,
                    &attacker_view,
                    &target_view,
                    &self.actors[target].effects.combat,
                );
                if let Some(interrupt) = interrupt {
                    let flag = match interrupt {
                        Interrupt::Parry => EffectFlags::PARRIED,
                        Interrupt::ShieldBlock => EffectFlags::BLOCKED,
                    };
                    if let Some(last) = entry
                        .effects
                        .iter_mut()
                        .rev()
                        .find(|e| e.kind == EffectKind::Damage)
                    {
                        last.flags |= flag;
                    }
                    entry.insert_meta("interrupt", interrupt.as_str());
                    trace!(defender = %self.actors[target].id, interrupt = interrupt.as_str(), "attack interrupted");
                    break;
                }
            }
        }

        self.log.push(entry);
        Ok(report)
    }

    /// First special attack whose chance succeeds, checked in order.
    fn roll_special_attack(&mut self, index: usize) -> Option<SpecialAttack> {
        let specials = &self.actors[index].effects.combat.special_attacks;
        for special in specials {
            if percent_chance(&mut self.rng, special.chance) {
                return Some(special.clone());
            }
        }
        None
    }

    /// Applies the configured healing-reduction status instead of damage.
    ///
    /// The base chance is certain, so only the target's resistance and the
    /// source's infliction multiplier decide whether it lands.
    fn anti_heal(&mut self, index: usize, target: usize) -> Result<ActionReport, BattleError> {
        let status = self.config.anti_healing_status;
        self.env.status(status)?;

        let effect =
            self.inflict_for(index, target, status, 100.0, self.config.anti_healing_duration);
        self.log.push(
            BattleLogEntry::action(self.turn, self.actors[index].id, ActionKind::AntiHeal)
                .with_meta("status", status)
                .with_effect(effect),
        );
        Ok(ActionReport::default())
    }

    // ========================================================================
    // Spells and breath
    // ========================================================================

    fn cast_spell(&mut self, index: usize, spell_id: SpellId) -> Result<ActionReport, BattleError> {
        let spell = self.env.spell(spell_id)?;

        let caster = &mut self.actors[index];
        let (pool, kind, school_power) = match spell.school {
            SpellSchool::Priest => (
                &mut caster.resources.priest_charges,
                ActionKind::PriestSpell,
                caster.effects.spell.priest_power,
            ),
            SpellSchool::Mage => (
                &mut caster.resources.mage_charges,
                ActionKind::MageSpell,
                caster.effects.spell.mage_power,
            ),
        };
        if *pool == 0 {
            return self.attack_action(index, None);
        }
        *pool -= 1;

        let caster_view = CombatView::of(&self.env, &self.actors[index])?;
        let mut entry = BattleLogEntry::action(self.turn, self.actors[index].id, kind)
            .with_meta("spell", spell.id)
            .with_meta("name", &spell.name);
        let mut report = ActionReport::default();

        match spell.kind {
            SpellKind::Damage { power, all_targets } => {
                let cast = SpellCast {
                    spell: spell.id,
                    school: spell.school,
                    power,
                };
                for target in self.spell_targets(index, all_targets) {
                    let target_view = CombatView::of(&self.env, &self.actors[target])?;
                    let landed =
                        self.strike(index, &caster_view, target, &target_view, Blow::Magical(cast))?;
                    report.record(target, &landed);
                    entry.push_effect(landed.effect);
                }
            }
            SpellKind::Heal { power, all_targets } => {
                let targets: Vec<usize> = if all_targets {
                    self.living_allies(index).collect()
                } else {
                    self.most_injured_ally(index).into_iter().collect()
                };
                for target in targets {
                    let target_view = CombatView::of(&self.env, &self.actors[target])?;
                    let amount = heal_amount(
                        &mut self.rng,
                        &caster_view,
                        &self.actors[index].effects,
                        power * school_power,
                        &target_view,
                    );
                    let gained = self.actors[target].heal(amount);
                    entry.push_effect(TargetEffect::heal(self.actors[target].id, gained));
                }
            }
            SpellKind::Barrier {
                damage_type,
                charges,
            } => {
                entry.insert_meta("damage_type", damage_type.as_str());
                let allies: Vec<usize> = self.living_allies(index).collect();
                for ally in allies {
                    self.actors[ally].barriers.add(damage_type, charges);
                    entry.push_effect(TargetEffect::new(
                        self.actors[ally].id,
                        EffectKind::Buff,
                        charges,
                    ));
                }
            }
            SpellKind::Inflict {
                status,
                base_chance,
                all_targets,
            } => {
                entry.insert_meta("status", status);
                for target in self.spell_targets(index, all_targets) {
                    let effect = self.inflict(index, target, status, base_chance)?;
                    entry.push_effect(effect);
                }
            }
        }

        self.log.push(entry);
        Ok(report)
    }

    /// Every living opponent, or one weighted pick.
    fn spell_targets(&mut self, index: usize, all_targets: bool) -> Vec<usize> {
        if all_targets {
            self.living_opponents(index).collect()
        } else {
            self.pick_opponent(index).into_iter().collect()
        }
    }

    /// Breath hits every living opponent.
    fn breath_attack(&mut self, index: usize) -> Result<ActionReport, BattleError> {
        if self.actors[index].resources.breath_charges == 0 {
            return self.attack_action(index, None);
        }
        self.actors[index].resources.breath_charges -= 1;

        let attacker_view = CombatView::of(&self.env, &self.actors[index])?;
        let mut entry = BattleLogEntry::action(self.turn, self.actors[index].id, ActionKind::Breath);
        let mut report = ActionReport::default();

        let targets: Vec<usize> = self.living_opponents(index).collect();
        for target in targets {
            let target_view = CombatView::of(&self.env, &self.actors[target])?;
            let landed = self.strike(index, &attacker_view, target, &target_view, Blow::Breath)?;
            report.record(target, &landed);
            entry.push_effect(landed.effect);
        }

        self.log.push(entry);
        Ok(report)
    }

    // ========================================================================
    // Shared
    // ========================================================================

    /// Resolves one blow from `attacker` on `target` and applies the damage.
    ///
    /// Critical hits add degradation to the target.
    pub(super) fn strike(
        &mut self,
        attacker: usize,
        attacker_view: &CombatView,
        target: usize,
        target_view: &CombatView,
        blow: Blow,
    ) -> Result<Landed, BattleError> {
        let rules = self.config.rules;
        let (attacker, defender) = pair_mut(&mut self.actors, attacker, target);
        let outcome = deal_blow(
            &mut self.rng,
            &rules,
            attacker,
            attacker_view,
            defender,
            target_view,
            blow,
        );

        defender.take_damage(outcome.amount);
        if outcome.critical {
            defender.counters.degradation_percent =
                (defender.counters.degradation_percent + rules.degradation_on_critical).min(100.0);
        }
        let defeated = !defender.is_alive();

        let mut flags = EffectFlags::empty();
        flags.set(EffectFlags::CRITICAL, outcome.critical);
        flags.set(EffectFlags::BARRIER, outcome.barrier);
        flags.set(EffectFlags::GUARDED, outcome.guarded);
        flags.set(EffectFlags::NULLIFIED, outcome.nullified);
        flags.set(EffectFlags::DEFEATED, defeated);

        trace!(
            attacker = %attacker.id,
            defender = %defender.id,
            amount = outcome.amount,
            damage_type = outcome.damage_type.as_str(),
            critical = outcome.critical,
            "blow landed"
        );

        Ok(Landed {
            outcome,
            effect: TargetEffect::damage(defender.id, outcome.amount).with_flags(flags),
            defeated,
        })
    }

    /// Rolls a status application from `source` on `target`.
    pub(super) fn inflict(
        &mut self,
        source: usize,
        target: usize,
        status: StatusId,
        base_chance: f64,
    ) -> Result<TargetEffect, BattleError> {
        let duration = self.env.status(status)?.duration;
        Ok(self.inflict_for(source, target, status, base_chance, duration))
    }

    fn inflict_for(
        &mut self,
        source: usize,
        target: usize,
        status: StatusId,
        base_chance: f64,
        duration: u32,
    ) -> TargetEffect {
        let multiplier = self.actors[source].effects.status.infliction_multiplier;
        let source_id = self.actors[source].id;
        let target_actor = &mut self.actors[target];

        let chance = status::chance_percent(base_chance, status, target_actor, multiplier);
        let applied = status::attempt_apply(
            &mut self.rng,
            status,
            chance,
            duration,
            Some(source_id),
            target_actor,
        );
        if applied {
            TargetEffect::new(target_actor.id, EffectKind::Status, duration)
        } else {
            TargetEffect::miss(target_actor.id)
        }
    }
}

fn deal_blow(
    rng: &mut impl RandomSource,
    rules: &CombatRules,
    attacker: &Actor,
    attacker_view: &CombatView,
    defender: &mut Actor,
    defender_view: &CombatView,
    blow: Blow,
) -> DamageOutcome {
    let offense = Combatant {
        view: attacker_view,
        effects: &attacker.effects,
        resistances: &attacker.resistances,
    };
    let defense = Combatant {
        view: defender_view,
        effects: &defender.effects,
        resistances: &defender.resistances,
    };
    let mut mitigation = Mitigation {
        barriers: &mut defender.barriers,
        guard_barriers: &mut defender.guard_barriers,
        guarding: defender.guarding,
    };

    match blow {
        Blow::Physical(strike) => {
            physical_damage(rng, &offense, &defense, &mut mitigation, rules, strike)
        }
        Blow::Magical(cast) => magical_damage(rng, &offense, &defense, &mut mitigation, rules, cast),
        Blow::Breath => breath_damage(rng, &offense, &defense, &mut mitigation),
    }
}
