//! Turn-start and turn-end processing.

use tracing::debug;

use crate::env::SpellSchool;
use crate::log::{ActionKind, BattleLogEntry, EffectFlags, EffectKind, TargetEffect};
use crate::random::{RandomSource, percent_chance};
use crate::status;

use super::{BattleEngine, BattleError};

impl<'a, R: RandomSource> BattleEngine<'a, R> {
    /// Turn-start processing, per actor in ordinal order.
    ///
    /// Guard and per-turn counters reset for everyone. Living actors then
    /// apply timed buffs, roll retreat and roll auto-repair.
    pub(super) fn turn_start(&mut self) {
        self.turns_played = self.turn;
        debug!(turn = self.turn, "turn started");

        for index in 0..self.actors.len() {
            let actor = &mut self.actors[index];
            actor.guarding = false;
            actor.counters.rescue_uses_this_turn = 0;
            actor.counters.extra_actions_this_turn = 0;

            if !actor.is_alive() {
                continue;
            }
            self.apply_timed_buffs(index);
            if self.roll_retreat(index) {
                continue;
            }
            self.roll_auto_repair(index);
        }
    }

    /// Turn-end processing: status ticks, then regeneration, then charge
    /// recovery, each as a pass in ordinal order. Advances the turn counter.
    pub(super) fn turn_end(&mut self) -> Result<(), BattleError> {
        for index in 0..self.actors.len() {
            self.tick_statuses(index)?;
        }
        for index in 0..self.actors.len() {
            self.regenerate(index);
        }
        for index in 0..self.actors.len() {
            self.recover_charges(index);
        }
        self.turn += 1;
        Ok(())
    }

    // ========================================================================
    // Turn start
    // ========================================================================

    /// Stacks every matching timed buff onto the actor's live modifiers.
    fn apply_timed_buffs(&mut self, index: usize) {
        let turn = self.turn;
        let actor = &mut self.actors[index];
        let mut applied = Vec::new();
        for buff in &actor.effects.status.timed_buffs {
            if buff.trigger.matches(turn) {
                actor.live_modifiers = actor.live_modifiers.stack(&buff.modifiers);
                applied.push(buff.label.clone());
            }
        }

        let id = actor.id;
        for label in applied {
            self.log.push(
                BattleLogEntry::action(turn, id, ActionKind::BuffApply).with_meta("buff", label),
            );
        }
    }

    fn roll_retreat(&mut self, index: usize) -> bool {
        let Some(retreat) = self.actors[index].effects.misc.retreat else {
            return false;
        };
        if self.turn < retreat.turn || !percent_chance(&mut self.rng, retreat.chance) {
            return false;
        }

        let actor = &mut self.actors[index];
        actor.fled = true;
        actor.guarding = false;
        debug!(actor = %actor.id, turn = self.turn, "actor retreated");
        self.log
            .push(BattleLogEntry::action(self.turn, actor.id, ActionKind::Retreat));
        true
    }

    /// Reduces degradation by a drawn amount in `[min, max]` percent.
    fn roll_auto_repair(&mut self, index: usize) {
        let Some(repair) = self.actors[index].effects.misc.auto_repair else {
            return;
        };
        if self.actors[index].counters.degradation_percent <= 0.0
            || !percent_chance(&mut self.rng, repair.chance)
        {
            return;
        }

        let min = i32::try_from(repair.min).unwrap_or(i32::MAX);
        let max = i32::try_from(repair.max).unwrap_or(i32::MAX);
        let drawn = self.rng.next_int(min, max).max(0) as f64;

        let actor = &mut self.actors[index];
        let before = actor.counters.degradation_percent;
        actor.counters.degradation_percent = (before - drawn).max(0.0);
        let repaired = (before - actor.counters.degradation_percent).round() as u32;
        self.log.push(
            BattleLogEntry::action(self.turn, actor.id, ActionKind::Repair)
                .with_effect(TargetEffect::new(actor.id, EffectKind::Repair, repaired)),
        );
    }

    // ========================================================================
    // Turn end
    // ========================================================================

    fn tick_statuses(&mut self, index: usize) -> Result<(), BattleError> {
        let tick = status::tick_statuses(&self.env, &mut self.actors[index])?;
        if tick.is_empty() {
            return Ok(());
        }

        let actor = &self.actors[index];
        let mut entry = BattleLogEntry::system(self.turn, ActionKind::StatusTick);
        if !tick.damage.is_empty() {
            let sources: Vec<String> = tick.damage.iter().map(|(s, _)| s.to_string()).collect();
            entry.insert_meta("statuses", sources.join(","));
        }
        for &(_, amount) in &tick.damage {
            entry.push_effect(TargetEffect::damage(actor.id, amount));
        }
        if !tick.expired.is_empty() {
            let expired: Vec<String> = tick.expired.iter().map(ToString::to_string).collect();
            entry.insert_meta("expired", expired.join(","));
        }

        let defeated = !actor.is_alive();
        if defeated {
            if let Some(last) = entry.effects.last_mut() {
                last.flags |= EffectFlags::DEFEATED;
            }
        }
        self.log.push(entry);

        if defeated {
            self.process_defeats(&[index]);
        }
        Ok(())
    }

    fn regenerate(&mut self, index: usize) {
        let actor = &mut self.actors[index];
        let percent = actor.effects.misc.regeneration_percent;
        if percent <= 0.0 || !actor.is_alive() || actor.hp() >= actor.max_hp() {
            return;
        }

        let amount = ((actor.max_hp() as f64 * percent / 100.0).round() as u32).max(1);
        let gained = actor.heal(amount);
        self.log.push(
            BattleLogEntry::action(self.turn, actor.id, ActionKind::Regeneration)
                .with_effect(TargetEffect::heal(actor.id, gained)),
        );
    }

    /// Each school the actor knows spells of rolls once to regain a charge.
    fn recover_charges(&mut self, index: usize) {
        let chance = self.actors[index].effects.spell.charge_recovery_chance;
        if chance <= 0.0 || !self.actors[index].is_alive() {
            return;
        }

        for school in [SpellSchool::Priest, SpellSchool::Mage] {
            let knows = match school {
                SpellSchool::Priest => !self.actors[index].spells.priest.is_empty(),
                SpellSchool::Mage => !self.actors[index].spells.mage.is_empty(),
            };
            if !knows || !percent_chance(&mut self.rng, chance) {
                continue;
            }

            let actor = &mut self.actors[index];
            match school {
                SpellSchool::Priest => actor.resources.priest_charges += 1,
                SpellSchool::Mage => actor.resources.mage_charges += 1,
            }
            let school: &'static str = school.into();
            self.log.push(
                BattleLogEntry::action(self.turn, actor.id, ActionKind::ChargeRecovery)
                    .with_meta("school", school)
                    .with_effect(TargetEffect::new(actor.id, EffectKind::Buff, 1)),
            );
        }
    }
}
