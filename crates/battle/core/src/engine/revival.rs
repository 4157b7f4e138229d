//! Revival after defeat: auto revive, forced revive, ally rescue and the
//! necromancer cadence.

use tracing::debug;

use crate::log::{ActionKind, BattleLogEntry, EffectKind, TargetEffect};
use crate::random::{RandomSource, percent_chance};
use crate::skill::ScalingStat;
use crate::state::Actor;

use super::BattleEngine;

impl<'a, R: RandomSource> BattleEngine<'a, R> {
    /// Gives every actor defeated by an action its revival chances.
    ///
    /// Per actor, in order: auto revive, forced revive, rescue by an ally.
    /// The first that succeeds ends the sequence.
    pub(super) fn process_defeats(&mut self, defeated: &[usize]) {
        for &index in defeated {
            if !self.actors[index].is_fallen() {
                continue;
            }
            debug!(actor = %self.actors[index].id, turn = self.turn, "actor defeated");
            if self.try_auto_revive(index) || self.try_forced_revive(index) {
                continue;
            }
            self.try_rescue(index);
        }
    }

    fn try_auto_revive(&mut self, index: usize) -> bool {
        let actives = self.actors[index].effects.resurrection.auto_revive.clone();
        for (slot, active) in actives.iter().enumerate() {
            let used = self.actors[index]
                .counters
                .resurrection_triggers
                .get(slot)
                .copied()
                .unwrap_or(0);
            if used >= active.max_triggers || !percent_chance(&mut self.rng, active.chance) {
                continue;
            }

            let actor = &mut self.actors[index];
            let hp = scaled_hp(actor, active.stat, active.scale);
            let restored = actor.revive(hp);
            let triggers = &mut actor.counters.resurrection_triggers;
            if triggers.len() <= slot {
                triggers.resize(slot + 1, 0);
            }
            triggers[slot] += 1;

            let stat: &'static str = active.stat.into();
            self.log.push(
                BattleLogEntry::action(self.turn, actor.id, ActionKind::Resurrection)
                    .with_meta("source", "auto_revive")
                    .with_meta("stat", stat)
                    .with_effect(TargetEffect::new(actor.id, EffectKind::Revive, restored)),
            );
            return true;
        }
        false
    }

    fn try_forced_revive(&mut self, index: usize) -> bool {
        let actor = &mut self.actors[index];
        let Some(forced) = actor.effects.resurrection.forced_revive else {
            return false;
        };
        if actor.counters.forced_revives_used >= forced.max_triggers {
            return false;
        }

        let hp = ratio_of(actor.max_hp(), forced.hp_ratio);
        let restored = actor.revive(hp);
        actor.counters.forced_revives_used += 1;
        self.log.push(
            BattleLogEntry::action(self.turn, actor.id, ActionKind::Resurrection)
                .with_meta("source", "forced_revive")
                .with_effect(TargetEffect::new(actor.id, EffectKind::Revive, restored)),
        );
        true
    }

    /// Living allies with rescue uses left try in ordinal order; the first
    /// successful roll revives the fallen actor.
    fn try_rescue(&mut self, fallen: usize) -> bool {
        let allies: Vec<usize> = self.living_allies(fallen).collect();
        for ally in allies {
            let Some(rescue) = self.actors[ally].effects.resurrection.rescue else {
                continue;
            };
            if self.actors[ally].counters.rescue_uses_this_turn >= rescue.uses_per_turn {
                continue;
            }
            if !percent_chance(&mut self.rng, rescue.chance) {
                continue;
            }

            let rescuer = &mut self.actors[ally];
            rescuer.counters.rescue_uses_this_turn += 1;
            let rescuer_id = rescuer.id;
            let hp = scale_stat(rescuer.snapshot.healing_power, rescue.hp_scale);

            let target = &mut self.actors[fallen];
            let restored = target.revive(hp);
            self.log.push(
                BattleLogEntry::action(self.turn, rescuer_id, ActionKind::Rescue)
                    .with_effect(TargetEffect::new(target.id, EffectKind::Revive, restored)),
            );
            return true;
        }
        false
    }

    /// Every `necromancer_interval` turns, an actor raises its first fallen
    /// ally before acting.
    pub(super) fn necromancer_cadence(&mut self, index: usize) {
        let Some(interval) = self.actors[index].effects.resurrection.necromancer_interval else {
            return;
        };
        if interval == 0 || self.turn % interval != 0 {
            return;
        }
        let Some(fallen) = self.first_fallen_ally(index) else {
            return;
        };

        let caster = self.actors[index].id;
        let target = &mut self.actors[fallen];
        let hp = ratio_of(target.max_hp(), self.config.necromancer_revive_ratio);
        let restored = target.revive(hp);
        self.log.push(
            BattleLogEntry::action(self.turn, caster, ActionKind::Necromancer)
                .with_effect(TargetEffect::new(target.id, EffectKind::Revive, restored)),
        );
    }
}

fn scaled_hp(actor: &Actor, stat: ScalingStat, scale: f64) -> u32 {
    let base = match stat {
        ScalingStat::HealingPower => actor.snapshot.healing_power,
        ScalingStat::MaxHp => actor.snapshot.max_hp,
        ScalingStat::MagicalAttack => actor.snapshot.magical_attack,
    };
    scale_stat(base, scale)
}

/// `round(stat × scale)`, at least 1.
fn scale_stat(stat: u32, scale: f64) -> u32 {
    let hp = (stat as f64 * scale).round();
    if hp.is_finite() && hp > 1.0 {
        hp.min(u32::MAX as f64) as u32
    } else {
        1
    }
}

fn ratio_of(max_hp: u32, ratio: f64) -> u32 {
    scale_stat(max_hp, ratio)
}
