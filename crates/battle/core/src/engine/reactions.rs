//! Counter-attacks provoked by damage or by an ally's defeat.
//!
//! A counter is a physical attack from the reactor on the provoking actor.
//! Counters never provoke further reactions and cannot be interrupted.

use crate::combat::{CombatView, Strike, hit_count, roll_hit};
use crate::log::{ActionKind, BattleLogEntry, TargetEffect};
use crate::random::{RandomSource, percent_chance};
use crate::skill::{Reaction, ReactionTrigger};
use crate::state::DamageType;

use super::actions::Blow;
use super::{BattleEngine, BattleError};

impl<'a, R: RandomSource> BattleEngine<'a, R> {
    /// Each damaged defender still standing may counter once, using the
    /// first reaction matching the damage type whose chance succeeds.
    pub(super) fn damage_reactions(
        &mut self,
        attacker: usize,
        damaged: &[(usize, DamageType)],
    ) -> Result<(), BattleError> {
        for &(defender, damage_type) in damaged {
            if !self.actors[attacker].is_alive() {
                break;
            }
            if !self.actors[defender].is_alive()
                || self.actors[defender].side == self.actors[attacker].side
            {
                continue;
            }
            self.react(defender, attacker, ReactionTrigger::for_damage(damage_type))?;
        }
        Ok(())
    }

    /// Living allies of each actor that stayed down may avenge it.
    pub(super) fn ally_defeated_reactions(
        &mut self,
        attacker: usize,
        defeated: &[usize],
    ) -> Result<(), BattleError> {
        for &fallen in defeated {
            if !self.actors[fallen].is_fallen()
                || self.actors[fallen].side == self.actors[attacker].side
            {
                continue;
            }
            let allies: Vec<usize> = self.living_allies(fallen).collect();
            for ally in allies {
                if !self.actors[attacker].is_alive() {
                    return Ok(());
                }
                self.react(ally, attacker, ReactionTrigger::AllyDefeated)?;
            }
        }
        Ok(())
    }

    /// Rolls the reactor's matching reactions in order; the first success
    /// counters. Returns whether a counter happened.
    fn react(
        &mut self,
        reactor: usize,
        provoker: usize,
        trigger: ReactionTrigger,
    ) -> Result<bool, BattleError> {
        let reactions: Vec<Reaction> = self.actors[reactor]
            .effects
            .combat
            .reactions
            .iter()
            .filter(|r| r.trigger == trigger)
            .cloned()
            .collect();

        for reaction in &reactions {
            if percent_chance(&mut self.rng, reaction.chance) {
                self.counter_attack(reactor, provoker, reaction)?;
                return Ok(true);
            }
        }
        Ok(false)
    }

    fn counter_attack(
        &mut self,
        reactor: usize,
        target: usize,
        reaction: &Reaction,
    ) -> Result<(), BattleError> {
        let reactor_view = CombatView::of(&self.env, &self.actors[reactor])?;
        let hits = hit_count(&reactor_view, reaction.hit_multiplier);
        let accuracy = self.actors[reactor].effects.damage.accuracy_multiplier;
        let trigger: &'static str = reaction.trigger.into();

        let mut entry = BattleLogEntry::action(self.turn, self.actors[reactor].id, ActionKind::Reaction)
            .with_meta("reaction", &reaction.label)
            .with_meta("trigger", trigger)
            .with_meta("hits", hits);

        let mut defeated = Vec::new();
        for _ in 0..hits {
            if !self.actors[target].is_alive() {
                break;
            }
            let target_view = CombatView::of(&self.env, &self.actors[target])?;
            if !roll_hit(
                &mut self.rng,
                &reactor_view,
                accuracy,
                &target_view,
                &self.config.rules,
            ) {
                entry.push_effect(TargetEffect::miss(self.actors[target].id));
                continue;
            }
            let landed = self.strike(
                reactor,
                &reactor_view,
                target,
                &target_view,
                Blow::Physical(Strike::reaction(reaction)),
            )?;
            entry.push_effect(landed.effect);
            if landed.defeated {
                defeated.push(target);
                break;
            }
        }

        self.log.push(entry);
        self.process_defeats(&defeated);
        Ok(())
    }
}
