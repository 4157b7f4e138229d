//! Initiative order and action selection.

use std::cmp::Reverse;

use tracing::trace;

use crate::env::{SpellKind, SpellSchool};
use crate::random::{RandomSource, percent_chance, weighted_index};
use crate::state::{Side, SpellId};
use crate::status;

use super::{BattleEngine, BattleError};

/// Why an actor loses its action.
#[derive(Clone, Copy, Debug, PartialEq, Eq, strum::IntoStaticStr)]
#[strum(serialize_all = "snake_case")]
pub(super) enum SkipReason {
    Incapacitated,
    Debuffed,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(super) enum ActionChoice {
    Skip(SkipReason),
    /// Basic attack. The target is chosen at resolution unless forced.
    Attack {
        forced_target: Option<usize>,
    },
    Spell(SpellId),
    Breath,
    Defend,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(super) struct PlannedAction {
    pub actor: usize,
    pub choice: ActionChoice,
}

/// Positions in [`ActionRates::weights`](crate::state::ActionRates::weights).
/// Index 0 is attack, the fallback.
const PRIEST: usize = 1;
const MAGE: usize = 2;
const BREATH: usize = 3;
const DEFEND: usize = 4;

impl<'a, R: RandomSource> BattleEngine<'a, R> {
    /// Living actors sorted by agility (descending), players before enemies,
    /// then formation slot.
    pub(super) fn initiative_order(&self) -> Vec<usize> {
        let mut order: Vec<usize> = (0..self.actors.len())
            .filter(|&i| self.actors[i].is_alive())
            .collect();
        order.sort_by_key(|&i| {
            let actor = &self.actors[i];
            (
                Reverse(actor.attributes.agility),
                actor.side != Side::Player,
                actor.formation_slot,
            )
        });
        order
    }

    pub(super) fn select_actions(&mut self) -> Result<(), BattleError> {
        let order = self.initiative_order();
        let mut plan = Vec::with_capacity(order.len());
        for actor in order {
            let choice = self.select_for(actor)?;
            trace!(actor = %self.actors[actor].id, ?choice, "action selected");
            plan.push(PlannedAction { actor, choice });
        }
        self.plan = plan;
        Ok(())
    }

    /// Chooses one action for the actor at `index`.
    ///
    /// Checks in order: incapacitation, the opponents' action debuff, the
    /// sacrifice cadence, then a weighted draw over the action rates. A drawn
    /// kind that cannot be performed falls back to a basic attack. Choosing to
    /// defend raises guard immediately.
    pub(super) fn select_for(&mut self, index: usize) -> Result<ActionChoice, BattleError> {
        let actor = &self.actors[index];
        if status::is_incapacitated(&self.env, actor)? {
            return Ok(ActionChoice::Skip(SkipReason::Incapacitated));
        }

        let debuff = self
            .living_opponents(index)
            .map(|i| self.actors[i].effects.combat.enemy_action_debuff_chance)
            .fold(0.0_f64, f64::max);
        if percent_chance(&mut self.rng, debuff) {
            return Ok(ActionChoice::Skip(SkipReason::Debuffed));
        }

        if let Some(interval) = self.actors[index].effects.resurrection.sacrifice_interval {
            if interval > 0 && self.turn % interval == 0 {
                if let Some(target) = self.sacrifice_target(index) {
                    return Ok(ActionChoice::Attack {
                        forced_target: Some(target),
                    });
                }
            }
        }

        let weights = self.actors[index].action_rates.weights();
        let choice = match weighted_index(&mut self.rng, &weights) {
            Some(PRIEST) => self
                .choose_spell(index, SpellSchool::Priest)?
                .map(ActionChoice::Spell),
            Some(MAGE) => self
                .choose_spell(index, SpellSchool::Mage)?
                .map(ActionChoice::Spell),
            Some(BREATH) if self.actors[index].resources.breath_charges > 0 => {
                Some(ActionChoice::Breath)
            }
            Some(DEFEND) => {
                self.actors[index].guarding = true;
                Some(ActionChoice::Defend)
            }
            _ => None,
        };
        Ok(choice.unwrap_or(ActionChoice::Attack {
            forced_target: None,
        }))
    }

    /// Highest-tier castable spell of `school`, or `None` when the actor is
    /// silenced, out of charges, or knows nothing useful right now.
    ///
    /// Heal spells are only useful while a living ally is injured.
    fn choose_spell(
        &self,
        index: usize,
        school: SpellSchool,
    ) -> Result<Option<SpellId>, BattleError> {
        let actor = &self.actors[index];
        let (charges, known) = match school {
            SpellSchool::Priest => (actor.resources.priest_charges, &actor.spells.priest),
            SpellSchool::Mage => (actor.resources.mage_charges, &actor.spells.mage),
        };
        if charges == 0 || known.is_empty() || status::is_silenced(&self.env, actor)? {
            return Ok(None);
        }

        let anyone_injured = self
            .living_allies(index)
            .any(|i| self.actors[i].hp() < self.actors[i].max_hp());

        let mut best: Option<(u32, SpellId)> = None;
        for &id in known {
            let spell = self.env.spell(id)?;
            if matches!(spell.kind, SpellKind::Heal { .. }) && !anyone_injured {
                continue;
            }
            if best.is_none_or(|(tier, _)| spell.tier > tier) {
                best = Some((spell.tier, id));
            }
        }
        Ok(best.map(|(_, id)| id))
    }
}
