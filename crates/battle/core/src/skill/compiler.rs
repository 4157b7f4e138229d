//! Folds skill definitions into a [`SkillEffects`] bundle.
//!
//! # Combination rules
//!
//! - multipliers multiply
//! - chances, bonuses and additive percentages add
//! - charges add
//! - flags OR
//! - lists append in processing order
//! - cadence intervals keep the minimum
//! - singleton capabilities (rescue, forced revive, retreat, auto repair) keep
//!   the first one seen
//!
//! Skills are processed in ascending id order, so the result does not depend
//! on the order of the input lists.

use std::collections::BTreeSet;

use tracing::trace;

use crate::env::{BattleEnv, MasterDataError, SkillEffect, SpellSchool};
use crate::state::SkillId;

use super::effects::{SkillEffects, StatusResistance as Resistance};

/// Compiles an actor's skill set into its effect bundle.
pub struct SkillCompiler;

impl SkillCompiler {
    /// Compile `(learned ∪ granted) − suppressed`.
    ///
    /// # Errors
    ///
    /// Returns `MasterDataError::SkillNotFound` for any id in the effective set
    /// that master data does not define.
    pub fn compile(
        env: &BattleEnv<'_>,
        learned: &[SkillId],
        granted: &[SkillId],
        suppressed: &[SkillId],
    ) -> Result<SkillEffects, MasterDataError> {
        let suppressed: BTreeSet<SkillId> = suppressed.iter().copied().collect();
        let effective: BTreeSet<SkillId> = learned
            .iter()
            .chain(granted)
            .copied()
            .filter(|id| !suppressed.contains(id))
            .collect();

        let mut effects = SkillEffects::neutral();
        for id in effective {
            let definition = env.skill(id)?;
            trace!(skill = %id, name = %definition.name, "compiling skill");
            for effect in &definition.effects {
                Self::fold(&mut effects, effect);
            }
        }
        Ok(effects)
    }

    /// Compile a single list of skills with nothing granted or suppressed.
    pub fn compile_learned(
        env: &BattleEnv<'_>,
        learned: &[SkillId],
    ) -> Result<SkillEffects, MasterDataError> {
        Self::compile(env, learned, &[], &[])
    }

    fn fold(out: &mut SkillEffects, effect: &SkillEffect) {
        use SkillEffect::*;

        match effect {
            DamageDealt {
                damage_type,
                multiplier,
            } => out.damage.dealt.scale(*damage_type, *multiplier),
            DamageTaken {
                damage_type,
                multiplier,
            } => out.damage.taken.scale(*damage_type, *multiplier),
            CriticalBonus { percent } => out.damage.critical_bonus += percent,
            CriticalMultiplier { multiplier } => out.damage.critical_multiplier *= multiplier,
            MartialBonus { multiplier } => out.damage.martial_multiplier *= multiplier,
            Accuracy { multiplier } => out.damage.accuracy_multiplier *= multiplier,
            MagicNullify { chance } => out.damage.magic_nullify_chance += chance,

            SpecialAttack(special) => out.combat.special_attacks.push(special.clone()),
            Reaction(reaction) => out.combat.reactions.push(reaction.clone()),
            ExtraAction(extra) => out.combat.extra_actions.push(*extra),
            Parry { bonus } => {
                out.combat.parry = Some(out.combat.parry.unwrap_or(0.0) + bonus);
            }
            ShieldBlock { bonus } => {
                out.combat.shield_block = Some(out.combat.shield_block.unwrap_or(0.0) + bonus);
            }
            Barrier {
                damage_type,
                charges,
            } => out.combat.barrier.add(*damage_type, *charges),
            GuardBarrier {
                damage_type,
                charges,
            } => out.combat.guard_barrier.add(*damage_type, *charges),
            EnemyActionDebuff { chance } => out.combat.enemy_action_debuff_chance += chance,
            AntiHealing => out.combat.anti_healing = true,
            AttackCount { multiplier } => out.combat.attack_count_multiplier *= multiplier,

            SpellPower { school, multiplier } => match school {
                SpellSchool::Priest => out.spell.priest_power *= multiplier,
                SpellSchool::Mage => out.spell.mage_power *= multiplier,
            },
            MagicCritical { chance, multiplier } => {
                out.spell.magic_critical_chance += chance;
                out.spell.magic_critical_multiplier *= multiplier;
            }
            ChargeRecovery { chance } => out.spell.charge_recovery_chance += chance,
            ExtraCharges { school, charges } => match school {
                SpellSchool::Priest => out.spell.extra_priest_charges += charges,
                SpellSchool::Mage => out.spell.extra_mage_charges += charges,
            },

            StatusResistance {
                status,
                multiplier,
                additive_percent,
            } => {
                let entry = out
                    .status
                    .resistances
                    .entry(*status)
                    .or_insert(Resistance::NEUTRAL);
                entry.multiplier *= multiplier;
                entry.additive_percent += additive_percent;
            }
            StatusInfliction { multiplier } => out.status.infliction_multiplier *= multiplier,
            TimedBuff(buff) => out.status.timed_buffs.push(buff.clone()),

            Rescue(rescue) => {
                out.resurrection.rescue.get_or_insert(*rescue);
            }
            AutoRevive(revive) => out.resurrection.auto_revive.push(*revive),
            ForcedRevive(forced) => {
                out.resurrection.forced_revive.get_or_insert(*forced);
            }
            Necromancer { interval } => {
                out.resurrection.necromancer_interval =
                    min_interval(out.resurrection.necromancer_interval, *interval);
            }
            Sacrifice { interval } => {
                out.resurrection.sacrifice_interval =
                    min_interval(out.resurrection.sacrifice_interval, *interval);
            }

            HealingGiven { multiplier } => out.misc.healing_given *= multiplier,
            HealingReceived { multiplier } => out.misc.healing_received *= multiplier,
            TargetingWeight { multiplier } => out.misc.targeting_weight *= multiplier,
            Cover => out.misc.cover = true,
            Retreat(retreat) => {
                out.misc.retreat.get_or_insert(*retreat);
            }
            AutoRepair(repair) => {
                out.misc.auto_repair.get_or_insert(*repair);
            }
            Regeneration { percent } => out.misc.regeneration_percent += percent,
        }
    }
}

/// A zero interval never fires and is ignored.
fn min_interval(current: Option<u32>, candidate: u32) -> Option<u32> {
    if candidate == 0 {
        return current;
    }
    Some(current.map_or(candidate, |c| c.min(candidate)))
}
