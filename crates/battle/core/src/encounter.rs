//! Enemy group construction.
//!
//! Turns encounter specs into enemy actors with stable formation slots. The
//! builder never decides which encounter occurs; the caller supplies specs.

use tracing::debug;

use crate::config::BattleConfig;
use crate::engine::BattleError;
use crate::env::BattleEnv;
use crate::skill::SkillCompiler;
use crate::state::{Actor, ActorId, CombatSnapshot, EnemyId, Side};

/// Request for `count` copies of an enemy at `level`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct EncounterSpec {
    pub enemy_id: EnemyId,
    pub level: u32,
    pub count: u32,
}

impl EncounterSpec {
    pub const fn new(enemy_id: EnemyId, level: u32, count: u32) -> Self {
        Self {
            enemy_id,
            level,
            count,
        }
    }
}

/// Reward-relevant record of one enemy in the group.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct EncounteredEnemy {
    pub enemy_id: EnemyId,
    pub level: u32,
    pub base_experience: u32,
    pub is_boss: bool,
    pub formation_slot: u8,
}

/// Enemy actors with parallel encounter records, both in slot order.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct EnemyGroup {
    pub actors: Vec<Actor>,
    pub encountered: Vec<EncounteredEnemy>,
}

impl EnemyGroup {
    pub fn len(&self) -> usize {
        self.actors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.actors.is_empty()
    }
}

pub struct EnemyGroupBuilder;

impl EnemyGroupBuilder {
    /// Expands, orders and instantiates the requested enemies.
    ///
    /// Enemies are ordered by enemy id ascending, then level descending; ties
    /// keep request order. Slots are assigned 1..=n in that order, so the
    /// result does not depend on the order of `specs` beyond ties.
    ///
    /// # Errors
    ///
    /// Returns `BattleError::OversizedEncounter` when the specs request more
    /// enemies than there are formation slots, and `BattleError::MasterData`
    /// for an unknown enemy id or a failed skill lookup.
    pub fn build(env: &BattleEnv<'_>, specs: &[EncounterSpec]) -> Result<EnemyGroup, BattleError> {
        let requested: u64 = specs.iter().map(|spec| u64::from(spec.count)).sum();
        if requested > BattleConfig::MAX_ENEMY_GROUP_SIZE as u64 {
            return Err(BattleError::OversizedEncounter {
                requested,
                max: BattleConfig::MAX_ENEMY_GROUP_SIZE,
            });
        }

        let mut expanded: Vec<(EnemyId, u32)> = specs
            .iter()
            .flat_map(|spec| (0..spec.count).map(move |_| (spec.enemy_id, spec.level)))
            .collect();
        expanded.sort_by(|a, b| a.0.cmp(&b.0).then(b.1.cmp(&a.1)));

        let mut group = EnemyGroup::default();
        for (slot, (enemy_id, level)) in (1..=u8::MAX).zip(expanded) {
            let definition = env.enemy(enemy_id)?;
            let effects = SkillCompiler::compile_learned(env, &definition.skill_ids)?;

            let actor = Actor::new(
                ActorId::enemy(slot),
                definition.name.clone(),
                Side::Enemy,
                slot,
                level,
                definition.attributes,
                CombatSnapshot::derive(&definition.attributes, level),
            )
            .with_effects(effects)
            .with_action_rates(definition.action_rates)
            .with_spells(definition.spells.clone())
            .with_resources(definition.resources)
            .with_resistances(definition.resistances.clone())
            .with_armed(definition.armed)
            .with_sacrifice_eligible(!definition.is_boss);

            group.actors.push(actor);
            group.encountered.push(EncounteredEnemy {
                enemy_id,
                level,
                base_experience: definition.base_experience,
                is_boss: definition.is_boss,
                formation_slot: slot,
            });
        }

        debug!(enemies = group.len(), "built enemy group");
        Ok(group)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::env::{EnemyDefinition, MasterDataError, MasterDataSnapshot};
    use crate::error::{BattleFault, ErrorSeverity};
    use crate::state::BaseAttributes;

    fn data() -> MasterDataSnapshot {
        let mut boss = EnemyDefinition::new(EnemyId(200), "Ogre", BaseAttributes::uniform(20));
        boss.is_boss = true;
        boss.base_experience = 500;
        MasterDataSnapshot::new()
            .with_enemy(EnemyDefinition::new(
                EnemyId(100),
                "Goblin",
                BaseAttributes::uniform(5),
            ))
            .with_enemy(boss)
    }

    #[test]
    fn counts_expand_into_distinct_slots() {
        let data = data();
        let group =
            EnemyGroupBuilder::build(&data.env(), &[EncounterSpec::new(EnemyId(100), 2, 3)])
                .unwrap();
        let slots: Vec<u8> = group.actors.iter().map(|a| a.formation_slot).collect();
        assert_eq!(slots, vec![1, 2, 3]);
        assert_eq!(group.actors[2].id, ActorId::enemy(3));
        assert!(group.actors.iter().all(|a| a.side == Side::Enemy));
    }

    #[test]
    fn ordering_is_id_ascending_then_level_descending() {
        let data = data();
        let group = EnemyGroupBuilder::build(
            &data.env(),
            &[
                EncounterSpec::new(EnemyId(200), 5, 1),
                EncounterSpec::new(EnemyId(100), 3, 1),
                EncounterSpec::new(EnemyId(100), 10, 1),
            ],
        )
        .unwrap();

        let placed: Vec<(EnemyId, u32, u8)> = group
            .encountered
            .iter()
            .map(|e| (e.enemy_id, e.level, e.formation_slot))
            .collect();
        assert_eq!(
            placed,
            vec![
                (EnemyId(100), 10, 1),
                (EnemyId(100), 3, 2),
                (EnemyId(200), 5, 3),
            ]
        );
    }

    #[test]
    fn boss_record_carries_reward_fields() {
        let data = data();
        let group =
            EnemyGroupBuilder::build(&data.env(), &[EncounterSpec::new(EnemyId(200), 7, 1)])
                .unwrap();
        assert_eq!(group.encountered[0].base_experience, 500);
        assert!(group.encountered[0].is_boss);
        assert!(!group.actors[0].counters.sacrifice_eligible);
    }

    #[test]
    fn unknown_enemy_is_fatal() {
        let data = data();
        let err = EnemyGroupBuilder::build(&data.env(), &[EncounterSpec::new(EnemyId(9), 1, 1)])
            .unwrap_err();
        assert_eq!(
            err,
            BattleError::MasterData(MasterDataError::EnemyNotFound(EnemyId(9)))
        );
        assert_eq!(err.severity(), ErrorSeverity::Fatal);
    }

    #[test]
    fn more_enemies_than_slots_are_rejected() {
        let data = data();
        let err = EnemyGroupBuilder::build(
            &data.env(),
            &[
                EncounterSpec::new(EnemyId(100), 1, 200),
                EncounterSpec::new(EnemyId(200), 1, 56),
            ],
        )
        .unwrap_err();
        assert_eq!(
            err,
            BattleError::OversizedEncounter {
                requested: 256,
                max: 255
            }
        );
        assert_eq!(err.severity(), ErrorSeverity::Validation);

        let full =
            EnemyGroupBuilder::build(&data.env(), &[EncounterSpec::new(EnemyId(100), 1, 255)])
                .unwrap();
        assert_eq!(full.actors.last().unwrap().formation_slot, 255);
    }
}
