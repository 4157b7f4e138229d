//! Party loader.
//!
//! A party file lists the player-side combatants as [`PartyMemberSpec`]s.
//! Each spec is resolved against master data into a ready [`Actor`].

use std::collections::BTreeSet;
use std::path::Path;

use battle_core::{
    ActionRates, ActionResources, Actor, ActorId, BaseAttributes, BattleConfig, BattleEnv,
    CombatSnapshot, InnateResistances, Side, SkillCompiler, SkillId, SpellBook,
};
use serde::Deserialize;
use tracing::debug;

use crate::loaders::{LoadResult, read_ron};

/// Party member as written in `party.ron`.
#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct PartyMemberSpec {
    pub name: String,
    /// Formation slot, `1..=MAX_PARTY_SIZE`; also the actor id.
    pub slot: u8,
    pub level: u32,
    pub attributes: BaseAttributes,
    /// Explicit combat values. Derived from attributes and level when absent.
    #[serde(default)]
    pub snapshot: Option<CombatSnapshot>,
    #[serde(default)]
    pub skills: Vec<SkillId>,
    /// Skills granted by equipment or class on top of learned ones.
    #[serde(default)]
    pub granted: Vec<SkillId>,
    #[serde(default)]
    pub suppressed: Vec<SkillId>,
    #[serde(default = "default_rates")]
    pub action_rates: ActionRates,
    #[serde(default)]
    pub spells: SpellBook,
    #[serde(default)]
    pub resources: ActionResources,
    #[serde(default)]
    pub resistances: InnateResistances,
    #[serde(default = "default_armed")]
    pub armed: bool,
    /// Starting HP; full when absent.
    #[serde(default)]
    pub hp: Option<u32>,
    #[serde(default)]
    pub degradation: f64,
}

fn default_rates() -> ActionRates {
    ActionRates::attack_only()
}

fn default_armed() -> bool {
    true
}

impl PartyMemberSpec {
    /// Compiles the member's skills and builds its actor.
    pub fn into_actor(self, env: &BattleEnv<'_>) -> LoadResult<Actor> {
        for &spell in self.spells.priest.iter().chain(&self.spells.mage) {
            env.spell(spell)
                .map_err(|e| anyhow::anyhow!("Party member '{}': {}", self.name, e))?;
        }
        let effects = SkillCompiler::compile(env, &self.skills, &self.granted, &self.suppressed)
            .map_err(|e| anyhow::anyhow!("Party member '{}': {}", self.name, e))?;

        let snapshot = self
            .snapshot
            .unwrap_or_else(|| CombatSnapshot::derive(&self.attributes, self.level));

        let mut actor = Actor::new(
            ActorId::player(self.slot),
            self.name,
            Side::Player,
            self.slot,
            self.level,
            self.attributes,
            snapshot,
        )
        .with_effects(effects)
        .with_action_rates(self.action_rates)
        .with_spells(self.spells)
        .with_resources(self.resources)
        .with_resistances(self.resistances)
        .with_armed(self.armed)
        .with_degradation(self.degradation);

        if let Some(hp) = self.hp {
            actor = actor.with_hp(hp);
        }
        Ok(actor)
    }
}

/// Loader for the player party from RON files.
pub struct PartyLoader;

impl PartyLoader {
    /// Load party specs from a RON file.
    ///
    /// RON format: `Vec<PartyMemberSpec>`
    pub fn load(path: &Path) -> LoadResult<Vec<PartyMemberSpec>> {
        let members: Vec<PartyMemberSpec> = read_ron(path, "party")?;
        Self::validate(&members)?;
        Ok(members)
    }

    /// Load the party and resolve every member against `env`.
    pub fn load_actors(path: &Path, env: &BattleEnv<'_>) -> LoadResult<Vec<Actor>> {
        let actors = Self::load(path)?
            .into_iter()
            .map(|member| member.into_actor(env))
            .collect::<LoadResult<Vec<_>>>()?;
        debug!(members = actors.len(), "loaded party");
        Ok(actors)
    }

    fn validate(members: &[PartyMemberSpec]) -> LoadResult<()> {
        if members.is_empty() {
            anyhow::bail!("Party is empty");
        }
        if members.len() > BattleConfig::MAX_PARTY_SIZE {
            anyhow::bail!(
                "Party has {} members, at most {} allowed",
                members.len(),
                BattleConfig::MAX_PARTY_SIZE
            );
        }

        let mut slots = BTreeSet::new();
        for member in members {
            if member.slot == 0 || usize::from(member.slot) > BattleConfig::MAX_PARTY_SIZE {
                anyhow::bail!(
                    "Party member '{}' has slot {}, expected 1..={}",
                    member.name,
                    member.slot,
                    BattleConfig::MAX_PARTY_SIZE
                );
            }
            if !slots.insert(member.slot) {
                anyhow::bail!("Party slot {} is used twice", member.slot);
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use battle_core::{DamageType, MasterDataSnapshot, SkillDefinition, SkillEffect};

    fn master_data() -> MasterDataSnapshot {
        MasterDataSnapshot::new()
            .with_skill(SkillDefinition::new(
                SkillId(1),
                "Iron Skin",
                vec![SkillEffect::DamageTaken {
                    damage_type: DamageType::Physical,
                    multiplier: 0.8,
                }],
            ))
            .with_skill(SkillDefinition::new(
                SkillId(2),
                "Heavy Hand",
                vec![SkillEffect::DamageDealt {
                    damage_type: DamageType::Physical,
                    multiplier: 1.5,
                }],
            ))
    }

    fn write_party(content: &str) -> tempfile::NamedTempFile {
        let file = tempfile::NamedTempFile::new().unwrap();
        std::fs::write(file.path(), content).unwrap();
        file
    }

    #[test]
    fn members_resolve_into_actors() {
        let file = write_party(
            r#"[
                (
                    name: "Knight",
                    slot: 2,
                    level: 8,
                    attributes: (strength: 18, wisdom: 6, spirit: 8, vitality: 16, agility: 11, luck: 9),
                    skills: [1, 2],
                    suppressed: [2],
                    hp: Some(50),
                ),
            ]"#,
        );
        let data = master_data();

        let actors = PartyLoader::load_actors(file.path(), &data.env()).unwrap();
        let knight = &actors[0];

        assert_eq!(knight.id, ActorId::player(2));
        assert_eq!(knight.side, Side::Player);
        assert_eq!(knight.max_hp(), 16 * 12 + 18 * 2 + 8 * 10);
        assert_eq!(knight.hp(), 50);
        assert_eq!(knight.action_rates, ActionRates::attack_only());
        assert_eq!(knight.effects.damage.taken.physical, 0.8);
        assert_eq!(knight.effects.damage.dealt.physical, 1.0);
    }

    #[test]
    fn explicit_snapshot_overrides_derivation() {
        let member = PartyMemberSpec {
            name: "Scout".into(),
            slot: 1,
            level: 3,
            attributes: BaseAttributes::uniform(10),
            snapshot: Some(CombatSnapshot {
                max_hp: 77,
                ..CombatSnapshot::default()
            }),
            skills: Vec::new(),
            granted: Vec::new(),
            suppressed: Vec::new(),
            action_rates: ActionRates::attack_only(),
            spells: SpellBook::default(),
            resources: ActionResources::default(),
            resistances: InnateResistances::neutral(),
            armed: false,
            hp: None,
            degradation: 0.0,
        };
        let data = master_data();

        let actor = member.into_actor(&data.env()).unwrap();
        assert_eq!(actor.max_hp(), 77);
        assert_eq!(actor.hp(), 77);
        assert!(!actor.armed);
    }

    #[test]
    fn unknown_skill_fails_with_member_name() {
        let file = write_party(
            r#"[(name: "Mage", slot: 1, level: 1,
                 attributes: (strength: 1, wisdom: 1, spirit: 1, vitality: 1, agility: 1, luck: 1),
                 skills: [42])]"#,
        );
        let data = master_data();

        let err = PartyLoader::load_actors(file.path(), &data.env()).unwrap_err();
        assert!(err.to_string().contains("Mage"), "{err}");
    }

    #[test]
    fn duplicate_and_out_of_range_slots_are_rejected() {
        let attrs = "(strength: 1, wisdom: 1, spirit: 1, vitality: 1, agility: 1, luck: 1)";
        let twice = write_party(&format!(
            "[(name: \"A\", slot: 1, level: 1, attributes: {attrs}),
              (name: \"B\", slot: 1, level: 1, attributes: {attrs})]"
        ));
        let err = PartyLoader::load(twice.path()).unwrap_err();
        assert!(err.to_string().contains("slot 1 is used twice"), "{err}");

        let beyond = write_party(&format!(
            "[(name: \"C\", slot: 7, level: 1, attributes: {attrs})]"
        ));
        assert!(PartyLoader::load(beyond.path()).is_err());
    }
}
