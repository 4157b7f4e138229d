//! Master data loader.
//!
//! Reads enemy, skill, spell and status definitions from RON lists and folds
//! them into a [`MasterDataSnapshot`].

use std::collections::BTreeSet;
use std::fmt::Display;
use std::path::Path;

use battle_core::{
    EnemyDefinition, MasterDataSnapshot, SkillDefinition, SkillEffect, SpellDefinition, SpellKind,
    StatusDefinition, StatusId,
};
use tracing::debug;

use crate::loaders::{LoadResult, read_ron};

/// Loader for master data from RON files.
pub struct MasterDataLoader;

impl MasterDataLoader {
    /// Load master data from the four RON files in `dir`.
    ///
    /// RON format of each file: `Vec<Definition>`.
    ///
    /// # Errors
    ///
    /// Fails on unreadable or malformed files, duplicate ids within a file,
    /// and references to skills, spells or statuses that are not defined.
    pub fn load(dir: &Path) -> LoadResult<MasterDataSnapshot> {
        let enemies: Vec<EnemyDefinition> = read_ron(&dir.join("enemies.ron"), "enemy")?;
        let skills: Vec<SkillDefinition> = read_ron(&dir.join("skills.ron"), "skill")?;
        let spells: Vec<SpellDefinition> = read_ron(&dir.join("spells.ron"), "spell")?;
        let statuses: Vec<StatusDefinition> = read_ron(&dir.join("statuses.ron"), "status")?;

        let snapshot = Self::assemble(enemies, skills, spells, statuses)?;
        debug!(
            enemies = snapshot.enemies.len(),
            skills = snapshot.skills.len(),
            spells = snapshot.spells.len(),
            statuses = snapshot.statuses.len(),
            "loaded master data"
        );
        Ok(snapshot)
    }

    /// Builds a snapshot from parsed definitions and checks its references.
    pub fn assemble(
        enemies: Vec<EnemyDefinition>,
        skills: Vec<SkillDefinition>,
        spells: Vec<SpellDefinition>,
        statuses: Vec<StatusDefinition>,
    ) -> LoadResult<MasterDataSnapshot> {
        ensure_unique("enemy", enemies.iter().map(|d| d.id))?;
        ensure_unique("skill", skills.iter().map(|d| d.id))?;
        ensure_unique("spell", spells.iter().map(|d| d.id))?;
        ensure_unique("status", statuses.iter().map(|d| d.id))?;

        let mut snapshot = MasterDataSnapshot::new();
        enemies.into_iter().for_each(|d| snapshot.insert_enemy(d));
        skills.into_iter().for_each(|d| snapshot.insert_skill(d));
        spells.into_iter().for_each(|d| snapshot.insert_spell(d));
        statuses.into_iter().for_each(|d| snapshot.insert_status(d));

        Self::validate(&snapshot)?;
        Ok(snapshot)
    }

    /// Checks that every id referenced by a definition resolves.
    pub fn validate(snapshot: &MasterDataSnapshot) -> LoadResult<()> {
        let env = snapshot.env();

        for enemy in snapshot.enemies.values() {
            for &skill in &enemy.skill_ids {
                env.skill(skill)
                    .map_err(|e| anyhow::anyhow!("Enemy '{}': {}", enemy.name, e))?;
            }
            for &spell in enemy.spells.priest.iter().chain(&enemy.spells.mage) {
                env.spell(spell)
                    .map_err(|e| anyhow::anyhow!("Enemy '{}': {}", enemy.name, e))?;
            }
        }

        for spell in snapshot.spells.values() {
            if let SpellKind::Inflict { status, .. } = spell.kind {
                env.status(status)
                    .map_err(|e| anyhow::anyhow!("Spell '{}': {}", spell.name, e))?;
            }
        }

        for skill in snapshot.skills.values() {
            for status in skill.effects.iter().filter_map(referenced_status) {
                env.status(status)
                    .map_err(|e| anyhow::anyhow!("Skill '{}': {}", skill.name, e))?;
            }
        }

        Ok(())
    }
}

fn referenced_status(effect: &SkillEffect) -> Option<StatusId> {
    match effect {
        SkillEffect::SpecialAttack(special) => special.inflict.map(|(status, _)| status),
        SkillEffect::StatusResistance { status, .. } => Some(*status),
        _ => None,
    }
}

fn ensure_unique<I, T>(what: &str, ids: I) -> LoadResult<()>
where
    I: IntoIterator<Item = T>,
    T: Ord + Display,
{
    let mut seen = BTreeSet::new();
    for id in ids {
        if seen.contains(&id) {
            anyhow::bail!("Duplicate {} definition {}", what, id);
        }
        seen.insert(id);
    }
    Ok(())
}
