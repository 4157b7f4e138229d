//! Traits describing read-only master data.
//!
//! Oracles expose enemy, skill, spell and status definitions by id. The
//! [`BattleEnv`] aggregate bundles them so the engine can resolve references
//! without coupling to a concrete store. Lookups are in-memory; loading the
//! data is the caller's concern.
mod enemies;
mod error;
mod skills;
mod snapshot;
mod spells;
mod statuses;

pub use enemies::{EnemyDefinition, EnemyOracle};
pub use error::MasterDataError;
pub use skills::{SkillDefinition, SkillEffect, SkillOracle};
pub use snapshot::MasterDataSnapshot;
pub use spells::{SpellDefinition, SpellKind, SpellOracle, SpellSchool};
pub use statuses::{StatusDefinition, StatusOracle, StatusTags};

use crate::state::{EnemyId, SkillId, SpellId, StatusId};

/// Aggregates the read-only oracles required by the builder, the skill
/// compiler and the engine.
#[derive(Clone, Copy)]
pub struct BattleEnv<'a> {
    enemies: &'a dyn EnemyOracle,
    skills: &'a dyn SkillOracle,
    spells: &'a dyn SpellOracle,
    statuses: &'a dyn StatusOracle,
}

impl<'a> BattleEnv<'a> {
    pub fn new(
        enemies: &'a dyn EnemyOracle,
        skills: &'a dyn SkillOracle,
        spells: &'a dyn SpellOracle,
        statuses: &'a dyn StatusOracle,
    ) -> Self {
        Self {
            enemies,
            skills,
            spells,
            statuses,
        }
    }

    /// # Errors
    ///
    /// Returns `MasterDataError::EnemyNotFound` if the id is unknown.
    pub fn enemy(&self, id: EnemyId) -> Result<&'a EnemyDefinition, MasterDataError> {
        self.enemies
            .enemy(id)
            .ok_or(MasterDataError::EnemyNotFound(id))
    }

    /// # Errors
    ///
    /// Returns `MasterDataError::SkillNotFound` if the id is unknown.
    pub fn skill(&self, id: SkillId) -> Result<&'a SkillDefinition, MasterDataError> {
        self.skills
            .skill(id)
            .ok_or(MasterDataError::SkillNotFound(id))
    }

    /// # Errors
    ///
    /// Returns `MasterDataError::SpellNotFound` if the id is unknown.
    pub fn spell(&self, id: SpellId) -> Result<&'a SpellDefinition, MasterDataError> {
        self.spells
            .spell(id)
            .ok_or(MasterDataError::SpellNotFound(id))
    }

    /// # Errors
    ///
    /// Returns `MasterDataError::StatusNotFound` if the id is unknown.
    pub fn status(&self, id: StatusId) -> Result<&'a StatusDefinition, MasterDataError> {
        self.statuses
            .status(id)
            .ok_or(MasterDataError::StatusNotFound(id))
    }
}

impl core::fmt::Debug for BattleEnv<'_> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("BattleEnv").finish_non_exhaustive()
    }
}
