//! In-memory master data.
//!
//! [`MasterDataSnapshot`] is the resolved dictionary the engine reads from. It
//! implements every oracle trait so a single value can back a [`BattleEnv`].

use std::collections::BTreeMap;

use super::{
    BattleEnv, EnemyDefinition, EnemyOracle, SkillDefinition, SkillOracle, SpellDefinition,
    SpellOracle, StatusDefinition, StatusOracle,
};
use crate::state::{EnemyId, SkillId, SpellId, StatusId};

#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct MasterDataSnapshot {
    pub enemies: BTreeMap<EnemyId, EnemyDefinition>,
    pub skills: BTreeMap<SkillId, SkillDefinition>,
    pub spells: BTreeMap<SpellId, SpellDefinition>,
    pub statuses: BTreeMap<StatusId, StatusDefinition>,
}

impl MasterDataSnapshot {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_enemy(mut self, definition: EnemyDefinition) -> Self {
        self.insert_enemy(definition);
        self
    }

    pub fn with_skill(mut self, definition: SkillDefinition) -> Self {
        self.insert_skill(definition);
        self
    }

    pub fn with_spell(mut self, definition: SpellDefinition) -> Self {
        self.insert_spell(definition);
        self
    }

    pub fn with_status(mut self, definition: StatusDefinition) -> Self {
        self.insert_status(definition);
        self
    }

    pub fn insert_enemy(&mut self, definition: EnemyDefinition) {
        self.enemies.insert(definition.id, definition);
    }

    pub fn insert_skill(&mut self, definition: SkillDefinition) {
        self.skills.insert(definition.id, definition);
    }

    pub fn insert_spell(&mut self, definition: SpellDefinition) {
        self.spells.insert(definition.id, definition);
    }

    pub fn insert_status(&mut self, definition: StatusDefinition) {
        self.statuses.insert(definition.id, definition);
    }

    /// Borrow this snapshot as a complete environment.
    pub fn env(&self) -> BattleEnv<'_> {
        BattleEnv::new(self, self, self, self)
    }
}

impl EnemyOracle for MasterDataSnapshot {
    fn enemy(&self, id: EnemyId) -> Option<&EnemyDefinition> {
        self.enemies.get(&id)
    }
}

impl SkillOracle for MasterDataSnapshot {
    fn skill(&self, id: SkillId) -> Option<&SkillDefinition> {
        self.skills.get(&id)
    }
}

impl SpellOracle for MasterDataSnapshot {
    fn spell(&self, id: SpellId) -> Option<&SpellDefinition> {
        self.spells.get(&id)
    }
}

impl StatusOracle for MasterDataSnapshot {
    fn status(&self, id: StatusId) -> Option<&StatusDefinition> {
        self.statuses.get(&id)
    }
}
