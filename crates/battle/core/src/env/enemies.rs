use crate::state::{
    ActionRates, ActionResources, BaseAttributes, EnemyId, InnateResistances, SkillId, SpellBook,
};

/// Oracle providing enemy definitions.
pub trait EnemyOracle: Send + Sync {
    fn enemy(&self, id: EnemyId) -> Option<&EnemyDefinition>;
}

/// Static definition of an enemy kind.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct EnemyDefinition {
    pub id: EnemyId,
    pub name: String,
    pub attributes: BaseAttributes,
    pub base_experience: u32,
    #[cfg_attr(feature = "serde", serde(default))]
    pub is_boss: bool,
    #[cfg_attr(feature = "serde", serde(default))]
    pub resistances: InnateResistances,
    #[cfg_attr(feature = "serde", serde(default))]
    pub skill_ids: Vec<SkillId>,
    pub action_rates: ActionRates,
    #[cfg_attr(feature = "serde", serde(default))]
    pub spells: SpellBook,
    #[cfg_attr(feature = "serde", serde(default))]
    pub resources: ActionResources,
    #[cfg_attr(feature = "serde", serde(default = "armed_by_default"))]
    pub armed: bool,
}

impl EnemyDefinition {
    /// Minimal definition with the given attributes; other fields neutral.
    pub fn new(id: EnemyId, name: impl Into<String>, attributes: BaseAttributes) -> Self {
        Self {
            id,
            name: name.into(),
            attributes,
            base_experience: 0,
            is_boss: false,
            resistances: InnateResistances::neutral(),
            skill_ids: Vec::new(),
            action_rates: ActionRates::attack_only(),
            spells: SpellBook::default(),
            resources: ActionResources::default(),
            armed: true,
        }
    }
}

#[cfg(feature = "serde")]
fn armed_by_default() -> bool {
    true
}
