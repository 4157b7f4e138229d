use crate::state::{DamageType, SpellId, StatusId};

/// Oracle providing spell definitions.
pub trait SpellOracle: Send + Sync {
    fn spell(&self, id: SpellId) -> Option<&SpellDefinition>;
}

/// The two spell schools; each has its own charge pool.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, strum::IntoStaticStr)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "snake_case")]
pub enum SpellSchool {
    Priest,
    Mage,
}

#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SpellDefinition {
    pub id: SpellId,
    pub name: String,
    pub school: SpellSchool,
    /// Higher tiers are preferred when several spells are castable.
    pub tier: u32,
    pub kind: SpellKind,
}

#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum SpellKind {
    Damage { power: f64, all_targets: bool },
    Heal { power: f64, all_targets: bool },
    Barrier { damage_type: DamageType, charges: u32 },
    Inflict {
        status: StatusId,
        base_chance: f64,
        all_targets: bool,
    },
}

impl SpellKind {
    /// Spells aimed at allies rather than opponents.
    pub fn is_supportive(&self) -> bool {
        matches!(self, SpellKind::Heal { .. } | SpellKind::Barrier { .. })
    }
}
