use crate::skill::{
    AutoRepair, AutoRevive, ExtraAction, ForcedRevive, Reaction, Rescue, Retreat, SpecialAttack,
    TimedBuff,
};
use crate::state::{DamageType, SkillId, StatusId};

use super::SpellSchool;

/// Oracle providing skill definitions.
pub trait SkillOracle: Send + Sync {
    fn skill(&self, id: SkillId) -> Option<&SkillDefinition>;
}

/// A learnable skill: a named list of effect rows.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SkillDefinition {
    pub id: SkillId,
    pub name: String,
    pub effects: Vec<SkillEffect>,
}

impl SkillDefinition {
    pub fn new(id: SkillId, name: impl Into<String>, effects: Vec<SkillEffect>) -> Self {
        Self {
            id,
            name: name.into(),
            effects,
        }
    }
}

/// One effect row of a skill. Each variant feeds exactly one field of
/// [`SkillEffects`](crate::skill::SkillEffects).
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum SkillEffect {
    // ----- damage -----
    DamageDealt {
        damage_type: DamageType,
        multiplier: f64,
    },
    DamageTaken {
        damage_type: DamageType,
        multiplier: f64,
    },
    CriticalBonus {
        percent: f64,
    },
    CriticalMultiplier {
        multiplier: f64,
    },
    MartialBonus {
        multiplier: f64,
    },
    Accuracy {
        multiplier: f64,
    },
    MagicNullify {
        chance: f64,
    },

    // ----- combat -----
    SpecialAttack(SpecialAttack),
    Reaction(Reaction),
    ExtraAction(ExtraAction),
    Parry {
        bonus: f64,
    },
    ShieldBlock {
        bonus: f64,
    },
    Barrier {
        damage_type: DamageType,
        charges: u32,
    },
    GuardBarrier {
        damage_type: DamageType,
        charges: u32,
    },
    EnemyActionDebuff {
        chance: f64,
    },
    AntiHealing,
    AttackCount {
        multiplier: f64,
    },

    // ----- spell -----
    SpellPower {
        school: SpellSchool,
        multiplier: f64,
    },
    MagicCritical {
        chance: f64,
        multiplier: f64,
    },
    ChargeRecovery {
        chance: f64,
    },
    ExtraCharges {
        school: SpellSchool,
        charges: u32,
    },

    // ----- status -----
    StatusResistance {
        status: StatusId,
        multiplier: f64,
        additive_percent: f64,
    },
    StatusInfliction {
        multiplier: f64,
    },
    TimedBuff(TimedBuff),

    // ----- resurrection -----
    Rescue(Rescue),
    AutoRevive(AutoRevive),
    ForcedRevive(ForcedRevive),
    Necromancer {
        interval: u32,
    },
    Sacrifice {
        interval: u32,
    },

    // ----- misc -----
    HealingGiven {
        multiplier: f64,
    },
    HealingReceived {
        multiplier: f64,
    },
    TargetingWeight {
        multiplier: f64,
    },
    Cover,
    Retreat(Retreat),
    AutoRepair(AutoRepair),
    Regeneration {
        percent: f64,
    },
}
