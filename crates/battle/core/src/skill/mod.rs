//! Skill effect model.
//!
//! - [`SkillEffects`]: the flat, per-actor bundle every formula consumes
//! - [`SkillCompiler`]: folds skill definitions into that bundle before battle

mod compiler;
mod effects;

pub use compiler::SkillCompiler;
pub use effects::{
    AutoRepair, AutoRevive, BuffTrigger, CombatEffects, DamageEffects, DamageMultipliers,
    ExtraAction, ForcedRevive, MiscEffects, Reaction, ReactionTrigger, Rescue, ResurrectionEffects,
    Retreat, ScalingStat, SkillEffects, SpecialAttack, SpellEffects, StatusEffectsConfig,
    StatusResistance, TimedBuff,
};
