//! Compiled skill effect bundle.
//!
//! Every skill an actor knows is folded into one [`SkillEffects`] value before
//! the battle. The engine reads named fields only and never branches on which
//! skill produced them.

use std::collections::BTreeMap;

use crate::state::{BarrierCharges, DamageType, StatModifiers, StatusId};

/// Aggregate of all skill-derived modifiers for one actor.
///
/// [`SkillEffects::neutral`] is the identity: multipliers 1.0, chances 0,
/// lists empty.
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct SkillEffects {
    pub damage: DamageEffects,
    pub combat: CombatEffects,
    pub spell: SpellEffects,
    pub status: StatusEffectsConfig,
    pub resurrection: ResurrectionEffects,
    pub misc: MiscEffects,
}

impl SkillEffects {
    pub fn neutral() -> Self {
        Self::default()
    }
}

// ============================================================================
// Damage
// ============================================================================

/// Per-damage-type multipliers.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct DamageMultipliers {
    pub physical: f64,
    pub magical: f64,
    pub breath: f64,
}

impl DamageMultipliers {
    pub const NEUTRAL: Self = Self {
        physical: 1.0,
        magical: 1.0,
        breath: 1.0,
    };

    pub fn get(&self, damage_type: DamageType) -> f64 {
        match damage_type {
            DamageType::Physical => self.physical,
            DamageType::Magical => self.magical,
            DamageType::Breath => self.breath,
        }
    }

    pub fn scale(&mut self, damage_type: DamageType, multiplier: f64) {
        match damage_type {
            DamageType::Physical => self.physical *= multiplier,
            DamageType::Magical => self.magical *= multiplier,
            DamageType::Breath => self.breath *= multiplier,
        }
    }
}

impl Default for DamageMultipliers {
    fn default() -> Self {
        Self::NEUTRAL
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct DamageEffects {
    pub dealt: DamageMultipliers,
    pub taken: DamageMultipliers,
    /// Added to the critical rate, in percent.
    pub critical_bonus: f64,
    pub critical_multiplier: f64,
    /// Physical attack multiplier for unarmed actors.
    pub martial_multiplier: f64,
    pub accuracy_multiplier: f64,
    /// Chance in percent that an incoming spell is nullified outright.
    pub magic_nullify_chance: f64,
}

impl Default for DamageEffects {
    fn default() -> Self {
        Self {
            dealt: DamageMultipliers::NEUTRAL,
            taken: DamageMultipliers::NEUTRAL,
            critical_bonus: 0.0,
            critical_multiplier: 1.0,
            martial_multiplier: 1.0,
            accuracy_multiplier: 1.0,
            magic_nullify_chance: 0.0,
        }
    }
}

// ============================================================================
// Combat
// ============================================================================

/// Chance-gated bonus layered onto a basic attack.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SpecialAttack {
    pub label: String,
    pub chance: f64,
    #[cfg_attr(feature = "serde", serde(default = "one"))]
    pub damage_multiplier: f64,
    #[cfg_attr(feature = "serde", serde(default = "one"))]
    pub hit_multiplier: f64,
    #[cfg_attr(feature = "serde", serde(default))]
    pub ignore_defense: bool,
    /// Status and base chance (percent) inflicted on each landed hit.
    #[cfg_attr(feature = "serde", serde(default))]
    pub inflict: Option<(StatusId, f64)>,
}

/// Events that can provoke a reaction.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, strum::IntoStaticStr)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "snake_case")]
pub enum ReactionTrigger {
    PhysicalDamageTaken,
    MagicalDamageTaken,
    BreathDamageTaken,
    AllyDefeated,
}

impl ReactionTrigger {
    /// Trigger fired by taking damage of `damage_type`.
    pub fn for_damage(damage_type: DamageType) -> Self {
        match damage_type {
            DamageType::Physical => Self::PhysicalDamageTaken,
            DamageType::Magical => Self::MagicalDamageTaken,
            DamageType::Breath => Self::BreathDamageTaken,
        }
    }
}

/// Counter-attack against the actor that provoked it.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Reaction {
    pub label: String,
    pub trigger: ReactionTrigger,
    pub chance: f64,
    #[cfg_attr(feature = "serde", serde(default = "one"))]
    pub damage_multiplier: f64,
    #[cfg_attr(feature = "serde", serde(default = "one"))]
    pub hit_multiplier: f64,
}

/// Chance of taking `count` additional actions in a turn.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ExtraAction {
    pub chance: f64,
    pub count: u32,
}

#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct CombatEffects {
    pub special_attacks: Vec<SpecialAttack>,
    pub reactions: Vec<Reaction>,
    pub extra_actions: Vec<ExtraAction>,
    /// Parry enabled, with bonus chance in percent.
    pub parry: Option<f64>,
    /// Shield block enabled, with bonus chance in percent.
    pub shield_block: Option<f64>,
    /// Barrier charges granted at battle start.
    pub barrier: BarrierCharges,
    /// Barrier charges that only apply while guarding.
    pub guard_barrier: BarrierCharges,
    /// Chance in percent that each opponent loses its action.
    pub enemy_action_debuff_chance: f64,
    /// Basic attacks apply a healing reduction instead of damage.
    pub anti_healing: bool,
    pub attack_count_multiplier: f64,
}

impl Default for CombatEffects {
    fn default() -> Self {
        Self {
            special_attacks: Vec::new(),
            reactions: Vec::new(),
            extra_actions: Vec::new(),
            parry: None,
            shield_block: None,
            barrier: BarrierCharges::default(),
            guard_barrier: BarrierCharges::default(),
            enemy_action_debuff_chance: 0.0,
            anti_healing: false,
            attack_count_multiplier: 1.0,
        }
    }
}

// ============================================================================
// Spell
// ============================================================================

#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct SpellEffects {
    pub priest_power: f64,
    pub mage_power: f64,
    pub magic_critical_chance: f64,
    pub magic_critical_multiplier: f64,
    /// Chance in percent, per school, of recovering one charge at turn end.
    pub charge_recovery_chance: f64,
    pub extra_priest_charges: u32,
    pub extra_mage_charges: u32,
}

impl Default for SpellEffects {
    fn default() -> Self {
        Self {
            priest_power: 1.0,
            mage_power: 1.0,
            magic_critical_chance: 0.0,
            magic_critical_multiplier: 1.0,
            charge_recovery_chance: 0.0,
            extra_priest_charges: 0,
            extra_mage_charges: 0,
        }
    }
}

// ============================================================================
// Status
// ============================================================================

/// Resistance record for one status id.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct StatusResistance {
    pub multiplier: f64,
    #[cfg_attr(feature = "serde", serde(default))]
    pub additive_percent: f64,
}

impl StatusResistance {
    pub const NEUTRAL: Self = Self {
        multiplier: 1.0,
        additive_percent: 0.0,
    };
    pub const IMMUNE: Self = Self {
        multiplier: 0.0,
        additive_percent: 0.0,
    };

    pub const fn new(multiplier: f64, additive_percent: f64) -> Self {
        Self {
            multiplier,
            additive_percent,
        }
    }
}

impl Default for StatusResistance {
    fn default() -> Self {
        Self::NEUTRAL
    }
}

/// When a timed buff fires, keyed on the turn number.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum BuffTrigger {
    OnTurn(u32),
    EveryTurns(u32),
    FromTurn(u32),
}

impl BuffTrigger {
    pub fn matches(&self, turn: u32) -> bool {
        match *self {
            BuffTrigger::OnTurn(n) => turn == n,
            BuffTrigger::EveryTurns(n) => n > 0 && turn % n == 0,
            BuffTrigger::FromTurn(n) => turn >= n,
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TimedBuff {
    pub label: String,
    pub trigger: BuffTrigger,
    pub modifiers: StatModifiers,
}

#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct StatusEffectsConfig {
    pub resistances: BTreeMap<StatusId, StatusResistance>,
    /// Scales the chance of statuses this actor inflicts.
    pub infliction_multiplier: f64,
    pub timed_buffs: Vec<TimedBuff>,
}

impl StatusEffectsConfig {
    pub fn resistance(&self, status: StatusId) -> StatusResistance {
        self.resistances.get(&status).copied().unwrap_or_default()
    }
}

impl Default for StatusEffectsConfig {
    fn default() -> Self {
        Self {
            resistances: BTreeMap::new(),
            infliction_multiplier: 1.0,
            timed_buffs: Vec::new(),
        }
    }
}

// ============================================================================
// Resurrection
// ============================================================================

/// Stat a revival amount scales with.
#[derive(Clone, Copy, Debug, PartialEq, Eq, strum::IntoStaticStr)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "snake_case")]
pub enum ScalingStat {
    HealingPower,
    MaxHp,
    MagicalAttack,
}

/// Revive fallen allies when they drop.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Rescue {
    pub chance: f64,
    pub uses_per_turn: u32,
    /// Restored HP = healing power × scale.
    pub hp_scale: f64,
}

/// Chance-based self revival, capped per battle.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AutoRevive {
    pub chance: f64,
    pub max_triggers: u32,
    pub stat: ScalingStat,
    pub scale: f64,
}

/// Guaranteed self revival, capped per battle.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ForcedRevive {
    pub max_triggers: u32,
    pub hp_ratio: f64,
}

#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct ResurrectionEffects {
    pub rescue: Option<Rescue>,
    pub auto_revive: Vec<AutoRevive>,
    pub forced_revive: Option<ForcedRevive>,
    pub necromancer_interval: Option<u32>,
    pub sacrifice_interval: Option<u32>,
}

// ============================================================================
// Misc
// ============================================================================

#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Retreat {
    /// First turn on which the retreat roll is made.
    pub turn: u32,
    pub chance: f64,
}

/// Automatic reduction of degradation at turn start.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AutoRepair {
    pub chance: f64,
    pub min: u32,
    pub max: u32,
}

#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct MiscEffects {
    pub healing_given: f64,
    pub healing_received: f64,
    /// Relative likelihood of being chosen as a target.
    pub targeting_weight: f64,
    /// Takes hits aimed at badly wounded allies.
    pub cover: bool,
    pub retreat: Option<Retreat>,
    pub auto_repair: Option<AutoRepair>,
    /// Percent of max HP restored at turn end.
    pub regeneration_percent: f64,
}

impl Default for MiscEffects {
    fn default() -> Self {
        Self {
            healing_given: 1.0,
            healing_received: 1.0,
            targeting_weight: 1.0,
            cover: false,
            retreat: None,
            auto_repair: None,
            regeneration_percent: 0.0,
        }
    }
}

#[cfg(feature = "serde")]
fn one() -> f64 {
    1.0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn neutral_bundle_is_identity() {
        let neutral = SkillEffects::neutral();
        assert_eq!(neutral.damage.dealt, DamageMultipliers::NEUTRAL);
        assert_eq!(neutral.damage.critical_multiplier, 1.0);
        assert_eq!(neutral.damage.magic_nullify_chance, 0.0);
        assert_eq!(neutral.spell.priest_power, 1.0);
        assert_eq!(neutral.status.infliction_multiplier, 1.0);
        assert_eq!(neutral.misc.targeting_weight, 1.0);
        assert!(neutral.combat.reactions.is_empty());
        assert!(neutral.resurrection.rescue.is_none());
    }

    #[test]
    fn buff_triggers_match_turns() {
        assert!(BuffTrigger::OnTurn(3).matches(3));
        assert!(!BuffTrigger::OnTurn(3).matches(6));
        assert!(BuffTrigger::EveryTurns(3).matches(6));
        assert!(!BuffTrigger::EveryTurns(0).matches(0));
        assert!(BuffTrigger::FromTurn(2).matches(9));
        assert!(!BuffTrigger::FromTurn(2).matches(1));
    }

    #[test]
    fn missing_resistance_is_neutral() {
        let config = StatusEffectsConfig::default();
        assert_eq!(config.resistance(StatusId(4)), StatusResistance::NEUTRAL);
    }
}
