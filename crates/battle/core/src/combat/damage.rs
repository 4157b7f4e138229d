//! Damage calculation for the three damage types.
//!
//! Each function consumes random draws in a fixed order so replays stay
//! aligned. Results go through [`apply_mitigation`] and are floored at 1; only
//! a nullified spell deals 0.

use crate::config::CombatRules;
use crate::env::SpellSchool;
use crate::random::{RandomSource, percent_chance, speed_multiplier, stat_multiplier};
use crate::skill::{Reaction, SkillEffects, SpecialAttack};
use crate::state::{DamageType, InnateResistances, SpellId};

use super::mitigation::{Mitigation, apply_mitigation};
use super::view::CombatView;

// ============================================================================
// Inputs
// ============================================================================

/// Read-only combat inputs of one side of an exchange.
#[derive(Clone, Copy, Debug)]
pub struct Combatant<'a> {
    pub view: &'a CombatView,
    pub effects: &'a SkillEffects,
    pub resistances: &'a InnateResistances,
}

/// Per-hit modifiers of a physical strike.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Strike {
    pub damage_multiplier: f64,
    pub ignore_defense: bool,
}

impl Strike {
    pub const BASIC: Self = Self {
        damage_multiplier: 1.0,
        ignore_defense: false,
    };

    pub fn special(special: &SpecialAttack) -> Self {
        Self {
            damage_multiplier: special.damage_multiplier,
            ignore_defense: special.ignore_defense,
        }
    }

    pub fn reaction(reaction: &Reaction) -> Self {
        Self {
            damage_multiplier: reaction.damage_multiplier,
            ignore_defense: false,
        }
    }
}

/// Offensive spell parameters.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SpellCast {
    pub spell: SpellId,
    pub school: SpellSchool,
    pub power: f64,
}

// ============================================================================
// Outcome
// ============================================================================

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DamageOutcome {
    pub amount: u32,
    pub damage_type: DamageType,
    pub critical: bool,
    pub barrier: bool,
    pub guarded: bool,
    pub nullified: bool,
}

impl DamageOutcome {
    fn nullified(damage_type: DamageType) -> Self {
        Self {
            amount: 0,
            damage_type,
            critical: false,
            barrier: false,
            guarded: false,
            nullified: true,
        }
    }

    fn finish(
        value: f64,
        damage_type: DamageType,
        critical: bool,
        mitigation: &mut Mitigation<'_>,
    ) -> Self {
        let mitigated = apply_mitigation(value, damage_type, mitigation);
        let amount = if mitigated.value.is_finite() {
            mitigated.value.round().max(1.0) as u32
        } else {
            1
        };
        Self {
            amount,
            damage_type,
            critical,
            barrier: mitigated.barrier,
            guarded: mitigated.guarded,
            nullified: false,
        }
    }
}

// ============================================================================
// Formulas
// ============================================================================

/// Physical damage of one hit.
///
/// # Formula
///
/// ```text
/// attack   = physical_attack × stat_multiplier(att.luck) × strike.damage_multiplier
///            × martial_multiplier (unarmed only)
/// critical = percent_chance(critical_rate + critical_bonus)
/// defense  = physical_defense × stat_multiplier(def.luck) × (0.5 if critical)
///            (0 when the strike ignores defense)
/// base     = max(1, attack − defense) × (critical multipliers if critical)
/// value    = base × dealt.physical × taken.physical × innate.physical
/// ```
///
/// Draw order: attack roll, defense roll, critical check.
pub fn physical_damage(
    rng: &mut impl RandomSource,
    attacker: &Combatant<'_>,
    defender: &Combatant<'_>,
    mitigation: &mut Mitigation<'_>,
    rules: &CombatRules,
    strike: Strike,
) -> DamageOutcome {
    let damage = &attacker.effects.damage;

    let mut attack = attacker.view.physical_attack
        * stat_multiplier(rng, attacker.view.luck)
        * strike.damage_multiplier;
    if !attacker.view.armed {
        attack *= damage.martial_multiplier;
    }

    let defense_roll = stat_multiplier(rng, defender.view.luck);
    let critical = percent_chance(rng, attacker.view.critical_rate + damage.critical_bonus);

    let defense = if strike.ignore_defense {
        0.0
    } else if critical {
        defender.view.physical_defense * defense_roll * CombatRules::CRITICAL_DEFENSE_SCALE
    } else {
        defender.view.physical_defense * defense_roll
    };

    let mut base = (attack - defense).max(1.0);
    if critical {
        base *= rules.critical_multiplier * damage.critical_multiplier * defender.resistances.critical;
    }

    let value = base
        * damage.dealt.physical
        * defender.effects.damage.taken.physical
        * defender.resistances.physical;
    DamageOutcome::finish(value, DamageType::Physical, critical, mitigation)
}

/// Damage of an offensive spell on one target.
///
/// # Formula
///
/// ```text
/// nullified = percent_chance(def.magic_nullify_chance)       → exactly 0
/// attack    = magical_attack × stat_multiplier(att.luck) × power × school_power
/// defense   = magical_defense × stat_multiplier(def.luck) × 0.5
/// critical  = percent_chance(magic_critical_chance)
/// base      = max(1, attack − defense) × (critical multipliers if critical)
/// value     = base × dealt.magical × taken.magical × innate(spell or magical)
/// ```
///
/// Draw order: nullify check, attack roll, defense roll, critical check.
pub fn magical_damage(
    rng: &mut impl RandomSource,
    attacker: &Combatant<'_>,
    defender: &Combatant<'_>,
    mitigation: &mut Mitigation<'_>,
    rules: &CombatRules,
    cast: SpellCast,
) -> DamageOutcome {
    if percent_chance(rng, defender.effects.damage.magic_nullify_chance) {
        return DamageOutcome::nullified(DamageType::Magical);
    }

    let spell = &attacker.effects.spell;
    let school_power = match cast.school {
        SpellSchool::Priest => spell.priest_power,
        SpellSchool::Mage => spell.mage_power,
    };

    let attack =
        attacker.view.magical_attack * stat_multiplier(rng, attacker.view.luck) * cast.power * school_power;
    let defense = defender.view.magical_defense
        * stat_multiplier(rng, defender.view.luck)
        * CombatRules::MAGIC_DEFENSE_SCALE;
    let critical = percent_chance(rng, spell.magic_critical_chance);

    let mut base = (attack - defense).max(1.0);
    if critical {
        base *= rules.critical_multiplier
            * spell.magic_critical_multiplier
            * defender.resistances.critical;
    }

    let value = base
        * attacker.effects.damage.dealt.magical
        * defender.effects.damage.taken.magical
        * defender.resistances.for_spell(cast.spell);
    DamageOutcome::finish(value, DamageType::Magical, critical, mitigation)
}

/// Breath damage on one target. No defense and no critical.
///
/// ```text
/// value = breath_damage × speed_multiplier(att.luck) × innate.breath
///         × dealt.breath × taken.breath
/// ```
pub fn breath_damage(
    rng: &mut impl RandomSource,
    attacker: &Combatant<'_>,
    defender: &Combatant<'_>,
    mitigation: &mut Mitigation<'_>,
) -> DamageOutcome {
    let value = attacker.view.breath_damage
        * speed_multiplier(rng, attacker.view.luck)
        * defender.resistances.breath
        * attacker.effects.damage.dealt.breath
        * defender.effects.damage.taken.breath;
    DamageOutcome::finish(value, DamageType::Breath, false, mitigation)
}
