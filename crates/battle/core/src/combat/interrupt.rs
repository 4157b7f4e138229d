//! Parry and shield block.
//!
//! Both stop the remaining hits of a physical action. They are rolled after a
//! landed hit while more hits remain; parry is checked first.

use crate::config::CombatRules;
use crate::random::{RandomSource, percent_chance};
use crate::skill::CombatEffects;

use super::view::CombatView;

#[derive(Clone, Copy, Debug, PartialEq, Eq, strum::IntoStaticStr)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "snake_case")]
pub enum Interrupt {
    Parry,
    ShieldBlock,
}

impl Interrupt {
    pub fn as_str(self) -> &'static str {
        self.into()
    }
}

/// `10 + defender.additional_damage × 0.25 + bonus`
pub fn parry_chance(defender: &CombatView, bonus: f64) -> f64 {
    CombatRules::PARRY_BASE_CHANCE + defender.additional_damage * 0.25 + bonus
}

/// `30 − attacker.additional_damage / 2 + bonus`
pub fn shield_block_chance(attacker: &CombatView, bonus: f64) -> f64 {
    CombatRules::SHIELD_BLOCK_BASE_CHANCE - attacker.additional_damage / 2.0 + bonus
}

/// Rolls the defender's interrupts in order. Capabilities the defender lacks
/// consume no draw.
pub fn roll_interrupt(
    rng: &mut impl RandomSource,
    attacker: &CombatView,
    defender: &CombatView,
    defender_effects: &CombatEffects,
) -> Option<Interrupt> {
    if let Some(bonus) = defender_effects.parry {
        if percent_chance(rng, parry_chance(defender, bonus)) {
            return Some(Interrupt::Parry);
        }
    }
    if let Some(bonus) = defender_effects.shield_block {
        if percent_chance(rng, shield_block_chance(attacker, bonus)) {
            return Some(Interrupt::ShieldBlock);
        }
    }
    None
}
