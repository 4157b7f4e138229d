//! Healing amounts.

use crate::random::{RandomSource, stat_multiplier};
use crate::skill::SkillEffects;

use super::view::CombatView;

/// HP restored by one heal.
///
/// ```text
/// amount = healing_power × power × stat_multiplier(healer.luck)
///          × healer.healing_given × target.healing_received
/// ```
///
/// Floored at 1. The caller clamps to the target's missing HP.
pub fn heal_amount(
    rng: &mut impl RandomSource,
    healer: &CombatView,
    healer_effects: &SkillEffects,
    power: f64,
    target: &CombatView,
) -> u32 {
    let amount = healer.healing_power
        * power
        * stat_multiplier(rng, healer.luck)
        * healer_effects.misc.healing_given
        * target.healing_received;
    if amount.is_finite() {
        amount.round().max(1.0) as u32
    } else {
        1
    }
}
