//! Hit chance and hit count.

use crate::config::CombatRules;
use crate::random::{RandomSource, percent_chance};

use super::view::CombatView;

/// Chance in percent that a physical hit lands.
///
/// # Formula
///
/// ```text
/// hit_chance = hit_rate × accuracy_multiplier − evasion_rate
/// clamped to [rules.min_hit_chance, rules.max_hit_chance]
/// ```
pub fn hit_chance(
    attacker: &CombatView,
    accuracy_multiplier: f64,
    defender: &CombatView,
    rules: &CombatRules,
) -> f64 {
    let chance = attacker.hit_rate * accuracy_multiplier - defender.evasion_rate;
    if chance.is_nan() {
        return rules.min_hit_chance;
    }
    chance.clamp(rules.min_hit_chance, rules.max_hit_chance)
}

/// Rolls one hit check.
pub fn roll_hit(
    rng: &mut impl RandomSource,
    attacker: &CombatView,
    accuracy_multiplier: f64,
    defender: &CombatView,
    rules: &CombatRules,
) -> bool {
    percent_chance(rng, hit_chance(attacker, accuracy_multiplier, defender, rules))
}

/// Number of hits in a physical action: `max(1, round(attack_count × multiplier))`.
pub fn hit_count(attacker: &CombatView, multiplier: f64) -> u32 {
    let hits = (attacker.attack_count as f64 * multiplier).round();
    if hits.is_finite() && hits > 1.0 {
        hits as u32
    } else {
        1
    }
}
