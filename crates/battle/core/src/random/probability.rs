//! Probability primitives built on [`RandomSource`].
//!
//! These are pure functions of the generator state and their numeric inputs.

use super::RandomSource;

/// Luck-dependent variance factor for attack and defense rolls.
///
/// `lower = clamp(40 + luck, 0, 100)`, draws `percent ∈ [lower, 100]` and
/// returns `percent / 100`.
pub fn stat_multiplier(rng: &mut impl RandomSource, luck: i32) -> f64 {
    let lower = 40_i32.saturating_add(luck).clamp(0, 100);
    rng.next_int(lower, 100) as f64 / 100.0
}

/// Luck-dependent variance factor for area (breath) attacks.
///
/// `lower = clamp((luck - 10) * 2, 0, 100)`.
pub fn speed_multiplier(rng: &mut impl RandomSource, luck: i32) -> f64 {
    let lower = luck.saturating_sub(10).saturating_mul(2).clamp(0, 100);
    rng.next_int(lower, 100) as f64 / 100.0
}

/// Percentage check. Certain outcomes do not consume a draw.
pub fn percent_chance(rng: &mut impl RandomSource, percent: f64) -> bool {
    if percent <= 0.0 || percent.is_nan() {
        return false;
    }
    if percent >= 100.0 {
        return true;
    }
    rng.next_int(1, 100) as f64 <= percent
}

/// Weighted draw over non-negative integer weights.
///
/// Returns `None` without drawing when the total weight is zero.
pub fn weighted_index(rng: &mut impl RandomSource, weights: &[u32]) -> Option<usize> {
    let total: u64 = weights.iter().map(|&w| w as u64).sum();
    if total == 0 {
        return None;
    }
    let total = total.min(i32::MAX as u64) as i32;
    let mut roll = rng.next_int(1, total) as u64;
    for (index, &weight) in weights.iter().enumerate() {
        if roll <= weight as u64 {
            return Some(index);
        }
        roll -= weight as u64;
    }
    weights.iter().rposition(|&w| w > 0)
}
