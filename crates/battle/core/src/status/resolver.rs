//! Status application chances.

use crate::random::{RandomSource, percent_chance};
use crate::state::{Actor, ActorId, StatusId};

/// Effective application chance in percent.
///
/// ```text
/// scaled = base × source_multiplier × resistance.multiplier + resistance.additive_percent
/// chance = clamp(scaled, 0, 100)
/// ```
///
/// A target without a resistance record for `status` is neutral.
pub fn chance_percent(base: f64, status: StatusId, target: &Actor, source_multiplier: f64) -> f64 {
    let resistance = target.effects.status.resistance(status);
    let scaled = base * source_multiplier * resistance.multiplier + resistance.additive_percent;
    if scaled.is_nan() {
        return 0.0;
    }
    scaled.clamp(0.0, 100.0)
}

/// Rolls `chance` and on success applies `status` to `target`.
///
/// Re-application refreshes to the longer duration. Returns false on a failed
/// roll or when the target cannot hold another status.
pub fn attempt_apply(
    rng: &mut impl RandomSource,
    status: StatusId,
    chance: f64,
    duration: u32,
    source: Option<ActorId>,
    target: &mut Actor,
) -> bool {
    if !percent_chance(rng, chance) {
        return false;
    }
    target.statuses.apply(status, duration, source)
}
