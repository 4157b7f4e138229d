//! Barrier and guard post-processing.

use crate::config::CombatRules;
use crate::state::{Actor, BarrierCharges, DamageType};

/// Mutable defensive state of the defender.
#[derive(Debug)]
pub struct Mitigation<'a> {
    pub barriers: &'a mut BarrierCharges,
    pub guard_barriers: &'a mut BarrierCharges,
    pub guarding: bool,
}

impl<'a> Mitigation<'a> {
    pub fn of(actor: &'a mut Actor) -> Self {
        Self {
            barriers: &mut actor.barriers,
            guard_barriers: &mut actor.guard_barriers,
            guarding: actor.guarding,
        }
    }
}

/// Value after mitigation, with what was applied.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Mitigated {
    pub value: f64,
    pub barrier: bool,
    pub guarded: bool,
}

/// Applies barrier or guard reduction to a raw damage value.
///
/// The two are mutually exclusive:
/// 1. a barrier charge of the matching type is consumed and the value is
///    multiplied by 1/3; guard is not considered
/// 2. otherwise, while guarding, a matching guard-barrier charge is consumed
///    for 1/3, or the value is halved
pub fn apply_mitigation(value: f64, damage_type: DamageType, mitigation: &mut Mitigation<'_>) -> Mitigated {
    if mitigation.barriers.consume(damage_type) {
        return Mitigated {
            value: value * CombatRules::BARRIER_MULTIPLIER,
            barrier: true,
            guarded: false,
        };
    }

    if mitigation.guarding {
        let multiplier = if mitigation.guard_barriers.consume(damage_type) {
            CombatRules::BARRIER_MULTIPLIER
        } else {
            CombatRules::GUARD_MULTIPLIER
        };
        return Mitigated {
            value: value * multiplier,
            barrier: false,
            guarded: true,
        };
    }

    Mitigated {
        value,
        barrier: false,
        guarded: false,
    }
}
