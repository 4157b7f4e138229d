//! Effective combat stats at the moment of an action.

use crate::env::{BattleEnv, MasterDataError};
use crate::state::{Actor, BaseAttributes, CombatSnapshot, StatModifiers};
use crate::status;

/// Snapshot values with live modifiers, status modifiers and degradation
/// applied.
///
/// Views are computed fresh for every action and never stored on the actor.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CombatView {
    pub physical_attack: f64,
    pub magical_attack: f64,
    pub physical_defense: f64,
    pub magical_defense: f64,
    pub hit_rate: f64,
    pub evasion_rate: f64,
    pub critical_rate: f64,
    pub attack_count: u32,
    pub healing_power: f64,
    pub additional_damage: f64,
    pub breath_damage: f64,
    pub luck: i32,
    pub armed: bool,
    /// Bundle and status healing-received multipliers combined.
    pub healing_received: f64,
}

impl CombatView {
    /// Builds a view from raw parts.
    ///
    /// Degradation lowers physical defense by `degradation_percent`.
    pub fn from_parts(
        snapshot: &CombatSnapshot,
        attributes: &BaseAttributes,
        modifiers: &StatModifiers,
        degradation_percent: f64,
        armed: bool,
    ) -> Self {
        let wear = 1.0 - degradation_percent.clamp(0.0, 100.0) / 100.0;
        Self {
            physical_attack: snapshot.physical_attack as f64 * modifiers.physical_attack,
            magical_attack: snapshot.magical_attack as f64 * modifiers.magical_attack,
            physical_defense: snapshot.physical_defense as f64 * modifiers.physical_defense * wear,
            magical_defense: snapshot.magical_defense as f64 * modifiers.magical_defense,
            hit_rate: snapshot.hit_rate as f64 * modifiers.hit_rate,
            evasion_rate: snapshot.evasion_rate as f64 * modifiers.evasion_rate,
            critical_rate: snapshot.critical_rate as f64 * modifiers.critical_rate,
            attack_count: snapshot.attack_count,
            healing_power: snapshot.healing_power as f64,
            additional_damage: snapshot.additional_damage as f64,
            breath_damage: snapshot.breath_damage as f64,
            luck: attributes.luck,
            armed,
            healing_received: 1.0,
        }
    }

    /// Current view of `actor`.
    ///
    /// # Errors
    ///
    /// Returns `MasterDataError::StatusNotFound` if an applied status has no
    /// definition.
    pub fn of(env: &BattleEnv<'_>, actor: &Actor) -> Result<Self, MasterDataError> {
        let modifiers = actor
            .live_modifiers
            .stack(&status::effective_modifiers(env, actor)?);
        let mut view = Self::from_parts(
            &actor.snapshot,
            &actor.attributes,
            &modifiers,
            actor.counters.degradation_percent,
            actor.armed,
        );
        view.healing_received =
            actor.effects.misc.healing_received * status::healing_received_multiplier(env, actor)?;
        Ok(view)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn degradation_and_modifiers_lower_defense() {
        let snapshot = CombatSnapshot {
            physical_defense: 100,
            physical_attack: 50,
            ..CombatSnapshot::default()
        };
        let modifiers = StatModifiers {
            physical_attack: 2.0,
            ..StatModifiers::NEUTRAL
        };
        let view =
            CombatView::from_parts(&snapshot, &BaseAttributes::default(), &modifiers, 25.0, true);
        assert_eq!(view.physical_defense, 75.0);
        assert_eq!(view.physical_attack, 100.0);
    }
}
