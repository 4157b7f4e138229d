//! Actor attributes and the combat snapshot derived from them.

use std::collections::BTreeMap;

use super::common::{DamageType, SpellId};

/// Base attributes of a combatant.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BaseAttributes {
    pub strength: i32,
    pub wisdom: i32,
    pub spirit: i32,
    pub vitality: i32,
    pub agility: i32,
    pub luck: i32,
}

impl BaseAttributes {
    pub const fn new(
        strength: i32,
        wisdom: i32,
        spirit: i32,
        vitality: i32,
        agility: i32,
        luck: i32,
    ) -> Self {
        Self {
            strength,
            wisdom,
            spirit,
            vitality,
            agility,
            luck,
        }
    }

    /// Every attribute set to the same value.
    pub const fn uniform(value: i32) -> Self {
        Self::new(value, value, value, value, value, value)
    }
}

/// Combat values locked in before the battle starts.
///
/// The snapshot is never mutated during a battle; in-battle changes are
/// expressed through [`StatModifiers`] layered on top.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CombatSnapshot {
    pub max_hp: u32,
    pub physical_attack: u32,
    pub magical_attack: u32,
    pub physical_defense: u32,
    pub magical_defense: u32,
    pub hit_rate: i32,
    pub evasion_rate: i32,
    pub critical_rate: i32,
    pub attack_count: u32,
    pub healing_power: u32,
    pub additional_damage: i32,
    pub breath_damage: u32,
}

impl CombatSnapshot {
    /// Derive a snapshot from attributes and level.
    ///
    /// Base formulas:
    /// - MaxHP: VIT × 12 + STR × 2 + LV × 10
    /// - Physical attack / defense: STR × 2 + LV × 2 / VIT + LV
    /// - Magical attack / defense: WIS × 2 + LV × 2 / SPI + LV
    /// - Hit: 70 + AGI/2 + LV/4, Evasion: AGI/3 + LUK/5, Critical: LUK/5
    /// - Attack count: 1 + AGI/30 + LV/50
    /// - Healing: SPI × 2 + LV, Additional: STR/2 + AGI/2, Breath: VIT × 2 + LV × 3
    pub fn derive(attributes: &BaseAttributes, level: u32) -> Self {
        let a = attributes;
        let lv = level.min(i32::MAX as u32) as i32;
        let positive = |v: i32| v.max(0) as u32;

        Self {
            max_hp: positive(a.vitality * 12 + a.strength * 2 + lv * 10).max(1),
            physical_attack: positive(a.strength * 2 + lv * 2),
            magical_attack: positive(a.wisdom * 2 + lv * 2),
            physical_defense: positive(a.vitality + lv),
            magical_defense: positive(a.spirit + lv),
            hit_rate: 70 + a.agility / 2 + lv / 4,
            evasion_rate: a.agility / 3 + a.luck / 5,
            critical_rate: a.luck / 5,
            attack_count: positive(1 + a.agility / 30 + lv / 50).max(1),
            healing_power: positive(a.spirit * 2 + lv),
            additional_damage: a.strength / 2 + a.agility / 2,
            breath_damage: positive(a.vitality * 2 + lv * 3),
        }
    }
}

/// Multiplicative stat modifiers (1.0 = unchanged).
///
/// Sources: timed buff triggers and active status effects.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct StatModifiers {
    pub physical_attack: f64,
    pub magical_attack: f64,
    pub physical_defense: f64,
    pub magical_defense: f64,
    pub hit_rate: f64,
    pub evasion_rate: f64,
    pub critical_rate: f64,
}

impl StatModifiers {
    pub const NEUTRAL: Self = Self {
        physical_attack: 1.0,
        magical_attack: 1.0,
        physical_defense: 1.0,
        magical_defense: 1.0,
        hit_rate: 1.0,
        evasion_rate: 1.0,
        critical_rate: 1.0,
    };

    /// Combine two modifier sets multiplicatively.
    pub fn stack(&self, other: &Self) -> Self {
        Self {
            physical_attack: self.physical_attack * other.physical_attack,
            magical_attack: self.magical_attack * other.magical_attack,
            physical_defense: self.physical_defense * other.physical_defense,
            magical_defense: self.magical_defense * other.magical_defense,
            hit_rate: self.hit_rate * other.hit_rate,
            evasion_rate: self.evasion_rate * other.evasion_rate,
            critical_rate: self.critical_rate * other.critical_rate,
        }
    }

    pub fn is_neutral(&self) -> bool {
        *self == Self::NEUTRAL
    }
}

impl Default for StatModifiers {
    fn default() -> Self {
        Self::NEUTRAL
    }
}

/// Relative weights of each action kind in action selection.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct ActionRates {
    pub attack: u32,
    pub priest_magic: u32,
    pub mage_magic: u32,
    pub breath: u32,
    pub defend: u32,
}

impl ActionRates {
    /// Always attack.
    pub const fn attack_only() -> Self {
        Self {
            attack: 100,
            priest_magic: 0,
            mage_magic: 0,
            breath: 0,
            defend: 0,
        }
    }

    /// Weights in selection order: attack, priest, mage, breath, defend.
    pub fn weights(&self) -> [u32; 5] {
        [
            self.attack,
            self.priest_magic,
            self.mage_magic,
            self.breath,
            self.defend,
        ]
    }
}

/// Consumable action charges.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct ActionResources {
    pub priest_charges: u32,
    pub mage_charges: u32,
    pub breath_charges: u32,
}

/// Known spells by school.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct SpellBook {
    pub priest: Vec<SpellId>,
    pub mage: Vec<SpellId>,
}

/// Damage-taken multipliers innate to a creature (1.0 = neutral).
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct InnateResistances {
    pub physical: f64,
    pub magical: f64,
    pub breath: f64,
    /// Applies to critical damage only.
    pub critical: f64,
    /// Per-spell overrides of `magical`.
    pub spells: BTreeMap<SpellId, f64>,
}

impl InnateResistances {
    pub fn neutral() -> Self {
        Self {
            physical: 1.0,
            magical: 1.0,
            breath: 1.0,
            critical: 1.0,
            spells: BTreeMap::new(),
        }
    }

    pub fn for_damage(&self, damage_type: DamageType) -> f64 {
        match damage_type {
            DamageType::Physical => self.physical,
            DamageType::Magical => self.magical,
            DamageType::Breath => self.breath,
        }
    }

    pub fn for_spell(&self, spell: SpellId) -> f64 {
        self.spells.get(&spell).copied().unwrap_or(self.magical)
    }
}

impl Default for InnateResistances {
    fn default() -> Self {
        Self::neutral()
    }
}

/// Barrier charges per damage type.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct BarrierCharges {
    pub physical: u32,
    pub magical: u32,
    pub breath: u32,
}

impl BarrierCharges {
    pub fn get(&self, damage_type: DamageType) -> u32 {
        match damage_type {
            DamageType::Physical => self.physical,
            DamageType::Magical => self.magical,
            DamageType::Breath => self.breath,
        }
    }

    pub fn add(&mut self, damage_type: DamageType, charges: u32) {
        let slot = self.slot_mut(damage_type);
        *slot = slot.saturating_add(charges);
    }

    /// Consume one charge of `damage_type`; returns false if none remain.
    pub fn consume(&mut self, damage_type: DamageType) -> bool {
        let slot = self.slot_mut(damage_type);
        if *slot == 0 {
            return false;
        }
        *slot -= 1;
        true
    }

    pub fn merged(&self, other: &Self) -> Self {
        Self {
            physical: self.physical.saturating_add(other.physical),
            magical: self.magical.saturating_add(other.magical),
            breath: self.breath.saturating_add(other.breath),
        }
    }

    fn slot_mut(&mut self, damage_type: DamageType) -> &mut u32 {
        match damage_type {
            DamageType::Physical => &mut self.physical,
            DamageType::Magical => &mut self.magical,
            DamageType::Breath => &mut self.breath,
        }
    }
}
