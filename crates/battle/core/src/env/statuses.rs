use bitflags::bitflags;

use crate::state::{StatModifiers, StatusId};

/// Oracle providing status definitions.
pub trait StatusOracle: Send + Sync {
    fn status(&self, id: StatusId) -> Option<&StatusDefinition>;
}

bitflags! {
    /// Behavioural tags of a status definition.
    #[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
    #[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
    #[cfg_attr(feature = "serde", serde(transparent))]
    pub struct StatusTags: u8 {
        const BUFF = 1 << 0;
        const DEBUFF = 1 << 1;
        /// The actor loses its action (sleep, paralysis).
        const INCAPACITATE = 1 << 2;
        /// The actor cannot cast spells.
        const SILENCE = 1 << 3;
    }
}

#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct StatusDefinition {
    pub id: StatusId,
    pub name: String,
    /// Default duration in turns.
    pub duration: u32,
    #[cfg_attr(feature = "serde", serde(default))]
    pub tags: StatusTags,
    #[cfg_attr(feature = "serde", serde(default))]
    pub modifiers: StatModifiers,
    /// Percent of max HP lost at each turn end.
    #[cfg_attr(feature = "serde", serde(default))]
    pub tick_damage_percent: Option<f64>,
    #[cfg_attr(feature = "serde", serde(default = "neutral_multiplier"))]
    pub healing_received_multiplier: f64,
}

impl StatusDefinition {
    pub fn new(id: StatusId, name: impl Into<String>, duration: u32) -> Self {
        Self {
            id,
            name: name.into(),
            duration,
            tags: StatusTags::empty(),
            modifiers: StatModifiers::NEUTRAL,
            tick_damage_percent: None,
            healing_received_multiplier: 1.0,
        }
    }

    pub fn with_tags(mut self, tags: StatusTags) -> Self {
        self.tags = tags;
        self
    }
}

#[cfg(feature = "serde")]
fn neutral_multiplier() -> f64 {
    1.0
}
