use std::fmt;

use crate::config::BattleConfig;

/// Unique identifier for a combatant within one battle.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct ActorId(pub u32);

impl ActorId {
    /// Identifier of the party member occupying `slot`.
    #[inline]
    pub const fn player(slot: u8) -> Self {
        Self(slot as u32)
    }

    /// Identifier of the enemy occupying formation `slot`.
    #[inline]
    pub const fn enemy(slot: u8) -> Self {
        Self(BattleConfig::ENEMY_ID_BASE + slot as u32)
    }

    /// Returns true if this identifier is in the enemy range.
    #[inline]
    pub const fn is_enemy(self) -> bool {
        self.0 >= BattleConfig::ENEMY_ID_BASE
    }
}

impl fmt::Display for ActorId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

macro_rules! definition_id {
    ($(#[$meta:meta])* $name:ident, $prefix:literal) => {
        $(#[$meta])*
        #[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
        #[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
        #[cfg_attr(feature = "serde", serde(transparent))]
        pub struct $name(pub u32);

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, concat!($prefix, ".{}"), self.0)
            }
        }
    };
}

definition_id!(
    /// Master-data identifier of an enemy definition.
    EnemyId,
    "enemy"
);
definition_id!(
    /// Master-data identifier of a skill definition.
    SkillId,
    "skill"
);
definition_id!(
    /// Master-data identifier of a spell definition.
    SpellId,
    "spell"
);
definition_id!(
    /// Master-data identifier of a status definition.
    StatusId,
    "status"
);

/// Which party an actor fights for.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, strum::IntoStaticStr)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "snake_case")]
pub enum Side {
    Player,
    Enemy,
}

impl Side {
    pub const fn opponent(self) -> Self {
        match self {
            Side::Player => Side::Enemy,
            Side::Enemy => Side::Player,
        }
    }
}

/// Damage categories that resistances, barriers and multipliers are keyed on.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, strum::IntoStaticStr)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "snake_case")]
pub enum DamageType {
    /// Weapon and counter attacks.
    Physical,
    /// Offensive spells.
    Magical,
    /// Area attacks (breath); ignore defense.
    Breath,
}

impl DamageType {
    pub fn as_str(self) -> &'static str {
        self.into()
    }
}
