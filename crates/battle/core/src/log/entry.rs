use std::collections::BTreeMap;

use bitflags::bitflags;

use crate::state::ActorId;

/// What a log entry records.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, strum::Display, strum::IntoStaticStr)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
#[strum(serialize_all = "snake_case")]
pub enum ActionKind {
    BattleStart,
    Attack,
    PriestSpell,
    MageSpell,
    Breath,
    Defend,
    AntiHeal,
    Reaction,
    ExtraAction,
    BuffApply,
    Retreat,
    Repair,
    Sacrifice,
    Necromancer,
    Resurrection,
    Rescue,
    StatusTick,
    Regeneration,
    ChargeRecovery,
    ActionSkipped,
    BattleEnd,
}

impl ActionKind {
    pub fn as_str(self) -> &'static str {
        self.into()
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, strum::IntoStaticStr)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
#[strum(serialize_all = "snake_case")]
pub enum EffectKind {
    Damage,
    Heal,
    Status,
    Revive,
    Miss,
    Buff,
    Repair,
}

impl EffectKind {
    /// Stable tag used by the log digest.
    pub(crate) fn code(self) -> u8 {
        match self {
            EffectKind::Damage => 0,
            EffectKind::Heal => 1,
            EffectKind::Status => 2,
            EffectKind::Revive => 3,
            EffectKind::Miss => 4,
            EffectKind::Buff => 5,
            EffectKind::Repair => 6,
        }
    }
}

bitflags! {
    /// Qualifiers of a single target effect.
    #[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
    #[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
    #[cfg_attr(feature = "serde", serde(transparent))]
    pub struct EffectFlags: u16 {
        const CRITICAL = 1 << 0;
        const GUARDED = 1 << 1;
        const BARRIER = 1 << 2;
        const NULLIFIED = 1 << 3;
        const PARRIED = 1 << 4;
        const BLOCKED = 1 << 5;
        /// The target dropped to 0 HP.
        const DEFEATED = 1 << 6;
        /// An ally took the hit in the original target's place.
        const COVERED = 1 << 7;
    }
}

/// Outcome of an action on one target.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TargetEffect {
    pub target: ActorId,
    pub amount: u32,
    pub kind: EffectKind,
    pub flags: EffectFlags,
}

impl TargetEffect {
    pub fn new(target: ActorId, kind: EffectKind, amount: u32) -> Self {
        Self {
            target,
            amount,
            kind,
            flags: EffectFlags::empty(),
        }
    }

    pub fn damage(target: ActorId, amount: u32) -> Self {
        Self::new(target, EffectKind::Damage, amount)
    }

    pub fn heal(target: ActorId, amount: u32) -> Self {
        Self::new(target, EffectKind::Heal, amount)
    }

    pub fn miss(target: ActorId) -> Self {
        Self::new(target, EffectKind::Miss, 0)
    }

    pub fn with_flags(mut self, flags: EffectFlags) -> Self {
        self.flags |= flags;
        self
    }
}

/// One recorded decision.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BattleLogEntry {
    pub turn: u32,
    /// `None` for system events.
    pub actor: Option<ActorId>,
    pub kind: ActionKind,
    pub metadata: BTreeMap<String, String>,
    pub effects: Vec<TargetEffect>,
}

impl BattleLogEntry {
    pub fn system(turn: u32, kind: ActionKind) -> Self {
        Self {
            turn,
            actor: None,
            kind,
            metadata: BTreeMap::new(),
            effects: Vec::new(),
        }
    }

    pub fn action(turn: u32, actor: ActorId, kind: ActionKind) -> Self {
        Self {
            actor: Some(actor),
            ..Self::system(turn, kind)
        }
    }

    pub fn with_meta(mut self, key: &str, value: impl ToString) -> Self {
        self.metadata.insert(key.to_owned(), value.to_string());
        self
    }

    pub fn insert_meta(&mut self, key: &str, value: impl ToString) {
        self.metadata.insert(key.to_owned(), value.to_string());
    }

    pub fn with_effect(mut self, effect: TargetEffect) -> Self {
        self.effects.push(effect);
        self
    }

    pub fn push_effect(&mut self, effect: TargetEffect) {
        self.effects.push(effect);
    }

    pub fn meta(&self, key: &str) -> Option<&str> {
        self.metadata.get(key).map(String::as_str)
    }

    /// Total damage dealt by this entry.
    pub fn damage_dealt(&self) -> u32 {
        self.effects
            .iter()
            .filter(|e| e.kind == EffectKind::Damage)
            .map(|e| e.amount)
            .sum()
    }
}
