use crate::state::StatusId;

/// Battle configuration constants and tunable parameters.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct BattleConfig {
    /// Safety bound on the number of turns. Exceeding it concludes the battle
    /// as a withdrawal.
    pub max_turns: u32,

    /// Maximum number of extra actions a single actor may take in one turn.
    pub max_extra_actions: u32,

    /// Fraction of maximum HP restored by a necromancer revival.
    pub necromancer_revive_ratio: f64,

    /// Status applied by anti-healing attackers instead of damage.
    pub anti_healing_status: StatusId,

    /// Duration in turns of the anti-healing status.
    pub anti_healing_duration: u32,

    /// Formula constants shared by the damage engine.
    pub rules: CombatRules,
}

impl BattleConfig {
    // ===== compile-time constants =====
    pub const MAX_STATUS_EFFECTS: usize = 16;
    pub const MAX_PARTY_SIZE: usize = 6;
    /// Enemy formation slots are `1..=255`.
    pub const MAX_ENEMY_GROUP_SIZE: usize = u8::MAX as usize;
    /// Actor ids at or above this value belong to enemies.
    pub const ENEMY_ID_BASE: u32 = 1000;

    // ===== runtime-tunable defaults =====
    pub const DEFAULT_MAX_TURNS: u32 = 20;
    pub const DEFAULT_MAX_EXTRA_ACTIONS: u32 = 3;
    pub const DEFAULT_NECROMANCER_REVIVE_RATIO: f64 = 0.5;
    pub const DEFAULT_ANTI_HEALING_STATUS: StatusId = StatusId(100);
    pub const DEFAULT_ANTI_HEALING_DURATION: u32 = 3;

    pub fn new() -> Self {
        Self {
            max_turns: Self::DEFAULT_MAX_TURNS,
            max_extra_actions: Self::DEFAULT_MAX_EXTRA_ACTIONS,
            necromancer_revive_ratio: Self::DEFAULT_NECROMANCER_REVIVE_RATIO,
            anti_healing_status: Self::DEFAULT_ANTI_HEALING_STATUS,
            anti_healing_duration: Self::DEFAULT_ANTI_HEALING_DURATION,
            rules: CombatRules::default(),
        }
    }

    pub fn with_max_turns(mut self, max_turns: u32) -> Self {
        self.max_turns = max_turns;
        self
    }
}

impl Default for BattleConfig {
    fn default() -> Self {
        Self::new()
    }
}

/// Balance parameters for the damage and hit formulas.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct CombatRules {
    /// Base critical damage multiplier, further scaled by skill effects.
    pub critical_multiplier: f64,
    pub min_hit_chance: f64,
    pub max_hit_chance: f64,
    /// Degradation percent added to a defender by each critical hit it takes.
    pub degradation_on_critical: f64,
}

impl CombatRules {
    pub const BARRIER_MULTIPLIER: f64 = 1.0 / 3.0;
    pub const GUARD_MULTIPLIER: f64 = 0.5;
    pub const CRITICAL_DEFENSE_SCALE: f64 = 0.5;
    pub const MAGIC_DEFENSE_SCALE: f64 = 0.5;
    pub const PARRY_BASE_CHANCE: f64 = 10.0;
    pub const SHIELD_BLOCK_BASE_CHANCE: f64 = 30.0;
}

impl Default for CombatRules {
    fn default() -> Self {
        Self {
            critical_multiplier: 1.5,
            min_hit_chance: 5.0,
            max_hit_chance: 100.0,
            degradation_on_critical: 1.0,
        }
    }
}
