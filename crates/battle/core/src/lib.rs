//! Deterministic turn-based battle resolution.
//!
//! `battle-core` defines the canonical rules (stats, skill effects, damage,
//! statuses, turn flow) and exposes pure APIs that can be reused by loaders,
//! simulators and replay tools. All battle state mutation flows through
//! [`engine::BattleEngine`]; master data is read through [`env::BattleEnv`].
//!
//! Given the same master data, party, encounter and seed, a battle produces a
//! byte-identical [`log::BattleLog`].
pub mod combat;
pub mod config;
pub mod encounter;
pub mod engine;
pub mod env;
pub mod error;
pub mod log;
pub mod random;
pub mod skill;
pub mod state;
pub mod status;

pub use config::{BattleConfig, CombatRules};
pub use encounter::{EncounterSpec, EncounteredEnemy, EnemyGroup, EnemyGroupBuilder};
pub use engine::{BattleEngine, BattleError, BattleOutcome, BattlePhase, BattleResult};
pub use env::{
    BattleEnv, EnemyDefinition, EnemyOracle, MasterDataError, MasterDataSnapshot,
    SkillDefinition, SkillEffect, SkillOracle, SpellDefinition, SpellKind, SpellOracle,
    SpellSchool, StatusDefinition, StatusOracle, StatusTags,
};
pub use error::{BattleFault, ErrorSeverity};
pub use log::{
    ActionKind, BattleLog, BattleLogEntry, EffectFlags, EffectKind, TargetEffect,
};
pub use random::{PcgRng, RandomSource, ScriptedRng, compute_seed};
pub use skill::{SkillCompiler, SkillEffects};
pub use state::{
    ActionRates, ActionResources, Actor, ActorCounters, ActorId, BarrierCharges, BaseAttributes,
    CombatSnapshot, DamageType, EnemyId, InnateResistances, Side, SkillId, SpellBook, SpellId,
    StatModifiers, StatusId, StatusSet,
};
