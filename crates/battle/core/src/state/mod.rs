//! Battle-time state: identifiers, actors, stats and applied statuses.
mod actor;
mod common;
mod stats;
mod status;

pub use actor::{Actor, ActorCounters};
pub use common::{ActorId, DamageType, EnemyId, Side, SkillId, SpellId, StatusId};
pub use stats::{
    ActionRates, ActionResources, BarrierCharges, BaseAttributes, CombatSnapshot,
    InnateResistances, SpellBook, StatModifiers,
};
pub use status::{AppliedStatus, StatusSet};
