//! Combat resolution.
//!
//! Pure functions over [`CombatView`]s, skill bundles and an explicit random
//! source. The only state they touch is the defender's barrier charges.
//!
//! # Core Functions
//!
//! - [`physical_damage`], [`magical_damage`], [`breath_damage`]: one hit on one target
//! - [`apply_mitigation`]: barrier or guard, never both
//! - [`roll_hit`] / [`hit_count`]: accuracy and multi-hit
//! - [`roll_interrupt`]: parry and shield block
//! - [`heal_amount`]: healing spells, rescue scaling

pub mod damage;
pub mod healing;
pub mod hit;
pub mod interrupt;
pub mod mitigation;
pub mod view;

pub use damage::{
    Combatant, DamageOutcome, SpellCast, Strike, breath_damage, magical_damage, physical_damage,
};
pub use healing::heal_amount;
pub use hit::{hit_chance, hit_count, roll_hit};
pub use interrupt::{Interrupt, parry_chance, roll_interrupt, shield_block_chance};
pub use mitigation::{Mitigated, Mitigation, apply_mitigation};
pub use view::CombatView;
