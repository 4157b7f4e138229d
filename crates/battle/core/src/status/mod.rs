//! Status effect resolution.
//!
//! [`resolver`] decides whether a status lands; [`tick`] advances applied
//! statuses at turn end and answers tag queries (incapacitated, silenced).
mod resolver;
mod tick;

pub use resolver::{attempt_apply, chance_percent};
pub use tick::{
    StatusTick, effective_modifiers, healing_received_multiplier, is_incapacitated, is_silenced,
    tick_statuses,
};
