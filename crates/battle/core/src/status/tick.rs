//! Turn-end processing and tag queries over applied statuses.

use crate::env::{BattleEnv, MasterDataError, StatusTags};
use crate::state::{Actor, StatModifiers, StatusId};

/// What a turn-end tick did to one actor.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct StatusTick {
    /// HP lost per damaging status, in application order.
    pub damage: Vec<(StatusId, u32)>,
    pub expired: Vec<StatusId>,
}

impl StatusTick {
    pub fn total_damage(&self) -> u32 {
        self.damage.iter().map(|(_, amount)| amount).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.damage.is_empty() && self.expired.is_empty()
    }
}

/// Applies tick damage, then counts every status down by one turn.
///
/// Tick damage is `max(1, round(max_hp × percent / 100))` and may defeat the
/// actor. Actors that are not alive are left untouched.
///
/// # Errors
///
/// Returns `MasterDataError::StatusNotFound` for an applied id without a
/// definition.
pub fn tick_statuses(env: &BattleEnv<'_>, actor: &mut Actor) -> Result<StatusTick, MasterDataError> {
    let mut tick = StatusTick::default();
    if !actor.is_alive() {
        return Ok(tick);
    }

    let applied: Vec<StatusId> = actor.statuses.iter().map(|s| s.status).collect();
    for id in applied {
        let definition = env.status(id)?;
        let Some(percent) = definition.tick_damage_percent else {
            continue;
        };
        if percent <= 0.0 || !actor.is_alive() {
            continue;
        }
        let amount = ((actor.max_hp() as f64 * percent / 100.0).round() as u32).max(1);
        tick.damage.push((id, actor.take_damage(amount)));
    }

    tick.expired = actor.statuses.advance_turn();
    Ok(tick)
}

/// Product of the stat modifiers of every applied status.
pub fn effective_modifiers(
    env: &BattleEnv<'_>,
    actor: &Actor,
) -> Result<StatModifiers, MasterDataError> {
    actor
        .statuses
        .iter()
        .try_fold(StatModifiers::NEUTRAL, |acc, applied| {
            Ok(acc.stack(&env.status(applied.status)?.modifiers))
        })
}

/// Product of the healing-received multipliers of every applied status.
pub fn healing_received_multiplier(
    env: &BattleEnv<'_>,
    actor: &Actor,
) -> Result<f64, MasterDataError> {
    actor.statuses.iter().try_fold(1.0, |acc, applied| {
        Ok(acc * env.status(applied.status)?.healing_received_multiplier)
    })
}

pub fn is_incapacitated(env: &BattleEnv<'_>, actor: &Actor) -> Result<bool, MasterDataError> {
    has_tag(env, actor, StatusTags::INCAPACITATE)
}

pub fn is_silenced(env: &BattleEnv<'_>, actor: &Actor) -> Result<bool, MasterDataError> {
    has_tag(env, actor, StatusTags::SILENCE)
}

fn has_tag(env: &BattleEnv<'_>, actor: &Actor, tag: StatusTags) -> Result<bool, MasterDataError> {
    for applied in actor.statuses.iter() {
        if env.status(applied.status)?.tags.contains(tag) {
            return Ok(true);
        }
    }
    Ok(false)
}
