//! Applied status effects on an actor.
//!
//! Definitions (duration, tags, modifiers) are master data; this module only
//! tracks applied instances. Durations count whole turns and are decremented
//! at turn end.

use arrayvec::ArrayVec;

use crate::config::BattleConfig;
use crate::state::{ActorId, StatusId};

/// A status effect applied to an actor.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AppliedStatus {
    pub status: StatusId,
    pub remaining_turns: u32,
    /// Actor that applied the effect, if any.
    pub source: Option<ActorId>,
    pub stack: Option<f64>,
}

/// Active status effects on an actor.
///
/// Holds at most one instance per status id.
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct StatusSet {
    effects: ArrayVec<AppliedStatus, { BattleConfig::MAX_STATUS_EFFECTS }>,
}

impl StatusSet {
    pub fn empty() -> Self {
        Self {
            effects: ArrayVec::new(),
        }
    }

    pub fn has(&self, status: StatusId) -> bool {
        self.effects.iter().any(|e| e.status == status)
    }

    pub fn get(&self, status: StatusId) -> Option<&AppliedStatus> {
        self.effects.iter().find(|e| e.status == status)
    }

    /// Applies a status, refreshing an existing instance to the longer duration.
    ///
    /// Returns false only when a new instance does not fit.
    pub fn apply(&mut self, status: StatusId, duration: u32, source: Option<ActorId>) -> bool {
        if let Some(existing) = self.effects.iter_mut().find(|e| e.status == status) {
            existing.remaining_turns = existing.remaining_turns.max(duration);
            if source.is_some() {
                existing.source = source;
            }
            return true;
        }

        if self.effects.is_full() {
            return false;
        }
        self.effects.push(AppliedStatus {
            status,
            remaining_turns: duration,
            source,
            stack: None,
        });
        debug_assert_eq!(self.count_of(status), 1);
        true
    }

    pub fn remove(&mut self, status: StatusId) {
        self.effects.retain(|e| e.status != status);
    }

    pub fn clear(&mut self) {
        self.effects.clear();
    }

    /// Decrements every duration by one turn and drops expired effects.
    ///
    /// Returns the ids that expired.
    pub fn advance_turn(&mut self) -> Vec<StatusId> {
        let mut expired = Vec::new();
        for effect in self.effects.iter_mut() {
            effect.remaining_turns = effect.remaining_turns.saturating_sub(1);
            if effect.remaining_turns == 0 {
                expired.push(effect.status);
            }
        }
        self.effects.retain(|e| e.remaining_turns > 0);
        expired
    }

    pub fn iter(&self) -> impl Iterator<Item = &AppliedStatus> {
        self.effects.iter()
    }

    pub fn len(&self) -> usize {
        self.effects.len()
    }

    pub fn is_empty(&self) -> bool {
        self.effects.is_empty()
    }

    /// Number of instances carrying `status`; never more than one.
    pub fn count_of(&self, status: StatusId) -> usize {
        self.effects.iter().filter(|e| e.status == status).count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const POISON: StatusId = StatusId(1);

    #[test]
    fn reapplying_never_shortens() {
        let mut set = StatusSet::empty();
        assert!(set.apply(POISON, 5, None));
        assert!(set.apply(POISON, 2, None));
        assert_eq!(set.get(POISON).unwrap().remaining_turns, 5);
        assert_eq!(set.count_of(POISON), 1);
    }

    #[test]
    fn reapplying_longer_replaces_duration() {
        let mut set = StatusSet::empty();
        set.apply(POISON, 2, None);
        set.apply(POISON, 6, Some(ActorId(1)));
        let applied = set.get(POISON).unwrap();
        assert_eq!(applied.remaining_turns, 6);
        assert_eq!(applied.source, Some(ActorId(1)));
        assert_eq!(set.len(), 1);
    }

    #[test]
    fn advance_turn_expires_effects() {
        let mut set = StatusSet::empty();
        set.apply(POISON, 1, None);
        set.apply(StatusId(2), 3, None);
        assert_eq!(set.advance_turn(), vec![POISON]);
        assert!(!set.has(POISON));
        assert_eq!(set.get(StatusId(2)).unwrap().remaining_turns, 2);
    }

    #[test]
    fn full_set_rejects_new_ids_but_refreshes_existing() {
        let mut set = StatusSet::empty();
        for id in 0..BattleConfig::MAX_STATUS_EFFECTS as u32 {
            assert!(set.apply(StatusId(id), 1, None));
        }
        assert!(!set.apply(StatusId(999), 1, None));
        assert!(set.apply(StatusId(0), 4, None));
    }
}
