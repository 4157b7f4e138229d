//! Append-only battle log.
//!
//! Every decision the engine makes is recorded as a [`BattleLogEntry`]. The
//! log is the replay artifact: [`BattleLog::digest`] hashes a canonical byte
//! encoding so two runs can be compared without diffing entries.
mod entry;

pub use entry::{ActionKind, BattleLogEntry, EffectFlags, EffectKind, TargetEffect};

use sha2::{Digest, Sha256};

#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct BattleLog {
    entries: Vec<BattleLogEntry>,
}

impl BattleLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, entry: BattleLogEntry) {
        self.entries.push(entry);
    }

    pub fn entries(&self) -> &[BattleLogEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, BattleLogEntry> {
        self.entries.iter()
    }

    pub fn last(&self) -> Option<&BattleLogEntry> {
        self.entries.last()
    }

    /// Entries of the given kind, in order.
    pub fn of_kind(&self, kind: ActionKind) -> impl Iterator<Item = &BattleLogEntry> {
        self.entries.iter().filter(move |e| e.kind == kind)
    }

    /// SHA-256 over the canonical encoding of every entry.
    ///
    /// Integers are little-endian, strings are length-prefixed, and metadata
    /// is hashed in key order.
    pub fn digest(&self) -> [u8; 32] {
        let mut hasher = Sha256::new();
        hasher.update((self.entries.len() as u64).to_le_bytes());

        for entry in &self.entries {
            hasher.update(entry.turn.to_le_bytes());
            match entry.actor {
                Some(actor) => {
                    hasher.update([1u8]);
                    hasher.update(actor.0.to_le_bytes());
                }
                None => hasher.update([0u8]),
            }
            update_str(&mut hasher, entry.kind.as_str());

            hasher.update((entry.metadata.len() as u32).to_le_bytes());
            for (key, value) in &entry.metadata {
                update_str(&mut hasher, key);
                update_str(&mut hasher, value);
            }

            hasher.update((entry.effects.len() as u32).to_le_bytes());
            for effect in &entry.effects {
                hasher.update(effect.target.0.to_le_bytes());
                hasher.update(effect.amount.to_le_bytes());
                hasher.update([effect.kind.code()]);
                hasher.update(effect.flags.bits().to_le_bytes());
            }
        }

        hasher.finalize().into()
    }
}

fn update_str(hasher: &mut Sha256, value: &str) {
    hasher.update((value.len() as u32).to_le_bytes());
    hasher.update(value.as_bytes());
}

impl<'a> IntoIterator for &'a BattleLog {
    type Item = &'a BattleLogEntry;
    type IntoIter = std::slice::Iter<'a, BattleLogEntry>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::ActorId;

    fn sample() -> BattleLog {
        let mut log = BattleLog::new();
        log.push(BattleLogEntry::system(1, ActionKind::BattleStart).with_meta("players", 2));
        log.push(
            BattleLogEntry::action(1, ActorId::player(1), ActionKind::Attack).with_effect(
                TargetEffect::damage(ActorId::enemy(1), 12).with_flags(EffectFlags::CRITICAL),
            ),
        );
        log
    }

    #[test]
    fn action_kinds_render_snake_case() {
        assert_eq!(ActionKind::BattleStart.to_string(), "battle_start");
        assert_eq!(ActionKind::PriestSpell.as_str(), "priest_spell");
        assert_eq!(ActionKind::ActionSkipped.as_str(), "action_skipped");
    }

    #[test]
    fn digest_is_stable_and_sensitive() {
        let a = sample();
        let b = sample();
        assert_eq!(a.digest(), b.digest());

        let mut c = sample();
        c.push(BattleLogEntry::system(1, ActionKind::BattleEnd));
        assert_ne!(a.digest(), c.digest());

        let mut d = BattleLog::new();
        for entry in a.iter().cloned() {
            d.push(entry);
        }
        d.entries[1].effects[0].amount = 13;
        assert_ne!(a.digest(), d.digest());
    }

    #[test]
    fn empty_log_digest_is_known() {
        assert_eq!(
            hex::encode(BattleLog::new().digest()),
            hex::encode(Sha256::digest(0u64.to_le_bytes()))
        );
    }
}
