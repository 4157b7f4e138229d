//! Target selection. All candidate lists are in ordinal order.

use crate::random::{RandomSource, weighted_index};

use super::BattleEngine;

/// Cover applies to targets at or below this fraction of max HP.
const COVER_HP_RATIO: f64 = 0.5;

impl<'a, R: RandomSource> BattleEngine<'a, R> {
    pub(super) fn living_opponents(&self, index: usize) -> impl Iterator<Item = usize> + '_ {
        let side = self.actors[index].side.opponent();
        self.side_indices(side)
            .filter(move |&i| self.actors[i].is_alive())
    }

    /// Living actors on the same side, including `index` itself.
    pub(super) fn living_allies(&self, index: usize) -> impl Iterator<Item = usize> + '_ {
        let side = self.actors[index].side;
        self.side_indices(side)
            .filter(move |&i| self.actors[i].is_alive())
    }

    /// Weighted draw over living opponents.
    ///
    /// Each weight is `round(targeting_weight × 100)`, at least 1. A single
    /// candidate is returned without a draw.
    pub(super) fn pick_opponent(&mut self, index: usize) -> Option<usize> {
        let candidates: Vec<usize> = self.living_opponents(index).collect();
        match candidates.len() {
            0 => None,
            1 => Some(candidates[0]),
            _ => {
                let weights: Vec<u32> = candidates
                    .iter()
                    .map(|&i| {
                        let weight = (self.actors[i].effects.misc.targeting_weight * 100.0).round();
                        if weight.is_finite() && weight > 1.0 {
                            weight.min(u32::MAX as f64) as u32
                        } else {
                            1
                        }
                    })
                    .collect();
                weighted_index(&mut self.rng, &weights).map(|pick| candidates[pick])
            }
        }
    }

    /// First living ally of `target` with cover, if `target` is badly wounded.
    pub(super) fn cover_for(&self, target: usize) -> Option<usize> {
        if self.actors[target].hp_ratio() > COVER_HP_RATIO {
            return None;
        }
        self.living_allies(target)
            .find(|&i| i != target && self.actors[i].effects.misc.cover)
    }

    /// Living ally with the lowest HP ratio that is missing HP.
    pub(super) fn most_injured_ally(&self, index: usize) -> Option<usize> {
        self.living_allies(index)
            .filter(|&i| self.actors[i].hp() < self.actors[i].max_hp())
            .min_by(|&a, &b| {
                self.actors[a]
                    .hp_ratio()
                    .total_cmp(&self.actors[b].hp_ratio())
            })
    }

    /// Lowest-level living ally flagged as a sacrifice, ties by ordinal.
    pub(super) fn sacrifice_target(&self, index: usize) -> Option<usize> {
        self.living_allies(index)
            .filter(|&i| i != index && self.actors[i].counters.sacrifice_eligible)
            .min_by_key(|&i| self.actors[i].level)
    }

    /// First fallen ally of `index`, excluding itself.
    pub(super) fn first_fallen_ally(&self, index: usize) -> Option<usize> {
        let side = self.actors[index].side;
        self.side_indices(side)
            .find(|&i| i != index && self.actors[i].is_fallen())
    }
}
