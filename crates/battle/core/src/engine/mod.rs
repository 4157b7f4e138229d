//! Turn orchestration.
//!
//! The [`BattleEngine`] owns every actor, the random source and the log for
//! one battle. [`BattleEngine::step`] advances exactly one [`BattlePhase`]:
//!
//! ```text
//! NotStarted → TurnStart → ActionSelection → ActionResolution → TurnEnd ─┐
//!                  ↑                                                     │
//!                  └─────────────────────────────────────────────────────┘
//! ```
//!
//! Any phase may end in `Concluded` when a side has no active actors or the
//! turn limit is exceeded. The engine is synchronous and single-threaded;
//! independent battles run in parallel by giving each its own engine.

mod actions;
mod errors;
mod reactions;
mod revival;
mod selection;
mod targeting;
mod turns;

pub use errors::BattleError;

use tracing::{debug, info};

use crate::config::BattleConfig;
use crate::encounter::{EncounterSpec, EncounteredEnemy, EnemyGroup, EnemyGroupBuilder};
use crate::env::BattleEnv;
use crate::log::{ActionKind, BattleLog, BattleLogEntry};
use crate::random::RandomSource;
use crate::state::{Actor, ActorId, Side};

use selection::PlannedAction;

/// How a battle ended, from the party's point of view.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, strum::Display, strum::IntoStaticStr)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
#[strum(serialize_all = "snake_case")]
pub enum BattleOutcome {
    Victory,
    Defeat,
    /// The party withdrew, either by retreating or by running out of turns.
    Fled,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum BattlePhase {
    NotStarted,
    TurnStart,
    ActionSelection,
    ActionResolution,
    TurnEnd,
    Concluded(BattleOutcome),
}

impl BattlePhase {
    pub fn outcome(&self) -> Option<BattleOutcome> {
        match self {
            BattlePhase::Concluded(outcome) => Some(*outcome),
            _ => None,
        }
    }
}

/// Final state of a concluded battle.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct BattleResult {
    pub outcome: BattleOutcome,
    /// Number of turns that started.
    pub turns: u32,
    pub players: Vec<Actor>,
    pub enemies: Vec<Actor>,
    pub encountered: Vec<EncounteredEnemy>,
    pub log: BattleLog,
}

/// Deterministic battle state machine.
///
/// Actors are stored in ordinal order: players by formation slot, then
/// enemies by formation slot. Indices into `actors` are stable for the whole
/// battle.
pub struct BattleEngine<'a, R: RandomSource> {
    env: BattleEnv<'a>,
    config: BattleConfig,
    rng: R,
    actors: Vec<Actor>,
    encountered: Vec<EncounteredEnemy>,
    log: BattleLog,
    phase: BattlePhase,
    turn: u32,
    turns_played: u32,
    plan: Vec<PlannedAction>,
}

impl<'a, R: RandomSource> BattleEngine<'a, R> {
    /// Creates an engine for `party` against a prebuilt enemy group.
    ///
    /// # Errors
    ///
    /// Returns `BattleError::EmptySide` if either side has no actors.
    pub fn new(
        env: BattleEnv<'a>,
        config: BattleConfig,
        rng: R,
        mut party: Vec<Actor>,
        enemies: EnemyGroup,
    ) -> Result<Self, BattleError> {
        if party.is_empty() {
            return Err(BattleError::EmptySide { side: Side::Player });
        }
        if enemies.is_empty() {
            return Err(BattleError::EmptySide { side: Side::Enemy });
        }
        debug_assert!(party.len() <= BattleConfig::MAX_PARTY_SIZE);

        party.sort_by_key(|a| a.formation_slot);
        let mut enemy_actors = enemies.actors;
        enemy_actors.sort_by_key(|a| a.formation_slot);
        party.extend(enemy_actors);

        Ok(Self {
            env,
            config,
            rng,
            actors: party,
            encountered: enemies.encountered,
            log: BattleLog::new(),
            phase: BattlePhase::NotStarted,
            turn: 0,
            turns_played: 0,
            plan: Vec::new(),
        })
    }

    /// Builds the enemy group from `specs` and creates the engine.
    ///
    /// # Errors
    ///
    /// Fails on unknown enemy or skill ids and on empty sides.
    pub fn from_encounter(
        env: BattleEnv<'a>,
        config: BattleConfig,
        rng: R,
        party: Vec<Actor>,
        specs: &[EncounterSpec],
    ) -> Result<Self, BattleError> {
        let enemies = EnemyGroupBuilder::build(&env, specs)?;
        Self::new(env, config, rng, party, enemies)
    }

    pub fn phase(&self) -> BattlePhase {
        self.phase
    }

    pub fn turn(&self) -> u32 {
        self.turn
    }

    pub fn log(&self) -> &BattleLog {
        &self.log
    }

    pub fn actors(&self) -> &[Actor] {
        &self.actors
    }

    pub fn actor(&self, id: ActorId) -> Option<&Actor> {
        self.actors.iter().find(|a| a.id == id)
    }

    pub fn config(&self) -> &BattleConfig {
        &self.config
    }

    /// Advances exactly one phase and returns the new phase.
    ///
    /// # Errors
    ///
    /// Returns `BattleError::AlreadyConcluded` once the battle is over, and
    /// `BattleError::MasterData` when a referenced definition is missing.
    pub fn step(&mut self) -> Result<BattlePhase, BattleError> {
        let next = match self.phase {
            BattlePhase::NotStarted => {
                self.start();
                BattlePhase::TurnStart
            }
            BattlePhase::TurnStart => {
                self.turn_start();
                BattlePhase::ActionSelection
            }
            BattlePhase::ActionSelection => {
                self.select_actions()?;
                BattlePhase::ActionResolution
            }
            BattlePhase::ActionResolution => {
                self.resolve_actions()?;
                BattlePhase::TurnEnd
            }
            BattlePhase::TurnEnd => {
                self.turn_end()?;
                BattlePhase::TurnStart
            }
            BattlePhase::Concluded(_) => return Err(BattleError::AlreadyConcluded),
        };

        self.phase = match self.evaluate_outcome() {
            Some(outcome) => self.conclude(outcome),
            None => next,
        };
        debug!(turn = self.turn, phase = ?self.phase, "battle phase advanced");
        Ok(self.phase)
    }

    /// Steps until the battle concludes.
    ///
    /// # Errors
    ///
    /// Propagates the first error returned by [`step`](Self::step).
    pub fn run(mut self) -> Result<BattleResult, BattleError> {
        loop {
            if let BattlePhase::Concluded(outcome) = self.step()? {
                return Ok(self.finish(outcome));
            }
        }
    }

    /// Final result, or `None` while the battle is still running.
    pub fn into_result(self) -> Option<BattleResult> {
        let outcome = self.phase.outcome()?;
        Some(self.finish(outcome))
    }

    fn finish(mut self, outcome: BattleOutcome) -> BattleResult {
        let split = self
            .actors
            .iter()
            .position(|a| a.side == Side::Enemy)
            .unwrap_or(self.actors.len());
        let enemies = self.actors.split_off(split);

        BattleResult {
            outcome,
            turns: self.turns_played,
            players: self.actors,
            enemies,
            encountered: self.encountered,
            log: self.log,
        }
    }

    fn start(&mut self) {
        for actor in &mut self.actors {
            actor.prepare_for_battle();
        }
        let players = self.side_indices(Side::Player).count();
        let enemies = self.actors.len() - players;

        self.turn = 1;
        self.log.push(
            BattleLogEntry::system(0, ActionKind::BattleStart)
                .with_meta("players", players)
                .with_meta("enemies", enemies)
                .with_meta("max_turns", self.config.max_turns),
        );
        debug!(players, enemies, "battle started");
    }

    /// Outcome if the battle is over, checked after every phase.
    fn evaluate_outcome(&self) -> Option<BattleOutcome> {
        let active = |side: Side| self.actors.iter().any(|a| a.side == side && a.is_alive());

        if !active(Side::Enemy) {
            return Some(BattleOutcome::Victory);
        }
        if !active(Side::Player) {
            let retreated = self.actors.iter().any(|a| a.side == Side::Player && a.fled);
            return Some(if retreated {
                BattleOutcome::Fled
            } else {
                BattleOutcome::Defeat
            });
        }
        if self.turn > self.config.max_turns {
            return Some(BattleOutcome::Fled);
        }
        None
    }

    fn conclude(&mut self, outcome: BattleOutcome) -> BattlePhase {
        self.plan.clear();
        self.log.push(
            BattleLogEntry::system(self.turns_played, ActionKind::BattleEnd)
                .with_meta("outcome", outcome)
                .with_meta("turns", self.turns_played),
        );
        info!(%outcome, turns = self.turns_played, entries = self.log.len(), "battle concluded");
        BattlePhase::Concluded(outcome)
    }

    fn side_indices(&self, side: Side) -> impl Iterator<Item = usize> + '_ {
        self.actors
            .iter()
            .enumerate()
            .filter(move |(_, a)| a.side == side)
            .map(|(index, _)| index)
    }
}

/// Mutable access to two distinct elements.
fn pair_mut<T>(items: &mut [T], a: usize, b: usize) -> (&mut T, &mut T) {
    debug_assert_ne!(a, b, "pair_mut requires distinct indices");
    if a < b {
        let (left, right) = items.split_at_mut(b);
        (&mut left[a], &mut right[0])
    } else {
        let (left, right) = items.split_at_mut(a);
        (&mut right[0], &mut left[b])
    }
}
