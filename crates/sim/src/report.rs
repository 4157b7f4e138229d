//! Plain-text battle summaries.
use std::fmt;

use battle_core::{BattleOutcome, BattleResult};

/// One line per battle: outcome, length, survivors and replay digest.
pub fn battle_line(index: usize, result: &BattleResult) -> String {
    let standing = result.players.iter().filter(|a| a.is_alive()).count();
    let digest = hex::encode(result.log.digest());
    format!(
        "battle {:>4}: {:<7} turns={:<3} party={}/{} log={} entries digest={}",
        index,
        result.outcome,
        result.turns,
        standing,
        result.players.len(),
        result.log.len(),
        &digest[..16],
    )
}

/// Aggregate outcome counts over a run.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Summary {
    pub victories: u64,
    pub defeats: u64,
    pub fled: u64,
    pub total_turns: u64,
    /// Experience from enemies in won battles.
    pub experience: u64,
}

impl Summary {
    pub fn record(&mut self, result: &BattleResult) {
        match result.outcome {
            BattleOutcome::Victory => {
                self.victories += 1;
                self.experience += result
                    .encountered
                    .iter()
                    .map(|e| u64::from(e.base_experience))
                    .sum::<u64>();
            }
            BattleOutcome::Defeat => self.defeats += 1,
            BattleOutcome::Fled => self.fled += 1,
        }
        self.total_turns += u64::from(result.turns);
    }

    pub fn battles(&self) -> u64 {
        self.victories + self.defeats + self.fled
    }
}

impl fmt::Display for Summary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let battles = self.battles();
        if battles == 0 {
            return write!(f, "no battles");
        }
        let rate = self.victories as f64 * 100.0 / battles as f64;
        let turns = self.total_turns as f64 / battles as f64;
        write!(
            f,
            "{} battles: {} won ({:.1}%), {} lost, {} fled, {:.2} turns avg, {} exp",
            battles, self.victories, rate, self.defeats, self.fled, turns, self.experience
        )
    }
}
