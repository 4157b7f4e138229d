//! Deterministic random source and probability primitives.
//!
//! All randomness in a battle flows through one explicit [`RandomSource`]
//! owned by the engine. There is no global generator and no global override:
//! tests substitute [`ScriptedRng`] through the same constructor parameter.
//!
//! # Determinism
//!
//! Implementations must be deterministic: given the same seed and the same
//! call sequence they produce the same values. Battle replay depends on it.

mod pcg;
mod probability;
mod scripted;

pub use pcg::{PcgRng, compute_seed};
pub use probability::{percent_chance, speed_multiplier, stat_multiplier, weighted_index};
pub use scripted::ScriptedRng;

/// Seeded generator of uniform integers.
pub trait RandomSource {
    /// Generate the next raw 32-bit value, advancing the state.
    fn next_u32(&mut self) -> u32;

    /// Generate a uniformly distributed value in `[min, max]` inclusive.
    ///
    /// Returns `min` without consuming state when the range is empty or
    /// degenerate (`min >= max`).
    fn next_int(&mut self, min: i32, max: i32) -> i32 {
        if min >= max {
            return min;
        }
        let span = (max as i64 - min as i64 + 1) as u64;
        // Widening multiply maps [0, 2^32) onto [0, span) without modulo bias
        // concentrating on the low values.
        let offset = ((self.next_u32() as u64 * span) >> 32) as i64;
        (min as i64 + offset) as i32
    }
}

impl<R: RandomSource + ?Sized> RandomSource for &mut R {
    fn next_u32(&mut self) -> u32 {
        (**self).next_u32()
    }

    fn next_int(&mut self, min: i32, max: i32) -> i32 {
        (**self).next_int(min, max)
    }
}
