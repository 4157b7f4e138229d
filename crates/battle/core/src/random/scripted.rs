use std::collections::VecDeque;

use super::RandomSource;

/// Random source that replays a fixed script of values.
///
/// Each [`RandomSource::next_int`] call pops the next scripted value and clamps
/// it into the requested range. Once the script is exhausted every draw returns
/// the range maximum: variance rolls resolve to `1.0` and percentage checks
/// below 100 fail.
#[derive(Clone, Debug, Default)]
pub struct ScriptedRng {
    values: VecDeque<i32>,
    draws: usize,
}

impl ScriptedRng {
    pub fn new(values: impl IntoIterator<Item = i32>) -> Self {
        Self {
            values: values.into_iter().collect(),
            draws: 0,
        }
    }

    /// A source that always returns the range maximum.
    pub fn exhausted() -> Self {
        Self::default()
    }

    /// Appends further values to the script.
    pub fn push(&mut self, value: i32) {
        self.values.push_back(value);
    }

    /// Number of draws consumed so far.
    pub fn draws(&self) -> usize {
        self.draws
    }

    pub fn remaining(&self) -> usize {
        self.values.len()
    }
}

impl RandomSource for ScriptedRng {
    fn next_u32(&mut self) -> u32 {
        self.draws += 1;
        self.values.pop_front().map_or(u32::MAX, |v| v as u32)
    }

    fn next_int(&mut self, min: i32, max: i32) -> i32 {
        if min >= max {
            return min;
        }
        self.draws += 1;
        match self.values.pop_front() {
            Some(value) => value.clamp(min, max),
            None => max,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn replays_and_clamps() {
        let mut rng = ScriptedRng::new([5, 500, -2]);
        assert_eq!(rng.next_int(1, 100), 5);
        assert_eq!(rng.next_int(1, 100), 100);
        assert_eq!(rng.next_int(1, 100), 1);
        assert_eq!(rng.next_int(1, 100), 100);
        assert_eq!(rng.draws(), 4);
    }
}
