//! Randomness for the enemy AI
//!
//! `Dice` is the only source of non-determinism in the core. The live game
//! uses a seeded ChaCha stream; tests feed a fixed script of rolls.

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use std::collections::VecDeque;

pub trait Dice {
    /// Uniform roll in `[0, 100)`
    fn percent(&mut self) -> u8;

    /// Uniform roll in `[lo, hi)`; returns `lo` when the range is empty
    fn range(&mut self, lo: u64, hi: u64) -> u64;

    /// One-in-`n` chance
    fn one_in(&mut self, n: u64) -> bool {
        self.range(0, n) == 0
    }

    fn coin(&mut self) -> bool {
        self.range(0, 2) == 1
    }
}

/// Deterministic dice backed by ChaCha8
#[derive(Debug, Clone)]
pub struct SeededDice {
    rng: ChaCha8Rng,
}

impl SeededDice {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: ChaCha8Rng::seed_from_u64(seed),
        }
    }

    pub fn from_entropy() -> Self {
        Self {
            rng: ChaCha8Rng::from_entropy(),
        }
    }
}

impl Dice for SeededDice {
    fn percent(&mut self) -> u8 {
        self.rng.gen_range(0..100)
    }

    fn range(&mut self, lo: u64, hi: u64) -> u64 {
        if hi <= lo {
            return lo;
        }
        self.rng.gen_range(lo..hi)
    }
}

/// Dice that replay a fixed list of raw values
///
/// Each call consumes one value: `percent` yields `value % 100`, `range`
/// yields `lo + value % (hi - lo)`. Once the script runs dry every call uses
/// `fallback`.
#[derive(Debug, Clone)]
pub struct ScriptedDice {
    rolls: VecDeque<u64>,
    fallback: u64,
}

impl ScriptedDice {
    pub fn new(rolls: impl IntoIterator<Item = u64>) -> Self {
        Self {
            rolls: rolls.into_iter().collect(),
            fallback: 99,
        }
    }

    /// Dice that always return the same raw value
    pub fn always(value: u64) -> Self {
        Self {
            rolls: VecDeque::new(),
            fallback: value,
        }
    }

    pub fn with_fallback(mut self, fallback: u64) -> Self {
        self.fallback = fallback;
        self
    }

    pub fn remaining(&self) -> usize {
        self.rolls.len()
    }

    fn next_raw(&mut self) -> u64 {
        self.rolls.pop_front().unwrap_or(self.fallback)
    }
}

impl Dice for ScriptedDice {
    fn percent(&mut self) -> u8 {
        (self.next_raw() % 100) as u8
    }

    fn range(&mut self, lo: u64, hi: u64) -> u64 {
        let raw = self.next_raw();
        if hi <= lo {
            return lo;
        }
        lo + raw % (hi - lo)
    }
}
