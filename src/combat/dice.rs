//! Injectable dice for every random decision in a battle
//!
//! Production battles roll on a seeded `ChaCha8Rng`, so the same seed
//! always replays the same battle. Tests script exact rolls instead.

use std::collections::VecDeque;

use rand::{Rng, RngCore};

/// Source of uniform rolls
pub trait Dice {
    /// Uniform roll in `1..=n`. Returns 0 when `n` is 0.
    fn rnd(&mut self, n: u32) -> u32;

    /// Percentile check: true when a d100 roll is at most `chance`
    fn percent(&mut self, chance: i64) -> bool {
        i64::from(self.rnd(100)) <= chance
    }

    /// Uniform index into a collection of `len` elements
    fn pick(&mut self, len: usize) -> usize {
        let n = u32::try_from(len).unwrap_or(u32::MAX);
        (self.rnd(n) as usize).saturating_sub(1)
    }
}

impl<R: RngCore> Dice for R {
    fn rnd(&mut self, n: u32) -> u32 {
        if n == 0 {
            return 0;
        }
        self.gen_range(1..=n)
    }
}

/// Replays a fixed script of rolls, then repeats a constant
///
/// Every roll is clamped into `1..=n`, so a constant of 1 means "always the
/// lowest roll": every percentile check passes, every pick takes the first
/// element and every variance term is at its maximum.
#[derive(Debug, Clone)]
pub struct ScriptedDice {
    script: VecDeque<u32>,
    fallback: u32,
}

impl ScriptedDice {
    pub fn constant(value: u32) -> Self {
        Self {
            script: VecDeque::new(),
            fallback: value,
        }
    }

    pub fn with_script(script: impl IntoIterator<Item = u32>, fallback: u32) -> Self {
        Self {
            script: script.into_iter().collect(),
            fallback,
        }
    }
}

impl Dice for ScriptedDice {
    fn rnd(&mut self, n: u32) -> u32 {
        if n == 0 {
            return 0;
        }
        let value = self.script.pop_front().unwrap_or(self.fallback);
        value.clamp(1, n)
    }
}
