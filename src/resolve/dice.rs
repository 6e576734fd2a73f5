//! Random sources for combat rolls and diagonal tie-breaks

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use std::collections::VecDeque;

/// Source of every random decision the engine makes
pub trait Dice: Send {
    /// Uniform integer in 1..=6
    fn roll_d6(&mut self) -> u32;

    /// Fair coin; `true` keeps the x-axis step of a diagonal move
    fn coin_flip(&mut self) -> bool;
}

/// Reproducible dice backed by ChaCha8
#[derive(Debug, Clone)]
pub struct SeededDice {
    seed: u64,
    rng: ChaCha8Rng,
}

impl SeededDice {
    pub fn new(seed: u64) -> Self {
        Self {
            seed,
            rng: ChaCha8Rng::seed_from_u64(seed),
        }
    }

    /// Seeded from `seed`, or from OS entropy when None
    pub fn from_seed_or_entropy(seed: Option<u64>) -> Self {
        Self::new(seed.unwrap_or_else(rand::random))
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }
}

impl Dice for SeededDice {
    fn roll_d6(&mut self) -> u32 {
        self.rng.gen_range(1..=6)
    }

    fn coin_flip(&mut self) -> bool {
        self.rng.gen_bool(0.5)
    }
}

/// Dice that replay scripted outcomes
///
/// Once a script runs out, rolls come up 1 and flips come up `true`.
#[derive(Debug, Clone, Default)]
pub struct LoadedDice {
    rolls: VecDeque<u32>,
    flips: VecDeque<bool>,
}

impl LoadedDice {
    pub fn new() -> Self {
        Self::default()
    }

    /// Rolls are clamped into 1..=6
    pub fn with_rolls(mut self, rolls: impl IntoIterator<Item = u32>) -> Self {
        self.rolls.extend(rolls.into_iter().map(|r| r.clamp(1, 6)));
        self
    }

    pub fn with_flips(mut self, flips: impl IntoIterator<Item = bool>) -> Self {
        self.flips.extend(flips);
        self
    }
}

impl Dice for LoadedDice {
    fn roll_d6(&mut self) -> u32 {
        self.rolls.pop_front().unwrap_or(1)
    }

    fn coin_flip(&mut self) -> bool {
        self.flips.pop_front().unwrap_or(true)
    }
}
