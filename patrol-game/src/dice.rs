//! Shared probability primitive backing every roll in the engine.

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha20Rng;
use std::collections::VecDeque;

/// Source of every probabilistic outcome in the engine.
///
/// The campaign, encounters and combat only ever see this trait, so
/// headless drivers can script exact outcomes while interactive play runs
/// on a seeded generator.
pub trait Dice {
    /// True with probability `pct / 100`. The primitive itself accepts any
    /// percentage; call sites clamp where fairness matters.
    fn chance(&mut self, pct: f32) -> bool;

    /// Uniform integer draw over the inclusive range `[lo, hi]`.
    fn roll_range(&mut self, lo: i32, hi: i32) -> i32;

    /// Uniform index draw over `[0, len)`. `len` must be non-zero.
    fn pick_index(&mut self, len: usize) -> usize;
}

/// Expand a 64-bit seed into ChaCha key material.
fn seed_bytes(seed: u64) -> [u8; 32] {
    const LANE_MASKS: [u8; 4] = [0x00, 0xA5, 0x3C, 0x96];
    let mut bytes = [0u8; 32];
    for (i, byte) in bytes.iter_mut().enumerate() {
        let shift = (i % 8) * 8;
        *byte = ((seed >> shift) & 0xFF) as u8 ^ LANE_MASKS[i / 8];
    }
    bytes
}

/// Production dice over a ChaCha20 stream, seeded once at run start.
#[derive(Debug, Clone)]
pub struct SeededDice {
    rng: ChaCha20Rng,
}

impl SeededDice {
    #[must_use]
    pub fn new(seed: u64) -> Self {
        Self {
            rng: ChaCha20Rng::from_seed(seed_bytes(seed)),
        }
    }
}

impl Dice for SeededDice {
    fn chance(&mut self, pct: f32) -> bool {
        self.rng.random::<f32>() < pct / 100.0
    }

    fn roll_range(&mut self, lo: i32, hi: i32) -> i32 {
        self.rng.random_range(lo..=hi)
    }

    fn pick_index(&mut self, len: usize) -> usize {
        self.rng.random_range(0..len)
    }
}

/// Fully scripted dice for deterministic tests and headless drivers.
///
/// Draws are consumed front to back. Running a script dry is a bug in the
/// caller, so it panics rather than inventing entropy.
#[derive(Debug, Default)]
pub struct ScriptedDice {
    chances: VecDeque<bool>,
    rolls: VecDeque<i32>,
}

impl ScriptedDice {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn queue_chances<I: IntoIterator<Item = bool>>(&mut self, outcomes: I) {
        self.chances.extend(outcomes);
    }

    pub fn queue_rolls<I: IntoIterator<Item = i32>>(&mut self, rolls: I) {
        self.rolls.extend(rolls);
    }

    /// True once every scripted draw has been consumed. Tests use this to
    /// prove that a path consumed exactly the expected entropy.
    #[must_use]
    pub fn is_drained(&self) -> bool {
        self.chances.is_empty() && self.rolls.is_empty()
    }
}

impl Dice for ScriptedDice {
    fn chance(&mut self, _pct: f32) -> bool {
        self.chances
            .pop_front()
            .expect("scripted dice ran out of chance outcomes")
    }

    fn roll_range(&mut self, lo: i32, hi: i32) -> i32 {
        let value = self
            .rolls
            .pop_front()
            .expect("scripted dice ran out of rolls");
        value.clamp(lo, hi)
    }

    fn pick_index(&mut self, len: usize) -> usize {
        let value = self
            .rolls
            .pop_front()
            .expect("scripted dice ran out of rolls");
        usize::try_from(value.max(0)).unwrap_or(0) % len.max(1)
    }
}
