//! Deterministic random number generation and dice.
//!
//! ## Key Features
//!
//! - **Deterministic**: Same seed produces identical sequence
//! - **Context streams**: Asset shuffling and dice rolls draw from
//!   independent sequences
//!
//! ## Dice
//!
//! Reinforcement dice are behind the [`DiceRoller`] trait so that tests and
//! front ends can inject predetermined results with [`ScriptedDice`].
//!
//! ```
//! use conquest_engine::core::{DiceRoller, GameRng, ScriptedDice};
//!
//! let mut dice = GameRng::new(42).for_context("dice");
//! let roll = dice.roll(6);
//! assert!((1..=6).contains(&roll));
//!
//! let mut scripted = ScriptedDice::new([3, 5]);
//! assert_eq!(scripted.roll(6), 3);
//! assert_eq!(scripted.roll(6), 5);
//! assert_eq!(scripted.roll(6), 3);
//! ```

use std::collections::VecDeque;
use std::hash::{Hash, Hasher};

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

/// Seeded RNG behind asset shuffling and the default dice.
#[derive(Clone, Debug)]
pub struct GameRng {
    inner: ChaCha8Rng,
    seed: u64,
}

impl GameRng {
    /// Create a new RNG with the given seed.
    #[must_use]
    pub fn new(seed: u64) -> Self {
        Self {
            inner: ChaCha8Rng::seed_from_u64(seed),
            seed,
        }
    }

    /// Create an independent stream for a specific context.
    ///
    /// The same context always produces the same stream from the same seed.
    #[must_use]
    pub fn for_context(&self, context: &str) -> Self {
        use std::collections::hash_map::DefaultHasher;

        let mut hasher = DefaultHasher::new();
        self.seed.hash(&mut hasher);
        context.hash(&mut hasher);
        let context_seed = hasher.finish();

        Self {
            inner: ChaCha8Rng::seed_from_u64(context_seed),
            seed: context_seed,
        }
    }

    /// Generate a random integer in the given inclusive range.
    pub fn gen_range(&mut self, range: std::ops::RangeInclusive<u32>) -> u32 {
        self.inner.gen_range(range)
    }

    /// Shuffle a slice in place.
    pub fn shuffle<T>(&mut self, slice: &mut [T]) {
        use rand::seq::SliceRandom;
        slice.shuffle(&mut self.inner);
    }
}

/// Source of reinforcement dice rolls.
///
/// A roll is a single atomic draw in `1..=max_roll`.
pub trait DiceRoller {
    /// Roll the dice.
    fn roll(&mut self, max_roll: u32) -> u32;
}

impl DiceRoller for GameRng {
    fn roll(&mut self, max_roll: u32) -> u32 {
        self.gen_range(1..=max_roll.max(1))
    }
}

/// Dice returning a fixed sequence of results, cycling when exhausted.
///
/// Results are clamped into `1..=max_roll`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ScriptedDice {
    rolls: VecDeque<u32>,
}

impl ScriptedDice {
    /// Create dice that return `rolls` in order.
    ///
    /// # Panics
    ///
    /// Panics if `rolls` is empty.
    pub fn new(rolls: impl IntoIterator<Item = u32>) -> Self {
        let rolls: VecDeque<u32> = rolls.into_iter().collect();
        assert!(!rolls.is_empty(), "ScriptedDice needs at least one roll");
        Self { rolls }
    }
}

impl DiceRoller for ScriptedDice {
    fn roll(&mut self, max_roll: u32) -> u32 {
        let value = self.rolls.pop_front().unwrap_or(1);
        self.rolls.push_back(value);
        value.clamp(1, max_roll.max(1))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_determinism() {
        let mut rng1 = GameRng::new(42);
        let mut rng2 = GameRng::new(42);

        for _ in 0..100 {
            assert_eq!(rng1.gen_range(0..=1000), rng2.gen_range(0..=1000));
        }
    }

    #[test]
    fn test_context_is_deterministic() {
        let mut ctx1 = GameRng::new(42).for_context("dice");
        let mut ctx2 = GameRng::new(42).for_context("dice");
        let mut other = GameRng::new(42).for_context("shuffle");

        let seq1: Vec<_> = (0..10).map(|_| ctx1.gen_range(0..=1000)).collect();
        let seq2: Vec<_> = (0..10).map(|_| ctx2.gen_range(0..=1000)).collect();
        let seq3: Vec<_> = (0..10).map(|_| other.gen_range(0..=1000)).collect();

        assert_eq!(seq1, seq2);
        assert_ne!(seq1, seq3);
    }

    #[test]
    fn test_shuffle_keeps_elements() {
        let mut rng = GameRng::new(42);
        let mut data = vec![1, 2, 3, 4, 5, 6, 7, 8, 9, 10];

        rng.shuffle(&mut data);
        assert_ne!(data, vec![1, 2, 3, 4, 5, 6, 7, 8, 9, 10]);

        data.sort();
        assert_eq!(data, vec![1, 2, 3, 4, 5, 6, 7, 8, 9, 10]);
    }

    #[test]
    fn test_dice_range() {
        let mut rng = GameRng::new(7);
        let rolls: Vec<_> = (0..600).map(|_| rng.roll(6)).collect();

        assert!(rolls.iter().all(|r| (1..=6).contains(r)));
        for face in 1..=6 {
            assert!(rolls.contains(&face), "face {} never rolled", face);
        }
    }

    #[test]
    fn test_scripted_dice_cycle_and_clamp() {
        let mut dice = ScriptedDice::new([0, 4, 9]);

        assert_eq!(dice.roll(6), 1);
        assert_eq!(dice.roll(6), 4);
        assert_eq!(dice.roll(6), 6);
        assert_eq!(dice.roll(6), 1);
    }

    #[test]
    #[should_panic(expected = "at least one roll")]
    fn test_scripted_dice_empty() {
        let _ = ScriptedDice::new([]);
    }
}
