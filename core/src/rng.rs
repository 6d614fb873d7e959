//! Deterministic RNG for round resolution
//!
//! Every random decision the engine makes (damage rolls, crit rolls, speed
//! tiebreaks, fallback targets, opponent tactics) is drawn through the
//! [`BattleRng`] trait so a match replays exactly under a fixed seed.

use parity_scale_codec::{Decode, Encode};

/// Trait for random number generation in battles
pub trait BattleRng {
    /// Generate a random u32
    fn next_u32(&mut self) -> u32;

    /// Generate a random number in range [0, max)
    fn gen_range(&mut self, max: usize) -> usize {
        if max == 0 {
            return 0;
        }
        (self.next_u32() as usize) % max
    }

    /// Roll a number in the inclusive range [low, high]
    fn roll(&mut self, low: u32, high: u32) -> u32 {
        if high <= low {
            return low;
        }
        low + self.gen_range((high - low + 1) as usize) as u32
    }

    /// Succeeds with `chance` percent probability (a 1-100 draw <= chance)
    fn percent(&mut self, chance: u32) -> bool {
        self.roll(1, 100) <= chance
    }

    /// Pick one element of a slice uniformly
    fn choose<'a, T>(&mut self, items: &'a [T]) -> Option<&'a T> {
        if items.is_empty() {
            return None;
        }
        items.get(self.gen_range(items.len()))
    }
}

/// XorShift32 RNG - simple, fast, deterministic
///
/// This is suitable for game logic where cryptographic security is not needed.
/// The same seed will always produce the same sequence.
#[derive(Debug, Clone, PartialEq, Eq, Encode, Decode)]
pub struct XorShiftRng {
    state: u32,
}

impl XorShiftRng {
    /// Create a new RNG from a u64 seed
    ///
    /// The seed is folded into a u32, ensuring state is never 0.
    pub fn seed_from_u64(seed: u64) -> Self {
        let state = ((seed as u32) ^ ((seed >> 32) as u32)).max(1);
        Self { state }
    }

    /// Create a new RNG from a u32 seed
    pub fn seed_from_u32(seed: u32) -> Self {
        Self { state: seed.max(1) }
    }
}

impl BattleRng for XorShiftRng {
    fn next_u32(&mut self) -> u32 {
        let mut x = self.state;
        x ^= x << 13;
        x ^= x >> 17;
        x ^= x << 5;
        self.state = x;
        x
    }
}
