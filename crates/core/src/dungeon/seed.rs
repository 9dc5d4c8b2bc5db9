//! Seedable randomness threaded explicitly through every generation stage.

use rand_chacha::ChaCha8Rng;
use rand_chacha::rand_core::{Rng, SeedableRng};

/// Source of raw 64-bit values plus the few derived draws generation needs.
///
/// Stages take `&mut impl RandomSource` instead of reaching for ambient state,
/// so tests can replay a scripted sequence.
pub trait RandomSource {
    fn next_u64(&mut self) -> u64;

    /// Uniform draw from `min..=max`.
    fn range_inclusive(&mut self, min: i32, max: i32) -> i32 {
        debug_assert!(min <= max, "empty range {min}..={max}");
        let range_size = (i64::from(max) - i64::from(min) + 1) as u64;
        (i64::from(min) + (self.next_u64() % range_size) as i64) as i32
    }

    /// Uniform index into a non-empty slice of length `len`.
    fn index(&mut self, len: usize) -> usize {
        debug_assert!(len > 0);
        (self.next_u64() % len as u64) as usize
    }

    fn coin_flip(&mut self) -> bool {
        self.next_u64() & 1 == 0
    }
}

pub struct DungeonRng {
    inner: ChaCha8Rng,
}

impl DungeonRng {
    pub fn from_seed(seed: u64) -> Self {
        Self { inner: ChaCha8Rng::seed_from_u64(seed) }
    }
}

impl RandomSource for DungeonRng {
    fn next_u64(&mut self) -> u64 {
        self.inner.next_u64()
    }
}

/// Independent seed for level `level_index` of a run.
pub fn derive_level_seed(run_seed: u64, level_index: u32) -> u64 {
    let mut mixed = run_seed ^ 0x9E37_79B9_7F4A_7C15;
    mixed ^= u64::from(level_index).wrapping_mul(0xBF58_476D_1CE4_E5B9);
    mixed ^= mixed >> 30;
    mixed = mixed.wrapping_mul(0xBF58_476D_1CE4_E5B9);
    mixed ^= mixed >> 27;
    mixed = mixed.wrapping_mul(0x94D0_49BB_1331_11EB);
    mixed ^ (mixed >> 31)
}
