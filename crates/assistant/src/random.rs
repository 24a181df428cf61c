//! [`RandomSource`] implementations.

use memoria_core::random::RandomSource;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// `StdRng`-backed source, seeded from the OS or from a fixed seed.
pub struct StdRandom {
    rng: StdRng,
}

impl StdRandom {
    /// Seeded from operating-system entropy.
    pub fn new() -> Self {
        Self {
            rng: StdRng::from_os_rng(),
        }
    }

    /// Reproducible sequence for a given seed.
    pub fn seeded(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }
}

impl Default for StdRandom {
    fn default() -> Self {
        Self::new()
    }
}

impl RandomSource for StdRandom {
    fn index(&mut self, len: usize) -> usize {
        if len <= 1 {
            return 0;
        }
        self.rng.random_range(0..len)
    }

    fn between(&mut self, min: u64, max: u64) -> u64 {
        if max <= min {
            return min;
        }
        self.rng.random_range(min..max)
    }
}

/// Replays a fixed list of raw values, wrapping around.
///
/// Each value is reduced into the requested range, so `[0]` always picks the
/// first fallback and the shortest delay.
pub struct ScriptedRandom {
    values: Vec<u64>,
    cursor: usize,
}

impl ScriptedRandom {
    pub fn new(values: Vec<u64>) -> Self {
        Self { values, cursor: 0 }
    }

    fn next_raw(&mut self) -> u64 {
        if self.values.is_empty() {
            return 0;
        }
        let value = self.values[self.cursor % self.values.len()];
        self.cursor += 1;
        value
    }
}

impl RandomSource for ScriptedRandom {
    fn index(&mut self, len: usize) -> usize {
        let raw = self.next_raw();
        if len == 0 {
            return 0;
        }
        (raw % len as u64) as usize
    }

    fn between(&mut self, min: u64, max: u64) -> u64 {
        let raw = self.next_raw();
        if max <= min {
            return min;
        }
        min + raw % (max - min)
    }
}
