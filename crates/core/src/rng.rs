//! RNG module - deterministic randomness for board generation
//!
//! Board generation draws two kinds of numbers: candidate edge weights and
//! per-piece rotation counts. Both go through [`RandomSource`] so tests can
//! script exact sequences, while games use the seeded [`SimpleRng`].

/// Source of bounded random integers.
pub trait RandomSource {
    /// Next value, uniformly distributed over `[0, bound)`.
    ///
    /// `bound` must be non-zero.
    fn next_below(&mut self, bound: u32) -> u32;
}

/// Simple LCG (Linear Congruential Generator) RNG
/// Uses constants from Numerical Recipes
#[derive(Debug, Clone)]
pub struct SimpleRng {
    state: u32,
    seed: u32,
}

impl SimpleRng {
    /// Create a new RNG with the given seed
    pub fn new(seed: u32) -> Self {
        let state = seed ^ 0x9E37_79B9;
        Self { state, seed }
    }

    /// The seed this generator was created with.
    pub fn seed(&self) -> u32 {
        self.seed
    }

    /// Generate next random u32
    pub fn next_u32(&mut self) -> u32 {
        // (a * state + c) mod 2^32
        self.state = self.state.wrapping_mul(1664525).wrapping_add(1013904223);
        // Low LCG bits have short periods; fold the high half down.
        self.state ^ (self.state >> 16)
    }
}

impl RandomSource for SimpleRng {
    fn next_below(&mut self, bound: u32) -> u32 {
        debug_assert!(bound > 0, "next_below called with a zero bound");
        self.next_u32() % bound.max(1)
    }
}

impl Default for SimpleRng {
    fn default() -> Self {
        Self::new(1)
    }
}

/// Replays a fixed list of values, wrapping around when exhausted.
///
/// Values are reduced modulo the requested bound.
#[derive(Debug, Clone)]
pub struct ScriptedRng {
    values: Vec<u32>,
    cursor: usize,
}

impl ScriptedRng {
    pub fn new(values: Vec<u32>) -> Self {
        Self { values, cursor: 0 }
    }

    /// A source that always yields zero (no rotation, equal weights).
    pub fn zeros() -> Self {
        Self::new(vec![0])
    }
}

impl RandomSource for ScriptedRng {
    fn next_below(&mut self, bound: u32) -> u32 {
        if self.values.is_empty() {
            return 0;
        }
        let v = self.values[self.cursor % self.values.len()];
        self.cursor += 1;
        v % bound.max(1)
    }
}
