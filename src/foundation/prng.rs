//! Seeded pseudo-random streams.
//!
//! Every random decision in the layout engine draws from an explicit [`SeededRng`] owned by the
//! caller. There is no process-wide generator: reproducibility across runs and platforms is part
//! of the engine contract, so streams use fixed-width `u32` arithmetic only.

/// Mulberry32 stream producing floats in `[0, 1)`.
///
/// Two streams built from the same seed yield identical sequences. Seed `0` is valid: the state
/// is advanced by an odd increment before mixing, so the stream never sticks at zero.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SeededRng {
    state: u32,
}

impl SeededRng {
    const INCREMENT: u32 = 0x6D2B_79F5;
    const SCALE: f64 = 4_294_967_296.0;

    /// Create a stream from a 32-bit seed.
    pub fn new(seed: u32) -> Self {
        Self { state: seed }
    }

    /// Next raw 32-bit output.
    pub fn next_u32(&mut self) -> u32 {
        self.state = self.state.wrapping_add(Self::INCREMENT);
        let mut t = self.state;
        t = (t ^ (t >> 15)).wrapping_mul(t | 1);
        t ^= t.wrapping_add((t ^ (t >> 7)).wrapping_mul(t | 61));
        t ^ (t >> 14)
    }

    /// Next float in `[0, 1)`.
    pub fn next_f64(&mut self) -> f64 {
        f64::from(self.next_u32()) / Self::SCALE
    }

    /// Uniform index in `[0, len)`; returns `0` (and still consumes a draw) when `len == 0`.
    pub fn next_index(&mut self, len: usize) -> usize {
        let r = self.next_f64();
        if len == 0 {
            return 0;
        }
        ((r * len as f64) as usize).min(len - 1)
    }

    /// Uniform float in `[lo, hi)`.
    pub fn next_range(&mut self, lo: f64, hi: f64) -> f64 {
        lo + self.next_f64() * (hi - lo)
    }
}

/// Fisher-Yates shuffle, walking from the last index down.
pub fn shuffle<T>(slice: &mut [T], rng: &mut SeededRng) {
    for i in (1..slice.len()).rev() {
        let j = rng.next_index(i + 1);
        slice.swap(i, j);
    }
}

/// Derive an independent seed for one element of a keyed family (e.g. one day of the garden).
///
/// Mixing is integer-only so the derived seed is identical on every platform.
pub fn derive_seed(base: u32, key: u64) -> u32 {
    let lo = key as u32;
    let hi = (key >> 32) as u32;
    let mut h = base ^ 0x9E37_79B9;
    for word in [lo, hi] {
        h ^= word;
        h = h.wrapping_mul(0x85EB_CA6B);
        h ^= h >> 13;
        h = h.wrapping_mul(0xC2B2_AE35);
        h ^= h >> 16;
    }
    h
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/prng.rs"]
mod tests;
