//! Deterministic random streams and the coordinate hash.
//!
//! Every peer must draw identical values from identical seeds, so the
//! generator is specified down to 32-bit wraparound semantics instead of
//! delegating to a library whose stream may change between versions. The
//! tests pin concrete outputs; any reimplementation (client ports included)
//! can be checked against them bit for bit.

use std::f64::consts::TAU;

/// A mulberry32 stream: one fixed odd increment per draw, then two rounds of
/// XOR-shift/multiply mixing, scaled into [0, 1).
#[derive(Debug, Clone)]
pub struct SeededRandom {
    state: u32,
}

impl SeededRandom {
    pub fn new(seed: u32) -> Self {
        Self { state: seed }
    }

    /// Next raw 32-bit output.
    pub fn next_u32(&mut self) -> u32 {
        self.state = self.state.wrapping_add(0x6D2B_79F5);
        let mut z = self.state;
        z = (z ^ (z >> 15)).wrapping_mul(z | 1);
        z ^= z.wrapping_add((z ^ (z >> 7)).wrapping_mul(z | 61));
        z ^ (z >> 14)
    }

    /// Next value in [0, 1).
    pub fn next_f64(&mut self) -> f64 {
        self.next_u32() as f64 / 4_294_967_296.0
    }

    /// Uniform value in [min, max). A degenerate or inverted range collapses
    /// to `min` (the stream still advances, keeping draws aligned).
    pub fn range(&mut self, min: f64, max: f64) -> f64 {
        let roll = self.next_f64();
        if max > min {
            min + roll * (max - min)
        } else {
            min
        }
    }

    /// Uniform integer in [min, max], inclusive.
    pub fn range_u32(&mut self, min: u32, max: u32) -> u32 {
        let roll = self.next_f64();
        if max > min {
            min + (roll * (max - min + 1) as f64) as u32
        } else {
            min
        }
    }

    /// Bernoulli draw with probability `p`.
    pub fn chance(&mut self, p: f64) -> bool {
        self.next_f64() < p
    }

    /// Uniform angle in [0, 2π).
    pub fn angle(&mut self) -> f64 {
        self.next_f64() * TAU
    }
}

/// Polynomial rolling hash over the string form `"{seed}_{x}_{y}"`, with
/// 32-bit signed wraparound and a non-negative result. Seeds an independent
/// stream per spatial cell so neighboring cells are uncorrelated even though
/// they share the galaxy seed.
pub fn cell_hash(seed: &str, x: i64, y: i64) -> u32 {
    let key = format!("{seed}_{x}_{y}");
    let mut h: i32 = 0;
    for byte in key.bytes() {
        h = (h << 5).wrapping_sub(h).wrapping_add(byte as i32);
    }
    h.unsigned_abs()
}

/// An ordered weighted catalog with cumulative-weight sampling. Order is
/// explicit: draws walk the entries in construction order, never in any
/// map's iteration order.
#[derive(Debug, Clone)]
pub struct WeightedTable<T> {
    entries: Vec<(f64, T)>,
    total: f64,
}

impl<T> WeightedTable<T> {
    /// Build from (weight, payload) records. Non-positive weights are kept
    /// (they just never win); returns `None` when no weight is positive.
    pub fn new(items: impl IntoIterator<Item = (f64, T)>) -> Option<Self> {
        let entries: Vec<(f64, T)> = items.into_iter().collect();
        let total: f64 = entries.iter().map(|(w, _)| w.max(0.0)).sum();
        if entries.is_empty() || total <= 0.0 {
            return None;
        }
        Some(Self { entries, total })
    }

    /// Draw one payload using a single value from the stream.
    pub fn sample(&self, rng: &mut SeededRandom) -> &T {
        let roll = rng.next_f64() * self.total;
        let mut acc = 0.0;
        for (weight, payload) in &self.entries {
            acc += weight.max(0.0);
            if roll < acc {
                return payload;
            }
        }
        // Float accumulation can leave roll == total; the last entry wins.
        &self.entries[self.entries.len() - 1].1
    }
}
