//! Deterministic random stream
//!
//! Mulberry32: a multiply-xor-shift generator over a single 32-bit counter.
//! The sequence is bit-compatible with the reference implementations in the
//! other council runtimes, which makes seeded episodes replayable across
//! languages. Used for scenario sampling and bounded offer jitter only.

/// Seeded generator yielding floats in `[0, 1)`
#[derive(Clone, Copy, Debug)]
pub struct Mulberry32 {
    state: u32,
}

impl Mulberry32 {
    pub fn new(seed: u32) -> Self {
        Self { state: seed }
    }

    /// Next float in `[0, 1)`
    pub fn next_f64(&mut self) -> f64 {
        self.state = self.state.wrapping_add(0x6D2B_79F5);
        let t = self.state;
        let mut r = (t ^ (t >> 15)).wrapping_mul(t | 1);
        r ^= r.wrapping_add((r ^ (r >> 7)).wrapping_mul(r | 61));
        f64::from(r ^ (r >> 14)) / 4_294_967_296.0
    }

    /// Uniform draw in `[min, max)`
    pub fn in_range(&mut self, min: f64, max: f64) -> f64 {
        min + (max - min) * self.next_f64()
    }
}
