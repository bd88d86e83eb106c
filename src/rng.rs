//! Deterministic sequence generator.
//!
//! Every seeded subsystem (graph builder, layout jitter, streamline seeding)
//! owns its own `SequenceGenerator`. Nothing is global: two instances created
//! with the same seed produce the same stream, and advancing one never
//! affects another.
//!
//! The algorithm is Mulberry32: 32-bit state with wrapping arithmetic, one
//! output per step divided by 2³² into `[0, 1)`.

/// Mulberry32 increment applied to the state on every draw.
const STATE_INCREMENT: u32 = 0x6D2B_79F5;

/// 2³², the divisor that maps a `u32` output into `[0, 1)`.
const OUTPUT_SCALE: f64 = 4_294_967_296.0;

/// Seeded pseudo-random float stream.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SequenceGenerator {
    state: u32,
}

impl SequenceGenerator {
    pub fn new(seed: u32) -> Self {
        Self { state: seed }
    }

    /// Next raw 32-bit output.
    #[inline]
    pub fn next_u32(&mut self) -> u32 {
        self.state = self.state.wrapping_add(STATE_INCREMENT);
        let t = self.state;
        let mut r = (t ^ (t >> 15)).wrapping_mul(t | 1);
        r ^= r.wrapping_add((r ^ (r >> 7)).wrapping_mul(r | 61));
        r ^ (r >> 14)
    }

    /// Next float in `[0, 1)`.
    #[inline]
    pub fn next_f64(&mut self) -> f64 {
        self.next_u32() as f64 / OUTPUT_SCALE
    }

    /// Uniform draw in `[lo, hi)`.
    #[inline]
    pub fn range(&mut self, lo: f32, hi: f32) -> f32 {
        (lo as f64 + self.next_f64() * (hi - lo) as f64) as f32
    }

    /// Uniform index in `[0, len)`. Returns 0 for `len == 0`.
    #[inline]
    pub fn index(&mut self, len: usize) -> usize {
        let idx = (self.next_f64() * len as f64).floor() as usize;
        idx.min(len.saturating_sub(1))
    }

    /// Centered jitter: `(r - 0.5) * span`.
    #[inline]
    pub fn jitter(&mut self, span: f32) -> f32 {
        ((self.next_f64() - 0.5) * span as f64) as f32
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn same_seed_same_stream() {
        let mut a = SequenceGenerator::new(42);
        let mut b = SequenceGenerator::new(42);
        for _ in 0..1000 {
            assert_eq!(a.next_u32(), b.next_u32());
        }
    }

    #[test]
    fn different_seeds_diverge() {
        let mut a = SequenceGenerator::new(1);
        let mut b = SequenceGenerator::new(2);
        let same = (0..64).filter(|_| a.next_u32() == b.next_u32()).count();
        assert!(same < 4, "streams for seeds 1 and 2 should not track each other");
    }

    #[test]
    fn matches_reference_output_for_seed_zero() {
        // First Mulberry32 output for seed 0, unrolled by hand:
        //   t = 0x6D2B79F5
        //   r = (t ^ t>>15) * (t|1)
        //   r ^= r + (r ^ r>>7) * (r|61)
        //   r ^ r>>14
        let mut g = SequenceGenerator::new(0);
        let t: u32 = 0x6D2B_79F5;
        let mut r = (t ^ (t >> 15)).wrapping_mul(t | 1);
        r ^= r.wrapping_add((r ^ (r >> 7)).wrapping_mul(r | 61));
        let expected = r ^ (r >> 14);
        assert_eq!(g.next_u32(), expected);
    }

    #[test]
    fn seed_42_reference_stream() {
        let mut g = SequenceGenerator::new(42);
        assert_eq!(g.next_u32(), 2_581_720_956);
        assert_eq!(g.next_u32(), 1_925_393_290);
        assert_eq!(g.next_u32(), 3_661_312_704);

        let mut g = SequenceGenerator::new(42);
        assert!((g.next_f64() - 0.601_103_751_920_163_6).abs() < 1e-15);
    }

    #[test]
    fn floats_stay_in_unit_interval() {
        let mut g = SequenceGenerator::new(123);
        for _ in 0..10_000 {
            let v = g.next_f64();
            assert!((0.0..1.0).contains(&v));
        }
    }

    #[test]
    fn index_never_reaches_len() {
        let mut g = SequenceGenerator::new(9);
        for _ in 0..10_000 {
            assert!(g.index(7) < 7);
        }
        assert_eq!(g.index(0), 0);
    }

    #[test]
    fn clones_are_independent() {
        let mut a = SequenceGenerator::new(5);
        let mut b = a.clone();
        a.next_u32();
        a.next_u32();
        let mut fresh = SequenceGenerator::new(5);
        assert_eq!(b.next_u32(), fresh.next_u32());
    }
}
