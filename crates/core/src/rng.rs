//! RNG module - injectable randomness for snake seeding and bonus placement
//!
//! The engine never reaches for a global generator. Every random draw goes
//! through [`RandomSource`], so tests can script exact outcomes and a seeded
//! [`SimpleRng`] replays the same game.

/// A source of uniformly distributed integers.
pub trait RandomSource {
    /// Draw a value in the half-open range `[low, high)`.
    ///
    /// Implementations must return `low` when the range is empty
    /// (`high <= low`).
    fn bounded(&mut self, low: i32, high: i32) -> i32;
}

impl<R: RandomSource + ?Sized> RandomSource for &mut R {
    fn bounded(&mut self, low: i32, high: i32) -> i32 {
        (**self).bounded(low, high)
    }
}

impl<R: RandomSource + ?Sized> RandomSource for Box<R> {
    fn bounded(&mut self, low: i32, high: i32) -> i32 {
        (**self).bounded(low, high)
    }
}

/// Simple LCG (Linear Congruential Generator) RNG
/// Uses constants from Numerical Recipes
#[derive(Debug, Clone)]
pub struct SimpleRng {
    state: u32,
}

impl SimpleRng {
    /// Create a new RNG with the given seed
    pub fn new(seed: u32) -> Self {
        // Avoid 0 seed which would produce all zeros
        let state = if seed == 0 { 1 } else { seed };
        Self { state }
    }

    /// Generate next random u32
    pub fn next_u32(&mut self) -> u32 {
        // LCG formula: (a * state + c) mod m
        // Using Numerical Recipes constants: a=1664525, c=1013904223, m=2^32
        self.state = self.state.wrapping_mul(1664525).wrapping_add(1013904223);
        self.state
    }

    /// Generate random value in range [0, max)
    pub fn next_range(&mut self, max: u32) -> u32 {
        // Multiply-shift keeps the well-mixed high bits; plain `%` would expose
        // the short period of the low LCG bits.
        ((self.next_u32() as u64 * max as u64) >> 32) as u32
    }

    /// Current internal state (a restart can keep drawing from here)
    pub fn state(&self) -> u32 {
        self.state
    }
}

impl Default for SimpleRng {
    fn default() -> Self {
        Self::new(1)
    }
}

impl RandomSource for SimpleRng {
    fn bounded(&mut self, low: i32, high: i32) -> i32 {
        if high <= low {
            return low;
        }
        let span = (high as i64 - low as i64) as u32;
        (low as i64 + self.next_range(span) as i64) as i32
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rng_deterministic() {
        let mut rng1 = SimpleRng::new(12345);
        let mut rng2 = SimpleRng::new(12345);

        // Same seed should produce same sequence
        for _ in 0..100 {
            assert_eq!(rng1.next_u32(), rng2.next_u32());
        }
    }

    #[test]
    fn test_rng_different_seeds() {
        let mut rng1 = SimpleRng::new(12345);
        let mut rng2 = SimpleRng::new(54321);

        let v1 = rng1.next_u32();
        let v2 = rng2.next_u32();
        assert_ne!(v1, v2);
    }

    #[test]
    fn test_zero_seed_is_not_stuck() {
        let mut rng = SimpleRng::new(0);
        assert_ne!(rng.next_u32(), rng.next_u32());
    }

    #[test]
    fn test_bounded_stays_in_range() {
        let mut rng = SimpleRng::new(7);
        for _ in 0..1000 {
            let v = rng.bounded(8, 32);
            assert!((8..32).contains(&v), "{} out of range", v);
        }
    }

    #[test]
    fn test_bounded_covers_small_range() {
        let mut rng = SimpleRng::new(99);
        let mut seen = [false; 3];
        for _ in 0..300 {
            seen[rng.bounded(0, 3) as usize] = true;
        }
        assert_eq!(seen, [true; 3]);
    }

    #[test]
    fn test_bounded_empty_range_returns_low() {
        let mut rng = SimpleRng::new(3);
        assert_eq!(rng.bounded(5, 5), 5);
        assert_eq!(rng.bounded(9, 2), 9);
    }

    #[test]
    fn test_bounded_through_mut_ref() {
        let mut rng = SimpleRng::new(42);
        let mut expected = rng.clone();
        let by_ref = (&mut rng).bounded(0, 100);
        assert_eq!(by_ref, expected.bounded(0, 100));
    }
}
