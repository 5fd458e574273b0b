//! Deterministic Random Number Generator
//!
//! A 32-bit linear congruential generator. Given the same seed, produces the
//! identical draw sequence on all platforms, which is what makes a play
//! reproducible from its seed alone.

use serde::{Deserialize, Serialize};

/// LCG multiplier (Numerical Recipes constants).
pub const LCG_MULTIPLIER: u32 = 1_664_525;

/// LCG increment.
pub const LCG_INCREMENT: u32 = 1_013_904_223;

/// Salt for the secondary route-assignment stream.
///
/// XORed into the play seed so route picks are decorrelated from the
/// formation/coverage draws while staying fully deterministic.
pub const ROUTE_STREAM_SALT: u32 = 0x9E37_79B9;

/// Deterministic PRNG over 32-bit state.
///
/// # Determinism Guarantee
///
/// State advances via `state = (1664525 * state + 1013904223) mod 2^32` with
/// wrapping u32 arithmetic. `next_f64` divides the state by 2^32; both steps
/// are exact in IEEE f64, so the sequence is identical across platforms and
/// across reimplementations that use the same constants.
///
/// # Example
///
/// ```
/// use daily_read::core::rng::PlayRng;
///
/// let mut rng = PlayRng::new(42);
/// let value = rng.next_f64();
/// assert!(value >= 0.0 && value < 1.0);
/// ```
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct PlayRng {
    state: u32,
}

impl PlayRng {
    /// Create a new RNG from a 32-bit seed.
    pub fn new(seed: u32) -> Self {
        Self { state: seed }
    }

    /// Create the secondary stream used for route-role assignment.
    ///
    /// Seeded with `seed ^ ROUTE_STREAM_SALT` so that adding or removing
    /// draws on the primary stream never shifts route picks.
    pub fn route_stream(seed: u32) -> Self {
        Self::new(seed ^ ROUTE_STREAM_SALT)
    }

    /// Advance the state and return a float in `[0, 1)`.
    #[inline]
    pub fn next_f64(&mut self) -> f64 {
        self.state = self
            .state
            .wrapping_mul(LCG_MULTIPLIER)
            .wrapping_add(LCG_INCREMENT);
        f64::from(self.state) / 4_294_967_296.0
    }

    /// Map the next draw to an index in `[0, len)`.
    ///
    /// The trailing modulo guards the float boundary where truncation of
    /// `next_f64() * len` could otherwise land on `len` itself.
    #[inline]
    pub fn pick_index(&mut self, len: usize) -> usize {
        (self.next_f64() * len as f64) as usize % len
    }

    /// Select an element from a slice, consuming exactly one draw.
    ///
    /// # Panics
    ///
    /// Panics if `items` is empty. Every caller draws from a fixed non-empty
    /// catalog table.
    #[inline]
    pub fn choice<'a, T>(&mut self, items: &'a [T]) -> &'a T {
        &items[self.pick_index(items.len())]
    }

    /// Get current state (for checkpointing/debugging).
    pub fn state(&self) -> u32 {
        self.state
    }
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rng_determinism() {
        // Same seed must produce same sequence
        let mut rng1 = PlayRng::new(12345);
        let mut rng2 = PlayRng::new(12345);

        for _ in 0..1000 {
            assert_eq!(rng1.next_f64(), rng2.next_f64());
        }
    }

    #[test]
    fn test_rng_different_seeds() {
        let mut rng1 = PlayRng::new(12345);
        let mut rng2 = PlayRng::new(54321);

        assert_ne!(rng1.next_f64(), rng2.next_f64());
    }

    #[test]
    fn test_rng_known_states() {
        // These values must never change!
        // If they do, every previously generated play regenerates differently.
        let mut rng = PlayRng::new(42);

        rng.next_f64();
        assert_eq!(rng.state(), 1_083_814_273);
        rng.next_f64();
        assert_eq!(rng.state(), 378_494_188);
        rng.next_f64();
        assert_eq!(rng.state(), 2_479_403_867);
    }

    #[test]
    fn test_next_f64_range() {
        let mut rng = PlayRng::new(1234);

        for _ in 0..1000 {
            let val = rng.next_f64();
            assert!((0.0..1.0).contains(&val));
        }
    }

    #[test]
    fn test_pick_index_in_bounds() {
        let mut rng = PlayRng::new(5678);

        for _ in 0..1000 {
            assert!(rng.pick_index(7) < 7);
        }

        // Edge case: len = 1
        assert_eq!(rng.pick_index(1), 0);
    }

    #[test]
    fn test_choice_consumes_one_draw() {
        let items = ["a", "b", "c", "d"];

        let mut picker = PlayRng::new(777);
        picker.choice(&items);

        let mut counter = PlayRng::new(777);
        counter.next_f64();

        assert_eq!(picker.state(), counter.state());
    }

    #[test]
    fn test_route_stream_diverges_from_primary() {
        let seed = 1_884_493_844;
        let mut primary = PlayRng::new(seed);
        let mut secondary = PlayRng::route_stream(seed);

        assert_ne!(primary.next_f64(), secondary.next_f64());
    }

    #[test]
    fn test_route_stream_determinism() {
        let mut a = PlayRng::route_stream(42);
        let mut b = PlayRng::route_stream(42);

        for _ in 0..100 {
            assert_eq!(a.next_f64(), b.next_f64());
        }
    }
}
