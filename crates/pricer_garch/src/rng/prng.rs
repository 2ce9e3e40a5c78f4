//! Pseudo-random number generator wrapper for Monte Carlo simulations.
//!
//! This module provides [`PricerRng`], a seeded PRNG wrapper that offers
//! reproducible uniform variates and independent per-worker streams.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use super::{RngError, UniformSource};

/// Golden-ratio increment used to spread stream identifiers across the seed space.
const STREAM_INCREMENT: u64 = 0x9E37_79B9_7F4A_7C15;

/// Monte Carlo simulation random number generator.
///
/// Provides seeded, reproducible uniform variates. Two generators built from
/// the same seed (and stream) produce identical sequences.
///
/// # Examples
///
/// ```rust
/// use pricer_garch::rng::PricerRng;
///
/// let mut rng = PricerRng::from_seed(42);
///
/// // Single value generation
/// let u: f64 = rng.gen_uniform();
/// assert!(u >= 0.0 && u < 1.0);
///
/// // Batch generation (zero allocation)
/// let mut buffer = vec![0.0; 100];
/// rng.fill_uniform(&mut buffer);
/// ```
#[derive(Clone, Debug)]
pub struct PricerRng {
    /// The underlying PRNG instance.
    inner: StdRng,
    /// The seed used for initialisation (stored for reproducibility tracking).
    seed: u64,
}

impl PricerRng {
    /// Creates a new RNG instance initialised with the given seed.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use pricer_garch::rng::PricerRng;
    ///
    /// let mut rng1 = PricerRng::from_seed(12345);
    /// let mut rng2 = PricerRng::from_seed(12345);
    ///
    /// // Same seed produces identical sequences
    /// assert_eq!(rng1.gen_uniform(), rng2.gen_uniform());
    /// ```
    #[inline]
    pub fn from_seed(seed: u64) -> Self {
        Self {
            inner: StdRng::seed_from_u64(seed),
            seed,
        }
    }

    /// Creates the generator for an independent stream derived from `seed`.
    ///
    /// Parallel workers each take their own stream so that no generator state
    /// is shared between threads. Stream 0 is identical to
    /// [`from_seed`](Self::from_seed).
    ///
    /// # Examples
    ///
    /// ```rust
    /// use pricer_garch::rng::PricerRng;
    ///
    /// let mut a = PricerRng::from_stream(7, 0);
    /// let mut b = PricerRng::from_seed(7);
    /// assert_eq!(a.gen_uniform(), b.gen_uniform());
    /// ```
    #[inline]
    pub fn from_stream(seed: u64, stream: u64) -> Self {
        let derived = seed.wrapping_add(stream.wrapping_mul(STREAM_INCREMENT));
        Self {
            inner: StdRng::seed_from_u64(derived),
            seed: derived,
        }
    }

    /// Returns the seed used for initialisation.
    ///
    /// For stream generators this is the derived seed.
    #[inline]
    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// Generates a single uniform random value in [0, 1).
    #[inline]
    pub fn gen_uniform(&mut self) -> f64 {
        self.inner.gen()
    }

    /// Fills the buffer with uniform random values in [0, 1).
    ///
    /// Empty buffers are handled gracefully (no operation).
    #[inline]
    pub fn fill_uniform(&mut self, buffer: &mut [f64]) {
        for value in buffer.iter_mut() {
            *value = self.inner.gen();
        }
    }
}

impl UniformSource for PricerRng {
    #[inline]
    fn next_uniform(&mut self) -> Result<f64, RngError> {
        Ok(self.gen_uniform())
    }
}
