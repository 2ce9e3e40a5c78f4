//! Monte Carlo aggregation.
//!
//! This module provides the orchestration layer that turns independent
//! replications into a price estimate.
//!
//! # Overview
//!
//! For each of N replications the aggregator:
//! 1. Simulates a fresh [`PathState`] (variance recursion, price path,
//!    barrier monitoring)
//! 2. Evaluates the discounted knock-in payoff
//! 3. Folds the sample into a [`PayoffAccumulator`]
//!
//! The estimate is the arithmetic mean `sum / N`.
//!
//! # Execution Modes
//!
//! - [`ExecutionMode::Sequential`]: one generator, replications in order.
//!   Bit-for-bit reproducible for a given seed.
//! - [`ExecutionMode::Parallel`]: replications split into fixed-size chunks,
//!   each chunk drawing from its own [`PricerRng`] stream on the Rayon pool.
//!   Partial accumulators are merged in chunk order after all chunks finish.
//!   Results differ from the sequential mode (different streams).
//!
//! # Domain Errors
//!
//! The first replication whose variance or price leaves the finite domain
//! aborts the whole run. The error is logged at `warn` with the replication index
//! and returned; no sample is ever replaced by zero or NaN.

use rayon::prelude::*;
use tracing::{debug, trace, warn};

use super::config::ParameterSet;
use super::error::{ConfigError, SimulationError};
use super::payoff::nan_max;
use super::state::PathState;
use crate::rng::{PricerRng, UniformSource};

/// Default number of replications per parallel chunk.
pub const DEFAULT_CHUNK_SIZE: usize = 4_096;

/// Pricing result of a Monte Carlo run.
///
/// # Examples
///
/// ```rust
/// use pricer_garch::mc::PricingResult;
///
/// let result = PricingResult {
///     price: 10.5,
///     std_error: 0.05,
///     std_dev: 12.8,
///     n_replications: 65_536,
///     barrier_hits: 32_768,
/// };
///
/// assert!((result.confidence_95() - 0.098).abs() < 1e-12);
/// assert_eq!(result.barrier_hit_ratio(), 0.5);
/// ```
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PricingResult {
    /// Mean discounted payoff over all replications.
    pub price: f64,
    /// Standard error of the price estimate.
    pub std_error: f64,
    /// Sample standard deviation of per-replication payoffs.
    pub std_dev: f64,
    /// Number of replications aggregated.
    pub n_replications: usize,
    /// Number of replications whose path crossed the barrier.
    pub barrier_hits: usize,
}

impl PricingResult {
    /// Returns the 95% confidence interval half-width.
    #[inline]
    pub fn confidence_95(&self) -> f64 {
        1.96 * self.std_error
    }

    /// Returns the 99% confidence interval half-width.
    #[inline]
    pub fn confidence_99(&self) -> f64 {
        2.576 * self.std_error
    }

    /// Fraction of replications that knocked in.
    #[inline]
    pub fn barrier_hit_ratio(&self) -> f64 {
        if self.n_replications == 0 {
            return 0.0;
        }
        self.barrier_hits as f64 / self.n_replications as f64
    }
}

/// Running totals of discounted payoff samples.
///
/// Holds the only cross-replication state of a run. Parallel workers each
/// own one accumulator; partials are combined with [`merge`](Self::merge).
///
/// # Examples
///
/// ```rust
/// use pricer_garch::mc::PayoffAccumulator;
///
/// let mut acc = PayoffAccumulator::new();
/// acc.push(2.0, true);
/// acc.push(0.0, false);
///
/// let result = acc.finish();
/// assert_eq!(result.price, 1.0);
/// assert_eq!(result.barrier_hits, 1);
/// ```
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct PayoffAccumulator {
    sum: f64,
    sum_sq: f64,
    count: usize,
    hits: usize,
}

impl PayoffAccumulator {
    /// Creates an empty accumulator.
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds one replication's discounted payoff.
    #[inline]
    pub fn push(&mut self, payoff: f64, barrier_triggered: bool) {
        self.sum += payoff;
        self.sum_sq += payoff * payoff;
        self.count += 1;
        if barrier_triggered {
            self.hits += 1;
        }
    }

    /// Merges another accumulator into this one.
    #[inline]
    pub fn merge(&mut self, other: &Self) {
        self.sum += other.sum;
        self.sum_sq += other.sum_sq;
        self.count += other.count;
        self.hits += other.hits;
    }

    /// Number of samples accumulated.
    #[inline]
    pub fn count(&self) -> usize {
        self.count
    }

    /// Running sum of payoffs.
    #[inline]
    pub fn sum(&self) -> f64 {
        self.sum
    }

    /// Produces the pricing result.
    ///
    /// An empty accumulator yields an all-zero result.
    pub fn finish(&self) -> PricingResult {
        if self.count == 0 {
            return PricingResult::default();
        }

        let n = self.count as f64;
        let mean = self.sum / n;
        let std_dev = if self.count > 1 {
            // Clamp rounding noise below zero; NaN from overflow stays NaN
            nan_max((self.sum_sq - n * mean * mean) / (n - 1.0), 0.0).sqrt()
        } else {
            0.0
        };

        PricingResult {
            price: mean,
            std_error: std_dev / n.sqrt(),
            std_dev,
            n_replications: self.count,
            barrier_hits: self.hits,
        }
    }
}

/// How replications are scheduled.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ExecutionMode {
    /// One generator, replications run in order on the calling thread.
    #[default]
    Sequential,
    /// Fixed-size chunks on the Rayon pool, one generator stream per chunk.
    Parallel {
        /// Replications per chunk (must be positive).
        chunk_size: usize,
    },
}

impl ExecutionMode {
    /// Parallel mode with [`DEFAULT_CHUNK_SIZE`].
    #[inline]
    pub fn parallel() -> Self {
        Self::Parallel {
            chunk_size: DEFAULT_CHUNK_SIZE,
        }
    }
}

/// Runs one replication and returns its discounted payoff and barrier flag.
///
/// # Errors
///
/// Propagates [`SimulationError`] from the path stages.
#[inline]
pub fn simulate_replication<R: UniformSource>(
    params: &ParameterSet,
    rng: &mut R,
) -> Result<(f64, bool), SimulationError> {
    let state = PathState::simulate(params, rng)?;
    Ok((state.discounted_payoff(params), state.barrier_triggered()))
}

/// Runs `range` replications on `rng`, tagging failures with their index.
fn accumulate_range<R: UniformSource>(
    params: &ParameterSet,
    rng: &mut R,
    range: std::ops::Range<usize>,
) -> Result<PayoffAccumulator, SimulationError> {
    let mut acc = PayoffAccumulator::new();
    for replication in range {
        match simulate_replication(params, rng) {
            Ok((payoff, triggered)) => acc.push(payoff, triggered),
            Err(err) => {
                warn!(replication, error = %err, "Replication failed; aborting run");
                return Err(err);
            }
        }
    }
    Ok(acc)
}

/// Prices the knock-in call sequentially with the supplied uniform source.
///
/// Each of the N replications simulates a fresh [`PathState`], drawing from
/// `rng` in order. Returns the sample mean of the discounted payoffs.
///
/// # Errors
///
/// - [`SimulationError::Configuration`] if `params` fails validation
/// - [`SimulationError::Domain`] or [`SimulationError::NonFinitePrice`] if
///   any replication leaves the domain
/// - [`SimulationError::RandomSource`] if the source is exhausted
///
/// # Examples
///
/// ```rust
/// use pricer_garch::mc::{price_option, ParameterSet};
/// use pricer_garch::rng::PricerRng;
///
/// let params = ParameterSet::reference()
///     .to_builder()
///     .n_replications(256)
///     .build()
///     .unwrap();
/// let mut rng = PricerRng::from_seed(42);
///
/// let result = price_option(&params, &mut rng).unwrap();
/// assert!(result.price >= 0.0);
/// assert_eq!(result.n_replications, 256);
/// ```
pub fn price_option<R: UniformSource>(
    params: &ParameterSet,
    rng: &mut R,
) -> Result<PricingResult, SimulationError> {
    params.validate()?;

    let n = params.n_replications();
    debug!(
        replications = n,
        horizon = params.horizon(),
        "Starting sequential pricing"
    );

    let result = accumulate_range(params, rng, 0..n)?.finish();

    debug!(
        price = result.price,
        std_error = result.std_error,
        barrier_hits = result.barrier_hits,
        "Sequential pricing complete"
    );
    Ok(result)
}

/// Prices the knock-in call across the Rayon thread pool.
///
/// Replications are split into chunks of `chunk_size`; chunk `c` draws from
/// `PricerRng::from_stream(seed, c)`. The chunk decomposition, not the
/// thread count, fixes which variates each replication sees.
///
/// # Errors
///
/// - [`SimulationError::Configuration`] if `params` fails validation or
///   `chunk_size` is zero
/// - [`SimulationError::Domain`] or [`SimulationError::NonFinitePrice`] if
///   any replication leaves the domain
pub fn price_option_parallel(
    params: &ParameterSet,
    seed: u64,
    chunk_size: usize,
) -> Result<PricingResult, SimulationError> {
    params.validate()?;
    if chunk_size == 0 {
        return Err(ConfigError::InvalidParameter {
            name: "chunk_size",
            value: "must be positive".to_string(),
        }
        .into());
    }

    let n = params.n_replications();
    let n_chunks = n.div_ceil(chunk_size);
    debug!(
        replications = n,
        chunks = n_chunks,
        chunk_size,
        threads = rayon::current_num_threads(),
        "Starting parallel pricing"
    );

    let partials: Vec<PayoffAccumulator> = (0..n_chunks)
        .into_par_iter()
        .map(|chunk| {
            let start = chunk * chunk_size;
            let end = (start + chunk_size).min(n);
            let mut rng = PricerRng::from_stream(seed, chunk as u64);
            trace!(chunk, start, end, "Simulating chunk");
            accumulate_range(params, &mut rng, start..end)
        })
        .collect::<Result<_, _>>()?;

    let total = partials
        .iter()
        .fold(PayoffAccumulator::new(), |mut acc, partial| {
            acc.merge(partial);
            acc
        });
    let result = total.finish();

    debug!(
        price = result.price,
        std_error = result.std_error,
        barrier_hits = result.barrier_hits,
        "Parallel pricing complete"
    );
    Ok(result)
}

/// Monte Carlo pricing engine.
///
/// Bundles a validated [`ParameterSet`], a seed and an [`ExecutionMode`].
///
/// # Examples
///
/// ```rust
/// use pricer_garch::mc::{MonteCarloPricer, ParameterSet};
///
/// let params = ParameterSet::reference()
///     .to_builder()
///     .n_replications(1_000)
///     .build()
///     .unwrap();
///
/// let pricer = MonteCarloPricer::new(params).unwrap().with_seed(42);
/// let first = pricer.price().unwrap();
/// let second = pricer.price().unwrap();
///
/// // Sequential runs with the same seed are bit-identical
/// assert_eq!(first, second);
/// ```
#[derive(Clone, Debug)]
pub struct MonteCarloPricer {
    params: ParameterSet,
    seed: u64,
    mode: ExecutionMode,
}

impl MonteCarloPricer {
    /// Creates a sequential pricer with seed 0.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if the parameter set is invalid.
    pub fn new(params: ParameterSet) -> Result<Self, ConfigError> {
        params.validate()?;
        Ok(Self {
            params,
            seed: 0,
            mode: ExecutionMode::Sequential,
        })
    }

    /// Sets the seed used by [`price`](Self::price).
    #[inline]
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    /// Sets the execution mode.
    #[inline]
    pub fn with_mode(mut self, mode: ExecutionMode) -> Self {
        self.mode = mode;
        self
    }

    /// Returns a reference to the parameter set.
    #[inline]
    pub fn params(&self) -> &ParameterSet {
        &self.params
    }

    /// Returns the seed.
    #[inline]
    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// Returns the execution mode.
    #[inline]
    pub fn mode(&self) -> ExecutionMode {
        self.mode
    }

    /// Prices the option using the configured seed and mode.
    ///
    /// # Errors
    ///
    /// See [`price_option`] and [`price_option_parallel`].
    pub fn price(&self) -> Result<PricingResult, SimulationError> {
        match self.mode {
            ExecutionMode::Sequential => {
                let mut rng = PricerRng::from_seed(self.seed);
                price_option(&self.params, &mut rng)
            }
            ExecutionMode::Parallel { chunk_size } => {
                price_option_parallel(&self.params, self.seed, chunk_size)
            }
        }
    }

    /// Prices the option sequentially with a caller-supplied source.
    ///
    /// The configured seed and mode are ignored.
    ///
    /// # Errors
    ///
    /// See [`price_option`].
    pub fn price_with<R: UniformSource>(
        &self,
        rng: &mut R,
    ) -> Result<PricingResult, SimulationError> {
        price_option(&self.params, rng)
    }
}
