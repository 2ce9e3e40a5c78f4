//! Path generation for the GARCH-style barrier model.
//!
//! Two stages run per replication:
//!
//! 1. [`generate_volatility_path`] evolves the recursive variance term and
//!    derives the per-step drift multiplier `q` and diffusion scale `w`.
//! 2. [`evaluate_price_path`] rebuilds the price path multiplicatively from
//!    `q`, `w` and a fresh uniform shock per step.
//!
//! # Model
//!
//! ```text
//! var[i] = var[0] + α·var[i-1] + β·var[i-1]·λᵢ²      λᵢ ~ U[0, 1)
//! q[i]   = 1 + μ·Δt − var[i]·Δt/2
//! w[i]   = sqrt(var[i])·sqrt(Δt)
//! s[i]   = s[i-1]·(q[i] + εᵢ·w[i])                   εᵢ ~ U[0, 1)
//! ```
//!
//! The recursion always adds the *initial* variance `var[0]` as its base
//! level and uses the result directly as the radicand of the volatility.
//! Shocks are uniform, not centred normals, and prices are not floored.
//! A non-finite variance or price aborts the replication with an error.
//!
//! # Variate Consumption
//!
//! Each stage draws exactly `H − 1` variates. The variance path is completed
//! before the first price shock is drawn, so one replication consumes
//! `2·(H − 1)` variates: all λ first, then all ε.

use super::config::ParameterSet;
use super::error::{ConfigError, SimulationError};
use crate::rng::UniformSource;

/// Variance, drift multiplier and diffusion scale sequences of one path.
///
/// All three vectors have length H. Index 0 holds the initial variance and
/// zero drift/diffusion; steps `1..H` are produced by the recursion.
#[derive(Clone, Debug, PartialEq)]
pub struct VolatilityPath {
    /// Recursive variance term `var[i]`.
    pub variance: Vec<f64>,
    /// Drift multiplier `q[i]`.
    pub drift: Vec<f64>,
    /// Diffusion scale `w[i]`.
    pub diffusion: Vec<f64>,
}

impl VolatilityPath {
    /// Number of time steps in the path.
    #[inline]
    pub fn len(&self) -> usize {
        self.variance.len()
    }

    /// Returns true if the path holds no steps.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.variance.is_empty()
    }

    /// Volatility `sqrt(var[i])` at each step.
    pub fn volatility(&self) -> Vec<f64> {
        self.variance.iter().map(|v| v.sqrt()).collect()
    }
}

/// Generates the variance, drift and diffusion sequences for one replication.
///
/// # Arguments
///
/// * `params` - Validated parameter set
/// * `rng` - Uniform source; exactly `H − 1` variates are drawn
///
/// # Errors
///
/// - [`SimulationError::Domain`] if the recursion yields a negative, NaN or
///   infinite radicand at any step
/// - [`SimulationError::RandomSource`] if the source is exhausted
///
/// # Examples
///
/// ```rust
/// use pricer_garch::mc::{generate_volatility_path, ParameterSet};
/// use pricer_garch::rng::PricerRng;
///
/// let params = ParameterSet::builder().horizon(10).build().unwrap();
/// let mut rng = PricerRng::from_seed(42);
///
/// let path = generate_volatility_path(&params, &mut rng).unwrap();
/// assert_eq!(path.len(), 10);
/// assert_eq!(path.variance[0], params.initial_variance());
/// ```
pub fn generate_volatility_path<R: UniformSource>(
    params: &ParameterSet,
    rng: &mut R,
) -> Result<VolatilityPath, SimulationError> {
    let horizon = params.horizon();
    let base = params.initial_variance();
    let alpha = params.alpha();
    let beta = params.beta();
    let dt = params.dt();
    let sqrt_dt = dt.sqrt();
    let drift_base = 1.0 + params.mu() * dt;

    let mut variance = vec![0.0; horizon];
    let mut drift = vec![0.0; horizon];
    let mut diffusion = vec![0.0; horizon];
    variance[0] = base;

    for i in 1..horizon {
        let lambda = rng.next_uniform()?;
        let prev = variance[i - 1];
        let radicand = base + alpha * prev + beta * prev * lambda * lambda;

        if !radicand.is_finite() || radicand < 0.0 {
            return Err(SimulationError::Domain { step: i, radicand });
        }

        variance[i] = radicand;
        drift[i] = drift_base - radicand * dt * 0.5;
        diffusion[i] = radicand.sqrt() * sqrt_dt;
    }

    Ok(VolatilityPath {
        variance,
        drift,
        diffusion,
    })
}

/// Rebuilds the price path from drift multipliers and diffusion scales.
///
/// `s[0] = S₀` and `s[i] = s[i−1]·(q[i] + ε·w[i])` for `i` in `1..H`. No
/// floor is applied; a factor below zero yields a non-positive price.
///
/// # Errors
///
/// - [`SimulationError::Configuration`] if `drift` and `diffusion` do not
///   both have length H
/// - [`SimulationError::NonFinitePrice`] if a step overflows to an infinite
///   or NaN price
/// - [`SimulationError::RandomSource`] if the source is exhausted
///
/// # Examples
///
/// ```rust
/// use pricer_garch::mc::{evaluate_price_path, ParameterSet};
/// use pricer_garch::rng::ReplaySource;
///
/// let params = ParameterSet::builder().horizon(3).spot(100.0).build().unwrap();
/// let drift = [0.0, 1.01, 1.0];
/// let diffusion = [0.0, 0.0, 0.5];
/// let mut shocks = ReplaySource::new(vec![0.0, 0.5]).unwrap();
///
/// let prices = evaluate_price_path(&params, &drift, &diffusion, &mut shocks).unwrap();
/// assert_eq!(prices[0], 100.0);
/// assert!((prices[1] - 101.0).abs() < 1e-12);
/// assert!((prices[2] - 126.25).abs() < 1e-12);
/// ```
pub fn evaluate_price_path<R: UniformSource>(
    params: &ParameterSet,
    drift: &[f64],
    diffusion: &[f64],
    rng: &mut R,
) -> Result<Vec<f64>, SimulationError> {
    let horizon = params.horizon();
    if drift.len() != horizon || diffusion.len() != horizon {
        return Err(ConfigError::InvalidParameter {
            name: "path_length",
            value: format!(
                "drift ({}) and diffusion ({}) must both have length {}",
                drift.len(),
                diffusion.len(),
                horizon
            ),
        }
        .into());
    }

    let mut prices = vec![0.0; horizon];
    prices[0] = params.spot();

    for i in 1..horizon {
        let epsilon = rng.next_uniform()?;
        let price = prices[i - 1] * (drift[i] + epsilon * diffusion[i]);
        if !price.is_finite() {
            return Err(SimulationError::NonFinitePrice { step: i, price });
        }
        prices[i] = price;
    }

    Ok(prices)
}
