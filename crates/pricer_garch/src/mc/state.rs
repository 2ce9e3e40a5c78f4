//! Per-replication path state.
//!
//! A [`PathState`] is created for exactly one replication and dropped when
//! that replication finishes. Nothing is reused between replications, so no
//! value from one path can leak into the next.

use super::config::ParameterSet;
use super::error::SimulationError;
use super::paths::{evaluate_price_path, generate_volatility_path};
use super::payoff::discounted_payoff;
use crate::path_dependent::BarrierMonitor;
use crate::rng::UniformSource;

/// Complete state of one simulated path.
///
/// Holds four lockstep sequences of length H (variance, drift multiplier,
/// diffusion scale, price) and the sticky barrier flag.
///
/// # Examples
///
/// ```rust
/// use pricer_garch::mc::{ParameterSet, PathState};
/// use pricer_garch::rng::PricerRng;
///
/// let params = ParameterSet::builder().horizon(20).build().unwrap();
/// let mut rng = PricerRng::from_seed(42);
///
/// let state = PathState::simulate(&params, &mut rng).unwrap();
/// assert_eq!(state.len(), 20);
/// assert_eq!(state.prices()[0], params.spot());
/// assert_eq!(state.variance()[0], params.initial_variance());
/// ```
#[derive(Clone, Debug, PartialEq)]
pub struct PathState {
    variance: Vec<f64>,
    drift: Vec<f64>,
    diffusion: Vec<f64>,
    prices: Vec<f64>,
    barrier_triggered: bool,
    first_crossing: Option<usize>,
}

impl PathState {
    /// Simulates one replication from scratch.
    ///
    /// Runs the variance recursion, rebuilds the price path and monitors it
    /// against the barrier, in that order. Draws `2·(H − 1)` variates.
    ///
    /// # Errors
    ///
    /// Propagates [`SimulationError::Domain`],
    /// [`SimulationError::NonFinitePrice`] and
    /// [`SimulationError::RandomSource`] from the path stages.
    pub fn simulate<R: UniformSource>(
        params: &ParameterSet,
        rng: &mut R,
    ) -> Result<Self, SimulationError> {
        let volatility = generate_volatility_path(params, rng)?;
        let prices = evaluate_price_path(params, &volatility.drift, &volatility.diffusion, rng)?;

        let mut monitor = BarrierMonitor::new(params.barrier());
        monitor.observe_path(&prices);

        Ok(Self {
            variance: volatility.variance,
            drift: volatility.drift,
            diffusion: volatility.diffusion,
            prices,
            barrier_triggered: monitor.is_triggered(),
            first_crossing: monitor.first_crossing(),
        })
    }

    /// Number of time steps H.
    #[inline]
    pub fn len(&self) -> usize {
        self.prices.len()
    }

    /// Returns true if the state holds no steps.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.prices.is_empty()
    }

    /// Recursive variance sequence.
    #[inline]
    pub fn variance(&self) -> &[f64] {
        &self.variance
    }

    /// Drift multiplier sequence `q`.
    #[inline]
    pub fn drift(&self) -> &[f64] {
        &self.drift
    }

    /// Diffusion scale sequence `w`.
    #[inline]
    pub fn diffusion(&self) -> &[f64] {
        &self.diffusion
    }

    /// Price sequence `s`.
    #[inline]
    pub fn prices(&self) -> &[f64] {
        &self.prices
    }

    /// Terminal price `s[H−1]`.
    #[inline]
    pub fn terminal_price(&self) -> f64 {
        self.prices.last().copied().unwrap_or(f64::NAN)
    }

    /// Whether any monitored price strictly exceeded the barrier.
    #[inline]
    pub fn barrier_triggered(&self) -> bool {
        self.barrier_triggered
    }

    /// Path index of the first barrier crossing, if any.
    #[inline]
    pub fn first_crossing(&self) -> Option<usize> {
        self.first_crossing
    }

    /// Discounted knock-in call payoff of this path.
    #[inline]
    pub fn discounted_payoff(&self, params: &ParameterSet) -> f64 {
        discounted_payoff(
            self.terminal_price(),
            params.strike(),
            self.barrier_triggered,
            params.rate(),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rng::{PricerRng, ReplaySource};
    use approx::assert_relative_eq;

    /// Constant-variance parameters: q = 0.9998, w = 0.02 at every step.
    fn flat_params() -> ParameterSet {
        ParameterSet::builder()
            .horizon(5)
            .dt(0.01)
            .alpha(0.0)
            .beta(0.0)
            .mu(0.0)
            .rate(0.05)
            .initial_variance(0.04)
            .spot(100.0)
            .barrier(101.0)
            .strike(100.0)
            .build()
            .unwrap()
    }

    #[test]
    fn test_lockstep_lengths_and_initial_values() {
        let params = ParameterSet::reference();
        let mut rng = PricerRng::from_seed(3);

        let state = PathState::simulate(&params, &mut rng).unwrap();

        assert_eq!(state.len(), 252);
        assert!(!state.is_empty());
        assert_eq!(state.variance().len(), 252);
        assert_eq!(state.drift().len(), 252);
        assert_eq!(state.diffusion().len(), 252);
        assert_eq!(state.prices()[0], params.spot());
        assert_eq!(state.variance()[0], params.initial_variance());
        assert_eq!(state.terminal_price(), state.prices()[251]);
    }

    #[test]
    fn test_forced_shock_crosses_barrier() {
        let params = flat_params();
        // Four λ draws (irrelevant with α = β = 0), then four ε draws
        let shocks = vec![0.0, 0.0, 0.0, 0.0, 0.0, 0.999, 0.0, 0.0];
        let mut source = ReplaySource::new(shocks).unwrap();

        let state = PathState::simulate(&params, &mut source).unwrap();

        assert!(state.barrier_triggered());
        assert_eq!(state.first_crossing(), Some(2));
        assert_eq!(source.remaining(), 0);

        let q = 1.0 - 0.04 * 0.01 * 0.5;
        let w = 0.2 * 0.1;
        let expected_terminal = 100.0 * q * (q + 0.999 * w) * q * q;
        assert_relative_eq!(state.terminal_price(), expected_terminal, epsilon = 1e-9);
        assert_relative_eq!(
            state.discounted_payoff(&params),
            (expected_terminal - 100.0) * (-0.05_f64).exp(),
            epsilon = 1e-9
        );
    }

    #[test]
    fn test_no_shock_never_crosses() {
        let params = flat_params();
        let mut source = ReplaySource::new(vec![0.0; 8]).unwrap();

        let state = PathState::simulate(&params, &mut source).unwrap();

        assert!(!state.barrier_triggered());
        assert_eq!(state.first_crossing(), None);
        assert!(state.prices().iter().skip(1).all(|&p| p <= 101.0));
        assert_eq!(state.discounted_payoff(&params), 0.0);
    }

    #[test]
    fn test_each_simulation_is_independent() {
        let params = ParameterSet::builder().horizon(30).build().unwrap();
        let mut rng = PricerRng::from_seed(11);

        let first = PathState::simulate(&params, &mut rng).unwrap();
        let second = PathState::simulate(&params, &mut rng).unwrap();

        // Fresh state: initial values are reset for every replication
        assert_eq!(second.prices()[0], params.spot());
        assert_eq!(second.variance()[0], params.initial_variance());
        assert_ne!(first.prices(), second.prices());
    }
}
