//! Model, contract and simulation parameters.
//!
//! This module provides [`ParameterSet`], the immutable runtime configuration
//! shared by every replication, and its validating builder.

use super::error::ConfigError;

/// Minimum number of discrete time steps per path.
pub const MIN_HORIZON: usize = 2;

/// Maximum number of discrete time steps per path.
pub const MAX_HORIZON: usize = 100_000;

/// Maximum number of replications allowed.
pub const MAX_REPLICATIONS: usize = 100_000_000;

/// Replication count of the reference scenario.
pub const REFERENCE_REPLICATIONS: usize = 65_536;

/// Immutable parameter set for the GARCH barrier pricer.
///
/// Groups the variance recursion coefficients, the price dynamics, the
/// contract terms and the replication count. Use [`ParameterSetBuilder`] to
/// construct instances; validation happens at build time so a `ParameterSet`
/// is always usable.
///
/// # Invariants
///
/// - `horizon >= 2`
/// - `dt > 0`
/// - `initial_variance >= 0`
/// - `n_replications >= 1`
/// - every floating-point field is finite
///
/// # Examples
///
/// ```rust
/// use pricer_garch::mc::ParameterSet;
///
/// let params = ParameterSet::builder()
///     .horizon(252)
///     .n_replications(10_000)
///     .build()
///     .expect("valid parameters");
///
/// assert_eq!(params.horizon(), 252);
/// assert_eq!(params.n_replications(), 10_000);
/// ```
#[derive(Clone, Debug, PartialEq)]
pub struct ParameterSet {
    horizon: usize,
    dt: f64,
    alpha: f64,
    beta: f64,
    mu: f64,
    rate: f64,
    initial_variance: f64,
    spot: f64,
    barrier: f64,
    strike: f64,
    n_replications: usize,
}

impl ParameterSet {
    /// Creates a new builder seeded with the reference scenario.
    #[inline]
    pub fn builder() -> ParameterSetBuilder {
        ParameterSetBuilder::default()
    }

    /// Returns the reference scenario.
    ///
    /// α=0.1559, β=0.84, μ=0.02268, Δt=0.003968, r=0.02268, σ₀²=0.042377,
    /// S₀=2328.95, B=2340.0, K=2330.0, H=252, N=65536.
    pub fn reference() -> Self {
        let builder = ParameterSetBuilder::default();
        Self {
            horizon: builder.horizon,
            dt: builder.dt,
            alpha: builder.alpha,
            beta: builder.beta,
            mu: builder.mu,
            rate: builder.rate,
            initial_variance: builder.initial_variance,
            spot: builder.spot,
            barrier: builder.barrier,
            strike: builder.strike,
            n_replications: builder.n_replications,
        }
    }

    /// Returns a builder pre-filled with this parameter set.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use pricer_garch::mc::ParameterSet;
    ///
    /// let small = ParameterSet::reference()
    ///     .to_builder()
    ///     .n_replications(256)
    ///     .build()
    ///     .unwrap();
    /// assert_eq!(small.n_replications(), 256);
    /// assert_eq!(small.horizon(), 252);
    /// ```
    pub fn to_builder(&self) -> ParameterSetBuilder {
        ParameterSetBuilder {
            horizon: self.horizon,
            dt: self.dt,
            alpha: self.alpha,
            beta: self.beta,
            mu: self.mu,
            rate: self.rate,
            initial_variance: self.initial_variance,
            spot: self.spot,
            barrier: self.barrier,
            strike: self.strike,
            n_replications: self.n_replications,
        }
    }

    /// Number of discrete time steps H (including the initial point).
    #[inline]
    pub fn horizon(&self) -> usize {
        self.horizon
    }

    /// Step size Δt.
    #[inline]
    pub fn dt(&self) -> f64 {
        self.dt
    }

    /// Coefficient α applied to the previous variance term.
    #[inline]
    pub fn alpha(&self) -> f64 {
        self.alpha
    }

    /// Coefficient β applied to the shocked previous variance term.
    #[inline]
    pub fn beta(&self) -> f64 {
        self.beta
    }

    /// Drift μ.
    #[inline]
    pub fn mu(&self) -> f64 {
        self.mu
    }

    /// Risk-free rate r used for discounting.
    #[inline]
    pub fn rate(&self) -> f64 {
        self.rate
    }

    /// Initial variance σ₀².
    #[inline]
    pub fn initial_variance(&self) -> f64 {
        self.initial_variance
    }

    /// Initial price S₀.
    #[inline]
    pub fn spot(&self) -> f64 {
        self.spot
    }

    /// Upward barrier level B.
    #[inline]
    pub fn barrier(&self) -> f64 {
        self.barrier
    }

    /// Strike K.
    #[inline]
    pub fn strike(&self) -> f64 {
        self.strike
    }

    /// Number of independent replications N.
    #[inline]
    pub fn n_replications(&self) -> usize {
        self.n_replications
    }

    /// Single-period discount factor `exp(-r)`.
    ///
    /// Applied once per path regardless of horizon length.
    #[inline]
    pub fn discount_factor(&self) -> f64 {
        (-self.rate).exp()
    }

    /// Validates the parameter set.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if:
    /// - `horizon` is below 2 or greater than 100,000
    /// - `dt` is not strictly positive and finite
    /// - `n_replications` is 0 or greater than 100,000,000
    /// - `initial_variance` is negative
    /// - any floating-point parameter is NaN or infinite
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.horizon < MIN_HORIZON || self.horizon > MAX_HORIZON {
            return Err(ConfigError::InvalidHorizon(self.horizon));
        }
        if !(self.dt > 0.0 && self.dt.is_finite()) {
            return Err(ConfigError::InvalidStepSize(self.dt));
        }
        if self.n_replications == 0 || self.n_replications > MAX_REPLICATIONS {
            return Err(ConfigError::InvalidReplicationCount(self.n_replications));
        }

        let finite_fields = [
            ("alpha", self.alpha),
            ("beta", self.beta),
            ("mu", self.mu),
            ("rate", self.rate),
            ("initial_variance", self.initial_variance),
            ("spot", self.spot),
            ("barrier", self.barrier),
            ("strike", self.strike),
        ];
        for (name, value) in finite_fields {
            if !value.is_finite() {
                return Err(ConfigError::InvalidParameter {
                    name,
                    value: format!("{} is not finite", value),
                });
            }
        }

        if self.initial_variance < 0.0 {
            return Err(ConfigError::InvalidParameter {
                name: "initial_variance",
                value: format!("{} must be non-negative", self.initial_variance),
            });
        }

        Ok(())
    }
}

impl Default for ParameterSet {
    fn default() -> Self {
        Self::reference()
    }
}

/// Builder for [`ParameterSet`].
///
/// Starts from the reference scenario; every setter overrides one field.
/// Validation runs in [`build`](Self::build).
///
/// # Examples
///
/// ```rust
/// use pricer_garch::mc::{ConfigError, ParameterSet};
///
/// let result = ParameterSet::builder().horizon(1).build();
/// assert!(matches!(result, Err(ConfigError::InvalidHorizon(1))));
/// ```
#[derive(Clone, Debug)]
pub struct ParameterSetBuilder {
    horizon: usize,
    dt: f64,
    alpha: f64,
    beta: f64,
    mu: f64,
    rate: f64,
    initial_variance: f64,
    spot: f64,
    barrier: f64,
    strike: f64,
    n_replications: usize,
}

impl Default for ParameterSetBuilder {
    fn default() -> Self {
        Self {
            horizon: 252,
            dt: 0.003968,
            alpha: 0.1559,
            beta: 0.84,
            mu: 0.02268,
            rate: 0.02268,
            initial_variance: 0.042377,
            spot: 2328.95,
            barrier: 2340.0,
            strike: 2330.0,
            n_replications: REFERENCE_REPLICATIONS,
        }
    }
}

impl ParameterSetBuilder {
    /// Sets the number of time steps H.
    #[inline]
    pub fn horizon(mut self, horizon: usize) -> Self {
        self.horizon = horizon;
        self
    }

    /// Sets the step size Δt.
    #[inline]
    pub fn dt(mut self, dt: f64) -> Self {
        self.dt = dt;
        self
    }

    /// Sets α.
    #[inline]
    pub fn alpha(mut self, alpha: f64) -> Self {
        self.alpha = alpha;
        self
    }

    /// Sets β.
    #[inline]
    pub fn beta(mut self, beta: f64) -> Self {
        self.beta = beta;
        self
    }

    /// Sets the drift μ.
    #[inline]
    pub fn mu(mut self, mu: f64) -> Self {
        self.mu = mu;
        self
    }

    /// Sets the risk-free rate r.
    #[inline]
    pub fn rate(mut self, rate: f64) -> Self {
        self.rate = rate;
        self
    }

    /// Sets the initial variance σ₀².
    #[inline]
    pub fn initial_variance(mut self, initial_variance: f64) -> Self {
        self.initial_variance = initial_variance;
        self
    }

    /// Sets the initial price S₀.
    #[inline]
    pub fn spot(mut self, spot: f64) -> Self {
        self.spot = spot;
        self
    }

    /// Sets the barrier level B.
    #[inline]
    pub fn barrier(mut self, barrier: f64) -> Self {
        self.barrier = barrier;
        self
    }

    /// Sets the strike K.
    #[inline]
    pub fn strike(mut self, strike: f64) -> Self {
        self.strike = strike;
        self
    }

    /// Sets the replication count N.
    #[inline]
    pub fn n_replications(mut self, n_replications: usize) -> Self {
        self.n_replications = n_replications;
        self
    }

    /// Builds the parameter set.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if any invariant of [`ParameterSet`] is violated.
    pub fn build(self) -> Result<ParameterSet, ConfigError> {
        let params = ParameterSet {
            horizon: self.horizon,
            dt: self.dt,
            alpha: self.alpha,
            beta: self.beta,
            mu: self.mu,
            rate: self.rate,
            initial_variance: self.initial_variance,
            spot: self.spot,
            barrier: self.barrier,
            strike: self.strike,
            n_replications: self.n_replications,
        };

        params.validate()?;
        Ok(params)
    }
}
