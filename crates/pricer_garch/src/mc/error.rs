//! Error types for the Monte Carlo pricing engine.
//!
//! - [`ConfigError`]: invalid [`ParameterSet`](super::ParameterSet) values,
//!   raised before any simulation work starts
//! - [`SimulationError`]: failures raised while a replication is running

use thiserror::Error;

use crate::rng::RngError;

/// Configuration error for the pricing engine.
///
/// These errors occur during construction when invalid parameters are
/// provided. They are fatal: no replication runs with an invalid
/// parameter set.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ConfigError {
    /// Horizon outside valid range [2, 100_000].
    #[error("Invalid horizon {0}: must be in range [2, 100_000]")]
    InvalidHorizon(usize),

    /// Step size not strictly positive and finite.
    #[error("Invalid step size {0}: must be positive and finite")]
    InvalidStepSize(f64),

    /// Replication count outside valid range [1, 100_000_000].
    #[error("Invalid replication count {0}: must be in range [1, 100_000_000]")]
    InvalidReplicationCount(usize),

    /// Invalid parameter value with name and description.
    #[error("Invalid parameter '{name}': {value}")]
    InvalidParameter {
        /// Parameter name.
        name: &'static str,
        /// Description of the invalid value.
        value: String,
    },
}

/// Runtime error raised while simulating replications.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum SimulationError {
    /// The parameter set or execution settings were rejected.
    #[error(transparent)]
    Configuration(#[from] ConfigError),

    /// The variance recursion produced a negative, NaN or infinite radicand.
    ///
    /// The parameter regime is outside the model's domain; the run is
    /// aborted rather than propagating NaN.
    #[error("Invalid radicand {radicand} in variance recursion at step {step}")]
    Domain {
        /// Time step at which the recursion left the domain.
        step: usize,
        /// The offending value of the recursive variance term.
        radicand: f64,
    },

    /// A price step overflowed to an infinite or NaN value.
    #[error("Non-finite price {price} at step {step}")]
    NonFinitePrice {
        /// Time step at which the price left the representable range.
        step: usize,
        /// The offending price.
        price: f64,
    },

    /// The uniform variate source failed.
    #[error("Random source failure: {0}")]
    RandomSource(#[from] RngError),
}
