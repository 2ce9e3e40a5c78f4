//! Monte Carlo pricing kernel for the GARCH barrier call.
//!
//! This module provides the simulation infrastructure that turns a
//! [`ParameterSet`] and a uniform variate source into a price estimate.
//!
//! # Architecture
//!
//! ```text
//! MonteCarloPricer
//! ├── ParameterSet        (model, contract and replication count)
//! ├── UniformSource       (PricerRng / ReplaySource)
//! └── per replication: PathState::simulate()
//!     ├── generate_volatility_path()   variance, q, w
//!     ├── evaluate_price_path()        s
//!     ├── BarrierMonitor               knock-in flag
//!     └── discounted_payoff()          one sample
//!         └── PayoffAccumulator        running sum → PricingResult
//! ```
//!
//! # Examples
//!
//! ## Reference Scenario
//!
//! ```rust
//! use pricer_garch::mc::{MonteCarloPricer, ParameterSet};
//!
//! let params = ParameterSet::reference()
//!     .to_builder()
//!     .n_replications(2_000)
//!     .build()
//!     .unwrap();
//!
//! let pricer = MonteCarloPricer::new(params).unwrap().with_seed(42);
//! let result = pricer.price().unwrap();
//! println!("Price: {:.4} +/- {:.4}", result.price, result.confidence_95());
//! ```
//!
//! ## Parallel Execution
//!
//! ```rust
//! use pricer_garch::mc::{ExecutionMode, MonteCarloPricer, ParameterSet};
//!
//! let params = ParameterSet::reference()
//!     .to_builder()
//!     .n_replications(8_192)
//!     .build()
//!     .unwrap();
//!
//! let pricer = MonteCarloPricer::new(params)
//!     .unwrap()
//!     .with_seed(42)
//!     .with_mode(ExecutionMode::Parallel { chunk_size: 1_024 });
//! let result = pricer.price().unwrap();
//! assert_eq!(result.n_replications, 8_192);
//! ```

pub mod config;
pub mod error;
pub mod paths;
pub mod payoff;
pub mod pricer;
pub mod state;

// Re-exports for convenient access
pub use config::{
    ParameterSet, ParameterSetBuilder, MAX_HORIZON, MAX_REPLICATIONS, MIN_HORIZON,
    REFERENCE_REPLICATIONS,
};
pub use error::{ConfigError, SimulationError};
pub use paths::{evaluate_price_path, generate_volatility_path, VolatilityPath};
pub use payoff::{call_intrinsic, discounted_payoff, nan_max};
pub use pricer::{
    price_option, price_option_parallel, simulate_replication, ExecutionMode, MonteCarloPricer,
    PayoffAccumulator, PricingResult, DEFAULT_CHUNK_SIZE,
};
pub use state::PathState;
