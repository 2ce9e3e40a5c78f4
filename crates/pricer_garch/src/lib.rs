//! # Pricer GARCH (Layer 3: Monte Carlo Engine)
//!
//! Monte Carlo pricing of a knock-in barrier call whose instantaneous
//! variance follows a GARCH(1,1)-style recursion driven by uniform shocks.
//!
//! ## Components
//!
//! - [`rng`]: uniform variate sources (seeded PRNG, fixed replay sequence)
//! - [`mc`]: parameter set, variance recursion, price path, payoff and
//!   Monte Carlo aggregation
//! - [`path_dependent`]: barrier monitoring
//!
//! Data flows one way: variate source → variance recursion → price path →
//! barrier monitor → payoff → aggregator. The aggregator is the only
//! component holding state across replications.
//!
//! ## Usage Example
//!
//! ```rust
//! use pricer_garch::mc::{MonteCarloPricer, ParameterSet};
//!
//! let params = ParameterSet::builder()
//!     .horizon(252)
//!     .spot(2328.95)
//!     .barrier(2340.0)
//!     .strike(2330.0)
//!     .n_replications(1_000)
//!     .build()
//!     .unwrap();
//!
//! let result = MonteCarloPricer::new(params)
//!     .unwrap()
//!     .with_seed(42)
//!     .price()
//!     .unwrap();
//!
//! println!("Price: {:.4} +/- {:.4}", result.price, result.std_error);
//! ```
//!
//! ## Barrier Semantics
//!
//! The contract pays `max(S_T − K, 0)·exp(−r)` only on paths where some
//! monitored price strictly exceeded the barrier (up-and-in). Paths that
//! never cross pay zero.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![deny(rustdoc::private_intra_doc_links)]
// Allow unknown lints for clippy compatibility across versions
#![allow(unknown_lints)]

// Uniform variate sources
pub mod rng;

// Monte Carlo kernel
pub mod mc;

// Barrier observation
pub mod path_dependent;

// Re-export commonly used items for convenience
pub use mc::{
    price_option, ConfigError, ExecutionMode, MonteCarloPricer, ParameterSet, PricingResult,
    SimulationError,
};
pub use rng::{PricerRng, ReplaySource, RngError, UniformSource};
