//! End-to-end tests on the reference scenario.
//!
//! α=0.1559, β=0.84, μ=0.02268, Δt=0.003968, r=0.02268, σ₀²=0.042377,
//! S₀=2328.95, B=2340.0, K=2330.0, H=252, N=65536.
//!
//! # Golden Value
//!
//! The expected value of the estimator is 16 719.0, established from two
//! independent runs of 262 144 replications each (combined standard error
//! ≈ 2.2). The per-replication payoff standard deviation is ≈ 1 581, so a
//! 65 536-replication estimate has a standard error of ≈ 6.2. Any seed must
//! land within [`GOLDEN_TOLERANCE`] (≈ 6 standard errors) of the golden value.
//!
//! The sequential run with [`CANONICAL_SEED`] is additionally pinned to
//! [`SEEDED_PRICE`], recorded from one run of the canonical implementation.
//! Any change to the formulas, the variate order or the generator shows up
//! here even when it stays inside the statistical band.

use approx::assert_relative_eq;
use pricer_garch::mc::{price_option, ExecutionMode, MonteCarloPricer, ParameterSet};
use pricer_garch::rng::PricerRng;

/// Expected value of the reference-scenario estimator.
const GOLDEN_PRICE: f64 = 16_719.0;

/// Accepted distance between a 65 536-replication estimate and the golden value.
const GOLDEN_TOLERANCE: f64 = 40.0;

/// Seed used by the canonical run.
const CANONICAL_SEED: u64 = 20_240_101;

/// Sequential reference-scenario price for [`CANONICAL_SEED`].
const SEEDED_PRICE: f64 = 16_717.095_395_526_507;

/// Relative tolerance on [`SEEDED_PRICE`] (summation order is fixed).
const SEEDED_RELATIVE_TOLERANCE: f64 = 1e-9;

fn reference_with(n: usize) -> ParameterSet {
    ParameterSet::reference()
        .to_builder()
        .n_replications(n)
        .build()
        .unwrap()
}

// ============================================================================
// Golden Value
// ============================================================================

#[test]
fn e2e_reference_scenario_matches_golden_value() {
    let params = ParameterSet::reference();
    assert_eq!(params.n_replications(), 65_536);

    let result = MonteCarloPricer::new(params)
        .unwrap()
        .with_seed(CANONICAL_SEED)
        .price()
        .unwrap();

    assert_eq!(result.n_replications, 65_536);
    assert_relative_eq!(
        result.price,
        SEEDED_PRICE,
        max_relative = SEEDED_RELATIVE_TOLERANCE
    );
    assert!(
        (result.price - GOLDEN_PRICE).abs() < GOLDEN_TOLERANCE,
        "price {} outside {} +/- {}",
        result.price,
        GOLDEN_PRICE,
        GOLDEN_TOLERANCE
    );

    // Uniform shocks push almost every path through a barrier 0.5% above spot
    assert!(
        result.barrier_hit_ratio() > 0.99,
        "hit ratio {}",
        result.barrier_hit_ratio()
    );
    assert!(result.std_error > 3.0 && result.std_error < 10.0);
}

#[test]
fn e2e_parallel_reference_scenario_matches_golden_value() {
    let result = MonteCarloPricer::new(ParameterSet::reference())
        .unwrap()
        .with_seed(CANONICAL_SEED)
        .with_mode(ExecutionMode::parallel())
        .price()
        .unwrap();

    assert_eq!(result.n_replications, 65_536);
    assert!(
        (result.price - GOLDEN_PRICE).abs() < GOLDEN_TOLERANCE,
        "parallel price {} outside {} +/- {}",
        result.price,
        GOLDEN_PRICE,
        GOLDEN_TOLERANCE
    );
}

// ============================================================================
// Determinism
// ============================================================================

#[test]
fn e2e_sequential_runs_are_bit_identical() {
    let params = reference_with(4_096);

    let first = price_option(&params, &mut PricerRng::from_seed(CANONICAL_SEED)).unwrap();
    let second = price_option(&params, &mut PricerRng::from_seed(CANONICAL_SEED)).unwrap();

    assert_eq!(first.price.to_bits(), second.price.to_bits());
    assert_eq!(first.std_error.to_bits(), second.std_error.to_bits());
    assert_eq!(first.barrier_hits, second.barrier_hits);
}

// ============================================================================
// Convergence
// ============================================================================

#[test]
fn e2e_standard_error_shrinks_with_replications() {
    let small = MonteCarloPricer::new(reference_with(256))
        .unwrap()
        .with_seed(CANONICAL_SEED)
        .price()
        .unwrap();
    let large = MonteCarloPricer::new(reference_with(65_536))
        .unwrap()
        .with_seed(CANONICAL_SEED)
        .price()
        .unwrap();

    // Per-replication dispersion is a property of the model, not of N
    let dispersion_ratio = small.std_dev / large.std_dev;
    assert!(
        dispersion_ratio > 0.7 && dispersion_ratio < 1.3,
        "std dev ratio {}",
        dispersion_ratio
    );

    // Estimator variance scales as 1/N: 65536 / 256 = 256
    let variance_ratio = (small.std_error / large.std_error).powi(2);
    assert!(
        variance_ratio > 100.0 && variance_ratio < 650.0,
        "variance ratio {}",
        variance_ratio
    );

    // The small-sample estimate is consistent with the large one
    assert!((small.price - large.price).abs() < 5.0 * small.std_error);
}
