//! Unit tests for the RNG module.
//!
//! This module contains tests verifying:
//! - PRNG seed and stream reproducibility
//! - Uniform range
//! - Replay ordering, exhaustion and input validation
//! - Statistical properties via property-based testing

use super::*;

/// Verifies that the same seed produces identical sequences.
#[test]
fn test_seed_reproducibility() {
    let mut rng1 = PricerRng::from_seed(12345);
    let mut rng2 = PricerRng::from_seed(12345);

    for _ in 0..100 {
        assert_eq!(rng1.gen_uniform(), rng2.gen_uniform());
    }
}

/// Verifies that different seeds diverge.
#[test]
fn test_different_seeds_diverge() {
    let mut rng1 = PricerRng::from_seed(1);
    let mut rng2 = PricerRng::from_seed(2);

    let a: Vec<f64> = (0..10).map(|_| rng1.gen_uniform()).collect();
    let b: Vec<f64> = (0..10).map(|_| rng2.gen_uniform()).collect();
    assert_ne!(a, b);
}

/// Verifies that uniform values are in the correct range [0, 1).
#[test]
fn test_uniform_range() {
    let mut rng = PricerRng::from_seed(42);

    for _ in 0..10_000 {
        let value = rng.gen_uniform();
        assert!(value >= 0.0, "Uniform value {} is below 0", value);
        assert!(value < 1.0, "Uniform value {} is >= 1", value);
    }
}

#[test]
fn test_trait_matches_inherent_draws() {
    let mut inherent = PricerRng::from_seed(99);
    let mut via_trait = PricerRng::from_seed(99);

    for _ in 0..50 {
        assert_eq!(inherent.gen_uniform(), via_trait.next_uniform().unwrap());
    }
}

#[test]
fn test_mutable_reference_is_a_source() {
    fn draw<R: UniformSource>(mut source: R) -> f64 {
        source.next_uniform().unwrap()
    }

    let mut rng = PricerRng::from_seed(5);
    let mut twin = PricerRng::from_seed(5);
    assert_eq!(draw(&mut rng), twin.gen_uniform());
    // The borrowed generator advanced
    assert_eq!(rng.gen_uniform(), twin.gen_uniform());
}

#[test]
fn test_streams_are_independent() {
    let mut stream0 = PricerRng::from_stream(42, 0);
    let mut stream1 = PricerRng::from_stream(42, 1);

    assert_eq!(stream0.seed(), 42);
    assert_ne!(stream0.seed(), stream1.seed());

    let a: Vec<f64> = (0..10).map(|_| stream0.gen_uniform()).collect();
    let b: Vec<f64> = (0..10).map(|_| stream1.gen_uniform()).collect();
    assert_ne!(a, b);
}

#[test]
fn test_stream_reproducibility() {
    let mut a = PricerRng::from_stream(42, 17);
    let mut b = PricerRng::from_stream(42, 17);

    for _ in 0..100 {
        assert_eq!(a.gen_uniform(), b.gen_uniform());
    }
}

/// Verifies that empty buffer is handled gracefully.
#[test]
fn test_empty_buffer() {
    let mut rng = PricerRng::from_seed(42);
    let mut empty: Vec<f64> = vec![];
    rng.fill_uniform(&mut empty);
    assert!(empty.is_empty());
}

#[test]
fn test_replay_in_order() {
    let mut source = ReplaySource::new(vec![0.0, 0.5, 0.999]).unwrap();

    assert_eq!(source.remaining(), 3);
    assert_eq!(source.next_uniform(), Ok(0.0));
    assert_eq!(source.next_uniform(), Ok(0.5));
    assert_eq!(source.next_uniform(), Ok(0.999));
    assert_eq!(source.consumed(), 3);
    assert_eq!(source.remaining(), 0);
}

#[test]
fn test_replay_exhaustion_does_not_wrap() {
    let mut source = ReplaySource::new(vec![0.3]).unwrap();
    source.next_uniform().unwrap();

    assert_eq!(
        source.next_uniform(),
        Err(RngError::Exhausted { consumed: 1 })
    );
    // Stays exhausted
    assert_eq!(
        source.next_uniform(),
        Err(RngError::Exhausted { consumed: 1 })
    );
}

#[test]
fn test_replay_empty_is_exhausted_immediately() {
    let mut source = ReplaySource::new(Vec::new()).unwrap();
    assert_eq!(
        source.next_uniform(),
        Err(RngError::Exhausted { consumed: 0 })
    );
}

#[test]
fn test_replay_rejects_out_of_range() {
    let err = ReplaySource::new(vec![0.2, 1.0]).unwrap_err();
    assert_eq!(err, RngError::OutOfRange { index: 1, value: 1.0 });

    assert!(matches!(
        ReplaySource::new(vec![-0.1]),
        Err(RngError::OutOfRange { index: 0, .. })
    ));
    assert!(ReplaySource::new(vec![f64::NAN]).is_err());
}

#[test]
fn test_rng_error_display() {
    let err = RngError::Exhausted { consumed: 12 };
    assert!(err.to_string().contains("exhausted after 12"));

    let err = RngError::OutOfRange {
        index: 3,
        value: 1.5,
    };
    assert!(err.to_string().contains("outside [0, 1)"));
}

use proptest::prelude::*;

proptest! {
    #![proptest_config(ProptestConfig::with_cases(100))]

    /// Property test: All uniform values must be in [0, 1) for any seed.
    #[test]
    fn prop_uniform_in_range(seed in any::<u64>(), size in 1..10000usize) {
        let mut rng = PricerRng::from_seed(seed);
        let mut buffer = vec![0.0; size];
        rng.fill_uniform(&mut buffer);

        for (i, &v) in buffer.iter().enumerate() {
            prop_assert!(
                (0.0..1.0).contains(&v),
                "Uniform value at index {} is out of range: {} (seed={})",
                i, v, seed
            );
        }
    }

    /// Property test: the sample mean of a uniform stream is close to 1/2.
    #[test]
    fn prop_uniform_mean(seed in any::<u64>(), stream in 0..64u64) {
        let mut rng = PricerRng::from_stream(seed, stream);
        let n = 20_000;
        let mean = (0..n).map(|_| rng.gen_uniform()).sum::<f64>() / n as f64;

        // Standard error of the mean is 1/sqrt(12 n) ~ 0.002
        prop_assert!((mean - 0.5).abs() < 0.02, "mean = {}", mean);
    }
}
