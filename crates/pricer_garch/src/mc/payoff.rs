//! Payoff evaluation for the knock-in barrier call.
//!
//! # Payoff
//!
//! ```text
//! payoff = max(S_T − K, 0) · exp(−r)   if the barrier was crossed
//!        = 0                           otherwise
//! ```
//!
//! The discount factor is a single-period `exp(−r)`; it is not scaled by the
//! horizon length `H·Δt`.
//!
//! # NaN Handling
//!
//! [`nan_max`] propagates NaN from either argument so that a NaN terminal
//! price is never silently turned into a zero payoff.

use num_traits::Float;

/// Maximum of two values that propagates NaN.
///
/// Unlike [`f64::max`], which returns the non-NaN argument, this returns NaN
/// whenever either input is NaN.
///
/// # Examples
///
/// ```rust
/// use pricer_garch::mc::nan_max;
///
/// assert_eq!(nan_max(1.0, 2.0), 2.0);
/// assert_eq!(nan_max(-1.0_f64, 0.0), 0.0);
/// assert!(nan_max(f64::NAN, 0.0).is_nan());
/// assert!(nan_max(0.0, f64::NAN).is_nan());
/// ```
#[inline]
pub fn nan_max<T: Float>(a: T, b: T) -> T {
    if a.is_nan() || b.is_nan() {
        T::nan()
    } else if a >= b {
        a
    } else {
        b
    }
}

/// Undiscounted call intrinsic value `max(S_T − K, 0)`.
#[inline]
pub fn call_intrinsic<T: Float>(final_price: T, strike: T) -> T {
    nan_max(final_price - strike, T::zero())
}

/// Discounted payoff of one replication.
///
/// # Arguments
///
/// * `final_price` - Terminal simulated price `s[H−1]`
/// * `strike` - Strike K
/// * `barrier_triggered` - Whether the path crossed the barrier
/// * `rate` - Risk-free rate r (single-period discounting)
///
/// # Examples
///
/// ```rust
/// use pricer_garch::mc::discounted_payoff;
///
/// // Barrier not crossed: knocked-in contract never activated
/// assert_eq!(discounted_payoff(120.0, 100.0, false, 0.05), 0.0);
///
/// // Barrier crossed: discounted intrinsic value
/// let v = discounted_payoff(120.0, 100.0, true, 0.05);
/// assert!((v - 20.0 * (-0.05_f64).exp()).abs() < 1e-12);
///
/// // Out of the money
/// assert_eq!(discounted_payoff(90.0, 100.0, true, 0.05), 0.0);
/// ```
#[inline]
pub fn discounted_payoff(final_price: f64, strike: f64, barrier_triggered: bool, rate: f64) -> f64 {
    if !barrier_triggered {
        return 0.0;
    }
    call_intrinsic(final_price, strike) * (-rate).exp()
}
