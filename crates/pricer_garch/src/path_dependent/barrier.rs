//! Upward barrier monitoring.
//!
//! [`BarrierMonitor`] watches a simulated price path and raises a sticky flag
//! once any monitored price strictly exceeds the barrier level.
//!
//! # Knock-In Semantics
//!
//! The pricer pays the call only on paths where the flag IS raised, which is
//! an up-and-in contract rather than the up-and-out contract the word
//! "barrier" often suggests. This behaviour is kept literally; see the
//! knock-in tests in `mc::pricer` and `tests/barrier_semantics.rs`.

use num_traits::Float;

/// Streaming monitor for an upward barrier.
///
/// Observations are fed in time order. The flag is raised on the first price
/// strictly above the level and is never cleared afterwards.
///
/// # Type Parameters
///
/// * `T` - Floating-point type (e.g., `f64`, `f32`)
///
/// # Example
///
/// ```
/// use pricer_garch::path_dependent::BarrierMonitor;
///
/// let mut monitor = BarrierMonitor::new(105.0);
/// monitor.observe(101.0);
/// monitor.observe(105.0); // touching is not crossing
/// assert!(!monitor.is_triggered());
///
/// monitor.observe(106.0);
/// monitor.observe(99.0);
/// assert!(monitor.is_triggered());
/// assert_eq!(monitor.first_crossing(), Some(2));
/// ```
#[derive(Clone, Debug)]
pub struct BarrierMonitor<T: Float> {
    level: T,
    triggered: bool,
    first_crossing: Option<usize>,
    running_max: T,
    count: usize,
}

impl<T: Float> BarrierMonitor<T> {
    /// Creates a monitor for the given barrier level.
    #[inline]
    pub fn new(level: T) -> Self {
        Self {
            level,
            triggered: false,
            first_crossing: None,
            running_max: T::neg_infinity(),
            count: 0,
        }
    }

    /// Observes the next price.
    ///
    /// NaN prices never trigger the barrier.
    #[inline]
    pub fn observe(&mut self, price: T) {
        self.record(self.count, price);
    }

    #[inline]
    fn record(&mut self, position: usize, price: T) {
        if price > self.level && !self.triggered {
            self.triggered = true;
            self.first_crossing = Some(position);
        }
        self.running_max = self.running_max.max(price);
        self.count += 1;
    }

    /// Observes a complete simulated path.
    ///
    /// Index 0 is the initial price and is not monitored; indices `1..len`
    /// are observed in order. A crossing found here is reported by
    /// [`first_crossing`](Self::first_crossing) as its index into `prices`,
    /// whatever was observed before. A crossing recorded earlier is kept.
    ///
    /// # Example
    ///
    /// ```
    /// use pricer_garch::path_dependent::BarrierMonitor;
    ///
    /// // Initial price above the barrier does not count
    /// let mut monitor = BarrierMonitor::new(100.0);
    /// monitor.observe_path(&[120.0, 99.0, 98.0]);
    /// assert!(!monitor.is_triggered());
    ///
    /// let mut monitor = BarrierMonitor::new(100.0);
    /// monitor.observe_path(&[95.0, 99.0, 100.5]);
    /// assert_eq!(monitor.first_crossing(), Some(2));
    /// ```
    pub fn observe_path(&mut self, prices: &[T]) {
        for (index, &price) in prices.iter().enumerate().skip(1) {
            self.record(index, price);
        }
    }

    /// Returns true once any observed price exceeded the level.
    #[inline]
    pub fn is_triggered(&self) -> bool {
        self.triggered
    }

    /// Position of the first observation above the level, if any.
    #[inline]
    pub fn first_crossing(&self) -> Option<usize> {
        self.first_crossing
    }

    /// Barrier level.
    #[inline]
    pub fn level(&self) -> T {
        self.level
    }

    /// Highest price observed so far (`-inf` before any observation).
    #[inline]
    pub fn running_max(&self) -> T {
        self.running_max
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_new_monitor_is_not_triggered() {
        let monitor: BarrierMonitor<f64> = BarrierMonitor::new(100.0);
        assert!(!monitor.is_triggered());
        assert_eq!(monitor.first_crossing(), None);
        assert_eq!(monitor.level(), 100.0);
        assert_eq!(monitor.running_max(), f64::NEG_INFINITY);
    }

    #[test]
    fn test_strict_inequality() {
        let mut monitor = BarrierMonitor::new(100.0);
        monitor.observe(100.0);
        assert!(!monitor.is_triggered());

        monitor.observe(100.0 + 1e-9);
        assert!(monitor.is_triggered());
    }

    #[test]
    fn test_flag_is_sticky() {
        let mut monitor = BarrierMonitor::new(100.0);
        monitor.observe(101.0);
        for _ in 0..10 {
            monitor.observe(50.0);
        }
        assert!(monitor.is_triggered());
        assert_eq!(monitor.first_crossing(), Some(0));
        assert_eq!(monitor.running_max(), 101.0);
    }

    #[test]
    fn test_first_crossing_is_recorded_once() {
        let mut monitor = BarrierMonitor::new(100.0);
        monitor.observe_path(&[90.0, 95.0, 101.0, 90.0, 102.0]);
        assert_eq!(monitor.first_crossing(), Some(2));
        assert_eq!(monitor.running_max(), 102.0);
    }

    #[test]
    fn test_initial_price_is_not_monitored() {
        let mut monitor = BarrierMonitor::new(100.0);
        monitor.observe_path(&[150.0, 90.0, 80.0]);
        assert!(!monitor.is_triggered());
        assert_eq!(monitor.running_max(), 90.0);
    }

    #[test]
    fn test_empty_and_single_point_paths() {
        let mut monitor: BarrierMonitor<f64> = BarrierMonitor::new(100.0);
        monitor.observe_path(&[]);
        assert!(!monitor.is_triggered());

        monitor.observe_path(&[200.0]);
        assert!(!monitor.is_triggered());
    }

    #[test]
    fn test_path_indices_after_prior_observations() {
        let mut monitor = BarrierMonitor::new(100.0);
        monitor.observe(50.0);
        monitor.observe(60.0);
        monitor.observe_path(&[90.0, 95.0, 101.0]);
        assert_eq!(monitor.first_crossing(), Some(2));

        // An earlier streamed crossing is not overwritten by the path
        let mut monitor = BarrierMonitor::new(100.0);
        monitor.observe(150.0);
        monitor.observe_path(&[90.0, 120.0]);
        assert_eq!(monitor.first_crossing(), Some(0));
    }

    #[test]
    fn test_nan_does_not_trigger() {
        let mut monitor = BarrierMonitor::new(100.0);
        monitor.observe(f64::NAN);
        assert!(!monitor.is_triggered());
    }

    #[test]
    fn test_f32_monitor() {
        let mut monitor: BarrierMonitor<f32> = BarrierMonitor::new(1.0);
        monitor.observe_path(&[0.5, 1.5]);
        assert!(monitor.is_triggered());
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(200))]

        /// Triggered iff some monitored price strictly exceeds the level.
        #[test]
        fn prop_triggered_iff_any_exceeds(
            prices in prop::collection::vec(0.0f64..200.0, 2..50),
            level in 50.0f64..150.0,
        ) {
            let mut monitor = BarrierMonitor::new(level);
            monitor.observe_path(&prices);

            let expected = prices[1..].iter().any(|&p| p > level);
            prop_assert_eq!(monitor.is_triggered(), expected);

            let expected_first = prices
                .iter()
                .enumerate()
                .skip(1)
                .find(|(_, &p)| p > level)
                .map(|(i, _)| i);
            prop_assert_eq!(monitor.first_crossing(), expected_first);
        }
    }
}
