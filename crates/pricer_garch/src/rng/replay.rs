//! Fixed-sequence uniform source for deterministic tests.

use super::{RngError, UniformSource};

/// Replays a caller-supplied, finite sequence of uniform variates.
///
/// Values are handed out in order. Once the sequence is drained every further
/// draw fails with [`RngError::Exhausted`]; the source never wraps around.
///
/// # Examples
///
/// ```rust
/// use pricer_garch::rng::{ReplaySource, RngError, UniformSource};
///
/// let mut source = ReplaySource::new(vec![0.1, 0.9]).unwrap();
/// assert_eq!(source.next_uniform(), Ok(0.1));
/// assert_eq!(source.next_uniform(), Ok(0.9));
/// assert_eq!(source.next_uniform(), Err(RngError::Exhausted { consumed: 2 }));
/// ```
#[derive(Clone, Debug)]
pub struct ReplaySource {
    values: Vec<f64>,
    position: usize,
}

impl ReplaySource {
    /// Creates a replay source from `values`.
    ///
    /// # Errors
    ///
    /// Returns [`RngError::OutOfRange`] if any value is outside [0, 1) or NaN.
    pub fn new(values: Vec<f64>) -> Result<Self, RngError> {
        if let Some((index, &value)) = values
            .iter()
            .enumerate()
            .find(|(_, v)| !(0.0..1.0).contains(*v))
        {
            return Err(RngError::OutOfRange { index, value });
        }

        Ok(Self {
            values,
            position: 0,
        })
    }

    /// Number of values drawn so far.
    #[inline]
    pub fn consumed(&self) -> usize {
        self.position
    }

    /// Number of values still available.
    #[inline]
    pub fn remaining(&self) -> usize {
        self.values.len() - self.position
    }
}

impl UniformSource for ReplaySource {
    #[inline]
    fn next_uniform(&mut self) -> Result<f64, RngError> {
        let value = self
            .values
            .get(self.position)
            .copied()
            .ok_or(RngError::Exhausted {
                consumed: self.position,
            })?;
        self.position += 1;
        Ok(value)
    }
}
