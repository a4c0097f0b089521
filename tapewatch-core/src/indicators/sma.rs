//! Simple Moving Average (SMA) with a minimum-periods-of-one warm-up.
//!
//! Element `i` is the mean of `values[max(0, i-w+1)..=i]`: an expanding window
//! until `w` values have been seen, then a fixed trailing window. Every index
//! has a value, including the first.

use std::collections::VecDeque;

/// Explicit rolling-mean accumulator.
///
/// Threaded through a left-to-right scan; holds only the last `window` values.
/// The mean is taken over the retained values on every push, so the result
/// matches the textbook definition exactly (no running-sum drift).
#[derive(Debug, Clone)]
pub struct RollingMean {
    window: usize,
    values: VecDeque<f64>,
}

impl RollingMean {
    pub fn new(window: usize) -> Self {
        assert!(window >= 1, "rolling mean window must be >= 1");
        Self {
            window,
            values: VecDeque::with_capacity(window),
        }
    }

    /// Push the next value and return the mean of the current window.
    pub fn push(&mut self, value: f64) -> f64 {
        if self.values.len() == self.window {
            self.values.pop_front();
        }
        self.values.push_back(value);
        let sum: f64 = self.values.iter().sum();
        sum / self.values.len() as f64
    }
}

#[derive(Debug, Clone)]
pub struct Sma {
    window: usize,
}

impl Sma {
    pub fn new(window: usize) -> Self {
        assert!(window >= 1, "SMA window must be >= 1");
        Self { window }
    }

    /// Compute the moving average for a whole series.
    ///
    /// Output has the same length as `values`. Non-finite inputs propagate
    /// into the windows that contain them; callers validate beforehand.
    pub fn compute(&self, values: &[f64]) -> Vec<f64> {
        values
            .iter()
            .scan(RollingMean::new(self.window), |acc, &v| Some(acc.push(v)))
            .collect()
    }
}
