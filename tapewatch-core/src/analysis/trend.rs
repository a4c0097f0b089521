//! Trend classifier: a value against its own moving average.

use crate::domain::Trend;
use crate::error::RatioError;

/// Default relative threshold (0.1%).
pub const DEFAULT_THRESHOLD: f64 = 0.001;

/// Relative deviation `(value - average) / average`.
pub fn relative_deviation(value: f64, average: f64) -> Result<f64, RatioError> {
    if average == 0.0 {
        return Err(RatioError::ZeroDenominator);
    }
    let ratio = (value - average) / average;
    if !ratio.is_finite() {
        return Err(RatioError::NonFinite);
    }
    Ok(ratio)
}

impl Trend {
    /// Classify a relative deviation. Both bounds are exclusive: a ratio of
    /// exactly `threshold` is Stable.
    pub fn from_ratio(ratio: f64, threshold: f64) -> Trend {
        if ratio > threshold {
            Trend::Increase
        } else if ratio < -threshold {
            Trend::Decrease
        } else {
            Trend::Stable
        }
    }
}

/// Classify `value` relative to its moving average `average`.
pub fn classify_trend(value: f64, average: f64, threshold: f64) -> Result<Trend, RatioError> {
    relative_deviation(value, average).map(|ratio| Trend::from_ratio(ratio, threshold))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn above_threshold_is_increase() {
        assert_eq!(classify_trend(101.0, 100.5, DEFAULT_THRESHOLD), Ok(Trend::Increase));
    }

    #[test]
    fn below_negative_threshold_is_decrease() {
        assert_eq!(classify_trend(99.0, 100.0, DEFAULT_THRESHOLD), Ok(Trend::Decrease));
    }

    #[test]
    fn equal_to_average_is_stable() {
        assert_eq!(classify_trend(100.0, 100.0, DEFAULT_THRESHOLD), Ok(Trend::Stable));
    }

    #[test]
    fn exactly_at_threshold_is_stable() {
        // (1001 - 1000) / 1000 rounds to the same double as the 0.001 literal.
        assert_eq!(relative_deviation(1001.0, 1000.0), Ok(DEFAULT_THRESHOLD));
        assert_eq!(classify_trend(1001.0, 1000.0, DEFAULT_THRESHOLD), Ok(Trend::Stable));
        assert_eq!(classify_trend(999.0, 1000.0, DEFAULT_THRESHOLD), Ok(Trend::Stable));
    }

    #[test]
    fn one_ulp_beyond_threshold_flips() {
        let above = f64::from_bits(DEFAULT_THRESHOLD.to_bits() + 1);
        assert_eq!(Trend::from_ratio(above, DEFAULT_THRESHOLD), Trend::Increase);
        assert_eq!(Trend::from_ratio(-above, DEFAULT_THRESHOLD), Trend::Decrease);
        assert_eq!(Trend::from_ratio(-DEFAULT_THRESHOLD, DEFAULT_THRESHOLD), Trend::Stable);
    }

    #[test]
    fn zero_average_is_an_error() {
        assert_eq!(
            classify_trend(5.0, 0.0, DEFAULT_THRESHOLD),
            Err(RatioError::ZeroDenominator)
        );
        assert_eq!(
            classify_trend(0.0, 0.0, DEFAULT_THRESHOLD),
            Err(RatioError::ZeroDenominator)
        );
    }

    #[test]
    fn overflowing_deviation_is_an_error() {
        assert_eq!(
            relative_deviation(f64::MAX, f64::MIN_POSITIVE),
            Err(RatioError::NonFinite)
        );
    }

    #[test]
    fn custom_threshold() {
        // 0.5% move is Stable under a 1% threshold.
        assert_eq!(classify_trend(100.5, 100.0, 0.01), Ok(Trend::Stable));
        assert_eq!(classify_trend(102.0, 100.0, 0.01), Ok(Trend::Increase));
    }
}
