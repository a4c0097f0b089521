//! Factor engine: price x volume and its period-over-period ratio.

use crate::error::RatioError;

/// Combined activity signal for one sample.
pub fn factor(price: f64, volume: f64) -> f64 {
    price * volume
}

/// `current / previous`. A zero previous factor has no defined ratio.
pub fn factor_ratio(previous: f64, current: f64) -> Result<f64, RatioError> {
    if previous == 0.0 {
        return Err(RatioError::ZeroDenominator);
    }
    let ratio = current / previous;
    if !ratio.is_finite() {
        return Err(RatioError::NonFinite);
    }
    Ok(ratio)
}
