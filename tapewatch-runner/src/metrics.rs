//! Headline metrics for a finished analysis.
//!
//! The four headline figures shown above the detail table: current price and
//! change since the first sample, current volume against the session mean,
//! latest behavior, and the latest factor ratio.

use serde::{Deserialize, Serialize};
use tapewatch_core::{AnalysisError, AnnotatedRecord, Behavior, InputError};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HeadlineMetrics {
    pub current_price: f64,
    /// Last price minus first price.
    pub price_change: f64,
    /// `price_change / first price * 100`.
    pub price_change_pct: f64,

    pub current_volume: f64,
    pub average_volume: f64,
    /// Current volume relative to the mean, in percent. `None` when the mean is zero.
    pub volume_vs_average_pct: Option<f64>,

    pub latest_behavior: Behavior,
    pub latest_combination: String,

    pub factor_ratio: f64,
    /// `(factor_ratio - 1) * 100`.
    pub factor_change_pct: f64,
}

impl HeadlineMetrics {
    pub fn from_records(records: &[AnnotatedRecord]) -> Result<Self, AnalysisError> {
        let (Some(first), Some(last)) = (records.first(), records.last()) else {
            return Err(InputError::EmptySeries.into());
        };

        let price_change = last.price - first.price;
        let average_volume =
            records.iter().map(|r| r.volume).sum::<f64>() / records.len() as f64;
        let volume_vs_average_pct = (average_volume > 0.0)
            .then(|| (last.volume - average_volume) / average_volume * 100.0);

        Ok(Self {
            current_price: last.price,
            price_change,
            price_change_pct: price_change / first.price * 100.0,
            current_volume: last.volume,
            average_volume,
            volume_vs_average_pct,
            latest_behavior: last.behavior,
            latest_combination: last.combination.clone(),
            factor_ratio: last.factor_ratio,
            factor_change_pct: (last.factor_ratio - 1.0) * 100.0,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone, Utc};
    use tapewatch_core::{annotate, AnalysisParams, Sample};

    fn records() -> Vec<AnnotatedRecord> {
        let t = Utc.with_ymd_and_hms(2024, 3, 1, 14, 30, 0).unwrap();
        let samples = vec![
            Sample::new(t, 100.0, 1000.0),
            Sample::new(t + Duration::minutes(5), 101.0, 1200.0),
            Sample::new(t + Duration::minutes(10), 99.0, 900.0),
        ];
        annotate(&samples, &AnalysisParams::with_window(2)).unwrap()
    }

    #[test]
    fn headline_from_records() {
        let m = HeadlineMetrics::from_records(&records()).unwrap();
        assert_eq!(m.current_price, 99.0);
        assert_eq!(m.price_change, -1.0);
        assert!((m.price_change_pct + 1.0).abs() < 1e-12);
        assert_eq!(m.current_volume, 900.0);
        let mean = 3100.0 / 3.0;
        assert!((m.average_volume - mean).abs() < 1e-9);
        let vs = m.volume_vs_average_pct.unwrap();
        assert!((vs - (900.0 - mean) / mean * 100.0).abs() < 1e-9);
        assert_eq!(m.latest_behavior, Behavior::MildSelling);
        assert_eq!(m.latest_combination, "Price Decrease & Volume Decrease");
        assert!((m.factor_change_pct - (89_100.0 / 121_200.0 - 1.0) * 100.0).abs() < 1e-9);
    }

    #[test]
    fn zero_average_volume_has_no_relative_figure() {
        let mut rs = records();
        rs.truncate(1);
        rs[0].volume = 0.0;
        let m = HeadlineMetrics::from_records(&rs).unwrap();
        assert_eq!(m.volume_vs_average_pct, None);
    }

    #[test]
    fn empty_records_are_rejected() {
        assert!(HeadlineMetrics::from_records(&[]).is_err());
    }
}
