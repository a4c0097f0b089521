//! AnnotatedRecord: a sample enriched with every derived field.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::labels::{Behavior, Trend};
use super::sample::Sample;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnnotatedRecord {
    pub timestamp: DateTime<Utc>,
    pub price: f64,
    pub volume: f64,
    pub price_ma: f64,
    pub volume_ma: f64,
    pub price_trend: Trend,
    pub volume_trend: Trend,
    /// Display-only composition of the two trends.
    pub combination: String,
    pub behavior: Behavior,
    pub factor: f64,
    pub factor_ratio: f64,
}

impl AnnotatedRecord {
    /// The sample this record was derived from.
    pub fn sample(&self) -> Sample {
        Sample::new(self.timestamp, self.price, self.volume)
    }
}

/// Human-readable composition of a price/volume trend pair.
pub fn combination_label(price_trend: Trend, volume_trend: Trend) -> String {
    format!("Price {price_trend} & Volume {volume_trend}")
}
