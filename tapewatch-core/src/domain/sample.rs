//! Sample: one timestamped price/volume observation.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One observation for a single instrument.
///
/// Produced by an upstream collaborator (CSV loader, synthetic generator) and
/// never mutated afterwards. Volume is carried as `f64` so both share counts
/// and fractional (crypto-style) volumes fit; integer volumes up to 2^53 are
/// represented exactly.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Sample {
    pub timestamp: DateTime<Utc>,
    pub price: f64,
    pub volume: f64,
}

impl Sample {
    pub fn new(timestamp: DateTime<Utc>, price: f64, volume: f64) -> Self {
        Self {
            timestamp,
            price,
            volume,
        }
    }

    /// Price must be positive and finite.
    pub fn has_valid_price(&self) -> bool {
        self.price.is_finite() && self.price > 0.0
    }

    /// Volume must be non-negative and finite.
    pub fn has_valid_volume(&self) -> bool {
        self.volume.is_finite() && self.volume >= 0.0
    }
}
