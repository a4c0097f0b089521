//! Run fingerprinting: deterministic identification of analysis runs.
//!
//! - `dataset_hash`: BLAKE3 over every sample, in order.
//! - `AnalysisParams::fingerprint`: BLAKE3 over the params' canonical JSON.
//! - `run_id`: both combined. Same data + same params → same id.

use crate::analysis::AnalysisParams;
use crate::domain::Sample;

/// BLAKE3 hex digest over timestamps, price bits and volume bits.
pub fn dataset_hash(samples: &[Sample]) -> String {
    let mut hasher = blake3::Hasher::new();
    for sample in samples {
        hasher.update(&sample.timestamp.timestamp_micros().to_le_bytes());
        hasher.update(&sample.price.to_le_bytes());
        hasher.update(&sample.volume.to_le_bytes());
    }
    hasher.finalize().to_hex().to_string()
}

impl AnalysisParams {
    /// Parameter identity. Serialized by hand so the digest never depends on
    /// serializer configuration.
    pub fn fingerprint(&self) -> String {
        let canonical = format!(
            "{{\"window\":{},\"threshold\":{}}}",
            self.window,
            self.threshold.to_bits()
        );
        blake3::hash(canonical.as_bytes()).to_hex().to_string()
    }
}

/// Identity of one run: dataset hash + params fingerprint.
pub fn run_id(dataset_hash: &str, params: &AnalysisParams) -> String {
    let mut hasher = blake3::Hasher::new();
    hasher.update(dataset_hash.as_bytes());
    hasher.update(b"+");
    hasher.update(params.fingerprint().as_bytes());
    hasher.finalize().to_hex().to_string()
}
