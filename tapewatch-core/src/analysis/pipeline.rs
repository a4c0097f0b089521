//! Analysis pipeline: samples in, annotated records (and a summary) out.
//!
//! Stages, strictly left to right:
//! 1. Validate every precondition (fail fast, nothing is coerced or dropped)
//! 2. Moving averages over price and volume (same window)
//! 3. Per-record scan: trends → behavior → factor → factor ratio
//! 4. Summary over the finished records
//!
//! The scan carries only the previous record's factor. No state survives a
//! call, so identical inputs give bit-identical outputs.

use serde::{Deserialize, Serialize};

use crate::analysis::factor::{factor, factor_ratio};
use crate::analysis::summary::{summarize, AnalysisSummary};
use crate::analysis::trend::{classify_trend, DEFAULT_THRESHOLD};
use crate::domain::{combination_label, AnnotatedRecord, Behavior, Sample};
use crate::error::{AnalysisError, Field, InputError};
use crate::indicators::Sma;

/// Default moving-average window (intervals).
pub const DEFAULT_WINDOW: usize = 3;

/// Parameters of one analysis run.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AnalysisParams {
    pub window: usize,
    pub threshold: f64,
}

impl Default for AnalysisParams {
    fn default() -> Self {
        Self {
            window: DEFAULT_WINDOW,
            threshold: DEFAULT_THRESHOLD,
        }
    }
}

impl AnalysisParams {
    /// Window with the default threshold.
    pub fn with_window(window: usize) -> Self {
        Self {
            window,
            ..Self::default()
        }
    }

    pub fn validate(&self) -> Result<(), InputError> {
        if self.window == 0 {
            return Err(InputError::ZeroWindow);
        }
        if !(self.threshold.is_finite() && self.threshold > 0.0) {
            return Err(InputError::InvalidThreshold(self.threshold));
        }
        Ok(())
    }
}

/// Output of a full run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Analysis {
    pub records: Vec<AnnotatedRecord>,
    pub summary: AnalysisSummary,
}

/// Check every sample-level precondition.
pub fn validate_samples(samples: &[Sample]) -> Result<(), InputError> {
    if samples.is_empty() {
        return Err(InputError::EmptySeries);
    }
    for (index, sample) in samples.iter().enumerate() {
        if !sample.has_valid_price() {
            return Err(InputError::InvalidPrice {
                index,
                price: sample.price,
            });
        }
        if !sample.has_valid_volume() {
            return Err(InputError::InvalidVolume {
                index,
                volume: sample.volume,
            });
        }
        if index > 0 && sample.timestamp < samples[index - 1].timestamp {
            return Err(InputError::NonMonotonicTimestamp { index });
        }
    }
    Ok(())
}

/// Annotate every sample. Output length and order match the input.
pub fn annotate(
    samples: &[Sample],
    params: &AnalysisParams,
) -> Result<Vec<AnnotatedRecord>, AnalysisError> {
    params.validate()?;
    validate_samples(samples)?;

    let sma = Sma::new(params.window);
    let prices: Vec<f64> = samples.iter().map(|s| s.price).collect();
    let volumes: Vec<f64> = samples.iter().map(|s| s.volume).collect();
    let price_mas = sma.compute(&prices);
    let volume_mas = sma.compute(&volumes);

    tracing::debug!(
        samples = samples.len(),
        window = params.window,
        threshold = params.threshold,
        "annotating sample series"
    );

    let mut records = Vec::with_capacity(samples.len());
    let mut previous_factor: Option<f64> = None;

    for (index, sample) in samples.iter().enumerate() {
        let price_ma = finite(price_mas[index], index, Field::PriceMa)?;
        let volume_ma = finite(volume_mas[index], index, Field::VolumeMa)?;

        let price_trend = classify_trend(sample.price, price_ma, params.threshold)
            .map_err(|e| AnalysisError::from_ratio(e, index, Field::PriceMa))?;
        let volume_trend = classify_trend(sample.volume, volume_ma, params.threshold)
            .map_err(|e| AnalysisError::from_ratio(e, index, Field::VolumeMa))?;

        let factor = finite(factor(sample.price, sample.volume), index, Field::Factor)?;
        let factor_ratio = match previous_factor {
            None => 1.0,
            Some(prev) => factor_ratio(prev, factor)
                .map_err(|e| AnalysisError::from_ratio(e, index, Field::FactorRatio))?,
        };
        previous_factor = Some(factor);

        records.push(AnnotatedRecord {
            timestamp: sample.timestamp,
            price: sample.price,
            volume: sample.volume,
            price_ma,
            volume_ma,
            price_trend,
            volume_trend,
            combination: combination_label(price_trend, volume_trend),
            behavior: Behavior::from_trends(price_trend, volume_trend),
            factor,
            factor_ratio,
        });
    }

    Ok(records)
}

/// Annotate and summarize in one call.
pub fn analyze(samples: &[Sample], params: &AnalysisParams) -> Result<Analysis, AnalysisError> {
    let records = annotate(samples, params)?;
    let summary = summarize(&records)?;
    Ok(Analysis { records, summary })
}

fn finite(value: f64, index: usize, field: Field) -> Result<f64, AnalysisError> {
    if value.is_finite() {
        Ok(value)
    } else {
        Err(AnalysisError::non_finite(index, field, value))
    }
}
