//! Error taxonomy for the analysis core.
//!
//! Nothing in the core recovers from these. They propagate to the caller,
//! which decides whether to abort, skip the instrument, or report.

use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// Which derived (or input) field a failure refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Field {
    Price,
    Volume,
    PriceMa,
    VolumeMa,
    Factor,
    FactorRatio,
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Field::Price => "price",
            Field::Volume => "volume",
            Field::PriceMa => "price_ma",
            Field::VolumeMa => "volume_ma",
            Field::Factor => "factor",
            Field::FactorRatio => "factor_ratio",
        };
        f.write_str(name)
    }
}

/// Precondition violations, detected before any computation.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum InputError {
    #[error("sample sequence is empty")]
    EmptySeries,

    #[error("moving average window must be >= 1")]
    ZeroWindow,

    #[error("threshold must be positive and finite, got {0}")]
    InvalidThreshold(f64),

    #[error("timestamp at sample {index} is earlier than the previous sample")]
    NonMonotonicTimestamp { index: usize },

    #[error("price at sample {index} must be positive and finite, got {price}")]
    InvalidPrice { index: usize, price: f64 },

    #[error("volume at sample {index} must be non-negative and finite, got {volume}")]
    InvalidVolume { index: usize, volume: f64 },
}

/// Failure of a single ratio computation, before index context is attached.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum RatioError {
    #[error("denominator is zero")]
    ZeroDenominator,

    #[error("ratio is not finite")]
    NonFinite,
}

/// Errors surfaced by the analysis pipeline and summarizer.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum AnalysisError {
    #[error("invalid input: {0}")]
    InvalidInput(#[from] InputError),

    #[error("undefined ratio at sample {index}: {field} has a zero denominator")]
    UndefinedRatio { index: usize, field: Field },

    #[error("computation error at sample {index} ({field}): {detail}")]
    Computation {
        index: usize,
        field: Field,
        detail: String,
    },
}

impl AnalysisError {
    /// Attach sample context to a ratio failure.
    pub fn from_ratio(err: RatioError, index: usize, field: Field) -> Self {
        match err {
            RatioError::ZeroDenominator => AnalysisError::UndefinedRatio { index, field },
            RatioError::NonFinite => AnalysisError::Computation {
                index,
                field,
                detail: err.to_string(),
            },
        }
    }

    pub(crate) fn non_finite(index: usize, field: Field, value: f64) -> Self {
        AnalysisError::Computation {
            index,
            field,
            detail: format!("result is not finite ({value})"),
        }
    }

    /// The sample index the error refers to, if any.
    pub fn index(&self) -> Option<usize> {
        match self {
            AnalysisError::InvalidInput(InputError::NonMonotonicTimestamp { index })
            | AnalysisError::InvalidInput(InputError::InvalidPrice { index, .. })
            | AnalysisError::InvalidInput(InputError::InvalidVolume { index, .. })
            | AnalysisError::UndefinedRatio { index, .. }
            | AnalysisError::Computation { index, .. } => Some(*index),
            AnalysisError::InvalidInput(_) => None,
        }
    }
}
