//! The analysis pipeline and its stages.
//!
//! - `trend`: value vs. moving average → Increase / Decrease / Stable
//! - `behavior`: (price trend, volume trend) → one of nine behavior labels
//! - `factor`: price × volume and its period-over-period ratio
//! - `pipeline`: validation + orchestration over a sample series
//! - `summary`: frequency statistics and the dominant behavior

pub mod behavior;
pub mod factor;
pub mod pipeline;
pub mod summary;
pub mod trend;

pub use factor::{factor, factor_ratio};
pub use pipeline::{
    analyze, annotate, validate_samples, Analysis, AnalysisParams, DEFAULT_WINDOW,
};
pub use summary::{summarize, AnalysisSummary, BehaviorFrequency, CombinationFrequency};
pub use trend::{classify_trend, relative_deviation, DEFAULT_THRESHOLD};
