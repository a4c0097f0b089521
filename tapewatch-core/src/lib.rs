//! Tapewatch Core: intraday price/volume behavior analysis.
//!
//! This crate contains the deterministic analysis core:
//! - Domain types (samples, annotated records, trend and behavior labels)
//! - Moving average engine with a minimum-periods-of-one warm-up
//! - Trend classifier and the nine-label behavior mapper
//! - Factor (price × volume) and factor-ratio engine
//! - Analysis pipeline and insight summarizer
//! - Run fingerprinting
//!
//! Everything here is pure and synchronous: no I/O, no shared state between
//! runs. Fetching data, exporting and parallelism belong to callers.

pub mod analysis;
pub mod domain;
pub mod error;
pub mod fingerprint;
pub mod indicators;

pub use analysis::{analyze, annotate, summarize, Analysis, AnalysisParams, AnalysisSummary};
pub use domain::{AnnotatedRecord, Behavior, Sample, Trend};
pub use error::{AnalysisError, Field, InputError};

#[cfg(test)]
mod tests {
    use super::*;

    /// Compile-time check: all core types are Send + Sync, so callers can
    /// fan analyses out across worker threads.
    #[allow(dead_code)]
    fn assert_send_sync() {
        fn require_send<T: Send>() {}
        fn require_sync<T: Sync>() {}

        require_send::<Sample>();
        require_sync::<Sample>();
        require_send::<AnnotatedRecord>();
        require_sync::<AnnotatedRecord>();
        require_send::<Trend>();
        require_sync::<Trend>();
        require_send::<Behavior>();
        require_sync::<Behavior>();
        require_send::<AnalysisParams>();
        require_sync::<AnalysisParams>();
        require_send::<Analysis>();
        require_sync::<Analysis>();
        require_send::<AnalysisSummary>();
        require_sync::<AnalysisSummary>();
        require_send::<AnalysisError>();
        require_sync::<AnalysisError>();
        require_send::<indicators::Sma>();
        require_sync::<indicators::Sma>();
    }

    /// Architecture contract: the pipeline entry point takes only borrowed
    /// samples and parameters. There is no context object carrying state
    /// from one run to the next.
    #[test]
    fn analyze_signature_is_stateless() {
        fn _check(samples: &[Sample], params: &AnalysisParams) -> Result<Analysis, AnalysisError> {
            analyze(samples, params)
        }
    }
}
