//! Analysis runner: wires together loading, the analysis core, and metrics.
//!
//! Two entry points:
//! - `run_instrument()`: loads samples for a configured instrument, then runs.
//!   Used by the CLI and batch mode.
//! - `run_analysis()`: takes pre-loaded samples. No I/O.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use tapewatch_core::fingerprint::{dataset_hash, run_id};
use tapewatch_core::{
    analyze, AnalysisError, AnalysisParams, AnalysisSummary, AnnotatedRecord, Sample,
};

use crate::config::{ConfigError, InstrumentConfig};
use crate::data_loader::{load_samples, DataSource, LoadError};
use crate::metrics::HeadlineMetrics;

/// Errors from the runner.
#[derive(Debug, Error)]
pub enum RunError {
    #[error("config error: {0}")]
    Config(#[from] ConfigError),
    #[error("data error: {0}")]
    Load(#[from] LoadError),
    #[error("analysis of '{symbol}' failed: {source}")]
    Analysis {
        symbol: String,
        #[source]
        source: AnalysisError,
    },
}

impl RunError {
    /// The underlying analysis error, if the run got that far.
    pub fn analysis_error(&self) -> Option<&AnalysisError> {
        match self {
            RunError::Analysis { source, .. } => Some(source),
            _ => None,
        }
    }
}

/// Current schema version for persisted reports.
pub const SCHEMA_VERSION: u32 = 1;

/// Complete result of a single analysis run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisReport {
    /// Schema version for forward-compatible deserialization.
    #[serde(default = "default_schema_version")]
    pub schema_version: u32,
    /// BLAKE3 of dataset hash + params.
    pub run_id: String,
    pub symbol: String,
    pub source: DataSource,
    pub params: AnalysisParams,
    pub dataset_hash: String,
    pub sample_count: usize,
    pub headline: HeadlineMetrics,
    pub summary: AnalysisSummary,
    pub records: Vec<AnnotatedRecord>,
}

impl AnalysisReport {
    pub fn is_synthetic(&self) -> bool {
        self.source == DataSource::Synthetic
    }
}

fn default_schema_version() -> u32 {
    SCHEMA_VERSION
}

/// Load samples for one configured instrument and analyze them.
pub fn run_instrument(
    instrument: &InstrumentConfig,
    params: &AnalysisParams,
) -> Result<AnalysisReport, RunError> {
    let input = instrument.input()?;
    let loaded = load_samples(&instrument.symbol, &input)?;
    build_report(
        &loaded.symbol,
        &loaded.samples,
        loaded.source,
        params,
        loaded.dataset_hash,
    )
}

/// Analyze pre-loaded samples without touching the filesystem.
pub fn run_analysis(
    symbol: &str,
    samples: &[Sample],
    source: DataSource,
    params: &AnalysisParams,
) -> Result<AnalysisReport, RunError> {
    build_report(symbol, samples, source, params, dataset_hash(samples))
}

fn build_report(
    symbol: &str,
    samples: &[Sample],
    source: DataSource,
    params: &AnalysisParams,
    dataset_hash: String,
) -> Result<AnalysisReport, RunError> {
    let wrap = |source| RunError::Analysis {
        symbol: symbol.to_string(),
        source,
    };

    let analysis = analyze(samples, params).map_err(wrap)?;
    let headline = HeadlineMetrics::from_records(&analysis.records).map_err(wrap)?;

    tracing::info!(
        symbol,
        samples = samples.len(),
        dominant = %analysis.summary.dominant,
        "analysis complete"
    );

    Ok(AnalysisReport {
        schema_version: SCHEMA_VERSION,
        run_id: run_id(&dataset_hash, params),
        symbol: symbol.to_string(),
        source,
        params: *params,
        dataset_hash,
        sample_count: samples.len(),
        headline,
        summary: analysis.summary,
        records: analysis.records,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data_loader::SyntheticSpec;
    use chrono::{Duration, TimeZone, Utc};
    use tapewatch_core::Behavior;

    fn samples() -> Vec<Sample> {
        let t = Utc.with_ymd_and_hms(2024, 3, 1, 14, 30, 0).unwrap();
        vec![
            Sample::new(t, 100.0, 1000.0),
            Sample::new(t + Duration::minutes(5), 101.0, 1200.0),
            Sample::new(t + Duration::minutes(10), 99.0, 900.0),
        ]
    }

    #[test]
    fn report_carries_everything() {
        let params = AnalysisParams::with_window(2);
        let report = run_analysis("AAPL", &samples(), DataSource::CsvFile, &params).unwrap();
        assert_eq!(report.schema_version, SCHEMA_VERSION);
        assert_eq!(report.symbol, "AAPL");
        assert_eq!(report.sample_count, 3);
        assert_eq!(report.records.len(), 3);
        assert_eq!(report.headline.latest_behavior, Behavior::MildSelling);
        assert_eq!(report.dataset_hash, dataset_hash(&samples()));
        assert!(!report.is_synthetic());
    }

    #[test]
    fn run_id_is_reproducible() {
        let params = AnalysisParams::with_window(2);
        let a = run_analysis("AAPL", &samples(), DataSource::CsvFile, &params).unwrap();
        let b = run_analysis("AAPL", &samples(), DataSource::CsvFile, &params).unwrap();
        assert_eq!(a.run_id, b.run_id);
        let c = run_analysis("AAPL", &samples(), DataSource::CsvFile, &AnalysisParams::default())
            .unwrap();
        assert_ne!(a.run_id, c.run_id);
    }

    #[test]
    fn analysis_errors_name_the_symbol() {
        let err = run_analysis("EMPTY", &[], DataSource::CsvFile, &AnalysisParams::default())
            .unwrap_err();
        assert!(err.to_string().contains("EMPTY"));
        assert!(err.analysis_error().is_some());
    }

    #[test]
    fn run_instrument_with_synthetic_source() {
        let instrument = InstrumentConfig::synthetic(
            "DEMO",
            SyntheticSpec {
                samples: 40,
                interval_minutes: 5,
            },
        );
        let report = run_instrument(&instrument, &AnalysisParams::default()).unwrap();
        assert!(report.is_synthetic());
        assert_eq!(report.records.len(), 40);
    }

    #[test]
    fn run_instrument_keeps_loader_hash() {
        let spec = SyntheticSpec {
            samples: 12,
            interval_minutes: 15,
        };
        let loaded = load_samples("DEMO", &crate::data_loader::SampleInput::Synthetic(spec))
            .unwrap();
        let report =
            run_instrument(&InstrumentConfig::synthetic("DEMO", spec), &AnalysisParams::default())
                .unwrap();
        assert_eq!(report.dataset_hash, loaded.dataset_hash);
        assert_eq!(
            report.run_id,
            run_id(&loaded.dataset_hash, &AnalysisParams::default())
        );
    }

    #[test]
    fn run_instrument_missing_file_is_load_error() {
        let instrument = InstrumentConfig::csv("NOPE", "/definitely/not/here.csv");
        let err = run_instrument(&instrument, &AnalysisParams::default()).unwrap_err();
        assert!(matches!(err, RunError::Load(_)));
    }
}
