//! Tapewatch Runner: loading, orchestration, batch mode, export and reports.
//!
//! This crate builds on `tapewatch-core` to provide:
//! - Sample loading from CSV files or a seeded synthetic generator
//! - TOML analysis configuration
//! - Single-instrument runs producing a versioned `AnalysisReport`
//! - Headline metrics (price change, volume vs. mean, latest behavior, factor ratio)
//! - Parallel batch mode over many instruments
//! - CSV / JSON / Markdown export

pub mod batch;
pub mod config;
pub mod data_loader;
pub mod export;
pub mod metrics;
pub mod reporting;
pub mod runner;

pub use batch::{run_batch, BatchEntry, BatchOutcome};
pub use config::{AnalysisConfig, ConfigError, InstrumentConfig};
pub use data_loader::{
    load_csv, load_samples, DataSource, LoadError, LoadedSamples, SampleInput, SyntheticSpec,
};
pub use export::{
    export_json, export_records_csv, import_json, load_report, save_all_artifacts, save_artifacts,
};
pub use metrics::HeadlineMetrics;
pub use reporting::render_insights;
pub use runner::{run_analysis, run_instrument, AnalysisReport, RunError, SCHEMA_VERSION};
