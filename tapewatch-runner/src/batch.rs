//! Batch mode: analyze many instruments, optionally in parallel.
//!
//! Every run is independent (the core keeps no state between calls), so the
//! instruments are fanned out over rayon with no coordination. Outcomes are
//! returned in configuration order and one failure never stops the others.

use rayon::prelude::*;

use crate::config::{AnalysisConfig, ConfigError, InstrumentConfig};
use crate::runner::{run_instrument, AnalysisReport, RunError};

/// Outcome for one instrument.
#[derive(Debug)]
pub struct BatchEntry {
    pub symbol: String,
    pub outcome: Result<AnalysisReport, RunError>,
}

#[derive(Debug, Default)]
pub struct BatchOutcome {
    pub entries: Vec<BatchEntry>,
}

impl BatchOutcome {
    pub fn succeeded(&self) -> impl Iterator<Item = &AnalysisReport> {
        self.entries.iter().filter_map(|e| e.outcome.as_ref().ok())
    }

    pub fn failed(&self) -> impl Iterator<Item = (&str, &RunError)> {
        self.entries
            .iter()
            .filter_map(|e| e.outcome.as_ref().err().map(|err| (e.symbol.as_str(), err)))
    }

    pub fn all_succeeded(&self) -> bool {
        self.entries.iter().all(|e| e.outcome.is_ok())
    }
}

/// Run every configured instrument.
///
/// The config is validated up front; a bad config fails the whole batch.
pub fn run_batch(config: &AnalysisConfig, parallel: bool) -> Result<BatchOutcome, ConfigError> {
    config.validate()?;
    let params = config.params();

    tracing::info!(
        instruments = config.instruments.len(),
        parallel,
        "starting batch"
    );

    let run = |instrument: &InstrumentConfig| BatchEntry {
        symbol: instrument.symbol.clone(),
        outcome: run_instrument(instrument, &params),
    };

    let entries: Vec<BatchEntry> = if parallel {
        config.instruments.par_iter().map(run).collect()
    } else {
        config.instruments.iter().map(run).collect()
    };

    for entry in &entries {
        if let Err(err) = &entry.outcome {
            tracing::warn!(symbol = %entry.symbol, error = %err, "instrument failed");
        }
    }

    Ok(BatchOutcome { entries })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data_loader::SyntheticSpec;

    fn config(symbols: &[&str]) -> AnalysisConfig {
        AnalysisConfig {
            instruments: symbols
                .iter()
                .map(|s| {
                    InstrumentConfig::synthetic(
                        *s,
                        SyntheticSpec {
                            samples: 30,
                            interval_minutes: 5,
                        },
                    )
                })
                .collect(),
            ..AnalysisConfig::default()
        }
    }

    #[test]
    fn parallel_matches_sequential() {
        let cfg = config(&["AAA", "BBB", "CCC", "DDD"]);
        let par = run_batch(&cfg, true).unwrap();
        let seq = run_batch(&cfg, false).unwrap();
        assert!(par.all_succeeded());
        let par_reports: Vec<_> = par.succeeded().collect();
        let seq_reports: Vec<_> = seq.succeeded().collect();
        assert_eq!(par_reports, seq_reports);
        let symbols: Vec<&str> = par.entries.iter().map(|e| e.symbol.as_str()).collect();
        assert_eq!(symbols, vec!["AAA", "BBB", "CCC", "DDD"]);
    }

    #[test]
    fn one_failure_does_not_stop_the_rest() {
        let mut cfg = config(&["AAA", "BBB"]);
        cfg.instruments
            .insert(1, InstrumentConfig::csv("MISSING", "/no/such/file.csv"));
        let outcome = run_batch(&cfg, true).unwrap();
        assert!(!outcome.all_succeeded());
        assert_eq!(outcome.succeeded().count(), 2);
        let failed: Vec<&str> = outcome.failed().map(|(s, _)| s).collect();
        assert_eq!(failed, vec!["MISSING"]);
    }

    #[test]
    fn invalid_config_fails_fast() {
        let mut cfg = config(&["AAA"]);
        cfg.window = 0;
        assert!(run_batch(&cfg, false).is_err());
    }
}
