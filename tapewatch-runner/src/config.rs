//! Serializable analysis configuration.
//!
//! ```toml
//! window = 3
//! threshold = 0.001
//! output_dir = "results"
//!
//! [[instruments]]
//! symbol = "AAPL"
//! path = "data/aapl_5m.csv"
//!
//! [[instruments]]
//! symbol = "DEMO"
//! synthetic = { samples = 78, interval_minutes = 5 }
//! ```

use std::collections::HashSet;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tapewatch_core::analysis::{DEFAULT_THRESHOLD, DEFAULT_WINDOW};
use tapewatch_core::AnalysisParams;
use thiserror::Error;

use crate::data_loader::{SampleInput, SyntheticSpec};

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("invalid config: {0}")]
    Invalid(String),
}

/// Top-level configuration for one or more analysis runs.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct AnalysisConfig {
    /// Moving-average window in intervals.
    #[serde(default = "default_window")]
    pub window: usize,

    /// Relative trend threshold (0.001 = 0.1%).
    #[serde(default = "default_threshold")]
    pub threshold: f64,

    /// Where artifacts are written.
    #[serde(default = "default_output_dir")]
    pub output_dir: PathBuf,

    #[serde(default)]
    pub instruments: Vec<InstrumentConfig>,
}

/// One instrument to analyze. Exactly one of `path` / `synthetic` is set.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct InstrumentConfig {
    pub symbol: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub path: Option<PathBuf>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub synthetic: Option<SyntheticSpec>,
}

fn default_window() -> usize {
    DEFAULT_WINDOW
}

fn default_threshold() -> f64 {
    DEFAULT_THRESHOLD
}

fn default_output_dir() -> PathBuf {
    PathBuf::from("results")
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            window: default_window(),
            threshold: default_threshold(),
            output_dir: default_output_dir(),
            instruments: Vec::new(),
        }
    }
}

impl AnalysisConfig {
    /// Load and validate a config from a TOML file.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml(&content)
    }

    /// Parse and validate a config from a TOML string.
    pub fn from_toml(content: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    pub fn params(&self) -> AnalysisParams {
        AnalysisParams {
            window: self.window,
            threshold: self.threshold,
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        self.params()
            .validate()
            .map_err(|e| ConfigError::Invalid(e.to_string()))?;

        if self.instruments.is_empty() {
            return Err(ConfigError::Invalid("no instruments configured".into()));
        }

        let mut seen = HashSet::new();
        for instrument in &self.instruments {
            if !seen.insert(instrument.symbol.as_str()) {
                return Err(ConfigError::Invalid(format!(
                    "duplicate symbol '{}'",
                    instrument.symbol
                )));
            }
            instrument.input()?;
        }
        Ok(())
    }
}

impl InstrumentConfig {
    pub fn csv(symbol: impl Into<String>, path: impl Into<PathBuf>) -> Self {
        Self {
            symbol: symbol.into(),
            path: Some(path.into()),
            synthetic: None,
        }
    }

    pub fn synthetic(symbol: impl Into<String>, spec: SyntheticSpec) -> Self {
        Self {
            symbol: symbol.into(),
            path: None,
            synthetic: Some(spec),
        }
    }

    /// Resolve the sample source, checking the instrument is well formed.
    pub fn input(&self) -> Result<SampleInput, ConfigError> {
        if self.symbol.trim().is_empty() {
            return Err(ConfigError::Invalid("instrument symbol is empty".into()));
        }
        match (&self.path, &self.synthetic) {
            (Some(path), None) => Ok(SampleInput::Csv(path.clone())),
            (None, Some(spec)) => {
                spec.validate()
                    .map_err(|e| ConfigError::Invalid(format!("{}: {e}", self.symbol)))?;
                Ok(SampleInput::Synthetic(*spec))
            }
            (Some(_), Some(_)) => Err(ConfigError::Invalid(format!(
                "{}: set either path or synthetic, not both",
                self.symbol
            ))),
            (None, None) => Err(ConfigError::Invalid(format!(
                "{}: one of path or synthetic is required",
                self.symbol
            ))),
        }
    }
}
