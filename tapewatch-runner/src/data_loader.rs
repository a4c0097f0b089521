//! Sample loading for the runner.
//!
//! Two sources, both offline:
//! 1. CSV file with `timestamp,price,volume` columns (header aliases accepted)
//! 2. Synthetic random walk, seeded from the symbol (developer/demo mode)
//!
//! The loader never sorts, deduplicates or drops rows. Ordering and value
//! checks are the analysis core's job, so bad input surfaces there with the
//! offending sample index.

use std::io::Read;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Duration, NaiveDate, NaiveDateTime, TimeZone, Utc};
use serde::{Deserialize, Serialize};
use tapewatch_core::fingerprint::dataset_hash;
use tapewatch_core::Sample;
use thiserror::Error;

/// Intervals the synthetic generator accepts, in minutes.
pub const ALLOWED_INTERVALS: [u32; 6] = [1, 2, 5, 15, 30, 60];

const TIMESTAMP_ALIASES: [&str; 3] = ["timestamp", "datetime", "time"];
const PRICE_ALIASES: [&str; 2] = ["price", "close"];
const VOLUME_ALIASES: [&str; 1] = ["volume"];

/// Errors from the sample loading layer.
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("failed to read '{origin}': {source}")]
    Csv {
        origin: String,
        #[source]
        source: csv::Error,
    },

    #[error("'{origin}' has no {column} column")]
    MissingColumn { origin: String, column: &'static str },

    #[error("'{origin}' line {line}: cannot parse {column} value '{value}'")]
    BadField {
        origin: String,
        line: usize,
        column: &'static str,
        value: String,
    },

    #[error("'{origin}' contains no samples")]
    Empty { origin: String },

    #[error("invalid synthetic spec: {0}")]
    InvalidSynthetic(String),
}

/// Where the samples came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DataSource {
    CsvFile,
    Synthetic,
}

/// Parameters of a synthetic session.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SyntheticSpec {
    /// Number of samples to generate.
    pub samples: usize,
    /// Minutes between samples; one of [`ALLOWED_INTERVALS`].
    #[serde(default = "default_interval")]
    pub interval_minutes: u32,
}

fn default_interval() -> u32 {
    5
}

impl SyntheticSpec {
    pub fn validate(&self) -> Result<(), LoadError> {
        if self.samples == 0 {
            return Err(LoadError::InvalidSynthetic(
                "sample count must be >= 1".into(),
            ));
        }
        if !ALLOWED_INTERVALS.contains(&self.interval_minutes) {
            return Err(LoadError::InvalidSynthetic(format!(
                "interval must be one of {ALLOWED_INTERVALS:?} minutes, got {}",
                self.interval_minutes
            )));
        }
        Ok(())
    }
}

/// What to load for one instrument.
#[derive(Debug, Clone, PartialEq)]
pub enum SampleInput {
    Csv(PathBuf),
    Synthetic(SyntheticSpec),
}

/// Loaded samples plus provenance.
#[derive(Debug, Clone)]
pub struct LoadedSamples {
    pub symbol: String,
    pub samples: Vec<Sample>,
    pub source: DataSource,
    /// BLAKE3 over all samples, for run fingerprinting.
    pub dataset_hash: String,
}

impl LoadedSamples {
    pub fn is_synthetic(&self) -> bool {
        self.source == DataSource::Synthetic
    }
}

/// Load samples for one instrument.
pub fn load_samples(symbol: &str, input: &SampleInput) -> Result<LoadedSamples, LoadError> {
    let (samples, source) = match input {
        SampleInput::Csv(path) => (load_csv(path)?, DataSource::CsvFile),
        SampleInput::Synthetic(spec) => {
            tracing::warn!(
                symbol,
                "generating synthetic samples; results are tagged as synthetic"
            );
            (generate_synthetic_samples(symbol, spec)?, DataSource::Synthetic)
        }
    };
    tracing::info!(symbol, samples = samples.len(), ?source, "loaded samples");

    Ok(LoadedSamples {
        symbol: symbol.to_string(),
        dataset_hash: dataset_hash(&samples),
        samples,
        source,
    })
}

/// Read samples from a CSV file.
pub fn load_csv(path: &Path) -> Result<Vec<Sample>, LoadError> {
    let origin = path.display().to_string();
    let reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_path(path)
        .map_err(|source| LoadError::Csv {
            origin: origin.clone(),
            source,
        })?;
    read_records(reader, &origin)
}

/// Read samples from any CSV source (tests, stdin).
pub fn read_csv<R: Read>(input: R, origin: &str) -> Result<Vec<Sample>, LoadError> {
    let reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(input);
    read_records(reader, origin)
}

fn read_records<R: Read>(mut reader: csv::Reader<R>, origin: &str) -> Result<Vec<Sample>, LoadError> {
    let csv_err = |source| LoadError::Csv {
        origin: origin.to_string(),
        source,
    };

    let headers = reader.headers().map_err(csv_err)?.clone();
    let column = |aliases: &[&str], name: &'static str| {
        headers
            .iter()
            .position(|h| aliases.iter().any(|a| h.eq_ignore_ascii_case(a)))
            .ok_or_else(|| LoadError::MissingColumn {
                origin: origin.to_string(),
                column: name,
            })
    };
    let ts_col = column(&TIMESTAMP_ALIASES, "timestamp")?;
    let price_col = column(&PRICE_ALIASES, "price")?;
    let volume_col = column(&VOLUME_ALIASES, "volume")?;

    let mut samples = Vec::new();
    for (i, row) in reader.records().enumerate() {
        let row = row.map_err(csv_err)?;
        // Blank lines are skipped by the reader, so the record index alone drifts.
        let line = row.position().map_or(i + 2, |pos| pos.line() as usize);
        let field = |col: usize| row.get(col).unwrap_or("");
        let bad = |column: &'static str, value: &str| LoadError::BadField {
            origin: origin.to_string(),
            line,
            column,
            value: value.to_string(),
        };

        let raw_ts = field(ts_col);
        let timestamp = parse_timestamp(raw_ts).ok_or_else(|| bad("timestamp", raw_ts))?;
        let raw_price = field(price_col);
        let price: f64 = raw_price.parse().map_err(|_| bad("price", raw_price))?;
        let raw_volume = field(volume_col);
        let volume: f64 = raw_volume.parse().map_err(|_| bad("volume", raw_volume))?;

        samples.push(Sample::new(timestamp, price, volume));
    }

    if samples.is_empty() {
        return Err(LoadError::Empty {
            origin: origin.to_string(),
        });
    }
    Ok(samples)
}

/// RFC 3339 (any offset, normalized to UTC) or a naive UTC date-time.
pub fn parse_timestamp(raw: &str) -> Option<DateTime<Utc>> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.with_timezone(&Utc));
    }
    [
        "%Y-%m-%d %H:%M:%S",
        "%Y-%m-%d %H:%M:%S%.f",
        "%Y-%m-%dT%H:%M:%S",
        "%Y-%m-%dT%H:%M:%S%.f",
        "%Y-%m-%d %H:%M",
    ]
    .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(raw, fmt).ok())
        .map(|naive| Utc.from_utc_datetime(&naive))
}

/// Generate a synthetic intraday session for development and demos.
///
/// Produces a random walk from 100.0 starting at 14:30 UTC (US open) on a
/// fixed date. The RNG is seeded from the symbol, so the same symbol always
/// yields the same series.
pub fn generate_synthetic_samples(
    symbol: &str,
    spec: &SyntheticSpec,
) -> Result<Vec<Sample>, LoadError> {
    use rand::rngs::StdRng;
    use rand::{Rng, SeedableRng};

    spec.validate()?;

    // Deterministic seed from symbol name
    let seed_bytes = blake3::hash(symbol.as_bytes());
    let seed: [u8; 32] = *seed_bytes.as_bytes();
    let mut rng = StdRng::from_seed(seed);

    let session_open = NaiveDate::from_ymd_opt(2024, 1, 2)
        .and_then(|d| d.and_hms_opt(14, 30, 0))
        .map(|naive| Utc.from_utc_datetime(&naive))
        .ok_or_else(|| LoadError::InvalidSynthetic("bad session start".into()))?;
    let step = Duration::minutes(i64::from(spec.interval_minutes));

    let mut price = 100.0_f64;
    let mut samples = Vec::with_capacity(spec.samples);
    for i in 0..spec.samples {
        if i > 0 {
            let ret: f64 = rng.gen_range(-0.004..0.004);
            price *= 1.0 + ret;
        }
        let volume = rng.gen_range(20_000u64..200_000) as f64;
        let timestamp = session_open + step * i as i32;
        samples.push(Sample::new(timestamp, (price * 100.0).round() / 100.0, volume));
    }

    Ok(samples)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reads_canonical_headers() {
        let data = "timestamp,price,volume\n\
                    2024-03-01T14:30:00Z,100.5,1000\n\
                    2024-03-01T14:35:00Z,101.0,1200\n";
        let samples = read_csv(data.as_bytes(), "inline").unwrap();
        assert_eq!(samples.len(), 2);
        assert_eq!(samples[0].price, 100.5);
        assert_eq!(samples[1].volume, 1200.0);
        assert!(samples[0].timestamp < samples[1].timestamp);
    }

    #[test]
    fn reads_provider_style_headers() {
        let data = "Datetime,Open,High,Low,Close,Volume\n\
                    2024-03-01T09:30:00-05:00,1,2,0.5,1.5,300\n";
        let samples = read_csv(data.as_bytes(), "inline").unwrap();
        assert_eq!(samples[0].price, 1.5);
        assert_eq!(samples[0].volume, 300.0);
        assert_eq!(samples[0].timestamp.to_rfc3339(), "2024-03-01T14:30:00+00:00");
    }

    #[test]
    fn keeps_file_order() {
        let data = "timestamp,price,volume\n\
                    2024-03-01 14:35:00,2,1\n\
                    2024-03-01 14:30:00,1,1\n";
        let samples = read_csv(data.as_bytes(), "inline").unwrap();
        assert_eq!(samples[0].price, 2.0);
        assert_eq!(samples[1].price, 1.0);
    }

    #[test]
    fn missing_column_is_reported() {
        let data = "timestamp,price\n2024-03-01 14:30:00,1\n";
        let err = read_csv(data.as_bytes(), "inline").unwrap_err();
        assert!(matches!(
            err,
            LoadError::MissingColumn {
                column: "volume",
                ..
            }
        ));
    }

    #[test]
    fn bad_field_reports_line() {
        let data = "timestamp,price,volume\n\
                    2024-03-01 14:30:00,1,1\n\
                    2024-03-01 14:35:00,abc,1\n";
        let err = read_csv(data.as_bytes(), "inline").unwrap_err();
        match err {
            LoadError::BadField {
                line,
                column,
                value,
                ..
            } => {
                assert_eq!(line, 3);
                assert_eq!(column, "price");
                assert_eq!(value, "abc");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn bad_field_line_counts_blank_lines() {
        let data = "timestamp,price,volume\n\
                    \n\
                    2024-03-01 14:30:00,1,1\n\
                    \n\
                    2024-03-01 14:35:00,abc,1\n";
        match read_csv(data.as_bytes(), "inline").unwrap_err() {
            LoadError::BadField { line, column, .. } => {
                assert_eq!(line, 5);
                assert_eq!(column, "price");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn header_only_is_empty() {
        let err = read_csv("timestamp,price,volume\n".as_bytes(), "inline").unwrap_err();
        assert!(matches!(err, LoadError::Empty { .. }));
    }

    #[test]
    fn timestamp_formats() {
        assert!(parse_timestamp("2024-03-01T14:30:00Z").is_some());
        assert!(parse_timestamp("2024-03-01T14:30:00+01:00").is_some());
        assert!(parse_timestamp("2024-03-01 14:30:00").is_some());
        assert!(parse_timestamp("2024-03-01 14:30").is_some());
        assert!(parse_timestamp("2024-03-01 09:30:00.000000").is_some());
        assert_eq!(
            parse_timestamp("2024-03-01T09:30:00.250"),
            Some(Utc.with_ymd_and_hms(2024, 3, 1, 9, 30, 0).unwrap() + Duration::milliseconds(250))
        );
        assert!(parse_timestamp("14:30").is_none());
    }

    #[test]
    fn synthetic_is_deterministic_per_symbol() {
        let spec = SyntheticSpec {
            samples: 78,
            interval_minutes: 5,
        };
        let a = generate_synthetic_samples("DEMO", &spec).unwrap();
        let b = generate_synthetic_samples("DEMO", &spec).unwrap();
        let c = generate_synthetic_samples("OTHER", &spec).unwrap();
        assert_eq!(a, b);
        assert_ne!(a, c);
        assert_eq!(a.len(), 78);
        assert_eq!(a[0].price, 100.0);
        assert_eq!(a[1].timestamp - a[0].timestamp, Duration::minutes(5));
        assert!(a.iter().all(|s| s.price > 0.0 && s.volume >= 20_000.0));
    }

    #[test]
    fn synthetic_spec_validation() {
        let bad_interval = SyntheticSpec {
            samples: 10,
            interval_minutes: 7,
        };
        assert!(bad_interval.validate().is_err());
        let no_samples = SyntheticSpec {
            samples: 0,
            interval_minutes: 5,
        };
        assert!(no_samples.validate().is_err());
    }

    #[test]
    fn load_samples_tags_source_and_hashes() {
        let spec = SyntheticSpec {
            samples: 5,
            interval_minutes: 1,
        };
        let loaded = load_samples("DEMO", &SampleInput::Synthetic(spec)).unwrap();
        assert!(loaded.is_synthetic());
        assert_eq!(loaded.dataset_hash, dataset_hash(&loaded.samples));
    }
}
