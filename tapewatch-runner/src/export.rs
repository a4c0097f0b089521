//! Export: CSV rows, JSON reports, and the on-disk artifact bundle.
//!
//! - **CSV**: one row per annotated record, for spreadsheets and external tools
//! - **JSON**: full-precision report with schema versioning
//! - **Markdown**: the insights report (see `reporting`)
//!
//! Unknown (newer) schema versions are rejected on load.

use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use tapewatch_core::AnnotatedRecord;

use crate::reporting::render_insights;
use crate::runner::{AnalysisReport, SCHEMA_VERSION};

pub const REPORT_FILE: &str = "report.json";
pub const RECORDS_FILE: &str = "records.csv";
pub const INSIGHTS_FILE: &str = "insights.md";

// ─── CSV export ─────────────────────────────────────────────────────

/// Export annotated records as CSV.
///
/// Columns: timestamp, price, volume, price_trend, volume_trend, combination,
/// behavior, factor, factor_ratio. Numbers use display rounding (price 2 dp,
/// volume and factor whole, factor ratio 3 dp); the JSON report keeps full
/// precision.
pub fn export_records_csv(records: &[AnnotatedRecord]) -> Result<String> {
    let mut wtr = csv::Writer::from_writer(vec![]);

    wtr.write_record([
        "timestamp",
        "price",
        "volume",
        "price_trend",
        "volume_trend",
        "combination",
        "behavior",
        "factor",
        "factor_ratio",
    ])?;

    for r in records {
        wtr.write_record([
            r.timestamp.to_rfc3339().as_str(),
            format!("{:.2}", r.price).as_str(),
            format!("{:.0}", r.volume).as_str(),
            r.price_trend.as_str(),
            r.volume_trend.as_str(),
            r.combination.as_str(),
            r.behavior.label(),
            format!("{:.0}", r.factor).as_str(),
            format!("{:.3}", r.factor_ratio).as_str(),
        ])?;
    }

    let data = wtr.into_inner().context("failed to flush CSV writer")?;
    String::from_utf8(data).context("CSV output is not valid UTF-8")
}

// ─── JSON export ────────────────────────────────────────────────────

/// Serialize an `AnalysisReport` to pretty JSON.
pub fn export_json(report: &AnalysisReport) -> Result<String> {
    serde_json::to_string_pretty(report).context("failed to serialize AnalysisReport to JSON")
}

/// Deserialize an `AnalysisReport` from JSON, rejecting unknown schema versions
/// and summaries that do not list every behavior in order.
pub fn import_json(json: &str) -> Result<AnalysisReport> {
    let report: AnalysisReport =
        serde_json::from_str(json).context("failed to deserialize AnalysisReport from JSON")?;
    if report.schema_version > SCHEMA_VERSION {
        bail!(
            "unsupported schema version {} (max supported: {})",
            report.schema_version,
            SCHEMA_VERSION
        );
    }
    if !report.summary.has_canonical_layout() {
        bail!(
            "malformed summary in report for '{}': expected one entry per behavior",
            report.symbol
        );
    }
    Ok(report)
}

// ─── Artifact bundle ────────────────────────────────────────────────

/// Save the full artifact set for one analysis run.
///
/// Creates `{symbol}_{timestamp}/` under `output_dir` containing:
/// - `report.json`: the full `AnalysisReport`
/// - `records.csv`: one row per annotated record
/// - `insights.md`: headline metrics and key insights
///
/// Returns the path to the created directory.
pub fn save_artifacts(report: &AnalysisReport, output_dir: &Path) -> Result<PathBuf> {
    let dirname = format!(
        "{}_{}",
        dir_safe_symbol(&report.symbol),
        chrono::Local::now().format("%Y%m%d_%H%M%S")
    );
    let run_dir = output_dir.join(dirname);
    std::fs::create_dir_all(&run_dir)
        .with_context(|| format!("failed to create artifact dir: {}", run_dir.display()))?;

    std::fs::write(run_dir.join(REPORT_FILE), export_json(report)?)?;
    std::fs::write(run_dir.join(RECORDS_FILE), export_records_csv(&report.records)?)?;
    std::fs::write(run_dir.join(INSIGHTS_FILE), render_insights(report))?;

    tracing::info!(symbol = %report.symbol, dir = %run_dir.display(), "saved artifacts");
    Ok(run_dir)
}

/// Save artifacts for every report, continuing past failures.
///
/// Returns one `(symbol, result)` pair per report, in input order.
pub fn save_all_artifacts<'a>(
    reports: impl IntoIterator<Item = &'a AnalysisReport>,
    output_dir: &Path,
) -> Vec<(&'a str, Result<PathBuf>)> {
    reports
        .into_iter()
        .map(|report| {
            let saved = save_artifacts(report, output_dir);
            if let Err(err) = &saved {
                tracing::warn!(symbol = %report.symbol, error = %err, "failed to save artifacts");
            }
            (report.symbol.as_str(), saved)
        })
        .collect()
}

/// Symbol reduced to characters that cannot leave or nest under `output_dir`.
fn dir_safe_symbol(symbol: &str) -> String {
    symbol
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || matches!(c, '-' | '_' | '.') {
                c
            } else {
                '_'
            }
        })
        .collect()
}

/// Load an `AnalysisReport` from an artifact directory's report.json.
pub fn load_report(run_dir: &Path) -> Result<AnalysisReport> {
    let path = run_dir.join(REPORT_FILE);
    let json = std::fs::read_to_string(&path)
        .with_context(|| format!("failed to read {}", path.display()))?;
    import_json(&json)
}
