//! Human-readable reports built from an `AnalysisReport`.

pub mod markdown;

pub use markdown::render_insights;

/// Format a `[0, 1]` fraction as a percentage with one decimal.
pub fn percent(fraction: f64) -> String {
    format!("{:.1}%", fraction * 100.0)
}

/// Format a classification threshold as a percentage with three decimals.
pub fn threshold_percent(threshold: f64) -> String {
    format!("{:.3}%", threshold * 100.0)
}
