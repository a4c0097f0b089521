//! Markdown insights report.

use std::fmt::Write;

use tapewatch_core::Behavior;

use super::{percent, threshold_percent};
use crate::runner::AnalysisReport;

/// Render headline metrics, key insights and frequency tables.
pub fn render_insights(report: &AnalysisReport) -> String {
    let h = &report.headline;
    let s = &report.summary;

    let mut out = format!(
        "# Intraday Analysis: {}\n\n\
Run ID: `{}`\n\n\
Samples: {} | MA window: {} | Threshold: {}\n",
        report.symbol,
        report.run_id,
        report.sample_count,
        report.params.window,
        threshold_percent(report.params.threshold),
    );
    if report.is_synthetic() {
        out.push_str("\n> Synthetic data: not a real market series.\n");
    }

    let volume_vs_avg = h
        .volume_vs_average_pct
        .map(|pct| format!("{pct:+.1}% vs avg"))
        .unwrap_or_else(|| "n/a vs avg".to_string());

    // Writing to a String cannot fail.
    let _ = write!(
        out,
        "\n## Headline\n\
- Current Price: ${:.2} ({:+.2}, {:+.2}%)\n\
- Current Volume: {:.0} ({})\n\
- Latest Behavior: {} ({})\n\
- Factor Ratio: {:.3} ({:+.2}%)\n",
        h.current_price,
        h.price_change,
        h.price_change_pct,
        h.current_volume,
        volume_vs_avg,
        h.latest_behavior,
        h.latest_combination,
        h.factor_ratio,
        h.factor_change_pct,
    );

    let _ = write!(
        out,
        "\n## Key Insights\n\
- **Buying Pressure**: {} of intervals\n\
- **Selling Pressure**: {} of intervals\n\
- **Stable Market**: {} of intervals\n\
- **Dominant Market Behavior**: {}\n",
        percent(s.buying_pressure()),
        percent(s.selling_pressure()),
        percent(s.stable_market()),
        s.dominant,
    );

    out.push_str("\n## Market Behaviors\n\n");
    out.push_str("| Behavior | Count | Share |\n");
    out.push_str("|----------|-------|-------|\n");
    let mut rows: Vec<_> = s.behaviors.iter().filter(|b| b.count > 0).collect();
    rows.sort_by(|a, b| b.count.cmp(&a.count));
    for b in rows {
        let _ = writeln!(out, "| {} | {} | {} |", b.behavior, b.count, percent(b.fraction));
    }

    out.push_str("\n## Price-Volume Combinations\n\n");
    out.push_str("| Combination | Count |\n");
    out.push_str("|-------------|-------|\n");
    for c in &s.combinations {
        let _ = writeln!(out, "| {} | {} |", c.combination, c.count);
    }

    if s.count(Behavior::VolumeSpike) > 0 {
        let _ = writeln!(
            out,
            "\nVolume spikes without a price move: {} interval(s).",
            s.count(Behavior::VolumeSpike)
        );
    }

    out
}
