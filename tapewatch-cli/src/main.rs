//! Tapewatch CLI: analyze intraday price/volume behavior.
//!
//! Commands:
//! - `analyze`: run one instrument from a CSV file or a synthetic session
//! - `batch`: run every instrument in a TOML config, in parallel by default
//!
//! Results are printed as key insights; the full artifact set (report.json,
//! records.csv, insights.md) is written under the output directory unless
//! `--no-save` is given. Diagnostics go to stderr via `RUST_LOG`.

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};
use tapewatch_core::analysis::{DEFAULT_THRESHOLD, DEFAULT_WINDOW};
use tapewatch_core::AnalysisParams;
use tapewatch_runner::reporting::threshold_percent;
use tapewatch_runner::{
    run_batch, run_instrument, save_all_artifacts, save_artifacts, AnalysisConfig, AnalysisReport,
    InstrumentConfig, SyntheticSpec,
};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(
    name = "tapewatch",
    about = "Tapewatch: intraday price/volume behavior analyzer"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Analyze one instrument from a CSV file or a synthetic session.
    Analyze {
        /// CSV file with timestamp, price and volume columns.
        #[arg(long, conflicts_with = "synthetic")]
        input: Option<PathBuf>,

        /// Generate a deterministic synthetic session instead of reading a file.
        #[arg(long, default_value_t = false)]
        synthetic: bool,

        /// Instrument symbol. Defaults to the input file stem, or DEMO.
        #[arg(long)]
        symbol: Option<String>,

        /// Moving-average window in intervals.
        #[arg(long, default_value_t = DEFAULT_WINDOW)]
        window: usize,

        /// Relative trend threshold (0.001 = 0.1%).
        #[arg(long, default_value_t = DEFAULT_THRESHOLD)]
        threshold: f64,

        /// Synthetic interval in minutes: 1, 2, 5, 15, 30 or 60.
        #[arg(long, default_value_t = 5)]
        interval: u32,

        /// Number of synthetic samples.
        #[arg(long, default_value_t = 78)]
        samples: usize,

        /// Output directory for artifacts.
        #[arg(long, default_value = "results")]
        output_dir: PathBuf,

        /// Print insights only; write no artifacts.
        #[arg(long, default_value_t = false)]
        no_save: bool,
    },
    /// Analyze every instrument listed in a TOML config.
    Batch {
        /// Path to the TOML config file.
        #[arg(long)]
        config: PathBuf,

        /// Run instruments one after another instead of in parallel.
        #[arg(long, default_value_t = false)]
        sequential: bool,

        /// Print insights only; write no artifacts.
        #[arg(long, default_value_t = false)]
        no_save: bool,
    },
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Analyze {
            input,
            synthetic,
            symbol,
            window,
            threshold,
            interval,
            samples,
            output_dir,
            no_save,
        } => {
            let instrument = build_instrument(input, synthetic, symbol, interval, samples)?;
            let params = AnalysisParams { window, threshold };
            run_analyze_cmd(&instrument, &params, (!no_save).then_some(output_dir.as_path()))
        }
        Commands::Batch {
            config,
            sequential,
            no_save,
        } => run_batch_cmd(&config, !sequential, no_save),
    }
}

fn build_instrument(
    input: Option<PathBuf>,
    synthetic: bool,
    symbol: Option<String>,
    interval: u32,
    samples: usize,
) -> Result<InstrumentConfig> {
    let instrument = match (input, synthetic) {
        (Some(path), false) => {
            let symbol = symbol.unwrap_or_else(|| symbol_from_path(&path));
            InstrumentConfig::csv(symbol.to_uppercase(), path)
        }
        (None, true) => {
            let symbol = symbol.unwrap_or_else(|| "DEMO".to_string());
            InstrumentConfig::synthetic(
                symbol.to_uppercase(),
                SyntheticSpec {
                    samples,
                    interval_minutes: interval,
                },
            )
        }
        (Some(_), true) => bail!("--input and --synthetic are mutually exclusive"),
        (None, false) => bail!("one of --input or --synthetic is required"),
    };
    // Surface spec problems (bad interval, empty symbol) before loading anything.
    instrument.input()?;
    Ok(instrument)
}

fn symbol_from_path(path: &Path) -> String {
    path.file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| "INPUT".to_string())
}

fn run_analyze_cmd(
    instrument: &InstrumentConfig,
    params: &AnalysisParams,
    output_dir: Option<&Path>,
) -> Result<()> {
    let report = run_instrument(instrument, params)
        .with_context(|| format!("failed to analyze {}", instrument.symbol))?;

    print_summary(&report);

    if let Some(dir) = output_dir {
        let run_dir = save_artifacts(&report, dir)?;
        println!("Artifacts saved to: {}", run_dir.display());
    }
    Ok(())
}

fn run_batch_cmd(config_path: &Path, parallel: bool, no_save: bool) -> Result<()> {
    let config = AnalysisConfig::from_file(config_path)?;
    tracing::info!(
        config = %config_path.display(),
        instruments = config.instruments.len(),
        "loaded batch config"
    );
    let outcome = run_batch(&config, parallel)?;

    for report in outcome.succeeded() {
        print_summary(report);
    }

    let mut save_failures = 0;
    if !no_save {
        for (symbol, saved) in save_all_artifacts(outcome.succeeded(), &config.output_dir) {
            match saved {
                Ok(run_dir) => println!("Artifacts saved to: {}", run_dir.display()),
                Err(err) => {
                    eprintln!("Error saving {symbol}: {err:#}");
                    save_failures += 1;
                }
            }
        }
    }

    for (symbol, err) in outcome.failed() {
        eprintln!("Error for {symbol}: {err}");
    }
    if !outcome.all_succeeded() || save_failures > 0 {
        std::process::exit(1);
    }

    Ok(())
}

fn print_summary(report: &AnalysisReport) {
    let h = &report.headline;
    let s = &report.summary;

    println!();
    println!("=== Analysis: {} ===", report.symbol);
    println!("Samples:        {}", report.sample_count);
    println!(
        "Parameters:     window {} / threshold {}",
        report.params.window,
        threshold_percent(report.params.threshold)
    );
    println!("Run ID:         {}", &report.run_id[..16]);
    println!();
    println!("--- Headline ---");
    println!(
        "Current Price:  ${:.2} ({:+.2}, {:+.2}%)",
        h.current_price, h.price_change, h.price_change_pct
    );
    match h.volume_vs_average_pct {
        Some(pct) => println!("Current Volume: {:.0} ({pct:+.1}% vs avg)", h.current_volume),
        None => println!("Current Volume: {:.0}", h.current_volume),
    }
    println!(
        "Latest:         {} ({})",
        h.latest_behavior, h.latest_combination
    );
    println!(
        "Factor Ratio:   {:.3} ({:+.2}%)",
        h.factor_ratio, h.factor_change_pct
    );
    println!();
    println!("--- Key Insights ---");
    println!(
        "Buying Pressure:  {:.1}% of intervals",
        s.buying_pressure() * 100.0
    );
    println!(
        "Selling Pressure: {:.1}% of intervals",
        s.selling_pressure() * 100.0
    );
    println!(
        "Stable Market:    {:.1}% of intervals",
        s.stable_market() * 100.0
    );
    println!("Dominant Market Behavior: {}", s.dominant);
    if report.is_synthetic() {
        println!();
        println!("WARNING: Results based on SYNTHETIC data");
    }
}
