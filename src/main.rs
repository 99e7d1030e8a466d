//! CLI entry point for the forecast summary tool.
//!
//! Provides subcommands for building a highlight summary from a forecast
//! dataset, exporting the poster summaries, and validating datasets.

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use forecast_summary::{
    fetch::load_dataset,
    output::{
        EXPORT_DAY_OFFSET, ExportPreset, export_presets, print_json, print_pretty,
        write_highlights_csv, write_summary_json,
    },
    stats::DatasetStats,
    summary::{SummaryConfig, build_summary_with, config::parse_threshold},
};
use std::ffi::OsStr;
use std::path::{Path, PathBuf};
use tracing::{info, warn};
use tracing_subscriber::{
    EnvFilter, Layer,
    fmt::{self, format::FmtSpan},
    layer::SubscriberExt,
    util::SubscriberInitExt,
};

#[derive(Parser)]
#[command(name = "forecast_summary")]
#[command(about = "Builds highlight summaries from landscape forecast datasets", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Build a summary for one day window
    Summarize {
        /// Path to file or URL to fetch
        #[arg(value_name = "FILE_OR_URL")]
        source: String,

        /// Number of days to include
        #[arg(short, long, default_value_t = 3)]
        days: usize,

        /// Index of the first included day (0 = today, 1 = tomorrow)
        #[arg(short, long, default_value_t = 0)]
        offset: usize,

        /// Minimum highlight score (overrides SUMMARY_THRESHOLD)
        #[arg(short, long, value_parser = parse_threshold)]
        threshold: Option<f64>,

        /// JSON file to write the summary to
        #[arg(long)]
        output: Option<PathBuf>,

        /// CSV file to write highlights to
        #[arg(long)]
        csv: Option<PathBuf>,

        /// Number of highlights to log
        #[arg(long, default_value_t = 10)]
        top: usize,

        /// Log the full summary as JSON
        #[arg(long, default_value_t = false)]
        json: bool,
    },
    /// Write one summary JSON per poster preset (3day, week)
    Export {
        /// Path to file or URL to fetch
        #[arg(value_name = "FILE_OR_URL")]
        source: String,

        /// Directory to write summary files to
        #[arg(short = 'd', long, default_value = "posters")]
        out_dir: PathBuf,

        /// Index of the first included day
        #[arg(short, long, default_value_t = EXPORT_DAY_OFFSET)]
        offset: usize,

        /// Minimum highlight score (overrides SUMMARY_THRESHOLD)
        #[arg(short, long, value_parser = parse_threshold)]
        threshold: Option<f64>,
    },
    /// Check a dataset and log its statistics
    Validate {
        /// Path to file or URL to fetch
        #[arg(value_name = "FILE_OR_URL")]
        source: String,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok(); // Load .env file

    // Logging setup: colored stderr + JSON rolling log file
    let log_file_path = std::env::var("LOG_FILE_PATH")
        .unwrap_or_else(|_| "logs/forecast_summary.log".to_string());
    let log_dir = Path::new(&log_file_path)
        .parent()
        .unwrap_or(Path::new("logs"));
    let log_file_name = Path::new(&log_file_path)
        .file_name()
        .unwrap_or(OsStr::new("forecast_summary.log"));

    let file_appender = tracing_appender::rolling::daily(log_dir, log_file_name);
    let (non_blocking_file, _file_guard) = tracing_appender::non_blocking(file_appender);

    let stderr_layer = fmt::layer()
        .with_target(true)
        .with_span_events(FmtSpan::CLOSE)
        .with_ansi(true)
        .with_writer(std::io::stderr)
        .with_filter(EnvFilter::from_env("RUST_LOG").add_directive("info".parse()?));

    let json_layer = fmt::layer()
        .json()
        .with_current_span(true)
        .with_span_list(true)
        .with_writer(non_blocking_file)
        .with_filter(EnvFilter::from_env("RUST_LOG_JSON").add_directive("debug".parse()?));

    tracing_subscriber::registry()
        .with(stderr_layer)
        .with(json_layer)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Summarize {
            source,
            days,
            offset,
            threshold,
            output,
            csv,
            top,
            json,
        } => {
            let config = resolve_config(threshold)?;
            let dataset = load_validated(&source).await?;
            let summary = build_summary_with(&dataset, days, offset, &config);

            info!(
                date_range = %summary.date_range,
                highlights = summary.highlights.len(),
                groups = summary.group_overview.len(),
                threshold = config.threshold,
                "Summary built"
            );

            for (group, best) in summary.group_overview.iter() {
                info!(
                    group,
                    viewpoint = %best.viewpoint,
                    score = best.score,
                    weather = %best.weather,
                    date = %best.date,
                    period = %best.period,
                    "Group best"
                );
            }

            for h in summary.highlights.iter().take(top) {
                info!(
                    date = %h.date,
                    period = %h.period,
                    group = %h.group,
                    viewpoint = %h.viewpoint,
                    event = %h.event,
                    score = h.score,
                    "Highlight"
                );
            }

            print_pretty(&summary);
            if json {
                print_json(&summary)?;
            }

            if let Some(path) = output {
                write_summary_json(&path, &summary)?;
                info!(path = %path.display(), "Summary written");
            }

            if let Some(path) = csv {
                write_highlights_csv(&path, &summary.highlights)?;
                info!(path = %path.display(), "Highlights CSV written");
            }
        }
        Commands::Export {
            source,
            out_dir,
            offset,
            threshold,
        } => {
            let config = resolve_config(threshold)?;
            let dataset = load_validated(&source).await?;
            let written = export_presets(
                &dataset,
                &ExportPreset::defaults(),
                &out_dir,
                offset,
                &config,
            )?;

            info!(files = written.len(), out_dir = %out_dir.display(), "Export complete");
        }
        Commands::Validate { source } => {
            let dataset = load_validated(&source).await?;
            let stats = DatasetStats::from_dataset(&dataset);

            if stats.orphan_records > 0 {
                warn!(
                    orphan_records = stats.orphan_records,
                    "Day records with dates outside the forecast day list"
                );
            }

            info!(
                generated_at = %stats.generated_at,
                days = stats.days,
                groups = stats.groups,
                viewpoints = stats.viewpoints,
                slots = stats.slots,
                event_pct = stats.event_pct(),
                "Dataset valid"
            );
        }
    }

    Ok(())
}

/// Threshold precedence: CLI flag, then `SUMMARY_THRESHOLD`, then the default.
fn resolve_config(threshold: Option<f64>) -> Result<SummaryConfig> {
    match threshold {
        Some(t) => Ok(SummaryConfig::with_threshold(t)),
        None => SummaryConfig::from_env(),
    }
}

#[tracing::instrument]
async fn load_validated(source: &str) -> Result<forecast_summary::dataset::ForecastDataset> {
    let dataset = load_dataset(source).await?;
    dataset
        .validate()
        .with_context(|| format!("dataset at {source} failed validation"))?;
    Ok(dataset)
}
