//! Auction site ingester.
//!
//! Reads the spreadsheet export of auction sites and writes the normalized
//! JSON dataset consumed by the website.

mod config;
mod config_loader;

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use ingestion::{IngestionResult, Ingester};
use tracing::{info, warn, Level};
use tracing_subscriber::FmtSubscriber;

use config::{IngesterConfig, LogFormat, LoggingConfig, Overrides};

#[derive(Parser, Debug)]
#[command(name = "site-ingester")]
#[command(about = "Normalize the auction site CSV export into the website dataset")]
struct Args {
    /// Configuration file path
    #[arg(short, long, env = "INGESTER_CONFIG")]
    config: Option<PathBuf>,

    /// Source CSV export [default: sites-new.csv]
    #[arg(short, long, env = "SITES_CSV")]
    input: Option<PathBuf>,

    /// Output JSON file [default: src/data/sites.json]
    #[arg(short, long, env = "SITES_JSON")]
    output: Option<PathBuf>,

    /// Reject rows whose Sl_No does not parse instead of numbering them by position
    #[arg(long)]
    strict_serials: bool,

    /// Rows per progress report
    #[arg(long)]
    batch_size: Option<usize>,

    /// Run the pipeline and print stats without writing the output
    #[arg(long)]
    dry_run: bool,

    /// Log level
    #[arg(long, env = "LOG_LEVEL")]
    log_level: Option<String>,

    /// Log output format
    #[arg(long, env = "LOG_FORMAT", value_enum)]
    log_format: Option<LogFormat>,
}

impl Args {
    fn overrides(&self) -> Overrides {
        Overrides {
            input: self.input.clone(),
            output: self.output.clone(),
            strict_serials: self.strict_serials,
            batch_size: self.batch_size,
            log_level: self.log_level.clone(),
            log_format: self.log_format,
        }
    }
}

fn main() -> Result<()> {
    // .env must be loaded before clap reads env-backed flags
    dotenvy::dotenv().ok();
    let args = Args::parse();

    let mut config = match &args.config {
        Some(path) => IngesterConfig::from_yaml(path)?,
        None => IngesterConfig::default(),
    };
    config.apply(args.overrides());
    config.validate().context("Invalid configuration")?;

    init_tracing(&config.logging)?;

    info!(
        input = %config.input.display(),
        output = %config.output.display(),
        serial_policy = ?config.serial_policy,
        dry_run = args.dry_run,
        "Starting site ingestion"
    );

    let ingester = Ingester::new(config.ingest_options());

    if args.dry_run {
        let result = ingester.ingest_file(&config.input)?;
        log_summary(&result);
        println!("{}", serde_json::to_string_pretty(&result.dataset.stats)?);
        return Ok(());
    }

    let result = ingester.ingest_to_file(&config.input, &config.output)?;
    log_summary(&result);

    Ok(())
}

fn init_tracing(logging: &LoggingConfig) -> Result<()> {
    let level = match logging.level.as_str() {
        "trace" => Level::TRACE,
        "debug" => Level::DEBUG,
        "info" => Level::INFO,
        "warn" => Level::WARN,
        "error" => Level::ERROR,
        _ => Level::INFO,
    };

    let builder = FmtSubscriber::builder()
        .with_writer(std::io::stderr)
        .with_max_level(level)
        .with_target(true);

    match logging.format {
        LogFormat::Json => tracing::subscriber::set_global_default(builder.json().finish())?,
        LogFormat::Pretty => tracing::subscriber::set_global_default(builder.finish())?,
    }

    Ok(())
}

fn log_summary(result: &IngestionResult) {
    let report = &result.report;
    let stats = &result.dataset.stats;

    info!(
        total = stats.total,
        with_coordinates = stats.with_coordinates,
        session1 = stats.session1,
        session2 = stats.session2,
        layouts = result.dataset.layouts.len(),
        "Ingestion summary"
    );

    if !report.skipped.is_empty() {
        let lines: Vec<usize> = report.skipped.iter().map(|row| row.line).collect();
        warn!(count = lines.len(), lines = ?lines, "Rows skipped");
    }
    if !report.serial_fallbacks.is_empty() {
        warn!(
            count = report.serial_fallbacks.len(),
            lines = ?report.serial_fallbacks,
            "Rows numbered by position"
        );
    }
}
