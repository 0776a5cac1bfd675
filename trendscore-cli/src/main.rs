//! TrendScore CLI: score bar files, aggregate bars, list timeframe presets.
//!
//! Commands:
//! - `analyze`: technical sentiment for one or more bar CSV files, as JSON
//! - `aggregate`: combine consecutive bars into coarser ones
//! - `timeframes`: print the built-in parameter presets
//!
//! Logs go to stderr so stdout stays machine-readable.

use anyhow::Result;
use clap::{ArgAction, Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;
use trendscore_cli::commands::{
    aggregate_file, analyze_files, render_report, timeframe_table, AnalyzeSettings,
};
use trendscore_core::timeframe::Timeframe;

#[derive(Parser)]
#[command(
    name = "trendscore",
    about = "TrendScore CLI: technical sentiment scoring for OHLCV bars"
)]
struct Cli {
    /// Increase log verbosity (-v info, -vv debug, -vvv trace). Overrides RUST_LOG.
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Score bar CSV files (ts,open,high,low,close,volume) and print JSON.
    Analyze {
        /// Bar CSV files.
        #[arg(required = true)]
        files: Vec<PathBuf>,

        /// Timeframe preset (1m .. 3mo). Defaults to the params file's, else 1d.
        #[arg(long)]
        timeframe: Option<Timeframe>,

        /// TOML file overriding presets per timeframe.
        #[arg(long)]
        params: Option<PathBuf>,

        /// Treat input as the timeframe's base interval and aggregate first.
        #[arg(long, default_value_t = false)]
        resample: bool,

        /// Pretty-print JSON.
        #[arg(long, default_value_t = false)]
        pretty: bool,
    },
    /// Combine every N consecutive bars into one.
    Aggregate {
        /// Bar CSV file.
        input: PathBuf,

        /// Bars per output bar (1-12).
        #[arg(long, short)]
        multiplier: usize,

        /// Output CSV. Defaults to stdout.
        #[arg(long, short)]
        output: Option<PathBuf>,
    },
    /// Print the built-in timeframe presets.
    Timeframes,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match cli.command {
        Commands::Analyze {
            files,
            timeframe,
            params,
            resample,
            pretty,
        } => run_analyze(files, timeframe, params, resample, pretty),
        Commands::Aggregate {
            input,
            multiplier,
            output,
        } => {
            if let Some(csv) = aggregate_file(&input, multiplier, output.as_deref())? {
                print!("{csv}");
            }
            Ok(())
        }
        Commands::Timeframes => {
            print!("{}", timeframe_table());
            Ok(())
        }
    }
}

fn init_logging(verbose: u8) {
    let filter = match verbose {
        0 => EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        1 => EnvFilter::new("info"),
        2 => EnvFilter::new("debug"),
        _ => EnvFilter::new("trace"),
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn run_analyze(
    files: Vec<PathBuf>,
    timeframe: Option<Timeframe>,
    params: Option<PathBuf>,
    resample: bool,
    pretty: bool,
) -> Result<()> {
    let settings = AnalyzeSettings::resolve(timeframe, params.as_deref(), resample)?;

    let mut failures = 0usize;
    for (path, outcome) in files.iter().zip(analyze_files(&files, &settings)) {
        match outcome.and_then(|report| render_report(&report, pretty)) {
            Ok(json) => println!("{json}"),
            Err(err) => {
                failures += 1;
                eprintln!("Error for {}: {err:#}", path.display());
            }
        }
    }

    if failures > 0 {
        std::process::exit(1);
    }
    Ok(())
}
