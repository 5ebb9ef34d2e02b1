//! Vela CLI - analyze an already-retrieved daily bar series.
//!
//! The binary is a thin consumer of the library: it loads a JSON bar file
//! produced by whatever fetched the data, runs the analysis pipeline, and
//! prints the report as a JSON envelope.

use std::fs;
use std::path::PathBuf;

use chrono::NaiveDate;
use clap::{Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};
use vela_core::{analyze, ApiResponse, PriceBar, Result};

#[derive(Parser)]
#[command(name = "vela")]
#[command(about = "Price-series risk and performance analytics")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Analyze a JSON bar series and print the full report
    Analyze {
        /// Path to a JSON array of daily bars, date-ascending
        #[arg(short, long)]
        file: PathBuf,
        /// Instrument symbol the series belongs to
        #[arg(short, long)]
        symbol: String,
        /// Keep only bars on or after this date (YYYY-MM-DD)
        #[arg(long)]
        from: Option<NaiveDate>,
        /// Keep only bars on or before this date (YYYY-MM-DD)
        #[arg(long)]
        to: Option<NaiveDate>,
    },
}

fn main() {
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with(tracing_subscriber::fmt::layer())
        .init();

    let cli = Cli::parse();

    let output = match cli.command {
        Commands::Analyze {
            file,
            symbol,
            from,
            to,
        } => handle_analyze(&file, &symbol, from, to),
    };

    println!("{}", output);
}

fn load_bars(path: &PathBuf) -> Result<Vec<PriceBar>> {
    let content = fs::read_to_string(path)?;
    Ok(serde_json::from_str(&content)?)
}

fn handle_analyze(
    file: &PathBuf,
    symbol: &str,
    from: Option<NaiveDate>,
    to: Option<NaiveDate>,
) -> String {
    let bars = match load_bars(file) {
        Ok(bars) => bars,
        Err(e) => {
            return serde_json::to_string_pretty(&ApiResponse::<()>::err(e.to_string())).unwrap()
        }
    };

    let bars: Vec<PriceBar> = bars
        .into_iter()
        .filter(|b| {
            from.map(|d| b.date >= d).unwrap_or(true) && to.map(|d| b.date <= d).unwrap_or(true)
        })
        .collect();

    match analyze(symbol, &bars) {
        Ok(report) => serde_json::to_string_pretty(&ApiResponse::ok(report)).unwrap(),
        Err(e) => serde_json::to_string_pretty(&ApiResponse::<()>::err(e.to_string())).unwrap(),
    }
}
