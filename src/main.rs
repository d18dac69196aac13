//! dailycast: batch forecasting for CSV exports.
//!
//! Reads a CSV file, forecasts the requested number of days, and prints the
//! forecast JSON to stdout. Failures also print JSON (`{"error": ...}`) so
//! callers can parse either outcome; logs go to stderr. Exit codes: 0 on
//! success, 3 when the history is too short, 4 for any other failure.

use clap::Parser;
use dailycast::error::Error;
use dailycast::models::SeasonalTrend;
use dailycast::pipeline::{self, ForecastOptions};
use std::path::PathBuf;

/// Exit code for a history shorter than the minimum.
const EXIT_INSUFFICIENT_HISTORY: i32 = 3;

/// Exit code for every other failure.
const EXIT_FAILURE: i32 = 4;

const DEFAULT_SMOOTHING: usize = 3;

#[derive(Parser)]
#[command(name = "dailycast", version, about = "Forecast daily values from a CSV export")]
struct Cli {
    /// CSV file with a date column and a value column
    #[arg(long)]
    file: PathBuf,

    /// Days to forecast past the end of the history
    #[arg(long, default_value_t = pipeline::DEFAULT_HORIZON)]
    period: usize,

    /// Accepted for compatibility with older callers; has no effect
    #[arg(long, default_value_t = DEFAULT_SMOOTHING)]
    smoothing: usize,

    /// Prediction-interval coverage, strictly between 0 and 1
    #[arg(long, default_value_t = pipeline::DEFAULT_INTERVAL_WIDTH)]
    interval: f64,
}

fn main() {
    // Keep stdout machine-readable: logs go to stderr.
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "dailycast=warn".into()),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    if cli.smoothing != DEFAULT_SMOOTHING {
        tracing::debug!(smoothing = cli.smoothing, "smoothing is accepted but has no effect");
    }

    let bytes = match std::fs::read(&cli.file) {
        Ok(bytes) => bytes,
        Err(err) => fail(
            &format!("failed to read {}: {err}", cli.file.display()),
            EXIT_FAILURE,
        ),
    };

    let options = ForecastOptions {
        horizon: cli.period,
        interval_width: cli.interval,
    };
    match pipeline::run_csv(&bytes, options, &SeasonalTrend::new()) {
        Ok(result) => match serde_json::to_string(&result) {
            Ok(json) => println!("{json}"),
            Err(err) => fail(&format!("failed to serialize forecast: {err}"), EXIT_FAILURE),
        },
        Err(err) => {
            let code = match err {
                Error::InsufficientHistory { .. } => EXIT_INSUFFICIENT_HISTORY,
                _ => EXIT_FAILURE,
            };
            fail(&err.to_string(), code);
        }
    }
}

/// Print a JSON error object to stdout and exit with the given code.
fn fail(message: &str, code: i32) -> ! {
    println!("{}", serde_json::json!({ "error": message }));
    std::process::exit(code);
}
