//! The forecast pipeline shared by the batch tool and the HTTP service.

mod assembler;
mod orchestrator;

pub use assembler::{ForecastResult, HistoricalRow, ModelParams, PredictionRow, assemble};
pub use orchestrator::{
    DEFAULT_HORIZON, DEFAULT_INTERVAL_WIDTH, ForecastOptions, MIN_HISTORY_DAYS, run_forecast,
};

use crate::error::Result;
use crate::ingest;
use crate::models::Forecaster;

/// Run the whole pipeline on raw CSV bytes: normalize, forecast, assemble.
///
/// This is the single entry point both binaries call, so their outputs stay
/// in lockstep by construction.
pub fn run_csv(
    bytes: &[u8],
    options: ForecastOptions,
    forecaster: &dyn Forecaster,
) -> Result<ForecastResult> {
    let series = ingest::normalize_csv(bytes)?;
    let predictions = run_forecast(&series, options, forecaster)?;
    Ok(assemble(&series, &predictions, options.interval_width))
}
