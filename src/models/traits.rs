//! The forecasting capability and its request and response types.

use crate::core::DailySeries;
use crate::error::Result;
use chrono::NaiveDate;
use std::sync::Arc;

/// Which seasonal components a forecaster should model.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SeasonalityFlags {
    /// Sub-daily structure. Vacuous at daily cadence but kept as part of
    /// the capability surface.
    pub daily: bool,
    /// Additive day-of-week effects.
    pub weekly: bool,
    /// Annual cycle.
    pub yearly: bool,
}

impl Default for SeasonalityFlags {
    /// The pipeline's fixed configuration: daily and weekly on, yearly off.
    fn default() -> Self {
        Self {
            daily: true,
            weekly: true,
            yearly: false,
        }
    }
}

/// One fit-and-predict call; borrows the history for its duration.
#[derive(Debug, Clone)]
pub struct ForecastRequest<'a> {
    /// Normalized daily history.
    pub series: &'a DailySeries,
    /// Future days to predict past the end of the history.
    pub horizon: usize,
    /// Requested interval coverage, strictly between 0 and 1.
    pub interval_width: f64,
    /// Seasonal components to model.
    pub seasonality: SeasonalityFlags,
}

/// One fitted or predicted day.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ForecastRow {
    pub date: NaiveDate,
    /// Point estimate.
    pub yhat: f64,
    /// Lower interval bound.
    pub yhat_lower: f64,
    /// Upper interval bound.
    pub yhat_upper: f64,
}

/// The model behind the pipeline.
///
/// Implementations return one row per in-sample day followed by `horizon`
/// rows on consecutive future days; the pipeline consumes only the trailing
/// future window. The trait is object-safe so deterministic stubs can stand
/// in for the real model in tests.
pub trait Forecaster {
    /// Fit to the request's history and predict through its horizon.
    fn fit_and_predict(&self, request: &ForecastRequest<'_>) -> Result<Vec<ForecastRow>>;

    /// Model name, for logs.
    fn name(&self) -> &str;
}

/// Shared, thread-safe forecaster handle used by the serving entry point.
pub type SharedForecaster = Arc<dyn Forecaster + Send + Sync>;
