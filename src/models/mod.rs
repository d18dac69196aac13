//! Forecasting models.

mod seasonal_trend;
mod traits;

pub use seasonal_trend::SeasonalTrend;
pub use traits::{ForecastRequest, ForecastRow, Forecaster, SeasonalityFlags, SharedForecaster};
