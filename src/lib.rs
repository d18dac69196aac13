//! # dailycast
//!
//! Turns messy CSV time-series exports into a canonical daily series and
//! produces point-and-interval forecasts over a requested horizon.
//!
//! The crate is organized as a pipeline with a swappable model:
//!
//! - [`ingest`]: column detection, date parsing, and per-day aggregation
//! - [`models`]: the [`models::Forecaster`] capability and the default
//!   seasonal-trend implementation
//! - [`pipeline`]: validation, orchestration, and the serialized response
//! - [`server`]: the HTTP surface over the same pipeline
//!
//! # Example
//!
//! ```
//! use dailycast::models::SeasonalTrend;
//! use dailycast::pipeline::{ForecastOptions, run_csv};
//!
//! let csv = "date,sales\n\
//!            2024-01-01,12\n\
//!            2024-01-02,15\n\
//!            2024-01-03,14\n\
//!            2024-01-04,18\n";
//! let result = run_csv(csv.as_bytes(), ForecastOptions::default(), &SeasonalTrend::new())?;
//! assert_eq!(result.historical.len(), 4);
//! assert_eq!(result.predictions.len(), 7);
//! # Ok::<(), dailycast::Error>(())
//! ```

pub mod core;
pub mod error;
pub mod ingest;
pub mod models;
pub mod pipeline;
pub mod server;
pub mod stats;

pub use error::{Error, Result};

/// Common imports for working with the crate.
pub mod prelude {
    pub use crate::core::DailySeries;
    pub use crate::error::{Error, Result};
    pub use crate::models::{
        ForecastRequest, ForecastRow, Forecaster, SeasonalTrend, SeasonalityFlags,
    };
    pub use crate::pipeline::{ForecastOptions, ForecastResult, run_csv, run_forecast};
}
