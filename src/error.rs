//! Error types for the dailycast crate.

use thiserror::Error;

/// All errors the pipeline can produce.
///
/// `Clone + PartialEq` keeps errors cheap to pass across thread and process
/// boundaries, so fallible external causes (the CSV reader, a model) are
/// captured as strings at the point they occur.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum Error {
    /// No column usable as the value series. The message text is part of the
    /// output contract and is matched by downstream consumers.
    #[error("No numeric column found for values")]
    NoValueColumn,

    /// Every row was dropped during normalization, or the input had no rows.
    #[error("no usable rows remain after parsing")]
    NoUsableRows,

    /// The CSV reader itself failed.
    #[error("{0}")]
    Csv(String),

    /// Fewer distinct days than forecasting requires.
    #[error("need at least {needed} days of historical data, got {got}")]
    InsufficientHistory { needed: usize, got: usize },

    /// The requested horizon is not a positive number of days.
    #[error("invalid horizon: {0} (must be at least 1 day)")]
    InvalidHorizon(usize),

    /// The requested interval coverage is outside the open unit interval.
    #[error("invalid interval width: {0} (must be strictly between 0 and 1)")]
    InvalidIntervalWidth(f64),

    /// The forecaster failed, or its output broke the pipeline contract.
    #[error("forecast failed: {0}")]
    Forecast(String),
}

impl From<csv::Error> for Error {
    fn from(err: csv::Error) -> Self {
        Error::Csv(err.to_string())
    }
}

/// Result type alias for forecast operations.
pub type Result<T> = std::result::Result<T, Error>;
