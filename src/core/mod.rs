//! Core data structures for daily forecasting.

mod series;

pub use series::DailySeries;
