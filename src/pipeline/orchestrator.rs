//! Forecast orchestration: parameter validation, the history gate, and the
//! extraction of the future window from forecaster output.

use crate::core::DailySeries;
use crate::error::{Error, Result};
use crate::models::{ForecastRequest, ForecastRow, Forecaster, SeasonalityFlags};
use chrono::Duration;

/// Minimum distinct days of history required before forecasting.
pub const MIN_HISTORY_DAYS: usize = 3;

/// Default forecast horizon, in days.
pub const DEFAULT_HORIZON: usize = 7;

/// Default prediction-interval coverage.
pub const DEFAULT_INTERVAL_WIDTH: f64 = 0.9;

/// Forecasting parameters shared by both entry points.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ForecastOptions {
    /// Days to predict past the end of the history. Must be at least 1.
    pub horizon: usize,
    /// Requested interval coverage. Must lie strictly between 0 and 1.
    pub interval_width: f64,
}

impl Default for ForecastOptions {
    fn default() -> Self {
        Self {
            horizon: DEFAULT_HORIZON,
            interval_width: DEFAULT_INTERVAL_WIDTH,
        }
    }
}

impl ForecastOptions {
    /// Check both parameters. Runs before any model work.
    pub fn validate(&self) -> Result<()> {
        if self.horizon < 1 {
            return Err(Error::InvalidHorizon(self.horizon));
        }
        if !(self.interval_width > 0.0 && self.interval_width < 1.0) {
            return Err(Error::InvalidIntervalWidth(self.interval_width));
        }
        Ok(())
    }
}

/// Run one forecast over a normalized series and return the future window.
///
/// The forecaster is invoked with daily and weekly seasonality enabled and
/// yearly disabled, and its output contract is checked here: the trailing
/// `horizon` rows must sit on consecutive days starting the day after the
/// last historical day. Forecaster failures and contract violations both
/// surface as [`Error::Forecast`].
pub fn run_forecast(
    series: &DailySeries,
    options: ForecastOptions,
    forecaster: &dyn Forecaster,
) -> Result<Vec<ForecastRow>> {
    options.validate()?;

    let last_day = match series.last_day() {
        Some(day) if series.len() >= MIN_HISTORY_DAYS => day,
        _ => {
            return Err(Error::InsufficientHistory {
                needed: MIN_HISTORY_DAYS,
                got: series.len(),
            });
        }
    };

    tracing::debug!(
        model = forecaster.name(),
        days = series.len(),
        horizon = options.horizon,
        interval_width = options.interval_width,
        "running forecast"
    );

    let request = ForecastRequest {
        series,
        horizon: options.horizon,
        interval_width: options.interval_width,
        seasonality: SeasonalityFlags::default(),
    };
    let rows = forecaster
        .fit_and_predict(&request)
        .map_err(|err| match err {
            Error::Forecast(_) => err,
            other => Error::Forecast(other.to_string()),
        })?;

    if rows.len() < options.horizon {
        return Err(Error::Forecast(format!(
            "forecaster returned {} rows for a horizon of {}",
            rows.len(),
            options.horizon
        )));
    }
    let future = &rows[rows.len() - options.horizon..];
    for (step, row) in future.iter().enumerate() {
        let Some(expected) = last_day.checked_add_signed(Duration::days(step as i64 + 1)) else {
            return Err(Error::Forecast(
                "prediction dates exceed the supported calendar range".to_string(),
            ));
        };
        if row.date != expected {
            return Err(Error::Forecast(format!(
                "prediction dates are not contiguous: expected {expected}, got {}",
                row.date
            )));
        }
    }
    Ok(future.to_vec())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use std::sync::atomic::{AtomicUsize, Ordering};

    fn day(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 1, d).unwrap()
    }

    fn three_day_series() -> DailySeries {
        DailySeries::from_observations(vec![(day(1), 1.0), (day(2), 2.0), (day(3), 3.0)])
            .unwrap()
    }

    fn flat_row(date: NaiveDate, value: f64) -> ForecastRow {
        ForecastRow {
            date,
            yhat: value,
            yhat_lower: value,
            yhat_upper: value,
        }
    }

    /// Returns a fixed script of rows and counts invocations.
    struct Scripted {
        rows: Vec<ForecastRow>,
        calls: AtomicUsize,
    }

    impl Scripted {
        fn new(rows: Vec<ForecastRow>) -> Self {
            Self {
                rows,
                calls: AtomicUsize::new(0),
            }
        }

        fn call_count(&self) -> usize {
            self.calls.load(Ordering::SeqCst)
        }
    }

    impl Forecaster for Scripted {
        fn fit_and_predict(&self, _request: &ForecastRequest<'_>) -> Result<Vec<ForecastRow>> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            Ok(self.rows.clone())
        }

        fn name(&self) -> &str {
            "Scripted"
        }
    }

    struct Failing;

    impl Forecaster for Failing {
        fn fit_and_predict(&self, _request: &ForecastRequest<'_>) -> Result<Vec<ForecastRow>> {
            Err(Error::Forecast("model exploded".to_string()))
        }

        fn name(&self) -> &str {
            "Failing"
        }
    }

    #[test]
    fn zero_horizon_is_rejected_before_the_model_runs() {
        let stub = Scripted::new(vec![]);
        let options = ForecastOptions {
            horizon: 0,
            ..Default::default()
        };
        let err = run_forecast(&three_day_series(), options, &stub).unwrap_err();
        assert_eq!(err, Error::InvalidHorizon(0));
        assert_eq!(stub.call_count(), 0);
    }

    #[test]
    fn out_of_range_interval_widths_are_rejected() {
        for width in [0.0, 1.0, -0.5, 1.5] {
            let options = ForecastOptions {
                horizon: 7,
                interval_width: width,
            };
            let err = run_forecast(&three_day_series(), options, &Scripted::new(vec![]))
                .unwrap_err();
            assert_eq!(err, Error::InvalidIntervalWidth(width));
        }
    }

    #[test]
    fn nan_interval_width_is_rejected() {
        let options = ForecastOptions {
            horizon: 7,
            interval_width: f64::NAN,
        };
        let err = run_forecast(&three_day_series(), options, &Scripted::new(vec![]))
            .unwrap_err();
        assert!(matches!(err, Error::InvalidIntervalWidth(_)));
    }

    #[test]
    fn short_history_is_gated_before_the_model_runs() {
        let series =
            DailySeries::from_observations(vec![(day(1), 1.0), (day(2), 2.0)]).unwrap();
        let stub = Scripted::new(vec![]);
        let err = run_forecast(&series, ForecastOptions::default(), &stub).unwrap_err();
        assert_eq!(err, Error::InsufficientHistory { needed: 3, got: 2 });
        assert_eq!(stub.call_count(), 0);
    }

    #[test]
    fn exactly_three_days_pass_the_gate() {
        let rows = vec![
            flat_row(day(1), 1.0),
            flat_row(day(2), 2.0),
            flat_row(day(3), 3.0),
            flat_row(day(4), 4.0),
        ];
        let stub = Scripted::new(rows);
        let options = ForecastOptions {
            horizon: 1,
            ..Default::default()
        };
        let future = run_forecast(&three_day_series(), options, &stub).unwrap();
        assert_eq!(future.len(), 1);
        assert_eq!(future[0].date, day(4));
        assert_eq!(stub.call_count(), 1);
    }

    #[test]
    fn only_the_trailing_window_is_returned() {
        // In-sample rows plus two future days; the in-sample rows must not
        // leak into the prediction window.
        let rows = vec![
            flat_row(day(1), 10.0),
            flat_row(day(2), 20.0),
            flat_row(day(3), 30.0),
            flat_row(day(4), 40.0),
            flat_row(day(5), 50.0),
        ];
        let options = ForecastOptions {
            horizon: 2,
            ..Default::default()
        };
        let future =
            run_forecast(&three_day_series(), options, &Scripted::new(rows)).unwrap();
        assert_eq!(future.len(), 2);
        assert_eq!(future[0], flat_row(day(4), 40.0));
        assert_eq!(future[1], flat_row(day(5), 50.0));
    }

    #[test]
    fn too_few_rows_violate_the_contract() {
        let rows = vec![flat_row(day(4), 4.0)];
        let options = ForecastOptions {
            horizon: 2,
            ..Default::default()
        };
        let err =
            run_forecast(&three_day_series(), options, &Scripted::new(rows)).unwrap_err();
        assert!(matches!(err, Error::Forecast(_)));
    }

    #[test]
    fn gapped_prediction_dates_violate_the_contract() {
        let rows = vec![flat_row(day(4), 4.0), flat_row(day(6), 6.0)];
        let options = ForecastOptions {
            horizon: 2,
            ..Default::default()
        };
        let err =
            run_forecast(&three_day_series(), options, &Scripted::new(rows)).unwrap_err();
        assert!(matches!(err, Error::Forecast(_)));
    }

    #[test]
    fn predictions_not_anchored_after_history_violate_the_contract() {
        // Starts on the last historical day instead of the day after.
        let rows = vec![flat_row(day(3), 3.0), flat_row(day(4), 4.0)];
        let options = ForecastOptions {
            horizon: 2,
            ..Default::default()
        };
        let err =
            run_forecast(&three_day_series(), options, &Scripted::new(rows)).unwrap_err();
        assert!(matches!(err, Error::Forecast(_)));
    }

    #[test]
    fn windows_past_the_calendar_edge_violate_the_contract() {
        let last = NaiveDate::MAX;
        let series = DailySeries::from_observations(vec![
            (last - Duration::days(2), 1.0),
            (last - Duration::days(1), 2.0),
            (last, 3.0),
        ])
        .unwrap();
        let options = ForecastOptions {
            horizon: 1,
            ..Default::default()
        };
        let err = run_forecast(&series, options, &Scripted::new(vec![flat_row(last, 3.0)]))
            .unwrap_err();
        assert!(matches!(err, Error::Forecast(_)));
    }

    #[test]
    fn forecaster_failures_surface_as_forecast_errors() {
        let err =
            run_forecast(&three_day_series(), ForecastOptions::default(), &Failing)
                .unwrap_err();
        assert_eq!(err, Error::Forecast("model exploded".to_string()));
    }
}
