//! Additive seasonal-trend model, the default forecaster in the pipeline.
//!
//! The history is decomposed into a least-squares linear trend over the
//! calendar-day offset from the first observation, additive day-of-week
//! effects estimated from the detrended residuals, and an optional
//! first-order yearly Fourier pair. When the yearly pair is enabled, the
//! trend and seasonal blocks are refit against each other in a second
//! round. Prediction intervals are symmetric normal-quantile bands scaled
//! by the residual standard deviation, widening with the forecast step.

use crate::error::{Error, Result};
use crate::models::{ForecastRequest, ForecastRow, Forecaster};
use crate::stats::{mean, quantile_normal, std_dev};
use chrono::{Datelike, Duration, NaiveDate};

/// Period of the yearly Fourier terms, in days.
const DAYS_PER_YEAR: f64 = 365.25;

/// Relative variance growth per future step.
const STEP_VARIANCE_GROWTH: f64 = 0.1;

/// Linear trend plus weekly and optional yearly seasonality.
#[derive(Debug, Clone, Copy, Default)]
pub struct SeasonalTrend;

impl SeasonalTrend {
    pub fn new() -> Self {
        Self
    }
}

impl Forecaster for SeasonalTrend {
    fn fit_and_predict(&self, request: &ForecastRequest<'_>) -> Result<Vec<ForecastRow>> {
        let series = request.series;
        let Some(&last_day) = series.days().last() else {
            return Err(Error::Forecast("cannot fit on an empty series".to_string()));
        };

        // Sub-daily structure is invisible at daily cadence, so the daily
        // flag carries no effect here.
        let components = Components::fit(
            series.days(),
            series.values(),
            request.seasonality.weekly,
            request.seasonality.yearly,
        );
        let z = quantile_normal((1.0 + request.interval_width) / 2.0);

        let mut rows = Vec::with_capacity(series.len() + request.horizon);
        for (day, _) in series.iter() {
            let yhat = components.predict(day);
            let band = z * components.sigma;
            rows.push(ForecastRow {
                date: day,
                yhat,
                yhat_lower: yhat - band,
                yhat_upper: yhat + band,
            });
        }
        for step in 1..=request.horizon {
            let Some(date) = last_day.checked_add_signed(Duration::days(step as i64)) else {
                return Err(Error::Forecast(
                    "prediction dates exceed the supported calendar range".to_string(),
                ));
            };
            let yhat = components.predict(date);
            let band = z * components.sigma * (1.0 + STEP_VARIANCE_GROWTH * step as f64).sqrt();
            rows.push(ForecastRow {
                date,
                yhat,
                yhat_lower: yhat - band,
                yhat_upper: yhat + band,
            });
        }

        if rows.iter().any(|row| {
            !(row.yhat.is_finite() && row.yhat_lower.is_finite() && row.yhat_upper.is_finite())
        }) {
            return Err(Error::Forecast("model produced non-finite predictions".to_string()));
        }
        Ok(rows)
    }

    fn name(&self) -> &str {
        "SeasonalTrend"
    }
}

/// Fitted decomposition, anchored at the first observed day.
struct Components {
    origin: NaiveDate,
    intercept: f64,
    slope: f64,
    weekday_effects: [f64; 7],
    fourier: Option<(f64, f64)>,
    sigma: f64,
}

impl Components {
    fn fit(days: &[NaiveDate], values: &[f64], weekly: bool, yearly: bool) -> Self {
        let origin = days[0];
        let x: Vec<f64> = days
            .iter()
            .map(|day| (*day - origin).num_days() as f64)
            .collect();

        let mut intercept = 0.0;
        let mut slope = 0.0;
        let mut weekday_effects = [0.0; 7];
        let mut pair = (0.0, 0.0);

        // Alternating fit: the trend against the current seasonal
        // estimates, then each seasonal block on the detrended residuals.
        // A single pass lets an annual cycle leak into the slope, so the
        // yearly pair gets a second round.
        let rounds = if yearly { 2 } else { 1 };
        for _ in 0..rounds {
            let deseasonalized: Vec<f64> = values
                .iter()
                .zip(days)
                .map(|(y, day)| y - weekday_effects[weekday_index(*day)] - fourier_term(pair, *day))
                .collect();
            (intercept, slope) = linear_fit(&x, &deseasonalized);

            let detrended: Vec<f64> = values
                .iter()
                .zip(&x)
                .map(|(y, xi)| y - (intercept + slope * xi))
                .collect();
            if weekly {
                let weekday_part: Vec<f64> = detrended
                    .iter()
                    .zip(days)
                    .map(|(r, day)| r - fourier_term(pair, *day))
                    .collect();
                weekday_effects = weekday_means(days, &weekday_part);
            }
            if yearly {
                let annual_part: Vec<f64> = detrended
                    .iter()
                    .zip(days)
                    .map(|(r, day)| r - weekday_effects[weekday_index(*day)])
                    .collect();
                pair = fit_fourier_pair(days, &annual_part);
            }
        }

        let residuals: Vec<f64> = values
            .iter()
            .zip(days)
            .zip(&x)
            .map(|((y, day), xi)| {
                y - (intercept + slope * xi)
                    - weekday_effects[weekday_index(*day)]
                    - fourier_term(pair, *day)
            })
            .collect();
        let sigma = if residuals.len() > 1 {
            let s = std_dev(&residuals);
            if s.is_finite() { s } else { 0.0 }
        } else {
            0.0
        };

        Self {
            origin,
            intercept,
            slope,
            weekday_effects,
            fourier: yearly.then_some(pair),
            sigma,
        }
    }

    fn predict(&self, day: NaiveDate) -> f64 {
        let x = (day - self.origin).num_days() as f64;
        let mut yhat = self.intercept + self.slope * x;
        yhat += self.weekday_effects[weekday_index(day)];
        if let Some(pair) = self.fourier {
            yhat += fourier_term(pair, day);
        }
        yhat
    }
}

/// Closed-form least-squares line fit. A degenerate regressor (all x equal)
/// falls back to a flat line at the mean.
fn linear_fit(x: &[f64], y: &[f64]) -> (f64, f64) {
    let x_mean = mean(x);
    let y_mean = mean(y);
    let mut sxx = 0.0;
    let mut sxy = 0.0;
    for (xi, yi) in x.iter().zip(y) {
        let dx = xi - x_mean;
        sxx += dx * dx;
        sxy += dx * (yi - y_mean);
    }
    if sxx < f64::EPSILON {
        return (y_mean, 0.0);
    }
    let slope = sxy / sxx;
    (y_mean - slope * x_mean, slope)
}

fn weekday_index(day: NaiveDate) -> usize {
    day.weekday().num_days_from_monday() as usize
}

/// Mean residual per weekday. Weekdays absent from the history keep a zero
/// effect.
fn weekday_means(days: &[NaiveDate], residuals: &[f64]) -> [f64; 7] {
    let mut sums = [0.0; 7];
    let mut counts = [0usize; 7];
    for (day, residual) in days.iter().zip(residuals) {
        let idx = weekday_index(*day);
        sums[idx] += residual;
        counts[idx] += 1;
    }
    let mut effects = [0.0; 7];
    for idx in 0..7 {
        if counts[idx] > 0 {
            effects[idx] = sums[idx] / counts[idx] as f64;
        }
    }
    effects
}

fn fourier_angle(day: NaiveDate) -> f64 {
    2.0 * std::f64::consts::PI * day.ordinal() as f64 / DAYS_PER_YEAR
}

fn fourier_term((a, b): (f64, f64), day: NaiveDate) -> f64 {
    let angle = fourier_angle(day);
    a * angle.sin() + b * angle.cos()
}

/// Fit one sine/cosine pair to the residuals by solving the 2x2 normal
/// equations with Cramer's rule. A near-singular system yields a zero pair.
fn fit_fourier_pair(days: &[NaiveDate], residuals: &[f64]) -> (f64, f64) {
    let mut ss = 0.0;
    let mut sc = 0.0;
    let mut cc = 0.0;
    let mut sr = 0.0;
    let mut cr = 0.0;
    for (day, residual) in days.iter().zip(residuals) {
        let (s, c) = fourier_angle(*day).sin_cos();
        ss += s * s;
        sc += s * c;
        cc += c * c;
        sr += s * residual;
        cr += c * residual;
    }
    let det = ss * cc - sc * sc;
    if det.abs() < 1e-10 {
        return (0.0, 0.0);
    }
    ((sr * cc - cr * sc) / det, (ss * cr - sc * sr) / det)
}
