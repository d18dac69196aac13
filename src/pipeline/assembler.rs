//! Assembly of the serialized forecast response.
//!
//! Field names and the date format are part of the output contract shared
//! by the batch tool and the HTTP service, so the shapes here derive both
//! `Serialize` and `Deserialize` and are covered by shape tests.

use crate::core::DailySeries;
use crate::models::ForecastRow;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// One observed day, echoed back from the normalized input.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HistoricalRow {
    pub date: NaiveDate,
    pub y: f64,
}

/// One predicted day with its interval bounds.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PredictionRow {
    pub date: NaiveDate,
    pub yhat: f64,
    pub yhat_lower: f64,
    pub yhat_upper: f64,
}

/// Model metadata echoed back to the caller.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModelParams {
    pub interval_width: f64,
}

/// The complete forecast response.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ForecastResult {
    pub historical: Vec<HistoricalRow>,
    pub predictions: Vec<PredictionRow>,
    pub model: ModelParams,
}

/// Combine the normalized history and the future window into the response
/// shape. The historical section echoes the series verbatim.
pub fn assemble(
    series: &DailySeries,
    predictions: &[ForecastRow],
    interval_width: f64,
) -> ForecastResult {
    ForecastResult {
        historical: series
            .iter()
            .map(|(date, y)| HistoricalRow { date, y })
            .collect(),
        predictions: predictions
            .iter()
            .map(|row| PredictionRow {
                date: row.date,
                yhat: row.yhat,
                yhat_lower: row.yhat_lower,
                yhat_upper: row.yhat_upper,
            })
            .collect(),
        model: ModelParams { interval_width },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn day(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 1, d).unwrap()
    }

    #[test]
    fn historical_section_echoes_the_series() {
        let series =
            DailySeries::from_observations(vec![(day(1), 8.0), (day(2), 4.0)]).unwrap();
        let result = assemble(&series, &[], 0.9);
        assert_eq!(
            result.historical,
            vec![
                HistoricalRow { date: day(1), y: 8.0 },
                HistoricalRow { date: day(2), y: 4.0 },
            ]
        );
        assert!(result.predictions.is_empty());
        assert_eq!(result.model, ModelParams { interval_width: 0.9 });
    }

    #[test]
    fn dates_serialize_as_iso_days() {
        let series = DailySeries::from_observations(vec![(day(5), 1.0)]).unwrap();
        let predictions = [ForecastRow {
            date: day(6),
            yhat: 2.0,
            yhat_lower: 1.5,
            yhat_upper: 2.5,
        }];
        let json = serde_json::to_value(assemble(&series, &predictions, 0.8)).unwrap();
        assert_eq!(json["historical"][0]["date"], "2024-01-05");
        assert_eq!(json["predictions"][0]["date"], "2024-01-06");
        assert_eq!(json["predictions"][0]["yhat"], 2.0);
        assert_eq!(json["predictions"][0]["yhat_lower"], 1.5);
        assert_eq!(json["predictions"][0]["yhat_upper"], 2.5);
        assert_eq!(json["model"]["interval_width"], 0.8);
    }
}
