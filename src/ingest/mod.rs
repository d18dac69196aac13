//! CSV normalization: arbitrary exports in, a canonical daily series out.
//!
//! The normalizer is deliberately lenient at the row level and strict at
//! the table level. Individual rows with an unparseable date or value are
//! dropped; the whole table is rejected only when no value column can be
//! found or no usable rows remain.

mod columns;
mod dates;

use crate::core::DailySeries;
use crate::error::{Error, Result};

/// Normalize raw CSV bytes into a [`DailySeries`].
///
/// Column selection: the date column is the first header matching
/// `date`/`ds`/`day` case-insensitively (in that order), else the first
/// column; the value column is the first header matching
/// `y`/`value`/`quantity`/`qty`/`sold`/`sales` (in that order), else the
/// first uniformly numeric non-date column. Timestamps truncate to days
/// and same-day rows are summed.
pub fn normalize_csv(bytes: &[u8]) -> Result<DailySeries> {
    let mut reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .flexible(true)
        .from_reader(bytes);

    let headers: Vec<String> = reader.headers()?.iter().map(str::to_string).collect();
    let mut records = Vec::new();
    for record in reader.records() {
        records.push(record?);
    }
    if records.is_empty() {
        return Err(Error::NoUsableRows);
    }

    let date_idx = columns::date_column(&headers);
    let value_idx = columns::value_column(&headers, date_idx, &records)?;
    tracing::debug!(
        date = headers.get(date_idx).map(String::as_str).unwrap_or(""),
        value = headers.get(value_idx).map(String::as_str).unwrap_or(""),
        rows = records.len(),
        "selected columns"
    );

    let mut observations = Vec::with_capacity(records.len());
    let mut dropped = 0usize;
    for record in &records {
        let day = record.get(date_idx).and_then(dates::parse_day);
        let value = record.get(value_idx).and_then(columns::parse_value);
        match (day, value) {
            (Some(day), Some(value)) => observations.push((day, value)),
            _ => dropped += 1,
        }
    }
    if dropped > 0 {
        tracing::debug!(dropped, kept = observations.len(), "dropped unparseable rows");
    }

    DailySeries::from_observations(observations)
}
