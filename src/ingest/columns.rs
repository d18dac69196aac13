//! Column selection for messy CSV exports.
//!
//! Detection is a pure function over the header row and, for the numeric
//! fallback, the data rows. Candidate lists are checked in priority order:
//! the first listed candidate that matches any header wins, regardless of
//! column position.

use crate::error::{Error, Result};
use csv::StringRecord;

/// Header names recognized as the date column, in priority order.
const DATE_CANDIDATES: [&str; 3] = ["date", "ds", "day"];

/// Header names recognized as the value column, in priority order.
const VALUE_CANDIDATES: [&str; 6] = ["y", "value", "quantity", "qty", "sold", "sales"];

/// Pick the date column: the first candidate match, else the first column.
pub(crate) fn date_column(headers: &[String]) -> usize {
    labeled_column(headers, &DATE_CANDIDATES).unwrap_or(0)
}

/// Pick the value column: the first candidate match, else the first
/// uniformly numeric column other than the date column.
///
/// Fails with [`Error::NoValueColumn`] when neither rule produces a column.
pub(crate) fn value_column(
    headers: &[String],
    date_idx: usize,
    records: &[StringRecord],
) -> Result<usize> {
    labeled_column(headers, &VALUE_CANDIDATES)
        .or_else(|| first_numeric_column(headers.len(), date_idx, records))
        .ok_or(Error::NoValueColumn)
}

/// Parse a cell as a finite float. Spellings that parse to infinities or
/// NaN are rejected along with everything non-numeric.
pub(crate) fn parse_value(cell: &str) -> Option<f64> {
    let value: f64 = cell.trim().parse().ok()?;
    value.is_finite().then_some(value)
}

/// Header comparison form: trimmed, BOM stripped, ASCII lowercased.
fn canonical(name: &str) -> String {
    name.trim_start_matches('\u{feff}').trim().to_ascii_lowercase()
}

fn labeled_column(headers: &[String], candidates: &[&str]) -> Option<usize> {
    let canon: Vec<String> = headers.iter().map(|name| canonical(name)).collect();
    candidates
        .iter()
        .find_map(|candidate| canon.iter().position(|name| name == candidate))
}

fn first_numeric_column(width: usize, date_idx: usize, records: &[StringRecord]) -> Option<usize> {
    (0..width)
        .filter(|&idx| idx != date_idx)
        .find(|&idx| is_numeric_column(idx, records))
}

/// A column is numeric when every present, non-empty cell parses as a
/// finite float and at least one such cell exists. Empty and missing cells
/// do not disqualify a column; the corresponding rows are dropped later.
fn is_numeric_column(idx: usize, records: &[StringRecord]) -> bool {
    let mut saw_number = false;
    for record in records {
        match record.get(idx).map(str::trim) {
            None | Some("") => continue,
            Some(cell) => match parse_value(cell) {
                Some(_) => saw_number = true,
                None => return false,
            },
        }
    }
    saw_number
}
