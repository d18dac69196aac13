//! Calendar-day parsing for CSV cells.

use chrono::{DateTime, NaiveDate, NaiveDateTime};

/// Plain date spellings, tried first. Slashed forms follow the US
/// month-first convention.
const DATE_FORMATS: [&str; 3] = ["%Y-%m-%d", "%Y/%m/%d", "%m/%d/%Y"];

/// Timestamp spellings; any time-of-day component is discarded.
const DATETIME_FORMATS: [&str; 4] = [
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M",
];

/// Parse a cell as a calendar day.
///
/// Formats are tried in a fixed order: plain dates, naive timestamps, then
/// RFC 3339 timestamps with a zone offset. Timestamps truncate to the day
/// as written, without zone conversion. Returns `None` for anything else,
/// leaving the drop-or-keep decision to the caller.
pub(crate) fn parse_day(cell: &str) -> Option<NaiveDate> {
    let cell = cell.trim();
    if cell.is_empty() {
        return None;
    }
    for fmt in DATE_FORMATS {
        if let Ok(day) = NaiveDate::parse_from_str(cell, fmt) {
            return Some(day);
        }
    }
    for fmt in DATETIME_FORMATS {
        if let Ok(stamp) = NaiveDateTime::parse_from_str(cell, fmt) {
            return Some(stamp.date());
        }
    }
    if let Ok(stamp) = DateTime::parse_from_rfc3339(cell) {
        return Some(stamp.date_naive());
    }
    None
}
