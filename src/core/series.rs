//! The canonical daily series produced by normalization.

use crate::error::{Error, Result};
use chrono::NaiveDate;
use std::collections::BTreeMap;

/// A daily time series: one value per calendar day, strictly ascending.
///
/// Construction goes through [`DailySeries::from_observations`], which sums
/// same-day rows and sorts by day, so the ordering and uniqueness invariants
/// hold for every value of this type.
#[derive(Debug, Clone, PartialEq)]
pub struct DailySeries {
    days: Vec<NaiveDate>,
    values: Vec<f64>,
}

impl DailySeries {
    /// Aggregate raw `(day, value)` observations into a daily series.
    ///
    /// Rows that share a calendar day are summed, and the result is ordered
    /// ascending by day. Non-finite values are dropped with their rows, as
    /// is any day whose summed total overflows. Fails with
    /// [`Error::NoUsableRows`] when nothing usable remains.
    ///
    /// # Example
    /// ```
    /// use chrono::NaiveDate;
    /// use dailycast::core::DailySeries;
    ///
    /// let day = |d| NaiveDate::from_ymd_opt(2024, 1, d).unwrap();
    /// let series = DailySeries::from_observations(vec![
    ///     (day(2), 4.0),
    ///     (day(1), 5.0),
    ///     (day(1), 3.0),
    /// ])
    /// .unwrap();
    /// assert_eq!(series.days(), &[day(1), day(2)]);
    /// assert_eq!(series.values(), &[8.0, 4.0]);
    /// ```
    pub fn from_observations<I>(observations: I) -> Result<Self>
    where
        I: IntoIterator<Item = (NaiveDate, f64)>,
    {
        let mut totals: BTreeMap<NaiveDate, f64> = BTreeMap::new();
        for (day, value) in observations {
            if !value.is_finite() {
                continue;
            }
            *totals.entry(day).or_insert(0.0) += value;
        }
        totals.retain(|_, total| total.is_finite());
        if totals.is_empty() {
            return Err(Error::NoUsableRows);
        }
        let (days, values) = totals.into_iter().unzip();
        Ok(Self { days, values })
    }

    /// Number of distinct days.
    pub fn len(&self) -> usize {
        self.days.len()
    }

    /// True when the series holds no entries.
    pub fn is_empty(&self) -> bool {
        self.days.is_empty()
    }

    /// Days, ascending.
    pub fn days(&self) -> &[NaiveDate] {
        &self.days
    }

    /// Values aligned with [`DailySeries::days`].
    pub fn values(&self) -> &[f64] {
        &self.values
    }

    /// The most recent day in the series.
    pub fn last_day(&self) -> Option<NaiveDate> {
        self.days.last().copied()
    }

    /// Iterate `(day, value)` pairs in chronological order.
    pub fn iter(&self) -> impl Iterator<Item = (NaiveDate, f64)> + '_ {
        self.days.iter().copied().zip(self.values.iter().copied())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn day(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 1, d).unwrap()
    }

    #[test]
    fn same_day_observations_are_summed() {
        let series = DailySeries::from_observations(vec![
            (day(1), 5.0),
            (day(1), 3.0),
            (day(2), 4.0),
        ])
        .unwrap();
        assert_eq!(series.len(), 2);
        assert_relative_eq!(series.values()[0], 8.0);
        assert_relative_eq!(series.values()[1], 4.0);
    }

    #[test]
    fn observations_are_sorted_by_day() {
        let series = DailySeries::from_observations(vec![
            (day(9), 1.0),
            (day(3), 2.0),
            (day(6), 3.0),
        ])
        .unwrap();
        assert_eq!(series.days(), &[day(3), day(6), day(9)]);
        assert_eq!(series.values(), &[2.0, 3.0, 1.0]);
    }

    #[test]
    fn empty_input_is_rejected() {
        let result = DailySeries::from_observations(Vec::new());
        assert_eq!(result.unwrap_err(), Error::NoUsableRows);
    }

    #[test]
    fn non_finite_observations_are_dropped() {
        let series = DailySeries::from_observations(vec![
            (day(1), f64::NAN),
            (day(2), 2.0),
            (day(3), f64::INFINITY),
        ])
        .unwrap();
        assert_eq!(series.days(), &[day(2)]);
        assert_eq!(
            DailySeries::from_observations(vec![(day(1), f64::NAN)]).unwrap_err(),
            Error::NoUsableRows
        );
    }

    #[test]
    fn overflowing_day_totals_are_dropped() {
        let series = DailySeries::from_observations(vec![
            (day(1), f64::MAX),
            (day(1), f64::MAX),
            (day(2), 2.0),
        ])
        .unwrap();
        assert_eq!(series.days(), &[day(2)]);
        assert_eq!(series.values(), &[2.0]);
        assert_eq!(
            DailySeries::from_observations(vec![(day(1), f64::MAX), (day(1), f64::MAX)])
                .unwrap_err(),
            Error::NoUsableRows
        );
    }

    #[test]
    fn last_day_is_the_maximum() {
        let series =
            DailySeries::from_observations(vec![(day(4), 1.0), (day(12), 2.0)]).unwrap();
        assert_eq!(series.last_day(), Some(day(12)));
    }

    #[test]
    fn iter_yields_aligned_pairs() {
        let series =
            DailySeries::from_observations(vec![(day(1), 1.5), (day(2), 2.5)]).unwrap();
        let pairs: Vec<_> = series.iter().collect();
        assert_eq!(pairs, vec![(day(1), 1.5), (day(2), 2.5)]);
    }
}
