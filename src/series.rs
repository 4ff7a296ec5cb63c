//! Dated measurement series.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Single measurement value observed on a calendar date.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DatedValue {
    pub date: NaiveDate,
    pub value: f64,
}

/// Values paired with their measurement dates.
///
/// Built with [`Series::new`], which collapses empty and mismatched inputs into
/// [`Series::Empty`] so that every calculator handles the neutral case with
/// one exhaustive match.
#[derive(Debug, Clone, Copy)]
pub enum Series<'a> {
    Empty,
    Dated {
        values: &'a [f64],
        dates: &'a [NaiveDate],
    },
}

impl<'a> Series<'a> {
    /// Pair `values` with `dates`.
    ///
    /// Dates must be sorted ascending. Input holding a NaN or infinite value
    /// is treated like an empty series.
    pub fn new(values: &'a [f64], dates: &'a [NaiveDate]) -> Self {
        if values.is_empty() || values.len() != dates.len() || !all_finite(values) {
            return Series::Empty;
        }
        Series::Dated { values, dates }
    }

    pub fn len(&self) -> usize {
        match self {
            Series::Empty => 0,
            Series::Dated { values, .. } => values.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        matches!(self, Series::Empty)
    }

    /// Elapsed whole days of every date since the first one.
    pub fn elapsed_days(&self) -> Vec<f64> {
        match self {
            Series::Empty => Vec::new(),
            Series::Dated { dates, .. } => {
                let first = dates[0];
                dates.iter().map(|&date| days_between(first, date)).collect()
            }
        }
    }
}

/// Signed number of whole days from `start` to `end`.
pub fn days_between(start: NaiveDate, end: NaiveDate) -> f64 {
    (end - start).num_days() as f64
}

pub(crate) fn all_finite(vals: &[f64]) -> bool {
    vals.iter().all(|val| val.is_finite())
}

/// Whether every value equals the first one. Empty slices are flat.
pub(crate) fn is_flat(vals: &[f64]) -> bool {
    vals.iter().all(|&val| val == vals[0])
}

/// Arithmetic mean, `0` for an empty slice.
pub(crate) fn mean(vals: &[f64]) -> f64 {
    if vals.is_empty() {
        return 0.0;
    }
    vals.iter().sum::<f64>() / vals.len() as f64
}

#[cfg(test)]
pub(crate) mod test_utils {
    use chrono::{Days, NaiveDate};

    /// `n_days` consecutive dates starting on 2024-01-01.
    pub fn daily_dates(n_days: usize) -> Vec<NaiveDate> {
        let start = NaiveDate::from_ymd_opt(2024, 1, 1).expect("valid date");
        (0..n_days)
            .map(|day| start + Days::new(day as u64))
            .collect()
    }

    pub fn assert_close(actual: f64, expected: f64, tol: f64) {
        assert!(
            (actual - expected).abs() < tol,
            "expected {expected} (tolerance: {tol}), but got {actual}"
        );
    }
}

#[cfg(test)]
mod tests {
    use super::test_utils::daily_dates;
    use super::*;

    #[test]
    fn mismatched_lengths_are_empty() {
        let dates = daily_dates(2);
        assert!(Series::new(&[1.0, 2.0, 3.0], &dates).is_empty());
        assert!(Series::new(&[], &[]).is_empty());
        assert_eq!(Series::new(&[1.0, 2.0], &dates).len(), 2);
    }

    #[test]
    fn non_finite_values_are_empty() {
        let dates = daily_dates(2);
        assert!(Series::new(&[1.0, f64::NAN], &dates).is_empty());
        assert!(Series::new(&[f64::INFINITY, 1.0], &dates).is_empty());
    }

    #[test]
    fn flatness_compares_values() {
        assert!(is_flat(&[72.3; 10]));
        assert!(is_flat(&[]));
        assert!(!is_flat(&[72.3, 72.3 + 1e-9]));
    }

    #[test]
    fn elapsed_days_respect_gaps() {
        let start = NaiveDate::from_ymd_opt(2024, 2, 27).unwrap();
        let dates = [
            start,
            NaiveDate::from_ymd_opt(2024, 3, 1).unwrap(),
            NaiveDate::from_ymd_opt(2024, 3, 11).unwrap(),
        ];
        let series = Series::new(&[1.0, 2.0, 3.0], &dates);
        assert_eq!(series.elapsed_days(), vec![0.0, 3.0, 13.0]);
    }
}
