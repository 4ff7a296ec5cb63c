use crate::series::{DatedValue, Series, mean};
use chrono::NaiveDate;
use std::collections::BTreeMap;

/// Windows used when the caller does not request any.
pub const DEFAULT_WINDOWS: [usize; 3] = [7, 30, 90];

/// Moving averages keyed by `"ma<window>"`.
pub type MovingAverages = BTreeMap<String, Vec<DatedValue>>;

/// Key under which the averages of `window` are stored.
pub fn window_key(window: usize) -> String {
    format!("ma{window}")
}

/// Compute the trailing moving average of `vals` for every window in
/// `windows`.
///
/// Each point is dated at the last measurement of its window. Windows longer
/// than the series produce an empty entry. Empty, mismatched or non-finite
/// input produces no entries at all.
pub fn compute_moving_averages(
    vals: &[f64],
    dates: &[NaiveDate],
    windows: &[usize],
) -> MovingAverages {
    let mut averages = MovingAverages::new();
    let Series::Dated { values, dates } = Series::new(vals, dates) else {
        return averages;
    };

    for &window in windows {
        averages.insert(window_key(window), compute_window(values, dates, window));
    }
    averages
}

/// Compute moving averages over [`DEFAULT_WINDOWS`].
pub fn compute_default_moving_averages(
    vals: &[f64],
    dates: &[NaiveDate],
) -> MovingAverages {
    compute_moving_averages(vals, dates, &DEFAULT_WINDOWS)
}

fn compute_window(vals: &[f64], dates: &[NaiveDate], window: usize) -> Vec<DatedValue> {
    if window == 0 || vals.len() < window {
        return Vec::new();
    }

    vals.windows(window)
        .zip(&dates[window - 1..])
        .map(|(window_vals, &date)| DatedValue {
            date,
            value: mean(window_vals),
        })
        .collect()
}
