use crate::regression::fit;
use crate::series::{Series, days_between};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Absolute percentage change below which a series counts as stable.
pub const STABLE_THRESHOLD_PCT: f64 = 1.0;

/// Net movement of a series between its first and last measurement.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    Increasing,
    Decreasing,
    #[default]
    Stable,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TrendMetrics {
    pub direction: Direction,
    /// Change from the first to the last value, in percent of the first value.
    pub percentage_change: f64,
    /// Change from the first to the last value per elapsed day.
    pub velocity: f64,
    /// Goodness of fit of the regression line over the same series.
    pub r_squared: f64,
}

/// Compute trend metrics with the default [`STABLE_THRESHOLD_PCT`].
pub fn compute_trend_metrics(vals: &[f64], dates: &[NaiveDate]) -> TrendMetrics {
    compute_trend_metrics_with(vals, dates, STABLE_THRESHOLD_PCT)
}

/// Compute trend metrics, classifying the series as stable when the absolute
/// percentage change is strictly below `stable_threshold_pct`.
///
/// Direction and velocity depend only on the endpoints of the series, while
/// `r_squared` comes from a least-squares fit over every point.
pub fn compute_trend_metrics_with(
    vals: &[f64],
    dates: &[NaiveDate],
    stable_threshold_pct: f64,
) -> TrendMetrics {
    let series = Series::new(vals, dates);
    let Series::Dated { values, dates } = series else {
        return TrendMetrics::default();
    };
    if values.len() < 2 {
        return TrendMetrics::default();
    }

    let first = values[0];
    let last = values[values.len() - 1];
    let change = last - first;

    let percentage_change = if first == 0.0 {
        0.0
    } else {
        change / first * 100.0
    };

    let elapsed_days = days_between(dates[0], dates[dates.len() - 1]).max(1.0);
    let velocity = change / elapsed_days;

    let r_squared = fit(&series.elapsed_days(), values).map_or(0.0, |fit| fit.r_squared);

    TrendMetrics {
        direction: classify_direction(percentage_change, stable_threshold_pct),
        percentage_change,
        velocity,
        r_squared,
    }
}

fn classify_direction(percentage_change: f64, stable_threshold_pct: f64) -> Direction {
    if percentage_change > 0.0 && percentage_change >= stable_threshold_pct {
        Direction::Increasing
    } else if percentage_change < 0.0 && percentage_change <= -stable_threshold_pct {
        Direction::Decreasing
    } else {
        Direction::Stable
    }
}
