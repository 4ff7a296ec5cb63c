use crate::series::{Series, is_flat, mean};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Least-squares line fitted over elapsed days.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TrendLine {
    /// Change in value per day.
    pub slope: f64,
    /// Fitted value at the first date.
    pub intercept: f64,
    /// Fitted value at every input date.
    pub predictions: Vec<f64>,
    pub r_squared: f64,
}

/// Result of an ordinary least-squares fit of `y` on `x`.
pub(crate) struct Fit {
    pub slope: f64,
    pub intercept: f64,
    pub predictions: Vec<f64>,
    pub r_squared: f64,
}

/// Fit `y = intercept + slope * x` by ordinary least squares.
///
/// Needs at least two points. When every `x` is equal the slope is zero and
/// the line passes through the mean of `y`. A flat `y` is fitted exactly by a
/// flat line, with `r_squared` of one.
pub(crate) fn fit(x: &[f64], y: &[f64]) -> Option<Fit> {
    if x.len() != y.len() || x.len() < 2 {
        return None;
    }

    // The computed mean of a flat series can differ from its values by an ulp.
    if is_flat(y) {
        return Some(Fit {
            slope: 0.0,
            intercept: y[0],
            predictions: vec![y[0]; y.len()],
            r_squared: 1.0,
        });
    }

    let x_mean = mean(x);
    let y_mean = mean(y);

    let (xy_sum, xx_sum) = x
        .iter()
        .zip(y)
        .fold((0.0, 0.0), |(xy_sum, xx_sum), (&x_val, &y_val)| {
            let x_diff = x_val - x_mean;
            (xy_sum + x_diff * (y_val - y_mean), xx_sum + x_diff * x_diff)
        });

    let slope = if xx_sum == 0.0 { 0.0 } else { xy_sum / xx_sum };
    let intercept = y_mean - slope * x_mean;
    let predictions: Vec<f64> = x.iter().map(|&x_val| intercept + slope * x_val).collect();

    let ss_res: f64 = y
        .iter()
        .zip(&predictions)
        .map(|(&y_val, &pred)| (y_val - pred).powi(2))
        .sum();
    let ss_tot: f64 = y.iter().map(|&y_val| (y_val - y_mean).powi(2)).sum();

    let r_squared = if ss_tot == 0.0 {
        0.0
    } else {
        1.0 - ss_res / ss_tot
    };

    Some(Fit {
        slope,
        intercept,
        predictions,
        r_squared,
    })
}

/// Fit a trend line to `vals` using elapsed whole days since the first date
/// as the independent variable.
///
/// Fewer than two points (or mismatched input) give an all-zero line with no
/// predictions.
pub fn compute_trend_line(vals: &[f64], dates: &[NaiveDate]) -> TrendLine {
    let series = Series::new(vals, dates);
    let Series::Dated { values, .. } = series else {
        return TrendLine::default();
    };

    match fit(&series.elapsed_days(), values) {
        Some(fit) => TrendLine {
            slope: fit.slope,
            intercept: fit.intercept,
            predictions: fit.predictions,
            r_squared: fit.r_squared,
        },
        None => TrendLine::default(),
    }
}
