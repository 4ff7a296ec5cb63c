use crate::series::{all_finite, is_flat, mean};
use serde::{Deserialize, Serialize};

/// Absolute z-score above which a value is flagged as an outlier.
pub const OUTLIER_Z_SCORE: f64 = 2.0;

/// Value lying unusually far from the mean of its series.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Outlier {
    pub value: f64,
    /// Position in the original, unsorted values.
    pub index: usize,
    pub z_score: f64,
}

/// Summary statistics of one series.
///
/// Variance and standard deviation use the population form and the quartiles
/// are Tukey hinges (median excluded from both halves for odd lengths).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Statistics {
    pub mean: f64,
    pub median: f64,
    pub std_dev: f64,
    pub variance: f64,
    pub q1: f64,
    pub q3: f64,
    pub iqr: f64,
    pub outliers: Vec<Outlier>,
}

/// Compute summary statistics, flagging outliers beyond [`OUTLIER_Z_SCORE`].
pub fn compute_statistics(vals: &[f64]) -> Statistics {
    compute_statistics_with(vals, OUTLIER_Z_SCORE)
}

/// Compute summary statistics, flagging values whose absolute z-score is
/// strictly above `outlier_z_score`.
///
/// Empty input, or input holding a NaN or infinite value, gives all-zero
/// statistics.
pub fn compute_statistics_with(vals: &[f64], outlier_z_score: f64) -> Statistics {
    if vals.is_empty() || !all_finite(vals) {
        return Statistics::default();
    }

    let (mean, variance) = if is_flat(vals) {
        (vals[0], 0.0)
    } else {
        let mean = mean(vals);
        (mean, compute_pop_var(vals, mean))
    };
    let std_dev = variance.sqrt();

    let mut sorted_vals = vals.to_vec();
    sorted_vals.sort_by(f64::total_cmp);

    let n_vals = sorted_vals.len();
    let half = n_vals / 2;
    let median = compute_median(&sorted_vals);
    let (q1, q3) = if n_vals == 1 {
        (median, median)
    } else {
        (
            compute_median(&sorted_vals[..half]),
            compute_median(&sorted_vals[n_vals - half..]),
        )
    };

    let outliers = vals
        .iter()
        .enumerate()
        .filter_map(|(index, &value)| {
            let z_score = if std_dev == 0.0 {
                0.0
            } else {
                (value - mean) / std_dev
            };
            (z_score.abs() > outlier_z_score).then_some(Outlier {
                value,
                index,
                z_score,
            })
        })
        .collect();

    Statistics {
        mean,
        median,
        std_dev,
        variance,
        q1,
        q3,
        iqr: q3 - q1,
        outliers,
    }
}

fn compute_pop_var(vals: &[f64], mean: f64) -> f64 {
    vals.iter().map(|&val| (val - mean).powi(2)).sum::<f64>() / vals.len() as f64
}

/// Median of already sorted values.
fn compute_median(sorted_vals: &[f64]) -> f64 {
    let n_vals = sorted_vals.len();
    if n_vals == 0 {
        return 0.0;
    }
    let mid = n_vals / 2;
    if n_vals % 2 == 1 {
        sorted_vals[mid]
    } else {
        (sorted_vals[mid - 1] + sorted_vals[mid]) / 2.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::series::test_utils::assert_close;

    #[test]
    fn empty_is_neutral() {
        let stats = compute_statistics(&[]);
        assert_eq!(stats, Statistics::default());
        assert!(stats.outliers.is_empty());
    }

    #[test]
    fn single_value() {
        let stats = compute_statistics(&[72.5]);
        assert_eq!(stats.mean, 72.5);
        assert_eq!(stats.median, 72.5);
        assert_eq!(stats.std_dev, 0.0);
        assert_eq!(stats.variance, 0.0);
        assert_eq!(stats.iqr, 0.0);
        assert!(stats.outliers.is_empty());
    }

    #[test]
    fn center_of_odd_series() {
        let vals = [70.0, 72.0, 74.0, 76.0, 78.0, 80.0, 82.0, 84.0, 86.0, 88.0, 90.0];
        let stats = compute_statistics(&vals);
        assert_eq!(stats.median, 80.0);
        assert_close(stats.mean, 80.0, 1e-9);
        assert_close(stats.variance, 40.0, 1e-9);
        assert_close(stats.std_dev, 40f64.sqrt(), 1e-9);
        // Hinges exclude the median for odd lengths.
        assert_eq!(stats.q1, 74.0);
        assert_eq!(stats.q3, 86.0);
        assert_eq!(stats.iqr, 12.0);
        assert!(stats.q1 < stats.median && stats.median < stats.q3);
    }

    #[test]
    fn even_series_averages_middle() {
        let stats = compute_statistics(&[4.0, 1.0, 3.0, 2.0]);
        assert_eq!(stats.median, 2.5);
        assert_eq!(stats.q1, 1.5);
        assert_eq!(stats.q3, 3.5);
    }

    #[test]
    fn flags_high_outlier() {
        let vals = [70.0, 72.0, 74.0, 76.0, 78.0, 80.0, 82.0, 200.0];
        let stats = compute_statistics(&vals);
        assert_eq!(stats.outliers.len(), 1);
        let outlier = &stats.outliers[0];
        assert_eq!(outlier.value, 200.0);
        assert_eq!(outlier.index, 7);
        assert!(outlier.z_score > 2.0);
    }

    #[test]
    fn flat_series_has_no_outliers() {
        let stats = compute_statistics(&[5.0; 6]);
        assert_eq!(stats.std_dev, 0.0);
        assert!(stats.outliers.is_empty());
    }

    #[test]
    fn flat_fractional_series_has_no_spread() {
        let stats = compute_statistics(&[72.3; 10]);
        assert_eq!(stats.mean, 72.3);
        assert_eq!(stats.variance, 0.0);
        assert_eq!(stats.std_dev, 0.0);
        assert_eq!(stats.iqr, 0.0);
        assert!(stats.outliers.is_empty());
    }

    #[test]
    fn non_finite_values_are_neutral() {
        assert_eq!(compute_statistics(&[1.0, f64::NAN]), Statistics::default());
        assert_eq!(
            compute_statistics(&[f64::NEG_INFINITY, 2.0, 3.0]),
            Statistics::default()
        );
    }

    #[test]
    fn custom_threshold() {
        let vals = [1.0, 2.0, 3.0, 4.0, 10.0];
        assert!(compute_statistics(&vals).outliers.is_empty());
        let outliers = compute_statistics_with(&vals, 1.5).outliers;
        assert_eq!(outliers.len(), 1);
        assert_eq!(outliers[0].index, 4);
    }

    #[test]
    fn input_is_not_reordered() {
        let vals = vec![3.0, 1.0, 2.0];
        let first = compute_statistics(&vals);
        assert_eq!(vals, vec![3.0, 1.0, 2.0]);
        assert_eq!(first, compute_statistics(&vals));
    }
}
