use crate::series::{all_finite, is_flat, mean};

/// Pearson correlation coefficient of two equally long series.
///
/// Returns `0` when the lengths differ, when either series has fewer than two
/// values, holds a NaN or infinite value, or is constant.
pub fn compute_correlation(x: &[f64], y: &[f64]) -> f64 {
    if x.len() != y.len() || x.len() < 2 || !all_finite(x) || !all_finite(y) {
        return 0.0;
    }
    if is_flat(x) || is_flat(y) {
        return 0.0;
    }

    let x_mean = mean(x);
    let y_mean = mean(y);

    let mut cov_sum = 0.0;
    let mut x_var_sum = 0.0;
    let mut y_var_sum = 0.0;
    for (&x_val, &y_val) in x.iter().zip(y) {
        let x_diff = x_val - x_mean;
        let y_diff = y_val - y_mean;
        cov_sum += x_diff * y_diff;
        x_var_sum += x_diff * x_diff;
        y_var_sum += y_diff * y_diff;
    }

    // The 1/n factors of covariance and both deviations cancel out.
    let denom = (x_var_sum * y_var_sum).sqrt();
    if denom == 0.0 {
        return 0.0;
    }
    (cov_sum / denom).clamp(-1.0, 1.0)
}
