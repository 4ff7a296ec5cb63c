//! Trend analysis of dated patient measurements.
//!
//! The calculators are pure functions over a series of values and their
//! measurement dates. Empty, single-point and mismatched inputs never fail:
//! they produce a neutral result instead.
//!
//! The [`manager`] module drives them from measure files on disk.

pub mod analysis;
pub mod config;
pub mod correlation;
pub mod manager;
pub mod measure;
pub mod moving_average;
pub mod normalize;
pub mod regression;
pub mod series;
pub mod stats;
pub mod trend;

pub use correlation::compute_correlation;
pub use moving_average::{
    DEFAULT_WINDOWS, MovingAverages, compute_default_moving_averages, compute_moving_averages,
};
pub use normalize::{NamedSeries, NormalizedMeasure, normalize_multiple_measures};
pub use regression::{TrendLine, compute_trend_line};
pub use series::{DatedValue, Series};
pub use stats::{Outlier, Statistics, compute_statistics, compute_statistics_with};
pub use trend::{Direction, TrendMetrics, compute_trend_metrics, compute_trend_metrics_with};
