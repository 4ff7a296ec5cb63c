use crate::config::{AnalysisConfig, OutputFormat};
use crate::correlation::compute_correlation;
use crate::measure::Measure;
use crate::moving_average::{MovingAverages, compute_moving_averages};
use crate::normalize::{NormalizedMeasure, normalize_multiple_measures};
use crate::regression::{TrendLine, compute_trend_line};
use crate::stats::{Statistics, compute_statistics_with};
use crate::trend::{TrendMetrics, compute_trend_metrics_with};
use anyhow::{Context, Result};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::{
    collections::BTreeMap,
    fs::File,
    io::{BufWriter, Write},
    path::Path,
};

/// Everything derived from a single measure.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MeasureReport {
    pub name: String,
    pub unit: Option<String>,
    pub count: usize,
    pub trend_metrics: TrendMetrics,
    pub trend_line: TrendLine,
    pub moving_averages: MovingAverages,
    pub statistics: Statistics,
}

impl MeasureReport {
    pub fn new(measure: &Measure, cfg: &AnalysisConfig) -> Self {
        let vals = measure.values();
        let dates = measure.dates();
        Self {
            name: measure.name.clone(),
            unit: measure.unit.clone(),
            count: vals.len(),
            trend_metrics: compute_trend_metrics_with(&vals, &dates, cfg.stable_threshold_pct),
            trend_line: compute_trend_line(&vals, &dates),
            moving_averages: compute_moving_averages(&vals, &dates, &cfg.windows),
            statistics: compute_statistics_with(&vals, cfg.outlier_z_score),
        }
    }
}

/// Correlation between two measures over the dates both were recorded on.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PairCorrelation {
    pub first: String,
    pub second: String,
    pub shared_points: usize,
    pub coefficient: f64,
}

/// Overlay of several measures on a common scale.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ComparisonReport {
    pub normalized: Vec<NormalizedMeasure>,
    pub correlations: Vec<PairCorrelation>,
}

impl ComparisonReport {
    pub fn new(measures: &[Measure]) -> Self {
        let named_series: Vec<_> = measures.iter().map(Measure::to_named_series).collect();
        let normalized = normalize_multiple_measures(&named_series);

        let mut correlations = Vec::new();
        for (i_first, first) in measures.iter().enumerate() {
            for second in &measures[i_first + 1..] {
                correlations.push(correlate_pair(first, second));
            }
        }

        Self {
            normalized,
            correlations,
        }
    }
}

fn correlate_pair(first: &Measure, second: &Measure) -> PairCorrelation {
    // Later points on a repeated date replace earlier ones.
    let second_by_date: BTreeMap<NaiveDate, f64> = second
        .points
        .iter()
        .map(|point| (point.date, point.value))
        .collect();
    let first_by_date: BTreeMap<NaiveDate, f64> = first
        .points
        .iter()
        .map(|point| (point.date, point.value))
        .collect();

    let (x, y): (Vec<f64>, Vec<f64>) = first_by_date
        .iter()
        .filter_map(|(date, &x_val)| second_by_date.get(date).map(|&y_val| (x_val, y_val)))
        .unzip();

    PairCorrelation {
        first: first.name.clone(),
        second: second.name.clone(),
        shared_points: x.len(),
        coefficient: compute_correlation(&x, &y),
    }
}

/// Write `report` to `file` in the given format.
pub fn save_report<T, P>(report: &T, file: P, format: OutputFormat) -> Result<()>
where
    T: Serialize,
    P: AsRef<Path>,
{
    let file = file.as_ref();
    let file = File::create(file).with_context(|| format!("failed to create {file:?}"))?;
    let mut writer = BufWriter::new(file);

    match format {
        OutputFormat::Json => {
            serde_json::to_writer_pretty(&mut writer, report).context("failed to serialize report")?
        }
        OutputFormat::Msgpack => rmp_serde::encode::write_named(&mut writer, report)
            .context("failed to serialize report")?,
    }

    writer.flush().context("failed to flush writer stream")?;

    Ok(())
}
