use crate::series::DatedValue;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Value reported for every point of a measure whose values are all equal.
const FLAT_NORMALIZED_VALUE: f64 = 50.0;

/// Named dated series, one per measure being compared.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NamedSeries {
    pub name: String,
    pub data: Vec<DatedValue>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Range {
    pub min: f64,
    pub max: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NormalizedPoint {
    pub date: NaiveDate,
    pub normalized_value: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NormalizedMeasure {
    pub name: String,
    pub normalized_data: Vec<NormalizedPoint>,
    /// Range of the measure in its own units.
    pub original_range: Range,
}

/// Rescale every measure onto `0..=100` using its own minimum and maximum,
/// so that measures with different units can share one chart.
///
/// A measure holding a NaN or infinite value is reported like a measure
/// without points.
pub fn normalize_multiple_measures(measures: &[NamedSeries]) -> Vec<NormalizedMeasure> {
    measures.iter().map(normalize_measure).collect()
}

fn normalize_measure(measure: &NamedSeries) -> NormalizedMeasure {
    if measure.data.iter().any(|point| !point.value.is_finite()) {
        return NormalizedMeasure {
            name: measure.name.clone(),
            normalized_data: Vec::new(),
            original_range: Range::default(),
        };
    }

    let original_range = compute_range(&measure.data);
    let Range { min, max } = original_range;

    let normalized_data = measure
        .data
        .iter()
        .map(|point| NormalizedPoint {
            date: point.date,
            normalized_value: if max == min {
                FLAT_NORMALIZED_VALUE
            } else {
                (point.value - min) / (max - min) * 100.0
            },
        })
        .collect();

    NormalizedMeasure {
        name: measure.name.clone(),
        normalized_data,
        original_range,
    }
}

fn compute_range(data: &[DatedValue]) -> Range {
    if data.is_empty() {
        return Range::default();
    }
    data.iter().fold(
        Range {
            min: f64::INFINITY,
            max: f64::NEG_INFINITY,
        },
        |range, point| Range {
            min: range.min.min(point.value),
            max: range.max.max(point.value),
        },
    )
}
