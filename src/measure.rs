//! Measure input files.

use crate::normalize::NamedSeries;
use crate::series::DatedValue;
use anyhow::{Context, Result, bail};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::{fs, path::Path};

/// Dated values recorded for one measure of one patient.
///
/// Points are kept sorted by date.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Measure {
    /// Measure name, also used to name its report.
    pub name: String,

    /// Unit the values are recorded in.
    #[serde(default)]
    pub unit: Option<String>,

    /// Recorded measurements.
    #[serde(default)]
    pub points: Vec<DatedValue>,
}

impl Measure {
    /// Load a [`Measure`] from a TOML file.
    ///
    /// # Errors
    /// Returns an error if the file cannot be read or deserialized, if the
    /// name is empty or not usable as a file stem, or if any value is not finite.
    pub fn from_file<P: AsRef<Path>>(file: P) -> Result<Self> {
        let file = file.as_ref();
        let contents =
            fs::read_to_string(file).with_context(|| format!("failed to read {file:?}"))?;
        Self::from_toml(&contents)
    }

    /// Parse a [`Measure`] from a TOML string, validate it and sort its points.
    pub fn from_toml(contents: &str) -> Result<Self> {
        let mut measure: Measure =
            toml::from_str(contents).context("failed to deserialize measure")?;

        measure.validate().context("failed to validate measure")?;

        measure.points.sort_by_key(|point| point.date);

        Ok(measure)
    }

    fn validate(&self) -> Result<()> {
        if self.name.trim().is_empty() {
            bail!("measure name must not be empty");
        }
        if self
            .name
            .chars()
            .any(|c| !(c.is_alphanumeric() || c == '-' || c == '_'))
        {
            bail!(
                "measure name must contain only alphanumerics, '-' or '_', but is {:?}",
                self.name
            );
        }
        for (i_point, point) in self.points.iter().enumerate() {
            if !point.value.is_finite() {
                bail!("value of point {i_point} must be finite, but is {}", point.value);
            }
        }
        Ok(())
    }

    pub fn values(&self) -> Vec<f64> {
        self.points.iter().map(|point| point.value).collect()
    }

    pub fn dates(&self) -> Vec<NaiveDate> {
        self.points.iter().map(|point| point.date).collect()
    }

    pub fn to_named_series(&self) -> NamedSeries {
        NamedSeries {
            name: self.name.clone(),
            data: self.points.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sorts_points_by_date() {
        let contents = String::new()
            + "name = \"weight\"\n"
            + "unit = \"kg\"\n"
            + "\n"
            + "[[points]]\n"
            + "date = \"2024-01-03\"\n"
            + "value = 71.0\n"
            + "\n"
            + "[[points]]\n"
            + "date = \"2024-01-01\"\n"
            + "value = 70.0\n";
        let measure = Measure::from_toml(&contents).unwrap();
        assert_eq!(measure.unit.as_deref(), Some("kg"));
        assert_eq!(measure.values(), vec![70.0, 71.0]);
        assert_eq!(
            measure.dates()[0],
            NaiveDate::from_ymd_opt(2024, 1, 1).unwrap()
        );
    }

    #[test]
    fn measure_without_points() {
        let measure = Measure::from_toml("name = \"ldl\"\n").unwrap();
        assert!(measure.points.is_empty());
        assert!(measure.unit.is_none());
    }

    #[test]
    fn rejects_invalid_measures() {
        assert!(Measure::from_toml("name = \"\"\n").is_err());
        assert!(Measure::from_toml("name = \"../weight\"\n").is_err());
        let contents = "name = \"weight\"\n[[points]]\ndate = \"2024-01-01\"\nvalue = nan\n";
        assert!(Measure::from_toml(contents).is_err());
        let contents = "name = \"weight\"\n[[points]]\ndate = \"2024-13-01\"\nvalue = 1.0\n";
        assert!(Measure::from_toml(contents).is_err());
    }
}
