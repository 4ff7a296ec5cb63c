use crate::moving_average::DEFAULT_WINDOWS;
use crate::stats::OUTLIER_Z_SCORE;
use crate::trend::STABLE_THRESHOLD_PCT;
use anyhow::{Context, Result, bail};
use serde::{Deserialize, Serialize};
use std::{fmt::Debug, fs, ops::RangeBounds, path::Path};

/// Analysis configuration.
///
/// Loaded from a TOML file and validated before use.
/// See [`Config::from_file`] for loading.
#[derive(Debug, Default, PartialEq, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Config {
    #[serde(default)]
    pub analysis: AnalysisConfig,
    #[serde(default)]
    pub output: OutputConfig,
}

/// Parameters of the trend calculators.
#[derive(Debug, PartialEq, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct AnalysisConfig {
    /// Moving average window sizes (in measurements).
    pub windows: Vec<usize>,
    /// Absolute z-score above which a value is an outlier.
    pub outlier_z_score: f64,
    /// Absolute percentage change below which a trend is stable.
    pub stable_threshold_pct: f64,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            windows: DEFAULT_WINDOWS.to_vec(),
            outlier_z_score: OUTLIER_Z_SCORE,
            stable_threshold_pct: STABLE_THRESHOLD_PCT,
        }
    }
}

/// Report output parameters.
#[derive(Debug, Default, PartialEq, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct OutputConfig {
    pub format: OutputFormat,
}

#[derive(Debug, Default, PartialEq, Eq, Clone, Copy, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    Json,
    Msgpack,
}

impl OutputFormat {
    /// File extension of reports written in this format.
    pub fn extension(self) -> &'static str {
        match self {
            OutputFormat::Json => "json",
            OutputFormat::Msgpack => "msgpack",
        }
    }
}

impl Config {
    /// Load a [`Config`] from a file.
    ///
    /// The file must be TOML-encoded. Missing tables and fields take their
    /// default values. Performs validation on all parameters before returning.
    ///
    /// # Errors
    /// Returns an error if the file cannot be read, deserialized,
    /// or if the configuration values are invalid.
    pub fn from_file<P: AsRef<Path>>(file: P) -> Result<Self> {
        let file = file.as_ref();
        let contents =
            fs::read_to_string(file).with_context(|| format!("failed to read {file:?}"))?;
        Self::from_toml(&contents)
    }

    /// Parse and validate a [`Config`] from a TOML string.
    pub fn from_toml(contents: &str) -> Result<Self> {
        let config: Config = toml::from_str(contents).context("failed to deserialize config")?;

        config.validate().context("failed to validate config")?;

        Ok(config)
    }

    fn validate(&self) -> Result<()> {
        let analysis = &self.analysis;
        if analysis.windows.is_empty() {
            bail!("at least one moving average window is required");
        }
        for &window in &analysis.windows {
            check_num(window, 1..=3650).context("invalid moving average window")?;
        }
        check_num(analysis.outlier_z_score, 0.1..10.0).context("invalid outlier z-score")?;
        check_num(analysis.stable_threshold_pct, 0.0..100.0)
            .context("invalid stable threshold percentage")?;

        Ok(())
    }
}

fn check_num<T, R>(num: T, range: R) -> Result<()>
where
    T: PartialOrd + Debug,
    R: RangeBounds<T> + Debug,
{
    if !range.contains(&num) {
        bail!("number must be in the range {range:?}, but is {num:?}");
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_file_uses_defaults() {
        let config = Config::from_toml("").unwrap();
        assert_eq!(config, Config::default());
        assert_eq!(config.analysis.windows, vec![7, 30, 90]);
        assert_eq!(config.analysis.outlier_z_score, 2.0);
        assert_eq!(config.output.format, OutputFormat::Json);
    }

    #[test]
    fn reads_all_fields() {
        let contents = String::new()
            + "[analysis]\n"
            + "windows = [3, 14]\n"
            + "outlier_z_score = 2.5\n"
            + "stable_threshold_pct = 0.5\n"
            + "\n"
            + "[output]\n"
            + "format = \"msgpack\"\n";
        let config = Config::from_toml(&contents).unwrap();
        assert_eq!(config.analysis.windows, vec![3, 14]);
        assert_eq!(config.analysis.outlier_z_score, 2.5);
        assert_eq!(config.analysis.stable_threshold_pct, 0.5);
        assert_eq!(config.output.format, OutputFormat::Msgpack);
        assert_eq!(config.output.format.extension(), "msgpack");
    }

    #[test]
    fn rejects_invalid_values() {
        assert!(Config::from_toml("[analysis]\nwindows = []\n").is_err());
        assert!(Config::from_toml("[analysis]\nwindows = [0]\n").is_err());
        assert!(Config::from_toml("[analysis]\noutlier_z_score = -1.0\n").is_err());
        assert!(Config::from_toml("[output]\nformat = \"xml\"\n").is_err());
        assert!(Config::from_toml("[analysis]\nwindow = [7]\n").is_err());
    }
}
