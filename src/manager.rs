use crate::analysis::{ComparisonReport, MeasureReport, save_report};
use crate::config::Config;
use crate::measure::Measure;
use anyhow::{Context, Result, bail};
use glob::glob;
use std::{
    fs,
    path::{Path, PathBuf},
};

/// Runs the analyses of one data directory.
///
/// The directory holds an optional `config.toml`, measure files under
/// `measures/` and writes its reports under `results/`.
pub struct Manager {
    data_dir: PathBuf,
    cfg: Config,
}

impl Manager {
    pub fn new<P: AsRef<Path>>(data_dir: P) -> Result<Self> {
        let data_dir = data_dir.as_ref().to_path_buf();
        if !data_dir.is_dir() {
            bail!("{data_dir:?} is not a directory");
        }

        let cfg_file = data_dir.join("config.toml");
        let cfg = if cfg_file.exists() {
            Config::from_file(&cfg_file).context("failed to construct cfg")?
        } else {
            log::warn!("{cfg_file:?} not found, using default config");
            Config::default()
        };
        log::info!("{cfg:#?}");

        Ok(Self { data_dir, cfg })
    }

    /// Write one report per measure file.
    pub fn analyze_measures(&self) -> Result<()> {
        let measures = self.load_measures().context("failed to load measures")?;
        self.create_results_dir()?;

        for measure in &measures {
            let report = MeasureReport::new(measure, &self.cfg.analysis);
            let results_file = self.results_file(&measure.name);
            save_report(&report, &results_file, self.cfg.output.format)
                .with_context(|| format!("failed to save report of {:?}", measure.name))?;
            log::info!(
                "analyzed {:?} ({} points, {:?})",
                measure.name,
                report.count,
                report.trend_metrics.direction
            );
        }

        Ok(())
    }

    /// Write a single report comparing every measure file.
    pub fn compare_measures(&self) -> Result<()> {
        let measures = self.load_measures().context("failed to load measures")?;
        self.create_results_dir()?;

        let report = ComparisonReport::new(&measures);
        let results_file = self.results_file("comparison");
        save_report(&report, &results_file, self.cfg.output.format)
            .context("failed to save comparison report")?;
        log::info!("compared {} measures", measures.len());

        Ok(())
    }

    /// Remove every previously written report.
    pub fn clean_results(&self) -> Result<()> {
        let results_dir = self.results_dir();
        if !results_dir.exists() {
            log::info!("nothing to clean");
            return Ok(());
        }
        fs::remove_dir_all(&results_dir)
            .with_context(|| format!("failed to remove {results_dir:?}"))?;
        log::info!("removed {results_dir:?}");
        Ok(())
    }

    fn load_measures(&self) -> Result<Vec<Measure>> {
        let pattern = self.data_dir.join("measures").join("*.toml");
        let pattern = pattern.to_str().context("pattern is not valid UTF-8")?;

        let mut measures: Vec<Measure> = Vec::new();
        for file in glob(pattern).context("failed to glob measure files")? {
            let file = match file {
                Ok(file) => file,
                Err(error) => {
                    log::warn!("skipping unreadable path: {error}");
                    continue;
                }
            };
            let measure =
                Measure::from_file(&file).with_context(|| format!("failed to load {file:?}"))?;
            if measures.iter().any(|other| other.name == measure.name) {
                bail!("measure {:?} is defined more than once", measure.name);
            }
            measures.push(measure);
        }

        if measures.is_empty() {
            log::warn!("no measure files match {pattern:?}");
        }
        Ok(measures)
    }

    fn create_results_dir(&self) -> Result<()> {
        let results_dir = self.results_dir();
        fs::create_dir_all(&results_dir)
            .with_context(|| format!("failed to create {results_dir:?}"))
    }

    fn results_dir(&self) -> PathBuf {
        self.data_dir.join("results")
    }

    fn results_file(&self, stem: &str) -> PathBuf {
        self.results_dir()
            .join(format!("{stem}.{}", self.cfg.output.format.extension()))
    }
}
