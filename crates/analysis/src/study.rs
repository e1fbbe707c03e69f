//! End-to-end recession study.
//!
//! Chains classification, window location, resampling, price ratios and the
//! hypothesis test into one call.

use recession_core::{
    Config, Error, GdpQuarter, MonthlyPriceTable, RecessionWindow, Result, TestOutcome,
    UniversityTownSet,
};
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::{
    cycle::classify_gdp, hypothesis::run_hypothesis_test, ratio::price_ratios,
    resample::resample_quarterly, window::locate_recession,
};

/// Outcome of a full study run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StudyReport {
    /// Detected recession.
    pub window: RecessionWindow,
    /// Regions with a usable price ratio.
    pub ratio_count: usize,
    /// Regions with a ratio that are university towns.
    pub university_count: usize,
    /// Regions with a ratio that are not university towns.
    pub non_university_count: usize,
    /// Hypothesis test result.
    pub outcome: TestOutcome,
}

/// Recession study runner.
pub struct RecessionStudy {
    config: Config,
}

impl RecessionStudy {
    /// Create a study from configuration.
    pub fn new(config: Config) -> Self {
        Self { config }
    }

    /// Get the configuration.
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Locate the recession in a raw GDP series.
    pub fn recession_window(&self, gdp: &[GdpQuarter]) -> Result<RecessionWindow> {
        let records = classify_gdp(gdp, self.config.gdp.epoch);
        locate_recession(&records).ok_or(Error::MissingWindow)
    }

    /// Run the full study.
    pub fn run(
        &self,
        gdp: &[GdpQuarter],
        prices: &MonthlyPriceTable,
        towns: &UniversityTownSet,
    ) -> Result<StudyReport> {
        let window = self.recession_window(gdp)?;

        let housing = &self.config.housing;
        let quarterly = resample_quarterly(prices, housing.horizon_start, housing.horizon_quarters)?;
        let ratios = price_ratios(&quarterly, &window);

        let university_count = ratios
            .iter()
            .filter(|r| towns.contains(&r.state, &r.region))
            .count();

        let outcome = run_hypothesis_test(&ratios, towns)?;

        let report = StudyReport {
            window,
            ratio_count: ratios.len(),
            university_count,
            non_university_count: ratios.len() - university_count,
            outcome,
        };
        info!(
            ratios = report.ratio_count,
            different = report.outcome.different,
            "Study complete"
        );
        Ok(report)
    }
}

impl Default for RecessionStudy {
    fn default() -> Self {
        Self::new(Config::default())
    }
}
