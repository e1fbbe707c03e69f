//! Recession detection and housing price analysis.
//!
//! This crate handles:
//! - Business-cycle classification of a quarterly GDP series
//! - Recession window location (start, end, bottom)
//! - Monthly to quarterly resampling of regional house prices
//! - Pre-recession to bottom price ratios
//! - University vs non-university town hypothesis test

pub mod cycle;
pub mod window;
pub mod resample;
pub mod ratio;
pub mod hypothesis;
pub mod study;

pub use cycle::classify_gdp;
pub use window::locate_recession;
pub use resample::resample_quarterly;
pub use ratio::price_ratios;
pub use hypothesis::{run_hypothesis_test, SIGNIFICANCE_LEVEL};
pub use study::{RecessionStudy, StudyReport};
