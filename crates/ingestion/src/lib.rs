//! Data loading and normalization for the recession study.
//!
//! This crate handles:
//! - Quarterly GDP series parsing
//! - Monthly regional house price parsing
//! - State postal code to name normalization
//! - University town list parsing and name cleanup

pub mod gdp;
pub mod housing;
pub mod states;
pub mod towns;

pub use gdp::{read_gdp_csv, read_gdp_file};
pub use housing::{read_monthly_prices, read_monthly_prices_file};
pub use states::{normalize_state, state_name};
pub use towns::{parse_university_towns, read_university_towns_file};
