//! Command-line entry point for the recession study.
//!
//! ```text
//! recession-report <gdp.csv> <prices.csv> <university_towns.txt> [config.json]
//! ```
//!
//! Prints the study report as JSON on stdout. Logging goes to stderr and is
//! controlled by `RUST_LOG`.

use anyhow::{bail, Context, Result};
use recession_analysis::RecessionStudy;
use recession_core::Config;
use recession_ingestion::{read_gdp_file, read_monthly_prices_file, read_university_towns_file};
use std::env;
use tracing::info;
use tracing_subscriber::EnvFilter;

const USAGE: &str =
    "usage: recession-report <gdp.csv> <prices.csv> <university_towns.txt> [config.json]";

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let args: Vec<String> = env::args().skip(1).collect();
    if !(3..=4).contains(&args.len()) {
        bail!(USAGE);
    }

    let config = match args.get(3) {
        Some(path) => Config::from_json_file(path)
            .with_context(|| format!("failed to load config from {}", path))?,
        None => Config::default(),
    };
    info!(
        epoch = %config.gdp.epoch,
        horizon_start = %config.housing.horizon_start,
        horizon_end = %config.housing.horizon_end(),
        "Configuration loaded"
    );

    let gdp = read_gdp_file(&args[0])
        .with_context(|| format!("failed to read GDP series from {}", args[0]))?;
    let prices = read_monthly_prices_file(&args[1])
        .with_context(|| format!("failed to read prices from {}", args[1]))?;
    let towns = read_university_towns_file(&args[2])
        .with_context(|| format!("failed to read university towns from {}", args[2]))?;

    let report = RecessionStudy::new(config)
        .run(&gdp, &prices, &towns)
        .context("study failed")?;

    println!("{}", serde_json::to_string_pretty(&report)?);
    Ok(())
}
