//! Quarterly GDP series parsing.
//!
//! Reads a CSV with one row per quarter: `quarter,gdp_current,gdp_chained`.

use recession_core::{Error, GdpQuarter, QuarterLabel, Result};
use serde::Deserialize;
use std::fs::File;
use std::io::Read;
use std::path::Path;
use tracing::{debug, info};

/// Raw CSV row before the quarter label is validated.
#[derive(Debug, Deserialize)]
struct GdpRow {
    #[serde(alias = "qt")]
    quarter: String,
    #[serde(alias = "gdpcur")]
    gdp_current: f64,
    #[serde(alias = "gdp09")]
    gdp_chained: f64,
}

/// Parse a quarterly GDP CSV. Rows are returned in file order.
pub fn read_gdp_csv<R: Read>(reader: R) -> Result<Vec<GdpQuarter>> {
    let mut rdr = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(reader);

    let mut quarters = Vec::new();
    for (i, row) in rdr.deserialize::<GdpRow>().enumerate() {
        let row = row?;
        let quarter: QuarterLabel = row
            .quarter
            .parse()
            .map_err(|_| Error::data(format!("GDP row {}: invalid quarter '{}'", i + 1, row.quarter)))?;
        quarters.push(GdpQuarter {
            quarter,
            gdp_current: row.gdp_current,
            gdp_chained: row.gdp_chained,
        });
    }

    if let (Some(first), Some(last)) = (quarters.first(), quarters.last()) {
        debug!(first = %first.quarter, last = %last.quarter, "GDP series range");
    }
    info!(rows = quarters.len(), "Loaded GDP series");
    Ok(quarters)
}

/// Parse a quarterly GDP CSV file.
pub fn read_gdp_file(path: impl AsRef<Path>) -> Result<Vec<GdpQuarter>> {
    let file = File::open(path)?;
    read_gdp_csv(file)
}
