//! Monthly to quarterly resampling of regional house prices.
//!
//! Each quarter's value is the mean of whichever of its three months have
//! data. A quarter with no data at all stays missing.

use recession_core::{
    Error, HousingQuarterRow, MonthlyPriceTable, QuarterLabel, QuarterlyPriceTable, Result,
    YearMonth,
};
use std::collections::{HashMap, HashSet};
use tracing::{debug, info};

/// Resample a monthly price table to `horizon_quarters` quarters starting
/// at `horizon_start`.
///
/// Months outside the horizon are ignored; months of the horizon that the
/// table lacks count as missing. Fails if two rows share the same
/// (state, region) identity.
pub fn resample_quarterly(
    table: &MonthlyPriceTable,
    horizon_start: QuarterLabel,
    horizon_quarters: usize,
) -> Result<QuarterlyPriceTable> {
    let quarters: Vec<QuarterLabel> = (0..horizon_quarters)
        .map(|i| horizon_start.offset(i))
        .collect();

    let month_index: HashMap<YearMonth, usize> = table
        .months
        .iter()
        .enumerate()
        .map(|(idx, &m)| (m, idx))
        .collect();

    // Column positions feeding each quarter
    let quarter_columns: Vec<Vec<usize>> = quarters
        .iter()
        .map(|q| {
            q.months()
                .iter()
                .filter_map(|m| month_index.get(m).copied())
                .collect()
        })
        .collect();

    let partial = quarter_columns.iter().filter(|cols| cols.len() < 3).count();
    if partial > 0 {
        debug!(quarters = partial, "Quarters with fewer than three month columns");
    }

    let mut seen: HashSet<(&str, &str)> = HashSet::with_capacity(table.rows.len());
    let mut rows = Vec::with_capacity(table.rows.len());

    for row in &table.rows {
        if !seen.insert((row.state.as_str(), row.region.as_str())) {
            return Err(Error::data(format!(
                "duplicate region '{}, {}' in price table",
                row.region, row.state
            )));
        }

        let prices = quarter_columns
            .iter()
            .map(|cols| mean_present(cols.iter().map(|&c| row.prices.get(c).copied().flatten())))
            .collect();

        rows.push(HousingQuarterRow {
            state: row.state.clone(),
            region: row.region.clone(),
            prices,
        });
    }

    info!(rows = rows.len(), quarters = quarters.len(), "Resampled prices to quarters");
    Ok(QuarterlyPriceTable { quarters, rows })
}

/// Mean of the present values, or `None` if there are none.
fn mean_present(values: impl Iterator<Item = Option<f64>>) -> Option<f64> {
    let (sum, count) = values
        .flatten()
        .fold((0.0, 0usize), |(sum, count), v| (sum + v, count + 1));
    if count > 0 {
        Some(sum / count as f64)
    } else {
        None
    }
}
