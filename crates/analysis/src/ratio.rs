//! Pre-recession to bottom price ratios.

use recession_core::{PriceRatio, QuarterlyPriceTable, RecessionWindow};
use tracing::{debug, warn};

/// Compute `price[quarter before start] / price[bottom]` for every region.
///
/// Regions missing either price are left out. If the window start is the
/// first quarter of the table, or either quarter is outside it, no region
/// has a ratio and the result is empty.
pub fn price_ratios(table: &QuarterlyPriceTable, window: &RecessionWindow) -> Vec<PriceRatio> {
    let pre_col = match table.column_index(window.start) {
        Some(idx) if idx > 0 => idx - 1,
        _ => {
            warn!(start = %window.start, "No quarter before recession start in price table");
            return Vec::new();
        }
    };
    let Some(bottom_col) = table.column_index(window.bottom) else {
        warn!(bottom = %window.bottom, "Recession bottom outside price table");
        return Vec::new();
    };

    let ratios: Vec<PriceRatio> = table
        .rows
        .iter()
        .filter_map(|row| {
            let ratio = row.price_at(pre_col)? / row.price_at(bottom_col)?;
            (!ratio.is_nan()).then(|| PriceRatio {
                state: row.state.clone(),
                region: row.region.clone(),
                ratio,
            })
        })
        .collect();

    debug!(
        regions = table.rows.len(),
        with_ratio = ratios.len(),
        before = %table.quarters[pre_col],
        bottom = %window.bottom,
        "Computed price ratios"
    );
    ratios
}
