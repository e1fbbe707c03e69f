//! Business-cycle classification of a quarterly GDP series.
//!
//! Each quarter is classified from the chained-dollar values of a 4-quarter
//! window `{i-2, i-1, i, i+1}`:
//! - recession: `v[i-1] > v[i] > v[i+1]`, i.e. `i` opens a run of two
//!   consecutive declines
//! - recovery: `v[i-2] < v[i-1] < v[i]`, i.e. `i` closes a run of two
//!   consecutive increases
//! - stable otherwise
//!
//! The first two and the last two quarters are left undefined.

use recession_core::{CycleState, GdpQuarter, GdpRecord, QuarterLabel};
use tracing::debug;

/// Quarters at each edge of the series that cannot be classified.
const EDGE_QUARTERS: usize = 2;

/// Classify a single window of chained GDP values.
#[inline]
pub fn classify_window(prev2: f64, prev: f64, current: f64, next: f64) -> CycleState {
    if prev > current && current > next {
        CycleState::Recession
    } else if prev2 < prev && prev < current {
        CycleState::Recovery
    } else {
        CycleState::Stable
    }
}

/// Build the classified GDP series from quarters at or after `epoch`.
///
/// The input need not be sorted; the output is in ascending quarter order.
pub fn classify_gdp(series: &[GdpQuarter], epoch: QuarterLabel) -> Vec<GdpRecord> {
    let mut quarters: Vec<&GdpQuarter> = series.iter().filter(|q| q.quarter >= epoch).collect();
    quarters.sort_by_key(|q| q.quarter);

    let values: Vec<f64> = quarters.iter().map(|q| q.gdp_chained).collect();
    let n = values.len();

    let records: Vec<GdpRecord> = quarters
        .iter()
        .enumerate()
        .map(|(i, q)| {
            let cycle_state = if i >= EDGE_QUARTERS && i + EDGE_QUARTERS < n {
                classify_window(values[i - 2], values[i - 1], values[i], values[i + 1])
            } else {
                CycleState::Undefined
            };
            GdpRecord {
                quarter: q.quarter,
                gdp_current: q.gdp_current,
                gdp_chained: q.gdp_chained,
                cycle_state,
            }
        })
        .collect();

    debug!(
        quarters = n,
        dropped = series.len() - n,
        epoch = %epoch,
        "Classified GDP series"
    );
    records
}
