//! Recession window location.
//!
//! Scans a classified GDP series for the first recession quarter, then for
//! the first recovery quarter after it. The bottom is the quarter of lowest
//! chained GDP between the two, inclusive.

use ordered_float::OrderedFloat;
use recession_core::{CycleState, GdpRecord, RecessionWindow};
use tracing::{debug, info};

/// Locate the first recession in a classified series.
///
/// Returns `None` if there is no recession quarter, or no recovery quarter
/// after it.
pub fn locate_recession(records: &[GdpRecord]) -> Option<RecessionWindow> {
    let start_idx = records
        .iter()
        .position(|r| r.cycle_state == CycleState::Recession)?;

    let end_idx = match records[start_idx + 1..]
        .iter()
        .position(|r| r.cycle_state == CycleState::Recovery)
    {
        Some(offset) => start_idx + 1 + offset,
        None => {
            debug!(start = %records[start_idx].quarter, "Recession has no recovery");
            return None;
        }
    };

    // min_by_key keeps the first of equal minima
    let bottom = records[start_idx..=end_idx]
        .iter()
        .min_by_key(|r| OrderedFloat(r.gdp_chained))?;

    let window = RecessionWindow {
        start: records[start_idx].quarter,
        end: records[end_idx].quarter,
        bottom: bottom.quarter,
    };
    info!(
        start = %window.start,
        end = %window.end,
        bottom = %window.bottom,
        "Located recession window"
    );
    Some(window)
}
