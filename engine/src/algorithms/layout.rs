//! Timeline bar layout.
//!
//! Converts a date range plus the visible window into proportional render
//! geometry: a percentage left offset and width for the bar representing
//! the clipped range. Ranges that do not intersect the window produce no
//! geometry at all, which is how the dashboard hides them.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::core::domain::{DateRange, TimelineWindow};

/// Proportional position of a clipped bar within the window.
///
/// Invariant: `left_pct >= 0`, `width_pct > 0`, and
/// `left_pct + width_pct <= 100` for any geometry this module produces.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BarGeometry {
    pub left_pct: f64,
    pub width_pct: f64,
}

/// Clip a range against the window and compute its bar geometry.
///
/// Returns `None` when the range lies entirely before or after the
/// window, when the clipped duration collapses to zero (instantaneous
/// ranges are hidden, as are inverted ones), or when the window itself is
/// degenerate. Callers render nothing in the `None` case; a missing bar
/// is always preferable to a crashed view.
///
/// # Examples
///
/// ```
/// use chrono::NaiveDate;
/// use siteline_engine::algorithms::layout::clip_to_window;
/// use siteline_engine::core::domain::{DateRange, TimelineWindow};
///
/// let window = TimelineWindow::year(2025);
/// let d = |m, day| NaiveDate::from_ymd_opt(2025, m, day).unwrap();
///
/// // A range covering the whole window fills it exactly.
/// let full = DateRange::new(d(1, 1), d(12, 31));
/// let geometry = clip_to_window(&full, &window).unwrap();
/// assert_eq!(geometry.left_pct, 0.0);
/// assert_eq!(geometry.width_pct, 100.0);
///
/// // A range from the previous year is not visible.
/// let before = DateRange::new(
///     NaiveDate::from_ymd_opt(2024, 3, 1).unwrap(),
///     NaiveDate::from_ymd_opt(2024, 9, 1).unwrap(),
/// );
/// assert!(clip_to_window(&before, &window).is_none());
/// ```
pub fn clip_to_window(range: &DateRange, window: &TimelineWindow) -> Option<BarGeometry> {
    // Entirely outside the visible span.
    if range.end < window.start || range.start > window.end {
        return None;
    }

    let total_days = (window.end - window.start).num_days();
    if total_days <= 0 {
        return None;
    }

    let effective_start = range.start.max(window.start);
    let effective_end = range.end.min(window.end);

    let clipped_days = (effective_end - effective_start).num_days();
    // Zero-length and inverted ranges are hidden, not rendered as slivers.
    if clipped_days <= 0 {
        return None;
    }

    let total = total_days as f64;
    let left_pct = (effective_start - window.start).num_days() as f64 / total * 100.0;
    let width_pct = clipped_days as f64 / total * 100.0;

    Some(BarGeometry {
        left_pct,
        width_pct,
    })
}

/// Position of a single-date marker (the "today" line) within the window.
///
/// Uses the same proportional formula as [`clip_to_window`]; returns
/// `None` when the date falls outside the window so the marker is simply
/// omitted.
pub fn marker_position(date: NaiveDate, window: &TimelineWindow) -> Option<f64> {
    if date < window.start || date > window.end {
        return None;
    }

    let total_days = (window.end - window.start).num_days();
    if total_days <= 0 {
        return None;
    }

    Some((date - window.start).num_days() as f64 / total_days as f64 * 100.0)
}
