//! Axis bucket generation for the timeline header.
//!
//! Buckets are fixed-width shares of the window: 12 for month mode, 4 for
//! quarter mode, N for week mode. Month buckets deliberately ignore the
//! varying month lengths; the header is a navigation aid, not a ruler,
//! and the dashboard has always drawn it with equal columns.

use chrono::{Datelike, Duration};
use serde::{Deserialize, Serialize};

use crate::core::domain::{Granularity, TimelineWindow};
use crate::time::calendar;

/// A single axis header cell.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AxisBucket {
    /// Primary label ("Mar", "Q2", "W7").
    pub label: String,
    /// Secondary label, only used in week mode ("17 Nov").
    pub detail: Option<String>,
    pub left_pct: f64,
    pub width_pct: f64,
}

/// Generate the axis buckets for a window at the given granularity.
///
/// Month and quarter modes label the calendar year of the window start;
/// week mode walks 7-day steps from the window start (the anchor date)
/// and labels each bucket with its sequence index and start day/month.
///
/// # Examples
///
/// ```
/// use siteline_engine::algorithms::axis::axis_buckets;
/// use siteline_engine::core::domain::{Granularity, TimelineWindow};
///
/// let window = TimelineWindow::year(2025);
/// let months = axis_buckets(&window, Granularity::Month);
/// assert_eq!(months.len(), 12);
/// assert_eq!(months[0].label, "Jan");
/// assert_eq!(months[11].label, "Dec");
/// ```
pub fn axis_buckets(window: &TimelineWindow, granularity: Granularity) -> Vec<AxisBucket> {
    match granularity {
        Granularity::Month => fixed_buckets(12, |i| (calendar::month_abbrev(i as u32 + 1).to_string(), None)),
        Granularity::Quarter => fixed_buckets(4, |i| (format!("Q{}", i + 1), None)),
        Granularity::Week => week_buckets(window),
    }
}

/// Equal-width buckets across the whole window.
fn fixed_buckets<F>(count: usize, label_for: F) -> Vec<AxisBucket>
where
    F: Fn(usize) -> (String, Option<String>),
{
    let width = 100.0 / count as f64;
    (0..count)
        .map(|i| {
            let (label, detail) = label_for(i);
            AxisBucket {
                label,
                detail,
                left_pct: i as f64 * width,
                width_pct: width,
            }
        })
        .collect()
}

fn week_buckets(window: &TimelineWindow) -> Vec<AxisBucket> {
    let span = window.span_days();
    if span <= 0 {
        return Vec::new();
    }

    // Window spans built by `TimelineWindow::weeks` are exact multiples
    // of 7; an arbitrary span still gets at least one bucket.
    let count = ((span + 6) / 7).max(1) as usize;
    let width = 100.0 / count as f64;

    (0..count)
        .map(|i| {
            let bucket_start = window.start + Duration::days(7 * i as i64);
            AxisBucket {
                label: format!("W{}", i + 1),
                detail: Some(format!(
                    "{} {}",
                    bucket_start.day(),
                    calendar::month_abbrev(bucket_start.month())
                )),
                left_pct: i as f64 * width,
                width_pct: width,
            }
        })
        .collect()
}
