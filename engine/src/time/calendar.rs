//! Calendar helpers shared by the layout engine, axis generation, and
//! retention date math.
//!
//! All arithmetic rides on chrono's native date handling; there is no
//! leap-year special-casing here beyond what `NaiveDate` already does.

use chrono::{Datelike, NaiveDate};

/// Month abbreviations used for axis labels, indexed by `month - 1`.
const MONTH_ABBREVS: [&str; 12] = [
    "Jan", "Feb", "Mar", "Apr", "May", "Jun", "Jul", "Aug", "Sep", "Oct", "Nov", "Dec",
];

/// Parse an ISO `YYYY-MM-DD` date string.
///
/// Returns `None` for malformed input rather than erroring; callers at
/// the import boundary record the miss as a validation issue and the
/// affected bar is simply not rendered.
///
/// # Examples
///
/// ```
/// use siteline_engine::time::calendar::parse_iso_date;
///
/// assert!(parse_iso_date("2025-07-14").is_some());
/// assert!(parse_iso_date("14/07/2025").is_none());
/// assert!(parse_iso_date("").is_none());
/// ```
pub fn parse_iso_date(s: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(s.trim(), "%Y-%m-%d").ok()
}

/// Three-letter abbreviation for a 1-based month number.
///
/// Out-of-range months fall back to "???" rather than panicking.
pub fn month_abbrev(month: u32) -> &'static str {
    if (1..=12).contains(&month) {
        MONTH_ABBREVS[(month - 1) as usize]
    } else {
        "???"
    }
}

/// First and last day of the given calendar year.
pub fn year_bounds(year: i32) -> (NaiveDate, NaiveDate) {
    // Both endpoints exist for every year chrono can represent.
    let start = NaiveDate::from_ymd_opt(year, 1, 1).expect("valid year start");
    let end = NaiveDate::from_ymd_opt(year, 12, 31).expect("valid year end");
    (start, end)
}

/// Last day of a 1-based month in the given year.
pub fn last_day_of_month(year: i32, month: u32) -> NaiveDate {
    let (next_year, next_month) = if month == 12 {
        (year + 1, 1)
    } else {
        (year, month + 1)
    };
    NaiveDate::from_ymd_opt(next_year, next_month, 1).expect("valid month start")
        - chrono::Duration::days(1)
}

/// Add a number of calendar months to a date, clamping the day to the
/// target month's length (e.g. Jan 31 + 1 month = Feb 28/29).
///
/// # Examples
///
/// ```
/// use chrono::NaiveDate;
/// use siteline_engine::time::calendar::add_months;
///
/// let pc = NaiveDate::from_ymd_opt(2025, 1, 31).unwrap();
/// assert_eq!(add_months(pc, 1), NaiveDate::from_ymd_opt(2025, 2, 28).unwrap());
/// assert_eq!(add_months(pc, 12), NaiveDate::from_ymd_opt(2026, 1, 31).unwrap());
/// ```
pub fn add_months(date: NaiveDate, months: u32) -> NaiveDate {
    let total = date.year() * 12 + date.month0() as i32 + months as i32;
    let year = total.div_euclid(12);
    let month = total.rem_euclid(12) as u32 + 1;
    let last = last_day_of_month(year, month);
    let day = date.day().min(last.day());
    NaiveDate::from_ymd_opt(year, month, day).expect("clamped day is valid")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn d(y: i32, m: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, day).unwrap()
    }

    #[test]
    fn parses_iso_dates_only() {
        assert_eq!(parse_iso_date("2025-02-28"), Some(d(2025, 2, 28)));
        assert_eq!(parse_iso_date("  2025-02-28  "), Some(d(2025, 2, 28)));
        assert_eq!(parse_iso_date("2025-02-30"), None);
        assert_eq!(parse_iso_date("next tuesday"), None);
    }

    #[test]
    fn month_abbrevs() {
        assert_eq!(month_abbrev(1), "Jan");
        assert_eq!(month_abbrev(12), "Dec");
        assert_eq!(month_abbrev(0), "???");
        assert_eq!(month_abbrev(13), "???");
    }

    #[test]
    fn last_days() {
        assert_eq!(last_day_of_month(2025, 2), d(2025, 2, 28));
        assert_eq!(last_day_of_month(2024, 2), d(2024, 2, 29));
        assert_eq!(last_day_of_month(2025, 12), d(2025, 12, 31));
    }

    #[test]
    fn add_months_clamps_day() {
        assert_eq!(add_months(d(2025, 1, 31), 1), d(2025, 2, 28));
        assert_eq!(add_months(d(2024, 1, 31), 1), d(2024, 2, 29));
        assert_eq!(add_months(d(2025, 11, 15), 3), d(2026, 2, 15));
        assert_eq!(add_months(d(2025, 6, 30), 0), d(2025, 6, 30));
        assert_eq!(add_months(d(2025, 6, 30), 24), d(2027, 6, 30));
    }
}
