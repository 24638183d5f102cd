//! Calendar arithmetic and date parsing helpers.

pub mod calendar;

pub use calendar::{add_months, month_abbrev, parse_iso_date, year_bounds};
