use anyhow::{Context, Result};
use serde_json::Value;
use std::path::Path;

use crate::core::domain::{DateRange, ShutdownPeriod};
use crate::time::calendar;

/// Candidate keys that may contain the list of shutdowns in the JSON payload
const PERIOD_KEYS: &[&str] = &[
    "shutdowns",
    "shutdownPeriods",
    "shutdown_periods",
    "periods",
    "Shutdowns",
];

/// Candidate keys for start dates inside each period
const START_KEYS: &[&str] = &["start", "startDate", "start_date", "from"];

/// Candidate keys for end dates inside each period
const END_KEYS: &[&str] = &["end", "endDate", "end_date", "to", "until"];

/// Candidate keys for the period label
const NAME_KEYS: &[&str] = &["name", "label", "title"];

/// Parse shutdown periods from a JSON file
pub fn parse_shutdowns_file(path: &Path) -> Result<Vec<ShutdownPeriod>> {
    let json_content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read shutdowns file: {}", path.display()))?;

    parse_shutdowns_str(&json_content)
}

/// Parse shutdown periods from a JSON string
pub fn parse_shutdowns_str(json_str: &str) -> Result<Vec<ShutdownPeriod>> {
    let value: Value = serde_json::from_str(json_str).context("Failed to parse shutdowns JSON")?;

    extract_periods(&value)
}

/// Extract periods from a JSON value
fn extract_periods(payload: &Value) -> Result<Vec<ShutdownPeriod>> {
    let raw_periods =
        find_periods_array(payload).context("Could not find shutdowns array in JSON")?;

    let mut periods = Vec::new();

    for period_value in raw_periods {
        if let Some(period) = parse_period(period_value) {
            // Inverted periods are dropped, matching the tolerate-and-hide
            // policy everywhere else in the engine.
            if period.range.is_valid() {
                periods.push(period);
            }
        }
    }

    Ok(periods)
}

/// Find the array of periods in the JSON payload
fn find_periods_array(payload: &Value) -> Option<&Vec<Value>> {
    // If payload is an object, search for known keys
    if let Some(obj) = payload.as_object() {
        for key in PERIOD_KEYS {
            if let Some(array) = obj.get(*key).and_then(|v| v.as_array()) {
                return Some(array);
            }
        }
        return None;
    }

    // A bare array is accepted too
    payload.as_array()
}

/// Parse a single period object; unusable entries yield `None`
fn parse_period(value: &Value) -> Option<ShutdownPeriod> {
    let obj = value.as_object()?;

    let start = first_date(obj, START_KEYS)?;
    let end = first_date(obj, END_KEYS)?;

    let name = NAME_KEYS
        .iter()
        .find_map(|k| obj.get(*k).and_then(|v| v.as_str()))
        .unwrap_or("Shutdown")
        .to_string();

    Some(ShutdownPeriod {
        name,
        range: DateRange::new(start, end),
    })
}

fn first_date(
    obj: &serde_json::Map<String, Value>,
    keys: &[&str],
) -> Option<chrono::NaiveDate> {
    keys.iter()
        .find_map(|k| obj.get(*k).and_then(|v| v.as_str()))
        .and_then(calendar::parse_iso_date)
}
