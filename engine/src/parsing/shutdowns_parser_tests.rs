use chrono::NaiveDate;

use crate::parsing::shutdowns_parser::parse_shutdowns_str;

fn d(y: i32, m: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, day).unwrap()
}

#[test]
fn parses_canonical_format() {
    let json = r#"{
        "shutdowns": [
            { "name": "Christmas shutdown", "start": "2025-12-19", "end": "2026-01-05" },
            { "name": "Easter break", "start": "2025-04-18", "end": "2025-04-21" }
        ]
    }"#;

    let periods = parse_shutdowns_str(json).unwrap();
    assert_eq!(periods.len(), 2);
    assert_eq!(periods[0].name, "Christmas shutdown");
    assert_eq!(periods[0].range.start, d(2025, 12, 19));
    assert_eq!(periods[1].range.end, d(2025, 4, 21));
}

#[test]
fn accepts_alternate_keys_and_bare_arrays() {
    let wrapped = r#"{
        "shutdownPeriods": [
            { "label": "Site holiday", "startDate": "2025-07-01", "endDate": "2025-07-04" }
        ]
    }"#;
    let periods = parse_shutdowns_str(wrapped).unwrap();
    assert_eq!(periods.len(), 1);
    assert_eq!(periods[0].name, "Site holiday");

    let bare = r#"[ { "from": "2025-07-01", "to": "2025-07-04" } ]"#;
    let periods = parse_shutdowns_str(bare).unwrap();
    assert_eq!(periods.len(), 1);
    assert_eq!(periods[0].name, "Shutdown");
}

#[test]
fn drops_unusable_entries() {
    let json = r#"{
        "shutdowns": [
            { "name": "Fine", "start": "2025-12-19", "end": "2026-01-05" },
            { "name": "Inverted", "start": "2026-01-05", "end": "2025-12-19" },
            { "name": "No dates" },
            { "name": "Bad date", "start": "yesterday", "end": "2025-12-19" }
        ]
    }"#;

    let periods = parse_shutdowns_str(json).unwrap();
    assert_eq!(periods.len(), 1);
    assert_eq!(periods[0].name, "Fine");
}

#[test]
fn missing_array_is_an_error() {
    assert!(parse_shutdowns_str(r#"{"holidays": []}"#).is_err());
    assert!(parse_shutdowns_str("[]").unwrap().is_empty());
}
