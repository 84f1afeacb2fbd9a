use chrono::{TimeZone, Utc};
use mautic::datetime::{format_datetime, parse_datetime};
use mautic::error::ParseErrorKind;

#[test]
fn parses_utc_offset() {
    let parsed = parse_datetime("2016-05-24T19:23:25+00:00").expect("valid date");
    assert_eq!(parsed, Utc.with_ymd_and_hms(2016, 5, 24, 19, 23, 25).unwrap());
}

#[test]
fn converts_non_utc_offsets_to_utc() {
    let parsed = parse_datetime("2016-05-24T16:23:25-03:00").expect("valid date");
    assert_eq!(parsed, Utc.with_ymd_and_hms(2016, 5, 24, 19, 23, 25).unwrap());
}

#[test]
fn accepts_zulu_suffix() {
    let parsed = parse_datetime("2016-05-24T19:23:25Z").expect("valid date");
    assert_eq!(parsed, Utc.with_ymd_and_hms(2016, 5, 24, 19, 23, 25).unwrap());
}

#[test]
fn rejects_date_without_time() {
    let err = parse_datetime("2016-05-24").expect_err("date-only must fail");
    assert_eq!(err.kind, ParseErrorKind::MalformedResponse);
    assert!(err.message.contains("2016-05-24"));
}

#[test]
fn rejects_non_iso_text() {
    let err = parse_datetime("May 24th, 2016").expect_err("prose must fail");
    assert_eq!(err.kind, ParseErrorKind::MalformedResponse);
}

#[test]
fn formats_with_numeric_offset() {
    let value = Utc.with_ymd_and_hms(2016, 5, 24, 19, 23, 25).unwrap();
    assert_eq!(format_datetime(&value), "2016-05-24T19:23:25+00:00");
}
