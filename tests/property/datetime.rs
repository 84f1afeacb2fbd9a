use chrono::{TimeZone, Utc};
use mautic::datetime::{format_datetime, parse_datetime};
use proptest::prelude::*;

proptest! {
    /// Formatting then parsing any second-precision timestamp is lossless.
    #[test]
    fn format_then_parse_round_trips(secs in 0i64..4_102_444_800) {
        let value = Utc.timestamp_opt(secs, 0).single().expect("in range");
        let formatted = format_datetime(&value);
        let parsed = parse_datetime(&formatted).expect("own output must parse");
        prop_assert_eq!(parsed, value);
    }

    /// Random text without a 'T' separator never parses as a date-time.
    #[test]
    fn non_iso_text_is_rejected(input in "[a-zA-Z ,/]{1,30}") {
        prop_assert!(parse_datetime(&input).is_err());
    }
}
