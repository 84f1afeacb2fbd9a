//! ISO-8601 date-time codec for API timestamps.
//!
//! Mautic returns timestamps as ISO-8601 strings with an explicit offset
//! ("2016-05-24T19:23:25+00:00"). Parsing converts them to UTC; formatting
//! produces the same profile for outbound request bodies. No host locale or
//! timezone is consulted.

use chrono::{DateTime, SecondsFormat, Utc};

use crate::error::{ParseError, ParseErrorKind};

/// Parse an ISO-8601 date-time string with offset into a UTC timestamp.
///
/// # Errors
///
/// Returns a [`ParseErrorKind::MalformedResponse`] error if the input does
/// not match the ISO-8601 date-time grammar.
pub fn parse_datetime(input: &str) -> Result<DateTime<Utc>, ParseError> {
    DateTime::parse_from_rfc3339(input)
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|e| ParseError {
            kind: ParseErrorKind::MalformedResponse,
            message: format!("invalid ISO-8601 date-time '{}': {}", input, e),
            path: None,
        })
}

/// Format a timestamp as ISO-8601 with a numeric offset, seconds precision.
pub fn format_datetime(value: &DateTime<Utc>) -> String {
    value.to_rfc3339_opts(SecondsFormat::Secs, false)
}

/// Serde adapter for optional timestamp fields.
///
/// Absent keys and explicit nulls both map to `None`; anything else must be
/// a valid ISO-8601 string.
pub mod optional {
    use chrono::{DateTime, Utc};
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(
        value: &Option<DateTime<Utc>>,
        serializer: S,
    ) -> Result<S::Ok, S::Error> {
        match value {
            Some(dt) => serializer.serialize_str(&super::format_datetime(dt)),
            None => serializer.serialize_none(),
        }
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(
        deserializer: D,
    ) -> Result<Option<DateTime<Utc>>, D::Error> {
        match Option::<String>::deserialize(deserializer)? {
            None => Ok(None),
            Some(s) => super::parse_datetime(&s)
                .map(Some)
                .map_err(serde::de::Error::custom),
        }
    }
}
