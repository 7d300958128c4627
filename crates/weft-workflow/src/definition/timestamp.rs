//! Timestamp parsing for workflow documents.
//!
//! Stored documents carry either RFC 3339 instants or naive ISO 8601
//! datetimes without an offset. Naive values are read as UTC.

use jiff::Timestamp;
use jiff::civil::DateTime;
use jiff::tz::TimeZone;
use serde::Deserialize;
use serde::de::{self, Deserializer};

/// Parses an RFC 3339 instant or a naive ISO 8601 datetime taken as UTC.
pub fn parse_timestamp(raw: &str) -> Result<Timestamp, jiff::Error> {
    raw.parse::<Timestamp>().or_else(|error| {
        raw.parse::<DateTime>()
            .and_then(|naive| naive.to_zoned(TimeZone::UTC))
            .map(|zoned| zoned.timestamp())
            .map_err(|_| error)
    })
}

/// Deserializes an optional timestamp with [`parse_timestamp`].
pub(crate) fn lenient<'de, D>(deserializer: D) -> Result<Option<Timestamp>, D::Error>
where
    D: Deserializer<'de>,
{
    let Some(raw) = Option::<String>::deserialize(deserializer)? else {
        return Ok(None);
    };
    parse_timestamp(&raw).map(Some).map_err(de::Error::custom)
}
