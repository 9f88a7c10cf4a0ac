use chrono::{DateTime, NaiveDateTime, Utc};

use crate::error::CoreError;

/// All backend primary keys are integer serials.
pub type DbId = i64;

/// All timestamps are UTC.
pub type Timestamp = DateTime<Utc>;

/// Naive timestamp layouts accepted in addition to RFC 3339.
const NAIVE_FORMATS: &[&str] = &["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"];

/// Parse a backend timestamp.
///
/// Accepts RFC 3339 (`2024-01-30T10:00:00+05:30`) and naive ISO 8601
/// (`2024-01-30T10:00:00.123456`). Naive values are taken as UTC.
pub fn parse_timestamp(raw: &str) -> Result<Timestamp, CoreError> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Ok(dt.with_timezone(&Utc));
    }
    NAIVE_FORMATS
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(raw, fmt).ok())
        .map(|naive| naive.and_utc())
        .ok_or_else(|| CoreError::Validation(format!("Invalid timestamp '{raw}'")))
}

/// Serde adapter for [`Timestamp`] fields that tolerates naive values.
///
/// Serializes as RFC 3339.
pub mod lenient_timestamp {
    use serde::{Deserialize, Deserializer, Serializer};

    use super::{parse_timestamp, Timestamp};

    pub fn serialize<S: Serializer>(ts: &Timestamp, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&ts.to_rfc3339())
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Timestamp, D::Error> {
        let raw = String::deserialize(deserializer)?;
        parse_timestamp(&raw).map_err(serde::de::Error::custom)
    }

    /// Same as the parent module for `Option<Timestamp>`; use with
    /// `#[serde(default)]`.
    pub mod option {
        use serde::{Deserialize, Deserializer, Serializer};

        use super::super::{parse_timestamp, Timestamp};

        pub fn serialize<S: Serializer>(
            ts: &Option<Timestamp>,
            serializer: S,
        ) -> Result<S::Ok, S::Error> {
            match ts {
                Some(ts) => serializer.serialize_some(&ts.to_rfc3339()),
                None => serializer.serialize_none(),
            }
        }

        pub fn deserialize<'de, D: Deserializer<'de>>(
            deserializer: D,
        ) -> Result<Option<Timestamp>, D::Error> {
            Option::<String>::deserialize(deserializer)?
                .map(|raw| parse_timestamp(&raw).map_err(serde::de::Error::custom))
                .transpose()
        }
    }
}

#[cfg(test)]
mod tests {
    use chrono::{Datelike, Timelike};

    use super::*;

    #[test]
    fn parses_rfc3339_with_offset() {
        let ts = parse_timestamp("2024-01-30T10:00:00+05:30").unwrap();
        assert_eq!(ts.hour(), 4);
        assert_eq!(ts.minute(), 30);
    }

    #[test]
    fn parses_naive_as_utc() {
        let ts = parse_timestamp("2024-01-30T10:00:00.123456").unwrap();
        assert_eq!(ts.day(), 30);
        assert_eq!(ts.hour(), 10);
    }

    #[test]
    fn parses_naive_with_space_separator() {
        let ts = parse_timestamp("2024-01-30 10:00:00").unwrap();
        assert_eq!(ts.month(), 1);
    }

    #[test]
    fn rejects_garbage() {
        let err = parse_timestamp("yesterday").unwrap_err();
        assert!(err.to_string().contains("Invalid timestamp"));
    }

    #[derive(serde::Deserialize)]
    struct Row {
        #[serde(with = "lenient_timestamp")]
        created_at: Timestamp,
        #[serde(default, with = "lenient_timestamp::option")]
        updated_at: Option<Timestamp>,
    }

    #[test]
    fn optional_timestamp_accepts_null_and_missing() {
        let row: Row =
            serde_json::from_str(r#"{"created_at":"2024-01-30T10:00:00Z","updated_at":null}"#)
                .unwrap();
        assert!(row.updated_at.is_none());

        let row: Row = serde_json::from_str(r#"{"created_at":"2024-01-30T10:00:00"}"#).unwrap();
        assert!(row.updated_at.is_none());
        assert_eq!(row.created_at.year(), 2024);
    }
}
