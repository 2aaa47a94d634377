use chrono::{DateTime, FixedOffset, NaiveDate, SecondsFormat, Utc};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

/// A server timestamp such as `created_time`.
///
/// Accepts any RFC 3339 form and always encodes as UTC with millisecond
/// precision and a `Z` suffix, which is what the service emits.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Timestamp(pub DateTime<Utc>);

impl Timestamp {
    pub fn to_rfc3339(&self) -> String {
        self.0.to_rfc3339_opts(SecondsFormat::Millis, true)
    }
}

impl From<DateTime<Utc>> for Timestamp {
    fn from(value: DateTime<Utc>) -> Self {
        Timestamp(value)
    }
}

impl fmt::Display for Timestamp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_rfc3339())
    }
}

impl Serialize for Timestamp {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_rfc3339())
    }
}

impl<'de> Deserialize<'de> for Timestamp {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        DateTime::parse_from_rfc3339(&raw)
            .map(|dt| Timestamp(dt.with_timezone(&Utc)))
            .map_err(|e| serde::de::Error::custom(format!("invalid timestamp `{}`: {}", raw, e)))
    }
}

/// How a date-time spelled a zero UTC offset on the wire.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OffsetStyle {
    /// `+00:00`, as date properties use.
    #[default]
    Numeric,
    /// `Z`
    Zulu,
}

/// Either a calendar date or a date with time and offset.
///
/// Date-times are re-encoded with millisecond precision and the offset
/// spelled the way it was received.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DateOrDateTime {
    Date(NaiveDate),
    DateTime(DateTime<FixedOffset>, OffsetStyle),
}

impl DateOrDateTime {
    pub fn to_wire(&self) -> String {
        match self {
            DateOrDateTime::Date(date) => date.format("%Y-%m-%d").to_string(),
            DateOrDateTime::DateTime(dt, style) => {
                dt.to_rfc3339_opts(SecondsFormat::Millis, *style == OffsetStyle::Zulu)
            }
        }
    }
}

impl fmt::Display for DateOrDateTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_wire())
    }
}

impl Serialize for DateOrDateTime {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_wire())
    }
}

impl<'de> Deserialize<'de> for DateOrDateTime {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        if let Ok(dt) = DateTime::parse_from_rfc3339(&raw) {
            let style = if raw.ends_with(['Z', 'z']) {
                OffsetStyle::Zulu
            } else {
                OffsetStyle::Numeric
            };
            return Ok(DateOrDateTime::DateTime(dt, style));
        }
        NaiveDate::parse_from_str(&raw, "%Y-%m-%d")
            .map(DateOrDateTime::Date)
            .map_err(|_| serde::de::Error::custom(format!("invalid date `{}`", raw)))
    }
}

/// A date property payload: a start, an optional end and an optional zone.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DateRange {
    pub start: DateOrDateTime,
    pub end: Option<DateOrDateTime>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub time_zone: Option<String>,
}

impl DateRange {
    pub fn on(date: NaiveDate) -> Self {
        Self {
            start: DateOrDateTime::Date(date),
            end: None,
            time_zone: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_timestamp_normalizes_to_millis_z() {
        let ts: Timestamp = serde_json::from_str("\"2021-07-31T17:01:00+00:00\"").unwrap();
        assert_eq!(
            serde_json::to_string(&ts).unwrap(),
            "\"2021-07-31T17:01:00.000Z\""
        );

        let ts: Timestamp = serde_json::from_str("\"2021-10-25T18:39:28.188000+00:00\"").unwrap();
        assert_eq!(ts.to_string(), "2021-10-25T18:39:28.188Z");
    }

    #[test]
    fn test_date_or_datetime() {
        let d: DateOrDateTime = serde_json::from_str("\"2021-07-15\"").unwrap();
        assert!(matches!(d, DateOrDateTime::Date(_)));
        assert_eq!(d.to_wire(), "2021-07-15");

        let d: DateOrDateTime =
            serde_json::from_str("\"2021-07-15T00:00:00.000+02:00\"").unwrap();
        assert!(matches!(d, DateOrDateTime::DateTime(_, OffsetStyle::Numeric)));
        assert_eq!(d.to_wire(), "2021-07-15T00:00:00.000+02:00");

        let d: DateOrDateTime = serde_json::from_str("\"2021-07-15T00:00:00.000+00:00\"").unwrap();
        assert_eq!(d.to_wire(), "2021-07-15T00:00:00.000+00:00");

        assert!(serde_json::from_str::<DateOrDateTime>("\"15/07/2021\"").is_err());
    }

    #[test]
    fn test_zulu_datetime_keeps_its_offset_spelling() {
        let d: DateOrDateTime = serde_json::from_str("\"2021-10-25T17:39:00.000Z\"").unwrap();
        assert!(matches!(d, DateOrDateTime::DateTime(_, OffsetStyle::Zulu)));
        assert_eq!(serde_json::to_string(&d).unwrap(), "\"2021-10-25T17:39:00.000Z\"");

        let d: DateOrDateTime = serde_json::from_str("\"2021-10-25T17:39:00Z\"").unwrap();
        assert_eq!(d.to_wire(), "2021-10-25T17:39:00.000Z");
    }

    #[test]
    fn test_date_range_round_trip() {
        let raw = r#"{"start":"2021-07-15","end":null}"#;
        let range: DateRange = serde_json::from_str(raw).unwrap();
        assert_eq!(serde_json::to_string(&range).unwrap(), raw);

        let raw = r#"{"start":"2021-07-15","end":"2021-07-20","time_zone":"Europe/Dublin"}"#;
        let range: DateRange = serde_json::from_str(raw).unwrap();
        assert_eq!(range.time_zone.as_deref(), Some("Europe/Dublin"));
        assert_eq!(serde_json::to_string(&range).unwrap(), raw);
    }
}
