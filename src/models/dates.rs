//! Wire formats for the dates stored with a trip.
//!
//! Calendar dates are written `MM/DD/YYYY`, creation instants as ISO-8601 UTC
//! with millisecond precision (`2024-03-01T10:00:00.000Z`).

use chrono::{DateTime, NaiveDate, SecondsFormat, Utc};
use serde::{de, Deserialize, Deserializer, Serializer};
use serde_with::{DeserializeAs, SerializeAs};

pub const DISPLAY_DATE_FORMAT: &str = "%m/%d/%Y";
const ISO_DATE_FORMAT: &str = "%Y-%m-%d";

/// Parses either the display format or an ISO date as sent by date inputs.
pub fn parse_calendar_date(raw: &str) -> Option<NaiveDate> {
    let raw = raw.trim();
    NaiveDate::parse_from_str(raw, DISPLAY_DATE_FORMAT)
        .or_else(|_| NaiveDate::parse_from_str(raw, ISO_DATE_FORMAT))
        .ok()
}

pub fn format_calendar_date(date: NaiveDate) -> String {
    date.format(DISPLAY_DATE_FORMAT).to_string()
}

pub fn format_input_date(date: NaiveDate) -> String {
    date.format(ISO_DATE_FORMAT).to_string()
}

pub fn format_timestamp(ts: DateTime<Utc>) -> String {
    ts.to_rfc3339_opts(SecondsFormat::Millis, true)
}

/// `MM/DD/YYYY` on write; `MM/DD/YYYY` or `YYYY-MM-DD` on read.
///
/// Any other spelling (a locale format such as `01.03.2024`) fails the whole
/// array, which the storage layer then reads as an empty collection. The next
/// add writes that empty collection plus the new trip back, dropping every
/// record that was stored before.
pub struct CalendarDate;

impl SerializeAs<NaiveDate> for CalendarDate {
    fn serialize_as<S>(source: &NaiveDate, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.collect_str(&source.format(DISPLAY_DATE_FORMAT))
    }
}

impl<'de> DeserializeAs<'de, NaiveDate> for CalendarDate {
    fn deserialize_as<D>(deserializer: D) -> Result<NaiveDate, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = String::deserialize(deserializer)?;
        parse_calendar_date(&raw)
            .ok_or_else(|| de::Error::custom(format!("invalid calendar date `{raw}`")))
    }
}

pub struct IsoMillis;

impl SerializeAs<DateTime<Utc>> for IsoMillis {
    fn serialize_as<S>(source: &DateTime<Utc>, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&format_timestamp(*source))
    }
}

impl<'de> DeserializeAs<'de, DateTime<Utc>> for IsoMillis {
    fn deserialize_as<D>(deserializer: D) -> Result<DateTime<Utc>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = String::deserialize(deserializer)?;
        DateTime::parse_from_rfc3339(&raw)
            .map(|ts| ts.with_timezone(&Utc))
            .map_err(|err| de::Error::custom(format!("invalid timestamp `{raw}`: {err}")))
    }
}
