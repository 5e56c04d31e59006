//! Serde adapter for the next-billing date. `None` is the "not applicable"
//! sentinel and is stored as an em dash.

use chrono::NaiveDate;
use serde::{Deserialize, Deserializer, Serializer};

pub const NOT_APPLICABLE: &str = "—";
pub const DATE_FORMAT: &str = "%Y-%m-%d";

pub fn serialize<S: Serializer>(value: &Option<NaiveDate>, serializer: S) -> Result<S::Ok, S::Error> {
    match value {
        Some(date) => serializer.collect_str(&date.format(DATE_FORMAT)),
        None => serializer.serialize_str(NOT_APPLICABLE),
    }
}

pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<NaiveDate>, D::Error> {
    let raw = Option::<String>::deserialize(deserializer)?.unwrap_or_default();
    let trimmed = raw.trim();
    if trimmed.is_empty() || trimmed == NOT_APPLICABLE {
        return Ok(None);
    }

    NaiveDate::parse_from_str(trimmed, DATE_FORMAT)
        .map(Some)
        .map_err(serde::de::Error::custom)
}

pub fn display(value: Option<NaiveDate>) -> String {
    match value {
        Some(date) => date.format(DATE_FORMAT).to_string(),
        None => NOT_APPLICABLE.to_string(),
    }
}
