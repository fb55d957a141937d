//! Visitor contact records.
//!
//! One record per session, captured on the first submission. The persisted
//! timestamp keeps the `YYYY-MM-DD HH:MM:SS` format of the historical
//! `user_data.json` file.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Serde adapter for the `YYYY-MM-DD HH:MM:SS` contact timestamp format.
mod submitted_time {
    use chrono::{DateTime, NaiveDateTime, Utc};
    use serde::{Deserialize, Deserializer, Serializer};

    const FORMAT: &str = "%Y-%m-%d %H:%M:%S";

    pub fn serialize<S>(ts: &DateTime<Utc>, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&ts.format(FORMAT).to_string())
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<DateTime<Utc>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        let naive = NaiveDateTime::parse_from_str(&s, FORMAT).map_err(serde::de::Error::custom)?;
        Ok(naive.and_utc())
    }
}

/// A captured name/number tied to a session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContactRecord {
    pub chat_id: String,
    pub name: String,
    pub number: String,
    #[serde(rename = "timestamp", with = "submitted_time")]
    pub submitted_at: DateTime<Utc>,
}
