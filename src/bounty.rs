//! Bounty records as exchanged with the bounty API

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

pub const STATUS_ACTIVE: &str = "active";
pub const STATUS_FILLED: &str = "filled";

/// A bounty as reported by the remote API.
///
/// Decoding is lenient: `null` scalars take their default, numeric ids are
/// stringified and timestamps may be date-only or epoch milliseconds.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Bounty {
    #[serde(deserialize_with = "lenient::id")]
    pub id: String,
    #[serde(default, deserialize_with = "lenient::null_as_default")]
    pub title: String,
    #[serde(default, deserialize_with = "lenient::null_as_default")]
    pub description: String,
    #[serde(default, deserialize_with = "lenient::null_as_default")]
    pub value: f64,
    #[serde(default, deserialize_with = "lenient::null_as_default")]
    pub bounty_score: f64,
    #[serde(default, deserialize_with = "lenient::null_as_default")]
    pub creating_username: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub filling_user_id: Option<String>,
    /// When the bounty was claimed
    #[serde(
        default,
        deserialize_with = "lenient::timestamp",
        skip_serializing_if = "Option::is_none"
    )]
    pub filled: Option<DateTime<Utc>>,
    /// Set once the bounty has been announced
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tweet_id: Option<String>,
    #[serde(
        default,
        deserialize_with = "lenient::timestamp",
        skip_serializing_if = "Option::is_none"
    )]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(
        default,
        deserialize_with = "lenient::timestamp",
        skip_serializing_if = "Option::is_none"
    )]
    pub updated_at: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tags: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub requirements: Option<String>,
    #[serde(
        default,
        deserialize_with = "lenient::timestamp",
        skip_serializing_if = "Option::is_none"
    )]
    pub deadline: Option<DateTime<Utc>>,
}

impl Bounty {
    /// Title, description, positive value, and a deadline (if any) after `now`
    pub fn is_available_at(&self, now: DateTime<Utc>) -> bool {
        !self.title.is_empty()
            && !self.description.is_empty()
            && self.value > 0.0
            && self.deadline.map_or(true, |deadline| deadline > now)
    }

    /// Not yet announced externally; an empty tweet ID counts as none
    pub fn is_unposted(&self) -> bool {
        self.tweet_id.as_deref().map_or(true, str::is_empty)
    }

    pub fn is_filled(&self) -> bool {
        self.filled.is_some() || self.status.as_deref() == Some(STATUS_FILLED)
    }
}

mod lenient {
    use chrono::{DateTime, NaiveDate, NaiveDateTime, TimeZone, Utc};
    use serde::de::Error;
    use serde::{Deserialize, Deserializer};

    pub fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
    where
        D: Deserializer<'de>,
        T: Default + Deserialize<'de>,
    {
        Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
    }

    #[derive(Deserialize)]
    #[serde(untagged)]
    enum RawId {
        Text(String),
        Number(serde_json::Number),
    }

    pub fn id<'de, D>(deserializer: D) -> Result<String, D::Error>
    where
        D: Deserializer<'de>,
    {
        Ok(match RawId::deserialize(deserializer)? {
            RawId::Text(id) => id,
            RawId::Number(id) => id.to_string(),
        })
    }

    #[derive(Deserialize)]
    #[serde(untagged)]
    enum RawTimestamp {
        Text(String),
        Millis(i64),
    }

    pub fn timestamp<'de, D>(deserializer: D) -> Result<Option<DateTime<Utc>>, D::Error>
    where
        D: Deserializer<'de>,
    {
        match Option::<RawTimestamp>::deserialize(deserializer)? {
            None => Ok(None),
            Some(RawTimestamp::Millis(ms)) => Utc
                .timestamp_millis_opt(ms)
                .single()
                .map(Some)
                .ok_or_else(|| D::Error::custom(format!("timestamp out of range: {}", ms))),
            Some(RawTimestamp::Text(text)) if text.trim().is_empty() => Ok(None),
            Some(RawTimestamp::Text(text)) => parse_timestamp(&text)
                .map(Some)
                .ok_or_else(|| D::Error::custom(format!("invalid timestamp: {}", text))),
        }
    }

    /// RFC 3339, a zoneless date-time (read as UTC), or a bare date at midnight UTC
    pub fn parse_timestamp(text: &str) -> Option<DateTime<Utc>> {
        let text = text.trim();
        if let Ok(dt) = DateTime::parse_from_rfc3339(text) {
            return Some(dt.with_timezone(&Utc));
        }
        if let Ok(naive) = NaiveDateTime::parse_from_str(text, "%Y-%m-%dT%H:%M:%S%.f") {
            return Some(Utc.from_utc_datetime(&naive));
        }
        NaiveDate::parse_from_str(text, "%Y-%m-%d")
            .ok()
            .and_then(|date| date.and_hms_opt(0, 0, 0))
            .map(|naive| Utc.from_utc_datetime(&naive))
    }
}

/// Partial bounty, used as the create and update payload.
///
/// Unset fields are left out of the JSON body.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BountyPatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub value: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bounty_score: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub creating_username: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub filling_user_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub filled: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tweet_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tags: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub requirements: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub deadline: Option<DateTime<Utc>>,
}

impl BountyPatch {
    /// Minimal create payload
    pub fn new(title: impl Into<String>, description: impl Into<String>, value: f64) -> Self {
        Self {
            title: Some(title.into()),
            description: Some(description.into()),
            value: Some(value),
            ..Default::default()
        }
    }

    /// Patch that claims a bounty for `filling_user_id`
    pub fn filled_by(filling_user_id: impl Into<String>, at: DateTime<Utc>) -> Self {
        Self {
            filling_user_id: Some(filling_user_id.into()),
            filled: Some(at),
            status: Some(STATUS_FILLED.to_string()),
            ..Default::default()
        }
    }

    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }

    /// Names of the required create fields that are missing or empty
    pub fn missing_required_fields(&self) -> Vec<&'static str> {
        let mut missing = Vec::new();
        if self.title.as_deref().map_or(true, str::is_empty) {
            missing.push("title");
        }
        if self.description.as_deref().map_or(true, str::is_empty) {
            missing.push("description");
        }
        if !self.value.map_or(false, |v| v.is_finite() && v > 0.0) {
            missing.push("value");
        }
        missing
    }
}
