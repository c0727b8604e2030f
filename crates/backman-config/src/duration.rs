//! Duration codec for configuration documents
//!
//! A duration field accepts two JSON shapes:
//!
//! - a number, read as nanoseconds (`7200000000000`)
//! - a human-readable string (`"2h"`, `"2h30m"`, `"90s"`)
//!
//! Anything else is rejected with [`Error::InvalidDuration`]. Encoding is
//! asymmetric: durations are always written back as the human-readable
//! string, never as a number.

use std::fmt;
use std::time::Duration;

use serde::{Deserialize, Deserializer, Serialize, Serializer, de};
use serde_json::{Number, Value};

use crate::{Error, Result};

/// Format a duration in its human-readable form, e.g. `"2h 30m"`.
pub fn encode(duration: Duration) -> String {
    humantime::format_duration(duration).to_string()
}

/// Decode a duration from a JSON value.
///
/// Numbers are nanoseconds, strings use duration syntax. Negative values of
/// either shape decode to zero, i.e. "not configured". Every other JSON type
/// fails.
pub fn decode(value: &Value) -> Result<Duration> {
    match value {
        Value::Number(number) => decode_nanos(number),
        Value::String(text) => decode_str(text),
        other => Err(Error::invalid_duration(format!(
            "expected nanoseconds or a duration string, got {}",
            json_kind(other)
        ))),
    }
}

/// Parse a duration string such as `"2h30m"`. A leading `-` yields zero.
pub fn decode_str(text: &str) -> Result<Duration> {
    let trimmed = text.trim();
    let (negative, magnitude) = match trimmed.strip_prefix('-') {
        Some(rest) => (true, rest.trim_start()),
        None => (false, trimmed),
    };
    let parsed = humantime::parse_duration(magnitude)
        .map_err(|e| Error::invalid_duration(format!("'{text}': {e}")))?;
    Ok(if negative { Duration::ZERO } else { parsed })
}

fn decode_nanos(number: &Number) -> Result<Duration> {
    if let Some(nanos) = number.as_u64() {
        return Ok(Duration::from_nanos(nanos));
    }
    match number.as_f64() {
        Some(nanos) if nanos.is_finite() => Ok(Duration::from_nanos(nanos.max(0.0) as u64)),
        _ => Err(Error::invalid_duration(format!(
            "{number} is not a number of nanoseconds"
        ))),
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

/// Serde adapter for `Duration` fields, for use with `#[serde(with = "...")]`.
pub mod human {
    use super::*;

    pub fn serialize<S: Serializer>(duration: &Duration, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.serialize_str(&encode(*duration))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Duration, D::Error> {
        let value = Value::deserialize(deserializer)?;
        decode(&value).map_err(de::Error::custom)
    }
}

/// A configured timeout. Zero means "not configured".
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct TimeoutDuration(pub Duration);

impl TimeoutDuration {
    /// Shortest timeout that counts as explicitly configured.
    pub const THRESHOLD: Duration = Duration::from_secs(1);

    pub fn as_duration(&self) -> Duration {
        self.0
    }

    /// Whether this timeout is long enough to override a fallback.
    pub fn is_present(&self) -> bool {
        self.0 > Self::THRESHOLD
    }
}

impl From<Duration> for TimeoutDuration {
    fn from(duration: Duration) -> Self {
        Self(duration)
    }
}

impl fmt::Display for TimeoutDuration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&encode(self.0))
    }
}

impl Serialize for TimeoutDuration {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        human::serialize(&self.0, serializer)
    }
}

impl<'de> Deserialize<'de> for TimeoutDuration {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        human::deserialize(deserializer).map(Self)
    }
}
