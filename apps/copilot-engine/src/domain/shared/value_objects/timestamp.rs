//! Timestamp value object for temporal data.

use chrono::{DateTime, SecondsFormat, SubsecRound, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// A UTC wall-clock timestamp.
///
/// Serialized as ISO 8601 with millisecond precision and a `Z` suffix,
/// e.g. `2026-10-18T12:00:00.000Z`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(into = "String", try_from = "String")]
pub struct Timestamp(DateTime<Utc>);

impl Timestamp {
    /// Create a new Timestamp from a DateTime<Utc>.
    #[must_use]
    pub const fn new(dt: DateTime<Utc>) -> Self {
        Self(dt)
    }

    /// Get the current timestamp, truncated to whole milliseconds so it
    /// survives a round trip through its string form.
    #[must_use]
    pub fn now() -> Self {
        Self(Utc::now().trunc_subsecs(3))
    }

    /// Parse from an ISO 8601 string.
    ///
    /// # Errors
    ///
    /// Returns error if the string is not a valid ISO 8601 timestamp.
    pub fn parse(s: &str) -> Result<Self, chrono::ParseError> {
        let dt = DateTime::parse_from_rfc3339(s)?;
        Ok(Self(dt.with_timezone(&Utc)))
    }

    /// Get the inner DateTime<Utc>.
    #[must_use]
    pub const fn as_datetime(&self) -> DateTime<Utc> {
        self.0
    }

    /// Format as ISO 8601 with milliseconds and `Z`.
    #[must_use]
    pub fn to_iso_string(&self) -> String {
        self.0.to_rfc3339_opts(SecondsFormat::Millis, true)
    }

    /// Timestamp shifted by `duration`, clamped to the representable range.
    #[must_use]
    pub fn plus(&self, duration: chrono::Duration) -> Self {
        self.0.checked_add_signed(duration).map_or_else(
            || {
                if duration < chrono::Duration::zero() {
                    Self(DateTime::<Utc>::MIN_UTC)
                } else {
                    Self(DateTime::<Utc>::MAX_UTC)
                }
            },
            Self,
        )
    }

    /// Calculate duration since another timestamp.
    #[must_use]
    pub fn duration_since(&self, other: Self) -> chrono::Duration {
        self.0 - other.0
    }
}

impl Default for Timestamp {
    fn default() -> Self {
        Self::now()
    }
}

impl fmt::Display for Timestamp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_iso_string())
    }
}

impl From<DateTime<Utc>> for Timestamp {
    fn from(dt: DateTime<Utc>) -> Self {
        Self(dt)
    }
}

impl From<Timestamp> for String {
    fn from(ts: Timestamp) -> Self {
        ts.to_iso_string()
    }
}

impl TryFrom<String> for Timestamp {
    type Error = chrono::ParseError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn iso_string_has_millis_and_z() {
        let ts = Timestamp::parse("2026-10-18T12:00:00Z").unwrap();
        assert_eq!(ts.to_iso_string(), "2026-10-18T12:00:00.000Z");
    }

    #[test]
    fn now_roundtrips_through_string() {
        let ts = Timestamp::now();
        assert_eq!(Timestamp::parse(&ts.to_iso_string()).unwrap(), ts);
    }

    #[test]
    fn parse_invalid() {
        assert!(Timestamp::parse("not-a-date").is_err());
    }

    #[test]
    fn plus_minutes() {
        let ts = Timestamp::parse("2026-10-18T12:00:00Z").unwrap();
        let later = ts.plus(chrono::Duration::minutes(5));
        assert_eq!(later.to_iso_string(), "2026-10-18T12:05:00.000Z");
        assert_eq!(later.duration_since(ts).num_seconds(), 300);
    }

    #[test]
    fn plus_saturates_instead_of_overflowing() {
        let ts = Timestamp::parse("2026-10-18T12:00:00Z").unwrap();
        assert_eq!(ts.plus(chrono::Duration::MAX), Timestamp::new(DateTime::<Utc>::MAX_UTC));
        assert_eq!(ts.plus(chrono::Duration::MIN), Timestamp::new(DateTime::<Utc>::MIN_UTC));
    }

    #[test]
    fn ordering() {
        let ts1 = Timestamp::parse("2026-10-18T12:00:00Z").unwrap();
        let ts2 = Timestamp::parse("2026-10-18T13:00:00Z").unwrap();
        assert!(ts1 < ts2);
    }

    #[test]
    fn serde_uses_iso_string() {
        let ts = Timestamp::parse("2026-10-18T12:00:00.250Z").unwrap();
        let json = serde_json::to_string(&ts).unwrap();
        assert_eq!(json, "\"2026-10-18T12:00:00.250Z\"");

        let parsed: Timestamp = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, ts);
    }

    #[test]
    fn serde_rejects_garbage() {
        assert!(serde_json::from_str::<Timestamp>("\"yesterday\"").is_err());
    }
}
