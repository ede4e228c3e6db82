// ── Canonical timestamps ──
//
// One textual form in both directions: RFC 3339, UTC, `Z` suffix, with
// fractional seconds only when non-zero (in millisecond, microsecond or
// nanosecond groups). Re-rendering a canonical string is the identity.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Deserialize, Deserializer, Serialize, Serializer};

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Timestamp(DateTime<Utc>);

impl Timestamp {
    pub fn as_datetime(&self) -> &DateTime<Utc> {
        &self.0
    }
}

impl From<DateTime<Utc>> for Timestamp {
    fn from(value: DateTime<Utc>) -> Self {
        Self(value)
    }
}

impl fmt::Display for Timestamp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0.to_rfc3339_opts(SecondsFormat::AutoSi, true))
    }
}

impl FromStr for Timestamp {
    type Err = chrono::ParseError;

    /// Accepts any RFC 3339 offset and normalizes to UTC.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self(DateTime::parse_from_rfc3339(s)?.with_timezone(&Utc)))
    }
}

impl Serialize for Timestamp {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for Timestamp {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        raw.parse().map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn canonical_text_is_stable() {
        for raw in [
            "2024-01-15T10:30:00Z",
            "2024-01-15T10:30:00.123Z",
            "2024-01-15T10:30:00.123456Z",
        ] {
            let ts: Timestamp = raw.parse().unwrap();
            assert_eq!(ts.to_string(), raw);
            let again: Timestamp = ts.to_string().parse().unwrap();
            assert_eq!(again, ts);
        }
    }

    #[test]
    fn offsets_normalize_to_utc() {
        let ts: Timestamp = "2024-01-15T12:30:00+02:00".parse().unwrap();
        assert_eq!(ts.to_string(), "2024-01-15T10:30:00Z");
    }

    #[test]
    fn rejects_non_rfc3339() {
        assert!("15/01/2024".parse::<Timestamp>().is_err());
        assert!("2024-01-15 10:30:00".parse::<Timestamp>().is_err());
    }

    #[test]
    fn serde_uses_canonical_text() {
        let ts: Timestamp = serde_json::from_str("\"2024-01-15T10:30:00.000+00:00\"").unwrap();
        assert_eq!(serde_json::to_string(&ts).unwrap(), "\"2024-01-15T10:30:00Z\"");
    }
}
