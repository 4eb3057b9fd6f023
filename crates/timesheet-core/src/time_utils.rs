use chrono::{DateTime, NaiveDate, NaiveDateTime, TimeZone, Utc};
use chrono_tz::Tz;
use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::error::{Result, StatsError};

// ── System timezone detection ─────────────────────────────────────────────────

/// Detect the IANA timezone name of the running system.
///
/// Falls back to `"UTC"` if detection fails.
pub fn get_system_timezone() -> String {
    iana_time_zone::get_timezone().unwrap_or_else(|_| "UTC".to_string())
}

/// Resolve a timezone setting into a [`Tz`].
///
/// `"auto"` means the system timezone. Anything else must be a recognised
/// IANA identifier.
pub fn resolve_timezone(name: &str) -> Result<Tz> {
    let resolved = if name.eq_ignore_ascii_case("auto") {
        get_system_timezone()
    } else {
        name.to_string()
    };

    resolved
        .parse::<Tz>()
        .map_err(|_| StatsError::Config(format!("unknown timezone \"{}\"", resolved)))
}

// ── Timestamp parsing ─────────────────────────────────────────────────────────

const MIN_MILLIS_DIGITS: usize = 11;

/// Parse a timestamp as the time-tracking service emits it.
///
/// Accepts epoch milliseconds (the service's native form), RFC 3339 with `Z`
/// or an explicit offset, and naive ISO-8601 date-times or dates which are
/// read as UTC. Returns `None` for empty or unrecognised input.
pub fn parse_timestamp(s: &str) -> Option<DateTime<Utc>> {
    let s = s.trim();
    if s.is_empty() {
        return None;
    }

    // Epoch milliseconds have at least 11 digits for anything after 1973;
    // shorter digit runs are compact dates such as `20240307`.
    if s.bytes().all(|b| b.is_ascii_digit()) && s.len() >= MIN_MILLIS_DIGITS {
        return s.parse::<i64>().ok().and_then(from_millis);
    }

    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Some(dt.with_timezone(&Utc));
    }

    const FMTS: &[&str] = &[
        "%Y-%m-%dT%H:%M:%S%.f",
        "%Y-%m-%dT%H:%M:%S",
        "%Y-%m-%dT%H:%M",
        "%Y-%m-%d %H:%M:%S%.f",
        "%Y-%m-%d %H:%M:%S",
    ];
    for fmt in FMTS {
        if let Ok(naive) = NaiveDateTime::parse_from_str(s, fmt) {
            return Some(Utc.from_utc_datetime(&naive));
        }
    }

    if let Ok(date) = NaiveDate::parse_from_str(s, "%Y-%m-%d")
        .or_else(|_| NaiveDate::parse_from_str(s, "%Y%m%d"))
    {
        return date
            .and_hms_opt(0, 0, 0)
            .map(|naive| Utc.from_utc_datetime(&naive));
    }

    warn!("could not parse timestamp \"{}\"", s);
    None
}

/// Convert epoch milliseconds to a UTC timestamp.
pub fn from_millis(ms: i64) -> Option<DateTime<Utc>> {
    Utc.timestamp_millis_opt(ms).single()
}

/// Timestamps arrive either as strings or as bare integers.
#[derive(Deserialize)]
#[serde(untagged)]
enum RawTimestamp {
    Millis(i64),
    Text(String),
}

impl RawTimestamp {
    fn into_datetime(self) -> Result<DateTime<Utc>> {
        match self {
            RawTimestamp::Millis(ms) => {
                from_millis(ms).ok_or_else(|| StatsError::TimestampParse(ms.to_string()))
            }
            RawTimestamp::Text(text) => {
                parse_timestamp(&text).ok_or(StatsError::TimestampParse(text))
            }
        }
    }
}

/// Serde adapter for required timestamps: RFC 3339 out, anything
/// [`parse_timestamp`] understands in.
pub mod flexible_timestamp {
    use super::*;
    use serde::{Deserializer, Serializer};

    pub fn serialize<S: Serializer>(
        dt: &DateTime<Utc>,
        serializer: S,
    ) -> std::result::Result<S::Ok, S::Error> {
        serializer.serialize_str(&dt.to_rfc3339())
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(
        deserializer: D,
    ) -> std::result::Result<DateTime<Utc>, D::Error> {
        RawTimestamp::deserialize(deserializer)?
            .into_datetime()
            .map_err(serde::de::Error::custom)
    }
}

/// Serde adapter for timestamps that may be absent, `null` or empty
/// (e.g. the end of a running timer).
pub mod optional_timestamp {
    use super::*;
    use serde::{Deserializer, Serializer};

    pub fn serialize<S: Serializer>(
        dt: &Option<DateTime<Utc>>,
        serializer: S,
    ) -> std::result::Result<S::Ok, S::Error> {
        match dt {
            Some(dt) => serializer.serialize_some(&dt.to_rfc3339()),
            None => serializer.serialize_none(),
        }
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(
        deserializer: D,
    ) -> std::result::Result<Option<DateTime<Utc>>, D::Error> {
        match Option::<RawTimestamp>::deserialize(deserializer)? {
            None => Ok(None),
            Some(RawTimestamp::Text(text)) if text.trim().is_empty() => Ok(None),
            Some(raw) => raw.into_datetime().map(Some).map_err(serde::de::Error::custom),
        }
    }
}

// ── Day labels ────────────────────────────────────────────────────────────────

/// How entries are bucketed into days.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum DayKey {
    /// `"Jan 05"`. Carries no year, so the same month/day in different years
    /// share one bucket.
    #[default]
    MonthDay,
    /// `"Jan 05 2024"`.
    Calendar,
}

/// Format the day label an entry starting at `ts` is grouped under.
///
/// Month names are always English three-letter abbreviations and the day is
/// zero-padded, independent of the process locale.
pub fn day_label(ts: DateTime<Utc>, tz: Tz, key: DayKey) -> String {
    let local = ts.with_timezone(&tz);
    match key {
        DayKey::MonthDay => local.format("%b %d").to_string(),
        DayKey::Calendar => local.format("%b %d %Y").to_string(),
    }
}

// ── Tests ──────────────────────────────────────────────────────────────────────
