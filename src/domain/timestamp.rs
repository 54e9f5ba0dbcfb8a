//! UTC timestamps with a sortable text encoding.

use chrono::{DateTime, NaiveDateTime, TimeZone, Utc};
use serde::{Deserialize, Serialize};

/// Storage format: fixed width, so text order equals time order.
const DB_FORMAT: &str = "%Y-%m-%d %H:%M:%S%.6f";

/// A point in time, always UTC.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Timestamp(pub DateTime<Utc>);

impl Timestamp {
    /// Current wall-clock time.
    pub fn now() -> Self {
        Timestamp(Utc::now())
    }

    /// Encode for a TEXT column.
    pub fn to_db_string(&self) -> String {
        self.0.format(DB_FORMAT).to_string()
    }

    /// Decode a value written by [`Timestamp::to_db_string`].
    pub fn from_db_str(s: &str) -> Option<Self> {
        NaiveDateTime::parse_from_str(s, DB_FORMAT)
            .ok()
            .map(|naive| Timestamp(Utc.from_utc_datetime(&naive)))
    }

    /// Parse a timestamp found in legacy data.
    ///
    /// Accepts RFC 3339 and `YYYY-MM-DD HH:MM:SS[.f][+HH:MM]`; values without
    /// an offset are taken as UTC.
    pub fn parse_lenient(s: &str) -> Option<Self> {
        let s = s.trim();
        if s.is_empty() {
            return None;
        }
        if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
            return Some(Timestamp(dt.with_timezone(&Utc)));
        }
        if let Ok(dt) = DateTime::parse_from_str(s, "%Y-%m-%d %H:%M:%S%.f%:z") {
            return Some(Timestamp(dt.with_timezone(&Utc)));
        }
        ["%Y-%m-%d %H:%M:%S%.f", "%Y-%m-%dT%H:%M:%S%.f"]
            .iter()
            .find_map(|fmt| NaiveDateTime::parse_from_str(s, fmt).ok())
            .map(|naive| Timestamp(Utc.from_utc_datetime(&naive)))
    }
}

impl Default for Timestamp {
    fn default() -> Self {
        Timestamp(DateTime::<Utc>::UNIX_EPOCH)
    }
}

impl std::fmt::Display for Timestamp {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0.to_rfc3339())
    }
}
