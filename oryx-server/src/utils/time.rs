//! Time helpers
//!
//! All persisted timestamps are RFC 3339 in UTC. The order day used for
//! numbering is the UTC calendar day, so a branch near midnight rolls its
//! sequence exactly when the UTC date changes.

use chrono::{DateTime, SecondsFormat, Utc};
use shared::error::{AppError, AppResult};

/// Current UTC time
pub fn now() -> DateTime<Utc> {
    Utc::now()
}

/// Compact day key for the order counter, e.g. "20260830"
pub fn order_day(at: DateTime<Utc>) -> String {
    at.format("%Y%m%d").to_string()
}

/// Render a timestamp in the canonical database form
pub fn to_db(at: DateTime<Utc>) -> String {
    at.to_rfc3339_opts(SecondsFormat::Micros, true)
}

/// Parse a timestamp from its database form
pub fn from_db(raw: &str) -> AppResult<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(raw)
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|e| AppError::database(format!("stored timestamp is not RFC 3339: {raw:?} ({e})")))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_order_day_format() {
        let at = Utc.with_ymd_and_hms(2026, 8, 30, 23, 59, 59).unwrap();
        assert_eq!(order_day(at), "20260830");

        let at = Utc.with_ymd_and_hms(2026, 1, 2, 0, 0, 0).unwrap();
        assert_eq!(order_day(at), "20260102");
    }

    #[test]
    fn test_db_roundtrip() {
        let at = now();
        let parsed = from_db(&to_db(at)).unwrap();
        // micros precision survives the roundtrip
        assert_eq!(parsed.timestamp_micros(), at.timestamp_micros());
    }

    #[test]
    fn test_from_db_rejects_garbage() {
        assert!(from_db("yesterday").is_err());
    }
}
