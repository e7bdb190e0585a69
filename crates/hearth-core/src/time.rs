//! Timestamp coercion for loosely-typed document fields.

use chrono::{DateTime, TimeZone, Utc};
use serde_json::Value;

/// Coerce a document timestamp-like value into a UTC datetime.
///
/// Accepts an RFC 3339 string, an epoch-seconds number, or a Firestore-style
/// map carrying a `seconds`/`_seconds` field. Anything else (including
/// absence) falls back to the current time, matching the source documents'
/// best-effort timestamps.
pub fn coerce_timestamp(value: Option<&Value>) -> DateTime<Utc> {
    match value {
        Some(Value::String(s)) => DateTime::parse_from_rfc3339(s)
            .map(|dt| dt.with_timezone(&Utc))
            .unwrap_or_else(|_| Utc::now()),
        Some(Value::Number(n)) => n
            .as_i64()
            .and_then(|secs| Utc.timestamp_opt(secs, 0).single())
            .unwrap_or_else(Utc::now),
        Some(Value::Object(map)) => map
            .get("seconds")
            .or_else(|| map.get("_seconds"))
            .and_then(Value::as_i64)
            .and_then(|secs| Utc.timestamp_opt(secs, 0).single())
            .unwrap_or_else(Utc::now),
        _ => Utc::now(),
    }
}

/// Format a datetime the way graph properties store it.
pub fn format_timestamp(dt: &DateTime<Utc>) -> String {
    dt.to_rfc3339()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_rfc3339_string() {
        let v = json!("2026-03-01T10:30:00Z");
        let dt = coerce_timestamp(Some(&v));
        assert_eq!(dt.timestamp(), 1772361000);
    }

    #[test]
    fn test_epoch_seconds_number() {
        let v = json!(1772361000);
        let dt = coerce_timestamp(Some(&v));
        assert_eq!(dt.timestamp(), 1772361000);
    }

    #[test]
    fn test_firestore_seconds_map() {
        let v = json!({"_seconds": 1772361000, "_nanoseconds": 0});
        let dt = coerce_timestamp(Some(&v));
        assert_eq!(dt.timestamp(), 1772361000);

        let v = json!({"seconds": 1772361000});
        let dt = coerce_timestamp(Some(&v));
        assert_eq!(dt.timestamp(), 1772361000);
    }

    #[test]
    fn test_garbage_falls_back_to_now() {
        let before = Utc::now();
        let v = json!("not a timestamp");
        let dt = coerce_timestamp(Some(&v));
        assert!(dt >= before);

        let dt = coerce_timestamp(None);
        assert!(dt >= before);
    }
}
