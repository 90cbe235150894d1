//! Timestamp normalization.
//!
//! Slack encodes instants as numeric strings of seconds since the epoch
//! (e.g. `"1700000000.123456"`). This module rewrites every field that
//! looks like such a timestamp into an ISO-8601 instant, leaving everything
//! else untouched. The value predicate rejects non-numeric strings, which
//! makes the transform idempotent: an already-converted ISO string never
//! matches a second time.

use chrono::{DateTime, SecondsFormat};
use serde_json::Value;

/// Field names treated as timestamps by exact match.
const TIMESTAMP_KEYS: &[&str] = &["ts", "timestamp"];

/// Field name suffix treated as a timestamp (covers `thread_ts`,
/// `latest_ts`, `event_ts`, ...).
const TIMESTAMP_SUFFIX: &str = "_ts";

/// Whether a field name follows the timestamp naming convention.
fn is_timestamp_key(key: &str) -> bool {
    TIMESTAMP_KEYS.contains(&key) || key.ends_with(TIMESTAMP_SUFFIX)
}

/// Whether a string matches `^\d+(\.\d+)?$`.
fn is_epoch_seconds(raw: &str) -> bool {
    let (secs, frac) = match raw.split_once('.') {
        Some((secs, frac)) => (secs, Some(frac)),
        None => (raw, None),
    };

    if secs.is_empty() || !secs.bytes().all(|b| b.is_ascii_digit()) {
        return false;
    }
    match frac {
        Some(frac) => !frac.is_empty() && frac.bytes().all(|b| b.is_ascii_digit()),
        None => true,
    }
}

/// Convert an epoch-seconds string to an RFC-3339 instant with millisecond
/// precision. Returns `None` for values out of chrono's representable range.
fn to_iso_instant(raw: &str) -> Option<String> {
    let (secs, nanos) = match raw.split_once('.') {
        None => (raw.parse::<i64>().ok()?, 0u32),
        Some((secs, frac)) => {
            let secs = secs.parse::<i64>().ok()?;
            let mut digits: String = frac.chars().take(9).collect();
            while digits.len() < 9 {
                digits.push('0');
            }
            (secs, digits.parse::<u32>().ok()?)
        }
    };

    let instant = DateTime::from_timestamp(secs, nanos)?;
    Some(instant.to_rfc3339_opts(SecondsFormat::Millis, true))
}

/// Recursively rewrite timestamp fields into ISO-8601 instants.
///
/// Arrays are mapped element-wise, objects field-wise; scalars pass through
/// unchanged. A field is rewritten only when its name matches the timestamp
/// convention and its value is a numeric epoch-seconds string; malformed
/// values are left as-is rather than failing the whole response.
pub fn normalize_timestamps(value: Value) -> Value {
    match value {
        Value::Array(items) => {
            Value::Array(items.into_iter().map(normalize_timestamps).collect())
        }
        Value::Object(map) => Value::Object(
            map.into_iter()
                .map(|(key, value)| {
                    let value = match value {
                        Value::String(raw) if is_timestamp_key(&key) && is_epoch_seconds(&raw) => {
                            match to_iso_instant(&raw) {
                                Some(iso) => Value::String(iso),
                                None => Value::String(raw),
                            }
                        }
                        other => normalize_timestamps(other),
                    };
                    (key, value)
                })
                .collect(),
        ),
        other => other,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_converts_ts_field() {
        let input = json!({"ts": "1700000000.123456"});
        let output = normalize_timestamps(input);
        assert_eq!(output["ts"], "2023-11-14T22:13:20.123Z");
    }

    #[test]
    fn test_converts_whole_seconds() {
        let input = json!({"timestamp": "1700000000"});
        let output = normalize_timestamps(input);
        assert_eq!(output["timestamp"], "2023-11-14T22:13:20.000Z");
    }

    #[test]
    fn test_converts_suffix_keys() {
        let input = json!({"thread_ts": "1700000000.000100", "latest_ts": "1700000001"});
        let output = normalize_timestamps(input);
        assert_eq!(output["thread_ts"], "2023-11-14T22:13:20.000Z");
        assert_eq!(output["latest_ts"], "2023-11-14T22:13:21.000Z");
    }

    #[test]
    fn test_leaves_non_numeric_untouched() {
        let input = json!({"ts": "not-a-number", "thread_ts": "2023-11-14T22:13:20.123Z"});
        let output = normalize_timestamps(input.clone());
        assert_eq!(output, input);
    }

    #[test]
    fn test_leaves_other_keys_untouched() {
        let input = json!({"text": "1700000000", "user": "U123"});
        let output = normalize_timestamps(input.clone());
        assert_eq!(output, input);
    }

    #[test]
    fn test_non_string_timestamp_value_untouched() {
        let input = json!({"ts": 1700000000, "event_ts": null});
        let output = normalize_timestamps(input.clone());
        assert_eq!(output, input);
    }

    #[test]
    fn test_recurses_into_arrays_and_objects() {
        let input = json!({
            "messages": [
                {"ts": "1700000000.000001", "text": "hi"},
                {"reply": {"ts": "1700000000.500000"}}
            ]
        });
        let output = normalize_timestamps(input);
        assert_eq!(output["messages"][0]["ts"], "2023-11-14T22:13:20.000Z");
        assert_eq!(
            output["messages"][1]["reply"]["ts"],
            "2023-11-14T22:13:20.500Z"
        );
        assert_eq!(output["messages"][0]["text"], "hi");
    }

    #[test]
    fn test_idempotent() {
        let input = json!({
            "ts": "1700000000.123456",
            "messages": [{"thread_ts": "1700000000"}],
            "note": "untouched"
        });
        let once = normalize_timestamps(input);
        let twice = normalize_timestamps(once.clone());
        assert_eq!(once, twice);
    }

    #[test]
    fn test_scalars_pass_through() {
        assert_eq!(normalize_timestamps(json!(null)), json!(null));
        assert_eq!(normalize_timestamps(json!(42)), json!(42));
        assert_eq!(normalize_timestamps(json!("1700000000")), json!("1700000000"));
    }

    #[test]
    fn test_epoch_predicate() {
        assert!(is_epoch_seconds("1700000000"));
        assert!(is_epoch_seconds("1700000000.123456"));
        assert!(!is_epoch_seconds(""));
        assert!(!is_epoch_seconds("."));
        assert!(!is_epoch_seconds("1700000000."));
        assert!(!is_epoch_seconds(".123"));
        assert!(!is_epoch_seconds("1.2.3"));
        assert!(!is_epoch_seconds("-1700000000"));
        assert!(!is_epoch_seconds("2023-11-14T22:13:20.123Z"));
    }
}
