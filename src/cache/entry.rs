// Cache entry envelope and its validated decode.
// An entry is a repo record plus an absolute expiry in epoch milliseconds.

use std::sync::Arc;
#[cfg(test)]
use std::sync::atomic::{AtomicI64, Ordering};

use chrono::Utc;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::record::RepoRecord;

/// Wrapper for a cached record with its expiry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CacheEntry {
    #[serde(rename = "repoData")]
    pub record: RepoRecord,
    /// Absolute expiry, epoch milliseconds.
    #[serde(rename = "expiry")]
    pub expires_at: i64,
}

impl CacheEntry {
    pub fn is_expired(&self, now_millis: i64) -> bool {
        now_millis > self.expires_at
    }
}

/// Result of decoding one raw stored value.
#[derive(Debug)]
pub enum Decoded {
    Entry(CacheEntry),
    /// Valid JSON without the cache shape; belongs to someone else.
    Foreign,
    Malformed(String),
}

/// Decode a raw stored value.
///
/// Only values that are JSON objects carrying both `expiry` and `repoData` are
/// cache-shaped. A cache-shaped value whose record does not decode is malformed.
pub fn decode(raw: &str) -> Decoded {
    let value: Value = match serde_json::from_str(raw) {
        Ok(value) => value,
        Err(e) => return Decoded::Malformed(e.to_string()),
    };

    let is_cache_shaped = value
        .as_object()
        .is_some_and(|obj| is_truthy(obj.get("expiry")) && is_truthy(obj.get("repoData")));
    if !is_cache_shaped {
        return Decoded::Foreign;
    }

    match serde_json::from_value(value) {
        Ok(entry) => Decoded::Entry(entry),
        Err(e) => Decoded::Malformed(e.to_string()),
    }
}

fn is_truthy(value: Option<&Value>) -> bool {
    match value {
        None | Some(Value::Null) | Some(Value::Bool(false)) => false,
        Some(Value::Number(n)) => n.as_f64().is_some_and(|n| n != 0.0),
        Some(Value::String(s)) => !s.is_empty(),
        Some(_) => true,
    }
}

/// Source of the current time in epoch milliseconds.
pub trait Clock {
    fn now_millis(&self) -> i64;
}

/// Wall clock.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now_millis(&self) -> i64 {
        Utc::now().timestamp_millis()
    }
}

/// Clock that only moves when told to.
#[cfg(test)]
#[derive(Debug, Default)]
pub struct ManualClock {
    now: AtomicI64,
}

#[cfg(test)]
impl ManualClock {
    pub fn new(now_millis: i64) -> Self {
        Self {
            now: AtomicI64::new(now_millis),
        }
    }

    pub fn advance(&self, millis: i64) {
        self.now.fetch_add(millis, Ordering::SeqCst);
    }
}

#[cfg(test)]
impl Clock for ManualClock {
    fn now_millis(&self) -> i64 {
        self.now.load(Ordering::SeqCst)
    }
}

impl<C: Clock + ?Sized> Clock for Arc<C> {
    fn now_millis(&self) -> i64 {
        (**self).now_millis()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::github::{Languages, mock::sample_repo};

    fn entry_json(expiry: i64) -> String {
        let record = RepoRecord::assemble(sample_repo("octocat", "demo"), vec![], Languages::new(), 1);
        serde_json::to_string(&CacheEntry {
            record,
            expires_at: expiry,
        })
        .unwrap()
    }

    #[test]
    fn test_decode_entry() {
        match decode(&entry_json(42)) {
            Decoded::Entry(entry) => {
                assert_eq!(entry.expires_at, 42);
                assert_eq!(entry.record.name, "demo");
            }
            other => panic!("expected entry, got {:?}", other),
        }
    }

    #[test]
    fn test_envelope_field_names() {
        let value: Value = serde_json::from_str(&entry_json(42)).unwrap();
        assert!(value.get("repoData").is_some());
        assert_eq!(value.get("expiry").and_then(Value::as_i64), Some(42));
    }

    #[test]
    fn test_decode_foreign_values() {
        assert!(matches!(decode(r#"{"theme":"dark"}"#), Decoded::Foreign));
        assert!(matches!(decode("17"), Decoded::Foreign));
        assert!(matches!(decode(r#""text""#), Decoded::Foreign));
        // A zero expiry fails the shape check just like a missing one.
        assert!(matches!(
            decode(r#"{"expiry":0,"repoData":{"name":"x"}}"#),
            Decoded::Foreign
        ));
    }

    #[test]
    fn test_decode_malformed_values() {
        assert!(matches!(decode("{not json"), Decoded::Malformed(_)));
        assert!(matches!(
            decode(r#"{"expiry":5,"repoData":{"name":"x"}}"#),
            Decoded::Malformed(_)
        ));
    }

    #[test]
    fn test_expiry_is_strict() {
        let entry = match decode(&entry_json(1_000)) {
            Decoded::Entry(entry) => entry,
            other => panic!("expected entry, got {:?}", other),
        };
        assert!(!entry.is_expired(999));
        assert!(!entry.is_expired(1_000));
        assert!(entry.is_expired(1_001));
    }

    #[test]
    fn test_manual_clock_advances() {
        let clock = Arc::new(ManualClock::new(10));
        clock.advance(5);
        assert_eq!(clock.now_millis(), 15);
    }
}
