//! Metrics snapshot
//!
//! The published state shared between the producer and its consumers: an
//! immutable value written wholesale on every aggregation tick and read back
//! tolerantly by anyone.

mod staleness;
mod store;

pub use staleness::{LinkStatus, StalenessPolicy};
pub use store::SnapshotStore;

use chrono::{DateTime, Local};
use serde::{Deserialize, Serialize};

use crate::telemetry::{format_elapsed, TickReading};

/// Reported `data_age` when `last_update` cannot be parsed
pub const AGE_UNKNOWN: f64 = 999.0;

/// The latest published metrics.
///
/// Field defaults stand in for keys missing from the file, and unknown extra
/// keys are ignored, so consumers keep working across schema drift.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MetricsSnapshot {
    /// Speed in km/h, 1 decimal
    pub speed: f64,
    /// Accumulated distance in km, 2 decimals
    pub distance: f64,
    /// Session duration, `H:MM:SS` (leading zero digit under one hour)
    pub elapsed_time: String,
    /// Estimated calories burned, 1 decimal
    pub calories: f64,
    /// Cadence in revolutions per minute, 1 decimal
    pub cadence: f64,
    /// Raw rotation count, 1 decimal
    pub num: f64,
    /// RFC 3339 wall-clock time the fields were computed; empty when the
    /// snapshot is a default (never written by a producer)
    pub last_update: String,
}

impl Default for MetricsSnapshot {
    fn default() -> Self {
        Self {
            speed: 0.0,
            distance: 0.0,
            elapsed_time: "0:00:00".to_string(),
            calories: 0.0,
            cadence: 0.0,
            num: 0.0,
            last_update: String::new(),
        }
    }
}

impl MetricsSnapshot {
    /// Publish a tick reading: apply display rounding once, here, and stamp
    /// the wall-clock time the reading was computed.
    pub fn publish(reading: &TickReading, now: DateTime<Local>) -> Self {
        Self {
            speed: round1(reading.speed),
            distance: round2(reading.distance),
            elapsed_time: format_elapsed(reading.elapsed_secs),
            calories: round1(reading.calories),
            cadence: round1(reading.cadence),
            num: round1(reading.num),
            last_update: now.to_rfc3339(),
        }
    }

    /// Seconds between `now` and `last_update`, or `None` when the stamp is
    /// missing or unparseable.
    pub fn age_secs(&self, now: DateTime<Local>) -> Option<f64> {
        let last_update = DateTime::parse_from_rfc3339(&self.last_update).ok()?;
        Some(now.signed_duration_since(last_update).num_milliseconds() as f64 / 1000.0)
    }
}

fn round1(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeDelta;

    fn reading() -> TickReading {
        TickReading {
            speed: 32.04,
            distance: 0.0445,
            elapsed_secs: 271,
            calories: 0.65,
            cadence: 120.04,
            num: 10.0,
        }
    }

    #[test]
    fn test_publication_rounding() {
        let snapshot = MetricsSnapshot::publish(&reading(), Local::now());

        assert_eq!(snapshot.speed, 32.0);
        assert_eq!(snapshot.distance, 0.04);
        assert_eq!(snapshot.calories, 0.7);
        assert_eq!(snapshot.cadence, 120.0);
        assert_eq!(snapshot.num, 10.0);
        assert_eq!(snapshot.elapsed_time, "00:04:31");
    }

    #[test]
    fn test_age_from_stamp() {
        let now = Local::now();
        let snapshot = MetricsSnapshot::publish(&reading(), now);

        let later = now + TimeDelta::milliseconds(4_999);
        let age = snapshot.age_secs(later).unwrap();
        assert!((age - 4.999).abs() < 1e-9);
    }

    #[test]
    fn test_default_snapshot_has_no_age() {
        let snapshot = MetricsSnapshot::default();
        assert_eq!(snapshot.elapsed_time, "0:00:00");
        assert!(snapshot.age_secs(Local::now()).is_none());
    }

    #[test]
    fn test_unknown_keys_ignored_and_missing_keys_defaulted() {
        let parsed: MetricsSnapshot =
            serde_json::from_str(r#"{"speed": 12.5, "firmware": "v2"}"#).unwrap();
        assert_eq!(parsed.speed, 12.5);
        assert_eq!(parsed.distance, 0.0);
        assert_eq!(parsed.elapsed_time, "0:00:00");
    }
}
