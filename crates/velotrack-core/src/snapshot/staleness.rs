//! Staleness model
//!
//! Consumers judge snapshot validity by the age of its `last_update` stamp.
//! The web API reports three buckets; the display uses a single boolean
//! freshness threshold.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Age thresholds, in seconds. All are configuration; these defaults are the
/// values in production use.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
#[serde(default)]
pub struct StalenessPolicy {
    /// Below this the producer is considered live
    pub online_secs: f64,
    /// Below this (but at or above `online_secs`) updates are lagging
    pub slow_secs: f64,
    /// Strict bound for the boolean freshness flag
    pub fresh_secs: f64,
}

impl Default for StalenessPolicy {
    fn default() -> Self {
        Self {
            online_secs: 5.0,
            slow_secs: 30.0,
            fresh_secs: 10.0,
        }
    }
}

/// Bucketed producer liveness as reported by `/api/status`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LinkStatus {
    /// Snapshot is current
    Online,
    /// Snapshot updates are arriving slowly
    Slow,
    /// No recent snapshot
    Offline,
    /// `last_update` missing or unparseable
    Unknown,
}

impl fmt::Display for LinkStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            LinkStatus::Online => "online",
            LinkStatus::Slow => "slow",
            LinkStatus::Offline => "offline",
            LinkStatus::Unknown => "unknown",
        };
        f.write_str(s)
    }
}

impl StalenessPolicy {
    /// Classify a snapshot age into a liveness bucket. `None` (no parseable
    /// `last_update`) is always `Unknown`.
    pub fn classify(&self, age_secs: Option<f64>) -> LinkStatus {
        match age_secs {
            None => LinkStatus::Unknown,
            Some(age) if age < self.online_secs => LinkStatus::Online,
            Some(age) if age < self.slow_secs => LinkStatus::Slow,
            Some(_) => LinkStatus::Offline,
        }
    }

    /// Boolean freshness: strictly younger than `fresh_secs`. Unparseable
    /// stamps are never fresh.
    pub fn is_fresh(&self, age_secs: Option<f64>) -> bool {
        matches!(age_secs, Some(age) if age < self.fresh_secs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bucket_boundaries() {
        let policy = StalenessPolicy::default();

        assert_eq!(policy.classify(Some(0.0)), LinkStatus::Online);
        assert_eq!(policy.classify(Some(4.999)), LinkStatus::Online);
        assert_eq!(policy.classify(Some(5.0)), LinkStatus::Slow);
        assert_eq!(policy.classify(Some(29.999)), LinkStatus::Slow);
        assert_eq!(policy.classify(Some(30.0)), LinkStatus::Offline);
        assert_eq!(policy.classify(None), LinkStatus::Unknown);
    }

    #[test]
    fn test_freshness_is_strict() {
        let policy = StalenessPolicy::default();

        assert!(policy.is_fresh(Some(4.999)));
        assert!(policy.is_fresh(Some(9.999)));
        assert!(!policy.is_fresh(Some(10.0)));
        assert!(!policy.is_fresh(None));
    }

    #[test]
    fn test_status_serializes_lowercase() {
        assert_eq!(
            serde_json::to_string(&LinkStatus::Online).unwrap(),
            "\"online\""
        );
        assert_eq!(LinkStatus::Unknown.to_string(), "unknown");
    }
}
