//! Application configuration
//!
//! One JSON config file shared by the three processes. Every field has a
//! default, so a missing file or a sparse one both work; only a malformed
//! file is an error.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::TelemetryError;
use crate::snapshot::StalenessPolicy;

/// Physical calibration constants
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
#[serde(default)]
pub struct Calibration {
    /// Meters covered per rotation-equivalent unit (the bike's virtual
    /// gearing, not a literal wheel measurement)
    pub wheel_circumference: f64,
    /// Calories burned per rotation
    pub calorie_factor: f64,
}

impl Default for Calibration {
    fn default() -> Self {
        Self {
            wheel_circumference: 4.45,
            calorie_factor: 0.065,
        }
    }
}

/// Configuration stored in `velotrack.json`
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Snapshot mailbox file written by the daemon
    pub snapshot_path: PathBuf,

    /// Reset flag file written by consumers, consumed by the daemon
    pub reset_flag_path: PathBuf,

    /// Physical calibration constants
    pub calibration: Calibration,

    /// Consumer staleness thresholds
    pub staleness: StalenessPolicy,

    /// Reset requests older than this many seconds are discarded
    pub reset_debounce_secs: f64,

    /// Daemon loop interval in milliseconds; bounds reset-request latency,
    /// independent of the 1 Hz aggregation gate
    pub daemon_poll_ms: u64,

    /// Display poll interval in milliseconds
    pub display_poll_ms: u64,

    /// Bind address for the web status API
    pub web_bind: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            snapshot_path: PathBuf::from("log/velotrack_data.json"),
            reset_flag_path: PathBuf::from("log/velotrack_reset.flag"),
            calibration: Calibration::default(),
            staleness: StalenessPolicy::default(),
            reset_debounce_secs: 5.0,
            daemon_poll_ms: 100,
            display_poll_ms: 1000,
            web_bind: "0.0.0.0:5000".to_string(),
        }
    }
}

impl AppConfig {
    /// Load configuration from a JSON file.
    ///
    /// A missing file yields the defaults; a file that exists but does not
    /// parse is an error — silently ignoring a typo in a config someone
    /// wrote on purpose would be worse than refusing to start.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, TelemetryError> {
        let path = path.as_ref();
        let content = match fs::read_to_string(path) {
            Ok(content) => content,
            Err(err) if err.kind() == io::ErrorKind::NotFound => {
                return Ok(Self::default());
            }
            Err(err) => return Err(err.into()),
        };

        serde_json::from_str(&content).map_err(|err| TelemetryError::Config {
            path: path.display().to_string(),
            message: err.to_string(),
        })
    }

    /// Write the configuration as pretty JSON (used to scaffold a default
    /// config file)
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<(), TelemetryError> {
        let json = serde_json::to_string_pretty(self)?;
        fs::write(path, json)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = AppConfig::default();
        assert_eq!(config.calibration.wheel_circumference, 4.45);
        assert_eq!(config.calibration.calorie_factor, 0.065);
        assert_eq!(config.reset_debounce_secs, 5.0);
        assert_eq!(config.daemon_poll_ms, 100);
    }

    #[test]
    fn test_sparse_config_fills_defaults() {
        let config: AppConfig =
            serde_json::from_str(r#"{"calibration": {"wheel_circumference": 2.1}}"#).unwrap();
        assert_eq!(config.calibration.wheel_circumference, 2.1);
        // Untouched fields keep their defaults
        assert_eq!(config.calibration.calorie_factor, 0.065);
        assert_eq!(config.web_bind, "0.0.0.0:5000");
    }

    #[test]
    fn test_missing_file_yields_defaults() {
        let config = AppConfig::load("definitely/not/here.json").unwrap();
        assert_eq!(config.daemon_poll_ms, 100);
    }
}
