//! # Velotrack Core Library
//!
//! Core functionality for the velotrack exercise-bike telemetry pipeline.
//!
//! This library provides:
//! - Sliding-window aggregation of wheel rotation events into rate metrics
//! - Atomic snapshot publication to a single-writer/multi-reader JSON file
//! - The staleness model consumers use to judge data validity
//! - The debounced cross-process reset-signal protocol
//!
//! Three independent processes cooperate through two files on a shared
//! filesystem: the producer daemon aggregates rotation events and publishes
//! a metrics snapshot; the display and web consumers poll the snapshot and
//! may request a session reset through a flag file.
//!
//! ## Example
//!
//! ```rust,ignore
//! use velotrack_core::prelude::*;
//!
//! let config = AppConfig::load("velotrack.json")?;
//! let store = SnapshotStore::new(&config.snapshot_path);
//! let snapshot = store.load();
//! println!("speed: {} km/h", snapshot.speed);
//! ```

#![warn(missing_docs)]

pub mod config;
pub mod error;
pub mod reset;
pub mod snapshot;
pub mod telemetry;

/// Re-export commonly used types
pub mod prelude {
    pub use crate::config::{AppConfig, Calibration};
    pub use crate::error::TelemetryError;
    pub use crate::reset::{ResetChannel, ResetDisposition};
    pub use crate::snapshot::{
        LinkStatus, MetricsSnapshot, SnapshotStore, StalenessPolicy, AGE_UNKNOWN,
    };
    pub use crate::telemetry::{RateWindow, RotationCounter, SessionState, SimulatedRider};
}

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
