//! Snapshot file store
//!
//! A single JSON file acting as a single-writer/multi-reader mailbox. The
//! producer replaces the content each tick via write-to-temp plus atomic
//! rename, so readers never observe a torn write; a missing or corrupt file
//! reads as the default snapshot rather than an error.

use std::fs;
use std::path::{Path, PathBuf};

use tracing::warn;

use super::MetricsSnapshot;
use crate::error::TelemetryError;

/// Handle on the shared snapshot file
#[derive(Debug, Clone)]
pub struct SnapshotStore {
    path: PathBuf,
}

impl SnapshotStore {
    /// Create a store over the given file path
    pub fn new<P: Into<PathBuf>>(path: P) -> Self {
        Self { path: path.into() }
    }

    /// Path of the snapshot file
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Whether the snapshot file currently exists
    pub fn exists(&self) -> bool {
        self.path.exists()
    }

    /// Publish a snapshot, replacing the previous one.
    ///
    /// Writes to a sibling temp file and renames it into place so a
    /// concurrent reader sees either the old or the new content, never a
    /// partial write. The producer logs failures and retries next tick.
    pub fn save(&self, snapshot: &MetricsSnapshot) -> Result<(), TelemetryError> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }

        let json = serde_json::to_string_pretty(snapshot)?;
        let tmp = self.tmp_path();
        fs::write(&tmp, json)?;
        fs::rename(&tmp, &self.path)?;
        Ok(())
    }

    /// Read the latest snapshot. Infallible by contract: a missing file is a
    /// normal condition and yields the default snapshot, as does anything
    /// unreadable or unparseable.
    pub fn load(&self) -> MetricsSnapshot {
        let content = match fs::read_to_string(&self.path) {
            Ok(content) => content,
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
                return MetricsSnapshot::default();
            }
            Err(err) => {
                warn!("snapshot read failed ({}): {err}", self.path.display());
                return MetricsSnapshot::default();
            }
        };

        match serde_json::from_str(&content) {
            Ok(snapshot) => snapshot,
            Err(err) => {
                warn!("snapshot parse failed ({}): {err}", self.path.display());
                MetricsSnapshot::default()
            }
        }
    }

    fn tmp_path(&self) -> PathBuf {
        let mut name = self.path.file_name().unwrap_or_default().to_os_string();
        name.push(".tmp");
        self.path.with_file_name(name)
    }
}
