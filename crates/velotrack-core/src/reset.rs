//! Reset-signal protocol
//!
//! A flag file lets any consumer request a session reset across process
//! boundaries without a lock or queue. The file's modification time is the
//! payload; its content is informational only. The producer consumes the
//! file exactly once per observation, accepting the request only when it is
//! younger than the debounce window — the file may have survived a producer
//! restart, and a stale request must not trigger a reset long after intent.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::time::{Duration, SystemTime};

use chrono::Local;
use tracing::{error, info, warn};

/// Outcome of one producer-side check of the reset channel
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResetDisposition {
    /// No flag file present
    NotRequested,
    /// Fresh request: the producer must reset the session
    Accepted,
    /// Request older than the debounce window: discarded, no reset
    Expired,
}

/// Flag-file channel for reset requests
#[derive(Debug, Clone)]
pub struct ResetChannel {
    path: PathBuf,
    debounce: Duration,
}

impl ResetChannel {
    /// Create a channel over the given flag path with the given debounce
    /// window
    pub fn new<P: Into<PathBuf>>(path: P, debounce: Duration) -> Self {
        Self {
            path: path.into(),
            debounce,
        }
    }

    /// Path of the flag file
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Request a reset. Writing the file is the entire request; there is no
    /// acknowledgment. Multiple requests before the producer's next check
    /// collapse into at most one reset.
    pub fn request(&self) -> io::Result<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }
        fs::write(&self.path, Local::now().to_rfc3339())
    }

    /// Producer-side check: consume a pending request, if any.
    ///
    /// The flag file is deleted whether the request is accepted or expired,
    /// so a stale file cannot re-trigger. I/O faults leave the file in place
    /// for the next cycle and report [`ResetDisposition::NotRequested`].
    pub fn poll(&self) -> ResetDisposition {
        self.poll_at(SystemTime::now())
    }

    /// [`ResetChannel::poll`] against an explicit "now", for deterministic
    /// tests
    pub fn poll_at(&self, now: SystemTime) -> ResetDisposition {
        let modified = match fs::metadata(&self.path) {
            Ok(meta) => match meta.modified() {
                Ok(modified) => modified,
                Err(err) => {
                    warn!("reset flag mtime unavailable: {err}");
                    return ResetDisposition::NotRequested;
                }
            },
            Err(err) if err.kind() == io::ErrorKind::NotFound => {
                return ResetDisposition::NotRequested;
            }
            Err(err) => {
                warn!("reset flag check failed: {err}");
                return ResetDisposition::NotRequested;
            }
        };

        if let Err(err) = fs::remove_file(&self.path) {
            // Leave disposition untouched; an undeletable flag would fire on
            // every cycle.
            error!("reset flag removal failed: {err}");
            return ResetDisposition::NotRequested;
        }

        // A clock skewed past the flag's mtime reads as age zero: fresh.
        let age = now.duration_since(modified).unwrap_or(Duration::ZERO);
        if age <= self.debounce {
            info!("reset request accepted (age {:.1}s)", age.as_secs_f64());
            ResetDisposition::Accepted
        } else {
            info!("stale reset request discarded (age {:.1}s)", age.as_secs_f64());
            ResetDisposition::Expired
        }
    }
}
