//! Telemetry pipeline errors

use thiserror::Error;

/// Errors that can occur while persisting or loading pipeline state
#[derive(Error, Debug)]
pub enum TelemetryError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Config error in {path}: {message}")]
    Config {
        /// Path of the offending config file
        path: String,
        /// What went wrong
        message: String,
    },
}
