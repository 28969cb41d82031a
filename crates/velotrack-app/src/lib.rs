//! Shared plumbing for the velotrack process binaries

use std::path::Path;

use anyhow::Context;
use tracing_subscriber::EnvFilter;
use velotrack_core::config::AppConfig;

/// Initialize tracing for a binary. `RUST_LOG` overrides the default level.
pub fn init_tracing(default_level: &str) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt().with_env_filter(filter).init();
}

/// Load the shared config file, with context on failure
pub fn load_config(path: &Path) -> anyhow::Result<AppConfig> {
    AppConfig::load(path).with_context(|| format!("loading config from {}", path.display()))
}
