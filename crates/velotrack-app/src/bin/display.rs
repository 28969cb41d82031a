//! Display consumer
//!
//! Polls the snapshot file on a fixed interval and re-renders the metrics
//! panel only when the content changed since the last poll. This terminal
//! renderer stands in for the small-screen panel; a missing or stale
//! snapshot is a normal condition, never an error.

use std::path::PathBuf;
use std::time::Duration;

use anyhow::Result;
use chrono::Local;
use clap::Parser;
use tracing::{info, warn};

use velotrack_core::prelude::*;

#[derive(Parser)]
#[command(name = "velotrack-display", version)]
#[command(about = "Renders the live metrics snapshot to the terminal")]
struct Args {
    /// Path to the shared config file
    #[arg(short, long, default_value = "velotrack.json")]
    config: PathBuf,
}

fn render(snapshot: &MetricsSnapshot, fresh: bool) {
    let marker = if fresh { "" } else { "  [stale]" };
    println!(
        "{:>5.1} km/h | {:>6.2} km | {:>6.1} kcal | {:>5.1} rpm | {}{}",
        snapshot.speed,
        snapshot.distance,
        snapshot.calories,
        snapshot.cadence,
        snapshot.elapsed_time,
        marker,
    );
}

#[tokio::main]
async fn main() -> Result<()> {
    velotrack_app::init_tracing("info");
    let args = Args::parse();
    let config = velotrack_app::load_config(&args.config)?;

    let store = SnapshotStore::new(&config.snapshot_path);
    info!("display started (snapshot: {})", store.path().display());

    let mut last: Option<MetricsSnapshot> = None;
    let mut poll = tokio::time::interval(Duration::from_millis(config.display_poll_ms));
    loop {
        tokio::select! {
            _ = poll.tick() => {
                let snapshot = store.load();
                let age = snapshot.age_secs(Local::now());
                let fresh = config.staleness.is_fresh(age);
                if !fresh {
                    if let Some(age) = age {
                        warn!("snapshot is {age:.1}s old");
                    }
                }

                // Re-render only changed content; the panel is slow to redraw
                if last.as_ref() != Some(&snapshot) {
                    render(&snapshot, fresh);
                    last = Some(snapshot);
                }
            }
            _ = tokio::signal::ctrl_c() => {
                info!("interrupt received, shutting down");
                break;
            }
        }
    }

    Ok(())
}
