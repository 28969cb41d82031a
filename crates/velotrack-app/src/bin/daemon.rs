//! Producer daemon
//!
//! Counts rotation events, aggregates them into rate metrics once per
//! whole-second boundary, and publishes the snapshot file. Also consumes the
//! reset flag written by the other processes. The short loop interval bounds
//! reset-request latency; the aggregation gate itself never fires faster
//! than 1 Hz.

use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use anyhow::Result;
use chrono::{DateTime, Local};
use clap::Parser;
use tokio::task::JoinHandle;
use tracing::{info, warn};

use velotrack_core::prelude::*;

#[derive(Parser)]
#[command(name = "velotrack-daemon", version)]
#[command(about = "Aggregates wheel rotations into the shared metrics snapshot")]
struct Args {
    /// Path to the shared config file
    #[arg(short, long, default_value = "velotrack.json")]
    config: PathBuf,

    /// Generate rotation events with the simulated rider instead of hardware
    #[arg(long)]
    simulate: bool,
}

/// Owner of the rotation event source.
///
/// The source runs in its own task and feeds the shared counter; dropping
/// this handle releases it on every exit path, including interrupt.
struct EventSource {
    task: Option<JoinHandle<()>>,
}

impl EventSource {
    fn simulated(counter: Arc<RotationCounter>) -> Self {
        let task = tokio::spawn(async move {
            let mut rider = SimulatedRider::new();
            let mut ticker = tokio::time::interval(Duration::from_millis(250));
            let mut last = tokio::time::Instant::now();
            loop {
                let now = ticker.tick().await;
                let dt = now.duration_since(last).as_secs_f64();
                last = now;
                counter.add(rider.advance(dt));
            }
        });
        info!("simulated rider attached");
        Self { task: Some(task) }
    }

    /// No hardware backend available: aggregation still runs, the counter
    /// simply never advances.
    fn disabled() -> Self {
        warn!("no rotation source attached; counter will not advance");
        Self { task: None }
    }
}

impl Drop for EventSource {
    fn drop(&mut self) {
        if let Some(task) = self.task.take() {
            task.abort();
            info!("rotation source released");
        }
    }
}

fn epoch_secs(now: DateTime<Local>) -> f64 {
    now.timestamp_millis() as f64 / 1000.0
}

#[tokio::main]
async fn main() -> Result<()> {
    velotrack_app::init_tracing("info");
    let args = Args::parse();
    let config = velotrack_app::load_config(&args.config)?;

    let store = SnapshotStore::new(&config.snapshot_path);
    let reset = ResetChannel::new(
        &config.reset_flag_path,
        Duration::from_secs_f64(config.reset_debounce_secs),
    );

    // A crash or restart must not visibly reset accumulated distance and
    // calories; malformed prior state reads as zero and we start fresh.
    let prior = store.load();
    if prior.num > 0.0 {
        info!("resuming previous session count: num={}", prior.num);
    }
    let counter = Arc::new(RotationCounter::with_count(prior.num));
    let mut session = SessionState::resume(epoch_secs(Local::now()), prior.num);

    let _source = if args.simulate {
        EventSource::simulated(Arc::clone(&counter))
    } else {
        EventSource::disabled()
    };

    info!("aggregation started (snapshot: {})", store.path().display());

    let mut poll = tokio::time::interval(Duration::from_millis(config.daemon_poll_ms));
    loop {
        tokio::select! {
            _ = poll.tick() => {
                let now = Local::now();

                if reset.poll() == ResetDisposition::Accepted {
                    counter.reset();
                    session.reset(epoch_secs(now));
                }

                session.observe(counter.get());
                if let Some(reading) = session.tick(epoch_secs(now), &config.calibration) {
                    let snapshot = MetricsSnapshot::publish(&reading, now);
                    if let Err(err) = store.save(&snapshot) {
                        // Transient fault: keep in-memory state, retry next tick
                        warn!("snapshot write skipped this tick: {err}");
                    }
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
