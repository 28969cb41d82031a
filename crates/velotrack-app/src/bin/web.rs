//! Web status API
//!
//! Serves the snapshot (with computed age and freshness), the bucketed
//! producer liveness, and the reset request endpoint. Each request reads the
//! snapshot file on demand; the server never blocks waiting on the producer.

use std::io::Cursor;
use std::path::PathBuf;
use std::time::Duration;

use anyhow::{anyhow, Result};
use chrono::Local;
use clap::Parser;
use serde_json::json;
use tiny_http::{Header, Method, Response, Server};
use tracing::{error, info};

use velotrack_core::prelude::*;

#[derive(Parser)]
#[command(name = "velotrack-web", version)]
#[command(about = "HTTP status endpoint for the metrics snapshot")]
struct Args {
    /// Path to the shared config file
    #[arg(short, long, default_value = "velotrack.json")]
    config: PathBuf,

    /// Bind address (overrides the config value)
    #[arg(short, long)]
    bind: Option<String>,
}

fn json_response(body: serde_json::Value, status: u16) -> Response<Cursor<Vec<u8>>> {
    Response::from_string(body.to_string())
        .with_status_code(status)
        .with_header(
            Header::from_bytes(&b"Content-Type"[..], &b"application/json"[..]).expect("header"),
        )
}

fn data_endpoint(store: &SnapshotStore, policy: &StalenessPolicy) -> serde_json::Value {
    let snapshot = store.load();
    let age = snapshot.age_secs(Local::now());

    let mut body = serde_json::to_value(&snapshot).unwrap_or_else(|_| json!({}));
    body["data_age"] = json!(age.unwrap_or(AGE_UNKNOWN));
    body["is_fresh"] = json!(policy.is_fresh(age));
    body
}

fn status_endpoint(store: &SnapshotStore, policy: &StalenessPolicy) -> serde_json::Value {
    let snapshot = store.load();
    let status = policy.classify(snapshot.age_secs(Local::now()));

    json!({
        "status": status,
        "last_update": snapshot.last_update,
        "data_file_exists": store.exists(),
    })
}

fn reset_endpoint(reset: &ResetChannel) -> (serde_json::Value, u16) {
    // Fire-and-forget: only the local write can fail here; the producer
    // decides whether the request is still fresh enough to act on.
    match reset.request() {
        Ok(()) => {
            info!("reset request written");
            (
                json!({"status": "success", "message": "Sent request to session reset"}),
                200,
            )
        }
        Err(err) => {
            error!("reset request failed: {err}");
            (
                json!({"status": "error", "message": err.to_string()}),
                500,
            )
        }
    }
}

fn main() -> Result<()> {
    velotrack_app::init_tracing("info");
    let args = Args::parse();
    let config = velotrack_app::load_config(&args.config)?;

    let store = SnapshotStore::new(&config.snapshot_path);
    let reset = ResetChannel::new(
        &config.reset_flag_path,
        Duration::from_secs_f64(config.reset_debounce_secs),
    );

    let bind = args.bind.unwrap_or(config.web_bind);
    let server = Server::http(&bind).map_err(|err| anyhow!("binding {bind}: {err}"))?;
    info!("web API listening on http://{bind}");

    for request in server.incoming_requests() {
        let path = request.url().split('?').next().unwrap_or_default();
        let response = match (request.method(), path) {
            (Method::Get, "/api/data") => {
                json_response(data_endpoint(&store, &config.staleness), 200)
            }
            (Method::Get, "/api/status") => {
                json_response(status_endpoint(&store, &config.staleness), 200)
            }
            (Method::Post, "/api/reset") => {
                let (body, status) = reset_endpoint(&reset);
                json_response(body, status)
            }
            _ => json_response(json!({"error": "Page not found"}), 404),
        };

        if let Err(err) = request.respond(response) {
            error!("response write failed: {err}");
        }
    }

    Ok(())
}
