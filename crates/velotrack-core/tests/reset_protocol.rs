//! Reset-signal protocol tests
//!
//! The flag file's modification time is the payload; `poll_at` injects the
//! producer's clock so debounce behavior is deterministic.

use std::time::{Duration, SystemTime};

use velotrack_core::reset::{ResetChannel, ResetDisposition};

const DEBOUNCE: Duration = Duration::from_secs(5);

fn channel(dir: &tempfile::TempDir) -> ResetChannel {
    ResetChannel::new(dir.path().join("reset.flag"), DEBOUNCE)
}

#[test]
fn fresh_request_is_accepted_and_consumed() {
    let dir = tempfile::tempdir().unwrap();
    let channel = channel(&dir);

    channel.request().unwrap();
    assert!(channel.path().exists());

    // Producer observes 3s after the request was written
    let observed = SystemTime::now() + Duration::from_secs(3);
    assert_eq!(channel.poll_at(observed), ResetDisposition::Accepted);
    assert!(!channel.path().exists(), "flag must be consumed");
}

#[test]
fn stale_request_is_discarded_but_still_deleted() {
    let dir = tempfile::tempdir().unwrap();
    let channel = channel(&dir);

    channel.request().unwrap();

    // Producer was down; it first observes the flag 8s later
    let observed = SystemTime::now() + Duration::from_secs(8);
    assert_eq!(channel.poll_at(observed), ResetDisposition::Expired);
    assert!(!channel.path().exists(), "stale flag must not re-trigger");
}

#[test]
fn repeated_requests_collapse_to_one_reset() {
    let dir = tempfile::tempdir().unwrap();
    let channel = channel(&dir);

    for _ in 0..5 {
        channel.request().unwrap();
    }

    assert_eq!(channel.poll(), ResetDisposition::Accepted);
    // Nothing left for the next cycle
    assert_eq!(channel.poll(), ResetDisposition::NotRequested);
}

#[test]
fn absent_flag_is_a_no_op() {
    let dir = tempfile::tempdir().unwrap();
    let channel = channel(&dir);

    assert_eq!(channel.poll(), ResetDisposition::NotRequested);
}

#[test]
fn request_content_is_informational_only() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("reset.flag");
    let channel = ResetChannel::new(&path, DEBOUNCE);

    // Any writer, any content: only the mtime matters
    std::fs::write(&path, "whatever").unwrap();
    assert_eq!(channel.poll(), ResetDisposition::Accepted);
}
