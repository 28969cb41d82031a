//! Session aggregation state
//!
//! Converts the monotonically increasing rotation count into smoothed rate
//! metrics, sampled on whole-second boundary crossings. All operations take
//! the current time as an epoch-seconds float so the aggregation logic stays
//! deterministic under test; the daemon supplies real wall-clock time.

use tracing::info;

use super::window::RateWindow;
use crate::config::Calibration;

/// Unrounded metrics produced by one aggregation tick.
///
/// Rounding happens once, at publication into a
/// [`MetricsSnapshot`](crate::snapshot::MetricsSnapshot), not here.
#[derive(Debug, Clone, PartialEq)]
pub struct TickReading {
    /// Speed in km/h
    pub speed: f64,
    /// Accumulated distance in km
    pub distance: f64,
    /// Whole seconds since session start
    pub elapsed_secs: u64,
    /// Estimated calories burned
    pub calories: f64,
    /// Cadence in revolutions per minute
    pub cadence: f64,
    /// Raw rotation count
    pub num: f64,
}

/// Mutable aggregation state owned by the producer.
///
/// Reset to its zero form by [`SessionState::reset`]; survives producer
/// restarts only through the persisted rotation count
/// ([`SessionState::resume`]) — elapsed time intentionally restarts.
#[derive(Debug, Clone)]
pub struct SessionState {
    num: f64,
    last_num: f64,
    start_epoch: f64,
    last_epoch: f64,
    window: RateWindow,
}

impl SessionState {
    /// Start a fresh session at `now` (epoch seconds)
    pub fn new(now: f64) -> Self {
        Self {
            num: 0.0,
            last_num: 0.0,
            start_epoch: now,
            last_epoch: now,
            window: RateWindow::new(),
        }
    }

    /// Resume after a producer restart: keep the accumulated rotation count
    /// so distance and calories carry over, but restart the clock.
    pub fn resume(now: f64, prior_num: f64) -> Self {
        let mut session = Self::new(now);
        session.num = prior_num.max(0.0);
        session.last_num = session.num;
        session
    }

    /// Take the latest value of the shared rotation counter.
    ///
    /// The counter is monotonically non-decreasing between resets; a lower
    /// observation means the counter was reset out from under us and is
    /// accepted as-is.
    pub fn observe(&mut self, num: f64) {
        self.num = num;
    }

    /// Current rotation count
    pub fn num(&self) -> f64 {
        self.num
    }

    /// Run one aggregation tick if a whole-second boundary has been crossed
    /// since the last tick.
    ///
    /// The gate fires the first time the integer part of the epoch advances,
    /// so ticks never run faster than 1 Hz; a late tick carries the real
    /// elapsed interval in its window entry.
    pub fn tick(&mut self, now: f64, calibration: &Calibration) -> Option<TickReading> {
        if now.trunc() == self.last_epoch.trunc() {
            return None;
        }

        let time_delta = now - self.last_epoch;
        let count_delta = self.num - self.last_num;
        self.window.push(time_delta, count_delta);

        let cadence = self.window.cadence_rpm();
        let speed = cadence * calibration.wheel_circumference * 60.0 / 1000.0;
        let distance = self.num * calibration.wheel_circumference / 1000.0;
        let calories = self.num * calibration.calorie_factor;
        let elapsed_secs = (now - self.start_epoch).max(0.0).trunc() as u64;

        self.last_epoch = now;
        self.last_num = self.num;

        let reading = TickReading {
            speed,
            distance,
            elapsed_secs,
            calories,
            cadence,
            num: self.num,
        };

        info!(
            "num: {:.1}, speed: {:.1}km/h, distance: {:.2}km, calories: {:.1}kcal, cadence: {:.1}RPM",
            reading.num, reading.speed, reading.distance, reading.calories, reading.cadence
        );

        Some(reading)
    }

    /// Zero the session: rotation counts, clock, and window
    pub fn reset(&mut self, now: f64) {
        self.num = 0.0;
        self.last_num = 0.0;
        self.start_epoch = now;
        self.last_epoch = now;
        self.window.clear();
        info!("session reset");
    }
}

/// Format whole elapsed seconds as `H:MM:SS`.
///
/// Durations under one hour carry a leading zero digit in the hour place
/// (`00:04:31`) so the display column keeps a fixed width; from one hour on
/// the hour digit count grows naturally (`1:23:45`).
pub fn format_elapsed(total_secs: u64) -> String {
    let hours = total_secs / 3600;
    let minutes = (total_secs % 3600) / 60;
    let seconds = total_secs % 60;
    if hours == 0 {
        format!("00:{minutes:02}:{seconds:02}")
    } else {
        format!("{hours}:{minutes:02}:{seconds:02}")
    }
}
