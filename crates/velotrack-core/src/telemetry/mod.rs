//! Rotation telemetry
//!
//! Turns raw discrete rotation events into smoothed rate metrics.

mod counter;
mod session;
mod simulate;
mod window;

pub use counter::RotationCounter;
pub use session::{format_elapsed, SessionState, TickReading};
pub use simulate::SimulatedRider;
pub use window::{RateWindow, WINDOW_LEN};
