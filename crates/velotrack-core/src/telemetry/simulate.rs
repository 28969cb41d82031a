//! Simulated rider - rotation event generator for testing
//!
//! Generates a plausible pedaling pattern for running the pipeline without a
//! wheel sensor attached. Simulates a rider cruising around 120 RPM with
//! occasional sprints and recovery phases.

use rand::rngs::StdRng;
use rand::Rng;
use rand::SeedableRng;

/// Cruising cadence in RPM (~2 rotations/second)
const CRUISE_RPM: f64 = 120.0;

#[derive(Debug, Clone, Copy, PartialEq)]
enum RidePhase {
    /// Spinning up from a standstill
    Warmup,
    /// Steady pedaling around the cruise cadence
    Cruise,
    /// Short burst well above cruise
    Sprint,
    /// Easing off after a sprint
    Recover,
}

/// Simulated pedaling source.
///
/// Call [`SimulatedRider::advance`] with the real elapsed time of each step;
/// it returns the (fractional) number of rotations produced in that step,
/// which the caller feeds into the shared rotation counter.
pub struct SimulatedRider {
    phase: RidePhase,
    /// Seconds remaining in the current phase
    phase_left: f64,
    /// Current cadence, smoothed toward the phase target
    current_rpm: f64,
    target_rpm: f64,
    rng: StdRng,
}

impl SimulatedRider {
    /// Create a rider starting from a standstill
    pub fn new() -> Self {
        Self::with_rng(StdRng::from_entropy())
    }

    /// Create a rider with a fixed seed (deterministic tests)
    pub fn seeded(seed: u64) -> Self {
        Self::with_rng(StdRng::seed_from_u64(seed))
    }

    fn with_rng(mut rng: StdRng) -> Self {
        let warmup = rng.gen_range(5.0..10.0);
        Self {
            phase: RidePhase::Warmup,
            phase_left: warmup,
            current_rpm: 0.0,
            target_rpm: CRUISE_RPM,
            rng,
        }
    }

    /// Advance the simulation by `dt_secs` and return the rotations produced
    pub fn advance(&mut self, dt_secs: f64) -> f64 {
        if dt_secs <= 0.0 {
            return 0.0;
        }

        self.phase_left -= dt_secs;
        if self.phase_left <= 0.0 {
            self.next_phase();
        }

        // Smooth cadence toward the phase target; legs are not step functions
        let ramp = match self.phase {
            RidePhase::Warmup => 20.0,  // RPM/sec
            RidePhase::Sprint => 60.0,
            _ => 40.0,
        };
        let max_change = ramp * dt_secs;
        let diff = self.target_rpm - self.current_rpm;
        self.current_rpm += diff.clamp(-max_change, max_change);

        // Small per-step wobble so deltas are not perfectly flat
        let wobble = self.rng.gen_range(-3.0..3.0);
        let rpm = (self.current_rpm + wobble).max(0.0);

        rpm / 60.0 * dt_secs
    }

    fn next_phase(&mut self) {
        match self.phase {
            RidePhase::Warmup | RidePhase::Recover => {
                self.phase = RidePhase::Cruise;
                self.phase_left = self.rng.gen_range(20.0..60.0);
                self.target_rpm = self.rng.gen_range(CRUISE_RPM - 10.0..CRUISE_RPM + 10.0);
            }
            RidePhase::Cruise => {
                self.phase = RidePhase::Sprint;
                self.phase_left = self.rng.gen_range(5.0..15.0);
                self.target_rpm = self.rng.gen_range(150.0..190.0);
            }
            RidePhase::Sprint => {
                self.phase = RidePhase::Recover;
                self.phase_left = self.rng.gen_range(10.0..20.0);
                self.target_rpm = self.rng.gen_range(80.0..100.0);
            }
        }
    }
}

impl Default for SimulatedRider {
    fn default() -> Self {
        Self::new()
    }
}
