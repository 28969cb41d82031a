//! Shared rotation counter
//!
//! The event source (hardware interrupt callback or simulator task) increments
//! the counter from a different execution context than the aggregation loop,
//! so the counter is the one piece of truly shared state in the producer. A
//! single atomic cell is all the synchronization required: the aggregator only
//! ever reads it, and the reset path only ever zeroes it.

use std::sync::atomic::{AtomicU64, Ordering};

/// Monotonically non-decreasing rotation count, shared across execution
/// contexts.
///
/// Stored as the bit pattern of an `f64` inside an `AtomicU64` so the
/// simulated event source can deliver fractional increments without tearing.
#[derive(Debug)]
pub struct RotationCounter(AtomicU64);

impl RotationCounter {
    /// Create a counter starting at zero
    pub fn new() -> Self {
        Self(AtomicU64::new(0f64.to_bits()))
    }

    /// Create a counter seeded with a previously persisted count
    pub fn with_count(count: f64) -> Self {
        Self(AtomicU64::new(count.max(0.0).to_bits()))
    }

    /// Add a (possibly fractional) number of rotations
    pub fn add(&self, delta: f64) {
        // fetch_update never fails here: the closure always returns Some.
        let _ = self.0.fetch_update(Ordering::AcqRel, Ordering::Acquire, |bits| {
            Some((f64::from_bits(bits) + delta).to_bits())
        });
    }

    /// Record exactly one rotation event
    pub fn increment(&self) {
        self.add(1.0);
    }

    /// Current rotation count
    pub fn get(&self) -> f64 {
        f64::from_bits(self.0.load(Ordering::Acquire))
    }

    /// Zero the counter (session reset)
    pub fn reset(&self) {
        self.0.store(0f64.to_bits(), Ordering::Release);
    }
}

impl Default for RotationCounter {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    #[test]
    fn test_increment_and_get() {
        let counter = RotationCounter::new();
        assert_eq!(counter.get(), 0.0);

        counter.increment();
        counter.increment();
        assert_eq!(counter.get(), 2.0);

        counter.add(0.5);
        assert_eq!(counter.get(), 2.5);
    }

    #[test]
    fn test_reset_returns_to_zero() {
        let counter = RotationCounter::with_count(42.0);
        assert_eq!(counter.get(), 42.0);

        counter.reset();
        assert_eq!(counter.get(), 0.0);
    }

    #[test]
    fn test_concurrent_increments_are_not_lost() {
        let counter = Arc::new(RotationCounter::new());
        let mut handles = Vec::new();

        for _ in 0..4 {
            let counter = Arc::clone(&counter);
            handles.push(std::thread::spawn(move || {
                for _ in 0..1000 {
                    counter.increment();
                }
            }));
        }

        for handle in handles {
            handle.join().unwrap();
        }

        assert_eq!(counter.get(), 4000.0);
    }
}
