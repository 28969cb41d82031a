//! Sliding rate window
//!
//! Fixed-length ring buffers of per-tick time and rotation deltas. The window
//! starts full of zero entries so early readings are defined, which is why
//! the cadence computation guards the zero denominator.

use std::collections::VecDeque;

/// Number of tick deltas the window holds
pub const WINDOW_LEN: usize = 10;

/// Paired ring buffers of inter-tick timings and rotation-count increases.
///
/// Always holds exactly [`WINDOW_LEN`] entries in each buffer; pushing a new
/// delta evicts the oldest.
#[derive(Debug, Clone)]
pub struct RateWindow {
    /// Seconds elapsed per aggregation tick
    time_deltas: VecDeque<f64>,
    /// Rotation-count increase per aggregation tick
    count_deltas: VecDeque<f64>,
}

impl RateWindow {
    /// Create a window filled with zero entries
    pub fn new() -> Self {
        Self {
            time_deltas: VecDeque::from(vec![0.0; WINDOW_LEN]),
            count_deltas: VecDeque::from(vec![0.0; WINDOW_LEN]),
        }
    }

    /// Push one tick's deltas, evicting the oldest pair
    pub fn push(&mut self, time_delta: f64, count_delta: f64) {
        self.time_deltas.pop_front();
        self.time_deltas.push_back(time_delta);
        self.count_deltas.pop_front();
        self.count_deltas.push_back(count_delta);
    }

    /// Refill both buffers with zeros (session reset)
    pub fn clear(&mut self) {
        *self = Self::new();
    }

    /// Smoothed cadence over the window, in revolutions per minute.
    ///
    /// Returns 0 while the buffered time deltas sum to zero, which covers the
    /// startup period when the window still holds its zero-initialized
    /// entries.
    pub fn cadence_rpm(&self) -> f64 {
        let total_time: f64 = self.time_deltas.iter().sum();
        if total_time > 0.0 {
            let total_count: f64 = self.count_deltas.iter().sum();
            total_count / total_time * 60.0
        } else {
            0.0
        }
    }

    /// Number of entries in each buffer (always [`WINDOW_LEN`])
    pub fn len(&self) -> usize {
        self.time_deltas.len()
    }

    /// Never true; present for API completeness
    pub fn is_empty(&self) -> bool {
        self.time_deltas.is_empty()
    }
}

impl Default for RateWindow {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_starts_full_of_zeros() {
        let window = RateWindow::new();
        assert_eq!(window.len(), WINDOW_LEN);
        assert_eq!(window.cadence_rpm(), 0.0);
    }

    #[test]
    fn test_zero_time_deltas_guard() {
        let mut window = RateWindow::new();
        // A tick with dt=0 must not divide by zero
        window.push(0.0, 5.0);
        assert_eq!(window.cadence_rpm(), 0.0);
    }

    #[test]
    fn test_push_keeps_fixed_length() {
        let mut window = RateWindow::new();
        for _ in 0..25 {
            window.push(1.0, 2.0);
        }
        assert_eq!(window.len(), WINDOW_LEN);
    }

    #[test]
    fn test_cadence_two_per_second() {
        let mut window = RateWindow::new();
        // 2 rotations/second sustained: zeros in the window do not skew the
        // ratio because they contribute to neither sum.
        for _ in 0..5 {
            window.push(1.0, 2.0);
        }
        assert!((window.cadence_rpm() - 120.0).abs() < 1e-9);
    }

    #[test]
    fn test_eviction_drops_oldest() {
        let mut window = RateWindow::new();
        // Fill with a fast phase, then a slow phase long enough to evict it
        for _ in 0..WINDOW_LEN {
            window.push(1.0, 3.0);
        }
        for _ in 0..WINDOW_LEN {
            window.push(1.0, 1.0);
        }
        assert!((window.cadence_rpm() - 60.0).abs() < 1e-9);
    }
}
