// Copyright 2026 the Genie Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Redraw request limiting.
//!
//! The frame clock may tick faster than it is worth repainting. The
//! [`FrameThrottle`] lets a redraw request through at most once per
//! interval, while the effect state is still recomputed and marked dirty on
//! every tick so the next permitted redraw paints fresh data.

use crate::time::{Duration, HostTime, Timebase};

/// Minimum spacing between redraw requests, in milliseconds.
pub const MIN_REDRAW_INTERVAL_MS: u64 = 8;

/// Gate for redraw requests.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct FrameThrottle {
    min_interval: Duration,
    last_redraw: Option<HostTime>,
    dirty: bool,
}

impl FrameThrottle {
    /// Creates a throttle with the given minimum spacing.
    #[must_use]
    pub const fn new(min_interval: Duration) -> Self {
        Self {
            min_interval,
            last_redraw: None,
            dirty: false,
        }
    }

    /// Creates a throttle with a spacing of `millis` in `timebase` ticks.
    #[must_use]
    pub const fn from_millis(millis: u64, timebase: Timebase) -> Self {
        Self::new(Duration::from_millis(millis, timebase))
    }

    /// The default 8 ms throttle.
    #[must_use]
    pub const fn with_timebase(timebase: Timebase) -> Self {
        Self::from_millis(MIN_REDRAW_INTERVAL_MS, timebase)
    }

    /// Minimum spacing between redraws.
    #[must_use]
    pub const fn min_interval(&self) -> Duration {
        self.min_interval
    }

    /// Host time of the last permitted redraw.
    #[must_use]
    pub const fn last_redraw(&self) -> Option<HostTime> {
        self.last_redraw
    }

    /// Marks state dirty for this tick and reports whether a redraw may be
    /// requested now.
    ///
    /// The first call always passes. A clock running backwards never
    /// passes until it catches up.
    pub fn poll(&mut self, now: HostTime) -> bool {
        self.dirty = true;
        let due = match self.last_redraw {
            None => true,
            Some(last) => now >= last && now.saturating_duration_since(last) >= self.min_interval,
        };
        if due {
            self.last_redraw = Some(now);
        }
        due
    }

    /// Marks state dirty without asking for a redraw.
    pub fn mark_dirty(&mut self) {
        self.dirty = true;
    }

    /// Whether state changed since the last [`take_dirty`](Self::take_dirty).
    #[must_use]
    pub const fn is_dirty(&self) -> bool {
        self.dirty
    }

    /// Returns and clears the dirty flag.
    pub fn take_dirty(&mut self) -> bool {
        core::mem::take(&mut self.dirty)
    }

    /// Forgets the last redraw and clears the dirty flag.
    pub fn reset(&mut self) {
        self.last_redraw = None;
        self.dirty = false;
    }
}

impl Default for FrameThrottle {
    fn default() -> Self {
        Self::with_timebase(Timebase::NANOS)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const MS: u64 = 1_000_000;

    #[test]
    fn two_ms_ticks_over_100_ms() {
        let mut t = FrameThrottle::default();
        let redraws = (0..=50).filter(|i| t.poll(HostTime(i * 2 * MS))).count();
        assert_eq!(redraws, 13);
        assert!(redraws <= 100 / 8 + 1);
    }

    #[test]
    fn every_tick_marks_dirty() {
        let mut t = FrameThrottle::default();
        assert!(t.poll(HostTime(0)));
        assert!(t.take_dirty());
        assert!(!t.poll(HostTime(MS)));
        assert!(t.is_dirty(), "throttled ticks still mark state dirty");
        assert!(t.take_dirty());
        assert!(!t.is_dirty());
    }

    #[test]
    fn interval_boundary_is_inclusive() {
        let mut t = FrameThrottle::default();
        assert!(t.poll(HostTime(10 * MS)));
        assert!(!t.poll(HostTime(18 * MS - 1)));
        assert!(t.poll(HostTime(18 * MS)));
        assert_eq!(t.last_redraw(), Some(HostTime(18 * MS)));
    }

    #[test]
    fn backwards_clock_is_held() {
        let mut t = FrameThrottle::default();
        assert!(t.poll(HostTime(100 * MS)));
        assert!(!t.poll(HostTime(50 * MS)));
        assert!(t.poll(HostTime(108 * MS)));
    }

    #[test]
    fn reset_allows_immediate_redraw() {
        let mut t = FrameThrottle::from_millis(8, Timebase::MICROS);
        assert_eq!(t.min_interval(), Duration(8_000));
        assert!(t.poll(HostTime(0)));
        assert!(!t.poll(HostTime(1)));
        t.reset();
        assert!(!t.is_dirty());
        assert!(t.poll(HostTime(2)));
    }
}
