// Copyright 2026 the Genie Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Monotonic host time, durations and timebase conversion.
//!
//! The frame clock hands every tick a [`HostTime`] in platform-native
//! monotonic ticks. Animation durations and the redraw interval of the
//! [`FrameThrottle`](crate::throttle::FrameThrottle) are expressed as
//! [`Duration`]s in the same units, built from milliseconds through a
//! [`Timebase`].
//!
//! All conversions use `u128` intermediates to avoid overflow.

use core::fmt;
use core::ops::Add;

const NANOS_PER_MILLI: u64 = 1_000_000;

/// A point in time expressed as platform-native monotonic ticks.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct HostTime(pub u64);

impl HostTime {
    /// Returns the raw tick value.
    #[inline]
    #[must_use]
    pub const fn ticks(self) -> u64 {
        self.0
    }

    /// Converts this host time to nanoseconds using the given timebase.
    #[inline]
    #[must_use]
    pub const fn to_nanos(self, timebase: Timebase) -> u64 {
        timebase.ticks_to_nanos(self.0)
    }

    /// Returns the duration between `self` and an earlier time, or zero if
    /// `earlier` is after `self`.
    #[inline]
    #[must_use]
    pub const fn saturating_duration_since(self, earlier: Self) -> Duration {
        Duration(self.0.saturating_sub(earlier.0))
    }
}

impl Add<Duration> for HostTime {
    type Output = Self;

    #[inline]
    fn add(self, rhs: Duration) -> Self {
        Self(self.0.saturating_add(rhs.0))
    }
}

impl fmt::Debug for HostTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "HostTime({})", self.0)
    }
}

/// Rational conversion factor from ticks to nanoseconds.
///
/// `nanoseconds = ticks * numer / denom`
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct Timebase {
    /// Numerator of the ticks-to-nanoseconds ratio.
    pub numer: u32,
    /// Denominator of the ticks-to-nanoseconds ratio.
    pub denom: u32,
}

impl Timebase {
    /// A timebase where ticks are already nanoseconds (1:1).
    pub const NANOS: Self = Self { numer: 1, denom: 1 };

    /// A timebase where ticks are microseconds, as delivered by
    /// `performance.now()`-style clocks.
    pub const MICROS: Self = Self {
        numer: 1_000,
        denom: 1,
    };

    /// Creates a new timebase with the given numerator and denominator.
    ///
    /// # Panics
    ///
    /// Panics if `numer` or `denom` is zero.
    #[inline]
    #[must_use]
    pub const fn new(numer: u32, denom: u32) -> Self {
        assert!(numer != 0, "timebase numerator must not be zero");
        assert!(denom != 0, "timebase denominator must not be zero");
        Self { numer, denom }
    }

    /// Converts a tick count to nanoseconds.
    #[inline]
    #[must_use]
    #[expect(
        clippy::cast_possible_truncation,
        reason = "u128 intermediate avoids overflow; truncation back to u64 is intentional"
    )]
    pub const fn ticks_to_nanos(self, ticks: u64) -> u64 {
        let wide = ticks as u128 * self.numer as u128 / self.denom as u128;
        wide as u64
    }

    /// Converts nanoseconds to a tick count.
    #[inline]
    #[must_use]
    #[expect(
        clippy::cast_possible_truncation,
        reason = "u128 intermediate avoids overflow; truncation back to u64 is intentional"
    )]
    pub const fn nanos_to_ticks(self, nanos: u64) -> u64 {
        let wide = nanos as u128 * self.denom as u128 / self.numer as u128;
        wide as u64
    }
}

impl Default for Timebase {
    fn default() -> Self {
        Self::NANOS
    }
}

impl fmt::Debug for Timebase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Timebase({}/{})", self.numer, self.denom)
    }
}

/// A duration in platform-native ticks.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Duration(pub u64);

impl Duration {
    /// A zero-length duration.
    pub const ZERO: Self = Self(0);

    /// Returns the raw tick value.
    #[inline]
    #[must_use]
    pub const fn ticks(self) -> u64 {
        self.0
    }

    /// Returns `true` for a zero-length duration.
    #[inline]
    #[must_use]
    pub const fn is_zero(self) -> bool {
        self.0 == 0
    }

    /// Creates a duration from a millisecond count and timebase.
    #[inline]
    #[must_use]
    pub const fn from_millis(millis: u64, timebase: Timebase) -> Self {
        Self(timebase.nanos_to_ticks(millis.saturating_mul(NANOS_PER_MILLI)))
    }

    /// Converts this duration to nanoseconds using the given timebase.
    #[inline]
    #[must_use]
    pub const fn to_nanos(self, timebase: Timebase) -> u64 {
        timebase.ticks_to_nanos(self.0)
    }

    /// Scales the duration by a non-negative factor, saturating on overflow.
    #[must_use]
    #[expect(
        clippy::cast_possible_truncation,
        reason = "the scaled tick count is clamped to the u64 range before the cast"
    )]
    pub fn mul_f64(self, factor: f64) -> Self {
        let scaled = self.0 as f64 * factor.max(0.0);
        if scaled >= u64::MAX as f64 {
            Self(u64::MAX)
        } else {
            Self(scaled as u64)
        }
    }

    /// Returns `self / total` as a fraction clamped to `[0, 1]`.
    ///
    /// A zero `total` counts as already elapsed and yields `1.0`.
    #[must_use]
    pub fn fraction_of(self, total: Self) -> f64 {
        if total.is_zero() {
            return 1.0;
        }
        (self.0 as f64 / total.0 as f64).clamp(0.0, 1.0)
    }
}

impl fmt::Debug for Duration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Duration({})", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn millis_in_nanosecond_ticks() {
        assert_eq!(Duration::from_millis(8, Timebase::NANOS), Duration(8_000_000));
        assert_eq!(Duration::from_millis(400, Timebase::MICROS), Duration(400_000));
    }

    #[test]
    fn millis_macos_style() {
        // Typical ARM Mac: 125/3 (ticks run at 24 MHz).
        let tb = Timebase::new(125, 3);
        let d = Duration::from_millis(1_000, tb);
        assert_eq!(d.ticks(), 24_000_000, "1s at 24 MHz");
        assert_eq!(d.to_nanos(tb), 1_000_000_000);
    }

    #[test]
    fn fraction_is_clamped() {
        let total = Duration(400);
        assert!((Duration(100).fraction_of(total) - 0.25).abs() < 1e-12);
        assert!((Duration(800).fraction_of(total) - 1.0).abs() < 1e-12);
        assert!((Duration(5).fraction_of(Duration::ZERO) - 1.0).abs() < 1e-12);
    }

    #[test]
    fn scaling_saturates_and_ignores_negative_factors() {
        assert_eq!(Duration(400).mul_f64(0.75), Duration(300));
        assert_eq!(Duration(400).mul_f64(-2.0), Duration::ZERO);
        assert_eq!(Duration(u64::MAX).mul_f64(2.0), Duration(u64::MAX));
    }

    #[test]
    fn host_time_ops() {
        let t = HostTime(1000);
        assert_eq!((t + Duration(200)).ticks(), 1200);
        assert_eq!(t.saturating_duration_since(HostTime(1500)), Duration::ZERO);
        assert_eq!(t.saturating_duration_since(HostTime(400)), Duration(600));
        assert_eq!(HostTime(u64::MAX) + Duration(1), HostTime(u64::MAX));
    }
}
