// Copyright 2026 the Genie Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! User-facing effect settings.
//!
//! [`EffectConfig`] mirrors the settings bundle the shell stores:
//!
//! ```json
//! { "effect": "sine", "duration_ms": 400, "ease_out": false,
//!   "x_tiles": 20, "y_tiles": 20 }
//! ```
//!
//! Out-of-range values are clamped, never rejected. With the `serde`
//! feature the bundle deserialises directly; missing keys take their
//! defaults.

use crate::deform::Wobble;
use crate::geometry::Geometry;
use crate::mesh::{DEFAULT_TILES, MAX_TILES, MIN_TILES, MeshGrid};
use crate::phase::Easing;
use crate::side::ClassifyOptions;
use crate::time::{Duration, Timebase};

/// Shortest accepted animation duration.
pub const MIN_DURATION_MS: u32 = 100;
/// Longest accepted animation duration.
pub const MAX_DURATION_MS: u32 = 1000;
/// Default animation duration.
pub const DEFAULT_DURATION_MS: u32 = 400;

/// Bounds of the area-based duration multiplier.
const AREA_SCALE_MIN: f64 = 0.75;
const AREA_SCALE_MAX: f64 = 1.5;

/// Settings for every effect the registry starts.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Deserialize), serde(default))]
pub struct EffectConfig {
    /// Wobble style.
    pub effect: Wobble,
    /// Base animation duration in milliseconds (100–1000).
    pub duration_ms: u32,
    /// Use cubic ease-out inside each phase.
    pub ease_out: bool,
    /// Horizontal tile count (3–50).
    pub x_tiles: u32,
    /// Vertical tile count (3–50).
    pub y_tiles: u32,
    /// Side classifier tunables.
    pub classify: ClassifyOptions,
    /// Scale the duration by the window's share of its monitor, clamped to
    /// `0.75..=1.5`, so small windows do not snap away and large ones do
    /// not crawl.
    pub area_scaled_duration: bool,
}

impl EffectConfig {
    /// Stock settings.
    pub const DEFAULT: Self = Self {
        effect: Wobble::Sway,
        duration_ms: DEFAULT_DURATION_MS,
        ease_out: false,
        x_tiles: DEFAULT_TILES,
        y_tiles: DEFAULT_TILES,
        classify: ClassifyOptions::DEFAULT,
        area_scaled_duration: false,
    };

    /// Stock settings with the sine wobble and ease-out.
    #[must_use]
    pub const fn sine() -> Self {
        Self {
            effect: Wobble::Sine,
            ease_out: true,
            ..Self::DEFAULT
        }
    }

    /// Returns a copy with every numeric field pulled into range.
    ///
    /// A negative or non-finite classifier epsilon reverts to the default.
    #[must_use]
    pub fn clamped(self) -> Self {
        let mut classify = self.classify;
        if !(classify.epsilon.is_finite() && classify.epsilon >= 0.0) {
            classify.epsilon = ClassifyOptions::DEFAULT_EPSILON;
        }
        Self {
            duration_ms: self.duration_ms.clamp(MIN_DURATION_MS, MAX_DURATION_MS),
            x_tiles: self.x_tiles.clamp(MIN_TILES, MAX_TILES),
            y_tiles: self.y_tiles.clamp(MIN_TILES, MAX_TILES),
            classify,
            ..self
        }
    }

    /// Easing curve selected by `ease_out`.
    #[must_use]
    pub const fn easing(&self) -> Easing {
        Easing::from_ease_out(self.ease_out)
    }

    /// Mesh resolution.
    #[must_use]
    pub fn grid(&self) -> MeshGrid {
        MeshGrid::new(self.x_tiles, self.y_tiles)
    }

    /// Clamped base duration in `timebase` ticks.
    #[must_use]
    pub fn base_duration(&self, timebase: Timebase) -> Duration {
        let ms = self.duration_ms.clamp(MIN_DURATION_MS, MAX_DURATION_MS);
        Duration::from_millis(u64::from(ms), timebase)
    }

    /// Multiplier applied to the base duration for `geometry`.
    ///
    /// `1.0` unless [`area_scaled_duration`](Self::area_scaled_duration) is
    /// set and the monitor has a usable area.
    #[must_use]
    pub fn duration_scale(&self, geometry: &Geometry) -> f64 {
        if !self.area_scaled_duration {
            return 1.0;
        }
        geometry
            .area_ratio()
            .filter(|r| r.is_finite())
            .map_or(1.0, |r| r.clamp(AREA_SCALE_MIN, AREA_SCALE_MAX))
    }

    /// Animation duration for `geometry` in `timebase` ticks.
    #[must_use]
    pub fn duration_for(&self, geometry: &Geometry, timebase: Timebase) -> Duration {
        self.base_duration(timebase)
            .mul_f64(self.duration_scale(geometry))
    }
}

impl Default for EffectConfig {
    fn default() -> Self {
        Self::DEFAULT
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use kurbo::Rect;

    fn geometry(window: Rect) -> Geometry {
        let mut g = Geometry::fallback(window, Rect::new(0.0, 0.0, 1000.0, 1000.0));
        g.fallback = false;
        g
    }

    #[test]
    fn defaults() {
        let c = EffectConfig::default();
        assert_eq!(c.effect, Wobble::Sway);
        assert_eq!(c.duration_ms, 400);
        assert!(!c.ease_out);
        assert_eq!(c.grid(), MeshGrid::new(20, 20));
        assert_eq!(c.easing(), Easing::Linear);
        assert_eq!(c.base_duration(Timebase::NANOS), Duration(400_000_000));
    }

    #[test]
    fn out_of_range_values_are_clamped() {
        let c = EffectConfig {
            duration_ms: 5_000,
            x_tiles: 0,
            y_tiles: 99,
            classify: ClassifyOptions {
                epsilon: f64::NAN,
                ..ClassifyOptions::DEFAULT
            },
            ..EffectConfig::DEFAULT
        }
        .clamped();
        assert_eq!(c.duration_ms, 1000);
        assert_eq!((c.x_tiles, c.y_tiles), (3, 50));
        assert!((c.classify.epsilon - 40.0).abs() < f64::EPSILON);

        let short = EffectConfig {
            duration_ms: 10,
            ..EffectConfig::DEFAULT
        };
        assert_eq!(short.base_duration(Timebase::MICROS), Duration(100_000));
    }

    #[test]
    fn area_scaling_is_opt_in_and_clamped() {
        let small = geometry(Rect::new(0.0, 0.0, 100.0, 100.0));
        let half = geometry(Rect::new(0.0, 0.0, 1000.0, 900.0));
        let off = EffectConfig::DEFAULT;
        assert!((off.duration_scale(&small) - 1.0).abs() < f64::EPSILON);

        let on = EffectConfig {
            area_scaled_duration: true,
            ..EffectConfig::DEFAULT
        };
        assert!((on.duration_scale(&small) - 0.75).abs() < 1e-12);
        assert!((on.duration_scale(&half) - 0.9).abs() < 1e-12);
        assert_eq!(on.duration_for(&small, Timebase::MICROS), Duration(300_000));
    }

    #[test]
    fn sine_preset() {
        let c = EffectConfig::sine();
        assert_eq!(c.effect, Wobble::Sine);
        assert_eq!(c.easing(), Easing::EaseOutCubic);
        assert_eq!(c.duration_ms, DEFAULT_DURATION_MS);
    }

    #[cfg(feature = "serde")]
    #[test]
    fn parses_settings_bundle() {
        let c: EffectConfig = serde_json::from_str(
            r#"{ "effect": "sine", "duration_ms": 650, "ease_out": true, "x_tiles": 12 }"#,
        )
        .unwrap();
        assert_eq!(c.effect, Wobble::Sine);
        assert_eq!(c.duration_ms, 650);
        assert!(c.ease_out);
        assert_eq!((c.x_tiles, c.y_tiles), (12, 20));
        assert_eq!(c.classify, ClassifyOptions::DEFAULT);

        let c: EffectConfig = serde_json::from_str(
            r#"{ "effect": "default", "classify": { "epsilon": 24.0, "rtl_override": false } }"#,
        )
        .unwrap();
        assert_eq!(c.effect, Wobble::Sway);
        assert!((c.classify.epsilon - 24.0).abs() < f64::EPSILON);
        assert!(c.classify.snap_to_border);
        assert!(!c.classify.rtl_override);
    }
}
