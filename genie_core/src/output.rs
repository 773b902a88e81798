// Copyright 2026 the Genie Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Monitors and animated surfaces.
//!
//! [`MonitorId`] and [`SurfaceId`] are lightweight handles assigned by the
//! window-manager glue; the core passes them through without interpreting
//! the value. [`Monitor`] is the geometry the side classifier works with.

use core::fmt;

use kurbo::Rect;

/// Identifies a display output.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct MonitorId(pub u32);

impl fmt::Debug for MonitorId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "MonitorId({})", self.0)
    }
}

/// An opaque reference to the window surface being animated.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct SurfaceId(pub u64);

impl fmt::Debug for SurfaceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "SurfaceId({})", self.0)
    }
}

/// A display output in global layout coordinates.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Monitor {
    /// Output handle.
    pub id: MonitorId,
    /// Bounds in global coordinates.
    pub bounds: Rect,
    /// Independent scale factor of this output.
    pub scale: f64,
}

impl Monitor {
    /// Creates an unscaled monitor.
    #[must_use]
    pub const fn new(id: MonitorId, bounds: Rect) -> Self {
        Self {
            id,
            bounds,
            scale: 1.0,
        }
    }

    /// Returns this monitor with the given scale factor.
    #[must_use]
    pub const fn with_scale(mut self, scale: f64) -> Self {
        self.scale = scale;
        self
    }

    /// Whether `(x, y)` lies inside the bounds stretched by the scale factor.
    ///
    /// Edges are inclusive, so an icon point on the very bottom edge of a
    /// screen still belongs to it. A non-positive or non-finite scale is
    /// treated as `1.0`.
    #[must_use]
    pub fn contains_scaled(&self, x: f64, y: f64) -> bool {
        let scale = if self.scale.is_finite() && self.scale > 0.0 {
            self.scale
        } else {
            1.0
        };
        let b = self.bounds;
        x >= b.x0 && x <= b.x0 + b.width() * scale && y >= b.y0 && y <= b.y0 + b.height() * scale
    }
}

/// Global text layout direction reported by the shell.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum LayoutDirection {
    /// Left-to-right.
    #[default]
    Ltr,
    /// Right-to-left.
    Rtl,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn containment_is_inclusive() {
        let m = Monitor::new(MonitorId(0), Rect::new(0.0, 0.0, 1920.0, 1080.0));
        assert!(m.contains_scaled(960.0, 1080.0));
        assert!(m.contains_scaled(0.0, 0.0));
        assert!(!m.contains_scaled(1921.0, 10.0));
    }

    #[test]
    fn containment_uses_scale_factor() {
        let m = Monitor::new(MonitorId(1), Rect::new(1920.0, 0.0, 2880.0, 540.0)).with_scale(2.0);
        assert!(m.contains_scaled(3500.0, 1000.0), "stretched by 2x");
        assert!(!m.contains_scaled(3900.0, 10.0));
    }

    #[test]
    fn bogus_scale_falls_back_to_one() {
        let m = Monitor::new(MonitorId(0), Rect::new(0.0, 0.0, 100.0, 100.0)).with_scale(f64::NAN);
        assert!(m.contains_scaled(100.0, 100.0));
        assert!(!m.contains_scaled(150.0, 50.0));
    }
}
