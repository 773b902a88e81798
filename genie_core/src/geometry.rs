// Copyright 2026 the Genie Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Geometry captured once when an effect attaches to its surface.
//!
//! [`SurfaceSnapshot`] is what the window-manager glue hands over at the
//! start of a transition, in global layout coordinates. [`Geometry`] is the
//! classified result in the owning monitor's local space: the window, the
//! (possibly snapped) icon target, both monitors and the collapse
//! [`Side`]. It never changes for the lifetime of an effect.

use kurbo::{Point, Rect};

use crate::output::{LayoutDirection, Monitor};
use crate::side::Side;

/// Window, monitor and icon state at the instant a transition starts.
#[derive(Clone, Copy, Debug)]
pub struct SurfaceSnapshot<'a> {
    /// Window bounds in global coordinates.
    pub window: Rect,
    /// Index of the window's owning monitor in `monitors`.
    pub monitor_index: usize,
    /// All monitors, in layout order.
    pub monitors: &'a [Monitor],
    /// Icon target in global coordinates. A zero-sized rect is a point;
    /// `None` means icon discovery found nothing.
    pub icon: Option<Rect>,
    /// Global layout direction.
    pub layout: LayoutDirection,
}

impl<'a> SurfaceSnapshot<'a> {
    /// Creates a left-to-right snapshot.
    #[must_use]
    pub const fn new(
        window: Rect,
        monitor_index: usize,
        monitors: &'a [Monitor],
        icon: Option<Rect>,
    ) -> Self {
        Self {
            window,
            monitor_index,
            monitors,
            icon,
            layout: LayoutDirection::Ltr,
        }
    }

    /// Returns this snapshot with the given layout direction.
    #[must_use]
    pub const fn with_layout(mut self, layout: LayoutDirection) -> Self {
        self.layout = layout;
        self
    }

    /// The owning monitor. An out-of-range index falls back to the first
    /// monitor; `None` only when there are no monitors at all.
    #[must_use]
    pub fn owning_monitor(&self) -> Option<&'a Monitor> {
        self.monitors
            .get(self.monitor_index)
            .or_else(|| self.monitors.first())
    }
}

/// Classified geometry in the owning monitor's local coordinates.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Geometry {
    /// Window bounds, monitor-local.
    pub window: Rect,
    /// Icon target, monitor-local. Snapping may have collapsed one
    /// dimension to zero.
    pub icon: Rect,
    /// Owning monitor bounds, global.
    pub monitor: Rect,
    /// Monitor containing the icon, global.
    pub icon_monitor: Rect,
    /// Edge the window collapses toward.
    pub side: Side,
    /// Whether a deterministic fallback replaced inconsistent input.
    pub fallback: bool,
}

impl Geometry {
    /// The fallback used for missing monitors or a zero-area window: collapse
    /// toward [`Side::Top`] into a point at the monitor's horizontal centre
    /// on its bottom edge.
    #[must_use]
    pub fn fallback(window: Rect, monitor: Rect) -> Self {
        let origin = monitor.origin().to_vec2();
        Self {
            window: window - origin,
            icon: Rect::from_origin_size(bottom_center(monitor) - origin, (0.0, 0.0)),
            monitor,
            icon_monitor: monitor,
            side: Side::Top,
            fallback: true,
        }
    }

    /// The icon monitor's bounds in owning-monitor-local coordinates.
    #[must_use]
    pub fn icon_monitor_local(&self) -> Rect {
        self.icon_monitor - self.monitor.origin().to_vec2()
    }

    /// Ratio of window area to owning monitor area, or `None` for a
    /// degenerate monitor.
    #[must_use]
    pub fn area_ratio(&self) -> Option<f64> {
        let monitor_area = self.monitor.area();
        (monitor_area > 0.0).then(|| self.window.area() / monitor_area)
    }
}

/// Horizontal centre of the bottom edge.
#[must_use]
pub fn bottom_center(rect: Rect) -> Point {
    Point::new(rect.center().x, rect.y1)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::output::MonitorId;

    #[test]
    fn fallback_targets_bottom_center() {
        let monitor = Rect::new(100.0, 50.0, 1100.0, 850.0);
        let g = Geometry::fallback(Rect::new(200.0, 150.0, 200.0, 150.0), monitor);
        assert_eq!(g.side, Side::Top);
        assert!(g.fallback);
        assert_eq!(g.icon, Rect::new(500.0, 800.0, 500.0, 800.0));
        assert_eq!(g.window.origin(), Point::new(100.0, 100.0));
    }

    #[test]
    fn owning_monitor_index_falls_back_to_first() {
        let monitors = [Monitor::new(MonitorId(7), Rect::new(0.0, 0.0, 10.0, 10.0))];
        let snap = SurfaceSnapshot::new(Rect::ZERO, 3, &monitors, None);
        assert_eq!(snap.owning_monitor().map(|m| m.id), Some(MonitorId(7)));
        let empty = SurfaceSnapshot::new(Rect::ZERO, 0, &[], None);
        assert!(empty.owning_monitor().is_none());
    }

    #[test]
    fn area_ratio_guards_empty_monitor() {
        let g = Geometry::fallback(Rect::new(0.0, 0.0, 10.0, 10.0), Rect::ZERO);
        assert_eq!(g.area_ratio(), None);
        let monitor = Rect::new(0.0, 0.0, 100.0, 100.0);
        let g = Geometry::fallback(Rect::new(0.0, 0.0, 50.0, 50.0), monitor);
        assert_eq!(g.area_ratio(), Some(0.25));
    }
}
