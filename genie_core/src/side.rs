// Copyright 2026 the Genie Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Collapse-side classification.
//!
//! [`classify`] decides, once per effect, which monitor edge the window
//! pours toward and normalises the icon target into the owning monitor's
//! local space. The checks run in a fixed priority order and the first
//! match wins:
//!
//! 1. icon bottom within `epsilon` of the monitor bottom → [`Side::Bottom`]
//! 2. icon left within `epsilon` of the monitor left → [`Side::Left`]
//! 3. icon right within `epsilon` of the monitor right → [`Side::Right`]
//! 4. otherwise → [`Side::Top`]
//!
//! With [`ClassifyOptions::snap_to_border`] the icon is then flattened onto
//! the icon monitor's edge, so the animation always ends on a border even
//! when the reported icon geometry is imprecise.

use kurbo::Rect;

use crate::geometry::{Geometry, SurfaceSnapshot, bottom_center};
use crate::output::LayoutDirection;

/// Monitor edge the window collapses toward.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Side {
    /// Top edge.
    Top,
    /// Left edge.
    Left,
    /// Right edge.
    Right,
    /// Bottom edge.
    Bottom,
}

impl Side {
    /// Whether travel runs along the x axis.
    #[must_use]
    pub const fn is_horizontal(self) -> bool {
        matches!(self, Self::Left | Self::Right)
    }

    /// Short lowercase name for diagnostics.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Top => "top",
            Self::Left => "left",
            Self::Right => "right",
            Self::Bottom => "bottom",
        }
    }
}

/// Tunables for [`classify`].
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Deserialize), serde(default))]
pub struct ClassifyOptions {
    /// Distance from a monitor edge within which an icon counts as docked
    /// on that edge.
    pub epsilon: f64,
    /// Flatten the icon onto the chosen monitor edge.
    pub snap_to_border: bool,
    /// Reclassify [`Side::Top`] as [`Side::Right`] in right-to-left layouts
    /// when the icon sits in the right half of the monitor.
    ///
    /// This guesses at dock placement and can misclassify a genuinely
    /// top-docked icon in an RTL session; turn it off if that happens.
    pub rtl_override: bool,
}

impl ClassifyOptions {
    /// Default docking threshold.
    pub const DEFAULT_EPSILON: f64 = 40.0;

    /// Default options: 40 unit threshold, snapping and RTL override on.
    pub const DEFAULT: Self = Self {
        epsilon: Self::DEFAULT_EPSILON,
        snap_to_border: true,
        rtl_override: true,
    };
}

impl Default for ClassifyOptions {
    fn default() -> Self {
        Self::DEFAULT
    }
}

/// Classifies the snapshot into monitor-local [`Geometry`].
///
/// Pure: identical inputs always produce identical output. Missing monitors
/// and zero-area windows produce [`Geometry::fallback`]. An icon outside
/// every monitor is measured against the owning monitor.
#[must_use]
pub fn classify(snapshot: &SurfaceSnapshot<'_>, options: &ClassifyOptions) -> Geometry {
    let Some(owner) = snapshot.owning_monitor() else {
        return Geometry::fallback(snapshot.window, snapshot.window);
    };
    let monitor = owner.bounds;
    if snapshot.window.area().abs() <= f64::EPSILON {
        return Geometry::fallback(snapshot.window, monitor);
    }

    let icon = snapshot
        .icon
        .map(|r| r.abs())
        .unwrap_or_else(|| Rect::from_origin_size(bottom_center(monitor), (0.0, 0.0)));

    let icon_monitor = snapshot
        .monitors
        .iter()
        .find(|m| m.contains_scaled(icon.x0, icon.y0))
        .map_or(monitor, |m| m.bounds);

    let origin = monitor.origin().to_vec2();
    let local_icon = icon - origin;
    let (width, height) = (monitor.width(), monitor.height());
    let eps = options.epsilon;

    let mut side = if local_icon.y1 >= height - eps {
        Side::Bottom
    } else if local_icon.x0 <= eps {
        Side::Left
    } else if local_icon.x1 >= width - eps {
        Side::Right
    } else {
        Side::Top
    };

    if side == Side::Top
        && options.rtl_override
        && snapshot.layout == LayoutDirection::Rtl
        && local_icon.x0 > width / 2.0
    {
        side = Side::Right;
    }

    let mut geometry = Geometry {
        window: snapshot.window - origin,
        icon: local_icon,
        monitor,
        icon_monitor,
        side,
        fallback: false,
    };
    if options.snap_to_border {
        geometry.icon = snap(local_icon, side, geometry.icon_monitor_local());
    }
    geometry
}

/// Flattens `icon` onto the `side` edge of `edges` (both monitor-local).
fn snap(icon: Rect, side: Side, edges: Rect) -> Rect {
    match side {
        Side::Bottom => Rect::new(icon.x0, edges.y1, icon.x1, edges.y1),
        Side::Top => Rect::new(icon.x0, edges.y0, icon.x1, edges.y0),
        Side::Left => Rect::new(edges.x0, icon.y0, edges.x0, icon.y1),
        Side::Right => Rect::new(edges.x1, icon.y0, edges.x1, icon.y1),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::output::{Monitor, MonitorId};

    const SCREEN: Rect = Rect::new(0.0, 0.0, 1920.0, 1080.0);
    const WINDOW: Rect = Rect::new(100.0, 100.0, 500.0, 400.0);

    fn point(x: f64, y: f64) -> Rect {
        Rect::new(x, y, x, y)
    }

    fn one_screen() -> [Monitor; 1] {
        [Monitor::new(MonitorId(0), SCREEN)]
    }

    fn classify_on(window: Rect, monitors: &[Monitor], icon: Option<Rect>) -> Geometry {
        classify(
            &SurfaceSnapshot::new(window, 0, monitors, icon),
            &ClassifyOptions::DEFAULT,
        )
    }

    #[test]
    fn bottom_dock_point() {
        let monitors = one_screen();
        let snap = SurfaceSnapshot::new(WINDOW, 0, &monitors, Some(point(960.0, 1080.0)));
        let g = classify(&snap, &ClassifyOptions::DEFAULT);
        assert_eq!(g.side, Side::Bottom);
        assert_eq!(g.icon, point(960.0, 1080.0), "already on the border");
        assert_eq!(g.window, WINDOW);
        assert!(!g.fallback);
    }

    #[test]
    fn left_dock_point() {
        let monitors = one_screen();
        let snap = SurfaceSnapshot::new(WINDOW, 0, &monitors, Some(point(5.0, 500.0)));
        let g = classify(&snap, &ClassifyOptions::DEFAULT);
        assert_eq!(g.side, Side::Left);
        assert_eq!(g.icon, point(0.0, 500.0), "snapped to the left edge");

        let unsnapped = ClassifyOptions {
            snap_to_border: false,
            ..ClassifyOptions::DEFAULT
        };
        assert_eq!(classify(&snap, &unsnapped).icon, point(5.0, 500.0));
    }

    #[test]
    fn right_and_top_docks() {
        let monitors = one_screen();
        let icon = Rect::new(1890.0, 400.0, 1910.0, 448.0);
        let g = classify_on(WINDOW, &monitors, Some(icon));
        assert_eq!(g.side, Side::Right);
        assert_eq!(g.icon, Rect::new(1920.0, 400.0, 1920.0, 448.0));

        let icon = Rect::new(300.0, 4.0, 348.0, 52.0);
        let g = classify_on(WINDOW, &monitors, Some(icon));
        assert_eq!(g.side, Side::Top);
        assert_eq!(g.icon, Rect::new(300.0, 0.0, 348.0, 0.0));
    }

    #[test]
    fn bottom_wins_over_left() {
        let monitors = one_screen();
        let snap = SurfaceSnapshot::new(WINDOW, 0, &monitors, Some(point(10.0, 1075.0)));
        assert_eq!(classify(&snap, &ClassifyOptions::DEFAULT).side, Side::Bottom);
    }

    #[test]
    fn rtl_override_moves_top_right() {
        let monitors = one_screen();
        let snap = SurfaceSnapshot::new(WINDOW, 0, &monitors, Some(point(1500.0, 300.0)))
            .with_layout(LayoutDirection::Rtl);
        let g = classify(&snap, &ClassifyOptions::DEFAULT);
        assert_eq!(g.side, Side::Right);
        assert_eq!(g.icon, point(1920.0, 300.0));

        let off = ClassifyOptions {
            rtl_override: false,
            ..ClassifyOptions::DEFAULT
        };
        assert_eq!(classify(&snap, &off).side, Side::Top);

        let ltr = SurfaceSnapshot::new(WINDOW, 0, &monitors, Some(point(1500.0, 300.0)));
        assert_eq!(classify(&ltr, &ClassifyOptions::DEFAULT).side, Side::Top);
    }

    #[test]
    fn icon_on_second_monitor_is_localised() {
        let monitors = [
            Monitor::new(MonitorId(0), SCREEN),
            Monitor::new(MonitorId(1), Rect::new(1920.0, 0.0, 3840.0, 1080.0)),
        ];
        let window = Rect::new(2020.0, 100.0, 2420.0, 400.0);
        let snap = SurfaceSnapshot::new(window, 1, &monitors, Some(point(2880.0, 1080.0)));
        let g = classify(&snap, &ClassifyOptions::DEFAULT);
        assert_eq!(g.side, Side::Bottom);
        assert_eq!(g.window, WINDOW);
        assert_eq!(g.icon, point(960.0, 1080.0));
        assert_eq!(g.icon_monitor, monitors[1].bounds);
    }

    #[test]
    fn icon_outside_every_monitor_uses_owner() {
        let monitors = one_screen();
        let snap = SurfaceSnapshot::new(WINDOW, 0, &monitors, Some(point(5000.0, 5000.0)));
        let g = classify(&snap, &ClassifyOptions::DEFAULT);
        assert_eq!(g.icon_monitor, SCREEN);
        assert_eq!(g.side, Side::Bottom);
        assert_eq!(g.icon, point(5000.0, 1080.0));
    }

    #[test]
    fn missing_icon_defaults_to_bottom_center() {
        let monitors = one_screen();
        let g = classify_on(WINDOW, &monitors, None);
        assert_eq!(g.side, Side::Bottom);
        assert_eq!(g.icon, point(960.0, 1080.0));
    }

    #[test]
    fn degenerate_inputs_fall_back_to_top() {
        let g = classify_on(WINDOW, &[], Some(point(5.0, 5.0)));
        assert_eq!(g.side, Side::Top);
        assert!(g.fallback);

        let monitors = one_screen();
        let flat = Rect::new(100.0, 100.0, 100.0, 400.0);
        let g = classify_on(flat, &monitors, Some(point(5.0, 500.0)));
        assert_eq!(g.side, Side::Top);
        assert_eq!(g.icon, point(960.0, 1080.0));
        assert!(g.fallback);
    }

    #[test]
    fn classification_is_deterministic() {
        let monitors = one_screen();
        let icon = Rect::new(700.0, 1040.0, 748.0, 1080.0);
        let snap = SurfaceSnapshot::new(WINDOW, 0, &monitors, Some(icon));
        let first = classify(&snap, &ClassifyOptions::DEFAULT);
        for _ in 0..8 {
            assert_eq!(classify(&snap, &ClassifyOptions::DEFAULT), first);
        }
    }
}
