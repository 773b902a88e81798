// Copyright 2026 the Genie Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The per-vertex deformation engine.
//!
//! Each [`Side`] has its own mapping from a normalised surface position
//! `(tx, ty)` to a displaced window-local point. The four mappings share a
//! single parameter struct, [`DeformParams`], and are dispatched through
//! [`mapping`] rather than a trait object.
//!
//! Every mapping splits the point into a *travel* coordinate (along the axis
//! that points at the icon) and a *cross* coordinate (perpendicular to it):
//!
//! - travel: the surface first stretches so its near edge reaches the icon's
//!   near edge (`k`), then the whole extent slides into that edge (`j`);
//! - cross: the near end narrows from the window extent to the icon extent
//!   (`k`), then the rest follows (`j`), while the neck shifts onto the
//!   icon's position;
//! - wobble: a sinusoidal sway along the cross axis, scaled by `k`.
//!
//! [`Side::Left`] and [`Side::Top`] are evaluated in a mirrored frame of
//! [`Side::Right`] and [`Side::Bottom`]. At `k = 0` every mapping is the
//! identity; at `k = j = 1` every vertex lies on the icon's near edge inside
//! its footprint, for icons of any size including points.

use core::f64::consts::{PI, TAU};

#[cfg(not(feature = "std"))]
use kurbo::common::FloatFuncs as _;
use kurbo::{Affine, Point, Rect, Size};

use crate::geometry::Geometry;
use crate::phase::PhaseParams;
use crate::side::Side;

/// Sway amplitude divisor in [`Wobble::Sway`] mode.
const SWAY_DIVISOR: f64 = 7.0;
/// Amplitude divisor in [`Wobble::Sine`] mode.
const SINE_DIVISOR: f64 = 14.0;
/// Denominators smaller than this are treated as zero.
const MIN_EXTENT: f64 = 1e-9;

/// Lateral oscillation style.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Deserialize),
    serde(rename_all = "lowercase")
)]
pub enum Wobble {
    /// Sways proportionally to the offset between the window and the icon.
    /// Configured as `"default"`.
    #[default]
    #[cfg_attr(feature = "serde", serde(rename = "default"))]
    Sway,
    /// Two full sine periods along the travel axis.
    Sine,
}

impl Wobble {
    /// Parses the settings name (`"default"` or `"sine"`).
    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "default" => Some(Self::Sway),
            "sine" => Some(Self::Sine),
            _ => None,
        }
    }

    /// The settings name.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Sway => "default",
            Self::Sine => "sine",
        }
    }
}

/// Everything a side mapping needs for one frame.
///
/// Rects are in the same (monitor-local) space; results are relative to
/// the window's origin.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct DeformParams {
    /// Window bounds.
    pub window: Rect,
    /// Icon target bounds.
    pub icon: Rect,
    /// Neck parameter in `[0, 1]`.
    pub k: f64,
    /// Pour parameter in `[0, 1]`.
    pub j: f64,
    /// Wobble style.
    pub wobble: Wobble,
}

impl DeformParams {
    /// Builds parameters from classified geometry and one phase snapshot.
    #[must_use]
    pub fn new(geometry: &Geometry, phase: PhaseParams, wobble: Wobble) -> Self {
        Self {
            window: geometry.window,
            icon: geometry.icon,
            k: phase.k,
            j: phase.j,
            wobble,
        }
    }
}

/// Signature shared by the four side mappings.
pub type SideMapping = fn(&DeformParams, f64, f64) -> Point;

/// Returns the mapping for `side`.
#[must_use]
pub const fn mapping(side: Side) -> SideMapping {
    match side {
        Side::Top => deform_top,
        Side::Left => deform_left,
        Side::Right => deform_right,
        Side::Bottom => deform_bottom,
    }
}

/// Maps `(tx, ty)` through the mapping for `side`.
#[inline]
#[must_use]
pub fn deform(side: Side, params: &DeformParams, tx: f64, ty: f64) -> Point {
    mapping(side)(params, tx, ty)
}

/// Collapse toward an icon right of the window.
#[must_use]
pub fn deform_right(p: &DeformParams, tx: f64, ty: f64) -> Point {
    let (w, i) = (p.window, p.icon);
    let tr = Travel::new(w.width(), i.x0 - w.x0, tx, p.k, p.j);
    let y = Cross::vertical(w, i).position(ty, tx, &tr, p, PI);
    Point::new(tr.pos, y)
}

/// Collapse toward an icon left of the window.
#[must_use]
pub fn deform_left(p: &DeformParams, tx: f64, ty: f64) -> Point {
    let (w, i) = (p.window, p.icon);
    let t = 1.0 - tx;
    let tr = Travel::new(w.width(), w.x1 - i.x1, t, p.k, p.j);
    let y = Cross::vertical(w, i).position(ty, t, &tr, p, -PI);
    Point::new(w.width() - tr.pos, y)
}

/// Collapse toward an icon below the window.
#[must_use]
pub fn deform_bottom(p: &DeformParams, tx: f64, ty: f64) -> Point {
    let (w, i) = (p.window, p.icon);
    let tr = Travel::new(w.height(), i.y0 - w.y0, ty, p.k, p.j);
    let x = Cross::horizontal(w, i).position(tx, ty, &tr, p, PI);
    Point::new(x, tr.pos)
}

/// Collapse toward an icon above the window.
#[must_use]
pub fn deform_top(p: &DeformParams, tx: f64, ty: f64) -> Point {
    let (w, i) = (p.window, p.icon);
    let t = 1.0 - ty;
    let tr = Travel::new(w.height(), w.y1 - i.y1, t, p.k, p.j);
    let x = Cross::horizontal(w, i).position(tx, t, &tr, p, -PI);
    Point::new(x, w.height() - tr.pos)
}

// ---------------------------------------------------------------------------
// Shared axis math
// ---------------------------------------------------------------------------

/// Travel-axis state for one vertex, in the direct (RIGHT/BOTTOM) frame.
struct Travel {
    /// Stretched length from the far edge to the leading edge.
    full: f64,
    /// Length still occupied by the surface after pouring.
    span: f64,
    /// Vertex distance from the trailing edge within `span`.
    along: f64,
    /// Vertex position measured from the window's far edge.
    pos: f64,
}

impl Travel {
    fn new(extent: f64, reach: f64, t: f64, k: f64, j: f64) -> Self {
        let expand = reach - extent;
        let full = extent + expand * k;
        let span = full * (1.0 - j);
        let along = t * span;
        Self {
            full,
            span,
            along,
            pos: along + full * j,
        }
    }

    /// Normalised distance from the collapsing end.
    fn remaining(&self) -> f64 {
        ratio(self.span - self.along, self.full)
    }
}

/// Cross-axis extents of the window and icon.
struct Cross {
    win_start: f64,
    extent: f64,
    icon_start: f64,
    icon_extent: f64,
}

impl Cross {
    fn vertical(w: Rect, i: Rect) -> Self {
        Self {
            win_start: w.y0,
            extent: w.height(),
            icon_start: i.y0,
            icon_extent: i.height(),
        }
    }

    fn horizontal(w: Rect, i: Rect) -> Self {
        Self {
            win_start: w.x0,
            extent: w.width(),
            icon_start: i.x0,
            icon_extent: i.width(),
        }
    }

    /// Window-relative cross coordinate for cross parameter `tc` and travel
    /// parameter `t` (0 at the far end, 1 at the near end).
    fn position(&self, tc: f64, t: f64, tr: &Travel, p: &DeformParams, shift: f64) -> f64 {
        let (k, j) = (p.k, p.j);
        let gap = self.icon_start - self.win_start;
        let spread = self.extent - self.icon_extent;

        let size = tc * self.icon_extent
            + tc * spread * (1.0 - j) * (1.0 - t)
            + tc * spread * (1.0 - k) * t;
        let offset = gap * ratio(tr.along, tr.full) * k + gap * j;

        let u = tr.remaining();
        let wobble = match p.wobble {
            Wobble::Sine => (2.0 * TAU * u).sin() * self.extent / SINE_DIVISOR,
            Wobble::Sway => (TAU * u + shift).sin() * (tc * spread - gap) / SWAY_DIVISOR,
        };

        offset + size + wobble * k
    }
}

/// `num / den`, or zero when `den` vanishes.
#[inline]
fn ratio(num: f64, den: f64) -> f64 {
    if den.abs() < MIN_EXTENT { 0.0 } else { num / den }
}

// ---------------------------------------------------------------------------
// Deformer
// ---------------------------------------------------------------------------

/// A side mapping bound to one frame's parameters.
///
/// Copying the parameters in keeps every vertex of a mesh on the same
/// `(k, j)` even if the effect advances mid-iteration.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Deformer {
    side: Side,
    params: DeformParams,
}

impl Deformer {
    /// Binds `params` to the mapping for `side`.
    #[must_use]
    pub const fn new(side: Side, params: DeformParams) -> Self {
        Self { side, params }
    }

    /// Binds classified geometry and a phase snapshot.
    #[must_use]
    pub fn from_geometry(geometry: &Geometry, phase: PhaseParams, wobble: Wobble) -> Self {
        Self::new(geometry.side, DeformParams::new(geometry, phase, wobble))
    }

    /// The collapse side.
    #[must_use]
    pub const fn side(&self) -> Side {
        self.side
    }

    /// The bound parameters.
    #[must_use]
    pub const fn params(&self) -> &DeformParams {
        &self.params
    }

    /// Window-relative displaced position of `(tx, ty)`.
    #[inline]
    #[must_use]
    pub fn deform(&self, tx: f64, ty: f64) -> Point {
        deform(self.side, &self.params, tx, ty)
    }

    /// Displaced position proportioned to a surface of `size`.
    ///
    /// A window with no extent along an axis leaves that axis unscaled.
    #[must_use]
    pub fn deform_scaled(&self, size: Size, tx: f64, ty: f64) -> Point {
        let factor = |target: f64, extent: f64| {
            if extent.abs() < MIN_EXTENT { 1.0 } else { target / extent }
        };
        let window = self.params.window;
        let scale = Affine::scale_non_uniform(
            factor(size.width, window.width()),
            factor(size.height, window.height()),
        );
        scale * self.deform(tx, ty)
    }
}
