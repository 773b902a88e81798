// Copyright 2026 the Genie Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Tile mesh over the window surface.
//!
//! A [`MeshGrid`] splits the surface into `x_tiles × y_tiles` quads. The
//! deformation is evaluated once per corner vertex, so a frame costs
//! `(x_tiles + 1) × (y_tiles + 1)` evaluations. The resolution is fixed when
//! the effect is created.

use alloc::vec::Vec;

use kurbo::{Point, Rect};

use crate::deform::Deformer;

/// Smallest accepted tile count per axis.
pub const MIN_TILES: u32 = 3;
/// Largest accepted tile count per axis.
pub const MAX_TILES: u32 = 50;
/// Default tile count per axis.
pub const DEFAULT_TILES: u32 = 20;

/// Tile resolution of the deformed surface.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct MeshGrid {
    x_tiles: u32,
    y_tiles: u32,
}

impl MeshGrid {
    /// Creates a grid, clamping each count into [`MIN_TILES`]`..=`[`MAX_TILES`].
    #[must_use]
    pub fn new(x_tiles: u32, y_tiles: u32) -> Self {
        Self {
            x_tiles: x_tiles.clamp(MIN_TILES, MAX_TILES),
            y_tiles: y_tiles.clamp(MIN_TILES, MAX_TILES),
        }
    }

    /// Horizontal tile count.
    #[inline]
    #[must_use]
    pub const fn x_tiles(&self) -> u32 {
        self.x_tiles
    }

    /// Vertical tile count.
    #[inline]
    #[must_use]
    pub const fn y_tiles(&self) -> u32 {
        self.y_tiles
    }

    /// Number of vertices per row.
    #[inline]
    #[must_use]
    pub const fn columns(&self) -> u32 {
        self.x_tiles + 1
    }

    /// Number of vertices, i.e. deformation evaluations per frame.
    #[must_use]
    pub const fn vertex_count(&self) -> usize {
        (self.x_tiles as usize + 1) * (self.y_tiles as usize + 1)
    }

    /// Normalised `(tx, ty)` of every vertex, row by row from the top.
    pub fn vertices(&self) -> impl Iterator<Item = (f64, f64)> + use<> {
        let (xt, yt) = (self.x_tiles, self.y_tiles);
        (0..=yt).flat_map(move |row| {
            let ty = f64::from(row) / f64::from(yt);
            (0..=xt).map(move |col| (f64::from(col) / f64::from(xt), ty))
        })
    }

    /// Two counter-clockwise triangles per tile, as indices into
    /// [`vertices`](Self::vertices).
    pub fn indices(&self) -> impl Iterator<Item = [u32; 3]> + use<> {
        let (xt, yt) = (self.x_tiles, self.y_tiles);
        let columns = xt + 1;
        (0..yt).flat_map(move |row| {
            (0..xt).flat_map(move |col| {
                let tl = row * columns + col;
                let tr = tl + 1;
                let bl = tl + columns;
                let br = bl + 1;
                [[tl, bl, tr], [tr, bl, br]]
            })
        })
    }

    /// Deforms every vertex into `out` (cleared first) and returns the
    /// bounding box of the result.
    ///
    /// All vertices use the single parameter snapshot held by `deformer`.
    pub fn deform_into(&self, deformer: &Deformer, out: &mut Vec<Point>) -> Rect {
        out.clear();
        out.reserve(self.vertex_count());
        let mut bounds: Option<Rect> = None;
        for (tx, ty) in self.vertices() {
            let p = deformer.deform(tx, ty);
            bounds = Some(bounds.map_or_else(|| Rect::from_points(p, p), |b| b.union_pt(p)));
            out.push(p);
        }
        bounds.unwrap_or(Rect::ZERO)
    }
}

impl Default for MeshGrid {
    fn default() -> Self {
        Self::new(DEFAULT_TILES, DEFAULT_TILES)
    }
}
