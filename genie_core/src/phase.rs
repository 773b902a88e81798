// Copyright 2026 the Genie Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Progress to shape-parameter mapping.
//!
//! The deformation is driven by two parameters instead of raw progress:
//!
//! - `k` — the *neck*: how far the edge facing the icon has narrowed toward
//!   the icon's size.
//! - `j` — the *pour*: how far the whole surface has travelled into the
//!   icon.
//!
//! A minimize spends the first [`SPLIT`] of its progress narrowing the neck
//! (`k: 0 → 1`, `j = 0`) and the rest pouring (`k = 1`, `j: 0 → 1`). An
//! unminimize is the time-reverse: it first un-pours and then widens the
//! neck back, with the split point mirrored to `1 - SPLIT`.

/// Fraction of progress at which the neck phase hands over to the pour
/// phase.
pub const SPLIT: f64 = 0.3;

/// Direction of the transition being animated.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum EffectVariant {
    /// Window pours into its icon.
    Minimize,
    /// Window pours back out of its icon.
    Unminimize,
}

impl EffectVariant {
    /// Shape parameters before the first frame.
    #[must_use]
    pub const fn initial_params(self) -> PhaseParams {
        match self {
            Self::Minimize => PhaseParams::UNDEFORMED,
            Self::Unminimize => PhaseParams::COLLAPSED,
        }
    }

    /// Shape parameters once progress reaches 1.
    #[must_use]
    pub const fn final_params(self) -> PhaseParams {
        match self {
            Self::Minimize => PhaseParams::COLLAPSED,
            Self::Unminimize => PhaseParams::UNDEFORMED,
        }
    }
}

/// Easing curve applied inside each phase.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum Easing {
    /// `t`
    #[default]
    Linear,
    /// `1 - (1 - t)^3`
    EaseOutCubic,
}

impl Easing {
    /// Picks the curve from the `ease_out` setting.
    #[must_use]
    pub const fn from_ease_out(ease_out: bool) -> Self {
        if ease_out { Self::EaseOutCubic } else { Self::Linear }
    }

    /// Evaluates the curve at `t`.
    #[inline]
    #[must_use]
    pub fn apply(self, t: f64) -> f64 {
        match self {
            Self::Linear => t,
            Self::EaseOutCubic => {
                let r = 1.0 - t;
                1.0 - r * r * r
            }
        }
    }
}

/// The `(k, j)` pair consumed by the deformation engine.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PhaseParams {
    /// Neck parameter in `[0, 1]`.
    pub k: f64,
    /// Pour parameter in `[0, 1]`.
    pub j: f64,
}

impl PhaseParams {
    /// The undeformed window.
    pub const UNDEFORMED: Self = Self { k: 0.0, j: 0.0 };

    /// Fully poured into the icon.
    pub const COLLAPSED: Self = Self { k: 1.0, j: 1.0 };

    /// Creates a pair, clamping both values into `[0, 1]`.
    #[must_use]
    pub fn new(k: f64, j: f64) -> Self {
        Self {
            k: unit(k),
            j: unit(j),
        }
    }
}

/// Maps animation progress to [`PhaseParams`] for one variant.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PhaseDriver {
    variant: EffectVariant,
    easing: Easing,
}

impl PhaseDriver {
    /// Creates a driver for the given variant and easing.
    #[must_use]
    pub const fn new(variant: EffectVariant, easing: Easing) -> Self {
        Self { variant, easing }
    }

    /// The variant this driver animates.
    #[must_use]
    pub const fn variant(&self) -> EffectVariant {
        self.variant
    }

    /// The easing curve in use.
    #[must_use]
    pub const fn easing(&self) -> Easing {
        self.easing
    }

    /// Computes `(k, j)` for `progress`, which is clamped to `[0, 1]` first.
    #[must_use]
    pub fn params_at(&self, progress: f64) -> PhaseParams {
        let p = unit(progress);
        let ease = |t: f64| self.easing.apply(unit(t));
        match self.variant {
            EffectVariant::Minimize => {
                if p <= SPLIT {
                    PhaseParams::new(ease(p / SPLIT), 0.0)
                } else {
                    PhaseParams::new(1.0, ease((p - SPLIT) / (1.0 - SPLIT)))
                }
            }
            EffectVariant::Unminimize => {
                let split_point = 1.0 - SPLIT;
                if p <= split_point {
                    PhaseParams::new(1.0, 1.0 - ease(p / split_point))
                } else {
                    PhaseParams::new(1.0 - ease((p - split_point) / (1.0 - split_point)), 0.0)
                }
            }
        }
    }
}

/// Clamps into `[0, 1]`, mapping NaN to 0.
#[inline]
fn unit(v: f64) -> f64 {
    if v.is_nan() { 0.0 } else { v.clamp(0.0, 1.0) }
}
