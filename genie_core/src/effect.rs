// Copyright 2026 the Genie Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! One minimize or unminimize transition.
//!
//! A [`LampEffect`] walks a three-state lifecycle:
//!
//! ```text
//!   Initializing ──attach──► Running ──progress = 1──────► Terminated
//!        │                      │ ──overview visible───►     ▲
//!        │                      └──cancel / terminate──►     │
//!        └────────────────────────terminate──────────────────┘
//! ```
//!
//! Geometry and side are fixed by [`attach`](LampEffect::attach), which
//! succeeds exactly once. Every [`tick`](LampEffect::tick) recomputes
//! progress and `(k, j)` and marks the effect dirty; the throttle only
//! decides whether a redraw is *requested*. Everything after termination is
//! a no-op, and the host hears about completion exactly once.

use alloc::vec::Vec;

use kurbo::{Point, Rect, Size};

use crate::config::EffectConfig;
use crate::deform::{Deformer, Wobble};
use crate::geometry::{Geometry, SurfaceSnapshot};
use crate::host::Host;
use crate::mesh::MeshGrid;
use crate::output::SurfaceId;
use crate::phase::{EffectVariant, PhaseDriver, PhaseParams};
use crate::side::{ClassifyOptions, Side, classify};
use crate::throttle::FrameThrottle;
use crate::time::{Duration, HostTime, Timebase};
use crate::timing::{FrameTick, TickContext};
use crate::trace::{EffectBeginEvent, EffectEndEvent, FrameEvent, RedrawEvent, Tracer};

/// Lifecycle state of a [`LampEffect`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum EffectState {
    /// Created, geometry not yet captured.
    Initializing,
    /// Attached and animating.
    Running,
    /// Finished; further calls are no-ops.
    Terminated,
}

/// Why an effect terminated.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum EndReason {
    /// Progress reached 1.
    Completed,
    /// Cancelled externally, e.g. the overview became visible.
    Cancelled,
    /// A new transition started on the same surface.
    Replaced,
    /// The surface went away.
    SurfaceRemoved,
}

impl EndReason {
    /// Short lowercase name for diagnostics.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Completed => "completed",
            Self::Cancelled => "cancelled",
            Self::Replaced => "replaced",
            Self::SurfaceRemoved => "surface-removed",
        }
    }
}

/// Result of one [`LampEffect::tick`].
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FrameOutcome {
    /// The throttle allowed a redraw request on this tick.
    pub redraw_requested: bool,
    /// Progress after the tick.
    pub progress: f64,
    /// Shape parameters after the tick.
    pub params: PhaseParams,
    /// Set when the effect terminated during this tick.
    pub ended: Option<EndReason>,
}

impl FrameOutcome {
    /// Whether the effect terminated during this tick.
    #[must_use]
    pub const fn is_finished(&self) -> bool {
        self.ended.is_some()
    }
}

/// A single magic-lamp transition on one surface.
#[derive(Clone, Debug)]
pub struct LampEffect {
    surface: SurfaceId,
    driver: PhaseDriver,
    wobble: Wobble,
    grid: MeshGrid,
    classify: ClassifyOptions,
    config: EffectConfig,
    timebase: Timebase,
    state: EffectState,
    geometry: Option<Geometry>,
    start: HostTime,
    last_seen: Option<HostTime>,
    duration: Duration,
    progress: f64,
    params: PhaseParams,
    throttle: FrameThrottle,
    frames: u64,
    end_reason: Option<EndReason>,
}

impl LampEffect {
    /// Creates an effect in [`EffectState::Initializing`].
    ///
    /// `config` is clamped; its resolution and timing are fixed from here on.
    #[must_use]
    pub fn new(
        surface: SurfaceId,
        variant: EffectVariant,
        config: &EffectConfig,
        timebase: Timebase,
    ) -> Self {
        let config = config.clamped();
        Self {
            surface,
            driver: PhaseDriver::new(variant, config.easing()),
            wobble: config.effect,
            grid: config.grid(),
            classify: config.classify,
            config,
            timebase,
            state: EffectState::Initializing,
            geometry: None,
            start: HostTime::default(),
            last_seen: None,
            duration: config.base_duration(timebase),
            progress: 0.0,
            params: variant.initial_params(),
            throttle: FrameThrottle::with_timebase(timebase),
            frames: 0,
            end_reason: None,
        }
    }

    /// Captures geometry, anchors the start time at `now` and starts
    /// running.
    ///
    /// Returns `false` without side effects unless the effect is still
    /// initializing.
    pub fn attach(
        &mut self,
        snapshot: &SurfaceSnapshot<'_>,
        now: HostTime,
        tracer: &mut Tracer<'_>,
    ) -> bool {
        if self.state != EffectState::Initializing {
            return false;
        }
        let geometry = classify(snapshot, &self.classify);
        self.duration = self.config.duration_for(&geometry, self.timebase);
        self.start = now;
        self.last_seen = Some(now);
        self.geometry = Some(geometry);
        self.state = EffectState::Running;
        self.throttle.mark_dirty();

        tracer.effect_begin(&EffectBeginEvent {
            surface: self.surface,
            variant: self.variant(),
            at: now,
            side: geometry.side,
            fallback: geometry.fallback,
            window: geometry.window,
            icon: geometry.icon,
            duration: self.duration,
        });
        true
    }

    /// Advances the animation to `tick.now`.
    ///
    /// Terminates with [`EndReason::Cancelled`] when `ctx` reports the
    /// overview, and with [`EndReason::Completed`] once progress reaches 1.
    /// Outside [`EffectState::Running`] this does nothing.
    pub fn tick(
        &mut self,
        tick: &FrameTick,
        ctx: &TickContext,
        host: &mut dyn Host,
        tracer: &mut Tracer<'_>,
    ) -> FrameOutcome {
        if self.state != EffectState::Running {
            return self.idle_outcome();
        }
        if ctx.overview_visible {
            self.terminate(EndReason::Cancelled, host, tracer);
            return FrameOutcome {
                ended: Some(EndReason::Cancelled),
                ..self.idle_outcome()
            };
        }

        let elapsed = tick.now.saturating_duration_since(self.start);
        // A clock sample that runs backwards holds the current progress.
        self.progress = self.progress.max(elapsed.fraction_of(self.duration));
        self.params = self.driver.params_at(self.progress);
        self.last_seen = Some(tick.now);
        self.frames += 1;

        let redraw_requested = self.throttle.poll(tick.now);
        tracer.frame(&FrameEvent {
            surface: self.surface,
            frame_index: tick.frame_index,
            now: tick.now,
            progress: self.progress,
            k: self.params.k,
            j: self.params.j,
        });
        if redraw_requested {
            tracer.redraw(&RedrawEvent {
                surface: self.surface,
                frame_index: tick.frame_index,
                at: tick.now,
            });
        }

        let mut ended = None;
        if self.progress >= 1.0 {
            self.terminate(EndReason::Completed, host, tracer);
            ended = Some(EndReason::Completed);
        }
        FrameOutcome {
            redraw_requested,
            progress: self.progress,
            params: self.params,
            ended,
        }
    }

    /// Cancels the effect. Same as [`terminate`](Self::terminate) with
    /// [`EndReason::Cancelled`].
    pub fn cancel(&mut self, host: &mut dyn Host, tracer: &mut Tracer<'_>) -> bool {
        self.terminate(EndReason::Cancelled, host, tracer)
    }

    /// Ends the effect for `reason`, notifies the host and releases the
    /// geometry.
    ///
    /// Idempotent: returns `false` if the effect had already terminated.
    pub fn terminate(
        &mut self,
        reason: EndReason,
        host: &mut dyn Host,
        tracer: &mut Tracer<'_>,
    ) -> bool {
        if self.state == EffectState::Terminated {
            return false;
        }
        self.state = EffectState::Terminated;
        self.end_reason = Some(reason);
        self.throttle.reset();

        host.transition_completed(self.surface, self.variant());
        tracer.effect_end(&EffectEndEvent {
            surface: self.surface,
            variant: self.variant(),
            reason,
            at: self.last_seen,
            frames: self.frames,
        });
        self.geometry = None;
        true
    }

    /// A deformer bound to the current `(k, j)`, while running.
    #[must_use]
    pub fn deformer(&self) -> Option<Deformer> {
        if self.state != EffectState::Running {
            return None;
        }
        self.geometry
            .as_ref()
            .map(|g| Deformer::from_geometry(g, self.params, self.wobble))
    }

    /// Window-relative displaced position of `(tx, ty)`, while running.
    #[must_use]
    pub fn deform(&self, tx: f64, ty: f64) -> Option<Point> {
        self.deformer().map(|d| d.deform(tx, ty))
    }

    /// Displaced position proportioned to a surface of `size`, while
    /// running.
    #[must_use]
    pub fn deform_scaled(&self, size: Size, tx: f64, ty: f64) -> Option<Point> {
        self.deformer().map(|d| d.deform_scaled(size, tx, ty))
    }

    /// Deforms the whole mesh into `out` and clears the dirty flag.
    ///
    /// Returns the bounds of the deformed mesh, or `None` (leaving `out`
    /// untouched) when not running.
    pub fn evaluate_mesh(&mut self, out: &mut Vec<Point>) -> Option<Rect> {
        let deformer = self.deformer()?;
        self.throttle.take_dirty();
        Some(self.grid.deform_into(&deformer, out))
    }

    /// Returns and clears the dirty flag.
    pub fn take_dirty(&mut self) -> bool {
        self.throttle.take_dirty()
    }

    /// Whether state changed since the mesh was last evaluated.
    #[must_use]
    pub const fn is_dirty(&self) -> bool {
        self.throttle.is_dirty()
    }

    /// Animated surface.
    #[must_use]
    pub const fn surface(&self) -> SurfaceId {
        self.surface
    }

    /// Minimize or unminimize.
    #[must_use]
    pub const fn variant(&self) -> EffectVariant {
        self.driver.variant()
    }

    /// Current lifecycle state.
    #[must_use]
    pub const fn state(&self) -> EffectState {
        self.state
    }

    /// Whether the effect is attached and animating.
    #[must_use]
    pub fn is_running(&self) -> bool {
        self.state == EffectState::Running
    }

    /// Whether the effect has terminated.
    #[must_use]
    pub fn is_terminated(&self) -> bool {
        self.state == EffectState::Terminated
    }

    /// Why the effect ended, once it has.
    #[must_use]
    pub const fn end_reason(&self) -> Option<EndReason> {
        self.end_reason
    }

    /// Captured geometry, while running.
    #[must_use]
    pub const fn geometry(&self) -> Option<&Geometry> {
        self.geometry.as_ref()
    }

    /// Collapse side, while running.
    #[must_use]
    pub fn side(&self) -> Option<Side> {
        self.geometry.map(|g| g.side)
    }

    /// Progress in `[0, 1]`.
    #[must_use]
    pub const fn progress(&self) -> f64 {
        self.progress
    }

    /// Current shape parameters.
    #[must_use]
    pub const fn params(&self) -> PhaseParams {
        self.params
    }

    /// Mesh resolution.
    #[must_use]
    pub const fn grid(&self) -> MeshGrid {
        self.grid
    }

    /// Effective duration. Final once attached.
    #[must_use]
    pub const fn duration(&self) -> Duration {
        self.duration
    }

    /// Number of ticks processed while running.
    #[must_use]
    pub const fn frames(&self) -> u64 {
        self.frames
    }

    fn idle_outcome(&self) -> FrameOutcome {
        FrameOutcome {
            redraw_requested: false,
            progress: self.progress,
            params: self.params,
            ended: None,
        }
    }
}
