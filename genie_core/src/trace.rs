// Copyright 2026 the Genie Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Tracing and diagnostics for effect lifecycles.
//!
//! This module provides a [`TraceSink`] trait with one method per event the
//! effects emit. All method bodies default to no-ops, so implementing only
//! the events you care about is fine.
//!
//! [`Tracer`] wraps an optional `&mut dyn TraceSink`. When the `trace` feature
//! is **off**, every `Tracer` method compiles to nothing. When **on**, each
//! method performs a single `Option` branch before dispatching.
//!
//! # Crate features
//!
//! - `trace` — enables the `Tracer` method bodies (one branch per call).

use kurbo::Rect;

use crate::effect::EndReason;
use crate::output::SurfaceId;
use crate::phase::EffectVariant;
use crate::side::Side;
use crate::time::{Duration, HostTime};

// ---------------------------------------------------------------------------
// Event structs
// ---------------------------------------------------------------------------

/// Emitted when an effect attaches to its surface and fixes its geometry.
#[derive(Clone, Copy, Debug)]
pub struct EffectBeginEvent {
    /// Animated surface.
    pub surface: SurfaceId,
    /// Minimize or unminimize.
    pub variant: EffectVariant,
    /// Host time the animation is anchored at.
    pub at: HostTime,
    /// Classified collapse side.
    pub side: Side,
    /// Whether classification fell back on inconsistent input.
    pub fallback: bool,
    /// Window bounds, monitor-local.
    pub window: Rect,
    /// Icon target, monitor-local.
    pub icon: Rect,
    /// Effective duration in ticks.
    pub duration: Duration,
}

/// Emitted for every tick of a running effect.
#[derive(Clone, Copy, Debug)]
pub struct FrameEvent {
    /// Animated surface.
    pub surface: SurfaceId,
    /// Frame counter from the clock.
    pub frame_index: u64,
    /// Host time of the tick.
    pub now: HostTime,
    /// Normalised progress.
    pub progress: f64,
    /// Neck parameter.
    pub k: f64,
    /// Pour parameter.
    pub j: f64,
}

/// Emitted when the throttle lets a redraw request through.
#[derive(Clone, Copy, Debug)]
pub struct RedrawEvent {
    /// Animated surface.
    pub surface: SurfaceId,
    /// Frame counter from the clock.
    pub frame_index: u64,
    /// Host time of the request.
    pub at: HostTime,
}

/// Emitted once when an effect terminates.
#[derive(Clone, Copy, Debug)]
pub struct EffectEndEvent {
    /// Animated surface.
    pub surface: SurfaceId,
    /// Minimize or unminimize.
    pub variant: EffectVariant,
    /// Why it ended.
    pub reason: EndReason,
    /// Last host time the effect saw, if it ever ran.
    pub at: Option<HostTime>,
    /// Number of ticks processed while running.
    pub frames: u64,
}

// ---------------------------------------------------------------------------
// TraceSink trait
// ---------------------------------------------------------------------------

/// Receives trace events from effects.
///
/// All methods have default no-op implementations, so you only need to
/// override the events you care about.
pub trait TraceSink {
    /// Called when an effect attaches.
    fn on_effect_begin(&mut self, e: &EffectBeginEvent) {
        _ = e;
    }

    /// Called on every tick of a running effect.
    fn on_frame(&mut self, e: &FrameEvent) {
        _ = e;
    }

    /// Called when a redraw request passes the throttle.
    fn on_redraw(&mut self, e: &RedrawEvent) {
        _ = e;
    }

    /// Called when an effect terminates.
    fn on_effect_end(&mut self, e: &EffectEndEvent) {
        _ = e;
    }
}

// ---------------------------------------------------------------------------
// NoopSink
// ---------------------------------------------------------------------------

/// A [`TraceSink`] that discards all events.
#[derive(Clone, Copy, Debug, Default)]
pub struct NoopSink;

impl TraceSink for NoopSink {}

// ---------------------------------------------------------------------------
// Tracer wrapper
// ---------------------------------------------------------------------------

/// Thin wrapper around an optional [`TraceSink`].
///
/// When the `trace` feature is **off**, every method compiles to nothing. When
/// **on**, each method checks the inner `Option` (one branch) before
/// dispatching to the sink.
pub struct Tracer<'a> {
    #[cfg(feature = "trace")]
    sink: Option<&'a mut dyn TraceSink>,
    #[cfg(not(feature = "trace"))]
    _marker: core::marker::PhantomData<&'a mut dyn TraceSink>,
}

impl core::fmt::Debug for Tracer<'_> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Tracer").finish_non_exhaustive()
    }
}

impl<'a> Tracer<'a> {
    /// Creates a tracer that dispatches to the given sink.
    #[inline]
    #[must_use]
    pub fn new(sink: &'a mut dyn TraceSink) -> Self {
        #[cfg(feature = "trace")]
        {
            Self { sink: Some(sink) }
        }
        #[cfg(not(feature = "trace"))]
        {
            _ = sink;
            Self {
                _marker: core::marker::PhantomData,
            }
        }
    }

    /// Creates a tracer that discards all events.
    #[inline]
    #[must_use]
    pub fn none() -> Self {
        #[cfg(feature = "trace")]
        {
            Self { sink: None }
        }
        #[cfg(not(feature = "trace"))]
        {
            Self {
                _marker: core::marker::PhantomData,
            }
        }
    }

    /// Emits an [`EffectBeginEvent`].
    #[inline]
    pub fn effect_begin(&mut self, e: &EffectBeginEvent) {
        #[cfg(feature = "trace")]
        if let Some(s) = &mut self.sink {
            s.on_effect_begin(e);
        }
        #[cfg(not(feature = "trace"))]
        {
            _ = e;
        }
    }

    /// Emits a [`FrameEvent`].
    #[inline]
    pub fn frame(&mut self, e: &FrameEvent) {
        #[cfg(feature = "trace")]
        if let Some(s) = &mut self.sink {
            s.on_frame(e);
        }
        #[cfg(not(feature = "trace"))]
        {
            _ = e;
        }
    }

    /// Emits a [`RedrawEvent`].
    #[inline]
    pub fn redraw(&mut self, e: &RedrawEvent) {
        #[cfg(feature = "trace")]
        if let Some(s) = &mut self.sink {
            s.on_redraw(e);
        }
        #[cfg(not(feature = "trace"))]
        {
            _ = e;
        }
    }

    /// Emits an [`EffectEndEvent`].
    #[inline]
    pub fn effect_end(&mut self, e: &EffectEndEvent) {
        #[cfg(feature = "trace")]
        if let Some(s) = &mut self.sink {
            s.on_effect_end(e);
        }
        #[cfg(not(feature = "trace"))]
        {
            _ = e;
        }
    }
}

impl Default for Tracer<'_> {
    fn default() -> Self {
        Self::none()
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_frame() -> FrameEvent {
        FrameEvent {
            surface: SurfaceId(9),
            frame_index: 42,
            now: HostTime(1_000_000),
            progress: 0.5,
            k: 1.0,
            j: 0.25,
        }
    }

    fn sample_end() -> EffectEndEvent {
        EffectEndEvent {
            surface: SurfaceId(9),
            variant: EffectVariant::Minimize,
            reason: EndReason::Completed,
            at: Some(HostTime(2_000_000)),
            frames: 24,
        }
    }

    #[test]
    fn noop_sink_compiles() {
        let mut sink = NoopSink;
        sink.on_frame(&sample_frame());
        sink.on_effect_end(&sample_end());
        sink.on_redraw(&RedrawEvent {
            surface: SurfaceId(9),
            frame_index: 42,
            at: HostTime(1_000_000),
        });
    }

    #[test]
    fn tracer_none_does_nothing() {
        let mut tracer = Tracer::none();
        tracer.frame(&sample_frame());
        tracer.effect_end(&sample_end());
    }

    #[cfg(feature = "trace")]
    #[test]
    fn tracer_dispatches_to_sink() {
        use alloc::vec::Vec;

        struct RecordingSink {
            frames: Vec<u64>,
            ends: Vec<EndReason>,
        }
        impl TraceSink for RecordingSink {
            fn on_frame(&mut self, e: &FrameEvent) {
                self.frames.push(e.frame_index);
            }

            fn on_effect_end(&mut self, e: &EffectEndEvent) {
                self.ends.push(e.reason);
            }
        }

        let mut sink = RecordingSink {
            frames: Vec::new(),
            ends: Vec::new(),
        };
        let mut tracer = Tracer::new(&mut sink);
        tracer.frame(&sample_frame());
        tracer.effect_end(&sample_end());
        drop(tracer);
        assert_eq!(sink.frames, &[42]);
        assert_eq!(sink.ends, &[EndReason::Completed]);
    }
}
