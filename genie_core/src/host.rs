// Copyright 2026 the Genie Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Contract with the window manager that owns the real transition.
//!
//! The core never talks to a compositor. It needs exactly two things from
//! its host:
//!
//! - **Suppress** — when an effect starts, the host's own minimize or
//!   unminimize animation must be skipped so the two do not fight.
//! - **Complete** — when an effect ends, for whatever reason, the host must
//!   be told the transition finished so it can restore normal rendering of
//!   the surface (hide it for minimize, show it for unminimize).
//!
//! Completion is reported exactly once per effect. A frame loop wires it up
//! like this:
//!
//! ```rust,ignore
//! fn on_minimize(surface: SurfaceId, snapshot: SurfaceSnapshot<'_>, now: HostTime) {
//!     let variant = EffectVariant::Minimize;
//!     registry.begin(surface, variant, &snapshot, now, &ctx, &mut host, &mut tracer);
//! }
//!
//! fn on_frame(tick: FrameTick) {
//!     let report = registry.tick(&tick, &ctx, &mut host, &mut tracer);
//!     if report.redraw_requested {
//!         compositor.queue_redraw();
//!     }
//! }
//! ```

use core::fmt;

use crate::output::SurfaceId;
use crate::phase::EffectVariant;

/// Window-manager hooks used by effects and the registry.
pub trait Host {
    /// Skip the host's own animation for this transition.
    fn suppress_default_animation(&mut self, surface: SurfaceId, variant: EffectVariant);

    /// The transition on `surface` is over.
    fn transition_completed(&mut self, surface: SurfaceId, variant: EffectVariant);
}

impl<H: Host + ?Sized> Host for &mut H {
    fn suppress_default_animation(&mut self, surface: SurfaceId, variant: EffectVariant) {
        (**self).suppress_default_animation(surface, variant);
    }

    fn transition_completed(&mut self, surface: SurfaceId, variant: EffectVariant) {
        (**self).transition_completed(surface, variant);
    }
}

/// A [`Host`] that ignores every call.
#[derive(Clone, Copy, Debug, Default)]
pub struct NoopHost;

impl Host for NoopHost {
    fn suppress_default_animation(&mut self, _: SurfaceId, _: EffectVariant) {}

    fn transition_completed(&mut self, _: SurfaceId, _: EffectVariant) {}
}

/// A [`Host`] built from two closures.
pub struct CallbackHost<S, C> {
    suppress: S,
    complete: C,
}

impl<S, C> CallbackHost<S, C>
where
    S: FnMut(SurfaceId, EffectVariant),
    C: FnMut(SurfaceId, EffectVariant),
{
    /// Wraps the suppress and complete callbacks.
    #[must_use]
    pub const fn new(suppress: S, complete: C) -> Self {
        Self { suppress, complete }
    }
}

impl<S, C> Host for CallbackHost<S, C>
where
    S: FnMut(SurfaceId, EffectVariant),
    C: FnMut(SurfaceId, EffectVariant),
{
    fn suppress_default_animation(&mut self, surface: SurfaceId, variant: EffectVariant) {
        (self.suppress)(surface, variant);
    }

    fn transition_completed(&mut self, surface: SurfaceId, variant: EffectVariant) {
        (self.complete)(surface, variant);
    }
}

impl<S, C> fmt::Debug for CallbackHost<S, C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CallbackHost").finish_non_exhaustive()
    }
}

#[cfg(test)]
pub(crate) mod testing {
    use alloc::vec::Vec;

    use super::*;

    /// Records every host call in order.
    #[derive(Debug, Default)]
    pub(crate) struct RecordingHost {
        pub(crate) suppressed: Vec<(SurfaceId, EffectVariant)>,
        pub(crate) completed: Vec<(SurfaceId, EffectVariant)>,
    }

    impl Host for RecordingHost {
        fn suppress_default_animation(&mut self, surface: SurfaceId, variant: EffectVariant) {
            self.suppressed.push((surface, variant));
        }

        fn transition_completed(&mut self, surface: SurfaceId, variant: EffectVariant) {
            self.completed.push((surface, variant));
        }
    }
}
