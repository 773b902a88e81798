// Copyright 2026 the Genie Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Per-frame inputs delivered by the frame clock.
//!
//! The effect is only ever re-entered from the clock's per-frame callback.
//! Each call carries two values:
//!
//! - [`FrameTick`] — when the frame happens and which frame it is.
//! - [`TickContext`] — a read-only snapshot of host state that can end an
//!   animation early (e.g. the overview being shown).
//!
//! Host state is passed in explicitly at every tick instead of being read
//! from globals, so a whole animation can be replayed in tests without a
//! live window manager.

use crate::time::HostTime;

/// A frame opportunity delivered by the frame clock.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct FrameTick {
    /// Current host time when the tick was generated.
    pub now: HostTime,
    /// Monotonically increasing frame counter.
    pub frame_index: u64,
}

impl FrameTick {
    /// Creates a tick for the given time and frame counter.
    #[inline]
    #[must_use]
    pub const fn new(now: HostTime, frame_index: u64) -> Self {
        Self { now, frame_index }
    }
}

/// Read-only host state sampled once per tick.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct TickContext {
    /// Whether the shell's overview (expose) mode is visible. Running
    /// animations are cancelled as soon as this is observed.
    pub overview_visible: bool,
}

impl TickContext {
    /// A context with no host state that interferes with animations.
    pub const IDLE: Self = Self {
        overview_visible: false,
    };
}
