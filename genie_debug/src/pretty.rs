// Copyright 2026 the Genie Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Human-readable trace output.
//!
//! [`PrettyPrintSink`] implements [`TraceSink`] and writes one line per event
//! to a [`Write`](std::io::Write) destination (default: stderr). Timestamps
//! are converted to microseconds using a [`Timebase`].

use std::io::Write;

use genie_core::time::{HostTime, Timebase};
use genie_core::trace::{EffectBeginEvent, EffectEndEvent, FrameEvent, RedrawEvent, TraceSink};

/// Writes human-readable trace lines to a [`Write`](std::io::Write) destination.
pub struct PrettyPrintSink<W: Write = Box<dyn Write>> {
    writer: W,
    timebase: Timebase,
    frames: bool,
}

impl<W: Write> std::fmt::Debug for PrettyPrintSink<W> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PrettyPrintSink")
            .field("timebase", &self.timebase)
            .field("frames", &self.frames)
            .finish_non_exhaustive()
    }
}

impl PrettyPrintSink {
    /// Creates a sink that writes to stderr.
    #[must_use]
    pub fn stderr(timebase: Timebase) -> Self {
        Self::new(Box::new(std::io::stderr()), timebase)
    }

    /// Creates a sink that writes to a boxed writer.
    #[must_use]
    pub fn new(writer: Box<dyn Write>, timebase: Timebase) -> Self {
        Self::with_writer(writer, timebase)
    }
}

impl<W: Write> PrettyPrintSink<W> {
    /// Creates a sink that writes to the given destination.
    #[must_use]
    pub fn with_writer(writer: W, timebase: Timebase) -> Self {
        Self {
            writer,
            timebase,
            frames: true,
        }
    }

    /// Skips per-frame lines, keeping lifecycle and redraw events.
    #[must_use]
    pub fn without_frames(mut self) -> Self {
        self.frames = false;
        self
    }

    /// Returns the destination.
    pub fn into_inner(self) -> W {
        self.writer
    }

    fn us(&self, t: HostTime) -> f64 {
        self.timebase.ticks_to_nanos(t.ticks()) as f64 / 1000.0
    }
}

impl<W: Write> TraceSink for PrettyPrintSink<W> {
    fn on_effect_begin(&mut self, e: &EffectBeginEvent) {
        let ms = e.duration.to_nanos(self.timebase) as f64 / 1e6;
        let _ = writeln!(
            self.writer,
            "[begin] surface={} {:?} side={} at {:.1}µs duration={:.1}ms window={:?} icon={:?}{}",
            e.surface.0,
            e.variant,
            e.side.as_str(),
            self.us(e.at),
            ms,
            e.window,
            e.icon,
            if e.fallback { " (fallback)" } else { "" },
        );
    }

    fn on_frame(&mut self, e: &FrameEvent) {
        if !self.frames {
            return;
        }
        let _ = writeln!(
            self.writer,
            "[frame] surface={} frame={} at {:.1}µs progress={:.3} k={:.3} j={:.3}",
            e.surface.0,
            e.frame_index,
            self.us(e.now),
            e.progress,
            e.k,
            e.j,
        );
    }

    fn on_redraw(&mut self, e: &RedrawEvent) {
        let _ = writeln!(
            self.writer,
            "[redraw] surface={} frame={} at {:.1}µs",
            e.surface.0,
            e.frame_index,
            self.us(e.at),
        );
    }

    fn on_effect_end(&mut self, e: &EffectEndEvent) {
        let at = e.at.map(|t| self.us(t));
        let _ = match at {
            Some(us) => writeln!(
                self.writer,
                "[end] surface={} {:?} {} at {us:.1}µs after {} frames",
                e.surface.0,
                e.variant,
                e.reason.as_str(),
                e.frames,
            ),
            None => writeln!(
                self.writer,
                "[end] surface={} {:?} {} before attach",
                e.surface.0,
                e.variant,
                e.reason.as_str(),
            ),
        };
    }
}
