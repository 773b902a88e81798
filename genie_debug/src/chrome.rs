// Copyright 2026 the Genie Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Chrome Trace Event Format exporter.
//!
//! [`ChromeTraceSink`] collects effect events as they happen and writes
//! [Chrome Trace Event Format][spec] JSON to a writer on demand. Each surface
//! gets its own track (`tid`): the effect is a duration slice, `k`/`j`/
//! progress are counters and redraw requests are instant markers.
//!
//! [spec]: https://docs.google.com/document/d/1CvAClvFfyA5R-PhYUmn5OOQtYMH4h6I0nSsKchNAySU

use std::io::{self, Write};

use serde_json::{Value, json};

use genie_core::time::{HostTime, Timebase};
use genie_core::trace::{EffectBeginEvent, EffectEndEvent, FrameEvent, RedrawEvent, TraceSink};

/// Collects trace events for export to `chrome://tracing` or
/// [Perfetto](https://ui.perfetto.dev/).
#[derive(Debug)]
pub struct ChromeTraceSink {
    timebase: Timebase,
    events: Vec<Value>,
    last_ts: f64,
}

impl ChromeTraceSink {
    /// Creates an empty sink. Timestamps are converted to microseconds using
    /// `timebase`.
    #[must_use]
    pub fn new(timebase: Timebase) -> Self {
        Self {
            timebase,
            events: Vec::new(),
            last_ts: 0.0,
        }
    }

    /// Events collected so far.
    #[must_use]
    pub fn events(&self) -> &[Value] {
        &self.events
    }

    /// Number of collected events.
    #[must_use]
    pub fn len(&self) -> usize {
        self.events.len()
    }

    /// Whether nothing was collected.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    /// Drops all collected events.
    pub fn clear(&mut self) {
        self.events.clear();
        self.last_ts = 0.0;
    }

    /// Writes the collected events as a JSON array.
    pub fn write_to(&self, writer: &mut dyn Write) -> io::Result<()> {
        serde_json::to_writer_pretty(writer, &self.events)?;
        Ok(())
    }

    fn ts(&mut self, t: HostTime) -> f64 {
        let us = self.timebase.ticks_to_nanos(t.ticks()) as f64 / 1000.0;
        self.last_ts = us;
        us
    }
}

impl TraceSink for ChromeTraceSink {
    fn on_effect_begin(&mut self, e: &EffectBeginEvent) {
        let ts = self.ts(e.at);
        self.events.push(json!({
            "ph": "B",
            "name": format!("{:?}", e.variant),
            "cat": "Effect",
            "ts": ts,
            "pid": 0,
            "tid": e.surface.0,
            "args": {
                "side": e.side.as_str(),
                "fallback": e.fallback,
                "window": [e.window.x0, e.window.y0, e.window.width(), e.window.height()],
                "icon": [e.icon.x0, e.icon.y0, e.icon.width(), e.icon.height()],
                "duration_us": e.duration.to_nanos(self.timebase) as f64 / 1000.0,
            }
        }));
    }

    fn on_frame(&mut self, e: &FrameEvent) {
        let ts = self.ts(e.now);
        self.events.push(json!({
            "ph": "C",
            "name": format!("phase {}", e.surface.0),
            "cat": "Frame",
            "ts": ts,
            "pid": 0,
            "tid": e.surface.0,
            "args": {
                "progress": e.progress,
                "k": e.k,
                "j": e.j,
            }
        }));
    }

    fn on_redraw(&mut self, e: &RedrawEvent) {
        let ts = self.ts(e.at);
        self.events.push(json!({
            "ph": "i",
            "name": "Redraw",
            "cat": "Frame",
            "ts": ts,
            "pid": 0,
            "tid": e.surface.0,
            "s": "t",
            "args": {
                "frame_index": e.frame_index,
            }
        }));
    }

    fn on_effect_end(&mut self, e: &EffectEndEvent) {
        // Effects ended before attaching have no begin slice to close.
        let Some(at) = e.at else {
            let ts = self.last_ts;
            self.events.push(json!({
                "ph": "i",
                "name": "Discarded",
                "cat": "Effect",
                "ts": ts,
                "pid": 0,
                "tid": e.surface.0,
                "s": "t",
                "args": { "reason": e.reason.as_str() }
            }));
            return;
        };
        let ts = self.ts(at);
        self.events.push(json!({
            "ph": "E",
            "name": format!("{:?}", e.variant),
            "cat": "Effect",
            "ts": ts,
            "pid": 0,
            "tid": e.surface.0,
            "args": {
                "reason": e.reason.as_str(),
                "frames": e.frames,
            }
        }));
    }
}
