// Copyright 2026 the Genie Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Pretty-printing and Chrome trace export for genie diagnostics.
//!
//! This crate provides [`TraceSink`](genie_core::trace::TraceSink)
//! implementations for development and post-mortem analysis:
//!
//! - [`pretty::PrettyPrintSink`] — human-readable one-line-per-event output.
//! - [`chrome::ChromeTraceSink`] — collects events and writes Chrome Trace
//!   Event Format JSON.

pub mod chrome;
pub mod pretty;
