// Copyright 2026 the Genie Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Core of the magic-lamp minimize effect.
//!
//! `genie_core` computes how a window surface pours into its taskbar or dock
//! icon when minimized, and back out when restored. It owns no compositor
//! state: the window manager hands it geometry once per transition and frame
//! ticks afterwards, and reads back displaced mesh vertices. It is `no_std`
//! compatible (with `alloc`).
//!
//! # Architecture
//!
//! ```text
//!   SurfaceSnapshot ──► classify() ──► Geometry (side, local rects)
//!                                          │
//!   FrameTick ──► EffectRegistry::tick() ──► LampEffect::tick()
//!                                          │   progress ──► PhaseDriver ──► (k, j)
//!                                          │   FrameThrottle ──► redraw request
//!                                          ▼
//!   renderer ──► LampEffect::evaluate_mesh() ──► MeshGrid × Deformer ──► vertices
//! ```
//!
//! **[`side`]** — Picks the monitor edge the window collapses toward and
//! snaps the icon onto it.
//!
//! **[`phase`]** — Maps progress to the neck (`k`) and pour (`j`)
//! parameters, with the minimize/unminimize mirror.
//!
//! **[`deform`]** — The four per-side vertex mappings and the wobble.
//!
//! **[`mesh`]** — Tile resolution and whole-mesh evaluation from one
//! parameter snapshot.
//!
//! **[`throttle`]** — Limits redraw requests to one per 8 ms.
//!
//! **[`effect`]** / **[`registry`]** — Lifecycle of one transition, and at
//! most one transition per surface.
//!
//! **[`host`]** — The two hooks the window manager provides.
//!
//! **[`trace`]** — [`TraceSink`](trace::TraceSink) trait and event types,
//! with a zero-overhead [`Tracer`](trace::Tracer) wrapper.
//!
//! # Crate features
//!
//! - `std` (disabled by default): Enables `std` support in dependencies.
//! - `trace` (disabled by default): Enables `Tracer` method bodies (one branch
//!   per call site).
//! - `serde` (disabled by default): Deserialises [`EffectConfig`](config::EffectConfig)
//!   and its parts from the settings bundle.

#![no_std]
#![cfg_attr(docsrs, feature(doc_auto_cfg))]

extern crate alloc;

pub mod config;
pub mod deform;
pub mod effect;
pub mod geometry;
pub mod host;
pub mod mesh;
pub mod output;
pub mod phase;
pub mod registry;
pub mod side;
pub mod throttle;
pub mod time;
pub mod timing;
pub mod trace;
