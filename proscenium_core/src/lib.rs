// Copyright 2026 the Proscenium Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Navigation state machine and transition choreography for directional
//! slide carousels.
//!
//! `proscenium_core` owns the stateful heart of a slide carousel: which
//! slide is active, the single-in-flight transition lock, and the ordered
//! choreography of one navigation step. Rendering, input capture, and
//! element lookup stay behind traits as opaque collaborators. It is
//! `no_std` compatible (with `alloc`).
//!
//! # Architecture
//!
//! One navigation step flows through the crate like this:
//!
//! ```text
//!   Input Source (buttons, wheel, pointer)
//!       │
//!       ▼
//!   input::GestureRouter ──► Direction
//!                                │
//!                                ▼
//!   show::Slideshow::navigate ──► nav::Navigator (lock + index)
//!                                │
//!                                ▼
//!   choreography::transition ──► TransitionProgram
//!                                │
//!              ┌─────────────────┤
//!              ▼                 ▼
//!   deck::StageChanges    backend::Animator::play
//!   (current marks)              │
//!              │                 │ settles_after elapses
//!              ▼                 ▼
//!   backend::Stage::apply   Slideshow::settle ──► lock releases
//! ```
//!
//! **[`deck`]** — Fixed slide collection with current-mark tracking.
//! Mark mutations drain through a dirty channel (via `understory_dirty`)
//! into incremental [`StageChanges`](deck::StageChanges).
//!
//! **[`nav`]** — The two-state navigation machine: wrap-around index
//! arithmetic plus the cooperative transition lock. Intents arriving while
//! a transition is in flight are dropped, never queued.
//!
//! **[`choreography`]** — Builds the deterministic, time-ordered descriptor
//! program for one step: exit, staggered entrance, inner parallax settle,
//! and the two-wave text reveal. Purely a scheduler of descriptors.
//!
//! **[`input`]** — Routes button, wheel, and pointer intents to directions
//! with configurable tolerance and wheel scaling.
//!
//! **[`intro`]** — The one-shot reveal that runs when the readiness signal
//! fires, before any user navigation.
//!
//! **[`show`]** — The driver tying deck, navigator, choreographer, and
//! backends together, one navigation step at a time.
//!
//! **[`backend`]** — The [`Stage`](backend::Stage) and
//! [`Animator`](backend::Animator) traits that platform integrations
//! implement.
//!
//! **[`trace`]** — [`TraceSink`](trace::TraceSink) trait and event types
//! for navigation-loop instrumentation, with zero-overhead
//! [`Tracer`](trace::Tracer) wrapper.
//!
//! # Crate features
//!
//! - `std` (disabled by default): Enables `std` support in dependencies.
//! - `trace` (disabled by default): Enables `Tracer` method bodies (one
//!   branch per call site).
//! - `trace-rich` (disabled by default, implies `trace`): Gates per-track
//!   scheduling events.

#![no_std]
#![cfg_attr(docsrs, feature(doc_auto_cfg))]

extern crate alloc;

pub mod backend;
pub mod choreography;
pub mod deck;
pub mod direction;
pub mod input;
pub mod intro;
pub mod nav;
pub mod show;
pub mod slide;
pub mod time;
pub mod trace;
