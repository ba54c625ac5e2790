// Copyright 2026 the Proscenium Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Tracing and diagnostics for the navigation loop.
//!
//! This module provides a [`TraceSink`] trait with per-event methods that
//! the [`Slideshow`](crate::show::Slideshow) driver calls at each stage. All
//! method bodies default to no-ops, so implementing only the events you
//! care about is fine.
//!
//! [`Tracer`] wraps an optional `&mut dyn TraceSink`. When the `trace`
//! feature is **off**, every `Tracer` method compiles to nothing (zero
//! overhead). When **on**, each method performs a single `Option` branch
//! before dispatching.
//!
//! # Crate features
//!
//! - `trace` — enables the `Tracer` method bodies (one branch per call).
//! - `trace-rich` (implies `trace`) — gates per-track scheduling events.

use crate::direction::Direction;
use crate::time::Duration;

#[cfg(feature = "trace-rich")]
use crate::choreography::Track;

// ---------------------------------------------------------------------------
// Event structs
// ---------------------------------------------------------------------------

/// Emitted for every navigation intent, accepted or dropped.
#[derive(Clone, Copy, Debug)]
pub struct IntentEvent {
    /// Requested travel direction.
    pub direction: Direction,
    /// Whether the intent acquired the lock (`false` = busy-rejected).
    pub accepted: bool,
}

/// Emitted when a transition program starts.
#[derive(Clone, Copy, Debug)]
pub struct TransitionBeginEvent {
    /// Outgoing slide index.
    pub from: u32,
    /// Incoming slide index.
    pub to: u32,
    /// Travel direction.
    pub direction: Direction,
    /// Number of scheduled tracks (zero for a self-transition).
    pub track_count: usize,
    /// Offset after which the lock releases.
    pub settles_after: Duration,
}

/// Emitted when a transition settles and the lock releases.
#[derive(Clone, Copy, Debug)]
pub struct SettleEvent {
    /// The slide index that is current after settlement.
    pub current: u32,
}

/// Emitted when the one-shot intro reveal runs.
#[derive(Clone, Copy, Debug)]
pub struct IntroEvent {
    /// The revealed slide index.
    pub slide: u32,
    /// Number of reveal tracks.
    pub track_count: usize,
}

// ---------------------------------------------------------------------------
// TraceSink trait
// ---------------------------------------------------------------------------

/// Receives trace events from the navigation loop.
///
/// All methods have default no-op implementations, so you only need to
/// override the events you care about.
pub trait TraceSink {
    /// Called for every navigation intent.
    fn on_intent(&mut self, e: &IntentEvent) {
        _ = e;
    }

    /// Called when a transition program starts.
    fn on_transition_begin(&mut self, e: &TransitionBeginEvent) {
        _ = e;
    }

    /// Called when a transition settles.
    fn on_settle(&mut self, e: &SettleEvent) {
        _ = e;
    }

    /// Called when the intro reveal runs.
    fn on_intro(&mut self, e: &IntroEvent) {
        _ = e;
    }

    /// Called with the scheduled tracks of a program (requires the
    /// `trace-rich` feature).
    #[cfg(feature = "trace-rich")]
    fn on_tracks(&mut self, tracks: &[Track]) {
        _ = tracks;
    }
}

/// A [`TraceSink`] that discards all events.
#[derive(Clone, Copy, Debug, Default)]
pub struct NoopSink;

impl TraceSink for NoopSink {}

// ---------------------------------------------------------------------------
// Tracer wrapper
// ---------------------------------------------------------------------------

/// Thin wrapper around an optional [`TraceSink`].
///
/// When the `trace` feature is **off**, every method compiles to nothing.
/// When **on**, each method checks the inner `Option` (one branch) before
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

    /// Emits an [`IntentEvent`].
    #[inline]
    pub fn intent(&mut self, e: &IntentEvent) {
        #[cfg(feature = "trace")]
        if let Some(s) = &mut self.sink {
            s.on_intent(e);
        }
        #[cfg(not(feature = "trace"))]
        {
            _ = e;
        }
    }

    /// Emits a [`TransitionBeginEvent`].
    #[inline]
    pub fn transition_begin(&mut self, e: &TransitionBeginEvent) {
        #[cfg(feature = "trace")]
        if let Some(s) = &mut self.sink {
            s.on_transition_begin(e);
        }
        #[cfg(not(feature = "trace"))]
        {
            _ = e;
        }
    }

    /// Emits a [`SettleEvent`].
    #[inline]
    pub fn settle(&mut self, e: &SettleEvent) {
        #[cfg(feature = "trace")]
        if let Some(s) = &mut self.sink {
            s.on_settle(e);
        }
        #[cfg(not(feature = "trace"))]
        {
            _ = e;
        }
    }

    /// Emits an [`IntroEvent`].
    #[inline]
    pub fn intro(&mut self, e: &IntroEvent) {
        #[cfg(feature = "trace")]
        if let Some(s) = &mut self.sink {
            s.on_intro(e);
        }
        #[cfg(not(feature = "trace"))]
        {
            _ = e;
        }
    }

    /// Emits scheduled tracks (requires the `trace-rich` feature).
    #[cfg(feature = "trace-rich")]
    #[inline]
    pub fn tracks(&mut self, tracks: &[Track]) {
        if let Some(s) = &mut self.sink {
            s.on_tracks(tracks);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_intent() -> IntentEvent {
        IntentEvent {
            direction: Direction::Forward,
            accepted: true,
        }
    }

    #[test]
    fn noop_sink_compiles() {
        let mut sink = NoopSink;
        sink.on_intent(&sample_intent());
        sink.on_settle(&SettleEvent { current: 0 });
    }

    #[test]
    fn tracer_none_does_nothing() {
        let mut tracer = Tracer::none();
        tracer.intent(&sample_intent());
        tracer.settle(&SettleEvent { current: 1 });
    }

    #[cfg(feature = "trace")]
    #[test]
    fn tracer_dispatches_to_sink() {
        use alloc::vec::Vec;

        struct RecordingSink {
            accepted: Vec<bool>,
        }
        impl TraceSink for RecordingSink {
            fn on_intent(&mut self, e: &IntentEvent) {
                self.accepted.push(e.accepted);
            }
        }

        let mut sink = RecordingSink {
            accepted: Vec::new(),
        };
        let mut tracer = Tracer::new(&mut sink);
        tracer.intent(&sample_intent());
        tracer.intent(&IntentEvent {
            direction: Direction::Backward,
            accepted: false,
        });
        drop(tracer);
        assert_eq!(sink.accepted, &[true, false]);
    }
}
