// Copyright 2026 the Proscenium Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Human-readable trace output.
//!
//! [`PrettyPrintSink`] implements [`TraceSink`] and writes one line per event
//! to a [`Write`](std::io::Write) destination (default: stderr).

use std::io::Write;

use proscenium_core::choreography::Track;
use proscenium_core::direction::Direction;
use proscenium_core::trace::{
    IntentEvent, IntroEvent, SettleEvent, TraceSink, TransitionBeginEvent,
};

/// Writes human-readable trace lines to a [`Write`](std::io::Write) destination.
pub struct PrettyPrintSink<W: Write = Box<dyn Write>> {
    writer: W,
}

impl<W: Write> std::fmt::Debug for PrettyPrintSink<W> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PrettyPrintSink").finish_non_exhaustive()
    }
}

impl PrettyPrintSink {
    /// Creates a sink that writes to stderr.
    #[must_use]
    pub fn stderr() -> Self {
        Self {
            writer: Box::new(std::io::stderr()),
        }
    }

    /// Creates a sink that writes to a boxed writer.
    #[must_use]
    pub fn new(writer: Box<dyn Write>) -> Self {
        Self { writer }
    }
}

impl<W: Write> PrettyPrintSink<W> {
    /// Creates a sink that writes to the given destination.
    #[must_use]
    pub fn with_writer(writer: W) -> Self {
        Self { writer }
    }
}

fn direction_name(d: Direction) -> &'static str {
    match d {
        Direction::Forward => "forward",
        Direction::Backward => "backward",
    }
}

impl<W: Write> TraceSink for PrettyPrintSink<W> {
    fn on_intent(&mut self, e: &IntentEvent) {
        let verdict = if e.accepted { "accepted" } else { "dropped" };
        let _ = writeln!(
            self.writer,
            "[intent] dir={} {verdict}",
            direction_name(e.direction),
        );
    }

    fn on_transition_begin(&mut self, e: &TransitionBeginEvent) {
        let _ = writeln!(
            self.writer,
            "[transition] {}→{} dir={} tracks={} settles={:?}",
            e.from,
            e.to,
            direction_name(e.direction),
            e.track_count,
            e.settles_after,
        );
    }

    fn on_settle(&mut self, e: &SettleEvent) {
        let _ = writeln!(self.writer, "[settle] current={}", e.current);
    }

    fn on_intro(&mut self, e: &IntroEvent) {
        let _ = writeln!(
            self.writer,
            "[intro] slide={} tracks={}",
            e.slide, e.track_count,
        );
    }

    fn on_tracks(&mut self, tracks: &[Track]) {
        for t in tracks {
            let _ = writeln!(
                self.writer,
                "[track] {:?} start={:?} delay={:?} dur={:?} easing={:?}",
                t.target, t.start, t.delay, t.duration, t.easing,
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pretty_print_intent() {
        let mut sink = PrettyPrintSink::with_writer(Vec::<u8>::new());
        sink.on_intent(&IntentEvent {
            direction: Direction::Forward,
            accepted: true,
        });
        sink.on_intent(&IntentEvent {
            direction: Direction::Backward,
            accepted: false,
        });
        let output = String::from_utf8(sink.writer).unwrap();
        assert!(output.contains("[intent] dir=forward accepted"), "got: {output}");
        assert!(output.contains("dir=backward dropped"), "got: {output}");
    }

    #[test]
    fn pretty_print_transition() {
        let mut sink = PrettyPrintSink::with_writer(Vec::<u8>::new());
        sink.on_transition_begin(&TransitionBeginEvent {
            from: 2,
            to: 3,
            direction: Direction::Forward,
            track_count: 9,
            settles_after: proscenium_core::time::Duration(2700),
        });
        sink.on_settle(&SettleEvent { current: 3 });
        let output = String::from_utf8(sink.writer).unwrap();
        assert!(output.contains("[transition] 2→3"), "got: {output}");
        assert!(output.contains("[settle] current=3"), "got: {output}");
    }
}
