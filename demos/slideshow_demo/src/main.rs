// Copyright 2026 the Proscenium Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Simulated navigation session that exercises the tracing and diagnostics
//! pipeline.
//!
//! Drives a five-slide carousel through its intro reveal and a handful of
//! navigation steps on a virtual clock, recording events to both a
//! [`PrettyPrintSink`](proscenium_debug::pretty::PrettyPrintSink) and a
//! [`RecorderSink`](proscenium_debug::recorder::RecorderSink), then exports
//! a Chrome trace JSON file.

use std::fs::File;
use std::io::BufWriter;

use proscenium_core::choreography::{Track, TransitionSpec};
use proscenium_core::show::{NavOutcome, Slideshow};
use proscenium_core::time::Duration;
use proscenium_core::trace::{
    IntentEvent, IntroEvent, SettleEvent, TraceSink, TransitionBeginEvent, Tracer,
};

use proscenium_debug::pretty::PrettyPrintSink;
use proscenium_debug::recorder::RecorderSink;

use proscenium_harness::{RecordingAnimator, RecordingStage};

const SLIDE_COUNT: usize = 5;

/// Fans every event out to a pretty printer and a recorder.
struct Tee {
    pretty: PrettyPrintSink,
    recorder: RecorderSink,
}

impl Tee {
    /// Moves the recorder playhead as the simulated clock advances.
    fn advance(&mut self, elapsed: Duration) {
        self.recorder.advance(elapsed);
    }
}

impl TraceSink for Tee {
    fn on_intent(&mut self, e: &IntentEvent) {
        self.pretty.on_intent(e);
        self.recorder.on_intent(e);
    }

    fn on_transition_begin(&mut self, e: &TransitionBeginEvent) {
        self.pretty.on_transition_begin(e);
        self.recorder.on_transition_begin(e);
    }

    fn on_settle(&mut self, e: &SettleEvent) {
        self.pretty.on_settle(e);
        self.recorder.on_settle(e);
    }

    fn on_intro(&mut self, e: &IntroEvent) {
        self.pretty.on_intro(e);
        self.recorder.on_intro(e);
    }

    fn on_tracks(&mut self, tracks: &[Track]) {
        self.pretty.on_tracks(tracks);
        self.recorder.on_tracks(tracks);
    }
}

fn main() {
    // -- sinks ---------------------------------------------------------------
    let mut tee = Tee {
        pretty: PrettyPrintSink::new(Box::new(std::io::stdout())),
        recorder: RecorderSink::new(),
    };

    // -- slideshow -----------------------------------------------------------
    let spec = TransitionSpec::classic();
    let mut show = Slideshow::new(
        SLIDE_COUNT,
        spec,
        RecordingStage::new(),
        RecordingAnimator::new(),
    )
    .expect("slide count is nonzero");

    // -- simulated session ---------------------------------------------------
    // Assets finish loading; the one-shot intro reveal runs.
    show.on_ready(&mut Tracer::new(&mut tee))
        .expect("recording animator does not fail");

    // Intro runs out before the first interaction.
    let intro_span = spec.intro_delay.saturating_add(Duration(2700));
    tee.advance(intro_span);

    // Three forward steps, each settling before the next intent.
    for _ in 0..3 {
        let outcome = show
            .next(&mut Tracer::new(&mut tee))
            .expect("recording animator does not fail");
        let NavOutcome::Started { settles_after } = outcome else {
            unreachable!("navigation on an idle carousel always starts");
        };
        tee.advance(settles_after);
        show.settle(&mut Tracer::new(&mut tee));
    }

    // An impatient double-tap: the second intent lands mid-transition and
    // is dropped.
    let outcome = show
        .previous(&mut Tracer::new(&mut tee))
        .expect("recording animator does not fail");
    let NavOutcome::Started { settles_after } = outcome else {
        unreachable!("navigation on an idle carousel always starts");
    };
    tee.advance(Duration(200));
    let rejected = show
        .previous(&mut Tracer::new(&mut tee))
        .expect("dropped intents never reach the animator");
    assert_eq!(rejected, NavOutcome::Rejected);

    tee.advance(settles_after.saturating_sub(Duration(200)));
    show.settle(&mut Tracer::new(&mut tee));

    println!(
        "Ended on slide {} after {} transitions",
        show.current_index(),
        show.animator().programs.len(),
    );

    // -- export Chrome trace ---------------------------------------------------
    let path = "trace.json";
    let file = File::create(path).expect("failed to create trace.json");
    let mut writer = BufWriter::new(file);
    proscenium_debug::chrome::export(tee.recorder.as_bytes(), &mut writer)
        .expect("failed to write Chrome trace");

    println!("Wrote {path}");
}
