// Copyright 2026 the Proscenium Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Chrome Trace Event Format exporter.
//!
//! [`export`] reads recorded bytes from a [`RecorderSink`](super::recorder::RecorderSink)
//! and writes [Chrome Trace Event Format][spec] JSON to the given writer.
//! Transitions become begin/end spans (the span closes at settlement), all
//! other events become instants.
//!
//! [spec]: https://docs.google.com/document/d/1CvAClvFfyA5R-PhYUmn5OOQtYMH4h6I0nSsKchNAySU

use std::io::{self, Write};

use serde_json::{Value, json};

use proscenium_core::time::Duration;

use crate::recorder::{RecordedKind, decode};

/// Exports recorded events as Chrome Trace Event Format JSON.
///
/// The output is a complete JSON array of trace event objects, suitable for
/// loading into `chrome://tracing` or [Perfetto](https://ui.perfetto.dev/).
///
/// Recorded millisecond playhead times are converted to microseconds.
pub fn export(bytes: &[u8], writer: &mut dyn Write) -> io::Result<()> {
    let mut events: Vec<Value> = Vec::new();

    for recorded in decode(bytes) {
        let ts = ms_to_us(recorded.at);
        match recorded.kind {
            RecordedKind::Intent(e) => {
                events.push(json!({
                    "ph": "i",
                    "name": "Intent",
                    "cat": "Navigation",
                    "ts": ts,
                    "pid": 0,
                    "tid": 0,
                    "s": "t",
                    "args": {
                        "direction": format!("{:?}", e.direction),
                        "accepted": e.accepted,
                    }
                }));
            }
            RecordedKind::TransitionBegin(e) => {
                events.push(json!({
                    "ph": "B",
                    "name": "Transition",
                    "cat": "Navigation",
                    "ts": ts,
                    "pid": 0,
                    "tid": 0,
                    "args": {
                        "from": e.from,
                        "to": e.to,
                        "direction": format!("{:?}", e.direction),
                        "tracks": e.track_count,
                        "settles_after_ms": e.settles_after.0,
                    }
                }));
            }
            RecordedKind::Settle(e) => {
                events.push(json!({
                    "ph": "E",
                    "name": "Transition",
                    "cat": "Navigation",
                    "ts": ts,
                    "pid": 0,
                    "tid": 0,
                    "args": {
                        "current": e.current,
                    }
                }));
            }
            RecordedKind::Intro(e) => {
                events.push(json!({
                    "ph": "i",
                    "name": "Intro",
                    "cat": "Navigation",
                    "ts": ts,
                    "pid": 0,
                    "tid": 0,
                    "s": "g",
                    "args": {
                        "slide": e.slide,
                        "tracks": e.track_count,
                    }
                }));
            }
            RecordedKind::TracksCount { count } => {
                events.push(json!({
                    "ph": "i",
                    "name": "Tracks",
                    "cat": "Rich",
                    "ts": ts,
                    "pid": 0,
                    "tid": 0,
                    "s": "p",
                    "args": {
                        "count": count,
                    }
                }));
            }
        }
    }

    serde_json::to_writer_pretty(writer, &events)?;
    Ok(())
}

#[expect(
    clippy::cast_precision_loss,
    reason = "trace timestamps are far below the f64 integer limit"
)]
fn ms_to_us(at: Duration) -> f64 {
    at.0 as f64 * 1000.0
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::recorder::RecorderSink;
    use proscenium_core::direction::Direction;
    use proscenium_core::trace::{
        IntentEvent, SettleEvent, TraceSink, TransitionBeginEvent,
    };

    #[test]
    fn export_produces_valid_json() {
        let mut rec = RecorderSink::new();
        rec.on_intent(&IntentEvent {
            direction: Direction::Forward,
            accepted: true,
        });
        rec.on_transition_begin(&TransitionBeginEvent {
            from: 0,
            to: 1,
            direction: Direction::Forward,
            track_count: 9,
            settles_after: Duration(2700),
        });
        rec.advance(Duration(2700));
        rec.on_settle(&SettleEvent { current: 1 });

        let mut out = Vec::new();
        export(rec.as_bytes(), &mut out).unwrap();
        let json_str = String::from_utf8(out).unwrap();

        // Should parse as a JSON array.
        let parsed: Vec<Value> = serde_json::from_str(&json_str).unwrap();
        assert_eq!(parsed.len(), 3);

        // First event is an instant Intent.
        assert_eq!(parsed[0]["ph"], "i");
        assert_eq!(parsed[0]["name"], "Intent");

        // Second opens the transition span at t=0.
        assert_eq!(parsed[1]["ph"], "B");
        assert_eq!(parsed[1]["name"], "Transition");
        assert_eq!(parsed[1]["ts"], 0.0);

        // Third closes it at 2700ms = 2.7e6µs.
        assert_eq!(parsed[2]["ph"], "E");
        assert_eq!(parsed[2]["ts"], 2_700_000.0);
    }

    #[test]
    fn export_empty_recording() {
        let mut out = Vec::new();
        export(&[], &mut out).unwrap();
        let json_str = String::from_utf8(out).unwrap();
        let parsed: Vec<Value> = serde_json::from_str(&json_str).unwrap();
        assert!(parsed.is_empty());
    }
}
