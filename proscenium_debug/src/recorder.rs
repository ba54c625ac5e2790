// Copyright 2026 the Proscenium Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Compact binary event recording and decoding.
//!
//! [`RecorderSink`] implements [`TraceSink`] and encodes events into a
//! `Vec<u8>` as fixed-size little-endian records. [`decode`] reads them back
//! as an iterator of [`RecordedEvent`].
//!
//! The navigation loop is clockless, so the recorder carries a virtual
//! playhead: the host calls [`advance_to`](RecorderSink::advance_to) (or
//! [`advance`](RecorderSink::advance)) as its clock moves, and every record
//! is stamped with the playhead at the moment it arrives.
//!
//! Rich events ([`on_tracks`](TraceSink::on_tracks)) store only the count.

use proscenium_core::direction::Direction;
use proscenium_core::time::Duration;
use proscenium_core::trace::{
    IntentEvent, IntroEvent, SettleEvent, TraceSink, TransitionBeginEvent,
};

use proscenium_core::choreography::Track;

// ---------------------------------------------------------------------------
// Event type discriminants
// ---------------------------------------------------------------------------

const TAG_INTENT: u8 = 1;
const TAG_TRANSITION_BEGIN: u8 = 2;
const TAG_SETTLE: u8 = 3;
const TAG_INTRO: u8 = 4;
const TAG_TRACKS_COUNT: u8 = 5;

// ---------------------------------------------------------------------------
// RecorderSink
// ---------------------------------------------------------------------------

/// A [`TraceSink`] that encodes events into a compact binary buffer.
#[derive(Debug, Default)]
pub struct RecorderSink {
    buf: Vec<u8>,
    playhead: Duration,
}

impl RecorderSink {
    /// Creates an empty recorder with its playhead at zero.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Moves the playhead to an absolute time.
    ///
    /// The playhead never moves backwards; an earlier time is ignored.
    pub fn advance_to(&mut self, at: Duration) {
        self.playhead = self.playhead.max(at);
    }

    /// Moves the playhead forward by `elapsed`.
    pub fn advance(&mut self, elapsed: Duration) {
        self.playhead = self.playhead.saturating_add(elapsed);
    }

    /// The current playhead position.
    #[must_use]
    pub const fn playhead(&self) -> Duration {
        self.playhead
    }

    /// Returns a view of the recorded bytes.
    #[must_use]
    pub fn as_bytes(&self) -> &[u8] {
        &self.buf
    }

    /// Consumes the recorder and returns the recorded bytes.
    #[must_use]
    pub fn into_bytes(self) -> Vec<u8> {
        self.buf
    }

    // -- encoding helpers --------------------------------------------------

    fn write_header(&mut self, tag: u8) {
        self.buf.push(tag);
        self.write_u64(self.playhead.0);
    }

    fn write_u8(&mut self, v: u8) {
        self.buf.push(v);
    }

    fn write_u32(&mut self, v: u32) {
        self.buf.extend_from_slice(&v.to_le_bytes());
    }

    fn write_u64(&mut self, v: u64) {
        self.buf.extend_from_slice(&v.to_le_bytes());
    }

    fn write_direction(&mut self, d: Direction) {
        self.write_u8(match d {
            Direction::Forward => 0,
            Direction::Backward => 1,
        });
    }
}

impl TraceSink for RecorderSink {
    fn on_intent(&mut self, e: &IntentEvent) {
        self.write_header(TAG_INTENT);
        self.write_direction(e.direction);
        self.write_u8(u8::from(e.accepted));
    }

    fn on_transition_begin(&mut self, e: &TransitionBeginEvent) {
        self.write_header(TAG_TRANSITION_BEGIN);
        self.write_u32(e.from);
        self.write_u32(e.to);
        self.write_direction(e.direction);
        #[expect(
            clippy::cast_possible_truncation,
            reason = "track count capped at u32::MAX for recording"
        )]
        self.write_u32(e.track_count.min(u32::MAX as usize) as u32);
        self.write_u64(e.settles_after.0);
    }

    fn on_settle(&mut self, e: &SettleEvent) {
        self.write_header(TAG_SETTLE);
        self.write_u32(e.current);
    }

    fn on_intro(&mut self, e: &IntroEvent) {
        self.write_header(TAG_INTRO);
        self.write_u32(e.slide);
        #[expect(
            clippy::cast_possible_truncation,
            reason = "track count capped at u32::MAX for recording"
        )]
        self.write_u32(e.track_count.min(u32::MAX as usize) as u32);
    }

    fn on_tracks(&mut self, tracks: &[Track]) {
        self.write_header(TAG_TRACKS_COUNT);
        #[expect(
            clippy::cast_possible_truncation,
            reason = "track count capped at u32::MAX for recording"
        )]
        self.write_u32(tracks.len().min(u32::MAX as usize) as u32);
    }
}

// ---------------------------------------------------------------------------
// Decoder
// ---------------------------------------------------------------------------

/// A decoded event from a binary recording, stamped with the playhead time
/// at which it was recorded.
#[derive(Clone, Debug)]
pub struct RecordedEvent {
    /// Playhead position when the event arrived.
    pub at: Duration,
    /// The event itself.
    pub kind: RecordedKind,
}

/// The event payload of a [`RecordedEvent`].
#[derive(Clone, Debug)]
pub enum RecordedKind {
    /// An [`IntentEvent`].
    Intent(IntentEvent),
    /// A [`TransitionBeginEvent`].
    TransitionBegin(TransitionBeginEvent),
    /// A [`SettleEvent`].
    Settle(SettleEvent),
    /// An [`IntroEvent`].
    Intro(IntroEvent),
    /// Track count for the last scheduled program.
    TracksCount {
        /// Number of tracks.
        count: u32,
    },
}

/// Decodes a byte slice produced by [`RecorderSink`] into an iterator of
/// [`RecordedEvent`].
pub fn decode(bytes: &[u8]) -> DecodeIter<'_> {
    DecodeIter {
        data: bytes,
        pos: 0,
    }
}

/// Iterator over decoded events.
#[derive(Debug)]
pub struct DecodeIter<'a> {
    data: &'a [u8],
    pos: usize,
}

impl DecodeIter<'_> {
    fn remaining(&self) -> usize {
        self.data.len() - self.pos
    }

    fn read_u8(&mut self) -> Option<u8> {
        if self.remaining() < 1 {
            return None;
        }
        let v = self.data[self.pos];
        self.pos += 1;
        Some(v)
    }

    fn read_u32(&mut self) -> Option<u32> {
        if self.remaining() < 4 {
            return None;
        }
        let v = u32::from_le_bytes(self.data[self.pos..self.pos + 4].try_into().ok()?);
        self.pos += 4;
        Some(v)
    }

    fn read_u64(&mut self) -> Option<u64> {
        if self.remaining() < 8 {
            return None;
        }
        let v = u64::from_le_bytes(self.data[self.pos..self.pos + 8].try_into().ok()?);
        self.pos += 8;
        Some(v)
    }

    fn read_direction(&mut self) -> Option<Direction> {
        Some(match self.read_u8()? {
            0 => Direction::Forward,
            _ => Direction::Backward,
        })
    }

    fn decode_intent(&mut self) -> Option<RecordedKind> {
        Some(RecordedKind::Intent(IntentEvent {
            direction: self.read_direction()?,
            accepted: self.read_u8()? != 0,
        }))
    }

    fn decode_transition_begin(&mut self) -> Option<RecordedKind> {
        Some(RecordedKind::TransitionBegin(TransitionBeginEvent {
            from: self.read_u32()?,
            to: self.read_u32()?,
            direction: self.read_direction()?,
            track_count: self.read_u32()? as usize,
            settles_after: Duration(self.read_u64()?),
        }))
    }

    fn decode_settle(&mut self) -> Option<RecordedKind> {
        Some(RecordedKind::Settle(SettleEvent {
            current: self.read_u32()?,
        }))
    }

    fn decode_intro(&mut self) -> Option<RecordedKind> {
        Some(RecordedKind::Intro(IntroEvent {
            slide: self.read_u32()?,
            track_count: self.read_u32()? as usize,
        }))
    }

    fn decode_tracks_count(&mut self) -> Option<RecordedKind> {
        Some(RecordedKind::TracksCount {
            count: self.read_u32()?,
        })
    }
}

impl Iterator for DecodeIter<'_> {
    type Item = RecordedEvent;

    fn next(&mut self) -> Option<Self::Item> {
        let tag = self.read_u8()?;
        let at = Duration(self.read_u64()?);
        let kind = match tag {
            TAG_INTENT => self.decode_intent(),
            TAG_TRANSITION_BEGIN => self.decode_transition_begin(),
            TAG_SETTLE => self.decode_settle(),
            TAG_INTRO => self.decode_intro(),
            TAG_TRACKS_COUNT => self.decode_tracks_count(),
            _ => None, // unknown tag → stop iteration
        }?;
        Some(RecordedEvent { at, kind })
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_begin() -> TransitionBeginEvent {
        TransitionBeginEvent {
            from: 0,
            to: 1,
            direction: Direction::Forward,
            track_count: 9,
            settles_after: Duration(2700),
        }
    }

    #[test]
    fn round_trip_intent() {
        let mut rec = RecorderSink::new();
        rec.advance_to(Duration(150));
        rec.on_intent(&IntentEvent {
            direction: Direction::Backward,
            accepted: false,
        });

        let events: Vec<_> = decode(rec.as_bytes()).collect();
        assert_eq!(events.len(), 1);
        assert_eq!(events[0].at, Duration(150));
        match &events[0].kind {
            RecordedKind::Intent(e) => {
                assert_eq!(e.direction, Direction::Backward);
                assert!(!e.accepted);
            }
            other => panic!("expected Intent, got {other:?}"),
        }
    }

    #[test]
    fn round_trip_transition_begin() {
        let mut rec = RecorderSink::new();
        let orig = sample_begin();
        rec.on_transition_begin(&orig);

        let events: Vec<_> = decode(rec.as_bytes()).collect();
        assert_eq!(events.len(), 1);
        match &events[0].kind {
            RecordedKind::TransitionBegin(e) => {
                assert_eq!(e.from, orig.from);
                assert_eq!(e.to, orig.to);
                assert_eq!(e.direction, orig.direction);
                assert_eq!(e.track_count, orig.track_count);
                assert_eq!(e.settles_after, orig.settles_after);
            }
            other => panic!("expected TransitionBegin, got {other:?}"),
        }
    }

    #[test]
    fn round_trip_settle_and_intro() {
        let mut rec = RecorderSink::new();
        rec.on_intro(&IntroEvent {
            slide: 0,
            track_count: 6,
        });
        rec.advance(Duration(5450));
        rec.on_settle(&SettleEvent { current: 0 });

        let events: Vec<_> = decode(rec.as_bytes()).collect();
        assert_eq!(events.len(), 2);
        assert_eq!(events[0].at, Duration::ZERO);
        assert!(matches!(events[0].kind, RecordedKind::Intro(_)));
        assert_eq!(events[1].at, Duration(5450));
        assert!(matches!(
            events[1].kind,
            RecordedKind::Settle(SettleEvent { current: 0 })
        ));
    }

    #[test]
    fn playhead_never_rewinds() {
        let mut rec = RecorderSink::new();
        rec.advance_to(Duration(1000));
        rec.advance_to(Duration(400));
        assert_eq!(rec.playhead(), Duration(1000));
    }

    #[test]
    fn tracks_store_only_the_count() {
        use proscenium_core::choreography::{TransitionSpec, transition};
        use proscenium_core::slide::SlideId;

        let program = transition(
            &TransitionSpec::classic(),
            Direction::Forward,
            SlideId(0),
            SlideId(1),
        );
        let mut rec = RecorderSink::new();
        rec.on_tracks(&program.tracks);

        let events: Vec<_> = decode(rec.as_bytes()).collect();
        assert_eq!(events.len(), 1);
        match events[0].kind {
            RecordedKind::TracksCount { count } => {
                assert_eq!(count as usize, program.tracks.len());
            }
            ref other => panic!("expected TracksCount, got {other:?}"),
        }
    }

    #[test]
    fn empty_buffer_decodes_to_nothing() {
        let events: Vec<_> = decode(&[]).collect();
        assert!(events.is_empty());
    }
}
