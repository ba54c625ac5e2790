// Copyright 2026 the Proscenium Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! One-shot intro reveal, gated on the readiness signal.
//!
//! After all visual assets have loaded, the first slide's text is revealed
//! with the same cascade the choreographer uses on entrance, offset by a
//! startup delay. The driver reveals the navigation chrome and clears the
//! global loading indicator at the same instant it receives the program.
//!
//! The sequencer runs exactly once. It precedes any user navigation by
//! construction, so it has no interaction with the transition lock; the
//! fired flag only covers a readiness signal that is delivered twice.

use alloc::vec::Vec;

use crate::choreography::{Track, TransitionSpec, reveal_tracks};
use crate::slide::SlideId;
use crate::time::Duration;

/// The intro reveal program for the first slide.
#[derive(Clone, Debug)]
pub struct IntroProgram {
    /// The slide being revealed (the deck's first slide).
    pub slide: SlideId,
    /// The delayed text-reveal cascade.
    pub tracks: Vec<Track>,
}

impl IntroProgram {
    /// End offset of the last-finishing track.
    #[must_use]
    pub fn last_end(&self) -> Duration {
        self.tracks
            .iter()
            .map(Track::end)
            .fold(Duration::ZERO, Duration::max)
    }
}

/// One-shot readiness gate.
#[derive(Clone, Copy, Debug, Default)]
pub struct IntroSequencer {
    fired: bool,
}

impl IntroSequencer {
    /// Creates an unfired sequencer.
    #[must_use]
    pub const fn new() -> Self {
        Self { fired: false }
    }

    /// Whether the intro has already run.
    #[must_use]
    pub const fn fired(&self) -> bool {
        self.fired
    }

    /// Delivers the readiness signal.
    ///
    /// The first call returns the intro program for `slide`; every later
    /// call returns `None`.
    pub fn on_ready(&mut self, spec: &TransitionSpec, slide: SlideId) -> Option<IntroProgram> {
        if self.fired {
            return None;
        }
        self.fired = true;
        Some(IntroProgram {
            slide,
            tracks: reveal_tracks(spec, slide, spec.intro_delay),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::choreography::TrackTarget;
    use crate::slide::RevealGroup;

    #[test]
    fn fires_exactly_once() {
        let spec = TransitionSpec::classic();
        let mut intro = IntroSequencer::new();
        assert!(!intro.fired());

        let program = intro.on_ready(&spec, SlideId(0)).unwrap();
        assert_eq!(program.tracks.len(), RevealGroup::ALL.len());
        assert!(intro.fired());

        assert!(intro.on_ready(&spec, SlideId(0)).is_none());
    }

    #[test]
    fn cascade_is_offset_by_the_startup_delay() {
        let spec = TransitionSpec::classic();
        let mut intro = IntroSequencer::new();
        let program = intro.on_ready(&spec, SlideId(0)).unwrap();
        for track in &program.tracks {
            assert_eq!(track.start, spec.intro_delay);
            assert!(matches!(track.target, TrackTarget::Group(SlideId(0), _)));
        }
        // 2750 + 1700 + 1000.
        assert_eq!(program.last_end(), Duration(5450));
    }
}
