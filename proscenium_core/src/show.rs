// Copyright 2026 the Proscenium Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The slideshow driver: navigation, choreography, and backends wired
//! together.
//!
//! [`Slideshow`] owns the [`Deck`], the [`Navigator`], and the two backend
//! collaborators. One navigation step flows through it like this:
//!
//! ```text
//!   intent ──► Navigator::advance() ──► choreography::transition()
//!                   │ (busy: dropped)          │
//!                   ▼                          ▼
//!            NavOutcome::Rejected      mark incoming current,
//!                                      Animator::play(program)
//!                                              │
//!            caller's event queue ◄── Started { settles_after }
//!                                              │ after the window
//!                                              ▼
//!                                      settle(): unmark outgoing,
//!                                      Navigator::settle()
//! ```
//!
//! The driver never blocks and never reads a clock: settlement is a
//! callback the owning event loop delivers after the duration a started
//! navigation reports.

use crate::backend::{Animator, Stage};
use crate::choreography::{TransitionSpec, transition};
use crate::deck::{Deck, DeckError, StageChanges};
use crate::direction::Direction;
use crate::intro::IntroSequencer;
use crate::nav::{Navigator, Step};
use crate::time::Duration;
use crate::trace::{IntentEvent, IntroEvent, SettleEvent, Tracer, TransitionBeginEvent};

/// The result of one navigation intent.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum NavOutcome {
    /// A transition started; the caller must deliver
    /// [`Slideshow::settle`] after this window elapses.
    Started {
        /// Offset from now at which the transition settles.
        settles_after: Duration,
    },
    /// A transition was already in flight; the intent was dropped.
    Rejected,
}

/// Owns carousel state and orchestrates one navigation step at a time.
#[derive(Debug)]
pub struct Slideshow<S, A> {
    deck: Deck,
    nav: Navigator,
    spec: TransitionSpec,
    stage: S,
    animator: A,
    intro: IntroSequencer,
    // The accepted step whose settlement is still outstanding.
    pending: Option<Step>,
    changes: StageChanges,
}

impl<S: Stage, A: Animator> Slideshow<S, A> {
    /// Creates a slideshow over `len` slides, marks slide 0 current, and
    /// flushes that mark to the stage.
    ///
    /// # Errors
    ///
    /// Returns [`DeckError::Empty`] if `len` is zero.
    pub fn new(
        len: usize,
        spec: TransitionSpec,
        stage: S,
        animator: A,
    ) -> Result<Self, DeckError> {
        let mut deck = Deck::new(len)?;
        let first = deck.slide(0);
        deck.set_current(first, true);
        let mut show = Self {
            nav: Navigator::new(len),
            deck,
            spec,
            stage,
            animator,
            intro: IntroSequencer::new(),
            pending: None,
            changes: StageChanges::default(),
        };
        show.flush();
        Ok(show)
    }

    /// Attempts one navigation step.
    ///
    /// While a transition is in flight the intent is dropped and
    /// [`NavOutcome::Rejected`] returned; state is untouched. Otherwise the
    /// incoming slide is marked current (the overlap window opens), the
    /// program plays, and the caller receives the settlement window to
    /// schedule [`settle`](Self::settle).
    ///
    /// # Errors
    ///
    /// Animator failures are surfaced untouched. The lock is still held in
    /// that case; call [`settle`](Self::settle) from the failure branch so
    /// the carousel cannot wedge.
    pub fn navigate(
        &mut self,
        direction: Direction,
        tracer: &mut Tracer<'_>,
    ) -> Result<NavOutcome, A::Error> {
        let Some(step) = self.nav.advance(direction) else {
            tracer.intent(&IntentEvent {
                direction,
                accepted: false,
            });
            return Ok(NavOutcome::Rejected);
        };
        tracer.intent(&IntentEvent {
            direction,
            accepted: true,
        });

        let outgoing = self.deck.slide(step.from);
        let incoming = self.deck.slide(step.to);
        let program = transition(&self.spec, direction, outgoing, incoming);

        tracer.transition_begin(&TransitionBeginEvent {
            from: outgoing.0,
            to: incoming.0,
            direction,
            track_count: program.tracks.len(),
            settles_after: program.settled_after,
        });
        #[cfg(feature = "trace-rich")]
        tracer.tracks(&program.tracks);

        self.pending = Some(step);
        if !program.is_noop() {
            self.deck.set_current(incoming, true);
            self.flush();
            self.animator.play(&program)?;
        }
        Ok(NavOutcome::Started {
            settles_after: program.settled_after,
        })
    }

    /// Convenience for [`navigate`](Self::navigate)`(Direction::Forward)`.
    ///
    /// # Errors
    ///
    /// See [`navigate`](Self::navigate).
    pub fn next(&mut self, tracer: &mut Tracer<'_>) -> Result<NavOutcome, A::Error> {
        self.navigate(Direction::Forward, tracer)
    }

    /// Convenience for [`navigate`](Self::navigate)`(Direction::Backward)`.
    ///
    /// # Errors
    ///
    /// See [`navigate`](Self::navigate).
    pub fn previous(&mut self, tracer: &mut Tracer<'_>) -> Result<NavOutcome, A::Error> {
        self.navigate(Direction::Backward, tracer)
    }

    /// Settles the in-flight transition: unmarks the outgoing slide (the
    /// overlap window closes) and releases the lock.
    ///
    /// Idempotent; settling an idle slideshow is a no-op. This is also the
    /// recovery path after an animator failure.
    pub fn settle(&mut self, tracer: &mut Tracer<'_>) {
        if !self.nav.is_transitioning() {
            return;
        }
        if let Some(step) = self.pending.take() {
            if step.from != step.to {
                let outgoing = self.deck.slide(step.from);
                self.deck.set_current(outgoing, false);
                self.flush();
            }
        }
        self.nav.settle();
        tracer.settle(&SettleEvent {
            current: self.deck.slide(self.nav.current()).0,
        });
    }

    /// Delivers the readiness signal.
    ///
    /// The first call runs the intro reveal against slide 0 and returns
    /// `true`; later calls return `false` without side effects. The caller
    /// clears its loading indicator and reveals the navigation chrome at
    /// the same instant.
    ///
    /// # Errors
    ///
    /// Animator failures are surfaced untouched.
    pub fn on_ready(&mut self, tracer: &mut Tracer<'_>) -> Result<bool, A::Error> {
        let first = self.deck.slide(0);
        let Some(intro) = self.intro.on_ready(&self.spec, first) else {
            return Ok(false);
        };
        tracer.intro(&IntroEvent {
            slide: intro.slide.0,
            track_count: intro.tracks.len(),
        });
        #[cfg(feature = "trace-rich")]
        tracer.tracks(&intro.tracks);
        self.animator.play_intro(&intro)?;
        Ok(true)
    }

    /// The current slide index.
    #[must_use]
    pub const fn current_index(&self) -> usize {
        self.nav.current()
    }

    /// Whether a transition is in flight.
    #[must_use]
    pub const fn is_transitioning(&self) -> bool {
        self.nav.is_transitioning()
    }

    /// The deck.
    #[must_use]
    pub const fn deck(&self) -> &Deck {
        &self.deck
    }

    /// The transition configuration.
    #[must_use]
    pub const fn spec(&self) -> &TransitionSpec {
        &self.spec
    }

    /// The stage backend.
    #[must_use]
    pub const fn stage(&self) -> &S {
        &self.stage
    }

    /// The animator backend.
    #[must_use]
    pub const fn animator(&self) -> &A {
        &self.animator
    }

    /// The animator backend, mutably.
    pub const fn animator_mut(&mut self) -> &mut A {
        &mut self.animator
    }

    fn flush(&mut self) {
        self.deck.evaluate_into(&mut self.changes);
        if !self.changes.is_empty() {
            self.stage.apply(&self.deck, &self.changes);
        }
    }
}

#[cfg(test)]
mod tests {
    use alloc::vec::Vec;

    use super::*;
    use crate::choreography::TransitionProgram;
    use crate::intro::IntroProgram;

    /// Mirrors applied marks into a local flag set.
    #[derive(Default)]
    struct MirrorStage {
        current: Vec<bool>,
    }

    impl Stage for MirrorStage {
        fn apply(&mut self, deck: &Deck, changes: &StageChanges) {
            self.current.resize(deck.len(), false);
            for &idx in &changes.marked {
                self.current[idx as usize] = true;
            }
            for &idx in &changes.unmarked {
                self.current[idx as usize] = false;
            }
        }
    }

    #[derive(Default)]
    struct CountingAnimator {
        played: usize,
        intros: usize,
        fail_next: bool,
    }

    impl Animator for CountingAnimator {
        type Error = &'static str;

        fn play(&mut self, _program: &TransitionProgram) -> Result<(), Self::Error> {
            if self.fail_next {
                self.fail_next = false;
                return Err("target missing");
            }
            self.played += 1;
            Ok(())
        }

        fn play_intro(&mut self, _intro: &IntroProgram) -> Result<(), Self::Error> {
            self.intros += 1;
            Ok(())
        }
    }

    fn show(len: usize) -> Slideshow<MirrorStage, CountingAnimator> {
        Slideshow::new(
            len,
            TransitionSpec::classic(),
            MirrorStage::default(),
            CountingAnimator::default(),
        )
        .unwrap()
    }

    fn marked(stage: &MirrorStage) -> Vec<usize> {
        stage
            .current
            .iter()
            .enumerate()
            .filter_map(|(i, &c)| c.then_some(i))
            .collect()
    }

    #[test]
    fn construction_marks_slide_zero() {
        let show = show(5);
        assert_eq!(marked(show.stage()), &[0]);
        assert_eq!(show.current_index(), 0);
        assert!(!show.is_transitioning());
    }

    #[test]
    fn zero_slides_fail_construction() {
        let result = Slideshow::new(
            0,
            TransitionSpec::classic(),
            MirrorStage::default(),
            CountingAnimator::default(),
        );
        assert_eq!(result.unwrap_err(), DeckError::Empty);
    }

    #[test]
    fn overlap_window_opens_then_closes() {
        let mut show = show(5);
        let mut tracer = Tracer::none();

        let outcome = show.next(&mut tracer).unwrap();
        assert!(matches!(outcome, NavOutcome::Started { .. }));
        // Both slides marked during the transition.
        assert_eq!(marked(show.stage()), &[0, 1]);
        assert_eq!(show.animator().played, 1);

        show.settle(&mut tracer);
        assert_eq!(marked(show.stage()), &[1]);
        assert!(!show.is_transitioning());
    }

    #[test]
    fn busy_intents_are_dropped() {
        let mut show = show(5);
        let mut tracer = Tracer::none();

        let _ = show.next(&mut tracer).unwrap();
        assert_eq!(show.next(&mut tracer).unwrap(), NavOutcome::Rejected);
        assert_eq!(show.previous(&mut tracer).unwrap(), NavOutcome::Rejected);
        // Only the first intent reached the animator or moved the index.
        assert_eq!(show.animator().played, 1);
        assert_eq!(show.current_index(), 1);
    }

    #[test]
    fn five_slide_scenario() {
        let mut show = show(5);
        let mut tracer = Tracer::none();
        for _ in 0..3 {
            let _ = show.next(&mut tracer).unwrap();
            show.settle(&mut tracer);
        }
        assert_eq!(show.current_index(), 3);
        let _ = show.previous(&mut tracer).unwrap();
        show.settle(&mut tracer);
        assert_eq!(show.current_index(), 2);
        assert_eq!(marked(show.stage()), &[2]);
    }

    #[test]
    fn single_slide_cycles_the_lock_without_animating() {
        let mut show = show(1);
        let mut tracer = Tracer::none();

        let outcome = show.next(&mut tracer).unwrap();
        assert_eq!(
            outcome,
            NavOutcome::Started {
                settles_after: Duration::ZERO
            }
        );
        assert_eq!(show.animator().played, 0, "self-transition plays nothing");
        assert!(show.is_transitioning());

        show.settle(&mut tracer);
        assert_eq!(show.current_index(), 0);
        assert_eq!(marked(show.stage()), &[0]);
        assert!(show.next(&mut tracer).is_ok_and(|o| o != NavOutcome::Rejected));
    }

    #[test]
    fn animator_failure_leaves_lock_recoverable() {
        let mut show = show(3);
        let mut tracer = Tracer::none();
        show.animator_mut().fail_next = true;

        assert!(show.next(&mut tracer).is_err());
        assert!(show.is_transitioning(), "lock held after failure");

        // The documented recovery path.
        show.settle(&mut tracer);
        assert!(!show.is_transitioning());
        assert_eq!(marked(show.stage()), &[1]);
        assert!(show.next(&mut tracer).unwrap() != NavOutcome::Rejected);
    }

    #[test]
    fn ready_signal_fires_intro_once() {
        let mut show = show(4);
        let mut tracer = Tracer::none();
        assert!(show.on_ready(&mut tracer).unwrap());
        assert!(!show.on_ready(&mut tracer).unwrap());
        assert_eq!(show.animator().intros, 1);
    }
}
