// Copyright 2026 the Proscenium Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Deterministic playback harness and recording backends.
//!
//! Everything in the core is callback-driven and clockless, so a test (or a
//! demo) needs three things to exercise a full navigation cycle: backend
//! doubles that record what they are told, a virtual clock, and an event
//! queue that delivers the settlement callback when its window elapses.
//! [`Playback`] bundles all three around a
//! [`Slideshow`](proscenium_core::show::Slideshow).
//!
//! [`MarkAudit`] checks the recorded mark history against the carousel's
//! standing invariant: at least one and at most two slides current at every
//! instant.

#![no_std]

extern crate alloc;

use alloc::vec::Vec;
use core::fmt;

use proscenium_core::backend::{Animator, Stage};
use proscenium_core::choreography::{TransitionProgram, TransitionSpec};
use proscenium_core::deck::{Deck, DeckError, StageChanges};
use proscenium_core::direction::Direction;
use proscenium_core::intro::IntroProgram;
use proscenium_core::show::{NavOutcome, Slideshow};
use proscenium_core::time::Duration;
use proscenium_core::trace::Tracer;

/// One mark flip applied to the stage.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct MarkChange {
    /// Slide slot index.
    pub slide: u32,
    /// The mark's new state.
    pub current: bool,
}

/// A [`Stage`] double that mirrors marks and records history.
#[derive(Debug, Default)]
pub struct RecordingStage {
    current: Vec<bool>,
    /// Every mark flip, in application order.
    pub changes: Vec<MarkChange>,
    /// The set of current slides after each apply, ascending.
    pub snapshots: Vec<Vec<u32>>,
}

impl RecordingStage {
    /// Creates an empty recording stage.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// The slides currently marked, ascending.
    #[must_use]
    #[expect(
        clippy::cast_possible_truncation,
        reason = "deck sizes are small; indices always fit in u32"
    )]
    pub fn current_slides(&self) -> Vec<u32> {
        self.current
            .iter()
            .enumerate()
            .filter_map(|(i, &c)| c.then_some(i as u32))
            .collect()
    }
}

impl Stage for RecordingStage {
    fn apply(&mut self, deck: &Deck, changes: &StageChanges) {
        self.current.resize(deck.len(), false);
        for &idx in &changes.marked {
            self.current[idx as usize] = true;
            self.changes.push(MarkChange {
                slide: idx,
                current: true,
            });
        }
        for &idx in &changes.unmarked {
            self.current[idx as usize] = false;
            self.changes.push(MarkChange {
                slide: idx,
                current: false,
            });
        }
        self.snapshots.push(self.current_slides());
    }
}

/// The failure a [`RecordingAnimator`] raises when told to.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct AnimatorFailure;

impl fmt::Display for AnimatorFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "animator rejected the program")
    }
}

impl core::error::Error for AnimatorFailure {}

/// An [`Animator`] double that captures every program it is handed.
#[derive(Debug, Default)]
pub struct RecordingAnimator {
    /// Played transition programs, in order.
    pub programs: Vec<TransitionProgram>,
    /// Played intro programs, in order.
    pub intros: Vec<IntroProgram>,
    /// When set, the next `play` call fails (and clears the flag).
    pub fail_next: bool,
}

impl RecordingAnimator {
    /// Creates an empty recording animator.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

impl Animator for RecordingAnimator {
    type Error = AnimatorFailure;

    fn play(&mut self, program: &TransitionProgram) -> Result<(), Self::Error> {
        if self.fail_next {
            self.fail_next = false;
            return Err(AnimatorFailure);
        }
        self.programs.push(program.clone());
        Ok(())
    }

    fn play_intro(&mut self, intro: &IntroProgram) -> Result<(), Self::Error> {
        self.intros.push(intro.clone());
        Ok(())
    }
}

/// A virtual-clock driver around a [`Slideshow`] with recording backends.
///
/// Settlement scheduling mirrors the cooperative event queue of a real
/// host: [`navigate`](Self::navigate) records the settlement deadline the
/// outcome reports, and [`tick`](Self::tick) delivers the callback once the
/// clock passes it. At most one deadline is ever outstanding; the
/// single-in-flight lock guarantees it.
#[derive(Debug)]
pub struct Playback {
    show: Slideshow<RecordingStage, RecordingAnimator>,
    now: Duration,
    due: Option<Duration>,
}

impl Playback {
    /// Creates a playback over `len` slides with the classic profile.
    ///
    /// # Errors
    ///
    /// Returns [`DeckError::Empty`] if `len` is zero.
    pub fn new(len: usize) -> Result<Self, DeckError> {
        Self::with_spec(len, TransitionSpec::classic())
    }

    /// Creates a playback with an explicit transition profile.
    ///
    /// # Errors
    ///
    /// Returns [`DeckError::Empty`] if `len` is zero.
    pub fn with_spec(len: usize, spec: TransitionSpec) -> Result<Self, DeckError> {
        Ok(Self {
            show: Slideshow::new(len, spec, RecordingStage::new(), RecordingAnimator::new())?,
            now: Duration::ZERO,
            due: None,
        })
    }

    /// Issues one navigation intent at the current virtual time.
    ///
    /// # Errors
    ///
    /// Surfaces [`AnimatorFailure`] when the animator double was told to
    /// fail; the lock is still held, as in a real driver.
    pub fn navigate(&mut self, direction: Direction) -> Result<NavOutcome, AnimatorFailure> {
        let outcome = self.show.navigate(direction, &mut Tracer::none())?;
        if let NavOutcome::Started { settles_after } = outcome {
            self.due = Some(self.now.saturating_add(settles_after));
        }
        Ok(outcome)
    }

    /// Convenience for [`navigate`](Self::navigate)`(Direction::Forward)`.
    ///
    /// # Errors
    ///
    /// See [`navigate`](Self::navigate).
    pub fn next(&mut self) -> Result<NavOutcome, AnimatorFailure> {
        self.navigate(Direction::Forward)
    }

    /// Convenience for [`navigate`](Self::navigate)`(Direction::Backward)`.
    ///
    /// # Errors
    ///
    /// See [`navigate`](Self::navigate).
    pub fn previous(&mut self) -> Result<NavOutcome, AnimatorFailure> {
        self.navigate(Direction::Backward)
    }

    /// Delivers the readiness signal.
    ///
    /// # Errors
    ///
    /// Surfaces [`AnimatorFailure`] from the intro program.
    pub fn ready(&mut self) -> Result<bool, AnimatorFailure> {
        self.show.on_ready(&mut Tracer::none())
    }

    /// Advances the virtual clock, delivering the settlement callback if
    /// its deadline passes.
    pub fn tick(&mut self, elapsed: Duration) {
        self.now = self.now.saturating_add(elapsed);
        if let Some(due) = self.due
            && due <= self.now
        {
            self.due = None;
            self.show.settle(&mut Tracer::none());
        }
    }

    /// Jumps the clock to the outstanding settlement deadline (if any) and
    /// delivers the callback.
    pub fn run_until_idle(&mut self) {
        if let Some(due) = self.due.take() {
            self.now = self.now.max(due);
            self.show.settle(&mut Tracer::none());
        }
    }

    /// Settles immediately, regardless of any scheduled deadline.
    ///
    /// Models the watchdog path a driver takes after an animator failure,
    /// where no settlement deadline was ever scheduled.
    pub fn force_settle(&mut self) {
        self.due = None;
        self.show.settle(&mut Tracer::none());
    }

    /// The current virtual time.
    #[must_use]
    pub const fn now(&self) -> Duration {
        self.now
    }

    /// The outstanding settlement deadline, if a transition is in flight.
    #[must_use]
    pub const fn settles_at(&self) -> Option<Duration> {
        self.due
    }

    /// The wrapped slideshow.
    #[must_use]
    pub const fn show(&self) -> &Slideshow<RecordingStage, RecordingAnimator> {
        &self.show
    }

    /// The recording stage double.
    #[must_use]
    pub const fn stage(&self) -> &RecordingStage {
        self.show.stage()
    }

    /// The recording animator double.
    #[must_use]
    pub const fn animator(&self) -> &RecordingAnimator {
        self.show.animator()
    }

    /// The recording animator double, mutably.
    pub const fn animator_mut(&mut self) -> &mut RecordingAnimator {
        self.show.animator_mut()
    }

    /// The current slide index.
    #[must_use]
    pub const fn current_index(&self) -> usize {
        self.show.current_index()
    }

    /// Whether a transition is in flight.
    #[must_use]
    pub const fn is_transitioning(&self) -> bool {
        self.show.is_transitioning()
    }
}

/// A mark-history violation found by [`MarkAudit`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AuditViolation {
    /// A snapshot had no current slide.
    NoCurrent {
        /// Index of the offending snapshot.
        at: usize,
    },
    /// A snapshot had more than two current slides.
    TooManyCurrent {
        /// Index of the offending snapshot.
        at: usize,
        /// How many slides were marked.
        count: usize,
    },
    /// A two-slide snapshot was not the outgoing/incoming pair of any
    /// played program.
    ForeignPair {
        /// Index of the offending snapshot.
        at: usize,
    },
}

/// Checks recorded mark snapshots against the carousel invariant.
#[derive(Clone, Copy, Debug, Default)]
pub struct MarkAudit;

impl MarkAudit {
    /// Verifies that every snapshot holds between one and two current
    /// slides (one at rest, two during the overlap window).
    ///
    /// # Errors
    ///
    /// Returns the first violation found.
    pub fn check(snapshots: &[Vec<u32>]) -> Result<(), AuditViolation> {
        for (at, snapshot) in snapshots.iter().enumerate() {
            match snapshot.len() {
                0 => return Err(AuditViolation::NoCurrent { at }),
                1 | 2 => {}
                count => return Err(AuditViolation::TooManyCurrent { at, count }),
            }
        }
        Ok(())
    }

    /// Like [`check`](Self::check), and additionally verifies that every
    /// overlap snapshot holds exactly the outgoing/incoming pair of one of
    /// the played programs.
    ///
    /// # Errors
    ///
    /// Returns the first violation found.
    pub fn check_against(
        snapshots: &[Vec<u32>],
        programs: &[TransitionProgram],
    ) -> Result<(), AuditViolation> {
        Self::check(snapshots)?;
        for (at, snapshot) in snapshots.iter().enumerate() {
            if let [a, b] = snapshot.as_slice() {
                let known = programs.iter().any(|p| {
                    let mut pair = [p.outgoing.0, p.incoming.0];
                    pair.sort_unstable();
                    pair == [*a, *b]
                });
                if !known {
                    return Err(AuditViolation::ForeignPair { at });
                }
            }
        }
        Ok(())
    }
}
